//! Per-client comparison sessions.
//!
//! Clients identify themselves with the [`SESSION_HEADER`] header. Each id
//! maps to its own [`ComparisonSession`] (inputs plus boundary cache) behind
//! an async mutex, so requests within one session run one at a time while
//! different sessions proceed independently.
//!
//! Sessions idle for longer than the store's timeout are dropped the next
//! time any session is looked up.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use city_compare_comparison::ComparisonSession;
use uuid::Uuid;

/// Request and response header carrying the session id.
pub const SESSION_HEADER: &str = "X-Session-Id";

/// How long an unused session is kept.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// A session shared between the store and in-flight requests.
pub type SharedSession = Arc<tokio::sync::Mutex<ComparisonSession>>;

#[derive(Debug)]
struct Entry {
    last_used: Instant,
    session: SharedSession,
}

/// All live sessions, keyed by id.
#[derive(Debug)]
pub struct SessionStore {
    idle_timeout: Duration,
    sessions: Mutex<BTreeMap<Uuid, Entry>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    /// Creates an empty store with [`DEFAULT_IDLE_TIMEOUT`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that drops sessions unused for `idle_timeout`.
    #[must_use]
    pub const fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            sessions: Mutex::new(BTreeMap::new()),
        }
    }

    /// Returns the session for `id`, creating a fresh one under a new id
    /// when `id` is absent, unknown or expired.
    pub fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, SharedSession) {
        self.get_or_create_at(id, Instant::now())
    }

    fn get_or_create_at(&self, id: Option<Uuid>, now: Instant) -> (Uuid, SharedSession) {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);

        let before = sessions.len();
        sessions.retain(|_, entry| {
            now.saturating_duration_since(entry.last_used) <= self.idle_timeout
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            log::debug!("Dropped {evicted} idle session(s)");
        }

        if let Some(id) = id
            && let Some(entry) = sessions.get_mut(&id)
        {
            entry.last_used = now;
            return (id, Arc::clone(&entry.session));
        }

        let id = Uuid::new_v4();
        let session = SharedSession::default();
        sessions.insert(
            id,
            Entry {
                last_used: now,
                session: Arc::clone(&session),
            },
        );
        log::debug!("Created session {id} ({} live)", sessions.len());

        (id, session)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether there are no live sessions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses a session id header value, ignoring malformed ids.
#[must_use]
pub fn parse_session_id(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value.trim()).ok()
}
