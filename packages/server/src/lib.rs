#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for city size comparisons.
//!
//! Serves the comparison pipeline over HTTP: JSON comparisons, the
//! standalone map document as a download, and a swap action. Each client
//! gets its own session (inputs plus geocoding cache), identified by the
//! `X-Session-Id` header.

mod handlers;
pub mod interactive;
pub mod sessions;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use city_compare_comparison::styles::default_styles;
use city_compare_comparison_models::StyleConfig;
use city_compare_geocoder::{BoundaryLookup, GeocodeError, NominatimClient};
use sessions::SessionStore;

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default port.
pub const DEFAULT_PORT: u16 = 8080;

/// Errors that stop the server from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The geocoding client could not be configured.
    #[error("Geocoder setup failed: {0}")]
    Geocoder(#[from] GeocodeError),
    /// Binding or serving failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind_addr: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR` and `PORT`, falling back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("BIND_ADDR").ok().as_deref(),
            std::env::var("PORT").ok().as_deref(),
        )
    }

    /// Builds a config from optional raw values; unparsable ports fall back
    /// to [`DEFAULT_PORT`].
    #[must_use]
    pub fn from_values(bind_addr: Option<&str>, port: Option<&str>) -> Self {
        let bind_addr = bind_addr
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_BIND_ADDR)
            .to_string();
        let port = port.and_then(|p| p.trim().parse().ok()).unwrap_or(DEFAULT_PORT);

        Self { bind_addr, port }
    }
}

/// Command-line options for starting the server.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ServerArgs {
    /// Interface to bind (defaults to `BIND_ADDR` or 127.0.0.1)
    #[arg(long)]
    pub bind: Option<String>,
    /// Port to listen on (defaults to `PORT` or 8080)
    #[arg(long)]
    pub port: Option<u16>,
    /// Prompt for bind address and port
    #[arg(long, short)]
    pub interactive: bool,
}

impl ServerArgs {
    /// Applies the flags over `base`; flags win.
    #[must_use]
    pub fn config_over(&self, base: ServerConfig) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind.clone().unwrap_or(base.bind_addr),
            port: self.port.unwrap_or(base.port),
        }
    }

    /// Starts the server as these flags describe, reading unset values from
    /// the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ServerError`] if the server fails to start.
    #[allow(clippy::future_not_send)]
    pub async fn run(self) -> Result<(), ServerError> {
        if self.interactive {
            interactive::run().await
        } else {
            run_server(self.config_over(ServerConfig::from_env())).await
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// Boundary provider shared by all sessions.
    pub lookup: Arc<dyn BoundaryLookup>,
    /// Per-client sessions.
    pub sessions: SessionStore,
    /// Map layer styles.
    pub styles: StyleConfig,
}

impl AppState {
    /// Creates state with no sessions and the default styles.
    #[must_use]
    pub fn new(lookup: Arc<dyn BoundaryLookup>) -> Self {
        Self {
            lookup,
            sessions: SessionStore::new(),
            styles: default_styles(),
        }
    }
}

/// Registers the `/api` routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/compare", web::get().to(handlers::compare))
            .route("/compare/map", web::get().to(handlers::compare_map))
            .route("/session/swap", web::post().to(handlers::swap)),
    );
}

/// Starts the city comparison API server.
///
/// Builds the Nominatim client from the embedded service registry (with
/// environment overrides) and serves until shut down. The caller provides
/// the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// * If the geocoding client cannot be built
/// * If the HTTP server fails to bind or encounters a runtime error
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    log::info!("Configuring geocoder...");
    let lookup: Arc<dyn BoundaryLookup> = Arc::new(NominatimClient::from_registry()?);

    let state = web::Data::new(AppState::new(lookup));

    let ServerConfig { bind_addr, port } = config;
    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes)
    })
    .bind((bind_addr, port))?
    .run()
    .await?;

    Ok(())
}
