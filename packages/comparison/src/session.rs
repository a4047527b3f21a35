//! Per-user comparison state.
//!
//! A [`ComparisonSession`] owns everything that survives between user
//! actions: the two inputs, the pipeline stage, the last result, and the
//! boundary cache. Front ends keep one session per user and pass it into
//! the pipeline explicitly.

use city_compare_comparison_models::{ComparisonResult, ComparisonStage};
use city_compare_geocoder::{BoundaryCache, BoundaryLookup};

/// One user's comparison context.
#[derive(Debug, Default)]
pub struct ComparisonSession {
    cache: BoundaryCache,
    city_a: String,
    city_b: String,
    stage: ComparisonStage,
    last_result: Option<ComparisonResult>,
}

impl ComparisonSession {
    /// Creates a session with empty inputs and an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The first (reference) city input.
    #[must_use]
    pub fn city_a(&self) -> &str {
        &self.city_a
    }

    /// The second city input.
    #[must_use]
    pub fn city_b(&self) -> &str {
        &self.city_b
    }

    /// Where the current interaction cycle stands.
    #[must_use]
    pub const fn stage(&self) -> ComparisonStage {
        self.stage
    }

    /// The result of the last completed run, if the inputs have not
    /// changed since.
    #[must_use]
    pub const fn last_result(&self) -> Option<&ComparisonResult> {
        self.last_result.as_ref()
    }

    /// The session's boundary cache.
    #[must_use]
    pub const fn cache(&self) -> &BoundaryCache {
        &self.cache
    }

    /// Replaces both inputs and discards the previous result.
    pub fn set_inputs(&mut self, city_a: impl Into<String>, city_b: impl Into<String>) {
        self.city_a = city_a.into();
        self.city_b = city_b.into();
        self.reset();
    }

    /// Exchanges the two inputs and discards the previous result.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.city_a, &mut self.city_b);
        log::debug!("Swapped inputs: '{}' <-> '{}'", self.city_a, self.city_b);
        self.reset();
    }

    fn reset(&mut self) {
        self.last_result = None;
        self.stage = ComparisonStage::Idle;
    }

    /// Runs the pipeline on the current inputs.
    pub async fn run(&mut self, lookup: &dyn BoundaryLookup) -> &ComparisonResult {
        self.reset();

        let stage = &mut self.stage;
        let result = crate::compare_with(
            lookup,
            &mut self.cache,
            &self.city_a,
            &self.city_b,
            &mut |next: ComparisonStage| {
                log::debug!("Comparison stage: {stage} -> {next}");
                *stage = next;
            },
        )
        .await;
        debug_assert!(
            self.stage.is_terminal() || self.stage == ComparisonStage::Idle,
            "pipeline stopped at {}",
            self.stage
        );

        self.last_result.insert(result)
    }

    /// Sets new inputs and runs the pipeline.
    pub async fn compare(
        &mut self,
        lookup: &dyn BoundaryLookup,
        city_a: impl Into<String>,
        city_b: impl Into<String>,
    ) -> &ComparisonResult {
        self.set_inputs(city_a, city_b);
        self.run(lookup).await
    }

    /// Swaps the inputs and runs the pipeline again.
    pub async fn swap_and_run(&mut self, lookup: &dyn BoundaryLookup) -> &ComparisonResult {
        self.swap();
        self.run(lookup).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeLookup, rectangle};

    fn lookup() -> FakeLookup {
        FakeLookup::new(&[
            ("Paris, France", rectangle(2.25, 48.81, 0.17, 0.09)),
            ("Madrid, Spain", rectangle(-3.83, 40.31, 0.3, 0.2)),
        ])
    }

    #[tokio::test]
    async fn run_reaches_composed() {
        let lookup = lookup();
        let mut session = ComparisonSession::new();

        let result = session
            .compare(&lookup, "Paris, France", "Madrid, Spain")
            .await;
        assert!(result.percent_difference.unwrap() > 0.0);
        assert_eq!(session.stage(), ComparisonStage::Composed);
        assert!(session.last_result().is_some());
    }

    #[tokio::test]
    async fn swap_flips_sign_and_reuses_cache() {
        let lookup = lookup();
        let mut session = ComparisonSession::new();

        let forward = session
            .compare(&lookup, "Paris, France", "Madrid, Spain")
            .await
            .percent_difference
            .unwrap();
        let reverse = session
            .swap_and_run(&lookup)
            .await
            .percent_difference
            .unwrap();

        assert_eq!(session.city_a(), "Madrid, Spain");
        assert_eq!(session.city_b(), "Paris, France");
        assert!(forward > 0.0);
        assert!(reverse < 0.0);
        // p' = (a - b) / b = -p / (1 + p / 100)
        assert!((reverse - (-forward / (1.0 + forward / 100.0))).abs() < 1e-9);
        assert_eq!(lookup.calls(), 2);
        assert_eq!(session.cache().len(), 2);
    }

    #[tokio::test]
    async fn new_inputs_discard_previous_result() {
        let lookup = lookup();
        let mut session = ComparisonSession::new();

        session
            .compare(&lookup, "Paris, France", "Madrid, Spain")
            .await;
        session.set_inputs("Paris, France", "");

        assert!(session.last_result().is_none());
        assert_eq!(session.stage(), ComparisonStage::Idle);
    }

    #[tokio::test]
    async fn failed_city_ends_partial() {
        let lookup = lookup();
        let mut session = ComparisonSession::new();

        let result = session.compare(&lookup, "Paris, France", "Gotham").await;
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(session.stage(), ComparisonStage::Partial);
    }

    #[tokio::test]
    async fn blank_inputs_stay_idle() {
        let lookup = lookup();
        let mut session = ComparisonSession::new();

        let result = session.compare(&lookup, "", "  ").await;
        assert!(result.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(session.stage(), ComparisonStage::Idle);
        assert_eq!(lookup.calls(), 0);
    }
}
