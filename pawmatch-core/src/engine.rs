//! Run the full scoring pipeline for one target report.

use crate::report::PetReport;
use crate::scorer::MatchScorer;
use crate::selector::{MatchResult, MatchSelector};

/// Scores candidates and selects the match for a target report.
///
/// The engine holds no per-request state; a single instance can serve any
/// number of concurrent requests.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use pawmatch_core::{MatchEngine, PetReport, Rgb};
///
/// let engine = MatchEngine::default();
/// let target = PetReport::new(Coord { x: 0.0, y: 0.0 }, Rgb::new(0, 0, 0));
/// let candidate = PetReport::new(Coord { x: 0.0001, y: 0.0001 }, Rgb::new(1, 1, 1))
///     .with_user_id("finder");
///
/// let found = engine.check(&target, vec![candidate]).expect("close match");
/// assert_eq!(found.facebook_id.as_deref(), Some("finder"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    scorer: MatchScorer,
    selector: MatchSelector,
}

impl MatchEngine {
    /// Build an engine around `selector`.
    #[must_use]
    pub const fn new(selector: MatchSelector) -> Self {
        Self {
            scorer: MatchScorer,
            selector,
        }
    }

    /// The selector applying the acceptance threshold.
    #[must_use]
    pub const fn selector(&self) -> &MatchSelector {
        &self.selector
    }

    /// Score `candidates` against `target` and return the match, if any.
    #[must_use]
    pub fn check(&self, target: &PetReport, candidates: Vec<PetReport>) -> Option<MatchResult> {
        let scored = self.scorer.score_candidates(target, candidates);
        log::debug!("scored {} candidate(s)", scored.len());
        let result = self.selector.select(target, &scored);
        match &result {
            Some(found) => log::info!(
                "matched report for {:?} with confidence {:.4}",
                found.facebook_id,
                found.confidence
            ),
            None => log::info!("no candidate cleared threshold {}", self.selector.threshold()),
        }
        result
    }
}
