//! Combine distance and colour similarity into a match confidence.
//!
//! The confidence is a weighted sum of two factors:
//!
//! - a steep sigmoid over the distance in miles, worth just under `1.0` when
//!   the reports coincide and close to zero beyond a handful of miles;
//! - a linear fall-off over the colour delta, normalised by
//!   [`MAX_COLOR_DELTA`].
//!
//! Distance carries three quarters of the weight, so colour mostly separates
//! candidates that were reported close together.

use crate::color::{MAX_COLOR_DELTA, color_delta};
use crate::geo_distance::distance_miles;
use crate::report::PetReport;

/// Weight of the distance factor in the final confidence.
pub const DISTANCE_WEIGHT: f64 = 0.75;

/// Weight of the colour factor in the final confidence.
pub const COLOR_WEIGHT: f64 = 0.25;

const SIGMOID_SCALE: f64 = 100.0;
const SIGMOID_RATE: f64 = 0.5;

/// Distance component of the confidence, in `(0, 1)`.
///
/// `g1(x) = 1 - 1 / (1 + 100·e^(-x/2))`
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "sigmoid evaluation is floating-point maths"
)]
pub fn distance_factor(miles: f64) -> f64 {
    1.0 - 1.0 / (1.0 + SIGMOID_SCALE * (-SIGMOID_RATE * miles).exp())
}

/// Colour component of the confidence, in `[0, 1]` for valid deltas.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "normalising the delta divides by the maximum"
)]
pub fn color_factor(delta: f64) -> f64 {
    1.0 - delta / MAX_COLOR_DELTA
}

/// Weighted confidence for a candidate at `miles` with colour `delta`.
///
/// # Examples
///
/// ```
/// use pawmatch_core::confidence;
///
/// let near = confidence(0.0, 0.0);
/// let far = confidence(10.0, 0.0);
/// assert!(near > 0.99);
/// assert!(far < near);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "confidence is a weighted sum of float factors"
)]
pub fn confidence(miles: f64, delta: f64) -> f64 {
    DISTANCE_WEIGHT * distance_factor(miles) + COLOR_WEIGHT * color_factor(delta)
}

/// A candidate report together with the measurements that ranked it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// The candidate as submitted.
    pub report: PetReport,
    /// Distance to the target report, in miles.
    pub distance_miles: f64,
    /// Colour delta against the target report.
    pub color_delta: f64,
    /// Combined confidence that both reports describe the same pet.
    pub confidence: f64,
}

/// Scores candidates against a target report.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use pawmatch_core::{MatchScorer, PetReport, Rgb};
///
/// let target = PetReport::new(Coord { x: 0.0, y: 0.0 }, Rgb::new(0, 0, 0));
/// let candidate = PetReport::new(Coord { x: 0.0001, y: 0.0001 }, Rgb::new(1, 1, 1));
/// let scored = MatchScorer.score(&target, candidate);
/// assert!(scored.confidence > 0.99);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchScorer;

impl MatchScorer {
    /// Measure `candidate` against `target`.
    #[must_use]
    pub fn score(&self, target: &PetReport, candidate: PetReport) -> ScoredCandidate {
        let miles = distance_miles(target.location, candidate.location);
        let delta = color_delta(target.color, candidate.color);
        ScoredCandidate {
            report: candidate,
            distance_miles: miles,
            color_delta: delta,
            confidence: confidence(miles, delta),
        }
    }

    /// Score every candidate, preserving input order.
    pub fn score_candidates<I>(&self, target: &PetReport, candidates: I) -> Vec<ScoredCandidate>
    where
        I: IntoIterator<Item = PetReport>,
    {
        candidates
            .into_iter()
            .map(|candidate| self.score(target, candidate))
            .collect()
    }
}
