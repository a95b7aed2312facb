//! Core scoring pipeline for Pawmatch.
//!
//! A lost or found pet report is compared against a set of candidate reports.
//! Each candidate receives a confidence built from two signals:
//!
//! - the great-circle distance between the reports ([`distance_miles`]);
//! - the perceptual distance between the reported coat colours
//!   ([`color_delta`]).
//!
//! [`MatchScorer`] combines both into a confidence, [`MatchSelector`] keeps the
//! best candidate that clears the acceptance threshold, and [`MatchEngine`]
//! runs the two in sequence. Reports arrive as [`PetReportPayload`] values and
//! are validated into [`PetReport`]s before scoring.

#![forbid(unsafe_code)]

pub mod color;
pub mod engine;
pub mod geo_distance;
pub mod report;
pub mod scorer;
pub mod selector;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use color::{ColorError, LetterCase, MAX_COLOR_DELTA, Rgb, color_delta, color_delta_hex};
pub use engine::MatchEngine;
pub use geo_distance::{EARTH_RADIUS_METRES, METRES_PER_MILE, distance_miles, haversine_metres};
pub use report::{PetReport, PetReportPayload, ReportError, ReportRole};
pub use scorer::{
    COLOR_WEIGHT, DISTANCE_WEIGHT, MatchScorer, ScoredCandidate, color_factor, confidence,
    distance_factor,
};
pub use selector::{Caregiver, DEFAULT_MATCH_THRESHOLD, MatchResult, MatchSelector, SelectorError};
