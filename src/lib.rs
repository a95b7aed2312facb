//! Facade crate for the Pawmatch lost-and-found matching engine.
//!
//! This crate re-exports the scoring pipeline and, behind the `notify-http`
//! feature, the notifiers that deliver matches.

#![forbid(unsafe_code)]

pub use pawmatch_core::{
    Caregiver, ColorError, DEFAULT_MATCH_THRESHOLD, MatchEngine, MatchResult, MatchScorer,
    MatchSelector, PetReport, PetReportPayload, ReportError, ReportRole, Rgb, ScoredCandidate,
    SelectorError, color_delta, confidence, distance_miles,
};

#[cfg(feature = "notify-http")]
pub use pawmatch_notify::{
    HttpMatchNotifier, HttpMatchNotifierConfig, MatchNotifier, NotifierBuildError, NotifyError,
    NotifyReceipt, dispatch,
};

#[cfg(feature = "test-support")]
pub use pawmatch_notify::test_support::RecordingNotifier;
