//! Request and response bodies for the match API.

use pawmatch_core::{MatchResult, PetReportPayload};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /match/check`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckMatchRequest {
    /// The report to find a match for.
    pub pet: PetReportPayload,
    /// Candidate reports, kept raw so one bad entry does not sink the batch.
    #[serde(rename = "otherPets", default)]
    pub other_pets: Vec<Value>,
}

/// Body answered by `POST /match/check`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CheckMatchResponse {
    /// The best candidate cleared the threshold.
    Match(MatchResult),
    /// Nothing cleared the threshold; serialises as `{}`.
    NoMatch(EmptyObject),
}

/// Serialises as an empty JSON object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmptyObject {}
