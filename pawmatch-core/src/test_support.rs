//! Test-only builders shared by unit, behaviour and downstream crate tests.

use geo::Coord;

use crate::{Caregiver, MatchResult, PetReport, ReportRole, Rgb, ScoredCandidate};

/// Build a report at (`lon`, `lat`) with the given colour.
#[must_use]
pub const fn report_at(lon: f64, lat: f64, color: Rgb) -> PetReport {
    PetReport::new(Coord { x: lon, y: lat }, color)
}

/// Build a samaritan report with identity fields derived from `id`.
#[must_use]
pub fn samaritan_report(id: &str, lon: f64, lat: f64, color: Rgb) -> PetReport {
    report_at(lon, lat, color)
        .with_user_id(id)
        .with_role(ReportRole::Samaritan)
        .with_pet_type("dog")
        .with_image_url(format!("https://images.example.com/{id}.jpg"))
}

/// Wrap a report in a [`ScoredCandidate`] with a fixed confidence.
#[must_use]
pub const fn scored_with_confidence(report: PetReport, confidence: f64) -> ScoredCandidate {
    ScoredCandidate {
        report,
        distance_miles: 0.0,
        color_delta: 0.0,
        confidence,
    }
}

/// A representative match addressed to user `"1245562518853936"`.
#[must_use]
pub fn sample_match_result() -> MatchResult {
    let caregiver = Caregiver::default();
    MatchResult {
        facebook_id: Some("1245562518853936".to_owned()),
        image_url: Some("https://images.example.com/monster.jpg".to_owned()),
        pet_type: Some("dog".to_owned()),
        confidence: 0.88,
        caregiver_name: caregiver.name,
        caregiver_address: caregiver.address,
    }
}
