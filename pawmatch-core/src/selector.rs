//! Pick the best scored candidate and shape it into a match.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::report::PetReport;
use crate::scorer::ScoredCandidate;

/// Lowest confidence that still produces a match unless configured otherwise.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.25;

const DEFAULT_CAREGIVER_NAME: &str = "Happy Paws & Claws";
const DEFAULT_CAREGIVER_ADDRESS: &str = "1555 Haste St, Berkeley, CA";

/// Errors returned by [`MatchSelector::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SelectorError {
    /// The threshold was not a finite value in `0.0..=1.0`.
    #[error("match threshold {threshold} must be a finite value between 0.0 and 1.0")]
    InvalidThreshold {
        /// The rejected threshold.
        threshold: f64,
    },
}

/// Organisation shown to users alongside every match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caregiver {
    /// Display name.
    pub name: String,
    /// Postal address.
    pub address: String,
}

impl Caregiver {
    /// Build a caregiver from its display fields.
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

impl Default for Caregiver {
    fn default() -> Self {
        Self::new(DEFAULT_CAREGIVER_NAME, DEFAULT_CAREGIVER_ADDRESS)
    }
}

/// The match reported back to the caller and to the notification service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// User the match should be shown to.
    #[serde(rename = "facebookID")]
    pub facebook_id: Option<String>,
    /// Image of the matched pet.
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
    /// Category of the matched pet.
    #[serde(rename = "petType")]
    pub pet_type: Option<String>,
    /// Confidence of the best candidate.
    pub confidence: f64,
    /// Caregiver display name.
    #[serde(rename = "caregiverName")]
    pub caregiver_name: String,
    /// Caregiver postal address.
    #[serde(rename = "caregiverAddress")]
    pub caregiver_address: String,
}

/// Applies the acceptance threshold and builds [`MatchResult`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSelector {
    threshold: f64,
    caregiver: Caregiver,
}

impl Default for MatchSelector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
            caregiver: Caregiver::default(),
        }
    }
}

impl MatchSelector {
    /// Validate `threshold` and build a selector.
    ///
    /// # Errors
    /// Returns [`SelectorError::InvalidThreshold`] when the threshold is not
    /// finite or lies outside `0.0..=1.0`.
    pub fn new(threshold: f64, caregiver: Caregiver) -> Result<Self, SelectorError> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(SelectorError::InvalidThreshold { threshold });
        }
        Ok(Self {
            threshold,
            caregiver,
        })
    }

    /// The acceptance threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The caregiver attached to every match.
    #[must_use]
    pub const fn caregiver(&self) -> &Caregiver {
        &self.caregiver
    }

    /// Return the highest-confidence candidate, first one winning ties.
    ///
    /// Candidates with a non-finite confidence are ignored.
    #[must_use]
    pub fn best<'a>(&self, scored: &'a [ScoredCandidate]) -> Option<&'a ScoredCandidate> {
        scored
            .iter()
            .filter(|candidate| candidate.confidence.is_finite())
            .fold(None, |best, candidate| match best {
                Some(current) if current.confidence >= candidate.confidence => Some(current),
                _ => Some(candidate),
            })
    }

    /// Select the match to report for `target`, if any clears the threshold.
    ///
    /// When the target was reported by the pet's owner, the match is addressed
    /// to the owner: the identifier comes from `target` while the confidence,
    /// image and pet type come from the best candidate.
    ///
    /// # Examples
    ///
    /// ```
    /// use geo::Coord;
    /// use pawmatch_core::{MatchScorer, MatchSelector, PetReport, Rgb};
    ///
    /// let target = PetReport::new(Coord { x: 0.0, y: 0.0 }, Rgb::new(0, 0, 0));
    /// let far = PetReport::new(Coord { x: 5.0, y: 5.0 }, Rgb::new(255, 255, 255));
    /// let scored = MatchScorer.score_candidates(&target, vec![far]);
    /// assert!(MatchSelector::default().select(&target, &scored).is_none());
    /// ```
    #[must_use]
    pub fn select(&self, target: &PetReport, scored: &[ScoredCandidate]) -> Option<MatchResult> {
        let best = self.best(scored)?;
        if best.confidence < self.threshold {
            log::debug!(
                "best confidence {:.4} is below threshold {:.4}",
                best.confidence,
                self.threshold
            );
            return None;
        }
        let addressee = if target.is_owner() {
            target
        } else {
            &best.report
        };
        Some(MatchResult {
            facebook_id: addressee.user_id.clone(),
            image_url: best.report.image_url.clone(),
            pet_type: best.report.pet_type.clone(),
            confidence: best.confidence,
            caregiver_name: self.caregiver.name.clone(),
            caregiver_address: self.caregiver.address.clone(),
        })
    }
}
