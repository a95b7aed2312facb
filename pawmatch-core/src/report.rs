//! Lost and found pet reports.
//!
//! [`PetReportPayload`] mirrors the JSON shape submitted by clients and keeps
//! every field optional so that validation can name the missing field.
//! [`PetReport`] is the validated form consumed by the scorer.

use geo::Coord;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::color::{ColorError, Rgb};

const FIELD_COLOR: &str = "color";
const FIELD_LATITUDE: &str = "reportLat";
const FIELD_LONGITUDE: &str = "reportLon";

/// Which side of a lost/found pair submitted a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportRole {
    /// The pet's owner reported it lost.
    Owner,
    /// Someone else reported finding the pet.
    Samaritan,
}

impl ReportRole {
    /// Wire tag used by clients for this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Samaritan => "samaritan",
        }
    }

    /// Decode a wire tag. Tags are case-sensitive; anything else is `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "owner" => Some(Self::Owner),
            "samaritan" => Some(Self::Samaritan),
            _ => None,
        }
    }
}

/// Errors raised while validating a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A field required for scoring was absent.
    #[error("report is missing required field `{field}`")]
    MissingField {
        /// Wire name of the missing field.
        field: &'static str,
    },
    /// The colour could not be decoded.
    #[error(transparent)]
    InvalidColor(#[from] ColorError),
    /// A coordinate was not a finite number.
    #[error("{field} {value} is not a finite coordinate")]
    InvalidCoordinate {
        /// Wire name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The JSON value did not have the shape of a report.
    #[error("malformed report: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A report exactly as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetReportPayload {
    /// Identifier of the reporting user; strings and numbers are accepted.
    #[serde(
        rename = "userID",
        default,
        deserialize_with = "deserialize_identifier"
    )]
    pub user_id: Option<String>,
    /// Older clients send the identifier under this name instead.
    #[serde(
        rename = "facebookID",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_identifier"
    )]
    pub facebook_id: Option<String>,
    /// Pet category such as `dog` or `cat`.
    #[serde(rename = "petType", default)]
    pub pet_type: Option<String>,
    /// Hex colour triplet.
    #[serde(default)]
    pub color: Option<String>,
    /// Latitude in degrees.
    #[serde(rename = "reportLat", default)]
    pub report_lat: Option<f64>,
    /// Longitude in degrees.
    #[serde(rename = "reportLon", default)]
    pub report_lon: Option<f64>,
    /// `owner` or `samaritan`; other tags are kept but carry no role.
    #[serde(rename = "reportType", default)]
    pub report_type: Option<String>,
    /// Image of the pet.
    #[serde(default)]
    pub url: Option<String>,
}

/// A validated report ready for scoring.
///
/// # Examples
///
/// ```
/// use pawmatch_core::{PetReport, PetReportPayload, ReportRole};
///
/// let payload = PetReportPayload {
///     color: Some("#a0522d".into()),
///     report_lat: Some(37.87),
///     report_lon: Some(-122.27),
///     report_type: Some("owner".into()),
///     ..PetReportPayload::default()
/// };
/// let report = PetReport::try_from(payload)?;
/// assert_eq!(report.role, Some(ReportRole::Owner));
/// assert_eq!(report.location.y, 37.87);
/// # Ok::<(), pawmatch_core::ReportError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PetReport {
    /// Identifier of the reporting user.
    pub user_id: Option<String>,
    /// Role of the reporter, when supplied.
    pub role: Option<ReportRole>,
    /// Where the pet was lost or found (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
    /// Dominant coat colour.
    pub color: Rgb,
    /// Pet category.
    pub pet_type: Option<String>,
    /// Image of the pet.
    pub image_url: Option<String>,
}

impl PetReport {
    /// Build a report from the fields the scorer needs.
    #[must_use]
    pub const fn new(location: Coord<f64>, color: Rgb) -> Self {
        Self {
            user_id: None,
            role: None,
            location,
            color,
            pet_type: None,
            image_url: None,
        }
    }

    /// Attach the reporting user's identifier.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Attach the reporter's role.
    #[must_use]
    pub fn with_role(mut self, role: ReportRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Attach the pet category.
    #[must_use]
    pub fn with_pet_type(mut self, pet_type: impl Into<String>) -> Self {
        self.pet_type = Some(pet_type.into());
        self
    }

    /// Attach the pet image URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Report whether the reporter is the pet's owner.
    #[must_use]
    pub fn is_owner(&self) -> bool {
        self.role == Some(ReportRole::Owner)
    }

    /// Decode and validate a report from an arbitrary JSON value.
    ///
    /// # Errors
    /// Returns [`ReportError::Malformed`] when the value is not an object of
    /// the expected shape, or any validation error from
    /// [`PetReport::try_from`].
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ReportError> {
        let payload: PetReportPayload = serde_json::from_value(value)?;
        Self::try_from(payload)
    }
}

impl TryFrom<PetReportPayload> for PetReport {
    type Error = ReportError;

    fn try_from(payload: PetReportPayload) -> Result<Self, Self::Error> {
        let color = payload
            .color
            .ok_or(ReportError::MissingField { field: FIELD_COLOR })?
            .parse::<Rgb>()?;
        let latitude = require_coordinate(payload.report_lat, FIELD_LATITUDE)?;
        let longitude = require_coordinate(payload.report_lon, FIELD_LONGITUDE)?;
        let role = payload.report_type.as_deref().and_then(|tag| {
            let parsed = ReportRole::from_tag(tag);
            if parsed.is_none() {
                log::debug!("treating unrecognised report type {tag:?} as no role");
            }
            parsed
        });
        Ok(Self {
            user_id: payload.user_id.or(payload.facebook_id),
            role,
            location: Coord {
                x: longitude,
                y: latitude,
            },
            color,
            pet_type: payload.pet_type,
            image_url: payload.url,
        })
    }
}

impl From<&PetReport> for PetReportPayload {
    fn from(report: &PetReport) -> Self {
        Self {
            user_id: report.user_id.clone(),
            facebook_id: None,
            pet_type: report.pet_type.clone(),
            color: Some(report.color.to_string()),
            report_lat: Some(report.location.y),
            report_lon: Some(report.location.x),
            report_type: report.role.map(|role| role.as_str().to_owned()),
            url: report.image_url.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Identifier {
    Text(String),
    Number(serde_json::Number),
}

fn deserialize_identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let identifier = Option::<Identifier>::deserialize(deserializer)?;
    Ok(identifier.map(|id| match id {
        Identifier::Text(text) => text,
        Identifier::Number(number) => number.to_string(),
    }))
}

// Out-of-range degrees still produce a distance, so only non-finite values fail.
fn require_coordinate(value: Option<f64>, field: &'static str) -> Result<f64, ReportError> {
    let coordinate = value.ok_or(ReportError::MissingField { field })?;
    if coordinate.is_finite() {
        Ok(coordinate)
    } else {
        Err(ReportError::InvalidCoordinate {
            field,
            value: coordinate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn sample_payload() -> PetReportPayload {
        PetReportPayload {
            user_id: Some("1245562518853936".into()),
            facebook_id: None,
            pet_type: Some("dog".into()),
            color: Some("#A0522D".into()),
            report_lat: Some(37.8716),
            report_lon: Some(-122.2727),
            report_type: Some("samaritan".into()),
            url: Some("https://example.com/dog.jpg".into()),
        }
    }

    #[fixture]
    fn payload() -> PetReportPayload {
        sample_payload()
    }

    #[rstest]
    fn converts_complete_payload(payload: PetReportPayload) {
        let report = PetReport::try_from(payload).expect("valid payload");
        assert_eq!(report.user_id.as_deref(), Some("1245562518853936"));
        assert_eq!(report.role, Some(ReportRole::Samaritan));
        assert_eq!(report.color, Rgb::new(160, 82, 45));
        assert_eq!(report.location, Coord { x: -122.2727, y: 37.8716 });
        assert_eq!(report.pet_type.as_deref(), Some("dog"));
        assert_eq!(report.image_url.as_deref(), Some("https://example.com/dog.jpg"));
        assert!(!report.is_owner());
    }

    #[rstest]
    #[case::color(PetReportPayload { color: None, ..sample_payload() }, FIELD_COLOR)]
    #[case::latitude(PetReportPayload { report_lat: None, ..sample_payload() }, FIELD_LATITUDE)]
    #[case::longitude(PetReportPayload { report_lon: None, ..sample_payload() }, FIELD_LONGITUDE)]
    fn reports_missing_scoring_fields(#[case] input: PetReportPayload, #[case] expected: &str) {
        let err = PetReport::try_from(input).expect_err("missing field");
        match err {
            ReportError::MissingField { field } => assert_eq!(field, expected),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[rstest]
    fn optional_fields_may_be_absent() {
        let input = PetReportPayload {
            color: Some("#000000".into()),
            report_lat: Some(0.0),
            report_lon: Some(0.0),
            ..PetReportPayload::default()
        };
        let report = PetReport::try_from(input).expect("scoring fields present");
        assert_eq!(report, PetReport::new(Coord { x: 0.0, y: 0.0 }, Rgb::new(0, 0, 0)));
    }

    #[rstest]
    fn rejects_bad_colour(payload: PetReportPayload) {
        let input = PetReportPayload {
            color: Some("brown".into()),
            ..payload
        };
        let err = PetReport::try_from(input).expect_err("bad colour");
        assert!(matches!(err, ReportError::InvalidColor(_)), "got {err:?}");
    }

    #[rstest]
    #[case(Some(f64::NAN), Some(0.0))]
    #[case(Some(0.0), Some(f64::INFINITY))]
    #[case(Some(f64::NEG_INFINITY), Some(0.0))]
    fn rejects_non_finite_coordinates(
        payload: PetReportPayload,
        #[case] lat: Option<f64>,
        #[case] lon: Option<f64>,
    ) {
        let input = PetReportPayload {
            report_lat: lat,
            report_lon: lon,
            ..payload
        };
        let err = PetReport::try_from(input).expect_err("bad coordinate");
        assert!(
            matches!(err, ReportError::InvalidCoordinate { .. }),
            "got {err:?}"
        );
    }

    #[rstest]
    #[case(91.0, 0.0)]
    #[case(-90.5, 0.0)]
    #[case(0.0, 180.5)]
    #[case(0.0, -400.0)]
    fn accepts_out_of_range_degrees(
        payload: PetReportPayload,
        #[case] lat: f64,
        #[case] lon: f64,
    ) {
        let input = PetReportPayload {
            report_lat: Some(lat),
            report_lon: Some(lon),
            ..payload
        };
        let report = PetReport::try_from(input).expect("finite coordinates are scored");
        assert_eq!(report.location, Coord { x: lon, y: lat });
    }

    #[rstest]
    #[case::capitalised("Owner")]
    #[case::unlisted("found")]
    #[case::empty("")]
    fn unrecognised_roles_are_not_owners(payload: PetReportPayload, #[case] tag: &str) {
        let input = PetReportPayload {
            report_type: Some(tag.to_owned()),
            ..payload
        };
        let report = PetReport::try_from(input).expect("role does not gate scoring");
        assert_eq!(report.role, None);
        assert!(!report.is_owner());
    }

    #[rstest]
    fn numeric_identifiers_are_kept_as_text() {
        let value = json!({
            "userID": 1_245_562_518_853_936_u64,
            "color": "#000000",
            "reportLat": 0.0,
            "reportLon": 0.0
        });
        let report = PetReport::from_json_value(value).expect("numeric id accepted");
        assert_eq!(report.user_id.as_deref(), Some("1245562518853936"));
    }

    #[rstest]
    fn user_id_wins_over_facebook_id() {
        let value = json!({
            "userID": "primary",
            "facebookID": "legacy",
            "color": "#000000",
            "reportLat": 0.0,
            "reportLon": 0.0
        });
        let report = PetReport::from_json_value(value).expect("both ids accepted");
        assert_eq!(report.user_id.as_deref(), Some("primary"));
    }

    #[rstest]
    fn decodes_wire_names_and_facebook_alias() {
        let value = json!({
            "facebookID": "42",
            "petType": "cat",
            "color": "#ffffff",
            "reportLat": 1.5,
            "reportLon": -2.5,
            "reportType": "owner",
            "url": "https://example.com/cat.jpg",
            "confidence": 0.4
        });
        let report = PetReport::from_json_value(value).expect("valid report");
        assert_eq!(report.user_id.as_deref(), Some("42"));
        assert!(report.is_owner());
        assert_eq!(report.location, Coord { x: -2.5, y: 1.5 });
    }

    #[rstest]
    fn rejects_values_of_the_wrong_shape() {
        let err = PetReport::from_json_value(json!({ "reportLat": "north" }))
            .expect_err("wrong type");
        assert!(matches!(err, ReportError::Malformed(_)), "got {err:?}");

        let err = PetReport::from_json_value(json!([1, 2, 3])).expect_err("not an object");
        assert!(matches!(err, ReportError::Malformed(_)), "got {err:?}");
    }

    #[rstest]
    fn payload_round_trips_through_report(payload: PetReportPayload) {
        let report = PetReport::try_from(payload.clone()).expect("valid payload");
        let back = PetReportPayload::from(&report);
        assert_eq!(back.color.as_deref(), Some("#a0522d"));
        assert_eq!(
            PetReportPayload {
                color: payload.color.clone().map(|c| c.to_lowercase()),
                ..payload
            },
            back
        );
    }
}
