//! Parse hex colour triplets and measure how far apart two colours look.
//!
//! Colours travel over the wire as `#RRGGBB` strings. [`Rgb`] decodes them
//! into channels and [`color_delta`] applies a red-mean weighted Euclidean
//! distance.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use thiserror::Error;

/// Largest value [`color_delta`] can return, reached for black against white.
///
/// Downstream normalisation divides by this constant, so it must match the
/// formula exactly.
pub const MAX_COLOR_DELTA: f64 = 764.833_966_357_241_5;

const HEX_MARKER: char = '#';
const HEX_DIGITS: usize = 6;

/// Errors returned when decoding a colour string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The value was not a `#RRGGBB` hex triplet.
    #[error("invalid colour {value:?}: expected `#RRGGBB` hex triplet")]
    InvalidColorFormat {
        /// The rejected input.
        value: String,
    },
}

/// Letter case used when rendering an [`Rgb`] back into a hex triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LetterCase {
    /// Render `#a0b1c2`.
    #[default]
    Lower,
    /// Render `#A0B1C2`.
    Upper,
}

/// An opaque 24-bit colour.
///
/// # Examples
///
/// ```
/// use pawmatch_core::{LetterCase, Rgb};
///
/// let colour: Rgb = "#FF8000".parse()?;
/// assert_eq!(colour, Rgb::new(255, 128, 0));
/// assert_eq!(colour.triplet(LetterCase::Lower), "#ff8000");
/// # Ok::<(), pawmatch_core::ColorError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Rgb {
    /// Build a colour from its channels.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Render the colour as a `#rrggbb` triplet in the requested case.
    #[must_use]
    pub fn triplet(self, case: LetterCase) -> String {
        let Self { red, green, blue } = self;
        match case {
            LetterCase::Lower => format!("{HEX_MARKER}{red:02x}{green:02x}{blue:02x}"),
            LetterCase::Upper => format!("{HEX_MARKER}{red:02X}{green:02X}{blue:02X}"),
        }
    }

    fn channels(self) -> (f64, f64, f64) {
        (
            f64::from(self.red),
            f64::from(self.green),
            f64::from(self.blue),
        )
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorError::InvalidColorFormat {
            value: value.to_owned(),
        };
        let digits = value.strip_prefix(HEX_MARKER).ok_or_else(invalid)?;
        // `from_str_radix` tolerates a leading sign, so check the digits first.
        if digits.len() != HEX_DIGITS || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: Range<usize>| {
            digits
                .get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(invalid)
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.triplet(LetterCase::Lower))
    }
}

/// Red-mean weighted distance between two colours.
///
/// The result lies in `0.0..=MAX_COLOR_DELTA` and is zero only for identical
/// colours.
///
/// # Examples
///
/// ```
/// use pawmatch_core::{MAX_COLOR_DELTA, Rgb, color_delta};
///
/// let black = Rgb::new(0, 0, 0);
/// let white = Rgb::new(255, 255, 255);
/// assert!((color_delta(black, white) - MAX_COLOR_DELTA).abs() < 1e-9);
/// assert_eq!(color_delta(black, black), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "colour distance is a floating-point formula"
)]
pub fn color_delta(first: Rgb, second: Rgb) -> f64 {
    let (r1, g1, b1) = first.channels();
    let (r2, g2, b2) = second.channels();
    let mean_red = (r1 + r2) / 2.0;
    let delta_red = r1 - r2;
    let delta_green = g1 - g2;
    let delta_blue = b1 - b2;
    let red_weight = 2.0 + mean_red / 256.0;
    let blue_weight = 2.0 + (255.0 - mean_red) / 256.0;
    (red_weight * delta_red * delta_red
        + 4.0 * delta_green * delta_green
        + blue_weight * delta_blue * delta_blue)
        .sqrt()
}

/// Parse two hex triplets and return their [`color_delta`].
///
/// # Errors
/// Returns [`ColorError::InvalidColorFormat`] when either value is not a
/// `#RRGGBB` triplet.
pub fn color_delta_hex(first: &str, second: &str) -> Result<f64, ColorError> {
    Ok(color_delta(first.parse()?, second.parse()?))
}
