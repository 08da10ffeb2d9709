// SPDX-License-Identifier: MIT
//
// Color strings: where the initial color comes from (`--color`, config).
//
// Accepted forms, case-insensitive, surrounding whitespace ignored:
//
//   #RGB  #RRGGBB  RGB  RRGGBB     hex, with or without the leading '#'
//   rgb(r, g, b)                   decimal 0–255
//   hsv(h, s, v)                   decimal 0–255, converted with hsv_to_rgb

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::math::{Hsv, Rgb, hsv_to_rgb};

/// Why a color string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// Nothing but whitespace.
    Empty,
    /// Looked like hex but was not 3 or 6 hex digits.
    InvalidHex(String),
    /// A functional form whose component does not fit in 0–255.
    OutOfRange { input: String, component: String },
    /// Matched none of the accepted forms.
    Unrecognized(String),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty color string"),
            Self::InvalidHex(s) => write!(f, "invalid hex color '{s}'"),
            Self::OutOfRange { input, component } => {
                write!(f, "component {component} out of range 0-255 in '{input}'")
            }
            Self::Unrecognized(s) => write!(f, "unrecognized color '{s}'"),
        }
    }
}

impl std::error::Error for ParseColorError {}

static FUNCTIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(rgb|hsv)\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)$").expect("valid regex")
});

static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9a-f]{3}|[0-9a-f]{6})$").expect("valid regex"));

fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        _ => 0,
    }
}

fn parse_hex(digits: &str) -> Rgb {
    let d: Vec<u8> = digits.bytes().map(hex_digit).collect();
    match d.as_slice() {
        [r, g, b] => Rgb::new(r * 17, g * 17, b * 17),
        [r1, r0, g1, g0, b1, b0] => Rgb::new(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0),
        _ => Rgb::BLACK,
    }
}

/// Parse a color string into RGB.
///
/// # Errors
///
/// Returns [`ParseColorError`] when the string matches none of the accepted
/// forms or a component is out of range.
pub fn parse(input: &str) -> Result<Rgb, ParseColorError> {
    let normalized = input.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(ParseColorError::Empty);
    }

    if let Some(caps) = HEX_RE.captures(&normalized) {
        return Ok(parse_hex(&caps[1]));
    }

    if let Some(caps) = FUNCTIONAL_RE.captures(&normalized) {
        let mut parts = [0u8; 3];
        for (slot, m) in parts.iter_mut().zip([&caps[2], &caps[3], &caps[4]]) {
            *slot = m.parse::<u8>().map_err(|_| ParseColorError::OutOfRange {
                input: input.trim().to_string(),
                component: m.to_string(),
            })?;
        }
        let [a, b, c] = parts;
        return Ok(if &caps[1] == "hsv" {
            hsv_to_rgb(Hsv::new(a, b, c))
        } else {
            Rgb::new(a, b, c)
        });
    }

    if normalized.starts_with('#') {
        return Err(ParseColorError::InvalidHex(input.trim().to_string()));
    }
    Err(ParseColorError::Unrecognized(input.trim().to_string()))
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
