//! Decoding of `(d)ddmm.mmmm` angles into signed decimal degrees.

use std::str::FromStr;

use err::AngleError;

/// Number of integer digits that belong to the minutes.
const MINUTE_DIGITS: usize = 2;

/// The cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardDir {
    North,
    South,
    East,
    West,
}

impl CardDir {
    /// Map a hemisphere letter, ignoring case. Unknown letters yield `None`.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(CardDir::North),
            'S' => Some(CardDir::South),
            'E' => Some(CardDir::East),
            'W' => Some(CardDir::West),
            _ => None,
        }
    }

    #[inline]
    fn get_sign(&self) -> f64 {
        match self {
            CardDir::North | CardDir::East => 1.0,
            CardDir::South | CardDir::West => -1.0,
        }
    }
}

/// Convert `raw` to decimal degrees.
///
/// The integer part minus its last two digits are the degrees, the rest is
/// minutes, so latitude (`ddmm.mmmm`) and longitude (`dddmm.mmmm`) share the
/// same code path. `S` and `W` (any case) negate the result; every other
/// hemisphere letter, including none at all, leaves it positive. Neither the
/// degrees nor the minutes are range checked.
pub fn decode(raw: &str, hemisphere: char) -> Result<f64, AngleError> {
    // from_str would accept signs and exponents
    if !raw.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return Err(AngleError::InvalidInput("angle contains a non-digit"));
    }
    let dot = raw
        .find('.')
        .ok_or(AngleError::InvalidInput("no decimal point"))?;
    if dot <= MINUTE_DIGITS {
        return Err(AngleError::InvalidInput("no degree digits before the minutes"));
    }

    let (deg, min) = raw.split_at(dot - MINUTE_DIGITS);

    let degrees = f64::from(u16::from_str(deg)?);
    let minutes = f64::from_str(min)?;
    let dec_deg = degrees + minutes / 60.0;

    let sign = CardDir::from_char(hemisphere).map_or(1.0, |d| d.get_sign());
    Ok(dec_deg * sign)
}
