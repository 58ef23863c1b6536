//! This module provides a parser for the *GNS* sentence of the *NMEA 0183*
//! protocol, turning it into a timestamped [FixRecord](struct.FixRecord.html).

use chrono::{DateTime, NaiveTime, TimeZone, Timelike, Utc};
use std::fmt;
use std::str::FromStr;

use angle;
use date::DateAnchor;
use err::SkipReason;
use sentence::{self, Sentence, SentenceType};

const UTC_FIELD: usize = 1;
const LAT_FIELD: usize = 2;
const LAT_DIR_FIELD: usize = 3;
const LONG_FIELD: usize = 4;
const LONG_DIR_FIELD: usize = 5;
const MODE_FIELD: usize = 6;
const SATS_FIELD: usize = 7;
const ELEVATION_FIELD: usize = 9;

/// Per constellation mode characters of the GNS mode field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeIndicator {
    NoFix,
    Autonomous,
    Differential,
    Precise,
    RealTimeKinematic,
    FloatRtk,
    Estimated,
    ManualInput,
    Simulator,
}

impl ModeIndicator {
    /// Takes one character of the mode field and returns the corresponding
    /// `ModeIndicator`, or `None` for characters not defined by NMEA.
    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(ModeIndicator::NoFix),
            'A' => Some(ModeIndicator::Autonomous),
            'D' => Some(ModeIndicator::Differential),
            'P' => Some(ModeIndicator::Precise),
            'R' => Some(ModeIndicator::RealTimeKinematic),
            'F' => Some(ModeIndicator::FloatRtk),
            'E' => Some(ModeIndicator::Estimated),
            'M' => Some(ModeIndicator::ManualInput),
            'S' => Some(ModeIndicator::Simulator),
            _ => None,
        }
    }
}

/// Which field decides whether the longitude is west.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LongitudeSign {
    /// The longitude is negated only if the *latitude* hemisphere field
    /// reads `W`. Receivers never send that, so longitudes come out
    /// positive. This is how existing logs of this tool were converted.
    LatitudeField,
    /// The longitude hemisphere field (`E`/`W`) decides.
    LongitudeField,
}

impl Default for LongitudeSign {
    fn default() -> Self {
        LongitudeSign::LatitudeField
    }
}

/// A position fix decoded from one GNS sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct FixRecord {
    /// Date of the log's ZDA anchor plus the sentence's time of day,
    /// truncated to whole seconds.
    pub timestamp: DateTime<Utc>,
    /// Latitude in decimal degrees, positive north.
    pub latitude: f64,
    /// Longitude in decimal degrees, see [LongitudeSign](enum.LongitudeSign.html).
    pub longitude: f64,
    /// Antenna altitude (meters)
    pub elevation: f64,
    /// Number of satellites in use.
    pub satellite_count: u32,
    /// Raw mode field, one character per constellation (e.g. `RR`).
    pub solution_mode: String,
}

impl FixRecord {
    /// The decoded characters of the mode field. Unknown characters are
    /// left out.
    pub fn modes<'a>(&'a self) -> impl Iterator<Item = ModeIndicator> + 'a {
        self.solution_mode.chars().filter_map(ModeIndicator::from_char)
    }

    /// Whether any constellation reports an RTK fixed solution.
    pub fn is_rtk_fixed(&self) -> bool {
        self.modes().any(|m| m == ModeIndicator::RealTimeKinematic)
    }
}

impl fmt::Display for FixRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {:.8} {:.8} {:.3} {} {:<4}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.latitude,
            self.longitude,
            self.elevation,
            self.satellite_count,
            self.solution_mode
        )
    }
}

/// Parser for GNS sentences of one log. All fixes get the date of `anchor`.
#[derive(Debug, Clone)]
pub struct GnsParser {
    anchor: DateAnchor,
    longitude_sign: LongitudeSign,
}

impl GnsParser {
    pub fn new(anchor: DateAnchor, longitude_sign: LongitudeSign) -> Self {
        GnsParser {
            anchor,
            longitude_sign,
        }
    }

    #[inline]
    pub fn anchor(&self) -> &DateAnchor {
        &self.anchor
    }

    /// Parse a line whose checksum has already been verified.
    ///
    /// Anything but a GNS sentence is `SkipReason::Irrelevant`; a GNS
    /// sentence without a latitude is `SkipReason::EmptyPosition`.
    pub fn parse(&self, line: &str) -> Result<FixRecord, SkipReason> {
        if sentence::sentence_type(line) != SentenceType::Gns {
            return Err(SkipReason::Irrelevant);
        }
        let gns = Sentence::split(line)?;

        let lat = required(&gns, LAT_FIELD, "latitude")?;
        if lat.is_empty() {
            return Err(SkipReason::EmptyPosition);
        }
        let lat_dir = required(&gns, LAT_DIR_FIELD, "latitude hemisphere")?;
        let lat_sign = if is_hemisphere(lat_dir, "S") { 'S' } else { 'N' };
        let latitude = angle::decode(lat, lat_sign)?;

        let long = required(&gns, LONG_FIELD, "longitude")?;
        let long_dir = match self.longitude_sign {
            LongitudeSign::LatitudeField => lat_dir,
            LongitudeSign::LongitudeField => {
                required(&gns, LONG_DIR_FIELD, "longitude hemisphere")?
            }
        };
        let long_sign = if is_hemisphere(long_dir, "W") { 'W' } else { 'E' };
        let longitude = angle::decode(long, long_sign)?;

        let solution_mode = required(&gns, MODE_FIELD, "mode")?.to_owned();

        let satellite_count = u32::from_str(required(&gns, SATS_FIELD, "satellites")?)
            .map_err(|_| SkipReason::MalformedFields("satellites"))?;

        let elevation = f64::from_str(required(&gns, ELEVATION_FIELD, "elevation")?)
            .ok()
            .filter(|e| e.is_finite())
            .ok_or(SkipReason::MalformedFields("elevation"))?;

        let utc = parse_utc(required(&gns, UTC_FIELD, "utc")?)?;
        let timestamp = Utc.from_utc_datetime(&self.anchor.at(utc));

        Ok(FixRecord {
            timestamp,
            latitude,
            longitude,
            elevation,
            satellite_count,
            solution_mode,
        })
    }
}

#[inline]
fn required<'a>(
    gns: &Sentence<'a>,
    idx: usize,
    name: &'static str,
) -> Result<&'a str, SkipReason> {
    gns.field(idx).ok_or(SkipReason::MalformedFields(name))
}

/// Whether the whole hemisphere field reads `dir`, ignoring case.
#[inline]
fn is_hemisphere(field: &str, dir: &str) -> bool {
    field.trim().eq_ignore_ascii_case(dir)
}

/// Converts `hhmmss[.sss]` to a time of day, dropping fractional seconds.
#[inline]
fn parse_utc(utc: &str) -> Result<NaiveTime, SkipReason> {
    NaiveTime::parse_from_str(utc, "%H%M%S%.f")
        .ok()
        .and_then(|t| t.with_nanosecond(0))
        .ok_or(SkipReason::MalformedFields("utc"))
}
