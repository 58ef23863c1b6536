//! Converts NMEA 0183 logs of a GNSS receiver into time-ordered position
//! fixes.
//!
//! The date of a log comes from its first ZDA sentence, positions from GNS
//! sentences. Lines with a bad checksum or unusable content are counted and
//! skipped, never fatal:
//!
//! ```
//! use fixlog::{scan_str, ScanConfig};
//!
//! let log = "$GPZDA,120000.00,15,03,2024,00,00*66\n\
//!            $GNGNS,121530.00,4030.1234,N,01645.5678,E,RR,09,,12.345,,,,*71\n";
//! let mut fixes = scan_str(log, ScanConfig::default()).unwrap();
//! let fix = fixes.next().unwrap().unwrap();
//! assert_eq!(fix.satellite_count, 9);
//! assert_eq!(fixes.tally().rejected(), 0);
//! ```

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
extern crate arrayvec;
extern crate chrono;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;

pub mod angle;
pub mod checksum;
pub mod date;
pub mod err;
#[macro_use]
mod macros;
pub mod parser;
pub mod sentence;
pub mod stream;

pub use checksum::ChecksumOutcome;
pub use date::DateAnchor;
pub use err::{AngleError, LineError, ScanError, SkipReason};
pub use parser::{FixRecord, GnsParser, LongitudeSign, ModeIndicator};
pub use stream::{scan, scan_reader, scan_str, FixStream, ScanConfig, Tally};
