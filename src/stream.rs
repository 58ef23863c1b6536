//! Single pass over a log: find the date anchor, then turn every valid GNS
//! sentence into a [FixRecord](../parser/struct.FixRecord.html).

use std::io::{self, BufRead};
use std::{fmt, iter, str};

use checksum;
use date::DateAnchor;
use err::{ScanError, SkipReason};
use parser::{FixRecord, GnsParser, LongitudeSign};

/// Options of a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScanConfig {
    pub longitude_sign: LongitudeSign,
}

/// Counts of what happened to the lines of a log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Lines that produced a fix.
    pub accepted: u64,
    /// Lines read before the date anchor, the anchor included.
    pub preamble: u64,
    pub malformed_line: u64,
    pub checksum_mismatch: u64,
    pub invalid_angle: u64,
    pub empty_position: u64,
    pub malformed_fields: u64,
    /// Blank lines and sentences other than GNS.
    pub irrelevant: u64,
}

impl Tally {
    fn record(&mut self, reason: &SkipReason) {
        let counter = match *reason {
            SkipReason::MalformedLine(_) => &mut self.malformed_line,
            SkipReason::ChecksumMismatch(..) => &mut self.checksum_mismatch,
            SkipReason::InvalidAngle(_) => &mut self.invalid_angle,
            SkipReason::EmptyPosition => &mut self.empty_position,
            SkipReason::MalformedFields(_) => &mut self.malformed_fields,
            SkipReason::Irrelevant => &mut self.irrelevant,
        };
        *counter += 1;
    }

    /// Lines after the anchor that were dropped for any reason but being
    /// irrelevant.
    pub fn rejected(&self) -> u64 {
        self.malformed_line
            + self.checksum_mismatch
            + self.invalid_angle
            + self.empty_position
            + self.malformed_fields
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} fixes, {} rejected (checksum: {}, malformed line: {}, angle: {}, no position: {}, fields: {}), {} irrelevant",
            self.accepted,
            self.rejected(),
            self.checksum_mismatch,
            self.malformed_line,
            self.invalid_angle,
            self.empty_position,
            self.malformed_fields,
            self.irrelevant
        )
    }
}

/// Lines of an in-memory log.
pub type StrLines<'a> = iter::Map<str::Lines<'a>, fn(&'a str) -> io::Result<&'a str>>;

/// Lazy sequence of the fixes of one log, in line order.
///
/// Items are only ever `Err` if reading a line fails; everything wrong with
/// the content of a line is counted in [tally](#method.tally) and skipped.
#[derive(Debug)]
pub struct FixStream<I> {
    lines: I,
    parser: GnsParser,
    config: ScanConfig,
    tally: Tally,
    finished: bool,
}

/// Consume `lines` up to and including the first ZDA sentence with a valid
/// date and return a stream over the fixes of the remaining lines.
///
/// Fails with `ScanError::MissingDateAnchor` if there is no such sentence.
pub fn scan<I, S>(lines: I, config: ScanConfig) -> Result<FixStream<I::IntoIter>, ScanError>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    let mut lines = lines.into_iter();
    let mut tally = Tally::default();

    let anchor = loop {
        let line = match lines.next() {
            Some(line) => line?,
            None => return Err(ScanError::MissingDateAnchor),
        };
        tally.preamble += 1;
        if let Some(anchor) = DateAnchor::try_extract(line.as_ref().trim()) {
            break anchor;
        }
    };
    debug!("Anchored log at {} after {} lines", anchor.date(), tally.preamble);

    Ok(FixStream {
        lines,
        parser: GnsParser::new(anchor, config.longitude_sign),
        config,
        tally,
        finished: false,
    })
}

/// Scan a log from a reader, e.g. a file or stdin.
pub fn scan_reader<R: BufRead>(
    reader: R,
    config: ScanConfig,
) -> Result<FixStream<io::Lines<R>>, ScanError> {
    scan(reader.lines(), config)
}

/// Scan a log held in memory.
pub fn scan_str<'a>(text: &'a str, config: ScanConfig) -> Result<FixStream<StrLines<'a>>, ScanError> {
    scan(text.lines().map(Ok as fn(&'a str) -> io::Result<&'a str>), config)
}

impl<I> FixStream<I> {
    #[inline]
    pub fn anchor(&self) -> &DateAnchor {
        self.parser.anchor()
    }

    #[inline]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Counts so far. Final once the stream returned `None`.
    #[inline]
    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    fn process(&self, line: &str) -> Result<FixRecord, SkipReason> {
        if line.is_empty() {
            return Err(SkipReason::Irrelevant);
        }
        let cs = checksum::verify(line)?;
        if !cs.valid {
            return Err(SkipReason::ChecksumMismatch(cs.computed, cs.expected));
        }
        self.parser.parse(line)
    }
}

impl<I, S> Iterator for FixStream<I>
where
    I: Iterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    type Item = Result<FixRecord, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let line = match try_some!(self.lines.next().transpose()) {
                Some(line) => line,
                None => {
                    self.finished = true;
                    info!("{}", self.tally);
                    return None;
                }
            };
            let line = line.as_ref().trim();

            match self.process(line) {
                Ok(fix) => {
                    self.tally.accepted += 1;
                    return Some(Ok(fix));
                }
                Err(reason) => {
                    match reason {
                        SkipReason::ChecksumMismatch(..) => warn!("{}: {}", reason, line),
                        SkipReason::Irrelevant => trace!("Skipping: {}", line),
                        _ => debug!("{}: {}", reason, line),
                    }
                    self.tally.record(&reason);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    const ZDA: &str = "$GPZDA,120000.00,15,03,2024,00,00*66";
    const GNS: &str = "$GNGNS,121530.00,4030.1234,N,01645.5678,E,RR,09,,12.345,,,,*71";

    fn collect(text: &str) -> (Vec<FixRecord>, Tally) {
        let mut stream = scan_str(text, ScanConfig::default()).unwrap();
        let fixes = stream.by_ref().collect::<Result<Vec<_>, _>>().unwrap();
        (fixes, *stream.tally())
    }

    #[test]
    fn single_fix() {
        let (fixes, tally) = collect(&format!("{}\n{}\n", ZDA, GNS));
        assert_eq!(fixes.len(), 1);

        let fix = &fixes[0];
        let ts = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(12, 15, 30)
            .unwrap();
        assert_eq!(fix.timestamp, Utc.from_utc_datetime(&ts));
        assert!((fix.latitude - 40.502_057).abs() < 1e-6);
        assert!((fix.longitude - 16.759_463).abs() < 1e-6);
        assert_eq!(fix.elevation, 12.345);
        assert_eq!(fix.satellite_count, 9);
        assert_eq!(fix.solution_mode, "RR");

        assert_eq!(tally.accepted, 1);
        assert_eq!(tally.rejected(), 0);
        assert_eq!(tally.preamble, 1);
    }

    #[test]
    fn checksum_mismatch_is_skipped() {
        let broken = GNS.replace("*71", "*72");
        let (fixes, tally) = collect(&format!("{}\n{}\n", ZDA, broken));
        assert!(fixes.is_empty());
        assert_eq!(tally.checksum_mismatch, 1);
        assert_eq!(tally.rejected(), 1);
    }

    #[test]
    fn missing_anchor() {
        let text = format!("{}\n{}\n", GNS, GNS);
        let res = scan_str(&text, ScanConfig::default());
        assert_matches!(res, Err(ScanError::MissingDateAnchor));
        assert_matches!(scan_str("", ScanConfig::default()), Err(ScanError::MissingDateAnchor));
    }

    #[test]
    fn anchor_without_fixes_is_not_an_error() {
        let (fixes, tally) = collect(ZDA);
        assert!(fixes.is_empty());
        assert_eq!(tally, Tally { preamble: 1, ..Tally::default() });
    }

    #[test]
    fn lines_before_anchor_are_not_parsed() {
        let (fixes, tally) = collect(&format!("{}\n{}\n{}\n", GNS, ZDA, GNS));
        assert_eq!(fixes.len(), 1);
        assert_eq!(tally.preamble, 2);
    }

    #[test]
    fn invalid_date_keeps_searching() {
        let text = format!(
            "$GPZDA,120000.00,32,13,2024,00,00*62\n{}\n{}\n",
            "$GNZDA,130000.00,16,03,2024,00,00*7A", GNS
        );
        let mut stream = scan_str(&text, ScanConfig::default()).unwrap();
        assert_eq!(stream.anchor().day(), 16);
        assert_eq!(stream.by_ref().count(), 1);
    }

    #[test]
    fn noisy_log() {
        let text = [
            "",
            ZDA,
            "$GNGNS,121531.00,,,,,NN,00,,,,,,*54",
            GNS,
            "$GNZDA,130000.00,16,03,2024,00,00*7A",
            "$GNGNS,121532.00,3351.0000,S,15112.6000,W,AA,07,1.2,8.250,,,,*6C",
            "$GNGNS,121533.00,4030.1234,N,01645.5678,E,RR,xx,,12.345,,,,*7B",
            "$GNGNS,121534.00,40.1234,N,01645.5678,E,RR,09,,12.345,,,,*76",
            "$GNGGA,121535.00,4030.1234,N,01645.5678,E,4,09,0.9,12.3,M,40.1,M,,*4A",
            "",
            "$GNGNS,121536.00,4030.1234,N,01645.5678,E,RR,09,,abc,,,,*08",
            "garbage",
            "  $GNGNS,121530.00,4030.1234,N,01645.5678,E,RR,09,,12.345,,,,*71  ",
            "",
        ]
        .join("\r\n");

        let (fixes, tally) = collect(&text);
        assert_eq!(fixes.len(), 3);
        assert_eq!(fixes[1].satellite_count, 7);
        // date of the first anchor, not of the later ZDA
        assert_eq!(fixes[1].timestamp.naive_utc().date().to_string(), "2024-03-15");

        assert_eq!(
            tally,
            Tally {
                accepted: 3,
                preamble: 2,
                malformed_line: 1,
                checksum_mismatch: 0,
                invalid_angle: 1,
                empty_position: 1,
                malformed_fields: 2,
                irrelevant: 3,
            }
        );
        assert_eq!(tally.rejected(), 5);
    }

    #[test]
    fn longitude_sign_config() {
        let text = format!(
            "{}\n{}\n",
            ZDA, "$GNGNS,121532.00,3351.0000,S,15112.6000,W,AA,07,1.2,8.250,,,,*6C"
        );
        let config = ScanConfig {
            longitude_sign: LongitudeSign::LongitudeField,
        };
        let mut stream = scan_str(&text, config).unwrap();
        assert_eq!(stream.config().longitude_sign, LongitudeSign::LongitudeField);
        let fix = stream.next().unwrap().unwrap();
        assert!(fix.longitude < 0.0);
        assert!(fix.latitude < 0.0);
    }

    #[test]
    fn io_errors_are_surfaced() {
        let lines: Vec<io::Result<&str>> = vec![
            Ok(ZDA),
            Err(io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8")),
            Ok(GNS),
        ];
        let mut stream = scan(lines, ScanConfig::default()).unwrap();
        assert_matches!(stream.next(), Some(Err(ScanError::Io(_))));
        assert_matches!(stream.next(), Some(Ok(_)));
        assert_matches!(stream.next(), None);
        assert_matches!(stream.next(), None);
    }

    #[test]
    fn reads_from_reader() {
        let input = format!("{}\n{}\n", ZDA, GNS);
        let stream = scan_reader(io::Cursor::new(input), ScanConfig::default()).unwrap();
        assert_eq!(stream.filter_map(Result::ok).count(), 1);
    }
}
