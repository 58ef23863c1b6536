//! The calendar date every fix of a log is stamped with.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use std::str::FromStr;

use sentence::{self, Sentence, SentenceType};

const DAY_FIELD: usize = 2;
const MONTH_FIELD: usize = 3;
const YEAR_FIELD: usize = 4;

/// Date taken from the first usable ZDA sentence of a log. Logs are assumed
/// to cover at most one UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateAnchor {
    date: NaiveDate,
}

impl DateAnchor {
    /// Extract the date of a ZDA sentence. Any other sentence, and a ZDA
    /// whose day, month and year do not form a valid date, yield `None`.
    pub fn try_extract(line: &str) -> Option<Self> {
        if sentence::sentence_type(line) != SentenceType::Zda {
            return None;
        }
        let zda = Sentence::split(line).ok()?;
        let day = u32::from_str(zda.field(DAY_FIELD)?).ok()?;
        let month = u32::from_str(zda.field(MONTH_FIELD)?).ok()?;
        let year = i32::from_str(zda.field(YEAR_FIELD)?).ok()?;
        DateAnchor::new(year, month, day)
    }

    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(|date| DateAnchor { date })
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Combine the anchored date with a time of day.
    #[inline]
    pub fn at(&self, time: NaiveTime) -> NaiveDateTime {
        self.date.and_time(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_date() {
        let anchor = DateAnchor::try_extract("$GPZDA,120000.00,15,03,2024,00,00*66").unwrap();
        assert_eq!((anchor.year(), anchor.month(), anchor.day()), (2024, 3, 15));
        assert_eq!(anchor.date(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        // talker id does not matter, neither does the checksum
        let anchor = DateAnchor::try_extract("$GNZDA,130000.00,16,03,2024,00,00*00").unwrap();
        assert_eq!(anchor.day(), 16);
        let anchor = DateAnchor::try_extract("$GNZDA,130000.00,16,03,2024").unwrap();
        assert_eq!(anchor.year(), 2024);
    }

    #[test]
    fn ignores_other_sentences() {
        assert_eq!(DateAnchor::try_extract("$GNGNS,121530.00,4030.1234,N,01645.5678,E,RR,09,,12.345,,,,*71"), None);
        assert_eq!(DateAnchor::try_extract("GPZDA,120000.00,15,03,2024,00,00*66"), None);
        assert_eq!(DateAnchor::try_extract(""), None);
    }

    #[test]
    fn rejects_invalid_dates() {
        assert_eq!(DateAnchor::try_extract("$GPZDA,120000.00,32,13,2024,00,00*62"), None);
        assert_eq!(DateAnchor::try_extract("$GPZDA,120000.00,,,,00,00*66"), None);
        assert_eq!(DateAnchor::try_extract("$GPZDA,120000.00,15,03"), None);
        assert_eq!(DateAnchor::new(2023, 2, 29), None);
    }

    #[test]
    fn combines_with_time() {
        let anchor = DateAnchor::new(2024, 3, 15).unwrap();
        let ts = anchor.at(NaiveTime::from_hms_opt(12, 15, 30).unwrap());
        assert_eq!(ts.to_string(), "2024-03-15 12:15:30");
    }
}
