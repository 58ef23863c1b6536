//! Framing of a single sentence: header recognition and field splitting.

use arrayvec::ArrayVec;

use err::LineError;

const HEADER_LENGTH: usize = 2;
const TYPE_LENGTH: usize = 3;
const MAX_FIELDS: usize = 32;

/// Message type of a sentence, talker id disregarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SentenceType {
    Zda,
    Gns,
    Other,
}

/// Look at the `$ttXXX` header of `line` only. Anything without a `$` and a
/// complete header is `Other`.
pub fn sentence_type(line: &str) -> SentenceType {
    if !line.starts_with('$') {
        return SentenceType::Other;
    }
    match line.get(1 + HEADER_LENGTH..1 + HEADER_LENGTH + TYPE_LENGTH) {
        Some("ZDA") => SentenceType::Zda,
        Some("GNS") => SentenceType::Gns,
        _ => SentenceType::Other,
    }
}

/// A sentence split into its comma separated fields.
///
/// `fields[0]` is the header (`GNGNS`), so indices match the usual NMEA
/// field numbering. A trailing `*HH` is not part of the last field.
#[derive(Debug)]
pub struct Sentence<'a> {
    pub kind: SentenceType,
    fields: ArrayVec<[&'a str; MAX_FIELDS]>,
}

impl<'a> Sentence<'a> {
    pub fn split(line: &'a str) -> Result<Self, LineError> {
        let kind = sentence_type(line);
        if kind == SentenceType::Other {
            return Err(LineError::Malformed("unknown header"));
        }

        let body = match line.rfind('*') {
            Some(star) => &line[1..star],
            None => &line[1..],
        };

        let mut fields = ArrayVec::new();
        for field in body.split(',') {
            if fields.try_push(field).is_err() {
                return Err(LineError::Malformed("too many fields"));
            }
        }

        Ok(Sentence {
            kind,
            fields,
        })
    }

    /// Field `idx`, or `None` if the sentence is shorter.
    #[inline]
    pub fn field(&self, idx: usize) -> Option<&'a str> {
        self.fields.get(idx).cloned()
    }
}
