//! Verification of the trailing `*HH` checksum of a sentence.

use arrayvec::ArrayString;
use std::fmt::Write;
use std::str;

use err::LineError;

/// Two hexadecimal digits.
pub type Hex = ArrayString<[u8; 2]>;

/// `*` plus the two checksum digits.
const TRAILER_LENGTH: usize = 3;

/// Result of comparing the computed and the transmitted checksum.
#[derive(Debug, Clone, PartialEq)]
pub struct ChecksumOutcome {
    pub valid: bool,
    /// Uppercase, zero padded.
    pub computed: Hex,
    /// As found at the end of the line.
    pub expected: Hex,
}

/// Compute the XOR of every byte strictly between the leading `$` and the
/// trailing `*` and compare it with the two digits after the `*`.
pub fn verify(line: &str) -> Result<ChecksumOutcome, LineError> {
    let bytes = line.as_bytes();
    if bytes.len() < TRAILER_LENGTH + 2 {
        return Err(LineError::Malformed("too short to carry a checksum"));
    }
    if bytes[0] != b'$' {
        return Err(LineError::Malformed("missing leading '$'"));
    }

    let star = bytes.len() - TRAILER_LENGTH;
    if bytes[star] != b'*' {
        return Err(LineError::Malformed("missing '*' before checksum"));
    }

    let digits = &bytes[star + 1..];
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return Err(LineError::Malformed("checksum is not hexadecimal"));
    }
    // only ascii hex digits from here on
    let expected = str::from_utf8(digits)
        .ok()
        .and_then(|s| Hex::from(s).ok())
        .ok_or(LineError::Malformed("checksum is not hexadecimal"))?;

    let cs = bytes[1..star].iter().fold(0u8, |cs, b| cs ^ b);
    let mut computed = Hex::new();
    write!(computed, "{:02X}", cs).map_err(|_| LineError::Malformed("checksum overflow"))?;

    Ok(ChecksumOutcome {
        valid: computed.eq_ignore_ascii_case(&expected),
        computed,
        expected,
    })
}
