use std::{io, num};

use checksum::Hex;

quick_error! {
    #[derive(Debug)]
    pub enum LineError {
        Malformed(msg: &'static str) {
            description("Malformed line")
            display("Malformed line: {}", msg)
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum AngleError {
        InvalidInput(msg: &'static str) {
            description("Invalid input")
            display("Invalid input: {}", msg)
        }
        Degrees(err: num::ParseIntError) {
            from()
            description("Invalid degrees")
            display("{}", err)
            cause(err)
        }
        Minutes(err: num::ParseFloatError) {
            from()
            description("Invalid minutes")
            display("{}", err)
            cause(err)
        }
    }
}

quick_error! {
    /// Why a line did not produce a fix. None of these abort a scan.
    #[derive(Debug)]
    pub enum SkipReason {
        MalformedLine(err: LineError) {
            from()
            description("Malformed line")
            display("{}", err)
            cause(err)
        }
        ChecksumMismatch(computed: Hex, expected: Hex) {
            description("Checksum mismatch")
            display("Computed checksum \"{}\", found checksum \"{}\"", computed, expected)
        }
        InvalidAngle(err: AngleError) {
            from()
            description("Invalid angle")
            display("Could not decode angle: {}", err)
            cause(err)
        }
        EmptyPosition {
            description("Empty position")
            display("Receiver reported no position yet")
        }
        MalformedFields(field: &'static str) {
            description("Malformed fields")
            display("Could not parse field {}", field)
        }
        Irrelevant {
            description("Irrelevant sentence")
            display("Sentence type is not of interest")
        }
    }
}

quick_error! {
    /// Errors that end a scan.
    #[derive(Debug)]
    pub enum ScanError {
        Io(err: io::Error) {
            from()
            description("I/O error")
            display("Encountered I/O error while scanning: {}", err)
            cause(err)
        }
        MissingDateAnchor {
            description("Missing date anchor")
            display("No ZDA sentence found, fixes cannot be timestamped")
        }
    }
}
