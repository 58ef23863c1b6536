#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate fixlog;

use std::io::Cursor;
use fixlog::{scan_reader, ScanConfig};

fuzz_target!(|data: &[u8]| {
    let data = Cursor::new(data);
    if let Ok(fixes) = scan_reader(data, ScanConfig::default()) {
        for _ in fixes {
            ();
        }
    }
});
