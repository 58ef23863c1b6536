extern crate env_logger;
extern crate fixlog;
#[macro_use]
extern crate log;

use std::io::{self, Write};
use std::process;

use env_logger::Env;
use fixlog::{scan_reader, ScanConfig, ScanError};

/// Reads a log from stdin and prints one row per fix.
fn run() -> Result<(), ScanError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut fixes = scan_reader(stdin.lock(), ScanConfig::default())?;
    info!(
        "Log of {} (year {}, month {}, day {})",
        fixes.anchor().date(),
        fixes.anchor().year(),
        fixes.anchor().month(),
        fixes.anchor().day()
    );
    for fix in fixes.by_ref() {
        writeln!(out, "{}", fix?)?;
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}
