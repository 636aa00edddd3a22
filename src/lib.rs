use std::io::{self, Write};

use clap::Parser;
use jiff::Zoned;
use jiff::civil::Date;
use thiserror::Error;

pub mod dates;
pub mod fetch;
pub mod report;

use crate::dates::{DaysError, last_days, parse_days};
use crate::fetch::{HttpSource, RateSource, fetch_all};
use crate::report::write_report;

/// Get the EUR and USD cash exchange rates from PrivatBank for the last few days.
///
/// Every day is requested in parallel. Days the bank has no data for, or whose request failed,
/// are reported as not available.
#[derive(Parser)]
pub struct Cli {
    /// Number of days to show, ending today (1 to 10)
    #[arg(short, long, value_name = "DAYS", default_value = "1")]
    pub days: String,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid number of days: {0}")]
    Days(#[from] DaysError),
    #[error("date out of range: {0}")]
    Date(#[from] jiff::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Fetch and print rates for the days requested on the command line.
pub fn run<W: Write>(args: &Cli, out: &mut W) -> Result<(), Error> {
    run_with(&args.days, Zoned::now().date(), HttpSource::new, out)
}

/// Validate `days`, then fetch every date up to `today` from the source made by `connect`.
///
/// `connect` is only called once `days` is known to be valid, and the source is dropped as soon
/// as the batch has been fetched.
pub fn run_with<S, F, W>(days: &str, today: Date, connect: F, out: &mut W) -> Result<(), Error>
where
    S: RateSource,
    F: FnOnce() -> S,
    W: Write,
{
    let days = parse_days(days)?;
    let dates = last_days(today, days)?;

    let results = {
        let source = connect();
        fetch_all(&source, &dates)
    };

    write_report(out, &dates, &results)?;
    Ok(())
}
