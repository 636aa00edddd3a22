use std::fmt::Display;
use std::io::{self, Write};

use jiff::civil::Date;

use crate::dates::format_date;
use crate::fetch::RatesPayload;

/// Currencies shown for every date, in output order.
pub const CURRENCIES: [&str; 2] = ["EUR", "USD"];

const MISSING: &str = "n/a";

/// Render the report line for one date.
pub fn format_line(date: Date, result: Option<&RatesPayload>) -> String {
    let date = format_date(date);
    let Some(payload) = result else {
        return format!("Date: {date}, Data not available");
    };

    let mut line = format!("Date: {date}|");
    for code in CURRENCIES {
        let rate = payload.rate(code);
        let buy = show(rate.and_then(|r| r.purchase_rate));
        let sale = show(rate.and_then(|r| r.sale_rate));
        line.push_str(&format!(" {code} Buy: {buy},{code} Sale: {sale}|"));
    }
    line
}

fn show<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

/// Write one line per date. `dates` and `results` are matched up by position.
pub fn write_report<W: Write>(
    out: &mut W,
    dates: &[Date],
    results: &[Option<RatesPayload>],
) -> io::Result<()> {
    for (date, result) in dates.iter().zip(results) {
        writeln!(out, "{}", format_line(*date, result.as_ref()))?;
    }
    Ok(())
}
