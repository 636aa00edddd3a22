use std::thread;

use jiff::civil::Date;
use log::{debug, error, warn};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use ureq::Agent;
use ureq::http::StatusCode;

use crate::dates::format_date;

const PRIVAT_BASE_URL: &str = "https://api.privatbank.ua/p24api";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("error status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("connection error for {url}: {source}")]
    Connection { url: String, source: ureq::Error },
    #[error("unexpected response body for {url}: {source}")]
    Payload { url: String, source: ureq::Error },
}

/// Exchange rates published for a single date.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RatesPayload {
    #[serde(rename = "exchangeRate")]
    pub exchange_rate: Vec<CurrencyRate>,
}

impl RatesPayload {
    /// The entry for `currency`, if the payload has one.
    pub fn rate(&self, currency: &str) -> Option<&CurrencyRate> {
        self.exchange_rate.iter().find(|r| r.currency == currency)
    }
}

/// Cash rates of one currency against UAH.
///
/// Only a handful of currencies carry bank cash rates, the rest only have NBU rates, so both
/// prices are optional. Prices keep the digits the bank sent, so `45.0` stays `45.0`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRate {
    /// Missing on the base currency entry
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub purchase_rate: Option<Decimal>,
    #[serde(default)]
    pub sale_rate: Option<Decimal>,
}

/// Somewhere rates for a date can be retrieved from.
pub trait RateSource: Sync {
    fn fetch(&self, date: Date) -> Result<RatesPayload, FetchError>;
}

/// PrivatBank's public exchange rate archive.
pub struct HttpSource {
    agent: Agent,
    base_url: String,
}

impl HttpSource {
    pub fn new() -> Self {
        Self::with_base_url(PRIVAT_BASE_URL)
    }

    pub(crate) fn with_base_url(base_url: &str) -> Self {
        // Non-200 statuses are inspected below rather than surfaced as transport errors
        let config = Agent::config_builder().http_status_as_error(false).build();
        Self {
            agent: Agent::new_with_config(config),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn request_url(&self, date: Date) -> String {
        // `json` is a bare flag with no value, which `.query()` cannot express
        format!("{}/exchange_rates?json&date={}", self.base_url, format_date(date))
    }
}

impl RateSource for HttpSource {
    fn fetch(&self, date: Date) -> Result<RatesPayload, FetchError> {
        let url = self.request_url(date);
        debug!("requesting {url}");

        let mut resp = match self.agent.get(url.as_str()).call() {
            Ok(resp) => resp,
            Err(source) => return Err(FetchError::Connection { url, source }),
        };
        if resp.status() != StatusCode::OK {
            return Err(FetchError::Status {
                status: resp.status().as_u16(),
                url,
            });
        }

        match resp.body_mut().read_json::<RatesPayload>() {
            Ok(payload) => Ok(payload),
            Err(source) => Err(FetchError::Payload { url, source }),
        }
    }
}

/// Fetch rates for every date concurrently.
///
/// All requests are in flight at once and the call returns once every one has finished. The
/// result at index `i` always belongs to `dates[i]`; a failed request leaves `None` there and
/// does not affect the others.
pub fn fetch_all<S: RateSource>(source: &S, dates: &[Date]) -> Vec<Option<RatesPayload>> {
    thread::scope(|scope| {
        let handles: Vec<_> = dates
            .iter()
            .map(|&date| scope.spawn(move || source.fetch(date)))
            .collect();

        handles
            .into_iter()
            .zip(dates)
            .map(|(handle, date)| match handle.join() {
                Ok(Ok(payload)) => Some(payload),
                Ok(Err(err @ FetchError::Status { .. })) => {
                    warn!("{err}");
                    None
                }
                Ok(Err(err)) => {
                    error!("{err}");
                    None
                }
                Err(_) => {
                    error!("request for {} panicked", format_date(*date));
                    None
                }
            })
            .collect()
    })
}
