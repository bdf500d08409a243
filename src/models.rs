//! Core data types for the fare pipeline.
//!
//! `Offer` mirrors the wire shape of one inspiration-search result entry;
//! `FlightRecord` is the normalized row that lands in the output file.

use chrono::NaiveDate;
use serde::Deserialize;

/// Destination value on the placeholder row written when a run finds nothing.
pub const SENTINEL_DESTINATION: &str = "No data found";

/// Note column text carried only by sentinel rows.
pub const SENTINEL_NOTE: &str = "Test environment or no results available";

/// `search_date` column format, local wall-clock time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One destination offer as returned by the inspiration search. Every field
/// is optional at the wire boundary; normalization supplies the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub price: Option<OfferPrice>,
}

/// Nested price object; the API encodes totals as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct OfferPrice {
    #[serde(default)]
    pub total: Option<String>,
}

/// Normalized row persisted to the output file.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRecord {
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    pub price: f64,
    pub search_date: String,
}

impl FlightRecord {
    /// Normalizes one offer. Missing or malformed fields take defaults and
    /// never fail: destination `Unknown`, blank dates, price `0`.
    pub fn from_offer(offer: &Offer, search_date: &str) -> Self {
        let price = offer
            .price
            .as_ref()
            .and_then(|p| p.total.as_deref())
            .and_then(|total| total.trim().parse::<f64>().ok())
            .filter(|p| p.is_finite() && *p >= 0.0)
            .unwrap_or(0.0);

        Self {
            destination: offer
                .destination
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            departure_date: offer.departure_date.clone().unwrap_or_default(),
            return_date: offer.return_date.clone().unwrap_or_default(),
            price,
            search_date: search_date.to_string(),
        }
    }

    /// Placeholder row guaranteeing the output file exists for runs that
    /// find no offers.
    pub fn sentinel(search_date: &str) -> Self {
        Self {
            destination: SENTINEL_DESTINATION.to_string(),
            departure_date: String::new(),
            return_date: String::new(),
            price: 0.0,
            search_date: search_date.to_string(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.destination == SENTINEL_DESTINATION
    }
}

/// Parameters for one inspiration search, built once per run.
#[derive(Debug, Clone)]
pub struct SearchParameters {
    pub origin: String,
    pub departure_date: Option<NaiveDate>,
    pub max_price: u32,
    pub duration: Option<u32>,
}
