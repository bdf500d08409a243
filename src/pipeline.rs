//! Run orchestration for the daily fare check.
//!
//! Wires the pipeline end to end: credentials → token exchange → one
//! inspiration search → persist → report. Every run that gets past
//! credential resolution leaves the output file behind: real rows when the
//! search finds offers, a sentinel row when it does not or when it fails.

use std::path::Path;

use anyhow::Result;
use chrono::{Duration, Local};
use tracing::{error, info, warn};

use crate::amadeus::AmadeusClient;
use crate::config::{self, Credentials};
use crate::models::{SearchParameters, TIMESTAMP_FORMAT};
use crate::persist;
use crate::report;

/// Runs the full pipeline with the compiled-in defaults: origin `HKG`,
/// departure a week out, ceiling HKD 3000, output `cheap_flights.csv` in
/// the working directory.
pub fn run() -> Result<()> {
    let credentials = Credentials::from_env()?;
    let client = AmadeusClient::connect(&credentials)?;

    let departure_date =
        (Local::now() + Duration::days(config::DEFAULT_LOOKAHEAD_DAYS)).date_naive();
    let params = SearchParameters {
        origin: config::DEFAULT_ORIGIN.to_string(),
        departure_date: Some(departure_date),
        max_price: config::DEFAULT_MAX_PRICE,
        duration: None,
    };

    run_with_client(&client, &params, Path::new(config::OUTPUT_FILE))
}

/// Runs one search against an already connected client, writing to
/// `target`. Separate from [`run`] so tests can inject a mock-backed client
/// and a temporary output path.
pub fn run_with_client(
    client: &AmadeusClient,
    params: &SearchParameters,
    target: &Path,
) -> Result<()> {
    println!(
        "Fare check started at {}",
        Local::now().format(TIMESTAMP_FORMAT)
    );
    match params.departure_date {
        Some(date) => println!(
            "Searching destinations from {} departing {} under HKD {}",
            params.origin, date, params.max_price
        ),
        None => println!(
            "Searching destinations from {} under HKD {}",
            params.origin, params.max_price
        ),
    }

    // A failed query is treated as an empty result; the run still produces
    // the output file and exits cleanly.
    let offers = match client.find_cheap_destinations(params) {
        Ok(offers) => offers,
        Err(err) => {
            warn!(error = %err, "search failed; continuing with no offers");
            Vec::new()
        }
    };

    if offers.is_empty() {
        persist::persist(&[], target)?;
        println!("No destinations found. This can happen when:");
        println!("  - the test environment has limited data");
        println!("  - the price ceiling is too strict");
        println!("  - no fares exist for the chosen date");
        println!("ok");
        return Ok(());
    }

    info!(count = offers.len(), "search returned offers");
    let records = match persist::persist(&offers, target) {
        Ok(records) => records,
        Err(err) => {
            // Keep the output-file guarantee even on a write failure, then
            // surface the original error. The fallback's own failure must
            // not mask it.
            error!(error = %err, "persist failed; attempting sentinel fallback");
            let _ = persist::persist(&[], target);
            return Err(err.into());
        }
    };

    println!("Saved {} records to {}", records.len(), target.display());
    println!();
    report::print_report(&records);
    println!("ok");
    Ok(())
}
