//! Offer normalization and output-file writing.
//!
//! Non-empty batches are normalized, sorted by price, and appended to the
//! output file; the header is written only when the file is created. An
//! empty batch instead rewrites the file with a single sentinel row so the
//! artifact exists even for a run that found nothing. That reset discards
//! any accumulated history, which is the long-standing behavior downstream
//! automation reads as "last run came up empty".

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use tracing::info;

use crate::error::PersistError;
use crate::models::{FlightRecord, Offer, SENTINEL_NOTE, TIMESTAMP_FORMAT};

const HEADER: &str = "destination,departure_date,return_date,price,search_date";
const SENTINEL_HEADER: &str = "destination,departure_date,return_date,price,search_date,note";

/// Normalizes `offers` into records and writes them to `target`, returning
/// the records in their written (price-ascending) order.
///
/// The target file is opened, written, and closed within this call. Parent
/// directories are not created.
pub fn persist(offers: &[Offer], target: &Path) -> Result<Vec<FlightRecord>, PersistError> {
    let search_date = Local::now().format(TIMESTAMP_FORMAT).to_string();

    if offers.is_empty() {
        let sentinel = FlightRecord::sentinel(&search_date);
        write_sentinel_file(target, &sentinel)?;
        info!(path = %target.display(), "no offers; wrote sentinel file");
        return Ok(vec![sentinel]);
    }

    let mut records: Vec<FlightRecord> = offers
        .iter()
        .map(|offer| FlightRecord::from_offer(offer, &search_date))
        .collect();

    // Stable sort: equal prices keep their API-reported order.
    records.sort_by(|a, b| {
        a.price
            .partial_cmp(&b.price)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    append_records(target, &records)?;
    info!(
        count = records.len(),
        path = %target.display(),
        "persisted fare records"
    );
    Ok(records)
}

/// Appends rows to `target`, writing the header first only when the file
/// does not exist yet.
fn append_records(target: &Path, records: &[FlightRecord]) -> Result<(), PersistError> {
    let fail = |e| PersistError::new(target, e);

    let is_new = !target.exists();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(target)
        .map_err(fail)?;

    let mut out = String::new();
    if is_new {
        out.push_str(HEADER);
        out.push('\n');
    }
    for record in records {
        out.push_str(&record_line(record));
        out.push('\n');
    }

    file.write_all(out.as_bytes()).map_err(fail)?;
    file.flush().map_err(fail)?;
    Ok(())
}

/// Replaces `target` with a one-row sentinel file. Sentinel rows carry a
/// sixth `note` column explaining the empty result.
fn write_sentinel_file(target: &Path, sentinel: &FlightRecord) -> Result<(), PersistError> {
    let content = format!(
        "{}\n{},{},{},{},{},{}\n",
        SENTINEL_HEADER,
        csv_field(&sentinel.destination),
        csv_field(&sentinel.departure_date),
        csv_field(&sentinel.return_date),
        sentinel.price,
        csv_field(&sentinel.search_date),
        csv_field(SENTINEL_NOTE),
    );
    std::fs::write(target, content).map_err(|e| PersistError::new(target, e))
}

fn record_line(record: &FlightRecord) -> String {
    format!(
        "{},{},{},{},{}",
        csv_field(&record.destination),
        csv_field(&record.departure_date),
        csv_field(&record.return_date),
        record.price,
        csv_field(&record.search_date),
    )
}

/// Minimal quoting: a field is quoted only when it contains a comma, quote,
/// or line break; inner quotes are doubled.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
