//! Console report over a batch of fare records.
//!
//! Filters out sentinel rows, lists the ten cheapest fares, and prints
//! price statistics over the remaining records. Used at the end of a
//! successful run to show what the search actually found.

use crate::models::FlightRecord;

/// Price statistics over the real (non-sentinel) records of a batch.
#[derive(Debug, PartialEq)]
pub struct FareSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl FareSummary {
    /// Computes statistics over `records`, ignoring sentinel rows. Returns
    /// `None` when no real records remain.
    pub fn from_records(records: &[FlightRecord]) -> Option<Self> {
        let prices: Vec<f64> = records
            .iter()
            .filter(|r| !r.is_sentinel())
            .map(|r| r.price)
            .collect();

        if prices.is_empty() {
            return None;
        }

        let count = prices.len();
        let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = prices.iter().sum::<f64>() / count as f64;

        Some(Self { count, min, max, mean })
    }
}

/// Renders the full report. The reporter orders its own view by price, so
/// callers are not trusted to pre-sort.
pub fn build_report(records: &[FlightRecord]) -> String {
    let summary = match FareSummary::from_records(records) {
        Some(summary) => summary,
        None => return "No fare data to report.\n".to_string(),
    };

    let mut fares: Vec<&FlightRecord> = records.iter().filter(|r| !r.is_sentinel()).collect();
    fares.sort_by(|a, b| {
        a.price
            .partial_cmp(&b.price)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut out = String::new();
    out.push_str("Top 10 cheapest destinations\n");
    out.push_str("============================\n");
    out.push('\n');
    out.push_str(&format!(
        "  {:>2}  {:<12} {:>14}   {:<12} {:<12}\n",
        "#", "DESTINATION", "PRICE", "DEPARTURE", "RETURN"
    ));
    out.push_str(&format!("  {}\n", "-".repeat(58)));

    for (i, fare) in fares.iter().take(10).enumerate() {
        out.push_str(&format!(
            "  {:>2}  {:<12} {:>14}   {:<12} {:<12}\n",
            i + 1,
            fare.destination,
            format_price(fare.price),
            fare.departure_date,
            fare.return_date
        ));
    }

    out.push('\n');
    out.push_str(&format!("  Destinations:   {}\n", summary.count));
    out.push_str(&format!("  Cheapest:       {}\n", format_price(summary.min)));
    out.push_str(&format!("  Most expensive: {}\n", format_price(summary.max)));
    out.push_str(&format!("  Average price:  {}\n", format_price(summary.mean)));
    out
}

/// Prints the report to stdout.
pub fn print_report(records: &[FlightRecord]) {
    print!("{}", build_report(records));
}

/// Formats a price in the account currency with two decimals.
fn format_price(price: f64) -> String {
    format!("HKD ${:.2}", price)
}
