//! # farewatch CLI
//!
//! Single-command binary: each invocation runs one fare check against the
//! Amadeus test API and records the results in `cheap_flights.csv` in the
//! working directory. All search parameters are compiled-in defaults; the
//! binary takes no flags beyond `--help` and `--version`.
//!
//! ## Usage
//!
//! ```bash
//! AMADEUS_API_KEY=... AMADEUS_API_SECRET=... farewatch
//! ```
//!
//! ## Environment
//!
//! | Variable | Purpose |
//! |----------|---------|
//! | `AMADEUS_API_KEY` | API client id (required) |
//! | `AMADEUS_API_SECRET` | API client secret (required) |
//! | `AMADEUS_BASE_URL` | Endpoint override; defaults to the vendor test host |
//! | `RUST_LOG` | Diagnostic log filter; defaults to `farewatch=info` |

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Daily cheap-fare check from Hong Kong.
///
/// Runs one inspiration search (origin HKG, departure a week out, ceiling
/// HKD 3000), appends the results to cheap_flights.csv, and prints the ten
/// cheapest destinations found.
#[derive(Parser)]
#[command(
    name = "farewatch",
    about = "Logs cheap flight destinations from HKG to cheap_flights.csv",
    version,
    long_about = "Runs one Amadeus inspiration search with compiled-in defaults (origin HKG, \
    departure a week out, price ceiling HKD 3000), appends the normalized results to \
    cheap_flights.csv in the working directory, and prints the ten cheapest destinations \
    with price statistics. Requires AMADEUS_API_KEY and AMADEUS_API_SECRET."
)]
struct Cli {}

fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farewatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    farewatch::pipeline::run()
}
