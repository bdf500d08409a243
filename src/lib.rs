//! # farewatch
//!
//! Logs cheap flight destinations from a fixed origin by querying the
//! Amadeus self-service APIs.
//!
//! Each run performs one inspiration search (origin `HKG`, departure a week
//! out, price ceiling HKD 3000), appends the normalized results to
//! `cheap_flights.csv`, and prints the ten cheapest destinations with price
//! statistics. Runs are designed to be scheduled; the output file
//! accumulates a fare history over time, and a run that finds nothing still
//! leaves a placeholder row so downstream automation always has a file to
//! read.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//! │ credentials │──▶│   search    │──▶│   persist   │──▶│   report    │
//! │ (env vars)  │   │  (Amadeus)  │   │   (.csv)    │   │  (console)  │
//! └─────────────┘   └─────────────┘   └─────────────┘   └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export AMADEUS_API_KEY=...
//! export AMADEUS_API_SECRET=...
//! farewatch                     # one run: search, append, report
//! cat cheap_flights.csv         # accumulated fare history
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Run defaults and credential resolution |
//! | [`models`] | Offer and record types |
//! | [`error`] | Domain error taxonomy |
//! | [`amadeus`] | Blocking API client: token exchange and flight queries |
//! | [`persist`] | Normalization, price sorting, and CSV writing |
//! | [`report`] | Console ranking and price statistics |
//! | [`pipeline`] | End-to-end run orchestration |

pub mod amadeus;
pub mod config;
pub mod error;
pub mod models;
pub mod persist;
pub mod pipeline;
pub mod report;
