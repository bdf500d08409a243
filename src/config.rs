use std::fmt;

use crate::error::AuthenticationError;

/// Fixed origin airport for every search.
pub const DEFAULT_ORIGIN: &str = "HKG";

/// Departure date offset applied to the current date.
pub const DEFAULT_LOOKAHEAD_DAYS: i64 = 7;

/// Price ceiling, in the account currency (HKD).
pub const DEFAULT_MAX_PRICE: u32 = 3000;

/// Output file, created in the working directory.
pub const OUTPUT_FILE: &str = "cheap_flights.csv";

pub const API_KEY_VAR: &str = "AMADEUS_API_KEY";
pub const API_SECRET_VAR: &str = "AMADEUS_API_SECRET";
pub const BASE_URL_VAR: &str = "AMADEUS_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com";

pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// API credentials resolved from the environment.
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    /// Reads both credential variables. Unset or blank values are rejected
    /// up front so the failure names the variable instead of surfacing as a
    /// rejected token request later.
    pub fn from_env() -> Result<Self, AuthenticationError> {
        Ok(Self {
            api_key: require_env(API_KEY_VAR)?,
            api_secret: require_env(API_SECRET_VAR)?,
        })
    }
}

// Credential values must never reach logs or console output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

fn require_env(name: &'static str) -> Result<String, AuthenticationError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AuthenticationError::missing_credential(name)),
    }
}

/// Endpoint base, overridable via `AMADEUS_BASE_URL` for integration tests
/// and self-hosted gateways.
pub fn api_base_url() -> String {
    std::env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}
