//! Blocking client for the Amadeus self-service flight APIs.
//!
//! Construction performs the OAuth2 `client_credentials` token exchange
//! eagerly, so a connected client always holds a usable bearer token and a
//! credential problem surfaces before any search runs. Two queries are
//! exposed:
//! - [`AmadeusClient::find_cheap_destinations`]: inspiration search, cheap
//!   destinations from a fixed origin under a price ceiling.
//! - [`AmadeusClient::find_cheapest_dates`]: cheapest travel dates for a
//!   fixed origin/destination pair.

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::config::{self, Credentials};
use crate::error::{AuthenticationError, SearchError};
use crate::models::{Offer, SearchParameters};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Client bound to one bearer token for the lifetime of a run.
pub struct AmadeusClient {
    http: reqwest::blocking::Client,
    base_url: String,
    access_token: String,
}

// Bearer tokens must never reach logs or console output.
impl fmt::Debug for AmadeusClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmadeusClient")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// All flight endpoints wrap their payload in a `data` array; a missing or
/// empty array is a valid no-results response.
#[derive(Debug, Deserialize)]
struct DataEnvelope {
    #[serde(default)]
    data: Vec<Offer>,
}

// ============ Connection ============

impl AmadeusClient {
    /// Connects to the configured endpoint (`AMADEUS_BASE_URL` override or
    /// the vendor test host).
    pub fn connect(credentials: &Credentials) -> Result<Self, AuthenticationError> {
        Self::connect_to(&config::api_base_url(), credentials)
    }

    /// Connects to an explicit endpoint and exchanges the credentials for a
    /// bearer token.
    ///
    /// # Errors
    ///
    /// [`AuthenticationError::Rejected`] when the endpoint refuses the
    /// credentials; [`AuthenticationError::Transport`] on network failure.
    pub fn connect_to(
        base_url: &str,
        credentials: &Credentials,
    ) -> Result<Self, AuthenticationError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config::HTTP_TIMEOUT_SECS))
            .build()?;

        let response = http
            .post(format!("{}/v1/security/oauth2/token", base_url))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", credentials.api_key.as_str()),
                ("client_secret", credentials.api_secret.as_str()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AuthenticationError::rejected(status.as_u16(), body));
        }

        let token: TokenResponse = response.json()?;
        debug!(base_url, "token exchange succeeded");

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            access_token: token.access_token,
        })
    }
}

// ============ Queries ============

impl AmadeusClient {
    /// Inspiration search: destinations reachable from `params.origin` at or
    /// under `params.max_price`, ranked by the API.
    ///
    /// Absent optional parameters are omitted from the query entirely rather
    /// than sent empty. An empty result is `Ok`, not an error; the one query
    /// is never retried.
    pub fn find_cheap_destinations(
        &self,
        params: &SearchParameters,
    ) -> Result<Vec<Offer>, SearchError> {
        let mut query: Vec<(&str, String)> = vec![
            ("origin", params.origin.clone()),
            ("maxPrice", params.max_price.to_string()),
            ("viewBy", "DESTINATION".to_string()),
        ];
        if let Some(date) = params.departure_date {
            query.push(("departureDate", date.format(DATE_FORMAT).to_string()));
        }
        if let Some(duration) = params.duration {
            query.push(("duration", duration.to_string()));
        }

        debug!(
            origin = %params.origin,
            max_price = params.max_price,
            "querying flight destinations"
        );
        self.get_data("/v1/shopping/flight-destinations", &query)
    }

    /// Cheapest travel dates for a fixed origin/destination pair. Not used
    /// by the daily pipeline; available for ad-hoc route checks.
    pub fn find_cheapest_dates(
        &self,
        origin: &str,
        destination: &str,
        departure_date: Option<NaiveDate>,
    ) -> Result<Vec<Offer>, SearchError> {
        let mut query: Vec<(&str, String)> = vec![
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
        ];
        if let Some(date) = departure_date {
            query.push(("departureDate", date.format(DATE_FORMAT).to_string()));
        }

        debug!(origin, destination, "querying flight dates");
        self.get_data("/v1/shopping/flight-dates", &query)
    }

    fn get_data(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<Offer>, SearchError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", self.access_token))
            .query(query)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SearchError::api(status.as_u16(), body));
        }

        let envelope: DataEnvelope = response.json()?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};

    const TOKEN_BODY: &str =
        r#"{"access_token":"test-token-abc","token_type":"Bearer","expires_in":1799}"#;

    fn make_credentials() -> Credentials {
        Credentials {
            api_key: "client-id".to_string(),
            api_secret: "client-secret".to_string(),
        }
    }

    /// Registers a permissive token mock and connects a client to the server.
    fn connect_to_mock(server: &mut ServerGuard) -> AmadeusClient {
        server
            .mock("POST", "/v1/security/oauth2/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(TOKEN_BODY)
            .create();
        AmadeusClient::connect_to(&server.url(), &make_credentials()).unwrap()
    }

    #[test]
    fn test_connect_sends_client_credentials_grant() {
        let mut server = Server::new();
        let token_mock = server
            .mock("POST", "/v1/security/oauth2/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()),
                Matcher::UrlEncoded("client_id".into(), "client-id".into()),
                Matcher::UrlEncoded("client_secret".into(), "client-secret".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(TOKEN_BODY)
            .create();

        let client = AmadeusClient::connect_to(&server.url(), &make_credentials()).unwrap();
        token_mock.assert();
        assert_eq!(client.access_token, "test-token-abc");
    }

    #[test]
    fn test_connect_surfaces_rejected_credentials() {
        let mut server = Server::new();
        server
            .mock("POST", "/v1/security/oauth2/token")
            .with_status(401)
            .with_body(r#"{"error":"invalid_client"}"#)
            .create();

        let err = AmadeusClient::connect_to(&server.url(), &make_credentials()).unwrap_err();
        match err {
            AuthenticationError::Rejected { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid_client"));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_output_redacts_the_bearer_token() {
        let mut server = Server::new();
        let client = connect_to_mock(&mut server);

        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("test-token-abc"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_find_cheap_destinations_omits_absent_parameters() {
        let mut server = Server::new();
        let client = connect_to_mock(&mut server);

        // Exact query match: a request carrying departureDate or duration
        // would not hit this mock.
        let search_mock = server
            .mock("GET", "/v1/shopping/flight-destinations")
            .match_query(Matcher::Exact(
                "origin=HKG&maxPrice=3000&viewBy=DESTINATION".to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":[]}"#)
            .create();

        let params = SearchParameters {
            origin: "HKG".to_string(),
            departure_date: None,
            max_price: 3000,
            duration: None,
        };
        let offers = client.find_cheap_destinations(&params).unwrap();
        search_mock.assert();
        assert!(offers.is_empty());
    }

    #[test]
    fn test_find_cheap_destinations_sends_optional_parameters() {
        let mut server = Server::new();
        let client = connect_to_mock(&mut server);

        let search_mock = server
            .mock("GET", "/v1/shopping/flight-destinations")
            .match_query(Matcher::Exact(
                "origin=HKG&maxPrice=3000&viewBy=DESTINATION&departureDate=2025-05-01&duration=10"
                    .to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":[]}"#)
            .create();

        let params = SearchParameters {
            origin: "HKG".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2025, 5, 1),
            max_price: 3000,
            duration: Some(10),
        };
        client.find_cheap_destinations(&params).unwrap();
        search_mock.assert();
    }

    #[test]
    fn test_find_cheap_destinations_decodes_offers() {
        let mut server = Server::new();
        let client = connect_to_mock(&mut server);

        server
            .mock("GET", "/v1/shopping/flight-destinations")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data":[
                    {"type":"flight-destination","origin":"HKG","destination":"TPE",
                     "departureDate":"2025-05-01","returnDate":"2025-05-08",
                     "price":{"total":"912.40"}},
                    {"type":"flight-destination","origin":"HKG","destination":"BKK",
                     "departureDate":"2025-05-02","returnDate":"2025-05-09",
                     "price":{"total":"1204.00"}}
                ]}"#,
            )
            .create();

        let params = SearchParameters {
            origin: "HKG".to_string(),
            departure_date: None,
            max_price: 3000,
            duration: None,
        };
        let offers = client.find_cheap_destinations(&params).unwrap();
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].destination.as_deref(), Some("TPE"));
        assert_eq!(
            offers[1].price.as_ref().and_then(|p| p.total.as_deref()),
            Some("1204.00")
        );
    }

    #[test]
    fn test_missing_data_key_is_an_empty_result() {
        let mut server = Server::new();
        let client = connect_to_mock(&mut server);

        server
            .mock("GET", "/v1/shopping/flight-destinations")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create();

        let params = SearchParameters {
            origin: "HKG".to_string(),
            departure_date: None,
            max_price: 3000,
            duration: None,
        };
        assert!(client.find_cheap_destinations(&params).unwrap().is_empty());
    }

    #[test]
    fn test_envelope_decodes_with_and_without_data_key() {
        let envelope: DataEnvelope =
            serde_json::from_str(r#"{"data":[{"destination":"TPE"}]}"#).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].destination.as_deref(), Some("TPE"));

        let empty: DataEnvelope = serde_json::from_str("{}").unwrap();
        assert!(empty.data.is_empty());
    }

    #[test]
    fn test_search_error_carries_status_and_body() {
        let mut server = Server::new();
        let client = connect_to_mock(&mut server);

        server
            .mock("GET", "/v1/shopping/flight-destinations")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body("quota exceeded")
            .create();

        let params = SearchParameters {
            origin: "HKG".to_string(),
            departure_date: None,
            max_price: 3000,
            duration: None,
        };
        let err = client.find_cheap_destinations(&params).unwrap_err();
        match err {
            SearchError::Api { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "quota exceeded");
            }
            other => panic!("expected Api, got {:?}", other),
        }
    }

    #[test]
    fn test_find_cheapest_dates_builds_route_query() {
        let mut server = Server::new();
        let client = connect_to_mock(&mut server);

        let dates_mock = server
            .mock("GET", "/v1/shopping/flight-dates")
            .match_query(Matcher::Exact("origin=HKG&destination=TYO".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data":[
                    {"type":"flight-date","origin":"HKG","destination":"TYO",
                     "departureDate":"2025-06-10","returnDate":"2025-06-17",
                     "price":{"total":"1890.00"}}
                ]}"#,
            )
            .create();

        let offers = client.find_cheapest_dates("HKG", "TYO", None).unwrap();
        dates_mock.assert();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].departure_date.as_deref(), Some("2025-06-10"));
    }
}
