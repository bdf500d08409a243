use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Credential resolution or token exchange failed. Always fatal: no query
/// is meaningful without a bearer token.
#[derive(Error, Debug)]
pub enum AuthenticationError {
    #[error("environment variable {name} is not set")]
    MissingCredential { name: &'static str },

    #[error("token request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl AuthenticationError {
    pub fn missing_credential(name: &'static str) -> Self {
        Self::MissingCredential { name }
    }

    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::Rejected { status, body: body.into() }
    }
}

/// A flight query failed. Non-fatal: the pipeline treats it as an empty
/// result and still produces the output file.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("search returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SearchError {
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api { status, body: body.into() }
    }
}

/// Writing the output file failed.
#[derive(Error, Debug)]
#[error("failed to write {}: {source}", path.display())]
pub struct PersistError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl PersistError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self { path: path.into(), source }
    }
}
