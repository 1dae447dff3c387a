//! Client error types

use thiserror::Error;

/// Errors raised by the bundled client implementations
#[derive(Debug, Error)]
pub enum ClientError {
    /// No canned response registered for the request
    #[error("no {kind} fixture for '{key}'")]
    MissingFixture { kind: &'static str, key: String },

    /// A failure injected on purpose for the given key
    #[error("injected failure for '{0}'")]
    Injected(String),

    /// The fixture file could not be parsed
    #[error("invalid fixture file: {0}")]
    InvalidFixtureFile(#[from] serde_json::Error),
}
