//! Error types of the store
//!
//! None of these ever escape `dispatch`: fetch failures travel inside receive
//! actions, validation failures drop the action.

use crate::actions::ActionType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a fetch failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorOrigin {
    /// The backend call itself failed
    Bridge,
    /// The request could not be built from the current state
    Action,
}

/// Failure carried by a receive action in place of its payload
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
    pub origin: ErrorOrigin,
}

impl FetchError {
    pub fn bridge(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            origin: ErrorOrigin::Bridge,
        }
    }

    pub fn action(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            origin: ErrorOrigin::Action,
        }
    }
}

impl From<anyhow::Error> for FetchError {
    fn from(err: anyhow::Error) -> Self {
        // alternate formatting keeps the context chain
        FetchError::bridge(format!("{:#}", err))
    }
}

/// Reasons a request cannot be built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("record limit of {limit} reached")]
    RecordLimit { limit: u64 },

    #[error("unknown navigation '{0}'")]
    UnknownNavigation(String),
}

impl From<RequestError> for FetchError {
    fn from(err: RequestError) -> Self {
        FetchError::action(err.to_string())
    }
}

/// An action rejected by one of its validators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{action} rejected: {message}")]
pub struct ValidationError {
    pub action: ActionType,
    pub message: &'static str,
}
