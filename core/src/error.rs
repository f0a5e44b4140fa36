//! Error types for the LifePlus client.
//!
//! # Design
//! `ApiError` describes why a single call failed: the transport never got a
//! response, the server answered with a non-2xx status, or a payload could not
//! be (de)serialized. `Unauthorized` and `NotFound` get dedicated variants
//! because callers routinely branch on them.
//!
//! Facade operations (login, logout, ...) wrap the `ApiError` in a
//! `LifePlusError` that names the failed operation and keeps the original
//! error as its `source()`.

use std::fmt;

use serde::Deserialize;

/// Errors returned by endpoint parsers and resource handles.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, I/O, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server returned 401; the bearer token or partner key was rejected.
    #[error("unauthorized: {body}")]
    Unauthorized { body: String },

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned any other non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// HTTP status of a server-reported failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::NotFound => Some(404),
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of a JSON error body, when the server sent one.
    pub fn server_message(&self) -> Option<String> {
        let body = match self {
            ApiError::Unauthorized { body } | ApiError::HttpError { body, .. } => body,
            _ => return None,
        };
        serde_json::from_str::<ErrorBody>(body).ok()?.message
    }
}

/// Facade operation that produced a [`LifePlusError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Register,
    GetProfile,
    Logout,
    Ping,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self {
            Operation::Login => "login failed",
            Operation::Register => "registration failed",
            Operation::GetProfile => "failed to get profile",
            Operation::Logout => "logout failed",
            Operation::Ping => "failed to ping API",
        };
        f.write_str(prefix)
    }
}

/// An [`ApiError`] tagged with the facade operation that failed.
#[derive(Debug, thiserror::Error)]
#[error("{operation}: {source}")]
pub struct LifePlusError {
    pub operation: Operation,
    #[source]
    pub source: ApiError,
}

impl LifePlusError {
    pub fn new(operation: Operation, source: ApiError) -> Self {
        Self { operation, source }
    }

    /// Adapter for `map_err`.
    pub(crate) fn during(operation: Operation) -> impl FnOnce(ApiError) -> Self {
        move |source| Self::new(operation, source)
    }
}

/// Invalid client configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("base_url must start with http:// or https://, got {0}")]
    UnsupportedScheme(String),
}
