//! Error types for the IGDB client.
//!
//! # Design
//! One enum covers the whole pipeline, split into four groups:
//!
//! - validation errors, raised locally before any request is sent;
//! - transport errors, passed through from the `Transport` untouched;
//! - protocol errors, derived from the HTTP status and body shape;
//! - result-shape errors, raised when a get-by-id response does not hold
//!   exactly one entity.
//!
//! Protocol errors keep the raw status and body for diagnostics. The
//! protocol `NotFound` (the server answered 404) is distinct from
//! `EntityNotFound` (the server answered 200 with an empty array).

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by the query builder, the endpoint client and the image
/// URL resolver.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Limit outside `1..=50`.
    #[error("invalid limit {limit}: must be between 1 and 50")]
    InvalidLimit { limit: i64 },

    /// Negative offset.
    #[error("invalid offset {offset}: must not be negative")]
    InvalidOffset { offset: i64 },

    /// Operator symbol not in the supported set.
    #[error("invalid operator '{operator}' for field '{field}'")]
    InvalidOperator { field: String, operator: String },

    /// Operand list does not match the operator's arity.
    #[error("operator '{operator}' on field '{field}' expects {expected}, got {actual} value(s)")]
    InvalidOperandCount {
        field: String,
        operator: &'static str,
        expected: &'static str,
        actual: usize,
    },

    /// An option that the operation kind does not accept.
    #[error("option '{option}' is not allowed for {operation} requests")]
    IncompatibleOption {
        option: &'static str,
        operation: &'static str,
    },

    /// Search request without a usable search term.
    #[error("search requests require a non-empty search term")]
    EmptySearchTerm,

    /// A required name or identifier was empty.
    #[error("{what} must not be empty")]
    EmptyField { what: &'static str },

    /// A name or value contains a character the wire syntax reserves as a
    /// separator (`,` between values, `[`/`]` around filter keys, `:` in order).
    #[error("{what} '{value}' contains reserved character '{character}'")]
    ReservedCharacter {
        what: &'static str,
        value: String,
        character: char,
    },

    #[error("unknown image size preset '{0}'")]
    UnknownSizePreset(String),

    #[error("image size preset '{preset}' does not support ratio {ratio}")]
    UnsupportedRatio {
        preset: &'static str,
        ratio: &'static str,
    },

    /// The resource needs a bearer token and the client was built without one.
    #[error("resource '{resource}' requires an access token")]
    MissingAccessToken { resource: &'static str },

    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection failure, timeout or any other error raised by the transport.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// 401 or 403.
    #[error("unauthorized (HTTP {status}): {body}")]
    Unauthorized { status: u16, body: String },

    /// The server answered 404.
    #[error("not found (HTTP {status}): {body}")]
    NotFound { status: u16, body: String },

    #[error("rate limited (HTTP {status}): {body}")]
    RateLimited { status: u16, body: String },

    /// Any other non-2xx status.
    #[error("server error (HTTP {status}): {body}")]
    ServerError { status: u16, body: String },

    /// The body was not the JSON shape the operation expects.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String, body: String },

    /// Get-by-id matched nothing.
    #[error("{resource} {id} not found")]
    EntityNotFound { resource: &'static str, id: String },

    /// Get-by-id matched more than one entity.
    #[error("{resource} {id} matched {count} entities, expected exactly one")]
    AmbiguousResult {
        resource: &'static str,
        id: String,
        count: usize,
    },
}

impl ApiError {
    /// Returns `true` for errors detected locally, before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidLimit { .. }
                | ApiError::InvalidOffset { .. }
                | ApiError::InvalidOperator { .. }
                | ApiError::InvalidOperandCount { .. }
                | ApiError::IncompatibleOption { .. }
                | ApiError::EmptySearchTerm
                | ApiError::EmptyField { .. }
                | ApiError::ReservedCharacter { .. }
                | ApiError::UnknownSizePreset(_)
                | ApiError::UnsupportedRatio { .. }
                | ApiError::MissingAccessToken { .. }
                | ApiError::MissingCredentials(_)
                | ApiError::InvalidUrl(_)
        )
    }

    /// HTTP status carried by protocol errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. }
            | ApiError::NotFound { status, .. }
            | ApiError::RateLimited { status, .. }
            | ApiError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
