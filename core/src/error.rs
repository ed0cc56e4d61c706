//! Error types for the catalog client.
//!
//! # Design
//! Every call returns `Result<T, ApiError>`; nothing is thrown across the
//! public boundary. `ApiError` separates failures the caller reacts to
//! differently (no token, network down, service said no, client could not
//! make sense of the exchange), while [`ErrorInfo`] gives all of them one
//! uniform shape for logging and for the session's error handler.

use std::collections::BTreeMap;

/// Error codes reported by the catalog service.
///
/// Values match the service's numeric `errorCode` field. Codes this client
/// does not name are kept as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success,
    Unknown,
    ConnectionError,
    JsonParseError,
    InvalidParams,
    ItemNotFound,
    NotAuthenticated,
    NotAuthorized,
    DatabaseThroughputExceeded,
    ServiceUnavailable,
    EntityTokenMissing,
    EntityTokenInvalid,
    EntityTokenExpired,
    EntityTokenRevoked,
    Other(i32),
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::Success => 0,
            ErrorCode::Unknown => 1,
            ErrorCode::ConnectionError => 2,
            ErrorCode::JsonParseError => 3,
            ErrorCode::InvalidParams => 1000,
            ErrorCode::ItemNotFound => 1047,
            ErrorCode::NotAuthenticated => 1074,
            ErrorCode::NotAuthorized => 1089,
            ErrorCode::DatabaseThroughputExceeded => 1113,
            ErrorCode::ServiceUnavailable => 1123,
            ErrorCode::EntityTokenMissing => 1333,
            ErrorCode::EntityTokenInvalid => 1334,
            ErrorCode::EntityTokenExpired => 1335,
            ErrorCode::EntityTokenRevoked => 1336,
            ErrorCode::Other(code) => code,
        }
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        match code {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ConnectionError,
            3 => ErrorCode::JsonParseError,
            1000 => ErrorCode::InvalidParams,
            1047 => ErrorCode::ItemNotFound,
            1074 => ErrorCode::NotAuthenticated,
            1089 => ErrorCode::NotAuthorized,
            1113 => ErrorCode::DatabaseThroughputExceeded,
            1123 => ErrorCode::ServiceUnavailable,
            1333 => ErrorCode::EntityTokenMissing,
            1334 => ErrorCode::EntityTokenInvalid,
            1335 => ErrorCode::EntityTokenExpired,
            1336 => ErrorCode::EntityTokenRevoked,
            other => ErrorCode::Other(other),
        }
    }
}

/// Uniform description of a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// HTTP status of the response, or -1 when no response was interpreted.
    pub http_code: i32,
    /// Status text reported by the service (e.g. `BadRequest`).
    pub http_status: String,
    pub error_code: ErrorCode,
    /// Symbolic error name reported by the service (e.g. `InvalidParams`).
    pub error_name: String,
    pub message: String,
    /// Per-field validation details, when the service sent any.
    pub error_details: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorInfo {
    pub fn new(http_code: i32, error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            http_code,
            http_status: String::new(),
            error_code,
            error_name: String::new(),
            message: message.into(),
            error_details: None,
        }
    }

    /// The service could not be reached.
    pub fn connection(message: impl Into<String>) -> Self {
        Self {
            http_status: "ServiceUnavailable".to_string(),
            error_name: "ConnectionError".to_string(),
            ..Self::new(503, ErrorCode::ConnectionError, message)
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(-1, ErrorCode::Unknown, message)
    }
}

/// Errors returned by every catalog call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No entity token is set on the session. Nothing was sent.
    #[error("no entity token set; authenticate before calling the catalog API")]
    MissingCredential,

    /// The request never got a response.
    #[error("transport failure: {}", .0.message)]
    TransportFailure(ErrorInfo),

    /// The service answered with a non-success status.
    #[error("API error {} {}: {}", .0.http_code, .0.error_name, .0.message)]
    Api(ErrorInfo),

    /// The exchange could not be interpreted, or the call itself faulted.
    #[error("unknown error: {message}")]
    Unknown { message: String },

    /// The client settings could not resolve a service URL.
    #[error("invalid settings: {0}")]
    Settings(String),
}

impl ApiError {
    pub fn unknown(message: impl Into<String>) -> Self {
        ApiError::Unknown {
            message: message.into(),
        }
    }

    /// The error in its uniform `ErrorInfo` shape.
    pub fn info(&self) -> ErrorInfo {
        match self {
            ApiError::MissingCredential => {
                ErrorInfo::new(-1, ErrorCode::EntityTokenMissing, self.to_string())
            }
            ApiError::TransportFailure(info) | ApiError::Api(info) => info.clone(),
            ApiError::Unknown { message } => ErrorInfo::unknown(message.clone()),
            ApiError::Settings(_) => ErrorInfo::unknown(self.to_string()),
        }
    }

    /// Whether the service itself produced this error.
    pub fn is_wire_error(&self) -> bool {
        matches!(self, ApiError::TransportFailure(_) | ApiError::Api(_))
    }

    pub fn error_code(&self) -> ErrorCode {
        self.info().error_code
    }
}
