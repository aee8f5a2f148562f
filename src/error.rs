//! Unified error handling for the SnapVault dashboard client
//!
//! Every failure carries a stable code so terminal output can be matched
//! against documentation and logs:
//! - S2XX: Network and API errors
//! - S4XX: Configuration errors
//! - S5XX: Validation and input errors
//! - S7XX: Resource errors
//! - S8XX: UI and interaction errors
//! - S9XX: Internal errors

use std::fmt;
use thiserror::Error;

/// Unified Result type for all dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Network (S2XX)
    /// S201: HTTP request failed
    HttpError,
    /// S202: Connection timeout
    ConnectionTimeout,
    /// S204: Connection refused
    ConnectionRefused,
    /// S205: API returned a non-success status
    ApiError,
    /// S206: Response body did not match the expected shape
    InvalidResponse,
    /// S207: Request abandoned because its view went away
    RequestCancelled,

    // Configuration (S4XX)
    /// S401: Configuration error
    ConfigError,
    /// S402: Invalid backend URL
    InvalidEndpoint,

    // Validation (S5XX)
    /// S501: Invalid input
    InvalidInput,

    // Resource (S7XX)
    /// S705: Resource not found
    ResourceNotFound,
    /// S706: No view is registered for a path
    RouteNotFound,

    // UI (S8XX)
    /// S801: Dialog error
    DialogError,
    /// S802: User cancelled
    UserCancelled,

    // Internal (S9XX)
    /// S902: Serialization error
    SerializationError,
    /// S903: File or IO error
    IoError,
}

impl ErrorCode {
    pub fn code(&self) -> u16 {
        match self {
            ErrorCode::HttpError => 201,
            ErrorCode::ConnectionTimeout => 202,
            ErrorCode::ConnectionRefused => 204,
            ErrorCode::ApiError => 205,
            ErrorCode::InvalidResponse => 206,
            ErrorCode::RequestCancelled => 207,

            ErrorCode::ConfigError => 401,
            ErrorCode::InvalidEndpoint => 402,

            ErrorCode::InvalidInput => 501,

            ErrorCode::ResourceNotFound => 705,
            ErrorCode::RouteNotFound => 706,

            ErrorCode::DialogError => 801,
            ErrorCode::UserCancelled => 802,

            ErrorCode::SerializationError => 902,
            ErrorCode::IoError => 903,
        }
    }

    /// Get the string code (e.g., "S205")
    pub fn as_str(&self) -> String {
        format!("S{}", self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

/// Main error type for all dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    // ==================== Network Errors (S2XX) ====================
    /// Transport failure before any status was received
    #[error("[{code}] Network error: {message}")]
    Network {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Backend answered with a non-success status
    #[error("[{code}] API error ({status}): {message}")]
    Api {
        code: ErrorCode,
        status: u16,
        message: String,
    },

    /// Request was abandoned through its cancellation token
    #[error("[{code}] Request cancelled: {endpoint}")]
    Cancelled { code: ErrorCode, endpoint: String },

    // ==================== Configuration Errors (S4XX) ====================
    #[error("[{code}] Configuration error: {message}")]
    Config {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<config::ConfigError>,
    },

    // ==================== Validation Errors (S5XX) ====================
    #[error("[{code}] Invalid input: {message}")]
    InvalidInput { code: ErrorCode, message: String },

    // ==================== Resource Errors (S7XX) ====================
    /// Backend answered 404, or no route matched
    #[error("[{code}] Not found: {resource}")]
    NotFound { code: ErrorCode, resource: String },

    // ==================== UI Errors (S8XX) ====================
    #[error("[{code}] UI error: {message}")]
    Ui { code: ErrorCode, message: String },

    // ==================== Internal Errors (S9XX) ====================
    #[error("[{code}] Serialization error: {message}")]
    Serialization {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("[{code}] {context}: {message}")]
    Io {
        code: ErrorCode,
        context: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

// ==================== Constructor Methods ====================

impl DashboardError {
    // --- Network ---

    /// Create network error from reqwest error
    pub fn network_from_reqwest(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            ErrorCode::ConnectionTimeout
        } else if err.is_connect() {
            ErrorCode::ConnectionRefused
        } else {
            ErrorCode::HttpError
        };

        Self::Network {
            code,
            message: err.to_string(),
            source: Some(err),
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            code: ErrorCode::ApiError,
            status,
            message: message.into(),
        }
    }

    /// Create invalid response error (body did not decode)
    pub fn invalid_response(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            code: ErrorCode::InvalidResponse,
            status,
            message: message.into(),
        }
    }

    pub fn cancelled(endpoint: impl Into<String>) -> Self {
        Self::Cancelled {
            code: ErrorCode::RequestCancelled,
            endpoint: endpoint.into(),
        }
    }

    // --- Configuration ---

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::ConfigError,
            message: message.into(),
            source: None,
        }
    }

    pub fn config_from_error(err: config::ConfigError) -> Self {
        Self::Config {
            code: ErrorCode::ConfigError,
            message: err.to_string(),
            source: Some(err),
        }
    }

    pub fn invalid_endpoint(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::InvalidEndpoint,
            message: message.into(),
            source: None,
        }
    }

    // --- Validation ---

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            code: ErrorCode::InvalidInput,
            message: message.into(),
        }
    }

    // --- Resource ---

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            code: ErrorCode::ResourceNotFound,
            resource: resource.into(),
        }
    }

    pub fn route_not_found(path: impl Into<String>) -> Self {
        Self::NotFound {
            code: ErrorCode::RouteNotFound,
            resource: path.into(),
        }
    }

    // --- UI ---

    pub fn user_cancelled() -> Self {
        Self::Ui {
            code: ErrorCode::UserCancelled,
            message: "Operation cancelled by user".to_string(),
        }
    }

    pub fn io(context: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            code: ErrorCode::IoError,
            context: context.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    // --- Utility Methods ---

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Network { code, .. } => *code,
            Self::Api { code, .. } => *code,
            Self::Cancelled { code, .. } => *code,
            Self::Config { code, .. } => *code,
            Self::InvalidInput { code, .. } => *code,
            Self::NotFound { code, .. } => *code,
            Self::Ui { code, .. } => *code,
            Self::Serialization { code, .. } => *code,
            Self::Io { code, .. } => *code,
        }
    }

    /// True for a backend 404 on a resource, false for unmatched routes
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound {
                code: ErrorCode::ResourceNotFound,
                ..
            }
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Api { .. })
    }

    /// HTTP status carried by the error, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } if *status != 0 => Some(*status),
            Self::NotFound {
                code: ErrorCode::ResourceNotFound,
                ..
            } => Some(404),
            _ => None,
        }
    }
}

// ==================== From Implementations ====================

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        Self::network_from_reqwest(err)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            code: ErrorCode::SerializationError,
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<config::ConfigError> for DashboardError {
    fn from(err: config::ConfigError) -> Self {
        Self::config_from_error(err)
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::io("IO operation", err)
    }
}

impl From<dialoguer::Error> for DashboardError {
    fn from(err: dialoguer::Error) -> Self {
        Self::Ui {
            code: ErrorCode::DialogError,
            message: format!("Dialog error: {}", err),
        }
    }
}
