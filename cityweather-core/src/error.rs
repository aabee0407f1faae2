use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Closed classification of everything that can go wrong with a single query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    ServerError,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeout,
    ConnectionFailure,
    Timeout,
    TooManyRedirects,
    /// The body was not the JSON shape we expect, or its `cod` was not 200.
    MalformedResponse,
    Other,
}

impl ErrorKind {
    /// Map an HTTP status onto a kind. Statuses without a dedicated kind are `Other`.
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            500 => ErrorKind::ServerError,
            502 => ErrorKind::BadGateway,
            503 => ErrorKind::ServiceUnavailable,
            504 => ErrorKind::GatewayTimeout,
            _ => ErrorKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not_found",
            ErrorKind::ServerError => "server_error",
            ErrorKind::BadGateway => "bad_gateway",
            ErrorKind::ServiceUnavailable => "service_unavailable",
            ErrorKind::GatewayTimeout => "gateway_timeout",
            ErrorKind::ConnectionFailure => "connection_failure",
            ErrorKind::Timeout => "timeout",
            ErrorKind::TooManyRedirects => "too_many_redirects",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::Other => "other",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of one weather query.
///
/// `status` is set only when the server actually answered; transport failures never carry one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct WeatherError {
    pub kind: ErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl WeatherError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedResponse, message)
    }

    /// Build the error for a non-success HTTP response.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let body = truncate_body(body.trim());
        let message = if body.is_empty() {
            format!("HTTP status {status}")
        } else {
            format!("HTTP status {status}: {body}")
        };

        Self {
            kind: ErrorKind::from_status(status),
            message,
            status: Some(status.as_u16()),
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        // A connect timeout reports both `is_connect` and `is_timeout`; the deadline wins.
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::ConnectionFailure
        } else if err.is_redirect() {
            ErrorKind::TooManyRedirects
        } else {
            ErrorKind::Other
        };

        let status = err.status().map(|s| s.as_u16());

        // The request URL carries the API key.
        Self {
            kind,
            message: err.without_url().to_string(),
            status,
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::malformed(format!("unexpected response body: {err}"))
    }
}

/// Configuration problems detected before any request is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("WEATHER_API_KEY is not set or empty")]
    MissingApiKey,
    #[error("invalid endpoint URL '{0}'")]
    InvalidEndpoint(String),
    #[error("invalid timeout '{0}': expected a whole number of seconds")]
    InvalidTimeout(String),
    #[error("failed to load env file: {0}")]
    EnvFile(#[from] dotenv::Error),
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
