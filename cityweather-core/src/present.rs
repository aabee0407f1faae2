use serde::Serialize;
use std::fmt;

use crate::error::{ErrorKind, WeatherError};

/// Human-facing rendering of a [`WeatherError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayText {
    pub title: String,
    pub explanation: String,
}

impl DisplayText {
    pub fn underlined_title(&self) -> String {
        underline_title(&self.title)
    }
}

impl fmt::Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.underlined_title(), self.explanation)
    }
}

/// `title` followed by a line of dashes of the same width.
pub fn underline_title(title: &str) -> String {
    format!("{title}\n{}", "-".repeat(title.chars().count()))
}

pub fn present(err: &WeatherError) -> DisplayText {
    let fixed = |title: &str, explanation: &str| DisplayText {
        title: title.to_string(),
        explanation: explanation.to_string(),
    };

    match err.kind {
        ErrorKind::BadRequest => fixed("Bad Request", "Please check your input"),
        ErrorKind::Unauthorized => fixed("Unauthorized", "Invalid API key"),
        ErrorKind::Forbidden => fixed("Forbidden", "Access is denied"),
        ErrorKind::NotFound => fixed("Not Found", "City not found"),
        ErrorKind::ServerError => fixed("Internal Server Error", "Please try again later"),
        ErrorKind::BadGateway => fixed("Bad Gateway", "Invalid response from the server"),
        ErrorKind::ServiceUnavailable => fixed("Service Unavailable", "Server is down"),
        ErrorKind::GatewayTimeout => fixed("Gateway Timeout", "No response from the server"),
        ErrorKind::ConnectionFailure => {
            fixed("Connection Error", "Check your internet connection")
        }
        ErrorKind::Timeout => fixed("Timeout Error", "The request timed out"),
        ErrorKind::TooManyRedirects => fixed("TooManyRedirects", "Check the URL"),
        ErrorKind::MalformedResponse => fixed("Malformed Response", &err.message),
        ErrorKind::Other if err.status.is_some() => fixed("HTTP error occurred", &err.message),
        ErrorKind::Other => fixed("Request Error", &err.message),
    }
}
