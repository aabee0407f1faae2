use serde::Serialize;
use serde_json::Value;

use crate::{condition, error::WeatherError};

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Format a Celsius reading as a whole degree, rounding half away from zero.
pub fn format_celsius(celsius: f64) -> String {
    // `as i64` also folds -0.0 into 0.
    format!("{}°C", celsius.round() as i64)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

/// Interpreted current conditions for one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherResult {
    pub temperature_celsius: f64,
    pub condition_code: i64,
    pub description: String,
}

impl WeatherResult {
    pub fn temperature_label(&self) -> String {
        format_celsius(self.temperature_celsius)
    }

    pub fn emoji(&self) -> &'static str {
        condition::emoji(self.condition_code)
    }

    pub fn display(&self) -> WeatherDisplay {
        WeatherDisplay {
            temperature: self.temperature_label(),
            emoji: self.emoji(),
            description: self.description.clone(),
        }
    }
}

/// What a front end shows for a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherDisplay {
    pub temperature: String,
    pub emoji: &'static str,
    pub description: String,
}

/// Body of an HTTP-success response whose payload `cod` was confirmed to be 200.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPayload(Value);

impl RawPayload {
    /// Parse a response body and check the payload-level status code.
    pub fn from_body(body: &str) -> Result<Self, WeatherError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, WeatherError> {
        match payload_code(&value) {
            Some(200) => Ok(Self(value)),
            Some(other) => Err(WeatherError::malformed(format!(
                "payload reported cod {other} instead of 200"
            ))),
            None => Err(WeatherError::malformed("payload has no usable `cod` field")),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// The provider sends `cod` as a number on success and as a string on some errors.
fn payload_code(value: &Value) -> Option<i64> {
    match value.get("cod")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
