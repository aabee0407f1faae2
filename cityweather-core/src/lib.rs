//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Configuration (API key, endpoint, timeout)
//! - The OpenWeather fetcher and its error classification
//! - Interpretation of the current-weather payload (Kelvin to Celsius, condition emoji)
//! - Display models for results, errors and the overall view state
//!
//! It is used by `cityweather-cli`, but any front end (a GUI included) can drive it with a
//! city string and render the returned [`ViewState`].

pub mod condition;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod interpret;
pub mod model;
pub mod present;
pub mod view;

pub use condition::{Condition, emoji};
pub use config::{Config, load_dotenv};
pub use error::{ConfigError, ErrorKind, WeatherError};
pub use fetcher::OpenWeatherClient;
pub use interpret::interpret;
pub use model::{RawPayload, WeatherDisplay, WeatherQuery, WeatherResult};
pub use present::{DisplayText, present};
pub use view::ViewState;
