use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{RawPayload, WeatherResult, kelvin_to_celsius},
};

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: i64,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
}

/// Turn a confirmed-success payload into a [`WeatherResult`].
///
/// Only the first entry of `weather` is used. Missing or mistyped fields are reported as
/// [`ErrorKind::MalformedResponse`](crate::ErrorKind::MalformedResponse).
pub fn interpret(payload: &RawPayload) -> Result<WeatherResult, WeatherError> {
    let parsed = OwCurrentResponse::deserialize(payload.as_value())?;

    let weather = parsed
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::malformed("payload contained no weather entries"))?;

    Ok(WeatherResult {
        temperature_celsius: kelvin_to_celsius(parsed.main.temp),
        condition_code: weather.id,
        description: weather.description,
    })
}
