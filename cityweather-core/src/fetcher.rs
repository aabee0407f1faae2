use reqwest::{Client, Url};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::Config,
    error::{ErrorKind, WeatherError},
    interpret::interpret,
    model::{RawPayload, WeatherQuery, WeatherResult},
};

/// Client for the OpenWeather current-weather endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    config: Config,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(config: Config) -> Result<Self, WeatherError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Full request URL with `q` and `appid` set.
    pub fn request_url(&self, city: &str) -> Url {
        let mut url = self.config.endpoint().clone();
        url.query_pairs_mut()
            .append_pair("q", city)
            .append_pair("appid", self.config.api_key());
        url
    }

    /// Fetch the raw payload for `city`. No retries.
    #[instrument(skip(self))]
    pub async fn fetch(&self, city: &str) -> Result<RawPayload, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::new(ErrorKind::BadRequest, "city name is empty"));
        }

        let url = self.request_url(city);
        debug!(url = %redact(&url), "Requesting current weather");

        let res = match self.http.get(url).send().await {
            Ok(res) => res,
            Err(e) => {
                let err = WeatherError::from(e);
                warn!(kind = %err.kind, error = %err.message, "No response received");
                return Err(err);
            }
        };

        let status = res.status();
        if !status.is_success() {
            // The status alone decides the kind; a broken body only loses detail.
            let body = res.text().await.unwrap_or_default();
            let err = WeatherError::from_status(status, &body);
            warn!(kind = %err.kind, %status, "Weather request rejected");
            return Err(err);
        }

        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "Received response");

        RawPayload::from_body(&body)
    }

    /// Fetch and interpret in one step.
    #[instrument(skip(self, query), fields(city = %query.city))]
    pub async fn lookup(&self, query: &WeatherQuery) -> Result<WeatherResult, WeatherError> {
        let payload = self.fetch(&query.city).await?;
        let result = interpret(&payload)?;

        info!(
            code = result.condition_code,
            temperature = %result.temperature_label(),
            "Weather lookup succeeded"
        );

        Ok(result)
    }
}

/// Copy of `url` with the API key masked, for logging.
fn redact(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "appid" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}
