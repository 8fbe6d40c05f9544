use crate::{
    Config, LookupError, RawPayload, WeatherRequest, WeatherResult,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A source of current conditions.
///
/// Fetching and decoding are split so the caller can apply its own status
/// policy between the two steps.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, request: &WeatherRequest) -> Result<RawPayload, LookupError>;

    fn parse(&self, payload: &RawPayload) -> Result<WeatherResult, LookupError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolved_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
             Hint: set API_KEY in the environment or a .env file, or run `weather configure`."
        )
    })?;

    let provider = OpenWeatherProvider::new(api_key, config.endpoint(), config.timeout())?;

    Ok(Box::new(provider))
}
