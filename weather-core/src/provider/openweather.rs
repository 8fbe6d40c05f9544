use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::{
    error::LookupError,
    model::{RawPayload, WeatherRequest, WeatherResult, round_temperature, title_case},
};

use super::WeatherProvider;

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, endpoint: String, timeout: Duration) -> Result<Self, LookupError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { api_key, endpoint, http })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, request: &WeatherRequest) -> Result<RawPayload, LookupError> {
        debug!(city = %request.city, endpoint = %self.endpoint, "requesting current weather");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", request.city.as_str()),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;

        debug!(status, bytes = body.len(), "received OpenWeather response");

        Ok(RawPayload { status, body })
    }

    fn parse(&self, payload: &RawPayload) -> Result<WeatherResult, LookupError> {
        parse_current(&payload.body)
    }
}

/// Decode an OpenWeather current-weather body into a display-ready result.
pub fn parse_current(body: &str) -> Result<WeatherResult, LookupError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;

    let weather = parsed.weather.into_iter().next().ok_or_else(|| {
        LookupError::MalformedResponse(serde::de::Error::custom("`weather` array is empty"))
    })?;

    Ok(WeatherResult {
        city: parsed.name,
        temperature_c: round_temperature(parsed.main.temp),
        humidity_pct: parsed.main.humidity,
        wind_speed: parsed.wind.speed,
        description: title_case(&weather.description),
        condition: weather.main.to_lowercase(),
    })
}
