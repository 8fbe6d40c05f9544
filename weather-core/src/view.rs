use serde::Serialize;
use std::{fmt, path::PathBuf};

use crate::{LookupError, WeatherResult};

pub const NOT_FOUND_MESSAGE: &str = "City not found. Please try again.";

/// A decoded result together with the icon file chosen for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    pub result: WeatherResult,
    pub icon: PathBuf,
}

/// What the user currently sees. Either the weather fields or a message, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ViewState {
    pub fn render(&mut self, outcome: Result<&Conditions, &LookupError>) {
        match outcome {
            Ok(conditions) => {
                let r = &conditions.result;
                *self = ViewState {
                    city: Some(r.city.clone()),
                    temperature: Some(format!("{}°c | {}", r.temperature_c, r.description)),
                    humidity: Some(format!("{}%", r.humidity_pct)),
                    wind: Some(format!("{}km/h", format_speed(r.wind_speed))),
                    icon: Some(conditions.icon.clone()),
                    message: None,
                };
            }
            Err(err) if err.is_not_found() => {
                *self = ViewState { message: Some(NOT_FOUND_MESSAGE.to_string()), ..Default::default() };
            }
            Err(err) => {
                *self = ViewState { message: Some(failure_message(err)), ..Default::default() };
            }
        }
    }

    pub fn shows_weather(&self) -> bool {
        self.temperature.is_some()
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = &self.message {
            return writeln!(f, "{message}");
        }

        if let Some(city) = &self.city {
            writeln!(f, "{city}")?;
        }
        if let Some(temperature) = &self.temperature {
            writeln!(f, "{temperature}")?;
        }
        if let Some(humidity) = &self.humidity {
            writeln!(f, "Humidity:   {humidity}")?;
        }
        if let Some(wind) = &self.wind {
            writeln!(f, "Wind Speed: {wind}")?;
        }
        if let Some(icon) = &self.icon {
            writeln!(f, "Icon:       {}", icon.display())?;
        }

        Ok(())
    }
}

fn failure_message(err: &LookupError) -> String {
    if err.is_after_fetch() {
        format!("Unable to display weather: {err}")
    } else {
        format!("Unable to fetch weather: {err}")
    }
}

/// Shortest decimal form, but whole numbers keep one fractional digit (`4.0`, not `4`).
fn format_speed(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
