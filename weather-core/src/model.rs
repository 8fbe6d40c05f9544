use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    pub city: String,
}

impl WeatherRequest {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

/// Undecoded provider answer: status code plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload {
    pub status: u16,
    pub body: String,
}

impl RawPayload {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Current conditions for one city, already normalised for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub city: String,
    /// Rounded half away from zero.
    pub temperature_c: i64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    /// Title-cased, e.g. "Light Rain".
    pub description: String,
    /// Lower-cased category, e.g. "clouds". Picks the icon.
    pub condition: String,
}

/// Upper-cases the first letter of each run of letters and lower-cases the rest.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_is_letter = false;

    for ch in input.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }

    out
}

/// Nearest integer, ties away from zero.
pub fn round_temperature(celsius: f64) -> i64 {
    celsius.round() as i64
}
