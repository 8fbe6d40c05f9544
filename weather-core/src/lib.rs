//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & API key handling
//! - The provider seam and the OpenWeather implementation (fetch, decode)
//! - Icon selection and the view state a front end renders
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod icon;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod view;

pub use config::Config;
pub use error::LookupError;
pub use icon::IconSet;
pub use lookup::Lookup;
pub use model::{RawPayload, WeatherRequest, WeatherResult};
pub use provider::WeatherProvider;
pub use view::{Conditions, NOT_FOUND_MESSAGE, ViewState};
