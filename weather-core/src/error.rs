use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between reading a city name and rendering it.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The provider answered with anything other than `200 OK`.
    #[error("lookup failed with HTTP status {status}")]
    LookupFailed { status: u16 },

    #[error("malformed weather response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("no icon asset at {}", path.display())]
    MissingIcon { path: PathBuf },

    #[error("unusable weather condition {condition:?}")]
    InvalidCondition { condition: String },

    #[error("city name must not be empty")]
    EmptyCity,
}

impl LookupError {
    /// True for the failures the user sees as "city not found". A blank city
    /// never reaches the provider, which would have rejected it anyway.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::LookupFailed { .. } | LookupError::EmptyCity)
    }

    /// True when the provider answered but the answer couldn't be shown.
    pub fn is_after_fetch(&self) -> bool {
        matches!(
            self,
            LookupError::MalformedResponse(_)
                | LookupError::MissingIcon { .. }
                | LookupError::InvalidCondition { .. }
        )
    }
}
