use tracing::{info, warn};

use crate::{
    Config, IconSet, LookupError, WeatherRequest,
    provider::{WeatherProvider, provider_from_config},
    view::{Conditions, ViewState},
};

/// Owns the provider and the view; one `search` per user query.
#[derive(Debug)]
pub struct Lookup {
    provider: Box<dyn WeatherProvider>,
    icons: IconSet,
    view: ViewState,
}

impl Lookup {
    pub fn new(provider: Box<dyn WeatherProvider>, icons: IconSet) -> Self {
        Self { provider, icons, view: ViewState::default() }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = provider_from_config(config)?;
        Ok(Self::new(provider, IconSet::new(config.assets_dir())))
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Look up `city` and re-render the view from the outcome.
    pub async fn search(&mut self, city: &str) -> Result<Conditions, LookupError> {
        let outcome = self.resolve(city).await;
        self.view.render(outcome.as_ref());
        outcome
    }

    async fn resolve(&self, city: &str) -> Result<Conditions, LookupError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(LookupError::EmptyCity);
        }

        let payload = self.provider.fetch(&WeatherRequest::new(city)).await?;
        if !payload.is_ok() {
            warn!(city, status = payload.status, "weather lookup failed");
            return Err(LookupError::LookupFailed { status: payload.status });
        }

        let result = self.provider.parse(&payload)?;
        let icon = self.icons.resolve(&result.condition)?;

        info!(
            city = %result.city,
            temperature_c = result.temperature_c,
            condition = %result.condition,
            "weather resolved"
        );

        Ok(Conditions { result, icon })
    }
}
