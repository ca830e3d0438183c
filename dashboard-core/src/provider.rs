use crate::{Config, WeatherSnapshot, provider::mock::MockProvider};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod mock;

/// Retrieval failure reported by a provider. The reason is
/// provider-defined and surfaced to the user unmodified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct ProviderError {
    pub reason: String,
}

impl ProviderError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Mock,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Mock => "mock",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Mock]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "mock" => Ok(ProviderId::Mock),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: mock."
            )),
        }
    }
}

/// Resolves a city name to current weather conditions. The core is
/// agnostic to whether this is the mock generator or a real client.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, city: &str) -> Result<WeatherSnapshot, ProviderError>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(id: ProviderId, config: &Config) -> Box<dyn WeatherProvider> {
    match id {
        ProviderId::Mock => Box::new(match config.mock_seed {
            Some(seed) => MockProvider::seeded(seed),
            None => MockProvider::new(),
        }),
    }
}

/// Construct the configured provider, falling back to the mock generator
/// when none is set.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = config.provider_id()?;
    Ok(provider_from_config(id, config))
}
