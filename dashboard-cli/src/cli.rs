use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Text};
use std::sync::Arc;

use dashboard_core::{
    Config, FavoritesStore, FileStore, ProviderId, WeatherRequestController,
    provider::default_provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "dashboard", version, about = "Weather dashboard")]
pub struct Cli {
    /// Defaults to the interactive dashboard when no subcommand is given.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the weather provider used for lookups.
    Configure {
        /// Provider short name, e.g. "mock".
        provider: String,

        /// Optional seed for the mock generator, for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show current weather for a city.
    Show {
        /// City name to look up.
        city: String,
    },

    /// Toggle a city on the favorites list.
    Favorite {
        /// City name to toggle.
        city: String,
    },

    /// List favorited cities in the order they were added.
    Favorites,

    /// Run the interactive dashboard loop.
    Dashboard,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command.unwrap_or(Command::Dashboard) {
            Command::Configure { provider, seed } => configure(&provider, seed),
            Command::Show { city } => Session::open()?.show(&city).await,
            Command::Favorite { city } => Session::open()?.favorite(&city),
            Command::Favorites => Session::open()?.list_favorites(),
            Command::Dashboard => Session::open()?.dashboard().await,
        }
    }
}

/// Persist the provider choice (and optional mock seed) to the config file.
fn configure(provider: &str, seed: Option<u64>) -> Result<()> {
    let id = ProviderId::try_from(provider)?;

    let mut config = Config::load()?;
    config.provider = Some(id.to_string());
    if seed.is_some() {
        config.mock_seed = seed;
    }
    config.save()?;

    println!("Provider set to {id}.");
    Ok(())
}

/// Runtime pieces shared by the weather-facing subcommands.
struct Session {
    favorites: FavoritesStore,
    controller: WeatherRequestController,
}

impl Session {
    fn open() -> Result<Self> {
        let config = Config::load()?;
        let provider = default_provider_from_config(&config)?;

        let store = Arc::new(FileStore::new(config.data_dir()?));
        let favorites = FavoritesStore::load(store);
        let controller = WeatherRequestController::new(Arc::from(provider));

        Ok(Self { favorites, controller })
    }

    async fn show(&self, city: &str) -> Result<()> {
        let city = validated_city(city)?;
        let state = self.controller.search(city).await;
        render::card(&state, self.favorites.is_favorite(city));
        Ok(())
    }

    fn favorite(&self, city: &str) -> Result<()> {
        let city = validated_city(city)?;
        let updated = self.favorites.toggle(city)?;
        render::favorites(&updated);
        Ok(())
    }

    fn list_favorites(&self) -> Result<()> {
        render::favorites(&self.favorites.favorites());
        Ok(())
    }

    async fn dashboard(&self) -> Result<()> {
        loop {
            let pinned = self.favorites.favorites();
            if !pinned.is_empty() {
                render::favorites(&pinned);
            }

            let Some(input) = Text::new("Search city:")
                .with_help_message("press Esc to quit")
                .prompt_skippable()?
            else {
                break;
            };

            let city = input.trim();
            if city.is_empty() {
                println!("Please enter a city name.");
                continue;
            }

            let state = self.controller.search(city).await;
            render::card(&state, self.favorites.is_favorite(city));

            if state.snapshot().is_some() {
                let verb = if self.favorites.is_favorite(city) { "Unpin" } else { "Pin" };
                let toggle = Confirm::new(&format!("{verb} {city}?"))
                    .with_default(false)
                    .prompt_skippable()?;

                if toggle == Some(true) {
                    self.favorites.toggle(city)?;
                }
            }
        }

        Ok(())
    }
}

/// Reject empty or blank city names before they reach the controller.
fn validated_city(raw: &str) -> Result<&str> {
    let city = raw.trim();
    if city.is_empty() {
        bail!("City name must not be empty.");
    }
    Ok(city)
}
