//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - Shared domain models (weather snapshots, request lifecycle state)
//! - Abstraction over weather providers, plus the mock generator
//! - The persisted favorites list and its storage abstraction
//! - The temperature-to-presentation classifier
//!
//! It is used by `dashboard-cli`, but can also be reused by other
//! front ends (a GUI shell, a web service) that need the same state rules.

pub mod classify;
pub mod config;
pub mod controller;
pub mod favorites;
pub mod model;
pub mod provider;
pub mod storage;

pub use classify::{PresentationBand, classify};
pub use config::Config;
pub use controller::WeatherRequestController;
pub use favorites::FavoritesStore;
pub use model::{RequestState, WeatherSnapshot};
pub use provider::{ProviderError, ProviderId, WeatherProvider};
pub use storage::{FileStore, MemoryStore, PersistentStore};
