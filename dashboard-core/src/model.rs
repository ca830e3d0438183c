use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fully-resolved weather result for one city at one point in time.
///
/// Immutable once constructed; each successful lookup replaces the
/// previous snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub temperature_c: f64,
    /// Relative humidity, 0..=100.
    pub humidity_pct: u8,
    pub description: String,
    pub icon: String,
    pub fetched_at: DateTime<Utc>,
}

/// Lifecycle of a single weather lookup. Exactly one variant is active
/// at a time; the only legal transitions are into `Loading` on a new
/// search and from `Loading` to `Success` or `Failure` on completion.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(WeatherSnapshot),
    Failure(String),
}

impl RequestState {
    /// The snapshot of the last successful lookup, if that is the active state.
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            RequestState::Success(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// The provider-supplied failure reason, if the last lookup failed.
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            RequestState::Failure(reason) => Some(reason.as_str()),
            _ => None,
        }
    }
}
