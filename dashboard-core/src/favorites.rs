use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::storage::PersistentStore;

/// Storage key for the serialized favorites list (a JSON string array).
pub const FAVORITES_KEY: &str = "favorites_cities";

/// Ordered set of favorited city names, persisted on every mutation.
///
/// Uniqueness is enforced and insertion order is preserved for display.
/// Mutations persist the full serialized set before the in-memory set
/// is committed, under one lock, so callers always observe either the
/// old set or the new one.
#[derive(Debug)]
pub struct FavoritesStore {
    store: Arc<dyn PersistentStore>,
    cities: Mutex<Vec<String>>,
}

impl FavoritesStore {
    /// Rehydrate the favorites set from `store`.
    ///
    /// Missing or malformed data degrades to the empty set; this is a
    /// recovery path, not a failure, and is never surfaced to callers.
    pub fn load(store: Arc<dyn PersistentStore>) -> Self {
        let cities = match store.read(FAVORITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(cities) => cities,
                Err(error) => {
                    tracing::warn!(%error, "malformed favorites data, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(%error, "unreadable favorites data, starting empty");
                Vec::new()
            }
        };

        Self { store, cities: Mutex::new(cities) }
    }

    /// Current favorites in insertion order.
    pub fn favorites(&self) -> Vec<String> {
        self.cities.lock().clone()
    }

    pub fn is_favorite(&self, city: &str) -> bool {
        self.cities.lock().iter().any(|c| c == city)
    }

    /// Append `city` if absent; idempotent if already present.
    pub fn add(&self, city: &str) -> Result<Vec<String>> {
        self.mutate(|cities| {
            let mut next = cities.to_vec();
            if !next.iter().any(|c| c == city) {
                next.push(city.to_string());
            }
            next
        })
    }

    /// Remove all occurrences of `city`; idempotent if absent.
    pub fn remove(&self, city: &str) -> Result<Vec<String>> {
        self.mutate(|cities| cities.iter().filter(|c| *c != city).cloned().collect())
    }

    /// Add `city` if absent, remove it if present. This is the operation
    /// the UI layer exposes on the favorite star.
    pub fn toggle(&self, city: &str) -> Result<Vec<String>> {
        self.mutate(|cities| {
            if cities.iter().any(|c| c == city) {
                cities.iter().filter(|c| *c != city).cloned().collect()
            } else {
                let mut next = cities.to_vec();
                next.push(city.to_string());
                next
            }
        })
    }

    /// Apply `f`, persist the result, then commit it in memory. A failed
    /// persistence write leaves the previous set in place.
    fn mutate(&self, f: impl FnOnce(&[String]) -> Vec<String>) -> Result<Vec<String>> {
        let mut cities = self.cities.lock();
        let next = f(&cities);

        if next == *cities {
            return Ok(next);
        }

        let serialized =
            serde_json::to_string(&next).context("Failed to serialize favorites list")?;
        self.store
            .write(FAVORITES_KEY, &serialized)
            .context("Failed to persist favorites list")?;

        *cities = next.clone();
        Ok(next)
    }
}
