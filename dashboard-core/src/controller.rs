use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    model::RequestState,
    provider::WeatherProvider,
};

/// Sequences the lifecycle of a single in-flight weather lookup.
///
/// Overlapping searches are resolved by a generation counter: each call
/// to [`search`](Self::search) captures the generation at issue time,
/// and a provider response is applied only while that generation is
/// still current. The last-issued search therefore wins regardless of
/// the order responses arrive in; a superseded response is dropped
/// silently. No cancellation is sent to the provider itself.
#[derive(Debug)]
pub struct WeatherRequestController {
    provider: Arc<dyn WeatherProvider>,
    state: Mutex<RequestState>,
    generation: AtomicU64,
}

impl WeatherRequestController {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            state: Mutex::new(RequestState::Idle),
            generation: AtomicU64::new(0),
        }
    }

    /// Look up current weather for `city`.
    ///
    /// Transitions to `Loading`, awaits the provider, then transitions
    /// to `Success` or `Failure` unless a newer search has been issued
    /// in the meantime. Returns the state observable after completion.
    ///
    /// Callers are expected to reject empty or blank city names before
    /// invoking this; the controller does not validate input.
    pub async fn search(&self, city: &str) -> RequestState {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        *self.state.lock() = RequestState::Loading;
        tracing::debug!(city, generation, "weather lookup started");

        let result = self.provider.fetch(city).await;

        let mut state = self.state.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(city, generation, "superseded response discarded");
            return state.clone();
        }

        *state = match result {
            Ok(snapshot) => RequestState::Success(snapshot),
            Err(error) => RequestState::Failure(error.reason),
        };

        state.clone()
    }

    /// Read-only snapshot of the active state; no side effects.
    pub fn current_state(&self) -> RequestState {
        self.state.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::WeatherSnapshot,
        provider::{ProviderError, mock::MockProvider},
    };
    use async_trait::async_trait;
    use chrono::Utc;
    use std::{collections::HashMap, time::Duration};

    fn snapshot(city: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            city: city.to_string(),
            temperature_c: 18.0,
            humidity_pct: 55,
            description: "Partly cloudy".to_string(),
            icon: "02d".to_string(),
            fetched_at: Utc::now(),
        }
    }

    /// Provider double with a scripted delay and outcome per city.
    #[derive(Debug, Default)]
    struct ScriptedProvider {
        responses: HashMap<String, (Duration, Result<WeatherSnapshot, ProviderError>)>,
    }

    impl ScriptedProvider {
        fn respond(
            mut self,
            city: &str,
            delay: Duration,
            result: Result<WeatherSnapshot, ProviderError>,
        ) -> Self {
            self.responses.insert(city.to_string(), (delay, result));
            self
        }
    }

    #[async_trait]
    impl WeatherProvider for ScriptedProvider {
        async fn fetch(&self, city: &str) -> Result<WeatherSnapshot, ProviderError> {
            let (delay, result) = self
                .responses
                .get(city)
                .cloned()
                .unwrap_or_else(|| panic!("no scripted response for {city}"));

            tokio::time::sleep(delay).await;
            result
        }
    }

    #[tokio::test]
    async fn starts_idle() {
        let controller = WeatherRequestController::new(Arc::new(MockProvider::seeded(1)));
        assert_eq!(controller.current_state(), RequestState::Idle);
    }

    #[tokio::test]
    async fn successful_search_lands_in_success() {
        let provider = ScriptedProvider::default().respond(
            "Paris",
            Duration::ZERO,
            Ok(snapshot("Paris")),
        );
        let controller = WeatherRequestController::new(Arc::new(provider));

        let state = controller.search("Paris").await;
        assert_eq!(state.snapshot().map(|s| s.city.as_str()), Some("Paris"));
        assert_eq!(controller.current_state(), state);
    }

    #[tokio::test]
    async fn provider_failure_lands_in_failure_with_reason() {
        let provider = ScriptedProvider::default().respond(
            "Nowhere",
            Duration::ZERO,
            Err(ProviderError::new("city not found")),
        );
        let controller = WeatherRequestController::new(Arc::new(provider));

        let state = controller.search("Nowhere").await;
        assert_eq!(state.failure_reason(), Some("city not found"));
    }

    #[tokio::test]
    async fn failure_then_success_transitions_cleanly() {
        let provider = ScriptedProvider::default()
            .respond("Nowhere", Duration::ZERO, Err(ProviderError::new("city not found")))
            .respond("Paris", Duration::ZERO, Ok(snapshot("Paris")));
        let controller = WeatherRequestController::new(Arc::new(provider));

        controller.search("Nowhere").await;
        assert_eq!(controller.current_state().failure_reason(), Some("city not found"));

        controller.search("Paris").await;
        let state = controller.current_state();
        assert_eq!(state.snapshot().map(|s| s.city.as_str()), Some("Paris"));
    }

    #[tokio::test(start_paused = true)]
    async fn late_response_of_superseded_search_is_discarded() {
        // Rome is issued first but answers last; Milan must win.
        let provider = ScriptedProvider::default()
            .respond("Rome", Duration::from_millis(100), Ok(snapshot("Rome")))
            .respond("Milan", Duration::from_millis(10), Ok(snapshot("Milan")));
        let controller = WeatherRequestController::new(Arc::new(provider));

        let (rome_view, milan_view) =
            tokio::join!(controller.search("Rome"), controller.search("Milan"));

        let winner = controller.current_state();
        assert_eq!(winner.snapshot().map(|s| s.city.as_str()), Some("Milan"));

        // The superseded call observes the winner's state, not an error.
        assert_eq!(rome_view, winner);
        assert_eq!(milan_view, winner);
    }

    #[tokio::test(start_paused = true)]
    async fn superseding_failure_also_discards_stale_success() {
        let provider = ScriptedProvider::default()
            .respond("Rome", Duration::from_millis(100), Ok(snapshot("Rome")))
            .respond("Nowhere", Duration::from_millis(10), Err(ProviderError::new("city not found")));
        let controller = WeatherRequestController::new(Arc::new(provider));

        tokio::join!(controller.search("Rome"), controller.search("Nowhere"));

        assert_eq!(controller.current_state().failure_reason(), Some("city not found"));
    }
}
