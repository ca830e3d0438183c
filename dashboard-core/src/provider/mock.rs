use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::model::WeatherSnapshot;

use super::{ProviderError, WeatherProvider};

/// Stand-in for a real weather API: answers every city with plausible
/// random conditions. Temperature is uniform in 10..40 degC, humidity
/// in 0..=100; description and icon are fixed.
#[derive(Debug)]
pub struct MockProvider {
    rng: Mutex<StdRng>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self { rng: Mutex::new(StdRng::from_entropy()) }
    }

    /// Seeded variant for reproducible demo output and tests.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for MockProvider {
    async fn fetch(&self, city: &str) -> Result<WeatherSnapshot, ProviderError> {
        let (temperature_c, humidity_pct) = {
            let mut rng = self.rng.lock();
            (rng.gen_range(10.0..40.0), rng.gen_range(0..=100))
        };

        Ok(WeatherSnapshot {
            city: city.to_string(),
            temperature_c,
            humidity_pct,
            description: "Partly cloudy".to_string(),
            icon: "02d".to_string(),
            fetched_at: Utc::now(),
        })
    }
}
