use serde::{Deserialize, Serialize};

/// Discrete presentation category derived from a temperature.
///
/// Never stored; recomputed on demand from the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationBand {
    Cold,
    Moderate,
    Hot,
}

impl PresentationBand {
    pub fn as_str(self) -> &'static str {
        match self {
            PresentationBand::Cold => "cold",
            PresentationBand::Moderate => "moderate",
            PresentationBand::Hot => "hot",
        }
    }
}

impl std::fmt::Display for PresentationBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a temperature in Celsius to its presentation band.
///
/// Boundary values 20 and 35 are Moderate.
pub fn classify(temperature_c: f64) -> PresentationBand {
    if temperature_c < 20.0 {
        PresentationBand::Cold
    } else if temperature_c > 35.0 {
        PresentationBand::Hot
    } else {
        PresentationBand::Moderate
    }
}
