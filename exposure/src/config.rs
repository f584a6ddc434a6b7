use crate::{DistanceCheck, ExposureError, OrderingCheck, RayConfig, ScoreModel};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

/// Everything that parameterizes a run.
///
/// # Example
///
/// ```json
/// {
///   "samples": 50,
///   "step_m": 50.0,
///   "max_range_m": 30000.0,
///   "score": { "model": "shelter_threshold", "threshold_m": 3000.0 },
///   "distance_checks": [
///     { "origin": "hyannis", "destination": "nantucket", "min_km": 40.0, "max_km": 48.0 }
///   ],
///   "ordering_check": {
///     "more_exposed": "hy-nan-ssa",
///     "less_exposed": "wh-vh-ssa",
///     "min_margin": 0.2
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Points sampled along each route.
    pub samples: usize,

    #[serde(flatten)]
    pub ray: RayConfig,

    #[serde(rename = "score")]
    pub model: ScoreModel,

    /// Port pairs whose great circle distance must fall in a window
    /// before any rays are cast.
    #[serde(default)]
    pub distance_checks: Vec<DistanceCheck>,

    /// Relative exposure that must hold once all routes are scored.
    #[serde(default)]
    pub ordering_check: Option<OrderingCheck>,
}

impl Config {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ExposureError> {
        let rdr = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(rdr)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ExposureError> {
        if self.samples == 0 {
            return Err(ExposureError::config("sample count must be at least 1"));
        }
        self.ray.validate()?;
        self.model.validate(&self.ray)?;
        for check in &self.distance_checks {
            check.validate()?;
        }
        if let Some(check) = &self.ordering_check {
            check.validate()?;
        }
        Ok(())
    }
}
