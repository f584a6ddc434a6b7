//! Reductions from per-sample fetch measurements to a 0..1 score.

use crate::{math::median, ExposureError, RayConfig, C};
use serde::{Deserialize, Serialize};

/// How one direction's raw measurements become a score.
///
/// Both models reduce the same measurements, so switching between
/// them never touches sampling or ray casting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ScoreModel {
    /// `ln(median_km + 1) / ln(max_km + 1)`: smooth, with
    /// diminishing returns for long fetch.
    LogFetch,

    /// Fraction of sample points whose ray travels further than
    /// `threshold_m` before reaching land.
    ShelterThreshold { threshold_m: C },
}

/// One direction's reduced measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectionScore {
    /// Dimensionless, in `[0, 1]`.
    pub score: C,

    /// Median of the range-capped raw measurements (km).
    pub distance_km: C,
}

impl ScoreModel {
    /// Checks the model against the ray range it will reduce.
    ///
    /// A shelter threshold must lie strictly inside the range: a ray
    /// capped at `max_range_m` only means "at least this far", so it
    /// can never be judged sheltered.
    pub fn validate(&self, ray: &RayConfig) -> Result<(), ExposureError> {
        match *self {
            Self::LogFetch => Ok(()),
            Self::ShelterThreshold { threshold_m }
                if !(threshold_m.is_finite() && threshold_m > 0.0) =>
            {
                Err(ExposureError::config(format!(
                    "shelter threshold must be positive, got {threshold_m} m"
                )))
            }
            Self::ShelterThreshold { threshold_m } if threshold_m >= ray.max_range_m => {
                Err(ExposureError::config(format!(
                    "shelter threshold ({threshold_m} m) must be shorter than the ray range ({} m)",
                    ray.max_range_m
                )))
            }
            Self::ShelterThreshold { .. } => Ok(()),
        }
    }

    /// Reduces one direction's raw ray lengths (meters, one per
    /// sample point).
    pub fn reduce(&self, raw_m: &[C], ray: &RayConfig) -> Result<DirectionScore, ExposureError> {
        let capped_km: Vec<C> = raw_m
            .iter()
            .map(|&d| d.min(ray.max_range_m) / 1000.0)
            .collect();
        let distance_km = median(&capped_km)
            .ok_or_else(|| ExposureError::config("no measurements to reduce"))?;
        let score = match *self {
            Self::LogFetch => log_fetch(distance_km, ray.max_range_km()),
            Self::ShelterThreshold { threshold_m } => shelter_ratio(raw_m, threshold_m),
        };
        Ok(DirectionScore { score, distance_km })
    }

    /// Short name used in logs and the output record.
    pub fn algorithm(&self) -> &'static str {
        match self {
            Self::LogFetch => "fetch",
            Self::ShelterThreshold { .. } => "shelter_signature",
        }
    }
}

/// Log-scaled fetch score, clamped to `[0, 1]`.
pub fn log_fetch(distance_km: C, max_fetch_km: C) -> C {
    let score = (distance_km + 1.0).ln() / (max_fetch_km + 1.0).ln();
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// `1 - sheltered / total`, where a measurement is sheltered if land
/// was found within `threshold_m` (inclusive).
#[allow(clippy::cast_precision_loss)]
pub fn shelter_ratio(raw_m: &[C], threshold_m: C) -> C {
    if raw_m.is_empty() {
        return 0.0;
    }
    let sheltered = raw_m.iter().filter(|&&d| d <= threshold_m).count();
    1.0 - sheltered as C / raw_m.len() as C
}

#[cfg(test)]
mod tests {
    use super::{log_fetch, shelter_ratio, DirectionScore, ScoreModel};
    use crate::{ExposureError, RayConfig};
    use approx::assert_relative_eq;

    #[test]
    fn test_log_fetch_bounds() {
        assert_eq!(log_fetch(0.0, 50.0), 0.0);
        assert_eq!(log_fetch(50.0, 50.0), 1.0);
        assert_eq!(log_fetch(80.0, 50.0), 1.0);
        assert_relative_eq!(log_fetch(10.0, 50.0), 11.0_f64.ln() / 51.0_f64.ln());
    }

    #[test]
    fn test_log_fetch_monotonic() {
        let scores: Vec<f64> = (0..=300).map(|d| log_fetch(f64::from(d) * 0.1, 30.0)).collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_shelter_ratio() {
        assert_eq!(shelter_ratio(&[100.0, 2_000.0, 3_000.0], 3_000.0), 0.0);
        assert_eq!(shelter_ratio(&[3_050.0, 30_000.0], 3_000.0), 1.0);
        assert_relative_eq!(shelter_ratio(&[100.0, 30_000.0, 30_000.0, 500.0], 3_000.0), 0.5);
    }

    #[test]
    fn test_reduce_reports_median_alongside_ratio() {
        let ray = RayConfig::new(50.0, 30_000.0).unwrap();
        let model = ScoreModel::ShelterThreshold { threshold_m: 3_000.0 };
        let raw = [1_000.0, 2_000.0, 30_000.0, 30_000.0, 30_000.0];
        let DirectionScore { score, distance_km } = model.reduce(&raw, &ray).unwrap();
        assert_relative_eq!(score, 0.6);
        assert_relative_eq!(distance_km, 30.0);
    }

    #[test]
    fn test_reduce_log_fetch() {
        let ray = RayConfig::new(100.0, 50_000.0).unwrap();
        let raw = [50_000.0, 10_000.0, 10_000.0];
        let DirectionScore { score, distance_km } = ScoreModel::LogFetch.reduce(&raw, &ray).unwrap();
        assert_relative_eq!(distance_km, 10.0);
        assert_relative_eq!(score, 11.0_f64.ln() / 51.0_f64.ln());
    }

    #[test]
    fn test_validate() {
        let ray = RayConfig::new(50.0, 30_000.0).unwrap();
        assert!(ScoreModel::LogFetch.validate(&ray).is_ok());
        assert!(ScoreModel::ShelterThreshold { threshold_m: 3_000.0 }
            .validate(&ray)
            .is_ok());
        assert!(matches!(
            ScoreModel::ShelterThreshold { threshold_m: 0.0 }.validate(&ray),
            Err(ExposureError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_threshold_must_be_inside_range() {
        let short = RayConfig::new(50.0, 3_000.0).unwrap();
        for threshold_m in [3_000.0, 5_000.0] {
            assert!(matches!(
                ScoreModel::ShelterThreshold { threshold_m }.validate(&short),
                Err(ExposureError::InvalidConfiguration(_))
            ));
        }
        assert!(ScoreModel::ShelterThreshold { threshold_m: 2_950.0 }
            .validate(&short)
            .is_ok());
        assert!(ScoreModel::LogFetch.validate(&short).is_ok());
    }

    #[test]
    fn test_serde_tag() {
        let model: ScoreModel =
            serde_json::from_str(r#"{"model":"shelter_threshold","threshold_m":3000.0}"#).unwrap();
        assert_eq!(model, ScoreModel::ShelterThreshold { threshold_m: 3_000.0 });
        let model: ScoreModel = serde_json::from_str(r#"{"model":"log_fetch"}"#).unwrap();
        assert_eq!(model, ScoreModel::LogFetch);
    }
}
