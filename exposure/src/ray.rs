//! Directional ray marching against a land mask.

use crate::{ExposureError, LandMask, C};
use geo::geometry::Coord;
use serde::{Deserialize, Serialize};

/// Slack for deciding whether `max_range_m` is a whole number of
/// steps, so 30 km / 50 m doesn't lose its last step to rounding.
const STEP_EPSILON: C = 1e-9;

/// Ray marching resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayConfig {
    /// Distance between containment tests (meters).
    pub step_m: C,

    /// Furthest distance tested (meters).
    pub max_range_m: C,
}

impl RayConfig {
    pub fn new(step_m: C, max_range_m: C) -> Result<Self, ExposureError> {
        let cfg = Self {
            step_m,
            max_range_m,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ExposureError> {
        if !(self.step_m.is_finite() && self.step_m > 0.0) {
            return Err(ExposureError::config(format!(
                "ray step must be positive, got {} m",
                self.step_m
            )));
        }
        if !(self.max_range_m.is_finite() && self.max_range_m > 0.0) {
            return Err(ExposureError::config(format!(
                "ray range must be positive, got {} m",
                self.max_range_m
            )));
        }
        if self.max_range_m < self.step_m {
            return Err(ExposureError::config(format!(
                "ray range ({} m) is shorter than one step ({} m)",
                self.max_range_m, self.step_m
            )));
        }
        Ok(())
    }

    /// Number of containment tests per ray.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn steps(&self) -> usize {
        (self.max_range_m / self.step_m + STEP_EPSILON).floor() as usize
    }

    pub fn max_range_km(&self) -> C {
        self.max_range_m / 1000.0
    }
}

/// Returns the unit vector (east, north) for a compass bearing in
/// degrees.
pub fn unit_vector(bearing_deg: C) -> Coord<C> {
    let (sin, cos) = bearing_deg.to_radians().sin_cos();
    Coord { x: sin, y: cos }
}

/// Returns the distance (meters) from `origin` along `bearing_deg`
/// to the first step that lands on land.
///
/// `origin` itself is never tested. If no step within
/// `cfg.max_range_m` hits land, returns exactly `cfg.max_range_m`,
/// which callers must read as "at least this far".
pub fn cast_to_land<M>(origin: Coord<C>, bearing_deg: C, mask: &M, cfg: &RayConfig) -> C
where
    M: LandMask + ?Sized,
{
    let dir = unit_vector(bearing_deg);
    (1..=cfg.steps())
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let dist_m = k as C * cfg.step_m;
            dist_m.min(cfg.max_range_m)
        })
        .find(|&dist_m| mask.contains(origin + dir * dist_m))
        .unwrap_or(cfg.max_range_m)
}
