//! Geographic sanity checks.
//!
//! A wrong projection, a bearing sign error, or a land mask too
//! coarse to contain small islands all produce well-typed but
//! meaningless signatures. These checks compare against known
//! real-world geography before anything is published.

use crate::{Catalog, ExposureError, ExposureSignature, C};
use geo::{geometry::Point, HaversineDistance};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Expected great circle distance between two ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceCheck {
    pub origin: String,
    pub destination: String,
    pub min_km: C,
    pub max_km: C,
    /// Nominal distance, for reporting only.
    #[serde(default)]
    pub expected_km: Option<C>,
}

impl DistanceCheck {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        min_km: C,
        max_km: C,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            min_km,
            max_km,
            expected_km: None,
        }
    }

    #[must_use]
    pub fn expected(mut self, km: C) -> Self {
        self.expected_km = Some(km);
        self
    }

    pub fn validate(&self) -> Result<(), ExposureError> {
        let window_ok = self.min_km.is_finite()
            && self.max_km.is_finite()
            && self.min_km >= 0.0
            && self.min_km <= self.max_km;
        if window_ok {
            Ok(())
        } else {
            Err(ExposureError::config(format!(
                "invalid distance window [{}, {}] km for {} → {}",
                self.min_km, self.max_km, self.origin, self.destination
            )))
        }
    }

    /// Measures the pair without judging it.
    pub fn measure(&self, catalog: &Catalog) -> Result<DistanceReport, ExposureError> {
        let origin = Point::from(catalog.port(&self.origin)?.coord());
        let dest = Point::from(catalog.port(&self.destination)?.coord());
        let distance_km = origin.haversine_distance(&dest) / 1000.0;
        Ok(DistanceReport {
            check: self.clone(),
            distance_km,
        })
    }
}

/// Outcome of a [`DistanceCheck`].
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceReport {
    pub check: DistanceCheck,
    pub distance_km: C,
}

impl DistanceReport {
    pub fn passed(&self) -> bool {
        (self.check.min_km..=self.check.max_km).contains(&self.distance_km)
    }

    fn to_error(&self) -> ExposureError {
        ExposureError::GeometricPreconditionFailure {
            origin: self.check.origin.clone(),
            destination: self.check.destination.clone(),
            distance_km: self.distance_km,
            min_km: self.check.min_km,
            max_km: self.check.max_km,
        }
    }
}

/// Measures every pair, returning all reports so they can be shown
/// even when some fail.
pub fn measure_distances(
    catalog: &Catalog,
    checks: &[DistanceCheck],
) -> Result<Vec<DistanceReport>, ExposureError> {
    checks.iter().map(|check| check.measure(catalog)).collect()
}

/// Fails on the first pair outside its window.
pub fn check_distances(
    catalog: &Catalog,
    checks: &[DistanceCheck],
) -> Result<Vec<DistanceReport>, ExposureError> {
    let reports = measure_distances(catalog, checks)?;
    for report in &reports {
        debug!(
            "distance; {} → {}: {:.1} km",
            report.check.origin, report.check.destination, report.distance_km
        );
        if !report.passed() {
            return Err(report.to_error());
        }
    }
    info!("distance checks passed; pairs: {}", reports.len());
    Ok(reports)
}

/// `more_exposed` must be strictly more exposed than `less_exposed`,
/// by at least `min_margin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderingCheck {
    pub more_exposed: String,
    pub less_exposed: String,
    pub min_margin: C,
    /// Real-world geography explaining the expected ordering, shown
    /// when the check fails.
    #[serde(default)]
    pub rationale: String,
}

impl OrderingCheck {
    pub fn new(
        more_exposed: impl Into<String>,
        less_exposed: impl Into<String>,
        min_margin: C,
    ) -> Self {
        Self {
            more_exposed: more_exposed.into(),
            less_exposed: less_exposed.into(),
            min_margin,
            rationale: String::new(),
        }
    }

    #[must_use]
    pub fn rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }

    pub fn validate(&self) -> Result<(), ExposureError> {
        if self.min_margin.is_finite() && self.min_margin >= 0.0 {
            Ok(())
        } else {
            Err(ExposureError::config(format!(
                "ordering margin must be non-negative, got {}",
                self.min_margin
            )))
        }
    }

    /// Compares aggregate scores.
    pub fn measure(
        &self,
        signatures: &[ExposureSignature],
    ) -> Result<OrderingReport, ExposureError> {
        let find = |route_id: &str| {
            signatures
                .iter()
                .find(|sig| sig.route_id == route_id)
                .map(|sig| sig.aggregate)
                .ok_or_else(|| ExposureError::MissingReferenceData {
                    kind: "route",
                    key: route_id.to_owned(),
                })
        };
        Ok(OrderingReport {
            check: self.clone(),
            more_exposed_score: find(&self.more_exposed)?,
            less_exposed_score: find(&self.less_exposed)?,
        })
    }

    pub fn check(
        &self,
        signatures: &[ExposureSignature],
    ) -> Result<OrderingReport, ExposureError> {
        let report = self.measure(signatures)?;
        if report.passed() {
            info!(
                "ordering check passed; {} - {} = {:+.3}",
                self.more_exposed,
                self.less_exposed,
                report.difference()
            );
            Ok(report)
        } else {
            Err(report.to_error())
        }
    }
}

/// Outcome of an [`OrderingCheck`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingReport {
    pub check: OrderingCheck,
    pub more_exposed_score: C,
    pub less_exposed_score: C,
}

impl OrderingReport {
    pub fn difference(&self) -> C {
        self.more_exposed_score - self.less_exposed_score
    }

    pub fn passed(&self) -> bool {
        let difference = self.difference();
        difference > 0.0 && difference >= self.check.min_margin
    }

    fn to_error(&self) -> ExposureError {
        ExposureError::PlausibilityCheckFailure {
            more_exposed: self.check.more_exposed.clone(),
            more_exposed_score: self.more_exposed_score,
            less_exposed: self.check.less_exposed.clone(),
            less_exposed_score: self.less_exposed_score,
            difference: self.difference(),
            min_margin: self.check.min_margin,
            rationale: self.check.rationale.clone(),
        }
    }
}
