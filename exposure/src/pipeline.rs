use crate::{
    validate::{check_distances, DistanceReport, OrderingReport},
    Catalog, Config, ExposureError, ExposureSignature, LandMask, Projection,
};
use log::{info, warn};

/// Threads the immutable inputs of a run through each stage.
///
/// Stages are exposed separately so callers can inspect (or print)
/// signatures before the ordering check decides whether they are
/// trustworthy. [`Pipeline::run`] chains them.
pub struct Pipeline<'a> {
    config: &'a Config,
    catalog: &'a Catalog,
    mask: &'a dyn LandMask,
    projection: &'a dyn Projection,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        catalog: &'a Catalog,
        mask: &'a dyn LandMask,
        projection: &'a dyn Projection,
    ) -> Result<Self, ExposureError> {
        config.validate()?;
        if let Some(check) = &config.ordering_check {
            catalog.route(&check.more_exposed)?;
            catalog.route(&check.less_exposed)?;
        }
        Ok(Self {
            config,
            catalog,
            mask,
            projection,
        })
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Fatal precondition: every configured port pair must be a
    /// plausible distance apart.
    pub fn check_distances(&self) -> Result<Vec<DistanceReport>, ExposureError> {
        check_distances(self.catalog, &self.config.distance_checks)
    }

    /// Computes one signature per route, in catalog order.
    pub fn compute(&self) -> Result<Vec<ExposureSignature>, ExposureError> {
        self.compute_with(|_| {})
    }

    /// Like [`Pipeline::compute`], calling `on_route` after each route
    /// completes.
    pub fn compute_with<F>(&self, mut on_route: F) -> Result<Vec<ExposureSignature>, ExposureError>
    where
        F: FnMut(&ExposureSignature),
    {
        info!(
            "computing {} routes; model: {}, samples: {}, step_m: {}, max_range_m: {}",
            self.catalog.routes().len(),
            self.config.model.algorithm(),
            self.config.samples,
            self.config.ray.step_m,
            self.config.ray.max_range_m
        );
        self.catalog
            .routes()
            .iter()
            .map(|route| {
                let signature = ExposureSignature::builder()
                    .route(route)
                    .samples(self.config.samples)
                    .ray(self.config.ray)
                    .model(self.config.model)
                    .build(self.catalog, self.mask, self.projection)?;
                on_route(&signature);
                Ok(signature)
            })
            .collect()
    }

    /// Post-hoc plausibility check. `Ok(None)` if no ordering check is
    /// configured.
    pub fn verify(
        &self,
        signatures: &[ExposureSignature],
    ) -> Result<Option<OrderingReport>, ExposureError> {
        self.config
            .ordering_check
            .as_ref()
            .map(|check| check.check(signatures))
            .transpose()
    }

    /// Distance checks, computation, then verification.
    ///
    /// When verification fails the computed aggregates are logged at
    /// `warn` level for diagnosis and the error is returned.
    pub fn run(&self) -> Result<Vec<ExposureSignature>, ExposureError> {
        self.check_distances()?;
        let signatures = self.compute()?;
        if let Err(e) = self.verify(&signatures) {
            for sig in &signatures {
                warn!(
                    "unverified; route: {}, aggregate: {:.3}, top: {:?}",
                    sig.route_id, sig.aggregate, sig.top
                );
            }
            return Err(e);
        }
        Ok(signatures)
    }
}
