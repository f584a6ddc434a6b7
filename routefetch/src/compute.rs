use crate::{
    land,
    options::{Compute, LatLon},
    progress, report,
};
use anyhow::{anyhow, Result};
use exposure::{
    chrono::Utc,
    validate::{check_distances, measure_distances},
    Artifact, LocalPlane, Pipeline, Projection,
};
use log::info;
use std::io::{self, Write};

impl Compute {
    pub fn run(&self) -> Result<()> {
        let config = self.params.config()?;
        let catalog = self.params.catalog()?;
        let mut out = io::stdout().lock();

        // Port geometry is checked before any land is loaded.
        if !config.distance_checks.is_empty() {
            let reports = measure_distances(&catalog, &config.distance_checks)?;
            report::distances(&mut out, &reports)?;
            check_distances(&catalog, &config.distance_checks)?;
        }

        let origin = match &self.origin {
            Some(LatLon(coord)) => *coord,
            None => catalog
                .centroid()
                .ok_or_else(|| anyhow!("catalog has no ports"))?,
        };
        info!("projection origin; lat: {:.4}, lon: {:.4}", origin.y, origin.x);
        let plane = LocalPlane::new(origin);
        let region = land::region(
            catalog.ports().iter().map(|port| plane.forward(port.coord())),
            config.ray.max_range_m,
        )
        .ok_or_else(|| anyhow!("catalog has no ports"))?;
        let mask = land::load(&self.land, &plane, region)?;

        let pipeline = Pipeline::new(&config, &catalog, &mask, &plane)?;
        let pb = progress::bar(
            format!("Computing {}", config.model.algorithm()),
            catalog.routes().len() as u64,
        );
        let signatures = pipeline.compute_with(|sig| {
            pb.set_message(sig.route_id.clone());
            pb.inc(1);
        })?;
        pb.finish_and_clear();
        report::signatures(&mut out, &config.model, &signatures)?;

        if let Some(check) = &config.ordering_check {
            report::ordering(&mut out, &check.measure(&signatures)?)?;
        }
        out.flush()?;
        pipeline.verify(&signatures)?;

        Artifact::new(&config, &signatures, Utc::now()).write(&self.out)?;
        Ok(())
    }
}
