use crate::{options::Distances, report};
use anyhow::Result;
use exposure::validate::{check_distances, measure_distances};
use std::io;

impl Distances {
    pub fn run(&self) -> Result<()> {
        let config = self.params.config()?;
        let catalog = self.params.catalog()?;
        let reports = measure_distances(&catalog, &config.distance_checks)?;
        report::distances(&mut io::stdout().lock(), &reports)?;
        check_distances(&catalog, &config.distance_checks)?;
        Ok(())
    }
}
