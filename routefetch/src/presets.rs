//! Built-in reference data: Cape Cod and Islands ferry routes.

use crate::options::{Params, Preset};
use anyhow::Result;
use exposure::{
    Catalog, Config, DistanceCheck, OrderingCheck, Port, RayConfig, Route, ScoreModel,
};
use serde::Deserialize;
use std::{fs::File, io::BufReader, path::Path};

const MORE_EXPOSED: &str = "hy-nan-ssa";
const LESS_EXPOSED: &str = "wh-vh-ssa";
const ORDERING_RATIONALE: &str = "the Nantucket Sound crossing is ~44 km over open water while \
     the Vineyard Sound crossing is ~10 km with partial shelter; the land mask may lack \
     resolution for the islands or the computation has an error";

pub fn ports() -> Vec<Port> {
    vec![
        Port::new("woods-hole", "Woods Hole", 41.5234, -70.6693),
        Port::new("hyannis", "Hyannis", 41.6362, -70.2826),
        Port::new("vineyard-haven", "Vineyard Haven", 41.4535, -70.6036),
        Port::new("oak-bluffs", "Oak Bluffs", 41.4571, -70.5566),
        Port::new("nantucket", "Nantucket", 41.2835, -70.0995),
    ]
}

pub fn routes() -> Vec<Route> {
    [
        ("wh-vh-ssa", "woods-hole", "vineyard-haven"),
        ("vh-wh-ssa", "vineyard-haven", "woods-hole"),
        ("wh-ob-ssa", "woods-hole", "oak-bluffs"),
        ("ob-wh-ssa", "oak-bluffs", "woods-hole"),
        ("hy-nan-ssa", "hyannis", "nantucket"),
        ("nan-hy-ssa", "nantucket", "hyannis"),
        ("hy-nan-hlc", "hyannis", "nantucket"),
        ("nan-hy-hlc", "nantucket", "hyannis"),
        ("hy-vh-hlc", "hyannis", "vineyard-haven"),
        ("vh-hy-hlc", "vineyard-haven", "hyannis"),
    ]
    .into_iter()
    .map(|(id, origin, dest)| Route::new(id, origin, dest))
    .collect()
}

pub fn distance_checks() -> Vec<DistanceCheck> {
    vec![
        DistanceCheck::new("woods-hole", "vineyard-haven", 8.0, 12.0).expected(10.0),
        DistanceCheck::new("woods-hole", "oak-bluffs", 8.0, 14.0).expected(11.0),
        DistanceCheck::new("hyannis", "nantucket", 40.0, 48.0).expected(44.0),
        // Great circle distance is ~33.6 km.
        DistanceCheck::new("hyannis", "vineyard-haven", 30.0, 40.0).expected(34.0),
    ]
}

impl Preset {
    pub fn config(self) -> Config {
        match self {
            Self::Fetch => Config {
                samples: 10,
                ray: RayConfig {
                    step_m: 100.0,
                    max_range_m: 50_000.0,
                },
                model: ScoreModel::LogFetch,
                distance_checks: vec![],
                ordering_check: Some(
                    OrderingCheck::new(MORE_EXPOSED, LESS_EXPOSED, 0.0)
                        .rationale(ORDERING_RATIONALE),
                ),
            },
            Self::Shelter => Config {
                samples: 50,
                ray: RayConfig {
                    step_m: 50.0,
                    max_range_m: 30_000.0,
                },
                model: ScoreModel::ShelterThreshold {
                    threshold_m: 3_000.0,
                },
                distance_checks: distance_checks(),
                ordering_check: Some(
                    OrderingCheck::new(MORE_EXPOSED, LESS_EXPOSED, 0.2)
                        .rationale(ORDERING_RATIONALE),
                ),
            },
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    ports: Vec<Port>,
    routes: Vec<Route>,
}

impl Params {
    /// Preset or config file, with command line overrides applied.
    pub fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => self.preset.config(),
        };
        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        if let Some(step_m) = self.step_m {
            config.ray.step_m = step_m;
        }
        if let Some(max_range_m) = self.max_range_m {
            config.ray.max_range_m = max_range_m;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn catalog(&self) -> Result<Catalog> {
        let (ports, routes) = match &self.catalog {
            Some(path) => read_catalog(path)?,
            None => (ports(), routes()),
        };
        Ok(Catalog::new(ports, routes)?)
    }
}

fn read_catalog(path: &Path) -> Result<(Vec<Port>, Vec<Route>)> {
    let rdr = BufReader::new(File::open(path)?);
    let CatalogFile { ports, routes } = serde_json::from_reader(rdr)?;
    Ok((ports, routes))
}
