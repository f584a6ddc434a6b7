//! Versioned output record.
//!
//! The record's shape depends on the score model, since consumers
//! were written against one generation or the other:
//!
//! | model               | version | per-route fields                                                           |
//! |---------------------|---------|----------------------------------------------------------------------------|
//! | `log_fetch`         | `1.0`   | `exposure_by_dir`, `fetch_km_by_dir`, `avg_exposure`                       |
//! | `shelter_threshold` | `2.0`   | `shelter_ratio_by_dir`, `effective_open_fetch_km_by_dir`, `mean_shelter_ratio` |

use crate::{
    compass::{CompassDirection, DirectionMap, COMPASS_BUCKETS},
    Config, ExposureError, ExposureSignature, ScoreModel, C,
};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
    pub version: &'static str,
    /// Absent from `1.0` records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<&'static str>,
    pub computed_at: DateTime<Utc>,
    pub parameters: Parameters,
    pub routes: BTreeMap<String, RouteRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameters {
    pub sample_points: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fetch_km: Option<C>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ray_km: Option<C>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelter_threshold_km: Option<C>,
    pub ray_step_m: C,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compass_buckets: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RouteRecord {
    Fetch(FetchRecord),
    Shelter(ShelterRecord),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchRecord {
    pub route_id: String,
    pub origin_port: String,
    pub destination_port: String,
    pub exposure_by_dir: DirectionMap<C>,
    pub fetch_km_by_dir: DirectionMap<C>,
    pub avg_exposure: C,
    pub top_exposure_dirs: Vec<CompassDirection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelterRecord {
    pub route_id: String,
    pub origin_port: String,
    pub destination_port: String,
    /// 1 = fully open, 0 = fully sheltered.
    pub shelter_ratio_by_dir: DirectionMap<C>,
    pub effective_open_fetch_km_by_dir: DirectionMap<C>,
    pub mean_shelter_ratio: C,
    pub top_exposure_dirs: Vec<CompassDirection>,
}

impl Artifact {
    pub fn new(
        config: &Config,
        signatures: &[ExposureSignature],
        computed_at: DateTime<Utc>,
    ) -> Self {
        let (version, algorithm, parameters) = match config.model {
            ScoreModel::LogFetch => (
                "1.0",
                None,
                Parameters {
                    sample_points: config.samples,
                    max_fetch_km: Some(config.ray.max_range_km()),
                    max_ray_km: None,
                    shelter_threshold_km: None,
                    ray_step_m: config.ray.step_m,
                    compass_buckets: None,
                },
            ),
            ScoreModel::ShelterThreshold { threshold_m } => (
                "2.0",
                Some(config.model.algorithm()),
                Parameters {
                    sample_points: config.samples,
                    max_fetch_km: None,
                    max_ray_km: Some(config.ray.max_range_km()),
                    shelter_threshold_km: Some(threshold_m / 1000.0),
                    ray_step_m: config.ray.step_m,
                    compass_buckets: Some(COMPASS_BUCKETS),
                },
            ),
        };
        let routes = signatures
            .iter()
            .map(|sig| (sig.route_id.clone(), RouteRecord::new(&config.model, sig)))
            .collect();
        Self {
            version,
            algorithm,
            computed_at,
            parameters,
            routes,
        }
    }

    /// Writes pretty JSON to `path`.
    ///
    /// Output goes to a sibling temporary file first and is renamed
    /// into place, so an existing artifact is never left truncated.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), ExposureError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp_path = path.with_extension("json.tmp");
        if let Err(e) = self
            .write_json(&tmp_path)
            .and_then(|()| fs::rename(&tmp_path, path).map_err(ExposureError::from))
        {
            if let Err(rm_err) = fs::remove_file(&tmp_path) {
                debug!("could not remove {tmp_path:?}: {rm_err}");
            }
            return Err(e);
        }
        info!("wrote {} routes to {path:?}", self.routes.len());
        Ok(())
    }

    fn write_json(&self, path: &Path) -> Result<(), ExposureError> {
        let mut wtr = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut wtr, self)?;
        wtr.write_all(b"\n")?;
        wtr.flush()?;
        Ok(())
    }
}

impl RouteRecord {
    fn new(model: &ScoreModel, sig: &ExposureSignature) -> Self {
        let scores = sig.scores.map(|v| round(*v, 3));
        let distances_km = sig.distances_km.map(|v| round(*v, 2));
        let aggregate = round(sig.aggregate, 3);
        match model {
            ScoreModel::LogFetch => Self::Fetch(FetchRecord {
                route_id: sig.route_id.clone(),
                origin_port: sig.origin.clone(),
                destination_port: sig.destination.clone(),
                exposure_by_dir: scores,
                fetch_km_by_dir: distances_km,
                avg_exposure: aggregate,
                top_exposure_dirs: sig.top.clone(),
            }),
            ScoreModel::ShelterThreshold { .. } => Self::Shelter(ShelterRecord {
                route_id: sig.route_id.clone(),
                origin_port: sig.origin.clone(),
                destination_port: sig.destination.clone(),
                shelter_ratio_by_dir: scores,
                effective_open_fetch_km_by_dir: distances_km,
                mean_shelter_ratio: aggregate,
                top_exposure_dirs: sig.top.clone(),
            }),
        }
    }
}

fn round(value: C, decimals: i32) -> C {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}
