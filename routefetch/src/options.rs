use anyhow::{anyhow, Error as AnyError};
use clap::{Args, Parser, ValueEnum};
use geo::geometry::Coord;
use std::{path::PathBuf, str::FromStr};

/// Generate per-direction wind exposure for ferry routes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub enum Cli {
    /// Compute route signatures and write the artifact.
    Compute(Compute),

    /// Only run the port distance checks.
    Distances(Distances),
}

#[derive(Debug, Clone, Args)]
pub struct Compute {
    #[command(flatten)]
    pub params: Params,

    /// GeoJSON file of land polygons in WGS84 (e.g. Natural Earth
    /// 10m land converted with ogr2ogr).
    #[arg(short, long)]
    pub land: PathBuf,

    /// Projection origin "lat,lon" (defaults to the ports' centroid).
    #[arg(long)]
    pub origin: Option<LatLon>,

    /// Output JSON file.
    #[arg(short, long)]
    pub out: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct Distances {
    #[command(flatten)]
    pub params: Params,
}

#[derive(Debug, Clone, Args)]
pub struct Params {
    /// Parameter preset.
    #[arg(long, value_enum, default_value_t = Preset::Shelter)]
    pub preset: Preset,

    /// JSON config file; replaces the preset entirely.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON file with `ports` and `routes`; replaces the built-in
    /// tables.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Override points sampled per route.
    #[arg(long)]
    pub samples: Option<usize>,

    /// Override ray step (meters).
    #[arg(long)]
    pub step_m: Option<f64>,

    /// Override maximum ray range (meters).
    #[arg(long)]
    pub max_range_m: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// First generation: log-scaled fetch, 10 samples, 100 m / 50 km rays.
    Fetch,

    /// Second generation: shelter ratio at 3 km, 50 samples, 50 m / 30 km rays.
    Shelter,
}

#[derive(Clone, Debug)]
pub struct LatLon(pub Coord<f64>);

impl FromStr for LatLon {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let (lat_str, lon_str) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("not a valid lat,lon pair"))?;
        let lat = f64::from_str(lat_str.trim())?;
        let lon = f64::from_str(lon_str.trim())?;
        Ok(Self(Coord { y: lat, x: lon }))
    }
}
