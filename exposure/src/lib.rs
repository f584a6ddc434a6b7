//! # Route wind exposure
//!
//! `exposure` estimates how exposed a straight maritime route is to
//! wind from each of the 16 compass directions, by casting rays
//! upwind from points along the route until they reach land.
//!
//! The land mask and the geographic ↔ planar projection are
//! supplied by the caller through the [`LandMask`] and
//! [`Projection`] traits.

mod artifact;
mod catalog;
pub mod compass;
mod config;
mod error;
pub mod mask;
mod math;
mod pipeline;
mod projection;
pub mod ray;
pub mod sampler;
pub mod score;
mod signature;
pub mod validate;

pub use {
    crate::{
        artifact::{Artifact, FetchRecord, Parameters, RouteRecord, ShelterRecord},
        catalog::{Catalog, Port, Route},
        compass::{CompassDirection, DirectionMap},
        config::Config,
        error::ExposureError,
        mask::{EmptyMask, LandMask, PolygonMask},
        pipeline::Pipeline,
        projection::{LocalPlane, Projection, MEAN_EARTH_RADIUS},
        ray::RayConfig,
        score::ScoreModel,
        signature::{measure, ExposureSignature, FetchMeasurement, SignatureBuilder, TOP_N},
        validate::{DistanceCheck, OrderingCheck},
    },
    chrono, geo,
};

/// Floating point type used for all coordinates and distances.
pub type C = f64;
