use crate::{
    compass::{CompassDirection, DirectionMap},
    ray::cast_to_land,
    sampler::{sample, SamplePoint},
    score::DirectionScore,
    Catalog, ExposureError, LandMask, Projection, RayConfig, Route, ScoreModel, C,
};
use log::debug;

/// Number of most exposed directions kept per signature.
pub const TOP_N: usize = 3;

/// One ray's result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchMeasurement {
    pub sample_index: usize,
    pub direction: CompassDirection,
    /// Distance to land, capped at the ray range (meters).
    pub distance_m: C,
}

impl FetchMeasurement {
    pub fn distance_km(&self) -> C {
        self.distance_m / 1000.0
    }
}

/// Per-direction exposure of a single route.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureSignature {
    pub route_id: String,

    /// Origin port slug.
    pub origin: String,

    /// Destination port slug.
    pub destination: String,

    /// Score in `[0, 1]` per direction; higher is more exposed.
    pub scores: DirectionMap<C>,

    /// Median distance to land per direction (km).
    pub distances_km: DirectionMap<C>,

    /// Mean of `scores`.
    pub aggregate: C,

    /// Highest scoring directions, ties broken by compass order.
    pub top: Vec<CompassDirection>,
}

impl ExposureSignature {
    pub fn builder<'a>() -> SignatureBuilder<'a> {
        SignatureBuilder {
            route: None,
            samples: None,
            ray: None,
            model: None,
        }
    }

    /// Assembles a signature from already reduced directions,
    /// computing the aggregate and the top directions.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_directions(route: &Route, reduced: &DirectionMap<DirectionScore>) -> Self {
        let scores = reduced.map(|d| d.score);
        let distances_km = reduced.map(|d| d.distance_km);
        let aggregate = scores.values().iter().sum::<C>() / scores.values().len() as C;

        let mut ranked: Vec<(CompassDirection, C)> =
            scores.iter().map(|(dir, score)| (dir, *score)).collect();
        // Stable, so equal scores stay in compass order.
        ranked.sort_by(|(_, a), (_, b)| b.total_cmp(a));
        let top = ranked.into_iter().take(TOP_N).map(|(dir, _)| dir).collect();

        Self {
            route_id: route.route_id.clone(),
            origin: route.origin.clone(),
            destination: route.destination.clone(),
            scores,
            distances_km,
            aggregate,
            top,
        }
    }
}

pub struct SignatureBuilder<'a> {
    /// Route to evaluate (required).
    route: Option<&'a Route>,

    /// Points sampled along the route (required, at least 1).
    samples: Option<usize>,

    /// Ray marching resolution (required).
    ray: Option<RayConfig>,

    /// Score reduction (required).
    model: Option<ScoreModel>,
}

impl<'a> SignatureBuilder<'a> {
    /// Route to evaluate (required).
    #[must_use]
    pub fn route(mut self, route: &'a Route) -> Self {
        self.route = Some(route);
        self
    }

    /// Points sampled along the route (required, at least 1).
    #[must_use]
    pub fn samples(mut self, n: usize) -> Self {
        self.samples = Some(n);
        self
    }

    /// Ray marching resolution (required).
    #[must_use]
    pub fn ray(mut self, ray: RayConfig) -> Self {
        self.ray = Some(ray);
        self
    }

    /// Score reduction (required).
    #[must_use]
    pub fn model(mut self, model: ScoreModel) -> Self {
        self.model = Some(model);
        self
    }

    pub fn build<M, P>(
        &self,
        catalog: &Catalog,
        mask: &M,
        projection: &P,
    ) -> Result<ExposureSignature, ExposureError>
    where
        M: LandMask + ?Sized,
        P: Projection + ?Sized,
    {
        let route = self.route.ok_or_else(|| missing("route"))?;
        let n = self.samples.ok_or_else(|| missing("samples"))?;
        let ray = self.ray.ok_or_else(|| missing("ray"))?;
        let model = self.model.ok_or_else(|| missing("model"))?;
        ray.validate()?;
        model.validate(&ray)?;

        let (origin, dest) = catalog.endpoints(route)?;
        let now = std::time::Instant::now();
        let points = sample(
            projection.forward(origin.coord()),
            projection.forward(dest.coord()),
            n,
        )?;

        let reduced = DirectionMap::try_from_fn(|dir| {
            let raw_m: Vec<C> = measure(&points, dir, mask, &ray)
                .iter()
                .map(|m| m.distance_m)
                .collect();
            let reduced = model.reduce(&raw_m, &ray)?;
            debug!(
                "{} {dir}; median_km: {:.2}, score: {:.3}",
                route.route_id, reduced.distance_km, reduced.score
            );
            Ok::<_, ExposureError>(reduced)
        })?;

        let signature = ExposureSignature::from_directions(route, &reduced);
        debug!(
            "signature; route: {}, samples: {}, steps: {}, aggregate: {:.3}, exec: {:?}",
            route.route_id,
            points.len(),
            ray.steps(),
            signature.aggregate,
            now.elapsed()
        );
        Ok(signature)
    }
}

/// Casts one ray per sample point toward `dir`.
pub fn measure<M>(
    points: &[SamplePoint],
    dir: CompassDirection,
    mask: &M,
    ray: &RayConfig,
) -> Vec<FetchMeasurement>
where
    M: LandMask + ?Sized,
{
    points
        .iter()
        .map(|point| FetchMeasurement {
            sample_index: point.index,
            direction: dir,
            distance_m: cast_to_land(point.position, dir.bearing(), mask, ray),
        })
        .collect()
}

fn missing(param: &'static str) -> ExposureError {
    ExposureError::config(format!("missing required parameter '{param}'"))
}
