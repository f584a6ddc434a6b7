//! Static port and route tables.

use crate::{ExposureError, C};
use geo::geometry::Coord;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Unique key, e.g. `"woods-hole"`.
    pub slug: String,

    pub name: String,

    /// Latitude in degrees.
    pub lat: C,

    /// Longitude in degrees.
    pub lon: C,
}

impl Port {
    pub fn new(slug: impl Into<String>, name: impl Into<String>, lat: C, lon: C) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            lat,
            lon,
        }
    }

    /// Geographic location as `x: lon, y: lat`.
    pub fn coord(&self) -> Coord<C> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }
}

/// A straight segment between two ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub route_id: String,
    pub origin: String,
    pub destination: String,
}

impl Route {
    pub fn new(
        route_id: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            route_id: route_id.into(),
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

/// Immutable port and route tables.
///
/// Routes keep their insertion order, which is the order signatures
/// are computed and reported in.
#[derive(Debug, Clone)]
pub struct Catalog {
    ports: Vec<Port>,
    port_idx: HashMap<String, usize>,
    routes: Vec<Route>,
    route_idx: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, checking that keys are unique and that every
    /// route references known ports.
    pub fn new(ports: Vec<Port>, routes: Vec<Route>) -> Result<Self, ExposureError> {
        let mut port_idx = HashMap::with_capacity(ports.len());
        for (idx, port) in ports.iter().enumerate() {
            if !(port.lat.is_finite() && port.lon.is_finite())
                || port.lat.abs() > 90.0
                || port.lon.abs() > 180.0
            {
                return Err(ExposureError::config(format!(
                    "port '{}' has invalid coordinates ({}, {})",
                    port.slug, port.lat, port.lon
                )));
            }
            if port_idx.insert(port.slug.clone(), idx).is_some() {
                return Err(ExposureError::config(format!(
                    "duplicate port '{}'",
                    port.slug
                )));
            }
        }

        let mut route_idx = HashMap::with_capacity(routes.len());
        for (idx, route) in routes.iter().enumerate() {
            for slug in [&route.origin, &route.destination] {
                if !port_idx.contains_key(slug) {
                    return Err(ExposureError::MissingReferenceData {
                        kind: "port",
                        key: slug.clone(),
                    });
                }
            }
            if route_idx.insert(route.route_id.clone(), idx).is_some() {
                return Err(ExposureError::config(format!(
                    "duplicate route '{}'",
                    route.route_id
                )));
            }
        }

        debug!("catalog; ports: {}, routes: {}", ports.len(), routes.len());

        Ok(Self {
            ports,
            port_idx,
            routes,
            route_idx,
        })
    }

    pub fn port(&self, slug: &str) -> Result<&Port, ExposureError> {
        self.port_idx
            .get(slug)
            .map(|&idx| &self.ports[idx])
            .ok_or_else(|| ExposureError::MissingReferenceData {
                kind: "port",
                key: slug.to_owned(),
            })
    }

    pub fn route(&self, route_id: &str) -> Result<&Route, ExposureError> {
        self.route_idx
            .get(route_id)
            .map(|&idx| &self.routes[idx])
            .ok_or_else(|| ExposureError::MissingReferenceData {
                kind: "route",
                key: route_id.to_owned(),
            })
    }

    /// Returns the `(origin, destination)` ports of `route`.
    pub fn endpoints(&self, route: &Route) -> Result<(&Port, &Port), ExposureError> {
        Ok((self.port(&route.origin)?, self.port(&route.destination)?))
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Mean location of all ports, or `None` for an empty catalog.
    #[allow(clippy::cast_precision_loss)]
    pub fn centroid(&self) -> Option<Coord<C>> {
        if self.ports.is_empty() {
            return None;
        }
        let n = self.ports.len() as C;
        let sum = self
            .ports
            .iter()
            .fold(Coord { x: 0.0, y: 0.0 }, |acc, port| acc + port.coord());
        Some(Coord {
            x: sum.x / n,
            y: sum.y / n,
        })
    }
}
