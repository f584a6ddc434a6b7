//! Geographic ↔ planar coordinate transforms.

use crate::C;
use geo::geometry::Coord;

/// Mean earth radius in meters, as used by `geo`'s haversine
/// routines.
pub const MEAN_EARTH_RADIUS: C = 6_371_008.8;

/// A bidirectional transform between geographic coordinates
/// (`x: lon, y: lat` in degrees) and a planar metric system (`x`
/// east, `y` north, both in meters).
///
/// Implementations only need to be distance preserving over the area
/// of interest.
pub trait Projection {
    fn forward(&self, geographic: Coord<C>) -> Coord<C>;

    fn inverse(&self, planar: Coord<C>) -> Coord<C>;
}

/// Equirectangular projection about a reference origin.
///
/// Scale error grows with distance from `origin`, but stays well
/// under 1% across the few tens of kilometers a harbor crossing
/// spans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalPlane {
    origin: Coord<C>,
    /// Meters per radian of longitude at the origin's latitude.
    x_scale: C,
}

impl LocalPlane {
    pub fn new(origin: Coord<C>) -> Self {
        let x_scale = MEAN_EARTH_RADIUS * origin.y.to_radians().cos();
        Self { origin, x_scale }
    }

    pub fn origin(&self) -> Coord<C> {
        self.origin
    }
}

impl Projection for LocalPlane {
    fn forward(&self, Coord { x: lon, y: lat }: Coord<C>) -> Coord<C> {
        Coord {
            x: (lon - self.origin.x).to_radians() * self.x_scale,
            y: (lat - self.origin.y).to_radians() * MEAN_EARTH_RADIUS,
        }
    }

    fn inverse(&self, Coord { x, y }: Coord<C>) -> Coord<C> {
        Coord {
            x: self.origin.x + (x / self.x_scale).to_degrees(),
            y: self.origin.y + (y / MEAN_EARTH_RADIUS).to_degrees(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LocalPlane, Projection};
    use approx::assert_relative_eq;
    use geo::{coord, point, HaversineDistance};

    #[test]
    fn test_round_trip() {
        let plane = LocalPlane::new(coord!(x: -70.4, y: 41.5));
        let woods_hole = coord!(x: -70.6693, y: 41.5234);
        let back = plane.inverse(plane.forward(woods_hole));
        assert_relative_eq!(back.x, woods_hole.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, woods_hole.y, epsilon = 1e-9);
    }

    #[test]
    fn test_origin_maps_to_zero() {
        let origin = coord!(x: 10.0, y: -20.0);
        let plane = LocalPlane::new(origin);
        let planar = plane.forward(origin);
        assert_relative_eq!(planar.x, 0.0);
        assert_relative_eq!(planar.y, 0.0);
    }

    #[test]
    fn test_axes() {
        let plane = LocalPlane::new(coord!(x: 0.0, y: 0.0));
        let north = plane.forward(coord!(x: 0.0, y: 0.01));
        let east = plane.forward(coord!(x: 0.01, y: 0.0));
        assert!(north.y > 0.0 && north.x.abs() < 1e-9);
        assert!(east.x > 0.0 && east.y.abs() < 1e-9);
    }

    /// Hyannis → Nantucket, compared against the great circle
    /// distance.
    #[test]
    fn test_distance_preserving() {
        let hyannis = point!(x: -70.2826, y: 41.6362);
        let nantucket = point!(x: -70.0995, y: 41.2835);
        let plane = LocalPlane::new(coord!(x: -70.4, y: 41.5));
        let a = plane.forward(hyannis.0);
        let b = plane.forward(nantucket.0);
        let planar_m = (b.x - a.x).hypot(b.y - a.y);
        let great_circle_m = hyannis.haversine_distance(&nantucket);
        assert_relative_eq!(planar_m, great_circle_m, max_relative = 0.005);
    }
}
