//! Land presence tests in planar coordinates.

use crate::C;
use geo::{
    geometry::{Coord, MultiPolygon, Polygon, Rect},
    BoundingRect, Intersects,
};
use log::debug;

/// Answers "is this planar point on land?".
///
/// This is the only seam between the exposure computation and
/// whatever geometry backs it.
pub trait LandMask {
    fn contains(&self, planar: Coord<C>) -> bool;
}

impl<F> LandMask for F
where
    F: Fn(Coord<C>) -> bool,
{
    fn contains(&self, planar: Coord<C>) -> bool {
        self(planar)
    }
}

/// No land anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyMask;

impl LandMask for EmptyMask {
    fn contains(&self, _planar: Coord<C>) -> bool {
        false
    }
}

/// Land polygons, already in planar coordinates.
///
/// Polygons are not unioned; a point is land if any polygon contains
/// it or lies on its boundary. Each polygon's bounding rect is checked first since nearly
/// every ray step is far from nearly every polygon.
#[derive(Debug, Clone, Default)]
pub struct PolygonMask {
    polygons: Vec<(Rect<C>, Polygon<C>)>,
}

impl PolygonMask {
    pub fn new<I>(polygons: I) -> Self
    where
        I: IntoIterator<Item = Polygon<C>>,
    {
        let polygons: Vec<(Rect<C>, Polygon<C>)> = polygons
            .into_iter()
            .filter_map(|polygon| polygon.bounding_rect().map(|rect| (rect, polygon)))
            .collect();
        debug!("land mask; polygons: {}", polygons.len());
        Self { polygons }
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Bounding rect of all land, if any.
    pub fn bounds(&self) -> Option<Rect<C>> {
        self.polygons.iter().map(|(rect, _)| *rect).reduce(|a, b| {
            Rect::new(
                Coord {
                    x: a.min().x.min(b.min().x),
                    y: a.min().y.min(b.min().y),
                },
                Coord {
                    x: a.max().x.max(b.max().x),
                    y: a.max().y.max(b.max().y),
                },
            )
        })
    }
}

impl From<MultiPolygon<C>> for PolygonMask {
    fn from(multi: MultiPolygon<C>) -> Self {
        Self::new(multi.0)
    }
}

impl LandMask for PolygonMask {
    fn contains(&self, planar: Coord<C>) -> bool {
        self.polygons.iter().any(|(rect, polygon)| {
            let min = rect.min();
            let max = rect.max();
            (min.x..=max.x).contains(&planar.x)
                && (min.y..=max.y).contains(&planar.y)
                && polygon.intersects(&planar)
        })
    }
}
