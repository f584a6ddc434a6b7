use crate::{math::midspace, ExposureError, C};
use geo::geometry::Coord;

/// A planar point along a route and its 0-based position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub index: usize,
    pub position: Coord<C>,
}

/// Returns `n` points along the straight segment from `origin` to
/// `dest`, each centered in one of `n` equal sub-intervals.
///
/// Endpoints are never sampled: ports sit on or next to land, which
/// would report zero fetch in most directions.
pub fn sample(
    origin: Coord<C>,
    dest: Coord<C>,
    n: usize,
) -> Result<Vec<SamplePoint>, ExposureError> {
    if n == 0 {
        return Err(ExposureError::config("sample count must be at least 1"));
    }
    let delta = dest - origin;
    Ok(midspace::<C>(n)
        .enumerate()
        .map(|(index, t)| SamplePoint {
            index,
            position: origin + delta * t,
        })
        .collect())
}
