//! Land polygons from GeoJSON.

use anyhow::{bail, Result};
use exposure::{LocalPlane, PolygonMask, Projection};
use geo::{
    geometry::{Coord, Geometry, GeometryCollection, Polygon, Rect},
    BoundingRect, MapCoords,
};
use geojson::{quick_collection, GeoJson};
use log::{debug, info};
use std::{fs::File, io::BufReader, path::Path};

/// Loads every polygon in the GeoJSON file at `path`, projects it
/// onto `plane`, and keeps those whose bounds touch `region` (planar
/// meters).
pub fn load(path: &Path, plane: &LocalPlane, region: Rect<f64>) -> Result<PolygonMask> {
    let rdr = BufReader::new(File::open(path)?);
    let land_json = GeoJson::from_reader(rdr)?;
    let land: GeometryCollection<f64> = quick_collection(&land_json)?;

    let mut polygons = Vec::new();
    collect_polygons(land, &mut polygons);
    let total = polygons.len();
    if total == 0 {
        bail!("no land polygons in {path:?}");
    }

    let mask = PolygonMask::new(
        polygons
            .into_iter()
            .map(|polygon| polygon.map_coords(|coord| plane.forward(coord)))
            .filter(|polygon| {
                polygon
                    .bounding_rect()
                    .map_or(false, |rect| overlaps(&rect, &region))
            }),
    );
    info!(
        "loaded {total} land polygons from {path:?}, {} near routes",
        mask.len()
    );
    Ok(mask)
}

/// Planar bounds of all `points`, grown by `margin_m` on every side.
pub fn region(points: impl IntoIterator<Item = Coord<f64>>, margin_m: f64) -> Option<Rect<f64>> {
    points
        .into_iter()
        .fold(None, |acc: Option<(Coord<f64>, Coord<f64>)>, c| match acc {
            None => Some((c, c)),
            Some((min, max)) => Some((
                Coord {
                    x: min.x.min(c.x),
                    y: min.y.min(c.y),
                },
                Coord {
                    x: max.x.max(c.x),
                    y: max.y.max(c.y),
                },
            )),
        })
        .map(|(min, max)| {
            let margin = Coord {
                x: margin_m,
                y: margin_m,
            };
            Rect::new(min - margin, max + margin)
        })
}

fn collect_polygons(collection: GeometryCollection<f64>, out: &mut Vec<Polygon<f64>>) {
    for geometry in collection {
        match geometry {
            Geometry::Polygon(polygon) => out.push(polygon),
            Geometry::MultiPolygon(multi) => out.extend(multi),
            Geometry::GeometryCollection(nested) => collect_polygons(nested, out),
            other => debug!("ignoring non-areal geometry {other:?}"),
        }
    }
}

fn overlaps(a: &Rect<f64>, b: &Rect<f64>) -> bool {
    a.min().x <= b.max().x && b.min().x <= a.max().x && a.min().y <= b.max().y && b.min().y <= a.max().y
}

#[cfg(test)]
mod tests {
    use super::{load, region};
    use exposure::{LandMask, LocalPlane, Projection};
    use geo::{coord, Rect};
    use std::io::Write;

    const ISLAND: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "near" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.01, 0.01], [0.02, 0.01], [0.02, 0.02], [0.01, 0.02], [0.01, 0.01]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "far" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[10.0, 10.0], [11.0, 10.0], [11.0, 11.0], [10.0, 10.0]]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "buoy" },
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
            }
        ]
    }"#;

    #[test]
    fn test_region() {
        let rect = region([coord!(x: 0.0, y: 0.0), coord!(x: 10.0, y: -5.0)], 1.0).unwrap();
        assert_eq!(rect, Rect::new(coord!(x: -1.0, y: -6.0), coord!(x: 11.0, y: 1.0)));
        assert!(region(std::iter::empty(), 1.0).is_none());
    }

    #[test]
    fn test_load() {
        let path = std::env::temp_dir().join(format!("routefetch-land-{}.geojson", std::process::id()));
        std::fs::File::create(&path)
            .unwrap()
            .write_all(ISLAND.as_bytes())
            .unwrap();

        let plane = LocalPlane::new(coord!(x: 0.0, y: 0.0));
        let region = region([coord!(x: 0.0, y: 0.0)], 10_000.0).unwrap();
        let mask = load(&path, &plane, region).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(mask.len(), 1);
        assert!(mask.contains(plane.forward(coord!(x: 0.015, y: 0.015))));
        assert!(!mask.contains(plane.forward(coord!(x: 0.005, y: 0.005))));
    }
}
