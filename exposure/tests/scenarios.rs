use approx::assert_relative_eq;
use exposure::{
    geo::{coord, polygon, Coord},
    Catalog, CompassDirection, Config, DistanceCheck, EmptyMask, ExposureError,
    ExposureSignature, LandMask, LocalPlane, OrderingCheck, Pipeline, PolygonMask, Port,
    Projection, RayConfig, Route, ScoreModel,
};
use std::cell::Cell;

const SHELTER: ScoreModel = ScoreModel::ShelterThreshold {
    threshold_m: 3_000.0,
};

fn plane() -> LocalPlane {
    LocalPlane::new(coord!(x: 0.0, y: 0.0))
}

/// Two ports ~11 km apart along the equator.
fn equator_catalog() -> Catalog {
    Catalog::new(
        vec![
            Port::new("a", "Alpha", 0.0, 0.0),
            Port::new("b", "Bravo", 0.0, 0.1),
        ],
        vec![Route::new("a-b", "a", "b"), Route::new("b-a", "b", "a")],
    )
    .unwrap()
}

fn config(model: ScoreModel) -> Config {
    Config {
        samples: 10,
        ray: RayConfig::new(50.0, 30_000.0).unwrap(),
        model,
        distance_checks: vec![],
        ordering_check: None,
    }
}

fn signatures(
    config: &Config,
    catalog: &Catalog,
    mask: &dyn LandMask,
) -> Vec<ExposureSignature> {
    let plane = plane();
    Pipeline::new(config, catalog, mask, &plane)
        .unwrap()
        .run()
        .unwrap()
}

fn assert_well_formed(sig: &ExposureSignature) {
    assert_eq!(sig.scores.iter().count(), 16);
    assert_eq!(sig.distances_km.iter().count(), 16);
    assert!(sig
        .scores
        .values()
        .iter()
        .all(|score| (0.0..=1.0).contains(score)));
    assert_eq!(sig.top.len(), 3);
}

#[test]
fn land_to_the_north_shelters_north() {
    let plane = plane();
    let north_of_hundredth = |c: Coord<f64>| plane.inverse(c).y > 0.01;
    let catalog = equator_catalog();

    let sigs = signatures(&config(SHELTER), &catalog, &north_of_hundredth);
    assert_eq!(sigs.len(), 2);
    for sig in &sigs {
        assert_well_formed(sig);
        assert_eq!(sig.scores[CompassDirection::N], 0.0);
        assert!(sig.distances_km[CompassDirection::N] < 3.0);
        assert!(sig.distances_km[CompassDirection::N] > 1.0);
        assert_eq!(sig.scores[CompassDirection::S], 1.0);
        assert_eq!(sig.distances_km[CompassDirection::S], 30.0);
        assert!(!sig.top.contains(&CompassDirection::N));
    }
}

#[test]
fn open_water_is_fully_exposed() {
    let catalog = equator_catalog();
    for model in [SHELTER, ScoreModel::LogFetch] {
        for sig in signatures(&config(model), &catalog, &EmptyMask) {
            assert_well_formed(&sig);
            for (_, score) in sig.scores.iter() {
                assert_eq!(*score, 1.0);
            }
            for (_, km) in sig.distances_km.iter() {
                assert_eq!(*km, 30.0);
            }
            assert_relative_eq!(sig.aggregate, 1.0);
            assert_eq!(
                sig.top,
                vec![CompassDirection::N, CompassDirection::NNE, CompassDirection::NE]
            );
        }
    }
}

#[test]
fn log_fetch_scores_partial_shelter() {
    let plane = plane();
    let north_of_hundredth = |c: Coord<f64>| plane.inverse(c).y > 0.01;
    let sigs = signatures(
        &config(ScoreModel::LogFetch),
        &equator_catalog(),
        &north_of_hundredth,
    );
    for sig in &sigs {
        assert_well_formed(sig);
        let north = sig.scores[CompassDirection::N];
        assert!(north > 0.0 && north < 0.5);
        assert_eq!(sig.scores[CompassDirection::S], 1.0);
        assert!(sig.aggregate < 1.0);
    }
}

#[test]
fn repeated_runs_are_identical() {
    let plane = plane();
    let mask = |c: Coord<f64>| {
        let geo = plane.inverse(c);
        geo.y > 0.02 || geo.x > 0.15
    };
    let catalog = equator_catalog();
    for model in [SHELTER, ScoreModel::LogFetch] {
        let config = config(model);
        let first = signatures(&config, &catalog, &mask);
        let second = signatures(&config, &catalog, &mask);
        assert_eq!(first, second);
    }
}

/// A narrow east-west channel with land just under 1 km to either
/// side, and an open crossing far to the south.
fn channel_and_open_sea() -> (Catalog, PolygonMask) {
    let catalog = Catalog::new(
        vec![
            Port::new("channel-w", "Channel West", 0.0, -0.2),
            Port::new("channel-e", "Channel East", 0.0, -0.1),
            Port::new("sea-w", "Sea West", -1.0, -0.2),
            Port::new("sea-e", "Sea East", -1.0, -0.1),
        ],
        vec![
            Route::new("channel", "channel-w", "channel-e"),
            Route::new("sea", "sea-w", "sea-e"),
        ],
    )
    .unwrap();
    let mask = PolygonMask::new([
        polygon![
            (x: -50_000.0, y: 975.0),
            (x: 50_000.0, y: 975.0),
            (x: 50_000.0, y: 20_000.0),
            (x: -50_000.0, y: 20_000.0),
        ],
        polygon![
            (x: -50_000.0, y: -20_000.0),
            (x: 50_000.0, y: -20_000.0),
            (x: 50_000.0, y: -975.0),
            (x: -50_000.0, y: -975.0),
        ],
    ]);
    (catalog, mask)
}

fn channel_config(ordering: OrderingCheck) -> Config {
    Config {
        samples: 20,
        ray: RayConfig::new(50.0, 5_000.0).unwrap(),
        model: SHELTER,
        distance_checks: vec![
            DistanceCheck::new("channel-w", "channel-e", 10.0, 12.0).expected(11.0),
            DistanceCheck::new("sea-w", "sea-e", 10.0, 12.0),
        ],
        ordering_check: Some(ordering),
    }
}

#[test]
fn channel_is_more_sheltered_than_open_sea() {
    let (catalog, mask) = channel_and_open_sea();
    let config = channel_config(OrderingCheck::new("sea", "channel", 0.5));
    let sigs = signatures(&config, &catalog, &mask);

    let channel = &sigs[0];
    let sea = &sigs[1];
    assert_eq!(channel.route_id, "channel");
    assert_relative_eq!(sea.aggregate, 1.0);
    // Only due east and due west escape the channel within 3 km.
    assert_relative_eq!(channel.aggregate, 2.0 / 16.0);
    assert_eq!(channel.top[..2], [CompassDirection::E, CompassDirection::W]);
    assert_relative_eq!(channel.distances_km[CompassDirection::N], 1.0);
    assert_relative_eq!(channel.distances_km[CompassDirection::S], 1.0);
}

#[test]
fn implausible_ordering_is_fatal() {
    let (catalog, mask) = channel_and_open_sea();
    let config = channel_config(
        OrderingCheck::new("channel", "sea", 0.2).rationale("channel should be open water"),
    );
    let plane = plane();
    let pipeline = Pipeline::new(&config, &catalog, &mask, &plane).unwrap();

    let err = pipeline.run().unwrap_err();
    assert!(matches!(err, ExposureError::PlausibilityCheckFailure { .. }));
    let msg = err.to_string();
    assert!(msg.contains("channel should be open water"), "{msg}");

    // Results stay inspectable when computed stage by stage.
    let sigs = pipeline.compute().unwrap();
    assert_eq!(sigs.len(), 2);
    assert!(pipeline.verify(&sigs).is_err());
}

#[test]
fn bad_distance_stops_before_ray_casting() {
    let (catalog, _) = channel_and_open_sea();
    let mut config = channel_config(OrderingCheck::new("sea", "channel", 0.5));
    config.distance_checks[1].max_km = 5.0;
    config.distance_checks[1].min_km = 1.0;

    let probes = Cell::new(0_usize);
    let counting = |_: Coord<f64>| {
        probes.set(probes.get() + 1);
        false
    };
    let plane = plane();
    let err = Pipeline::new(&config, &catalog, &counting, &plane)
        .unwrap()
        .run()
        .unwrap_err();
    assert!(matches!(
        err,
        ExposureError::GeometricPreconditionFailure { ref origin, .. } if origin == "sea-w"
    ));
    assert_eq!(probes.get(), 0);
}

#[test]
fn invalid_configuration_is_rejected() {
    let catalog = equator_catalog();
    let plane = plane();
    let mut config = config(SHELTER);
    config.samples = 0;
    assert!(matches!(
        Pipeline::new(&config, &catalog, &EmptyMask, &plane),
        Err(ExposureError::InvalidConfiguration(_))
    ));
}

#[test]
fn unknown_ordering_route_fails_before_ray_casting() {
    let (catalog, _) = channel_and_open_sea();
    let config = channel_config(OrderingCheck::new("sae", "channel", 0.5));

    let probes = Cell::new(0_usize);
    let counting = |_: Coord<f64>| {
        probes.set(probes.get() + 1);
        false
    };
    let plane = plane();
    assert!(matches!(
        Pipeline::new(&config, &catalog, &counting, &plane),
        Err(ExposureError::MissingReferenceData { kind: "route", ref key }) if key == "sae"
    ));
    assert_eq!(probes.get(), 0);
}

#[test]
fn shelter_threshold_must_be_inside_ray_range() {
    let catalog = equator_catalog();
    let plane = plane();
    let mut config = config(SHELTER);
    config.ray = RayConfig::new(50.0, 3_000.0).unwrap();
    assert!(matches!(
        Pipeline::new(&config, &catalog, &EmptyMask, &plane),
        Err(ExposureError::InvalidConfiguration(_))
    ));

    // Just inside the range, capped open-water rays stay open.
    config.ray = RayConfig::new(50.0, 3_050.0).unwrap();
    for sig in signatures(&config, &catalog, &EmptyMask) {
        assert_relative_eq!(sig.aggregate, 1.0);
        assert_eq!(sig.scores[CompassDirection::N], 1.0);
    }
}
