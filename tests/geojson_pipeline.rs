use std::fs;

use isolines::config::ShortLinePolicy;
use isolines::contour::{RoundingPolicy, levels_from_interval, parse_thresholds};
use isolines::geojson::{Normalizer, parse_points, to_json_string};
use isolines::{ContourConfig, ContourError, ContourPipeline, FeatureCollection};
use tempfile::tempdir;

fn multipoint(coordinates: &str) -> String {
    format!(
        r#"{{"type": "Feature", "properties": {{}},
            "geometry": {{"type": "MultiPoint", "coordinates": {coordinates}}}}}"#
    )
}

/// 5x5 grid whose value rises with longitude, 10 units per degree
fn ramp_document() -> String {
    let positions: Vec<String> = (0..5)
        .flat_map(|i| (0..5).map(move |j| format!("[{}, {}, {}]", 10 + i, 40 + j, i * 10)))
        .collect();
    multipoint(&format!("[{}]", positions.join(", ")))
}

#[test]
fn test_square_document_end_to_end() {
    let json = multipoint("[[0, 0, 0], [1, 0, 0], [0, 1, 10], [1, 1, 10]]");
    let (collection, stats) = ContourPipeline::default().run_geojson(&json, &[5.0]).unwrap();

    assert_eq!(stats.points, 4);
    assert_eq!(stats.triangles, 2);
    assert_eq!(stats.segments, 2);
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.features[0].geometry.type_, "LineString");
    for c in &collection.features[0].geometry.coordinates {
        assert!((c[1] - 0.5).abs() < 1e-9);
    }
}

#[test]
fn test_output_file_round_trips() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("heights.geojson");
    let output = dir.path().join("contours.geojson");
    fs::write(&input, ramp_document()).unwrap();

    let contents = fs::read_to_string(&input).unwrap();
    let thresholds = parse_thresholds("[15, 25]").unwrap();
    let pipeline = ContourPipeline::new(
        ContourConfig::default()
            .with_rounding(RoundingPolicy::Nearest)
            .with_threshold_property(true),
    );
    let (collection, _) = pipeline.run_geojson(&contents, &thresholds).unwrap();
    fs::write(&output, to_json_string(&collection, true).unwrap()).unwrap();

    let written: FeatureCollection =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written, collection);
    assert_eq!(written.type_, "FeatureCollection");
    assert_eq!(written.len(), 2);

    for feature in &written.features {
        let threshold = feature.properties["threshold"].as_f64().unwrap();
        let expected_lon = 10.0 + threshold / 10.0;
        for c in &feature.geometry.coordinates {
            assert!((c[0] - expected_lon).abs() < 1e-9, "{c:?} at {threshold}");
        }
    }
}

#[test]
fn test_interval_levels_cover_value_range() {
    let points = parse_points(&ramp_document(), &Normalizer::default()).unwrap();
    let max = points.iter().map(|p| p.z).fold(f64::MIN, f64::max);
    let min = points.iter().map(|p| p.z).fold(f64::MAX, f64::min);
    let levels = levels_from_interval(min, max, 15.0);
    assert_eq!(levels, vec![0.0, 15.0, 30.0]);

    let output = ContourPipeline::default().run(points, &levels).unwrap();
    assert_eq!(output.stats.thresholds, 3);
    assert!(output.lines.iter().any(|l| l.threshold == 15.0));
}

#[test]
fn test_antimeridian_points_are_contoured() {
    let json = multipoint(
        "[[358, 0, 0], [359, 0, 0], [358, 1, 10], [359, 1, 10], [0, 0, 0], [0, 1, 10]]",
    );
    let points = parse_points(&json, &Normalizer::default()).unwrap();
    assert_eq!(points.len(), 8);
    assert!(points.iter().filter(|p| p.x == 360.0).count() == 2);

    let (collection, _) = ContourPipeline::default().run_geojson(&json, &[5.0]).unwrap();
    let max_lon = collection
        .features
        .iter()
        .flat_map(|f| f.geometry.coordinates.iter().map(|c| c[0]))
        .fold(f64::MIN, f64::max);
    assert_eq!(max_lon, 360.0);
}

#[test]
fn test_polar_points_never_reach_output() {
    let json = multipoint(
        "[[0, 0, 0], [1, 0, 0], [0, 1, 10], [1, 1, 10], [0, 88, 10], [1, -90, 0]]",
    );
    let points = parse_points(&json, &Normalizer::default()).unwrap();
    assert_eq!(points.len(), 4);
    assert!(points.iter().all(|p| p.y.abs() < 85.0));
}

#[test]
fn test_validation_errors_reported() {
    let pipeline = ContourPipeline::default();

    let err = pipeline.run_geojson("null", &[5.0]).unwrap_err();
    assert!(matches!(err, ContourError::EmptyInput));
    assert!(err.is_validation());

    let line = r#"{"type": "LineString", "coordinates": [[0, 0], [1, 1]]}"#;
    let err = pipeline.run_geojson(line, &[5.0]).unwrap_err();
    assert!(matches!(err, ContourError::UnsupportedGeometry { .. }));
    assert!(err.is_validation());
}

#[test]
fn test_too_few_points_is_internal_failure() {
    let json = multipoint("[[0, 0, 0], [1, 0, 10]]");
    let err = ContourPipeline::default().run_geojson(&json, &[5.0]).unwrap_err();
    assert!(matches!(err, ContourError::Unclassified(_)));
    assert!(!err.is_validation());
}

#[test]
fn test_short_line_policy_from_config() {
    let json = multipoint("[[0, 0, 0], [1, 0, 0], [0, 1, 10], [1, 1, 10]]");
    let config = ContourConfig::default().with_short_lines(ShortLinePolicy::Drop);
    let (collection, stats) = ContourPipeline::new(config).run_geojson(&json, &[5.0]).unwrap();
    assert_eq!(stats.merged_lines, 1);
    assert!(collection.is_empty());
}
