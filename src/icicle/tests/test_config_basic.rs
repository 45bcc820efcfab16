use crate::icicle::{CapStyle, ConfigError, Direction, IcicleConfig};

#[test]
fn defaults_match_the_settings_panel() {
    let cfg = IcicleConfig::default();
    assert_eq!(cfg.min_radius, 0.025);
    assert_eq!(cfg.max_radius, 0.15);
    assert_eq!(cfg.min_depth, 1.5);
    assert_eq!(cfg.max_depth, 2.0);
    assert_eq!(cfg.base_vertex_count, 8);
    assert_eq!(cfg.max_subdivisions, 3);
    assert_eq!(cfg.max_iterations, 50);
    assert_eq!(cfg.cap_style, CapStyle::NGon);
    assert_eq!(cfg.direction, Direction::Down);
    assert!(cfg.only_selected_edges);
    assert!(cfg.reselect_base_after);
    assert_eq!(cfg.sanitized(), cfg);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = IcicleConfig::from_json_str(
        r#"{ "minRadius": 0.05, "direction": "up", "capStyle": "TRIFAN", "maxSubdivisions": 0 }"#,
    )
    .unwrap();

    assert_eq!(cfg.min_radius, 0.05);
    assert_eq!(cfg.max_radius, 0.15);
    assert_eq!(cfg.direction, Direction::Up);
    assert_eq!(cfg.cap_style, CapStyle::TriangleFan);
    assert_eq!(cfg.max_subdivisions, 0);
    assert_eq!(cfg.max_iterations, 50);

    let again = IcicleConfig::from_json_str(&cfg.to_json_pretty().unwrap()).unwrap();
    assert_eq!(again, cfg);
}

#[test]
fn bad_json_is_reported() {
    let err = IcicleConfig::from_json_str("{ \"minRadius\": \"wide\" }").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));

    let err = IcicleConfig::from_json_file("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("not/here.json"));
}

#[test]
fn sanitized_repairs_out_of_range_values() {
    let cfg = IcicleConfig {
        min_radius: -1.0,
        max_radius: f64::NAN,
        min_depth: 3.0,
        max_depth: 1.0,
        base_vertex_count: 2,
        max_iterations: 0,
        ..IcicleConfig::default()
    }
    .sanitized();

    assert_eq!(cfg.min_radius, IcicleConfig::DEFAULT_MIN_RADIUS);
    assert_eq!(cfg.max_radius, IcicleConfig::DEFAULT_MAX_RADIUS);
    assert_eq!(cfg.min_depth, 2.0);
    assert_eq!(cfg.max_depth, 2.0);
    assert_eq!(cfg.base_vertex_count, 3);
    assert_eq!(cfg.max_iterations, 1);
}

#[test]
fn sanitized_clamps_to_upper_limits() {
    let cfg = IcicleConfig {
        min_radius: 1e-9,
        max_radius: 1e-9,
        min_depth: 0.5,
        max_depth: 1e6,
        base_vertex_count: 10_000_000,
        max_subdivisions: 1_000_000,
        max_iterations: usize::MAX,
        ..IcicleConfig::default()
    }
    .sanitized();

    assert_eq!(cfg.min_radius, 0.01);
    assert_eq!(cfg.max_radius, 0.01);
    assert_eq!(cfg.min_depth, 0.5);
    assert_eq!(cfg.max_depth, 2.0);
    assert_eq!(cfg.base_vertex_count, 24);
    assert_eq!(cfg.max_subdivisions, 8);
    assert_eq!(cfg.max_iterations, 100);

    let wide = IcicleConfig {
        min_radius: 5.0,
        max_radius: 9.0,
        ..IcicleConfig::default()
    }
    .sanitized();
    assert_eq!(wide.min_radius, 1.0);
    assert_eq!(wide.max_radius, 1.0);
    assert_eq!(wide.sanitized(), wide);
}

#[test]
fn sanitized_raises_inverted_radius_range() {
    let cfg = IcicleConfig {
        min_radius: 0.3,
        max_radius: 0.1,
        min_depth: -2.0,
        ..IcicleConfig::default()
    }
    .sanitized();

    assert_eq!(cfg.min_radius, 0.3);
    assert_eq!(cfg.max_radius, 0.3);
    assert_eq!(cfg.min_depth, 0.0);
}

#[test]
fn direction_sign() {
    assert_eq!(Direction::Up.sign(), 1.0);
    assert_eq!(Direction::Down.sign(), -1.0);
}
