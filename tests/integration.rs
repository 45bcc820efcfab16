use icicle_engine::IcicleEngine;
use icicle_engine::geom::{Point3, Transform, Vec3};
use icicle_engine::icicle::{
    CapStyle, Direction, EdgeInput, EditMesh, IcicleConfig, MeshHost, preview_silhouettes,
    run_on_host, run_seeded,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn roof_outline() -> Vec<EdgeInput> {
    let corners = [
        Point3::new(0.0, 0.0, 3.0),
        Point3::new(4.0, 0.0, 3.0),
        Point3::new(4.0, 3.0, 3.0),
        Point3::new(0.0, 3.0, 3.0),
    ];
    (0..4)
        .map(|i| EdgeInput::new(i, corners[i], corners[(i + 1) % 4]))
        .collect()
}

#[test]
fn engine_starts_without_report() {
    let mut engine = IcicleEngine::new();
    engine.set_seed(12);
    assert!(engine.last_report().is_none());
}

#[test]
fn roof_outline_gets_icicles_on_every_side() {
    let outcome = run_seeded(&roof_outline(), &IcicleConfig::default(), 2024);
    let diag = &outcome.diagnostics;

    assert_eq!(diag.edges_considered, 4);
    assert_eq!(diag.edges_processed, 4);
    assert_eq!(diag.skipped_count(), 0);

    for cone in &outcome.cones {
        cone.mesh.validate().expect("mesh validate");
        let apex = cone.apex_point();
        let anchor = cone.anchor();
        let depth = anchor.z - apex.z;
        assert!(depth > 1.5 - 1e-9 && depth < 2.0 + 1e-9, "depth {depth}");
        assert!((apex.x - anchor.x).abs() < 1e-12 && (apex.y - anchor.y).abs() < 1e-12);
    }

    // each side contributes at least one cone
    for y in [0.0, 3.0] {
        assert!(outcome.cones.iter().any(|c| c.anchor().y == y));
    }
    for x in [0.0, 4.0] {
        assert!(outcome.cones.iter().any(|c| c.anchor().x == x));
    }
}

#[test]
fn upward_fan_capped_cones() {
    let config = IcicleConfig {
        direction: Direction::Up,
        cap_style: CapStyle::TriangleFan,
        base_vertex_count: 6,
        max_subdivisions: 0,
        ..IcicleConfig::default()
    };
    let outcome = run_seeded(&roof_outline(), &config, 5);

    assert!(!outcome.cones.is_empty());
    for cone in &outcome.cones {
        assert!(cone.apex_point().z > 3.0);
        assert_eq!(cone.mesh.vertex_count(), 8);
        assert_eq!(cone.mesh.face_count(), 12);
    }
}

#[test]
fn host_round_trip_with_world_transform() {
    let world = Transform::translate(Vec3::new(5.0, 0.0, 2.0)) * Transform::rotate_z(0.5);
    let mut host = EditMesh::with_world(world);
    host.add_polyline(&[Point3::ORIGIN, Point3::new(3.0, 0.0, 0.0)], false);
    host.add_polyline(&[Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 1.0, 4.0)], false);

    let mut rng = StdRng::seed_from_u64(77);
    let diagnostics = run_on_host(&mut host, &IcicleConfig::default(), &mut rng);

    assert_eq!(diagnostics.edges_processed, 1);
    assert_eq!(diagnostics.skipped_degenerate, 1);
    assert_eq!(host.selected_edges(), vec![0, 1]);
    host.mesh.validate().expect("mesh validate");

    let obj = host.to_obj("roof");
    let faces = obj.lines().filter(|l| l.starts_with("f ")).count();
    assert_eq!(faces, host.mesh.face_count());
}

#[test]
fn preview_matches_working_set() {
    let mut edges = roof_outline();
    edges[2].selected = false;
    let silhouettes = preview_silhouettes(&edges, &IcicleConfig::default());
    let ids: Vec<_> = silhouettes.iter().map(|s| s.edge).collect();
    assert_eq!(ids, vec![0, 1, 3]);
}

#[test]
fn config_file_drives_a_run() {
    let dir = std::env::temp_dir().join(format!("icicle-engine-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("config.json");
    std::fs::write(&path, r#"{ "maxSubdivisions": 0, "baseVertexCount": 4, "capStyle": "NOTHING" }"#)
        .expect("write config");

    let config = IcicleConfig::from_json_file(&path).expect("load config");
    assert_eq!(config.cap_style, CapStyle::None);

    let outcome = run_seeded(&roof_outline(), &config, 1);
    assert!(outcome.cones.iter().all(|c| c.mesh.face_count() == 4));
    assert_eq!(outcome.diagnostics.bend_ring_count, 0);

    let _ = std::fs::remove_dir_all(&dir);
}
