use crate::geom::{Point3, Transform, Vec3};
use crate::icicle::{EditMesh, IcicleConfig, MeshHost, run_on_host};

use super::rng;

fn gutter() -> EditMesh {
    let mut host = EditMesh::new();
    host.add_polyline(&[Point3::new(0.0, 0.0, 3.0), Point3::new(3.0, 0.0, 3.0)], false);
    host.add_polyline(&[Point3::new(0.0, 1.0, 3.0), Point3::new(3.0, 1.0, 3.0)], false);
    host
}

#[test]
fn working_edges_follow_selection() {
    let mut host = gutter();
    assert_eq!(host.working_edges(true).len(), 2);

    host.deselect_all();
    host.select_edges(&[1]);
    let selected = host.working_edges(true);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, 1);
    assert_eq!(host.working_edges(false).len(), 2);
    assert_eq!(host.selected_edges(), vec![1]);
}

#[test]
fn reselect_restores_original_edges() {
    let mut host = gutter();
    host.deselect_all();
    host.select_edges(&[0]);

    let diagnostics = run_on_host(&mut host, &IcicleConfig::default(), &mut rng(1));

    assert!(diagnostics.icicle_count > 0);
    assert_eq!(diagnostics.edges_considered, 1);
    assert_eq!(host.selected_edges(), vec![0]);
    assert!(host.edge_count() > 2);
    host.mesh.validate().expect("mesh validate");
}

#[test]
fn without_reselect_new_icicles_are_selected() {
    let mut host = gutter();
    let config = IcicleConfig {
        reselect_base_after: false,
        ..IcicleConfig::default()
    };

    run_on_host(&mut host, &config, &mut rng(2));

    let selected = host.selected_edges();
    assert!(!selected.is_empty());
    assert!(!host.is_selected(0));
    assert!(!host.is_selected(1));
    assert!(selected.iter().all(|&id| id >= 2));
}

#[test]
fn cones_are_stored_in_object_space() {
    let world = Transform::translate(Vec3::new(0.0, 0.0, 10.0));
    let mut host = EditMesh::with_world(world);
    host.add_polyline(&[Point3::ORIGIN, Point3::new(2.0, 0.0, 0.0)], false);

    let edges = host.working_edges(true);
    assert_eq!(edges[0].endpoints[0], [0.0, 0.0, 10.0]);

    let config = IcicleConfig::default();
    run_on_host(&mut host, &config, &mut rng(3));

    // ring on the edge, apex at most max_depth below it
    for p in &host.mesh.positions[2..] {
        assert!(p[2] <= 1e-9, "{p:?}");
        assert!(p[2] >= -config.max_depth - 1e-9, "{p:?}");
    }

    let obj = host.to_obj("shifted");
    assert!(obj.starts_with("# icicle-engine\no shifted\nv 0 0 10\n"));
    assert!(obj.contains("\nl 1 2\n"));
    assert!(obj.contains("\nf "));
}

#[test]
fn malformed_host_edges_are_reported() {
    let mut host = EditMesh::new();
    let a = host.add_vertex(Point3::ORIGIN);
    host.add_edge_record(vec![a, 42], true);
    host.add_edge_record(vec![a], true);

    let diagnostics = run_on_host(&mut host, &IcicleConfig::default(), &mut rng(4));
    assert_eq!(diagnostics.skipped_malformed, 2);
    assert_eq!(diagnostics.icicle_count, 0);
    assert_eq!(host.selected_edges(), vec![0, 1]);
}
