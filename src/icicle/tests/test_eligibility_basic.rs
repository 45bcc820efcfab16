use crate::geom::Point3;
use crate::icicle::{Edge, EdgeError, EdgeInput, SkipReason, check_eligibility, is_eligible};

use super::horizontal_edge;

#[test]
fn long_horizontal_edge_is_eligible() {
    assert!(is_eligible(&horizontal_edge(1.0), 0.1));
}

#[test]
fn short_edge_is_rejected() {
    let edge = horizontal_edge(0.15);
    assert_eq!(check_eligibility(&edge, 0.1), Err(SkipReason::TooShort));
    assert!(is_eligible(&edge, 0.05));
}

#[test]
fn vertical_edge_has_degenerate_projection() {
    let edge = Edge::new(Point3::new(1.0, 2.0, 0.0), Point3::new(1.0, 2.0, 5.0)).unwrap();
    assert_eq!(check_eligibility(&edge, 0.1), Err(SkipReason::DegenerateProjection));

    let nearly = Edge::new(Point3::new(1.0, 2.0, 0.0), Point3::new(1.0 + 1e-8, 2.0, 5.0)).unwrap();
    assert_eq!(check_eligibility(&nearly, 0.1), Err(SkipReason::DegenerateProjection));
}

#[test]
fn sloped_edge_is_judged_by_its_projection() {
    let edge = Edge::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.15, 0.0, 3.0)).unwrap();
    assert!(edge.length() > 0.2);
    assert_eq!(check_eligibility(&edge, 0.1), Err(SkipReason::TooShort));

    let edge = Edge::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.3, 0.4, 3.0)).unwrap();
    assert!(is_eligible(&edge, 0.1));
}

#[test]
fn malformed_inputs_do_not_become_edges() {
    let mut input = EdgeInput::new(4, Point3::ORIGIN, Point3::new(1.0, 0.0, 0.0));
    input.endpoints.push([2.0, 0.0, 0.0]);
    assert_eq!(
        Edge::try_from(&input),
        Err(EdgeError::WrongEndpointCount { id: 4, found: 3 })
    );

    let input = EdgeInput::new(5, Point3::ORIGIN, Point3::ORIGIN);
    assert_eq!(Edge::try_from(&input), Err(EdgeError::CoincidentEndpoints { id: 5 }));

    let input = EdgeInput::new(6, Point3::ORIGIN, Point3::new(f64::NAN, 0.0, 0.0));
    assert_eq!(Edge::try_from(&input), Err(EdgeError::NonFiniteEndpoint { id: 6 }));
}
