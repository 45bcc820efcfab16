use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::geom::Point3;
use crate::icicle::{Edge, IcicleConfig};

mod test_config_basic;
mod test_eligibility_basic;
mod test_host_basic;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn horizontal_edge(length: f64) -> Edge {
    Edge::new(Point3::new(0.0, 0.0, 2.0), Point3::new(length, 0.0, 2.0)).unwrap()
}

fn fixed_config(radius: f64, depth: f64) -> IcicleConfig {
    IcicleConfig {
        min_radius: radius,
        max_radius: radius,
        min_depth: depth,
        max_depth: depth,
        ..IcicleConfig::default()
    }
}
