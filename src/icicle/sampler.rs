use rand::Rng;

use super::config::IcicleConfig;

/// Bounded random draws used by placement and bending.
///
/// Wraps an injected generator so runs are reproducible from a seed.
pub struct RandomSampler<'a, R: Rng> {
    rng: &'a mut R,
}

impl<'a, R: Rng> RandomSampler<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform in `[min, max)`, or exactly `min` when the range is empty.
    ///
    /// The result is clamped to `max` so rounding can never leave the range.
    pub fn scalar(&mut self, min: f64, max: f64) -> f64 {
        let span = max - min;
        if span <= 0.0 {
            return min;
        }
        (min + span * self.unit()).min(max)
    }

    /// Uniform integer in `[min, max]`, or `min` when `max < min`.
    pub fn integer(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// `-1.0` or `1.0` with equal probability.
    pub fn sign(&mut self) -> f64 {
        if self.rng.random_bool(0.5) { 1.0 } else { -1.0 }
    }

    pub fn radius(&mut self, config: &IcicleConfig) -> f64 {
        self.scalar(config.min_radius, config.max_radius)
    }

    pub fn depth(&mut self, config: &IcicleConfig) -> f64 {
        self.scalar(config.min_depth, config.max_depth)
    }

    /// Signed lateral offset for a cone of `radius`: `±min(0.45 * r, r)`.
    pub fn perturbation(&mut self, radius: f64) -> f64 {
        (radius * 0.45).min(radius) * self.sign()
    }
}
