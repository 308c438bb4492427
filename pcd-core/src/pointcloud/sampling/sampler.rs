use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::pointcloud::point::PointCloud;

pub trait Sampler {
    fn sample(&mut self, cloud: &PointCloud, n: usize) -> PointCloud;
}

/// Uniform random sampling without replacement.
///
/// The randomness source is injected, so a seeded rng gives fully
/// deterministic output. The sampled cloud is unordered with respect to
/// the source index.
pub struct RandomSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSampler<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Sampler for RandomSampler<R> {
    fn sample(&mut self, cloud: &PointCloud, n: usize) -> PointCloud {
        let n = n.min(cloud.len());
        let indices = index::sample(&mut self.rng, cloud.len(), n);
        cloud.select(indices.into_vec())
    }
}
