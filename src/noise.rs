// ============================================================================
// RADIAL NOISE TABLE — per-radius / per-row grain samples
// ============================================================================
//
// One sample per brush line: the disk looks up by integer radius, the
// background by row. Built once, then only read (shared across workers).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{RenderError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct NoiseTable {
    values: Vec<f64>,
}

impl NoiseTable {
    /// Fresh samples from OS entropy; differs on every run.
    pub fn random(size: usize) -> Self {
        Self::from_rng(size, &mut StdRng::from_entropy())
    }

    /// Reproducible samples for a given seed.
    pub fn seeded(size: usize, seed: u64) -> Self {
        Self::from_rng(size, &mut StdRng::seed_from_u64(seed))
    }

    /// `size` independent uniform samples in [0, 1).
    pub fn from_rng<R: Rng>(size: usize, rng: &mut R) -> Self {
        let values = (0..size).map(|_| rng.gen_range(0.0..1.0)).collect();
        Self { values }
    }

    /// Wrap a fixed sequence, e.g. a test fixture.
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(RenderError::Config("noise table is empty".into()));
        }
        if let Some((i, v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..1.0).contains(*v))
        {
            return Err(RenderError::Config(format!(
                "noise sample {i} = {v} is outside [0, 1)"
            )));
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample for brush line `line`. Callers validate the table length
    /// against the scene geometry before rendering.
    #[inline]
    pub fn sample(&self, line: usize) -> f64 {
        self.values[line]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
