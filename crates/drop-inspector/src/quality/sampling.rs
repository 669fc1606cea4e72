//! Deterministic per-column sampling.

use crate::config::{DEFAULT_SAMPLE_SEED, DEFAULT_SAMPLE_SIZE};
use crate::table::{Column, Value};
use anyhow::{Result, anyhow};
use rand::prelude::*;

/// Draws at most `size` non-null values from a column.
///
/// Columns with `size` or fewer non-null values are returned whole, in row
/// order. Larger columns are sampled with a PRNG seeded from `seed`, so the
/// same column always yields the same sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    size: usize,
    seed: u64,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_SIZE, DEFAULT_SAMPLE_SEED)
    }
}

impl Sampler {
    pub fn new(size: usize, seed: u64) -> Self {
        Self { size, seed }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sampled non-null values, in row order.
    pub fn sample<'a>(&self, column: &'a Column) -> Vec<&'a Value> {
        let values: Vec<&Value> = column.non_null_values().collect();
        if values.len() <= self.size {
            return values;
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let indices: Vec<usize> = (0..values.len()).collect();
        let mut sampled: Vec<usize> = indices
            .choose_multiple(&mut rng, self.size)
            .copied()
            .collect();
        sampled.sort_unstable();

        sampled.into_iter().map(|idx| values[idx]).collect()
    }

    /// Sampled values rendered as trimmed text.
    pub fn sample_texts(&self, column: &Column) -> Result<Vec<String>> {
        self.sample(column)
            .into_iter()
            .map(|value| {
                value
                    .render()
                    .map(|text| text.trim().to_string())
                    .ok_or_else(|| anyhow!("null cell in sample of '{}'", column.name()))
            })
            .collect()
    }
}
