//! Minimal-sample drawing.
//!
//! A draw is a partial Fisher–Yates shuffle over references to the input:
//! the first `k` positions become the minimal sample and the rest form the
//! evaluation batch. No rejection loop is needed to keep the sample free of
//! repeats.

use rand::rngs::StdRng;
use rand::Rng;

use crate::utils::trial_rng;

/// One random split of the input into a minimal sample and the remainder.
#[derive(Debug)]
pub struct Draw<'a, O> {
    pub sample: Vec<&'a O>,
    pub remainder: Vec<&'a O>,
}

/// Uniform random sampler drawing minimal samples without replacement.
pub struct UniformRandomSampler {
    rng: StdRng,
}

impl UniformRandomSampler {
    /// Sampler for trial `index` of a run seeded with `base_seed`.
    pub fn for_trial(base_seed: u64, index: usize) -> Self {
        Self {
            rng: trial_rng(base_seed, index),
        }
    }

    /// Split `data` into `sample_size` distinct observations and the rest.
    ///
    /// Returns `None` when `data` holds fewer than `sample_size` items.
    pub fn sample<'a, O>(&mut self, data: &'a [O], sample_size: usize) -> Option<Draw<'a, O>> {
        let n = data.len();
        if sample_size > n {
            return None;
        }

        let mut refs: Vec<&'a O> = data.iter().collect();
        for i in 0..sample_size {
            let j = self.rng.gen_range(i..n);
            refs.swap(i, j);
        }
        let remainder = refs.split_off(sample_size);
        Some(Draw {
            sample: refs,
            remainder,
        })
    }
}
