//! Configuration for the RANSAC estimation loop.
//!
//! All knobs live on the estimator instance; nothing here touches process-wide
//! state such as rayon's global pool.

use crate::error::RansacError;

/// Main configuration object for [`Ransac`](crate::core::Ransac).
#[derive(Debug, Clone, PartialEq)]
pub struct RansacSettings {
    /// Inlier threshold: an observation is an inlier when its distance to the
    /// model is strictly below this value. Must be positive.
    pub inlier_threshold: f64,
    /// Number of trials run by every call to `estimate`. Must be positive.
    pub max_iterations: usize,
    /// Base seed for the per-trial random streams. `None` draws a fresh seed
    /// for every call.
    pub seed: Option<u64>,
    /// Number of worker threads. `None` uses the available parallelism.
    pub parallelism: Option<usize>,
    /// Prepend the minimal sample of the winning trial to the reported
    /// inlier set. The score is not affected.
    pub include_minimal_sample: bool,
}

impl Default for RansacSettings {
    fn default() -> Self {
        Self {
            inlier_threshold: 1.5,
            max_iterations: 1000,
            seed: None,
            parallelism: None,
            include_minimal_sample: false,
        }
    }
}

impl RansacSettings {
    /// Settings with the given threshold and iteration count, everything else default.
    pub fn new(inlier_threshold: f64, max_iterations: usize) -> Self {
        Self {
            inlier_threshold,
            max_iterations,
            ..Self::default()
        }
    }

    /// Fix the base seed so every call replays the same trials.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run trials on a dedicated pool of `threads` workers; 0 is clamped to 1.
    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }

    /// Reject thresholds that are not strictly positive (NaN included) and a
    /// zero iteration count.
    pub fn validate(&self) -> Result<(), RansacError> {
        if !(self.inlier_threshold > 0.0) {
            return Err(RansacError::Configuration(format!(
                "inlier threshold must be positive, got {}",
                self.inlier_threshold
            )));
        }
        if self.max_iterations == 0 {
            return Err(RansacError::Configuration(
                "max_iterations must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
