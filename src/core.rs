//! Core RANSAC trait and estimation loop.
//!
//! - [`Model`] is the contract a pluggable model type implements: fit from a
//!   minimal sample, measure distance to an observation, and score a batch.
//! - [`Ransac`] runs a fixed number of independent trials in parallel and
//!   keeps the best-scoring model together with its consensus set.

use log::{debug, trace, warn};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{FitError, RansacError};
use crate::samplers::UniformRandomSampler;
use crate::scoring::{inlier_consensus, Evaluation};
use crate::settings::RansacSettings;
use crate::utils::entropy_seed;

/// A parametric model that can be hypothesised from a minimal sample.
pub trait Model: Sized + Send {
    /// Observation type this model is fitted to and scored against.
    type Observation: Clone + Send + Sync;

    /// Number of observations in a minimal sample.
    const SAMPLE_SIZE: usize;

    /// Fit a model from exactly [`Self::SAMPLE_SIZE`] observations.
    fn fit(sample: &[&Self::Observation]) -> Result<Self, FitError>;

    /// Non-negative distance from `observation` to the model.
    fn distance_to(&self, observation: &Self::Observation) -> f64;

    /// Split `batch` into inliers (`distance < threshold`) and the rest.
    fn evaluate<'a>(
        &self,
        batch: &[&'a Self::Observation],
        threshold: f64,
    ) -> Evaluation<'a, Self::Observation> {
        inlier_consensus(batch, threshold, |obs| self.distance_to(obs))
    }
}

/// Fail with [`FitError::SampleSizeMismatch`] unless `sample` holds exactly
/// `M::SAMPLE_SIZE` observations.
pub fn check_sample_size<M: Model>(sample: &[&M::Observation]) -> Result<(), FitError> {
    if sample.len() != M::SAMPLE_SIZE {
        return Err(FitError::SampleSizeMismatch {
            expected: M::SAMPLE_SIZE,
            actual: sample.len(),
        });
    }
    Ok(())
}

/// Result slot of one sample → fit → evaluate cycle.
struct Trial<'a, M: Model> {
    model: Option<M>,
    sample: Vec<&'a M::Observation>,
    evaluation: Evaluation<'a, M::Observation>,
}

impl<M: Model> Trial<'_, M> {
    /// Score used by the reduction; `None` when the fit failed.
    fn score(&self) -> Option<f64> {
        self.model.as_ref().map(|_| self.evaluation.inlier_fraction)
    }
}

fn run_trial<'a, M: Model>(
    data: &'a [M::Observation],
    base_seed: u64,
    index: usize,
    threshold: f64,
) -> Trial<'a, M> {
    let mut sampler = UniformRandomSampler::for_trial(base_seed, index);
    let Some(draw) = sampler.sample(data, M::SAMPLE_SIZE) else {
        return Trial {
            model: None,
            sample: Vec::new(),
            evaluation: Evaluation::empty(),
        };
    };

    match M::fit(&draw.sample) {
        Ok(model) => {
            let evaluation = model.evaluate(&draw.remainder, threshold);
            Trial {
                model: Some(model),
                sample: draw.sample,
                evaluation,
            }
        }
        Err(err) => {
            trace!("trial {index}: {err}");
            Trial {
                model: None,
                sample: draw.sample,
                evaluation: Evaluation::empty(),
            }
        }
    }
}

/// Index of the winning trial.
///
/// Scans in trial order and only replaces the current best on a strictly
/// greater score, so the earliest trial wins ties. Failed trials (`None`)
/// never win.
fn select_best<I>(scores: I) -> Option<usize>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, score) in scores.into_iter().enumerate() {
        let Some(score) = score else {
            continue;
        };
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}

/// Parallel RANSAC estimator.
///
/// After a successful [`estimate`](Self::estimate) the best model and its
/// inliers stay available until the next successful call replaces them.
/// A failed call leaves them untouched.
///
/// With `parallelism` set, the estimator owns its worker pool, built once
/// and reused by every call.
pub struct Ransac<M: Model> {
    settings: RansacSettings,
    pool: Option<ThreadPool>,
    best_model: Option<M>,
    best_sample: Vec<M::Observation>,
    best_inliers: Vec<M::Observation>,
    best_score: Option<f64>,
    trials: usize,
}

impl<M: Model> Ransac<M> {
    /// Create an estimator from validated settings.
    pub fn new(settings: RansacSettings) -> Result<Self, RansacError> {
        settings.validate()?;
        let pool = build_pool(settings.parallelism)?;
        Ok(Self {
            settings,
            pool,
            best_model: None,
            best_sample: Vec::new(),
            best_inliers: Vec::new(),
            best_score: None,
            trials: 0,
        })
    }

    /// Shorthand for [`Ransac::new`] with default settings apart from the
    /// threshold and iteration count.
    pub fn with_threshold(threshold: f64, max_iterations: usize) -> Result<Self, RansacError> {
        Self::new(RansacSettings::new(threshold, max_iterations))
    }

    /// Replace the threshold and iteration count. Previous results are kept.
    pub fn initialize(&mut self, threshold: f64, max_iterations: usize) -> Result<(), RansacError> {
        let settings = RansacSettings {
            inlier_threshold: threshold,
            max_iterations,
            ..self.settings.clone()
        };
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Change the number of worker threads, rebuilding the pool only when
    /// the value differs. Previous results are kept.
    pub fn set_parallelism(&mut self, threads: Option<usize>) -> Result<(), RansacError> {
        if threads == self.settings.parallelism {
            return Ok(());
        }
        self.pool = build_pool(threads)?;
        self.settings.parallelism = threads;
        Ok(())
    }

    pub fn settings(&self) -> &RansacSettings {
        &self.settings
    }

    /// Best model of the last successful run, if any trial produced one.
    pub fn best_model(&self) -> Option<&M> {
        self.best_model.as_ref()
    }

    /// The minimal sample the best model was fitted from.
    pub fn best_sample(&self) -> &[M::Observation] {
        &self.best_sample
    }

    /// Consensus set of the best model.
    ///
    /// Drawn from the winning trial's evaluation batch only, so the minimal
    /// sample is excluded unless `include_minimal_sample` is set.
    pub fn best_inliers(&self) -> &[M::Observation] {
        &self.best_inliers
    }

    /// Inlier fraction of the best model over its evaluation batch.
    pub fn best_score(&self) -> Option<f64> {
        self.best_score
    }

    /// Take the best model and its inliers out of the estimator.
    pub fn into_best(self) -> Option<(M, Vec<M::Observation>)> {
        let inliers = self.best_inliers;
        self.best_model.map(|model| (model, inliers))
    }

    /// Number of trials run by the last successful call.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Run `max_iterations` trials over `data` and keep the best model.
    ///
    /// Fails with [`RansacError::InsufficientData`] without running any
    /// trial when `data` has no more than `M::SAMPLE_SIZE` observations.
    pub fn estimate(&mut self, data: &[M::Observation]) -> Result<(), RansacError> {
        let required = M::SAMPLE_SIZE;
        if data.len() <= required {
            warn!(
                "ransac: {} observations is not enough for a sample of {}, skipping",
                data.len(),
                required
            );
            return Err(RansacError::InsufficientData {
                len: data.len(),
                required,
            });
        }

        let base_seed = self.settings.seed.unwrap_or_else(entropy_seed);
        debug!(
            "ransac: {} trials over {} observations, seed {base_seed}",
            self.settings.max_iterations,
            data.len()
        );

        let mut trials = self.run_trials(data, base_seed);
        let trial_count = trials.len();
        let winner = select_best(trials.iter().map(Trial::score));

        let (best_model, best_sample, best_inliers, best_score) = match winner {
            Some(index) => {
                let trial = trials.swap_remove(index);
                debug!(
                    "ransac: trial {index} wins with {} inliers, fraction {:.4}",
                    trial.evaluation.inlier_count(),
                    trial.evaluation.inlier_fraction
                );
                let sample: Vec<M::Observation> = trial.sample.into_iter().cloned().collect();
                let mut inliers = Vec::with_capacity(sample.len() + trial.evaluation.inliers.len());
                if self.settings.include_minimal_sample {
                    inliers.extend(sample.iter().cloned());
                }
                inliers.extend(trial.evaluation.inliers.into_iter().cloned());
                (
                    trial.model,
                    sample,
                    inliers,
                    Some(trial.evaluation.inlier_fraction),
                )
            }
            None => {
                warn!("ransac: no trial produced a model, all samples were degenerate");
                (None, Vec::new(), Vec::new(), None)
            }
        };

        self.best_model = best_model;
        self.best_sample = best_sample;
        self.best_inliers = best_inliers;
        self.best_score = best_score;
        self.trials = trial_count;
        Ok(())
    }

    /// Run every trial and collect the results in trial order.
    fn run_trials<'a>(
        &self,
        data: &'a [M::Observation],
        base_seed: u64,
    ) -> Vec<Trial<'a, M>> {
        let threshold = self.settings.inlier_threshold;
        let iterations = self.settings.max_iterations;
        let run = || {
            (0..iterations)
                .into_par_iter()
                .map(|index| run_trial::<M>(data, base_seed, index, threshold))
                .collect::<Vec<_>>()
        };

        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

/// Worker pool for `threads` workers (0 is clamped to 1), or `None` to use
/// rayon's current pool.
fn build_pool(threads: Option<usize>) -> Result<Option<ThreadPool>, RansacError> {
    threads
        .map(|threads| ThreadPoolBuilder::new().num_threads(threads.max(1)).build())
        .transpose()
        .map_err(RansacError::from)
}
