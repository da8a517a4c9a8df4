//! Error types for model fitting and the estimation loop.

use thiserror::Error;

/// Failure to fit a model from a minimal sample.
///
/// These never abort an estimation run: the trial that produced one is
/// scored as zero consensus and the loop moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FitError {
    #[error("expected a minimal sample of {expected} observations but got {actual}")]
    SampleSizeMismatch { expected: usize, actual: usize },
    #[error("sample does not determine a unique model")]
    DegenerateSample,
}

/// Errors that abort a whole estimation call.
#[derive(Debug, Error)]
pub enum RansacError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("need more than {required} observations but got {len}")]
    InsufficientData { len: usize, required: usize },
    #[error("no trial produced a model, every sample was degenerate")]
    NoModel,
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
