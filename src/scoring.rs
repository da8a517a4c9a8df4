//! Consensus scoring.
//!
//! A trial is scored by the fraction of its evaluation batch that falls
//! strictly within the inlier threshold of the fitted model.

/// Outcome of scoring one model against a batch of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<'a, O> {
    /// `inliers.len() / batch.len()`, or 0 for an empty batch.
    pub inlier_fraction: f64,
    /// Inliers in the order they appeared in the batch.
    pub inliers: Vec<&'a O>,
}

impl<O> Evaluation<'_, O> {
    /// Zero-consensus result, used for empty batches and failed fits.
    pub fn empty() -> Self {
        Self {
            inlier_fraction: 0.0,
            inliers: Vec::new(),
        }
    }

    pub fn inlier_count(&self) -> usize {
        self.inliers.len()
    }
}

/// Partition `batch` by `distance(obs) < threshold`.
pub fn inlier_consensus<'a, O, F>(batch: &[&'a O], threshold: f64, distance: F) -> Evaluation<'a, O>
where
    F: Fn(&O) -> f64,
{
    if batch.is_empty() {
        return Evaluation::empty();
    }

    let inliers: Vec<&'a O> = batch
        .iter()
        .copied()
        .filter(|obs| distance(*obs) < threshold)
        .collect();
    let inlier_fraction = inliers.len() as f64 / batch.len() as f64;

    Evaluation {
        inlier_fraction,
        inliers,
    }
}
