//! High-level API for common fitting tasks.
//!
//! These wrap [`Ransac`] for the built-in models and take observations as
//! an `N x D` matrix, one point per row.

use crate::core::{Model, Ransac};
use crate::error::RansacError;
use crate::models::{Line2D, Plane3D};
use crate::settings::RansacSettings;
use crate::types::{DataMatrix, Point2D, Point3D};

/// Result of a RANSAC estimation.
#[derive(Debug, Clone)]
pub struct EstimationResult<M, O> {
    /// The estimated model.
    pub model: M,
    /// Consensus set of the model.
    pub inliers: Vec<O>,
    /// Inlier fraction of the model over its evaluation batch.
    pub score: f64,
    /// Number of trials performed.
    pub iterations: usize,
}

fn run<M: Model>(
    data: &[M::Observation],
    threshold: f64,
    settings_opt: Option<RansacSettings>,
) -> Result<EstimationResult<M, M::Observation>, RansacError> {
    let settings = RansacSettings {
        inlier_threshold: threshold,
        ..settings_opt.unwrap_or_default()
    };
    let mut ransac = Ransac::<M>::new(settings)?;
    ransac.estimate(data)?;

    let iterations = ransac.trials();
    let score = ransac.best_score().unwrap_or(0.0);
    let (model, inliers) = ransac.into_best().ok_or(RansacError::NoModel)?;
    Ok(EstimationResult {
        model,
        inliers,
        score,
        iterations,
    })
}

fn check_columns(points: &DataMatrix, expected: usize) -> Result<(), RansacError> {
    if points.ncols() != expected {
        return Err(RansacError::Configuration(format!(
            "points must be Nx{expected} matrices, got {} columns",
            points.ncols()
        )));
    }
    Ok(())
}

/// Fit a 2D line `y = m x + d` to the rows of an `N x 2` matrix.
///
/// # Arguments
/// * `points` - 2D points (Nx2 matrix)
/// * `threshold` - Inlier threshold on the point-line distance
/// * `settings_opt` - Optional RANSAC settings (uses defaults if None); the
///   threshold argument overrides `inlier_threshold`
pub fn estimate_line(
    points: &DataMatrix,
    threshold: f64,
    settings_opt: Option<RansacSettings>,
) -> Result<EstimationResult<Line2D, Point2D>, RansacError> {
    check_columns(points, 2)?;
    let data: Vec<Point2D> = points
        .row_iter()
        .map(|row| Point2D::new(row[0], row[1]))
        .collect();
    run::<Line2D>(&data, threshold, settings_opt)
}

/// Fit a plane to the rows of an `N x 3` matrix.
pub fn estimate_plane(
    points: &DataMatrix,
    threshold: f64,
    settings_opt: Option<RansacSettings>,
) -> Result<EstimationResult<Plane3D, Point3D>, RansacError> {
    check_columns(points, 3)?;
    let data: Vec<Point3D> = points
        .row_iter()
        .map(|row| Point3D::new(row[0], row[1], row[2]))
        .collect();
    run::<Plane3D>(&data, threshold, settings_opt)
}
