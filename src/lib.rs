//! # Consensus - Parallel, Reproducible RANSAC
//!
//! `consensus` fits a parametric model to noisy, outlier-contaminated data by
//! random sample consensus: many independent trials each fit a candidate from
//! a random minimal sample, score it by how many of the remaining
//! observations it explains, and the best candidate wins.
//!
//! Trials run on a rayon worker pool. Each trial draws from its own random
//! stream derived from a base seed and the trial index, and the winner is
//! picked by a sequential scan in trial order, so a fixed seed gives the same
//! result whatever the thread count.
//!
//! ## Quick Start
//!
//! ```rust
//! use consensus::{estimate_line, RansacSettings};
//! use nalgebra::DMatrix;
//!
//! // Points on y = 2x + 1 and one outlier.
//! let points = DMatrix::from_row_slice(5, 2, &[
//!     0.0, 1.0,
//!     1.0, 3.0,
//!     2.0, 5.0,
//!     3.0, 7.0,
//!     1.0, -4.0,
//! ]);
//!
//! let settings = RansacSettings::default().with_seed(42);
//! let result = estimate_line(&points, 0.1, Some(settings)).unwrap();
//! assert!((result.model.slope() - 2.0).abs() < 1e-9);
//! ```
//!
//! ## Custom models
//!
//! Implement [`Model`](core::Model) for your own type and hand it to
//! [`Ransac`](core::Ransac):
//!
//! ```rust
//! use consensus::{check_sample_size, FitError, Model, Ransac, RansacSettings};
//!
//! /// A constant value, fitted from a single observation.
//! struct Level(f64);
//!
//! impl Model for Level {
//!     type Observation = f64;
//!     const SAMPLE_SIZE: usize = 1;
//!
//!     fn fit(sample: &[&f64]) -> Result<Self, FitError> {
//!         check_sample_size::<Self>(sample)?;
//!         Ok(Level(*sample[0]))
//!     }
//!
//!     fn distance_to(&self, observation: &f64) -> f64 {
//!         (observation - self.0).abs()
//!     }
//! }
//!
//! let data = [1.0, 1.01, 0.99, 7.5, 1.0];
//! let mut ransac = Ransac::<Level>::new(RansacSettings::new(0.05, 50).with_seed(1)).unwrap();
//! ransac.estimate(&data).unwrap();
//! assert_eq!(ransac.best_inliers().len(), 3);
//! ```
//!
//! ## Modules
//!
//! - **[`api`](api)**: High-level functions for the built-in models
//! - **[`core`](core)**: The `Model` trait and the `Ransac` estimator
//! - **[`models`](models)**: Built-in line and plane models
//! - **[`samplers`](samplers)**: Minimal-sample drawing
//! - **[`scoring`](scoring)**: Consensus scoring
//! - **[`settings`](settings)**: Configuration
//! - **[`error`](error)**: Error types

pub mod api;
pub mod core;
pub mod error;
pub mod models;
pub mod samplers;
pub mod scoring;
pub mod settings;
pub mod types;
pub mod utils;

pub use api::{estimate_line, estimate_plane, EstimationResult};
pub use core::{check_sample_size, Model, Ransac};
pub use error::{FitError, RansacError};
pub use models::{Line2D, Plane3D};
pub use scoring::Evaluation;
pub use settings::RansacSettings;
