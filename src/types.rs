//! Shared type aliases.
//!
//! Observations are plain `nalgebra` points; the engine itself is generic and
//! places no requirement on them beyond being cheap to share across threads.

use nalgebra::{DMatrix, Point2, Point3};

/// Row-major input matrix accepted by the high-level API, one observation per row.
pub type DataMatrix = DMatrix<f64>;

/// Two-dimensional observation used by [`Line2D`](crate::models::Line2D).
pub type Point2D = Point2<f64>;

/// Three-dimensional observation used by [`Plane3D`](crate::models::Plane3D).
pub type Point3D = Point3<f64>;
