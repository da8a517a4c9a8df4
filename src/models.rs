//! Geometric models that plug into [`Ransac`](crate::core::Ransac).

use nalgebra::Vector3;

use crate::core::{check_sample_size, Model};
use crate::error::FitError;
use crate::types::{Point2D, Point3D};

/// Degeneracy tolerance, relative to the extent of the sample.
const RELATIVE_EPS: f64 = 1e-12;

/// 2D line `y = m x + d`, stored as `a x + b y + c = 0` with `a = m`, `b = -1`, `c = d`.
///
/// The point-line distance denominator `sqrt(a² + b²)` is cached at fit time.
/// Vertical lines cannot be represented in this form, so a pair of points
/// with equal `x` (coincident points included) is a degenerate sample.
#[derive(Clone, Debug, PartialEq)]
pub struct Line2D {
    a: f64,
    b: f64,
    c: f64,
    denominator: f64,
}

impl Line2D {
    /// Line through two points, or `None` when they share an `x` coordinate
    /// up to rounding at their scale.
    pub fn through(p: &Point2D, q: &Point2D) -> Option<Self> {
        let dx = q.x - p.x;
        if !(dx.abs() > RELATIVE_EPS * p.x.abs().max(q.x.abs())) {
            return None;
        }
        let slope = (q.y - p.y) / dx;
        if !slope.is_finite() {
            return None;
        }
        let intercept = p.y - slope * p.x;
        Some(Self {
            a: slope,
            b: -1.0,
            c: intercept,
            denominator: (slope * slope + 1.0).sqrt(),
        })
    }

    pub fn slope(&self) -> f64 {
        self.a
    }

    pub fn intercept(&self) -> f64 {
        self.c
    }

    /// Implicit-form coefficients `[a, b, c]`.
    pub fn params(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }
}

impl Model for Line2D {
    type Observation = Point2D;
    const SAMPLE_SIZE: usize = 2;

    fn fit(sample: &[&Point2D]) -> Result<Self, FitError> {
        check_sample_size::<Self>(sample)?;
        Self::through(sample[0], sample[1]).ok_or(FitError::DegenerateSample)
    }

    fn distance_to(&self, p: &Point2D) -> f64 {
        (self.a * p.x + self.b * p.y + self.c).abs() / self.denominator
    }
}

/// 3D plane `n · p + d = 0` with unit normal `n`.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane3D {
    normal: Vector3<f64>,
    offset: f64,
}

impl Plane3D {
    /// Plane through three points, or `None` when they are collinear up to
    /// rounding, whatever the scale of the coordinates.
    pub fn through(p: &Point3D, q: &Point3D, r: &Point3D) -> Option<Self> {
        let (u, v) = (q - p, r - p);
        let normal = u.cross(&v);
        let norm = normal.norm();
        // |u x v| = |u| |v| sin(angle), so this bounds the angle between the edges.
        if !(norm > RELATIVE_EPS * u.norm() * v.norm()) {
            return None;
        }
        let normal = normal / norm;
        let offset = -normal.dot(&p.coords);
        Some(Self { normal, offset })
    }

    pub fn normal(&self) -> &Vector3<f64> {
        &self.normal
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl Model for Plane3D {
    type Observation = Point3D;
    const SAMPLE_SIZE: usize = 3;

    fn fit(sample: &[&Point3D]) -> Result<Self, FitError> {
        check_sample_size::<Self>(sample)?;
        Self::through(sample[0], sample[1], sample[2]).ok_or(FitError::DegenerateSample)
    }

    fn distance_to(&self, p: &Point3D) -> f64 {
        (self.normal.dot(&p.coords) + self.offset).abs()
    }
}
