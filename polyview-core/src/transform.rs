//! Cumulative rotation state driven by pointer drags
use nalgebra::{Matrix3, Point3, Unit, Vector3};

use crate::geometry::Mesh;

/// Build a rotation matrix from a unit axis and an angle (Rodrigues' formula)
pub fn rodrigues(axis: &Unit<Vector3<f64>>, angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    Matrix3::new(
        t * x * x + c,     t * x * y - z * s, t * x * z + y * s,
        t * x * y + z * s, t * y * y + c,     t * y * z - x * s,
        t * x * z - y * s, t * y * z + x * s, t * z * z + c,
    )
}

/// Incremental rotation for a drag of `(dx, dy)` screen pixels.
///
/// Vertical motion turns the object about the x axis and horizontal motion
/// about the y axis, both negated for the top-left screen origin. Returns
/// `None` when there is no motion.
pub fn drag_rotation(dx: i32, dy: i32, sensitivity: f64) -> Option<Matrix3<f64>> {
    let axis = Vector3::new(-f64::from(dy), -f64::from(dx), 0.0);
    let magnitude = axis.norm();
    if magnitude == 0.0 {
        return None;
    }

    let angle = magnitude * sensitivity;
    Some(rodrigues(&Unit::new_normalize(axis), angle))
}

/// Total rotation accumulated since the mesh was loaded
#[derive(Debug, Clone, PartialEq)]
pub struct Rotation {
    matrix: Matrix3<f64>,
    updates: u32,
    renormalize_interval: Option<u32>,
}

impl Rotation {
    pub fn identity() -> Self {
        Self::with_renormalize_interval(None)
    }

    /// Identity rotation that re-orthonormalizes itself every `interval` compositions
    pub fn with_renormalize_interval(interval: Option<u32>) -> Self {
        Self {
            matrix: Matrix3::identity(),
            updates: 0,
            renormalize_interval: interval.filter(|&n| n > 0),
        }
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Number of increments composed so far
    pub fn updates(&self) -> u32 {
        self.updates
    }

    /// Apply `increment` in world space, before everything accumulated so far
    pub fn compose(&mut self, increment: &Matrix3<f64>) {
        self.matrix = increment * self.matrix;
        self.updates = self.updates.wrapping_add(1);

        if let Some(interval) = self.renormalize_interval {
            if self.updates % interval == 0 {
                self.renormalize();
            }
        }
    }

    /// Fold a drag of `(dx, dy)` pixels into the rotation. Returns false for a zero drag.
    pub fn apply_drag(&mut self, dx: i32, dy: i32, sensitivity: f64) -> bool {
        match drag_rotation(dx, dy, sensitivity) {
            Some(increment) => {
                self.compose(&increment);
                true
            }
            None => false,
        }
    }

    /// Restore orthonormality lost to floating point drift (Gram-Schmidt on the columns)
    pub fn renormalize(&mut self) {
        let x = self.matrix.column(0).normalize();
        let y = self.matrix.column(1).into_owned();
        let y = (y - x * x.dot(&y)).normalize();
        let z = x.cross(&y);

        self.matrix = Matrix3::from_columns(&[x, y, z]);
    }

    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let m = &self.matrix;
        (m * m.transpose() - Matrix3::identity()).norm() < tolerance
            && (m.determinant() - 1.0).abs() < tolerance
    }

    pub fn reset(&mut self) {
        self.matrix = Matrix3::identity();
        self.updates = 0;
    }

    pub fn rotate(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.matrix * point.coords)
    }

    /// Rotated position of every mesh vertex, indexed like [`Mesh::vertices`]
    pub fn rotate_all(&self, mesh: &Mesh) -> Vec<Point3<f64>> {
        mesh.vertices()
            .iter()
            .map(|vertex| self.rotate(&vertex.position))
            .collect()
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

/// Last pointer position seen during a drag gesture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragTracker {
    last: (i32, i32),
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> (i32, i32) {
        self.last
    }

    /// Start a gesture at `(x, y)`
    pub fn press(&mut self, x: i32, y: i32) {
        self.last = (x, y);
    }

    /// Move to `(x, y)`, returning the displacement from the previous position
    pub fn drag(&mut self, x: i32, y: i32) -> (i32, i32) {
        let delta = (x - self.last.0, y - self.last.1);
        self.last = (x, y);
        delta
    }
}
