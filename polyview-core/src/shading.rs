//! Flat shading against the fixed view axis
use nalgebra::{Point3, Vector3};

use crate::geometry::Face;
use crate::raster::Rgb;

/// Unnormalized face normal from the face's first three vertices
pub fn face_normal(face: &Face, rotated: &[Point3<f64>]) -> Vector3<f64> {
    let [i0, i1, i2] = face.leading();
    let v0 = rotated[i0];
    let edge1 = rotated[i1] - v0;
    let edge2 = rotated[i2] - v0;

    edge1.cross(&edge2)
}

/// Unsigned cosine between the normal and the view axis, in `[0, 1]`.
///
/// Front and back faces with the same tilt get the same value. A zero
/// normal is used as-is and yields zero.
pub fn intensity(normal: &Vector3<f64>) -> f64 {
    let unit = normal.try_normalize(0.0).unwrap_or(*normal);
    unit.dot(&Vector3::z()).abs().min(1.0)
}

/// Linear blue ramp from `dark` (intensity 0) to `bright` (intensity 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadeRamp {
    pub dark: u8,
    pub bright: u8,
}

impl ShadeRamp {
    pub fn new(dark: u8, bright: u8) -> Self {
        Self { dark, bright }
    }

    pub fn color(&self, intensity: f64) -> Rgb {
        let dark = f64::from(self.dark);
        let span = f64::from(self.bright) - dark;
        let blue = (dark + span * intensity.clamp(0.0, 1.0)) as u8;
        Rgb::new(0x00, 0x00, blue)
    }

    /// Color of a face under the current rotation
    pub fn shade_face(&self, face: &Face, rotated: &[Point3<f64>]) -> Rgb {
        self.color(intensity(&face_normal(face, rotated)))
    }
}

impl Default for ShadeRamp {
    fn default() -> Self {
        Self::new(0x5F, 0xFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_endpoints() {
        let ramp = ShadeRamp::default();
        assert_eq!(ramp.color(0.0), Rgb::new(0, 0, 0x5F));
        assert_eq!(ramp.color(1.0), Rgb::new(0, 0, 0xFF));
        assert_eq!(ramp.color(0.5), Rgb::new(0, 0, 0xAF));
    }

    #[test]
    fn test_normal_from_leading_vertices() {
        let rotated = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
            Point3::new(5.0, 5.0, 40.0),
        ];
        let quad = Face::new(vec![0, 1, 2, 3]);
        assert_eq!(face_normal(&quad, &rotated), Vector3::new(0.0, 0.0, 6.0));
        assert!((intensity(&face_normal(&quad, &rotated)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_facing_direction_ignored() {
        let front = Vector3::new(0.0, 1.0, 1.0);
        let back = Vector3::new(0.0, 1.0, -1.0);
        assert!((intensity(&front) - intensity(&back)).abs() < 1e-12);
        assert!((intensity(&front) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_zero_normal() {
        assert_eq!(intensity(&Vector3::zeros()), 0.0);
        assert_eq!(ShadeRamp::default().color(intensity(&Vector3::zeros())), Rgb::new(0, 0, 0x5F));
    }

    #[test]
    fn test_shading_is_continuous() {
        let ramp = ShadeRamp::default();
        let target = Vector3::new(0.3, -0.4, 0.8);
        let expected = ramp.color(intensity(&target));
        for k in 1..6 {
            let eps = 10f64.powi(-(k * 2));
            let nearby = target + Vector3::new(eps, -eps, eps);
            let blue = ramp.color(intensity(&nearby)).b;
            assert!((i16::from(blue) - i16::from(expected.b)).abs() <= 1);
        }
        for i in 0..=100 {
            let value = intensity(&Vector3::new(1.0, 0.0, f64::from(i) / 10.0));
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
