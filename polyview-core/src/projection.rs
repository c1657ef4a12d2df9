//! Orthographic projection into screen space
use nalgebra::Point3;

/// Integer pixel position, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Fixed orthographic view centered on the world origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Screen position of the world origin
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Project a rotated point, dropping depth and flipping y.
    ///
    /// Points outside the viewport are returned as-is; callers clip when drawing.
    pub fn project(&self, point: &Point3<f64>) -> ScreenPoint {
        let (cx, cy) = self.center();
        ScreenPoint {
            x: (point.x + cx).round() as i32,
            y: (-point.y + cy).round() as i32,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_is_ignored() {
        let viewport = Viewport::default();
        for z in [-1000.0, -1.0, 0.0, 0.5, 250.0] {
            assert_eq!(viewport.project(&Point3::new(0.0, 0.0, z)), ScreenPoint::new(400, 300));
        }
    }

    #[test]
    fn test_y_axis_flipped() {
        let viewport = Viewport::default();
        assert_eq!(viewport.project(&Point3::new(100.0, 50.0, 0.0)), ScreenPoint::new(500, 250));
        assert_eq!(viewport.project(&Point3::new(-100.0, -50.0, 9.0)), ScreenPoint::new(300, 350));
    }

    #[test]
    fn test_rounding_and_no_clipping() {
        let viewport = Viewport::default();
        assert_eq!(viewport.project(&Point3::new(0.6, -0.4, 0.0)), ScreenPoint::new(401, 300));
        assert_eq!(viewport.project(&Point3::new(900.0, 700.0, 0.0)), ScreenPoint::new(1300, -400));
    }
}
