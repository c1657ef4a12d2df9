//! Software rasterizer: RGB frame buffer, polygon fill and outline, and
//! back-to-front face ordering for the painter's algorithm
use nalgebra::Point3;
use std::fmt;

use crate::geometry::Face;
use crate::projection::ScreenPoint;

/// An opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packed `0x00RRGGBB`
    pub fn to_u32(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A fixed-size RGB pixel buffer, row-major from the top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl FrameBuffer {
    /// A buffer cleared to `background`
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Write a pixel; coordinates outside the buffer are ignored
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.pixels[idx] = color;
    }

    /// Fill a closed polygon with the even-odd rule.
    ///
    /// Each pixel row is sampled at its integer y; an edge covers rows from its
    /// upper endpoint up to, not including, its lower one, so shared vertices
    /// are not counted twice.
    pub fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb) {
        if points.len() < 3 || self.width == 0 || self.height == 0 {
            return;
        }

        let min_y = points.iter().map(|p| p.y).min().unwrap_or(0).max(0) as i64;
        let max_y = (points.iter().map(|p| p.y).max().unwrap_or(0) as i64).min(self.height as i64 - 1);
        let max_x = self.width as i64 - 1;

        let mut crossings: Vec<f64> = Vec::with_capacity(points.len());
        for y in min_y..=max_y {
            let yf = y as f64;
            crossings.clear();

            for (a, b) in edges(points) {
                let (ay, by) = (f64::from(a.y), f64::from(b.y));
                if (ay <= yf && yf < by) || (by <= yf && yf < ay) {
                    let t = (yf - ay) / (by - ay);
                    crossings.push(f64::from(a.x) + t * (f64::from(b.x) - f64::from(a.x)));
                }
            }
            crossings.sort_by(f64::total_cmp);

            for span in crossings.chunks_exact(2) {
                let start = (span[0].ceil() as i64).max(0);
                let end = (span[1].floor() as i64).min(max_x);
                for x in start..=end {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Draw the closed outline of a polygon
    pub fn stroke_polygon(&mut self, points: &[ScreenPoint], color: Rgb) {
        if points.len() == 1 {
            self.set_pixel(points[0].x.into(), points[0].y.into(), color);
        }
        if points.len() < 2 {
            return;
        }
        for (a, b) in edges(points) {
            self.draw_line(a, b, color);
        }
    }

    /// Filled polygon with an outline on top
    pub fn draw_polygon(&mut self, points: &[ScreenPoint], fill: Rgb, outline: Rgb) {
        self.fill_polygon(points, fill);
        self.stroke_polygon(points, outline);
    }

    /// Bresenham line between two points, inclusive
    pub fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb) {
        let (mut x0, mut y0) = (i64::from(from.x), i64::from(from.y));
        let (x1, y1) = (i64::from(to.x), i64::from(to.y));

        // Both ends past the same edge: nothing to draw
        let (w, h) = (self.width as i64, self.height as i64);
        if (x0 < 0 && x1 < 0) || (y0 < 0 && y1 < 0) || (x0 >= w && x1 >= w) || (y0 >= h && y1 >= h) {
            return;
        }

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Packed `0x00RRGGBB` pixels, the layout window surfaces blit
    pub fn to_argb_u32(&self) -> Vec<u32> {
        self.pixels.iter().map(|p| p.to_u32()).collect()
    }

    /// Interleaved RGBA bytes with full alpha, the layout canvas `ImageData` expects
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| [p.r, p.g, p.b, 0xFF])
            .collect()
    }
}

/// Consecutive vertex pairs, closing back to the first
fn edges(points: &[ScreenPoint]) -> impl Iterator<Item = (ScreenPoint, ScreenPoint)> + '_ {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(&a, &b)| (a, b))
}

/// Mean rotated z over every vertex of the face
pub fn average_depth(face: &Face, rotated: &[Point3<f64>]) -> f64 {
    let sum: f64 = face.indices.iter().map(|&i| rotated[i].z).sum();
    sum / face.len() as f64
}

/// Indices ordered by descending depth; equal depths keep their input order
pub fn back_to_front(depths: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..depths.len()).collect();
    order.sort_by(|&a, &b| depths[b].total_cmp(&depths[a]));
    order
}

/// Painter's-algorithm draw order for `faces`, farthest (largest z) first,
/// paired with each face's average depth
pub fn depth_order(faces: &[Face], rotated: &[Point3<f64>]) -> Vec<(usize, f64)> {
    let depths: Vec<f64> = faces.iter().map(|face| average_depth(face, rotated)).collect();
    back_to_front(&depths)
        .into_iter()
        .map(|i| (i, depths[i]))
        .collect()
}
