//! Viewer constants gathered in one place, plus the mesh path prompt
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::raster::Rgb;
use crate::shading::ShadeRamp;

/// Multiplier applied to every coordinate on load
pub const DEFAULT_SCALE: f64 = 100.0;

/// Radians of rotation per pixel of drag
pub const DEFAULT_SENSITIVITY: f64 = 0.01;

/// Rotation compositions between re-orthonormalization passes
pub const DEFAULT_RENORMALIZE_INTERVAL: u32 = 64;

/// Everything a session needs besides the mesh itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    /// Frame buffer width in pixels
    pub width: usize,
    /// Frame buffer height in pixels
    pub height: usize,
    /// Coordinate scale applied by the loader
    pub scale: f64,
    /// Drag sensitivity in radians per pixel
    pub sensitivity: f64,
    /// Clear color for each frame
    pub background: Rgb,
    /// Face outline color
    pub outline: Rgb,
    /// Flat shading ramp
    pub shade: ShadeRamp,
    /// Re-orthonormalize the cumulative rotation after this many updates; `None` never does
    pub renormalize_interval: Option<u32>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            scale: DEFAULT_SCALE,
            sensitivity: DEFAULT_SENSITIVITY,
            background: Rgb::WHITE,
            outline: Rgb::BLACK,
            shade: ShadeRamp::default(),
            renormalize_interval: Some(DEFAULT_RENORMALIZE_INTERVAL),
        }
    }
}

/// Prompt for the object description path when none was given on the command line
pub fn prompt_mesh_path<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<PathBuf> {
    write!(output, "Enter the filename of the 3D object: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no filename given"));
    }
    Ok(PathBuf::from(line.trim()))
}
