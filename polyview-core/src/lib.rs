//! Polyview Core Library - mesh loading, rotation and software rendering
//!
//! This library holds everything a display frontend needs: the object
//! description parser, the drag-driven cumulative rotation, orthographic
//! projection, flat shading, and the painter's-algorithm rasterizer that
//! turns a session into an RGB frame buffer.

pub mod config;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod projection;
pub mod raster;
pub mod session;
pub mod shading;
pub mod transform;

// Re-export commonly used types
pub use config::{prompt_mesh_path, ViewerConfig};
pub use error::LoadError;
pub use geometry::{Face, Mesh, Vertex, VertexId};
pub use loader::{load_mesh, parse_mesh};
pub use projection::{ScreenPoint, Viewport};
pub use raster::{FrameBuffer, Rgb};
pub use session::{FaceDraw, PointerEvent, Session, Surface, Viewer};
pub use shading::ShadeRamp;
pub use transform::{DragTracker, Rotation};
