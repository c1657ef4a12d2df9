//! Viewer session: pointer event dispatch and the per-frame render pass
use crate::config::ViewerConfig;
use crate::geometry::Mesh;
use crate::projection::{ScreenPoint, Viewport};
use crate::raster::{depth_order, FrameBuffer, Rgb};
use crate::transform::{DragTracker, Rotation};

/// Pointer input delivered by a display surface, in frame-buffer pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Primary button went down
    Press { x: i32, y: i32 },
    /// Pointer moved with the primary button held
    Drag { x: i32, y: i32 },
}

/// One face ready to rasterize
#[derive(Debug, Clone, PartialEq)]
pub struct FaceDraw {
    /// Index into [`Mesh::faces`]
    pub face: usize,
    /// Average rotated depth used for ordering
    pub depth: f64,
    pub color: Rgb,
    /// Projected vertices in source winding order
    pub points: Vec<ScreenPoint>,
}

/// A display that can show finished frames
pub trait Surface {
    type Error;

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error>;
}

/// Mesh plus the mutable view state built up by user input
#[derive(Debug, Clone)]
pub struct Session {
    mesh: Mesh,
    config: ViewerConfig,
    viewport: Viewport,
    rotation: Rotation,
    tracker: DragTracker,
}

impl Session {
    pub fn new(mesh: Mesh, config: ViewerConfig) -> Self {
        Self {
            mesh,
            viewport: Viewport::new(config.width, config.height),
            rotation: Rotation::with_renormalize_interval(config.renormalize_interval),
            tracker: DragTracker::new(),
            config,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Update view state for `event`. Returns true when a redraw is needed.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Press { x, y } => {
                self.tracker.press(x, y);
                false
            }
            PointerEvent::Drag { x, y } => {
                let (dx, dy) = self.tracker.drag(x, y);
                if self.rotation.apply_drag(dx, dy, self.config.sensitivity) {
                    log::debug!("Drag ({}, {}) -> {} rotation updates", dx, dy, self.rotation.updates());
                }
                true
            }
        }
    }

    /// Rotate, depth-sort, shade and project every face, farthest first
    pub fn plan(&self) -> Vec<FaceDraw> {
        let rotated = self.rotation.rotate_all(&self.mesh);
        let faces = self.mesh.faces();

        depth_order(faces, &rotated)
            .into_iter()
            .map(|(index, depth)| {
                let face = &faces[index];
                let color = self.config.shade.shade_face(face, &rotated);
                let points = face
                    .indices
                    .iter()
                    .map(|&i| self.viewport.project(&rotated[i]))
                    .collect();
                log::trace!("Face {} at depth {:.3}: {}", index, depth, color);

                FaceDraw {
                    face: index,
                    depth,
                    color,
                    points,
                }
            })
            .collect()
    }

    /// Draw a complete frame into a fresh buffer
    pub fn render(&self) -> FrameBuffer {
        let mut frame = FrameBuffer::new(self.config.width, self.config.height, self.config.background);
        for draw in self.plan() {
            frame.draw_polygon(&draw.points, draw.color, self.config.outline);
        }
        frame
    }
}

/// A session bound to the surface that shows its frames
pub struct Viewer<S: Surface> {
    session: Session,
    surface: S,
    frames: u64,
}

impl<S: Surface> Viewer<S> {
    pub fn new(session: Session, surface: S) -> Self {
        Self {
            session,
            surface,
            frames: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Render the current state and hand it to the surface
    pub fn redraw(&mut self) -> Result<(), S::Error> {
        let frame = self.session.render();
        self.surface.present(&frame)?;
        self.frames += 1;
        Ok(())
    }

    /// Handle one pointer event, redrawing if the view changed
    pub fn dispatch(&mut self, event: PointerEvent) -> Result<(), S::Error> {
        if self.session.handle(event) {
            self.redraw()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_mesh;
    use std::convert::Infallible;

    const TETRAHEDRON: &str = include_str!("../../assets/tetrahedron.txt");

    #[derive(Default)]
    struct Recorder {
        frames: Vec<FrameBuffer>,
    }

    impl Surface for Recorder {
        type Error = Infallible;

        fn present(&mut self, frame: &FrameBuffer) -> Result<(), Infallible> {
            self.frames.push(frame.clone());
            Ok(())
        }
    }

    fn tetrahedron() -> Session {
        Session::new(parse_mesh(TETRAHEDRON, 100.0).unwrap(), ViewerConfig::default())
    }

    #[test]
    fn test_tetrahedron_plan() {
        let plan = tetrahedron().plan();
        assert_eq!(plan.len(), 4);

        let order: Vec<usize> = plan.iter().map(|d| d.face).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);

        let blues: Vec<u8> = plan.iter().map(|d| d.color.b).collect();
        assert_eq!(blues, vec![0x5F, 0x5F, 0xBB, 0xFF]);
        assert!(plan.iter().all(|d| d.color.r == 0 && d.color.g == 0));

        assert!((plan[0].depth - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(plan[3].depth, 0.0);
        assert_eq!(
            plan[3].points,
            vec![ScreenPoint::new(400, 300), ScreenPoint::new(500, 300), ScreenPoint::new(400, 200)]
        );
    }

    #[test]
    fn test_tetrahedron_render() {
        let frame = tetrahedron().render();
        assert_eq!((frame.width(), frame.height()), (800, 600));
        // The z-facing face is drawn last, over the sloped one
        assert_eq!(frame.pixel(420, 280), Some(Rgb::new(0, 0, 0xFF)));
        assert_eq!(frame.pixel(400, 250), Some(Rgb::BLACK));
        assert_eq!(frame.pixel(10, 10), Some(Rgb::WHITE));
    }

    #[test]
    fn test_plan_is_repeatable() {
        let mut session = tetrahedron();
        session.handle(PointerEvent::Press { x: 10, y: 10 });
        session.handle(PointerEvent::Drag { x: 40, y: 25 });
        assert_eq!(session.plan(), session.plan());
    }

    #[test]
    fn test_press_does_not_redraw() {
        let mut session = tetrahedron();
        assert!(!session.handle(PointerEvent::Press { x: 5, y: 5 }));
        assert_eq!(*session.rotation().matrix(), nalgebra::Matrix3::identity());
    }

    #[test]
    fn test_drag_rotates_and_redraws() {
        let mut session = tetrahedron();
        session.handle(PointerEvent::Press { x: 100, y: 100 });
        assert!(session.handle(PointerEvent::Drag { x: 100, y: 100 }));
        assert_eq!(session.rotation().updates(), 0);

        assert!(session.handle(PointerEvent::Drag { x: 130, y: 100 }));
        assert_eq!(session.rotation().updates(), 1);
        assert!(session.rotation().is_orthonormal(1e-12));
    }

    #[test]
    fn test_viewer_presents_each_redraw() {
        let mut viewer = Viewer::new(tetrahedron(), Recorder::default());
        viewer.redraw().unwrap();
        viewer.dispatch(PointerEvent::Press { x: 0, y: 0 }).unwrap();
        viewer.dispatch(PointerEvent::Drag { x: 15, y: 0 }).unwrap();
        viewer.dispatch(PointerEvent::Drag { x: 30, y: 5 }).unwrap();

        assert_eq!(viewer.frames(), 3);
        let frames = &viewer.surface().frames;
        assert_eq!(frames.len(), 3);
        assert_ne!(frames[0], frames[2]);
    }

    #[test]
    fn test_empty_mesh_renders_background() {
        let session = Session::new(Mesh::new(), ViewerConfig::default());
        assert!(session.plan().is_empty());
        assert!(session.render().pixels().iter().all(|&p| p == Rgb::WHITE));
    }
}
