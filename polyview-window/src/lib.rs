//! Desktop window frontend: blits each frame into a `minifb` window and
//! turns left-button drags into rotation
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};
use polyview_core::{FrameBuffer, PointerEvent, Session, Surface, Viewer};
use std::time::Duration;

pub const TITLE: &str = "3D Object Renderer";

/// Surface backed by a native window
pub struct WindowSurface {
    window: Window,
}

impl WindowSurface {
    pub fn open(width: usize, height: usize) -> Result<Self, minifb::Error> {
        let mut window = Window::new(TITLE, width, height, WindowOptions::default())?;
        window.limit_update_rate(Some(Duration::from_micros(16_600)));
        Ok(Self { window })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// Left button state and pointer position; positions outside the window are kept
    pub fn pointer(&self) -> (bool, Option<(i32, i32)>) {
        let down = self.window.get_mouse_down(MouseButton::Left);
        let position = self
            .window
            .get_mouse_pos(MouseMode::Pass)
            .map(|(x, y)| (x.floor() as i32, y.floor() as i32));
        (down, position)
    }

    /// Pump window events without a new frame
    pub fn idle(&mut self) {
        self.window.update();
    }
}

impl Surface for WindowSurface {
    type Error = minifb::Error;

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), minifb::Error> {
        self.window
            .update_with_buffer(&frame.to_argb_u32(), frame.width(), frame.height())
    }
}

/// Turns polled button state into press and drag events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerTracker {
    held: bool,
    last: (i32, i32),
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one poll of the button and position.
    ///
    /// A press is reported when the button goes down, then a drag for every
    /// change of position while it stays down.
    pub fn poll(&mut self, down: bool, position: Option<(i32, i32)>) -> Option<PointerEvent> {
        if !down {
            self.held = false;
            return None;
        }
        let (x, y) = position?;

        if !self.held {
            self.held = true;
            self.last = (x, y);
            return Some(PointerEvent::Press { x, y });
        }
        if (x, y) == self.last {
            return None;
        }
        self.last = (x, y);
        Some(PointerEvent::Drag { x, y })
    }
}

/// Main application struct for the window viewer
pub struct WindowApp {
    viewer: Viewer<WindowSurface>,
    tracker: PointerTracker,
}

impl WindowApp {
    pub fn new(session: Session) -> Result<Self, minifb::Error> {
        let config = session.config();
        let surface = WindowSurface::open(config.width, config.height)?;
        Ok(Self {
            viewer: Viewer::new(session, surface),
            tracker: PointerTracker::new(),
        })
    }

    pub fn run(&mut self) -> Result<(), minifb::Error> {
        self.viewer.redraw()?;

        while self.viewer.surface().is_open() {
            let frames = self.viewer.frames();
            let (down, position) = self.viewer.surface().pointer();

            if let Some(event) = self.tracker.poll(down, position) {
                self.viewer.dispatch(event)?;
            }
            if self.viewer.frames() == frames {
                self.viewer.surface_mut().idle();
            }
        }

        log::info!("Window closed after {} frames", self.viewer.frames());
        Ok(())
    }
}
