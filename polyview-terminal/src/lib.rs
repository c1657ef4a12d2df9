//! Terminal frontend: presents rendered frames as colored half blocks and
//! turns mouse drags into rotation
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use polyview_core::{FrameBuffer, PointerEvent, Session, Surface, Viewer};
use std::io::{self, stdout, Write};

pub mod renderer;

pub use renderer::HalfBlockRenderer;

const STATUS: &str = "Polyview | Drag with the left mouse button to rotate | Q=Quit";

/// Surface that writes frames to stdout
pub struct TerminalSurface {
    renderer: HalfBlockRenderer,
}

impl TerminalSurface {
    pub fn new(renderer: HalfBlockRenderer) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &HalfBlockRenderer {
        &self.renderer
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.renderer.resize(usize::from(columns), usize::from(rows));
    }
}

impl Surface for TerminalSurface {
    type Error = io::Error;

    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        self.renderer.rasterize(frame);

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Status line overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            SetBackgroundColor(Color::Black),
            Print(STATUS),
            ResetColor
        )?;

        stdout.flush()
    }
}

/// Main application struct for the terminal viewer
pub struct TerminalApp {
    viewer: Viewer<TerminalSurface>,
    running: bool,
}

impl TerminalApp {
    pub fn new(session: Session) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let config = *session.config();
        let renderer = HalfBlockRenderer::new(
            usize::from(columns),
            usize::from(rows),
            config.width,
            config.height,
        );

        Ok(Self {
            viewer: Viewer::new(session, TerminalSurface::new(renderer)),
            running: true,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

        let result = self.main_loop();

        // Cleanup
        execute!(stdout(), DisableMouseCapture, terminal::LeaveAlternateScreen, cursor::Show)?;
        terminal::disable_raw_mode()?;

        log::info!("Presented {} frames", self.viewer.frames());
        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.viewer.redraw()?;

        // Block until the next event; nothing changes between events
        while self.running {
            let event = event::read()?;
            self.handle_event(event)?;
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(KeyEvent { code, modifiers, kind, .. }) if kind != KeyEventKind::Release => {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.running = false
                    }
                    _ => {}
                }
            }
            Event::Mouse(mouse) => {
                if let Some(pointer) = self.pointer_event(mouse) {
                    self.viewer.dispatch(pointer)?;
                }
            }
            Event::Resize(columns, rows) => {
                log::debug!("Terminal resized to {}x{}", columns, rows);
                self.viewer.surface_mut().resize(columns, rows);
                self.viewer.redraw()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn pointer_event(&self, mouse: MouseEvent) -> Option<PointerEvent> {
        let renderer = self.viewer.surface().renderer();
        let (x, y) = renderer.cell_to_pixel(mouse.column, mouse.row);
        pointer_from_mouse(mouse.kind, x, y)
    }
}

/// Left-button press and drag map to pointer events; everything else is ignored
pub fn pointer_from_mouse(kind: MouseEventKind, x: i32, y: i32) -> Option<PointerEvent> {
    match kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Press { x, y }),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Drag { x, y }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_from_mouse() {
        assert_eq!(
            pointer_from_mouse(MouseEventKind::Down(MouseButton::Left), 3, 4),
            Some(PointerEvent::Press { x: 3, y: 4 })
        );
        assert_eq!(
            pointer_from_mouse(MouseEventKind::Drag(MouseButton::Left), 5, 6),
            Some(PointerEvent::Drag { x: 5, y: 6 })
        );
        assert_eq!(pointer_from_mouse(MouseEventKind::Drag(MouseButton::Right), 5, 6), None);
        assert_eq!(pointer_from_mouse(MouseEventKind::Moved, 5, 6), None);
    }
}
