//! Polyview Web - browser frontend
//!
//! Renders with the same software pipeline as the native frontends and blits
//! each frame into a 2D canvas. JavaScript forwards pointer events:
//!
//! ```js
//! const viewer = new WebViewer("canvas", await (await fetch("cube.txt")).text());
//! canvas.onpointerdown = (e) => viewer.pointer_down(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => { if (e.buttons & 1) viewer.pointer_move(e.offsetX, e.offsetY); };
//! ```
use polyview_core::{parse_mesh, FrameBuffer, PointerEvent, Session, Surface, Viewer, ViewerConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// Surface that draws into a canvas 2D context
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up the canvas by element id and size it to the frame
    pub fn attach(canvas_id: &str, width: usize, height: usize) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id:?}")))?
            .dyn_into::<HtmlCanvasElement>()?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self { context })
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), JsValue> {
        let bytes = frame.to_rgba_bytes();
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(&bytes),
            frame.width() as u32,
            frame.height() as u32,
        )?;
        self.context.put_image_data(&image, 0.0, 0.0)
    }
}

#[wasm_bindgen]
pub struct WebViewer {
    viewer: Viewer<CanvasSurface>,
}

#[wasm_bindgen]
impl WebViewer {
    /// Parse `source` as an object description and draw it into the canvas `canvas_id`
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, source: &str) -> Result<WebViewer, JsValue> {
        let config = ViewerConfig::default();
        let mesh = parse_mesh(source, config.scale).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Parsed {} vertices, {} faces", mesh.vertices().len(), mesh.faces().len());

        let surface = CanvasSurface::attach(canvas_id, config.width, config.height)?;
        let mut viewer = Viewer::new(Session::new(mesh, config), surface);
        viewer.redraw()?;

        Ok(WebViewer { viewer })
    }

    /// Primary button pressed at canvas pixel `(x, y)`
    pub fn pointer_down(&mut self, x: i32, y: i32) -> Result<(), JsValue> {
        self.viewer.dispatch(PointerEvent::Press { x, y })
    }

    /// Pointer moved to `(x, y)` with the primary button held
    pub fn pointer_move(&mut self, x: i32, y: i32) -> Result<(), JsValue> {
        self.viewer.dispatch(PointerEvent::Drag { x, y })
    }

    /// Redraw the current view
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.viewer.redraw()
    }

    /// Frames presented so far
    pub fn frames(&self) -> u32 {
        self.viewer.frames() as u32
    }
}
