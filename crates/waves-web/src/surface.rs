use glam::Vec2;
use wasm_bindgen::JsValue;
use waves_core::LineSurface;
use web_sys as web;

/// [`LineSurface`] backed by a canvas 2D context.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    // Avoid re-sending the same stroke style to JS for every line
    stroke_color: Option<String>,
}

impl CanvasSurface {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            stroke_color: None,
        }
    }

    /// Resizing a canvas resets its context state; forget the cached style.
    pub fn reset_style(&mut self) {
        self.stroke_color = None;
    }
}

impl LineSurface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    #[allow(deprecated)]
    fn begin_line(&mut self, color: &str) {
        if self.stroke_color.as_deref() != Some(color) {
            self.ctx.set_stroke_style(&JsValue::from_str(color));
            self.stroke_color = Some(color.to_string());
        }
        self.ctx.begin_path();
    }

    #[inline]
    fn move_to(&mut self, p: Vec2) {
        self.ctx.move_to(p.x as f64, p.y as f64);
    }

    #[inline]
    fn line_to(&mut self, p: Vec2) {
        self.ctx.line_to(p.x as f64, p.y as f64);
    }

    #[inline]
    fn stroke(&mut self) {
        self.ctx.stroke();
    }
}
