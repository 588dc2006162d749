use crate::style;
use anyhow::anyhow;
use waves_core::{Bounds, WavesConfig};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn scroll_y() -> f32 {
    web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0) as f32
}

pub fn container_bounds(container: &web::HtmlElement) -> Bounds {
    let rect = container.get_bounding_client_rect();
    Bounds::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

pub fn apply_container_style(container: &web::HtmlElement, config: &WavesConfig) {
    let decl = container.style();
    for (name, value) in style::container_style(&config.background_color) {
        _ = decl.set_property(name, &value);
    }
    let classes = container.class_list();
    for token in style::class_tokens(config.class_name.as_deref()) {
        _ = classes.add_1(token);
    }
}

pub fn set_cursor_vars(container: &web::HtmlElement, x: f32, y: f32) {
    let decl = container.style();
    for (name, value) in style::cursor_vars(x, y) {
        _ = decl.set_property(name, &value);
    }
}

/// Create a canvas filling `container` and append it.
pub fn append_canvas(container: &web::HtmlElement) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = container
        .owner_document()
        .or_else(window_document)
        .ok_or_else(|| anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!("{:?}", e))?;
    _ = canvas.set_attribute("style", style::CANVAS_STYLE);
    container
        .append_child(&canvas)
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// Match the canvas backing store to the container size (CSS pixels).
pub fn sync_canvas_size(canvas: &web::HtmlCanvasElement, bounds: &Bounds) {
    canvas.set_width(bounds.width.max(0.0) as u32);
    canvas.set_height(bounds.height.max(0.0) as u32);
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<web::CanvasRenderingContext2d>().ok())
}
