#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use waves_core::{AnimationState, FrameClock, WaveNoise};
use web_sys as web;

mod dom;
mod events;
mod frame;
mod options;
mod style;
mod surface;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("waves-web loaded");
    Ok(())
}

struct Running {
    listeners: events::Listeners,
    frame_loop: frame::FrameLoop,
}

// Also runs when JS frees the handle without calling `destroy()`.
impl Drop for Running {
    fn drop(&mut self) {
        self.listeners.remove_all();
        self.frame_loop.stop();
        log::info!("[waves] stopped");
    }
}

/// A wave field mounted into a host element.
///
/// ```js
/// const waves = new Waves(document.getElementById("hero"), { lineColor: "#fff" });
/// // later
/// waves.destroy();
/// ```
#[wasm_bindgen]
pub struct Waves {
    canvas: web::HtmlCanvasElement,
    running: Option<Running>,
}

#[wasm_bindgen]
impl Waves {
    #[wasm_bindgen(constructor)]
    pub fn new(container: web::HtmlElement, options: JsValue) -> Result<Waves, JsValue> {
        mount(container, &options).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
    }

    /// Whether the animation loop is running (false when no 2D context was
    /// available or after `destroy`).
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.running.is_some()
    }

    /// Remove listeners, stop the frame loop and detach the canvas. Safe to
    /// call more than once.
    pub fn destroy(&mut self) {
        drop(self.running.take());
        self.canvas.remove();
    }
}

/// Mount into the element with id `element_id`.
#[wasm_bindgen(js_name = mountWaves)]
pub fn mount_waves(element_id: &str, options: JsValue) -> Result<Waves, JsValue> {
    let container = dom::window_document()
        .and_then(|d| d.get_element_by_id(element_id))
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        .ok_or_else(|| JsValue::from_str(&format!("missing #{}", element_id)))?;
    Waves::new(container, options)
}

fn mount(container: web::HtmlElement, options: &JsValue) -> anyhow::Result<Waves> {
    let config = options::parse_options(options)?;
    dom::apply_container_style(&container, &config);
    let canvas = dom::append_canvas(&container)?;

    let Some(ctx) = dom::context_2d(&canvas) else {
        log::warn!("[waves] 2d context unavailable; animation not started");
        return Ok(Waves {
            canvas,
            running: None,
        });
    };

    let noise = WaveNoise::from_entropy();
    log::info!("[waves] mounted (seed {})", noise.seed());
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        state: AnimationState::new(config, noise),
        surface: surface::CanvasSurface::new(ctx),
        canvas: canvas.clone(),
        container,
        clock: FrameClock::new(),
    }));
    frame_ctx.borrow_mut().resize();

    let listeners = events::wire_input_handlers(&frame_ctx);
    let frame_loop = frame::start_loop(frame_ctx);
    Ok(Waves {
        canvas,
        running: Some(Running {
            listeners,
            frame_loop,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn host() -> web::HtmlElement {
        let doc = dom::window_document().unwrap();
        let el = doc
            .create_element("div")
            .unwrap()
            .dyn_into::<web::HtmlElement>()
            .unwrap();
        _ = el.style().set_property("width", "320px");
        _ = el.style().set_property("height", "200px");
        doc.body().unwrap().append_child(&el).unwrap();
        el
    }

    #[wasm_bindgen_test]
    fn dropping_the_handle_stops_the_loop_and_listeners() {
        let waves = mount(host(), &JsValue::UNDEFINED).unwrap();
        let running = waves.running.as_ref().unwrap();
        let alive = running.frame_loop.alive_flag();
        assert!(alive.get());
        assert_eq!(running.listeners.len(), 3);

        drop(waves);
        assert!(!alive.get());
    }

    #[wasm_bindgen_test]
    fn destroy_twice_is_harmless() {
        let container = host();
        let mut waves = mount(container.clone(), &JsValue::UNDEFINED).unwrap();
        let alive = waves.running.as_ref().unwrap().frame_loop.alive_flag();

        waves.destroy();
        assert!(!waves.running());
        assert!(!alive.get());
        assert_eq!(container.child_element_count(), 0);

        waves.destroy();
        assert!(!waves.running());
    }

    #[wasm_bindgen_test]
    fn rejects_invalid_options() {
        let options = js_sys::JSON::parse(r#"{ "xGap": 0 }"#).unwrap();
        assert!(mount(host(), &options).is_err());
    }
}
