use crate::dom;
use crate::surface::CanvasSurface;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use waves_core::{AnimationState, FrameClock};
use web_sys as web;

/// Everything a mounted instance mutates. Shared between the frame loop and
/// the input handlers through `Rc<RefCell<_>>`; handlers never draw.
pub struct FrameContext {
    pub state: AnimationState,
    pub surface: CanvasSurface,
    pub canvas: web::HtmlCanvasElement,
    pub container: web::HtmlElement,
    pub clock: FrameClock,
}

impl FrameContext {
    pub fn frame(&mut self, time_ms: f64) {
        self.state.frame(time_ms, &mut self.surface);
        let smooth = self.state.pointer().smooth;
        dom::set_cursor_vars(&self.container, smooth.x, smooth.y);
        self.clock.frame();
    }

    /// Re-measure the container, resize the canvas and rebuild the grid.
    pub fn resize(&mut self) {
        let bounds = dom::container_bounds(&self.container);
        dom::sync_canvas_size(&self.canvas, &bounds);
        self.surface.reset_style();
        self.state.resize(bounds);
    }

    pub fn pointer_moved(&mut self, page_x: f32, page_y: f32) {
        self.state.pointer_moved(page_x, page_y, dom::scroll_y());
    }
}

type TickClosure = Closure<dyn FnMut(f64)>;

/// Handle to a running `requestAnimationFrame` loop.
pub struct FrameLoop {
    alive: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<TickClosure>>>,
}

impl FrameLoop {
    /// Stop scheduling immediately: flag the loop dead, cancel the pending
    /// frame and release the callback (which also breaks its self-reference).
    pub fn stop(&self) {
        self.alive.set(false);
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }

    #[cfg(test)]
    pub fn alive_flag(&self) -> Rc<Cell<bool>> {
        self.alive.clone()
    }
}

fn request_frame(tick: &Rc<RefCell<Option<TickClosure>>>, pending: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        pending.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let alive = Rc::new(Cell::new(true));
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: Rc<RefCell<Option<TickClosure>>> = Rc::new(RefCell::new(None));

    let alive_tick = alive.clone();
    let pending_tick = pending.clone();
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |time_ms: f64| {
        pending_tick.set(None);
        if !alive_tick.get() {
            return;
        }
        frame_ctx.borrow_mut().frame(time_ms);
        request_frame(&tick_clone, &pending_tick);
    }) as Box<dyn FnMut(f64)>));

    request_frame(&tick, &pending);
    FrameLoop {
        alive,
        pending,
        tick,
    }
}
