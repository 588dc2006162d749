use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Window listeners owned by one mounted instance, kept so teardown can
/// remove them again.
#[derive(Default)]
pub struct Listeners {
    registered: Vec<(&'static str, Closure<dyn FnMut(web::Event)>)>,
}

impl Listeners {
    fn add(&mut self, kind: &'static str, closure: Closure<dyn FnMut(web::Event)>, passive: bool) {
        let Some(window) = web::window() else {
            return;
        };
        let options = web::AddEventListenerOptions::new();
        options.set_passive(passive);
        let added = window.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        );
        match added {
            Ok(()) => self.registered.push((kind, closure)),
            Err(e) => log::warn!("[events] failed to add {} listener: {:?}", kind, e),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn remove_all(&mut self) {
        let window = web::window();
        for (kind, closure) in self.registered.drain(..) {
            if let Some(w) = &window {
                _ = w.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            }
        }
    }
}

pub fn wire_input_handlers(frame_ctx: &Rc<RefCell<FrameContext>>) -> Listeners {
    let mut listeners = Listeners::default();
    wire_resize(&mut listeners, frame_ctx.clone());
    wire_mousemove(&mut listeners, frame_ctx.clone());
    wire_touchmove(&mut listeners, frame_ctx.clone());
    listeners
}

fn wire_resize(listeners: &mut Listeners, frame_ctx: Rc<RefCell<FrameContext>>) {
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        frame_ctx.borrow_mut().resize();
    }) as Box<dyn FnMut(_)>);
    listeners.add("resize", closure, true);
}

fn wire_mousemove(listeners: &mut Listeners, frame_ctx: Rc<RefCell<FrameContext>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        frame_ctx
            .borrow_mut()
            .pointer_moved(ev.page_x() as f32, ev.page_y() as f32);
    }) as Box<dyn FnMut(_)>);
    listeners.add("mousemove", closure, true);
}

// Registered non-passive so preventDefault can stop the page from scrolling
// while the finger drives the waves.
fn wire_touchmove(listeners: &mut Listeners, frame_ctx: Rc<RefCell<FrameContext>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
        let Some(touch) = ev
            .dyn_ref::<web::TouchEvent>()
            .and_then(|t| t.touches().get(0))
        else {
            return;
        };
        frame_ctx
            .borrow_mut()
            .pointer_moved(touch.client_x() as f32, touch.client_y() as f32);
    }) as Box<dyn FnMut(_)>);
    listeners.add("touchmove", closure, false);
}
