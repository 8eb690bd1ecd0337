use crate::core::{Orchestrator, ProjectionState};
use crate::events::ScrollBinding;
use crate::render::CanvasRenderer;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub orchestrator: Rc<RefCell<Orchestrator>>,
    pub projection: Rc<RefCell<ProjectionState>>,
    pub renderer: Rc<RefCell<CanvasRenderer>>,
    // Held so the scroll listeners stay registered for the page lifetime.
    pub scroll_binding: ScrollBinding,
    pub clock_origin: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = self.clock_origin.elapsed();
        if !self.orchestrator.borrow_mut().frame(now) {
            return;
        }
        let state = *self.projection.borrow();
        if let Err(e) = self.renderer.borrow().render(&state) {
            log::error!("[render] {:?}", e);
        }
    }
}

pub fn start_loop(frame_ctx: FrameContext) {
    let frame_ctx = Rc::new(RefCell::new(frame_ctx));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
