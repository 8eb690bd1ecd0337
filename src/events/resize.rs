use crate::core::Orchestrator;
use crate::dom;
use crate::render::CanvasRenderer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Canvas size and translation follow the viewport; the scroller has its own
// resize listener (see `ScrollBinding`).
pub fn wire_viewport_resize(
    window: &web::Window,
    orchestrator: Rc<RefCell<Orchestrator>>,
    renderer: Rc<RefCell<CanvasRenderer>>,
) {
    let window_for_size = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        let viewport = dom::viewport_size(&window_for_size);
        renderer.borrow_mut().resize(viewport);
        orchestrator.borrow_mut().on_resize(viewport);
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
