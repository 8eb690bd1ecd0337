use crate::core::{ScrollEvent, Scroller};
use crate::dom::{js_err, DomLayout};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Window `scroll`/`resize` listeners feeding one scroller.
///
/// Binding again first removes the listeners from the previous bind, so a
/// scroller never receives the same notification twice. Dropping the binding
/// removes them as well.
pub struct ScrollBinding {
    window: web::Window,
    on_scroll: Option<Closure<dyn FnMut()>>,
    on_resize: Option<Closure<dyn FnMut()>>,
}

impl ScrollBinding {
    pub fn new(window: web::Window) -> Self {
        Self {
            window,
            on_scroll: None,
            on_resize: None,
        }
    }

    pub fn bind(&mut self, scroller: Rc<RefCell<Scroller<DomLayout>>>) -> anyhow::Result<()> {
        self.unbind();

        let on_scroll = listener(scroller.clone(), ScrollEvent::Scroll);
        self.window
            .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())
            .map_err(js_err)?;
        self.on_scroll = Some(on_scroll);

        let on_resize = listener(scroller.clone(), ScrollEvent::Resize);
        self.window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(js_err)?;
        self.on_resize = Some(on_resize);

        if scroller.borrow().settle_pending() {
            schedule_settle(&self.window, scroller)?;
        }
        Ok(())
    }

    pub fn unbind(&mut self) {
        for (event, slot) in [
            ("scroll", self.on_scroll.take()),
            ("resize", self.on_resize.take()),
        ] {
            if let Some(closure) = slot {
                _ = self
                    .window
                    .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            }
        }
    }
}

impl Drop for ScrollBinding {
    fn drop(&mut self) {
        self.unbind();
    }
}

fn listener(
    scroller: Rc<RefCell<Scroller<DomLayout>>>,
    event: ScrollEvent,
) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || {
        scroller.borrow_mut().handle(event);
    }) as Box<dyn FnMut()>)
}

// One extra recomputation on the next frame picks up a page that loaded
// already scrolled.
fn schedule_settle(
    window: &web::Window,
    scroller: Rc<RefCell<Scroller<DomLayout>>>,
) -> anyhow::Result<()> {
    let settle = Closure::once_into_js(move || {
        if scroller.borrow_mut().settle() {
            log::debug!("[scroller] initial position settled");
        }
    });
    window
        .request_animation_frame(settle.unchecked_ref())
        .map_err(js_err)?;
    Ok(())
}
