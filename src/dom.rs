use crate::core::{Bounds, Container, ScrollHost};
use glam::DVec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

pub fn element_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))
}

/// All descendants of `parent` matching `selector`, in document order.
pub fn query_all(parent: &web::Element, selector: &str) -> anyhow::Result<Vec<web::Element>> {
    let list = parent.query_selector_all(selector).map_err(js_err)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect())
}

pub fn viewport_size(window: &web::Window) -> DVec2 {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    DVec2::new(read(window.inner_width()), read(window.inner_height()))
}

/// Keep the canvas CSS size at `viewport` and its backing store at
/// `viewport * devicePixelRatio`. Returns the pixel ratio.
pub fn sync_canvas_size(canvas: &web::HtmlCanvasElement, viewport: DVec2) -> f64 {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    canvas.set_width(((viewport.x * dpr) as u32).max(1));
    canvas.set_height(((viewport.y * dpr) as u32).max(1));
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.x));
    _ = style.set_property("height", &format!("{}px", viewport.y));
    dpr
}

/// Reads section geometry from the live DOM.
pub struct DomLayout {
    window: web::Window,
    document: web::Document,
}

impl DomLayout {
    pub fn new(window: web::Window, document: web::Document) -> Self {
        Self { window, document }
    }
}

impl ScrollHost for DomLayout {
    type Element = web::Element;

    fn scroll_offset(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        viewport_size(&self.window).y
    }

    fn bounds(&self, element: &web::Element) -> Bounds {
        let rect = element.get_bounding_client_rect();
        Bounds {
            top: rect.top(),
            bottom: rect.bottom(),
        }
    }

    fn container_top(&self, container: &Container<web::Element>) -> f64 {
        match container {
            Container::Element(el) => el.get_bounding_client_rect().top(),
            Container::DocumentRoot => self
                .document
                .document_element()
                .map(|el| el.get_bounding_client_rect().top())
                .unwrap_or(0.0),
        }
    }
}
