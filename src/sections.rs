use crate::constants::{ACTIVE_SECTION_OPACITY, EMPHASIS_FADE_MS, INACTIVE_SECTION_OPACITY};
use crate::core::SectionEmphasis;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Fades every narrative section except the active one.
pub struct DomSections {
    elements: Vec<web::HtmlElement>,
}

impl DomSections {
    pub fn new(sections: &[web::Element]) -> Self {
        let elements: Vec<web::HtmlElement> = sections
            .iter()
            .filter_map(|el| el.clone().dyn_into::<web::HtmlElement>().ok())
            .collect();
        let transition = format!("opacity {}ms", EMPHASIS_FADE_MS);
        for el in &elements {
            _ = el.style().set_property("transition", &transition);
        }
        Self { elements }
    }
}

impl SectionEmphasis for DomSections {
    fn emphasize(&mut self, active: usize) {
        for (i, el) in self.elements.iter().enumerate() {
            let opacity = if i == active {
                ACTIVE_SECTION_OPACITY
            } else {
                INACTIVE_SECTION_OPACITY
            };
            _ = el.style().set_property("opacity", &opacity.to_string());
        }
    }
}
