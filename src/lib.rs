//! Scroll-driven globe storytelling.
//!
//! As the reader scrolls through narrative sections, an orthographic globe
//! rotates, pans and zooms to each section's location. `core` holds the
//! section tracker and the projection transitions and builds on any target;
//! the DOM wiring below it only exists on `wasm32`.

pub mod constants;
pub mod core;
pub mod scene;

#[cfg(target_arch = "wasm32")]
mod data;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod render;
#[cfg(target_arch = "wasm32")]
mod sections;

#[cfg(target_arch = "wasm32")]
pub use app::start;

#[cfg(target_arch = "wasm32")]
mod app {
    use crate::constants::{
        DATA_EASING, DATA_TRANSITION_MS, MAP_ELEMENT_ID, SECTIONS_ELEMENT_ID, SECTION_SELECTOR,
    };
    use crate::core::{
        Container, Easing, Orchestrator, ProjectionState, Scroller, TargetTable, ViewConfig,
    };
    use crate::scene::Scene;
    use crate::{data, dom, events, frame, render, sections};
    use instant::Instant;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use web_sys as web;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("scrolly-globe starting");

        spawn_local(async move {
            if let Err(e) = init().await {
                log::error!("init error: {:?}", e);
            }
        });
        Ok(())
    }

    // Timing overrides from `data-transition-ms` / `data-easing` on the map element.
    fn view_config(map: &web::Element) -> ViewConfig {
        let mut config = ViewConfig::default();
        let Some(map) = map.dyn_ref::<web::HtmlElement>() else {
            return config;
        };
        let dataset = map.dataset();
        if let Some(ms) = dataset.get(DATA_TRANSITION_MS) {
            match ms.trim().parse::<u64>() {
                Ok(ms) => config = config.with_transition_millis(ms),
                Err(_) => log::warn!("ignoring data-transition-ms={:?}", ms),
            }
        }
        if let Some(name) = dataset.get(DATA_EASING) {
            match Easing::from_name(&name) {
                Some(easing) => config = config.with_easing(easing),
                None => log::warn!("ignoring data-easing={:?}", name),
            }
        }
        config
    }

    async fn init() -> anyhow::Result<()> {
        let (window, document) =
            dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
        let map = dom::element_by_id(&document, MAP_ELEMENT_ID)?;
        let config = view_config(&map);

        // Nothing below runs if loading fails, so the scroller is never attached.
        let loaded = data::load(&window).await?;

        let canvas: web::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(dom::js_err)?
            .dyn_into()
            .map_err(dom::js_err)?;
        map.append_child(&canvas).map_err(dom::js_err)?;

        let viewport = dom::viewport_size(&window);
        let scene = Scene::build(&loaded.world, &loaded.crashes)?;
        let mut renderer = render::CanvasRenderer::new(canvas, scene)?;
        renderer.resize(viewport);
        let renderer = Rc::new(RefCell::new(renderer));

        let targets = TargetTable::from_dataset(&config.section_defaults, &loaded.crashes)?;
        let projection = Rc::new(RefCell::new(ProjectionState::default()));
        let orchestrator = Rc::new(RefCell::new(Orchestrator::new(
            &config,
            targets,
            projection.clone(),
            viewport,
        )));

        let container = dom::element_by_id(&document, SECTIONS_ELEMENT_ID)?;
        let section_elements = dom::query_all(&container, SECTION_SELECTOR)?;
        orchestrator
            .borrow_mut()
            .set_emphasis(sections::DomSections::new(&section_elements));

        let mut scroller = Scroller::new(dom::DomLayout::new(window.clone(), document.clone()));
        scroller.set_container(Container::Element(container));
        {
            let orchestrator = orchestrator.clone();
            scroller.on_active(move |index| orchestrator.borrow_mut().on_active(index));
        }
        {
            let orchestrator = orchestrator.clone();
            scroller.on_progress(move |index, fraction| {
                orchestrator.borrow_mut().on_progress(index, fraction)
            });
        }
        scroller.attach(section_elements)?;
        let scroller = Rc::new(RefCell::new(scroller));

        let mut scroll_binding = events::ScrollBinding::new(window.clone());
        scroll_binding.bind(scroller)?;
        events::wire_viewport_resize(&window, orchestrator.clone(), renderer.clone());

        frame::start_loop(frame::FrameContext {
            orchestrator,
            projection,
            renderer,
            scroll_binding,
            clock_origin: Instant::now(),
        });
        Ok(())
    }
}
