use crate::constants::{CRASHES_URL, WORLD_URL};
use crate::core::{parse_crashes, Crash, Topology};
use crate::dom::js_err;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub struct Loaded {
    pub world: Topology,
    pub crashes: Vec<Crash>,
}

async fn response_text(request: js_sys::Promise, url: &str) -> anyhow::Result<String> {
    let response: web::Response = JsFuture::from(request)
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !response.ok() {
        anyhow::bail!("{} returned HTTP {}", url, response.status());
    }
    let body = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    body.as_string()
        .ok_or_else(|| anyhow::anyhow!("{}: response body is not text", url))
}

/// Fetch the world topology and the crash list; both requests are issued
/// before either is awaited.
pub async fn load(window: &web::Window) -> anyhow::Result<Loaded> {
    let world_req = window.fetch_with_str(WORLD_URL);
    let crashes_req = window.fetch_with_str(CRASHES_URL);

    let world_json = response_text(world_req, WORLD_URL).await?;
    let crashes_json = response_text(crashes_req, CRASHES_URL).await?;

    let world = Topology::parse(&world_json)?;
    let crashes = parse_crashes(&crashes_json)?;
    log::info!("[data] world topology and {} crashes ready", crashes.len());
    Ok(Loaded { world, crashes })
}
