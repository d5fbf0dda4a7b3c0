pub mod api;
pub mod app;
pub mod client;
pub mod columns;
pub mod components;
pub mod config;
pub mod diff_table;
pub mod dom;
pub mod error;
pub mod logging;
pub mod selection;
pub mod types;

use wasm_bindgen::prelude::*;

use crate::app::{App, AppProps};
use crate::config::{ClientConfig, ROOT_ID};

#[wasm_bindgen(start)]
pub fn run_app() {
    logging::init();

    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(ROOT_ID))
    else {
        tracing::error!("mount point #{ROOT_ID} not found");
        return;
    };

    let overrides = dom::data_attributes(&root);
    let (config, errors) = ClientConfig::from_env()
        .apply_overrides(overrides.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    for err in errors {
        tracing::warn!("ignoring mount attribute: {err}");
    }
    tracing::info!(endpoint = %config.endpoint_url(), "starting log table viewer");

    yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
}
