//! Storefront page interactions - browser workload.
//!
//! Compiled to WebAssembly and loaded by every storefront page. On start
//! it waits for the document to be parsed, then boots
//! [`turbo_interactions::Storefront`] once against the live DOM.
//!
//! Configuration comes from `storefront.toml` (compiled in) overlaid with
//! an optional `<script id="storefront-config" type="application/json">`
//! rendered by the server.

pub mod config;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod platform;

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::Cell;
    use std::rc::Rc;

    use anyhow::{Context, Result};
    use turbo_data::BrowserTransport;
    use turbo_interactions::Storefront;
    use turbo_observability::{ConsoleSink, StructuredLogger};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::config::{resolve_config, PAGE_CONFIG_ID};
    use crate::dom::BrowserDocument;
    use crate::platform::BrowserPlatform;

    thread_local! {
        static BOOTED: Cell<bool> = const { Cell::new(false) };
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("storefront script needs a document"))?;

        let ready_state = js_sys::Reflect::get(&document, &JsValue::from_str("readyState"))
            .ok()
            .and_then(|state| state.as_string());
        if ready_state.as_deref() == Some("loading") {
            let on_ready = Closure::once_into_js(|| {
                if let Err(e) = boot() {
                    web_sys::console::error_1(&format!("storefront boot failed: {:#}", e).into());
                }
            });
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        } else {
            boot().map_err(|e| JsValue::from_str(&format!("{:#}", e)))
        }
    }

    fn boot() -> Result<()> {
        if BOOTED.with(|booted| booted.replace(true)) {
            return Ok(());
        }

        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;

        let page_config = document
            .get_element_by_id(PAGE_CONFIG_ID)
            .and_then(|script| script.text_content());
        let (config, rejected) = resolve_config(page_config.as_deref())?;

        let page = window.location().pathname().unwrap_or_default();
        let logger = config
            .logging
            .apply(StructuredLogger::new(Rc::new(ConsoleSink)).with_page(page));
        if let Some(e) = rejected {
            logger
                .warn_builder("ignoring invalid page config")
                .field("error", e.to_string())
                .emit();
        }

        // Event listeners keep what they need alive; the handle itself can go.
        Storefront::boot(
            BrowserDocument::new(document),
            Rc::new(BrowserPlatform::new(window)),
            Rc::new(BrowserTransport::new()),
            config,
            &logger,
        );
        Ok(())
    }
}
