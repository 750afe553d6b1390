//! Browser timers and task spawning.

use std::time::Duration;

use futures::future::LocalBoxFuture;
use turbo_interactions::Platform;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub struct BrowserPlatform {
    window: web_sys::Window,
}

impl BrowserPlatform {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Platform for BrowserPlatform {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let callback = Closure::once_into_js(move || task());
        let delay_ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay_ms)
        {
            web_sys::console::error_2(&"setTimeout failed".into(), &e);
        }
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
