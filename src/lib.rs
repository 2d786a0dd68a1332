//! Slots of Choice - browser page controller
//!
//! Binds the behaviors from `slotsofchoice-core` to the live document: looks
//! up elements, attaches listeners, installs console logging and exports a
//! few helpers to page scripts.
//!
//! ## Page integration
//!
//! ```html
//! <script type="application/json" id="page-controller-config">
//!   { "log_level": "debug" }
//! </script>
//! <script type="module">
//!   import init, { resetFilters } from "./pkg/slotsofchoice.js";
//!   await init();
//! </script>
//! ```

pub mod bindings;
pub mod context;
pub mod dom;
pub mod logging;
pub mod runtime;
pub mod utils;

use chrono::Datelike;
use gloo::events::EventListener;
use slotsofchoice_core::{PageConfig, PageController};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;

use crate::dom::WebDom;
use crate::runtime::PageRuntime;

/// WASM entry point, called when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    let dom = match WebDom::new() {
        Ok(dom) => dom,
        Err(e) => {
            web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
            return;
        }
    };

    if dom.document().ready_state() == "loading" {
        let document = dom.document().clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| boot(dom)).forget();
    } else {
        boot(dom);
    }
}

/// Read config, install logging and start the page runtime.
fn boot(dom: WebDom) {
    let (config, config_error) = match bindings::read_config(&dom) {
        Ok(config) => (config, None),
        Err(e) => (PageConfig::default(), Some(e)),
    };

    logging::init_logging(&config.log_level);
    if let Some(e) = config_error {
        warn!(error = %e, "Invalid page configuration, using defaults");
    }

    if context::is_installed() {
        debug!("Page runtime already running");
        return;
    }

    let bindings = bindings::collect_bindings(&dom, &config);
    let controller = PageController::new(dom, config, bindings);
    let year = chrono::Local::now().year();
    context::install(PageRuntime::start(controller, year));
    info!(year, "Slots of Choice page controller ready");
}

/// Restore default filter selection and show every card.
#[wasm_bindgen(js_name = resetFilters)]
pub fn reset_filters() {
    let outcome = context::with_controller(|controller| controller.reset_filters());
    match outcome {
        Some(Some(outcome)) => debug!(visible = outcome.visible, "Filters reset"),
        Some(None) => debug!("No filter controls on this page"),
        None => warn!("resetFilters called before the page controller started"),
    }
}

/// en-US currency formatting through `Intl.NumberFormat`, with the core
/// formatter as fallback for codes `Intl` would reject.
#[wasm_bindgen(js_name = formatCurrency)]
pub fn format_currency(amount: f64, currency: &str) -> String {
    utils::intl_currency(amount, currency)
        .unwrap_or_else(|| slotsofchoice_core::utils::format_currency(amount, currency))
}

#[wasm_bindgen(js_name = urlParam)]
pub fn url_param(name: &str) -> Option<String> {
    utils::current_url_param(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_currency_uses_fallback() {
        assert_eq!(format_currency(5.0, "US DOLLAR"), "US DOLLAR\u{a0}5.00");
        assert_eq!(format_currency(-12.5, ""), "-\u{a0}12.50");
    }
}
