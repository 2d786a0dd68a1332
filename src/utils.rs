//! Browser-side helpers for page scripts.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use slotsofchoice_core::utils::url_param;
use wasm_bindgen::prelude::*;

/// Trailing-edge debounce: `call` (re)starts the timer and the callback runs
/// once `wait_ms` passes without another call.
#[wasm_bindgen]
pub struct Debouncer {
    wait_ms: u32,
    callback: Rc<dyn Fn()>,
    pending: RefCell<Option<Timeout>>,
}

impl Debouncer {
    pub fn new(wait_ms: u32, callback: impl Fn() + 'static) -> Self {
        Self {
            wait_ms,
            callback: Rc::new(callback),
            pending: RefCell::new(None),
        }
    }
}

#[wasm_bindgen]
impl Debouncer {
    /// Debounce a JavaScript function.
    #[wasm_bindgen(constructor)]
    pub fn from_js(callback: js_sys::Function, wait_ms: u32) -> Debouncer {
        Self::new(wait_ms, move || {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                tracing::warn!(error = %crate::dom::js_error(e), "Debounced callback failed");
            }
        })
    }

    pub fn call(&self) {
        let callback = Rc::clone(&self.callback);
        let timeout = Timeout::new(self.wait_ms, move || callback());
        // dropping the previous timeout clears it
        self.pending.replace(Some(timeout));
    }

    pub fn cancel(&self) {
        if let Some(timeout) = self.pending.take() {
            timeout.cancel();
        }
    }
}

pub fn debounce(wait_ms: u32, callback: impl Fn() + 'static) -> Debouncer {
    Debouncer::new(wait_ms, callback)
}

/// Format `amount` with `Intl.NumberFormat("en-US", { style: "currency" })`.
///
/// Returns `None` for codes that are not three ASCII letters, which `Intl`
/// rejects with a `RangeError`.
pub fn intl_currency(amount: f64, currency: &str) -> Option<String> {
    if !is_currency_code(currency) {
        return None;
    }
    let options = js_sys::Object::new();
    js_sys::Reflect::set(&options, &"style".into(), &"currency".into()).ok()?;
    js_sys::Reflect::set(&options, &"currency".into(), &JsValue::from_str(currency)).ok()?;

    let locales = js_sys::Array::of1(&"en-US".into());
    let format = js_sys::Intl::NumberFormat::new(&locales, &options).format();
    format
        .call1(&JsValue::NULL, &JsValue::from_f64(amount))
        .ok()?
        .as_string()
}

/// Well-formed ISO 4217 code: three ASCII letters, any case.
pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Value of `name` in the current page's query string.
pub fn current_url_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    url_param(&search, name)
}
