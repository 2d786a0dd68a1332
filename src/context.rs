//! Page runtime context.
//!
//! Holds the running [`PageRuntime`] so exported functions such as
//! `resetFilters` can reach the controller after startup.
//!
//! ## Usage
//!
//! ```ignore
//! // once, at startup
//! context::install(PageRuntime::start(controller, year));
//!
//! // later, from an export
//! context::with_controller(|controller| controller.reset_filters());
//! ```

use std::cell::RefCell;

use slotsofchoice_core::PageController;

use crate::dom::WebDom;
use crate::runtime::PageRuntime;

thread_local! {
    static RUNTIME: RefCell<Option<PageRuntime>> = const { RefCell::new(None) };
}

/// Store the runtime. Returns `false` (and drops `runtime`) when one is
/// already installed.
pub fn install(runtime: PageRuntime) -> bool {
    RUNTIME.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return false;
        }
        *slot = Some(runtime);
        true
    })
}

pub fn is_installed() -> bool {
    RUNTIME.with(|slot| slot.borrow().is_some())
}

/// Run `f` against the installed controller, if any.
pub fn with_controller<R>(f: impl FnOnce(&PageController<WebDom>) -> R) -> Option<R> {
    // release the slot before running f
    let controller = RUNTIME.with(|slot| slot.borrow().as_ref().map(PageRuntime::controller))?;
    Some(f(&controller))
}
