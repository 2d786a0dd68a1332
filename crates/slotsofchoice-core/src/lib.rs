//! Slots of Choice page behavior
//!
//! Client-side behaviors for the casino directory pages, written against the
//! [`PageDom`] trait so they run the same in the browser and in tests.
//!
//! ## Behaviors
//!
//! - **Filters**: button groups and selects narrow the visible casino cards;
//!   an advisory with a reset button appears when nothing matches
//! - **Mobile menu** and **dropdowns**: open/close state classes
//! - **Sticky header**: `scrolled` class past a fixed offset
//! - **Smooth scroll**: in-page anchors scroll below the header
//! - **Scroll reveal**: one-shot fade-in as elements enter the viewport
//! - **Footer year**: current year in footer placeholders
//!
//! ## Quick Start
//!
//! ```
//! use slotsofchoice_core::memory::MemoryDom;
//! use slotsofchoice_core::{FilterBindings, FilterGroup, PageBindings, PageConfig, PageController, PageDom, PageEvent};
//!
//! let dom = MemoryDom::new();
//! let group = dom.element("div", &["filter-buttons"]);
//! dom.set_attr(group, "data-filter-type", "provider");
//! let all = dom.element("button", &["filter-btn", "active"]);
//! dom.set_attr(all, "data-filter", "all");
//! let beta = dom.element("button", &["filter-btn"]);
//! dom.set_attr(beta, "data-filter", "beta");
//! let card = dom.element("article", &["casino-card"]);
//! dom.set_attr(card, "data-provider", "Acme, Beta");
//!
//! let bindings = PageBindings {
//!     filters: FilterBindings {
//!         groups: vec![FilterGroup { group, buttons: vec![all, beta] }],
//!         cards: vec![card],
//!         ..FilterBindings::default()
//!     },
//!     ..PageBindings::default()
//! };
//! let controller = PageController::new(dom, PageConfig::default(), bindings);
//! controller.init(2026);
//! controller.dispatch(PageEvent::FilterButtonClicked { button: beta });
//!
//! assert!(controller.dom().is_displayed(&card));
//! ```

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod filter;
pub mod footer;
pub mod memory;
pub mod nav;
pub mod reveal;
pub mod scroll;
pub mod sticky;
pub mod utils;

// Re-exports
pub use config::PageConfig;
pub use controller::{ActiveFeatures, PageBindings, PageController, PageEvent, Reaction};
pub use dom::PageDom;
pub use error::{ChoiceError, ChoiceResult};
pub use filter::{
    ActiveFilterSet, AdvisoryChange, FilterBindings, FilterEngine, FilterGroup, FilterOutcome,
};
pub use nav::{MenuBinding, NavItem};
pub use reveal::Intersection;
