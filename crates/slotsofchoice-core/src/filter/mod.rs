//! Card filtering.
//!
//! Filter controls come in two shapes: button groups, where exactly one
//! button is active, and value selects. Each declares a dimension name; cards
//! declare comma-separated tags per dimension as `data-*` attributes. A card
//! stays visible iff it carries the required tag for every constrained
//! dimension.

mod active;
mod engine;

pub use active::{tag_list_contains, ActiveFilterSet};
pub use engine::{
    AdvisoryChange, FilterBindings, FilterEngine, FilterGroup, FilterOutcome, RESET_ATTRIBUTE,
};
