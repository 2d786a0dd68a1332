//! One-shot scroll reveal.
//!
//! Elements start transparent and receive the reveal class the first time
//! they intersect the viewport. After that they are forgotten: further
//! intersection or exit events do nothing.

use std::cell::RefCell;
use std::fmt::Debug;

use tracing::debug;

use crate::config::RevealConfig;
use crate::dom::PageDom;

/// One intersection observer entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<N> {
    pub target: N,
    pub is_intersecting: bool,
}

pub struct ScrollReveal<N> {
    observed: RefCell<Vec<N>>,
    class: String,
}

impl<N: Clone + PartialEq + Debug> ScrollReveal<N> {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            observed: RefCell::new(Vec::new()),
            class: config.class.clone(),
        }
    }

    /// Hide `elements` and start tracking them. Returns the elements the
    /// caller should hand to its observer.
    pub fn prepare<D: PageDom<Node = N>>(&self, dom: &D, elements: &[N]) -> Vec<N> {
        let mut observed = self.observed.borrow_mut();
        for element in elements {
            if observed.contains(element) {
                continue;
            }
            dom.set_style(element, "opacity", "0");
            observed.push(element.clone());
        }
        observed.clone()
    }

    pub fn is_observed(&self, element: &N) -> bool {
        self.observed.borrow().contains(element)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.borrow().len()
    }

    /// Reveal every tracked element that now intersects, in entry order.
    /// Returns the elements to unobserve.
    pub fn on_intersections<D, I>(&self, dom: &D, entries: I) -> Vec<N>
    where
        D: PageDom<Node = N>,
        I: IntoIterator<Item = Intersection<N>>,
    {
        let mut observed = self.observed.borrow_mut();
        let mut revealed = Vec::new();

        for entry in entries {
            if !entry.is_intersecting {
                continue;
            }
            let Some(pos) = observed.iter().position(|n| *n == entry.target) else {
                continue;
            };
            observed.remove(pos);
            dom.set_class(&entry.target, &self.class, true);
            revealed.push(entry.target);
        }

        if !revealed.is_empty() {
            debug!(revealed = revealed.len(), remaining = observed.len(), "Elements revealed");
        }
        revealed
    }
}
