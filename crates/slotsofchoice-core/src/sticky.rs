//! Sticky header state.

use crate::config::HeaderConfig;
use crate::dom::PageDom;

pub struct StickyHeader<N> {
    header: N,
    scrolled_class: String,
    threshold: f64,
}

impl<N> StickyHeader<N> {
    pub fn new(header: N, config: &HeaderConfig) -> Self {
        Self {
            header,
            scrolled_class: config.scrolled_class.clone(),
            threshold: config.scroll_threshold,
        }
    }

    pub fn header(&self) -> &N {
        &self.header
    }

    pub fn is_scrolled(&self, offset: f64) -> bool {
        offset > self.threshold
    }

    /// Recompute the scrolled class from the current vertical offset.
    pub fn on_scroll<D: PageDom<Node = N>>(&self, dom: &D, offset: f64) -> bool {
        let scrolled = self.is_scrolled(offset);
        dom.set_class(&self.header, &self.scrolled_class, scrolled);
        scrolled
    }
}
