//! Smooth scrolling for in-page anchors.

use crate::config::ScrollConfig;
use crate::dom::PageDom;

/// Element id an anchor `href` points at, if it is an in-page link.
/// The bare `#` is not a target.
pub fn anchor_target(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => Some(id),
        _ => None,
    }
}

pub struct SmoothScroll<N> {
    anchors: Vec<N>,
    header: Option<N>,
    fallback_header_height: f64,
}

impl<N: Clone + PartialEq> SmoothScroll<N> {
    pub fn new(anchors: Vec<N>, header: Option<N>, config: &ScrollConfig) -> Self {
        Self {
            anchors,
            header,
            fallback_header_height: config.fallback_header_height,
        }
    }

    pub fn anchors(&self) -> &[N] {
        &self.anchors
    }

    /// Height to keep clear above the target; a missing or collapsed header
    /// falls back to the configured height.
    pub fn header_height<D: PageDom<Node = N>>(&self, dom: &D) -> f64 {
        self.header
            .as_ref()
            .map(|h| dom.offset_height(h))
            .filter(|h| *h > 0.0)
            .unwrap_or(self.fallback_header_height)
    }

    /// Scroll destination for a clicked anchor. `None` leaves the click to
    /// the browser.
    pub fn scroll_target<D: PageDom<Node = N>>(&self, dom: &D, anchor: &N) -> Option<f64> {
        let href = dom.attribute(anchor, "href")?;
        let id = anchor_target(&href)?;
        let target = dom.element_by_id(id)?;
        Some(dom.document_top(&target) - self.header_height(dom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDom;

    #[test]
    fn anchor_targets() {
        assert_eq!(anchor_target("#reviews"), Some("reviews"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/bonuses#top"), None);
        assert_eq!(anchor_target(""), None);
    }

    #[test]
    fn target_offset_subtracts_header() {
        let dom = MemoryDom::new();
        let header = dom.element("header", &["header"]);
        dom.set_geometry(header, 0.0, 88.0);
        let section = dom.element("section", &[]);
        dom.set_attr(section, "id", "reviews");
        dom.set_geometry(section, 1200.0, 400.0);
        let anchor = dom.element("a", &[]);
        dom.set_attr(anchor, "href", "#reviews");

        let scroll = SmoothScroll::new(vec![anchor], Some(header), &ScrollConfig::default());
        assert_eq!(scroll.scroll_target(&dom, &anchor), Some(1112.0));
    }

    #[test]
    fn missing_header_uses_fallback() {
        let dom = MemoryDom::new();
        let section = dom.element("section", &[]);
        dom.set_attr(section, "id", "faq");
        dom.set_geometry(section, 500.0, 100.0);
        let anchor = dom.element("a", &[]);
        dom.set_attr(anchor, "href", "#faq");

        let scroll = SmoothScroll::new(vec![anchor], None, &ScrollConfig::default());
        assert_eq!(scroll.scroll_target(&dom, &anchor), Some(430.0));
    }

    #[test]
    fn unknown_or_bare_targets_are_ignored() {
        let dom = MemoryDom::new();
        let bare = dom.element("a", &[]);
        dom.set_attr(bare, "href", "#");
        let dangling = dom.element("a", &[]);
        dom.set_attr(dangling, "href", "#nowhere");

        let scroll = SmoothScroll::new(vec![bare, dangling], None, &ScrollConfig::default());
        assert_eq!(scroll.scroll_target(&dom, &bare), None);
        assert_eq!(scroll.scroll_target(&dom, &dangling), None);
    }
}
