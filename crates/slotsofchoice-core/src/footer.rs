//! Footer year stamping.

use crate::dom::PageDom;

/// Write `year` into every placeholder. Returns how many were stamped.
pub fn stamp_year<D: PageDom>(dom: &D, targets: &[D::Node], year: i32) -> usize {
    let text = year.to_string();
    for target in targets {
        dom.set_text(target, &text);
    }
    targets.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDom;

    #[test]
    fn overwrites_placeholder_text() {
        let dom = MemoryDom::new();
        let by_class = dom.element("span", &["js-current-year"]);
        dom.set_text(&by_class, "2024");
        let by_attr = dom.element("span", &[]);
        dom.set_attr(by_attr, "data-year", "2024");

        assert_eq!(stamp_year(&dom, &[by_class, by_attr], 2026), 2);
        assert_eq!(dom.text(by_class), "2026");
        assert_eq!(dom.text(by_attr), "2026");
    }
}
