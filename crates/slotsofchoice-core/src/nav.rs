//! Mobile menu toggle and touch-friendly dropdowns.

use std::fmt::Debug;

use tracing::debug;

use crate::config::{DropdownConfig, NavConfig};
use crate::dom::PageDom;

/// One mobile menu: the trigger, the panel it opens, and the panel's links.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuBinding<N> {
    pub toggle: N,
    pub panel: N,
    pub links: Vec<N>,
}

pub struct MobileMenu<N> {
    binding: MenuBinding<N>,
    active_class: String,
    body_open_class: String,
}

impl<N: Clone + PartialEq + Debug> MobileMenu<N> {
    pub fn new(binding: MenuBinding<N>, config: &NavConfig) -> Self {
        Self {
            binding,
            active_class: config.active_class.clone(),
            body_open_class: config.body_open_class.clone(),
        }
    }

    pub fn binding(&self) -> &MenuBinding<N> {
        &self.binding
    }

    pub fn is_open<D: PageDom<Node = N>>(&self, dom: &D) -> bool {
        dom.has_class(&self.binding.panel, &self.active_class)
    }

    /// Trigger click: flip the open state on trigger, panel and body.
    pub fn toggle<D: PageDom<Node = N>>(&self, dom: &D, body: Option<&N>) -> bool {
        dom.toggle_class(&self.binding.toggle, &self.active_class);
        let open = dom.toggle_class(&self.binding.panel, &self.active_class);
        if let Some(body) = body {
            dom.toggle_class(body, &self.body_open_class);
        }
        debug!(open, "Mobile menu toggled");
        open
    }

    pub fn close<D: PageDom<Node = N>>(&self, dom: &D, body: Option<&N>) {
        dom.set_class(&self.binding.toggle, &self.active_class, false);
        dom.set_class(&self.binding.panel, &self.active_class, false);
        if let Some(body) = body {
            dom.set_class(body, &self.body_open_class, false);
        }
    }

    /// Close when the click landed outside both panel and trigger. A missing
    /// target counts as outside.
    pub fn on_document_click<D: PageDom<Node = N>>(
        &self,
        dom: &D,
        body: Option<&N>,
        target: Option<&N>,
    ) -> bool {
        let inside = target.is_some_and(|t| {
            dom.contains(&self.binding.panel, t) || dom.contains(&self.binding.toggle, t)
        });
        if inside {
            return false;
        }
        self.close(dom, body);
        true
    }
}

/// A nav item with a nested submenu.
#[derive(Debug, Clone, PartialEq)]
pub struct NavItem<N> {
    pub item: N,
    pub link: Option<N>,
    pub submenu: N,
}

pub struct DropdownMenus<N> {
    items: Vec<NavItem<N>>,
    active_class: String,
    max_touch_width: f64,
}

impl<N: Clone + PartialEq + Debug> DropdownMenus<N> {
    pub fn new(items: Vec<NavItem<N>>, config: &DropdownConfig) -> Self {
        Self {
            items,
            active_class: config.active_class.clone(),
            max_touch_width: config.max_touch_width,
        }
    }

    pub fn items(&self) -> &[NavItem<N>] {
        &self.items
    }

    pub fn is_touch_viewport(&self, viewport_width: f64) -> bool {
        viewport_width <= self.max_touch_width
    }

    /// Link click inside a nav item. On narrow viewports the submenu toggles
    /// and the returned `true` asks the caller to cancel navigation.
    pub fn on_link_click<D: PageDom<Node = N>>(&self, dom: &D, link: &N, viewport_width: f64) -> bool {
        if !self.is_touch_viewport(viewport_width) {
            return false;
        }
        let Some(item) = self.items.iter().find(|i| i.link.as_ref() == Some(link)) else {
            return false;
        };
        let open = dom.toggle_class(&item.submenu, &self.active_class);
        debug!(open, "Dropdown toggled");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDom, NodeId};

    fn menu(dom: &MemoryDom) -> (MobileMenu<NodeId>, NodeId) {
        let toggle = dom.element("button", &["mobile-menu-toggle"]);
        let panel = dom.element("nav", &["nav"]);
        let link = dom.element("a", &["nav-link"]);
        dom.append(panel, link);
        let body = dom.element("body", &[]);
        let binding = MenuBinding { toggle, panel, links: vec![link] };
        (MobileMenu::new(binding, &NavConfig::default()), body)
    }

    #[test]
    fn toggle_flips_all_three() {
        let dom = MemoryDom::new();
        let (menu, body) = menu(&dom);

        assert!(menu.toggle(&dom, Some(&body)));
        assert!(dom.has_class(&menu.binding().toggle, "active"));
        assert!(dom.has_class(&body, "menu-open"));

        assert!(!menu.toggle(&dom, Some(&body)));
        assert!(!menu.is_open(&dom));
        assert!(!dom.has_class(&body, "menu-open"));
    }

    #[test]
    fn clicks_inside_keep_menu_open() {
        let dom = MemoryDom::new();
        let (menu, body) = menu(&dom);
        menu.toggle(&dom, Some(&body));

        let link = menu.binding().links[0];
        assert!(!menu.on_document_click(&dom, Some(&body), Some(&link)));
        assert!(menu.is_open(&dom));

        let outside = dom.element("main", &[]);
        assert!(menu.on_document_click(&dom, Some(&body), Some(&outside)));
        assert!(!menu.is_open(&dom));
        assert!(!dom.has_class(&body, "menu-open"));
    }

    #[test]
    fn dropdown_only_toggles_on_narrow_viewports() {
        let dom = MemoryDom::new();
        let item = dom.element("li", &["nav-item"]);
        let link = dom.element("a", &["nav-link"]);
        let submenu = dom.element("ul", &["nav-dropdown"]);
        dom.append(item, link);
        dom.append(item, submenu);

        let dropdowns = DropdownMenus::new(
            vec![NavItem { item, link: Some(link), submenu }],
            &DropdownConfig::default(),
        );

        assert!(!dropdowns.on_link_click(&dom, &link, 1024.0));
        assert!(!dom.has_class(&submenu, "active"));

        assert!(dropdowns.on_link_click(&dom, &link, 768.0));
        assert!(dom.has_class(&submenu, "active"));
        assert!(dropdowns.on_link_click(&dom, &link, 375.0));
        assert!(!dom.has_class(&submenu, "active"));
    }
}
