//! Page configuration and element lookup for the live document.

use slotsofchoice_core::config::PageConfig;
use slotsofchoice_core::{ChoiceResult, FilterBindings, FilterGroup, MenuBinding, NavItem, PageBindings};
use tracing::{debug, warn};
use web_sys::Element;

use crate::dom::WebDom;

/// Id of the `<script type="application/json">` element holding page config.
pub const CONFIG_ELEMENT_ID: &str = "page-controller-config";

/// Parse embedded configuration text. Missing or blank text means defaults.
pub fn config_from_text(text: Option<&str>) -> ChoiceResult<PageConfig> {
    match text.map(str::trim) {
        None | Some("") => Ok(PageConfig::default()),
        Some(json) => PageConfig::from_json(json),
    }
}

pub fn read_config(dom: &WebDom) -> ChoiceResult<PageConfig> {
    let text = dom
        .document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    config_from_text(text.as_deref())
}

/// Look up every element the behaviors need.
///
/// A selector the browser rejects is logged and treated as matching nothing.
pub fn collect_bindings(dom: &WebDom, config: &PageConfig) -> PageBindings<Element> {
    let bindings = PageBindings {
        body: dom.body(),
        menus: collect_menus(dom, config),
        header: first(dom, &config.header.selector),
        anchors: all(dom, None, &config.scroll.anchor_selector),
        filters: collect_filters(dom, config),
        animatables: all(dom, None, &config.reveal.selector),
        nav_items: collect_nav_items(dom, config),
        year_targets: all(dom, None, &config.footer.year_selector),
    };

    debug!(
        menus = bindings.menus.len(),
        anchors = bindings.anchors.len(),
        cards = bindings.filters.cards.len(),
        animatables = bindings.animatables.len(),
        nav_items = bindings.nav_items.len(),
        "Collected page bindings"
    );
    bindings
}

fn collect_menus(dom: &WebDom, config: &PageConfig) -> Vec<MenuBinding<Element>> {
    config
        .nav
        .menus
        .iter()
        .filter_map(|selectors| {
            let toggle = first(dom, &selectors.toggle)?;
            let panel = first(dom, &selectors.panel)?;
            let links = all(dom, Some(&panel), &config.nav.link_selector);
            Some(MenuBinding {
                toggle,
                panel,
                links,
            })
        })
        .collect()
}

fn collect_filters(dom: &WebDom, config: &PageConfig) -> FilterBindings<Element> {
    let filters = &config.filters;

    let groups = all(dom, None, &filters.group_selector)
        .into_iter()
        .map(|group| {
            let buttons = all(dom, Some(&group), &filters.button_selector);
            FilterGroup { group, buttons }
        })
        .collect();

    let ungrouped_buttons = all(dom, None, &filters.button_selector)
        .into_iter()
        .filter(|button| matches!(button.closest(&filters.group_selector), Ok(None)))
        .collect();

    FilterBindings {
        groups,
        ungrouped_buttons,
        selects: all(dom, None, &filters.select_selector),
        cards: all(dom, None, &filters.card_selector),
        container: first(dom, &filters.container_selector),
    }
}

/// Nav items that carry a submenu; the rest have nothing to toggle.
fn collect_nav_items(dom: &WebDom, config: &PageConfig) -> Vec<NavItem<Element>> {
    let dropdowns = &config.dropdowns;
    all(dom, None, &dropdowns.item_selector)
        .into_iter()
        .filter_map(|item| {
            let submenu = first_in(dom, &item, &dropdowns.submenu_selector)?;
            let link = first_in(dom, &item, &dropdowns.link_selector);
            Some(NavItem {
                item,
                link,
                submenu,
            })
        })
        .collect()
}

fn first(dom: &WebDom, selector: &str) -> Option<Element> {
    dom.query(selector).unwrap_or_else(|e| {
        warn!(selector, error = %e, "Selector rejected");
        None
    })
}

fn first_in(dom: &WebDom, root: &Element, selector: &str) -> Option<Element> {
    dom.query_in(root, selector).unwrap_or_else(|e| {
        warn!(selector, error = %e, "Selector rejected");
        None
    })
}

fn all(dom: &WebDom, root: Option<&Element>, selector: &str) -> Vec<Element> {
    dom.query_all(root, selector).unwrap_or_else(|e| {
        warn!(selector, error = %e, "Selector rejected");
        Vec::new()
    })
}
