//! Page controller: owns every behavior and routes page events to them.
//!
//! ## Usage
//!
//! ```ignore
//! let bindings = collect_bindings(&document, &config)?; // host specific
//! let controller = PageController::new(dom, config, bindings);
//! controller.init(current_year);
//!
//! // later, from an event listener
//! let reaction = controller.dispatch(PageEvent::Scrolled { offset: 240.0 });
//! ```

use tracing::{debug, info};

use crate::config::PageConfig;
use crate::dom::PageDom;
use crate::filter::{FilterBindings, FilterEngine, FilterOutcome};
use crate::footer;
use crate::nav::{DropdownMenus, MenuBinding, MobileMenu, NavItem};
use crate::reveal::{Intersection, ScrollReveal};
use crate::scroll::SmoothScroll;
use crate::sticky::StickyHeader;

/// Every element the behaviors need, collected once at startup.
///
/// Absent elements are `None` or empty lists; the matching behavior then
/// stays inactive.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBindings<N> {
    pub body: Option<N>,
    pub menus: Vec<MenuBinding<N>>,
    pub header: Option<N>,
    pub anchors: Vec<N>,
    pub filters: FilterBindings<N>,
    pub animatables: Vec<N>,
    pub nav_items: Vec<NavItem<N>>,
    pub year_targets: Vec<N>,
}

impl<N> Default for PageBindings<N> {
    fn default() -> Self {
        Self {
            body: None,
            menus: Vec::new(),
            header: None,
            anchors: Vec::new(),
            filters: FilterBindings::default(),
            animatables: Vec::new(),
            nav_items: Vec::new(),
            year_targets: Vec::new(),
        }
    }
}

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<N> {
    /// Trigger of menu `menu` (index into the bindings) was clicked
    MenuToggleClicked { menu: usize },
    NavLinkClicked { menu: usize },
    /// Any click on the document, after element handlers ran
    DocumentClicked { target: Option<N> },
    Scrolled { offset: f64 },
    AnchorClicked { anchor: N },
    FilterButtonClicked { button: N },
    FilterSelectChanged { select: N },
    ResetRequested,
    Intersections(Vec<Intersection<N>>),
    DropdownLinkClicked { link: N, viewport_width: f64 },
}

/// What the host should do after an event was handled.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction<N> {
    pub prevent_default: bool,
    /// Smooth-scroll the window to this vertical offset
    pub scroll_to: Option<f64>,
    /// Stop observing these elements
    pub unobserve: Vec<N>,
}

impl<N> Default for Reaction<N> {
    fn default() -> Self {
        Self {
            prevent_default: false,
            scroll_to: None,
            unobserve: Vec::new(),
        }
    }
}

/// Which behaviors found their elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveFeatures {
    pub menus: usize,
    pub sticky_header: bool,
    pub smooth_scroll: bool,
    pub filters: bool,
    pub reveal: bool,
    pub dropdowns: bool,
    pub footer_years: usize,
}

pub struct PageController<D: PageDom> {
    dom: D,
    config: PageConfig,
    body: Option<D::Node>,
    menus: Vec<MobileMenu<D::Node>>,
    sticky: Option<StickyHeader<D::Node>>,
    scroll: SmoothScroll<D::Node>,
    filters: FilterEngine<D::Node>,
    reveal: ScrollReveal<D::Node>,
    animatables: Vec<D::Node>,
    dropdowns: DropdownMenus<D::Node>,
    year_targets: Vec<D::Node>,
}

impl<D: PageDom> PageController<D> {
    pub fn new(dom: D, config: PageConfig, bindings: PageBindings<D::Node>) -> Self {
        let menus = bindings
            .menus
            .into_iter()
            .map(|binding| MobileMenu::new(binding, &config.nav))
            .collect();
        let sticky = bindings
            .header
            .clone()
            .map(|header| StickyHeader::new(header, &config.header));
        let scroll = SmoothScroll::new(bindings.anchors, bindings.header, &config.scroll);
        let filters = FilterEngine::new(
            config.filters.clone(),
            config.reveal.class.clone(),
            bindings.filters,
        );
        let reveal = ScrollReveal::new(&config.reveal);
        let dropdowns = DropdownMenus::new(bindings.nav_items, &config.dropdowns);

        Self {
            dom,
            body: bindings.body,
            menus,
            sticky,
            scroll,
            filters,
            reveal,
            animatables: bindings.animatables,
            dropdowns,
            year_targets: bindings.year_targets,
            config,
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn menus(&self) -> &[MobileMenu<D::Node>] {
        &self.menus
    }

    pub fn filters(&self) -> &FilterEngine<D::Node> {
        &self.filters
    }

    pub fn smooth_scroll(&self) -> &SmoothScroll<D::Node> {
        &self.scroll
    }

    pub fn dropdowns(&self) -> &DropdownMenus<D::Node> {
        &self.dropdowns
    }

    pub fn reveal(&self) -> &ScrollReveal<D::Node> {
        &self.reveal
    }

    pub fn features(&self) -> ActiveFeatures {
        ActiveFeatures {
            menus: self.menus.len(),
            sticky_header: self.sticky.is_some(),
            smooth_scroll: !self.scroll.anchors().is_empty(),
            filters: self.filters.has_controls(),
            reveal: !self.animatables.is_empty(),
            dropdowns: !self.dropdowns.items().is_empty(),
            footer_years: self.year_targets.len(),
        }
    }

    /// One-time setup: stamp footer years and hide reveal targets.
    ///
    /// Returns the elements the host must start observing. Card visibility
    /// is left untouched until a filter control changes.
    pub fn init(&self, year: i32) -> Vec<D::Node> {
        footer::stamp_year(&self.dom, &self.year_targets, year);
        let observe = self.reveal.prepare(&self.dom, &self.animatables);

        let features = self.features();
        info!(
            menus = features.menus,
            sticky_header = features.sticky_header,
            smooth_scroll = features.smooth_scroll,
            filters = features.filters,
            reveal = features.reveal,
            dropdowns = features.dropdowns,
            footer_years = features.footer_years,
            "Page controller initialised"
        );
        observe
    }

    /// Re-apply filters from the current control state.
    pub fn apply_filters(&self) -> Option<FilterOutcome> {
        self.filters
            .has_controls()
            .then(|| self.filters.apply_filters(&self.dom))
    }

    /// Restore default filter selection and show all matching cards.
    pub fn reset_filters(&self) -> Option<FilterOutcome> {
        self.filters
            .has_controls()
            .then(|| self.filters.reset_filters(&self.dom))
    }

    pub fn dispatch(&self, event: PageEvent<D::Node>) -> Reaction<D::Node> {
        let mut reaction = Reaction::default();
        let body = self.body.as_ref();

        match event {
            PageEvent::MenuToggleClicked { menu } => {
                if let Some(menu) = self.menus.get(menu) {
                    menu.toggle(&self.dom, body);
                }
            }
            PageEvent::NavLinkClicked { menu } => {
                if let Some(menu) = self.menus.get(menu) {
                    menu.close(&self.dom, body);
                }
            }
            PageEvent::DocumentClicked { target } => {
                for menu in &self.menus {
                    menu.on_document_click(&self.dom, body, target.as_ref());
                }
            }
            PageEvent::Scrolled { offset } => {
                if let Some(sticky) = &self.sticky {
                    sticky.on_scroll(&self.dom, offset);
                }
            }
            PageEvent::AnchorClicked { anchor } => {
                if let Some(top) = self.scroll.scroll_target(&self.dom, &anchor) {
                    reaction.prevent_default = true;
                    reaction.scroll_to = Some(top);
                }
            }
            PageEvent::FilterButtonClicked { button } => {
                self.filters.activate_button(&self.dom, &button);
            }
            PageEvent::FilterSelectChanged { select } => {
                if self.filters.is_select(&select) {
                    self.filters.apply_filters(&self.dom);
                }
            }
            PageEvent::ResetRequested => {
                self.reset_filters();
            }
            PageEvent::Intersections(entries) => {
                reaction.unobserve = self.reveal.on_intersections(&self.dom, entries);
            }
            PageEvent::DropdownLinkClicked { link, viewport_width } => {
                reaction.prevent_default =
                    self.dropdowns.on_link_click(&self.dom, &link, viewport_width);
            }
        }

        if reaction.prevent_default {
            debug!(scroll_to = ?reaction.scroll_to, "Default action cancelled");
        }
        reaction
    }
}
