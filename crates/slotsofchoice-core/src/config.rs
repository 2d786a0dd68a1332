//! Page controller configuration.
//!
//! Every field has a default matching the stock site templates, so an empty
//! JSON object (or no config at all) yields a working controller. Pages with
//! different markup override only the selectors they need:
//!
//! ```json
//! {
//!   "log_level": "debug",
//!   "nav": { "menus": [{ "toggle": "#menuButton", "panel": "#siteNav" }] },
//!   "filters": { "card_selector": ".listing" }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ChoiceError, ChoiceResult};

/// Levels accepted by `log_level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub log_level: String,
    pub nav: NavConfig,
    pub header: HeaderConfig,
    pub scroll: ScrollConfig,
    pub filters: FilterConfig,
    pub reveal: RevealConfig,
    pub dropdowns: DropdownConfig,
    pub footer: FooterConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            nav: NavConfig::default(),
            header: HeaderConfig::default(),
            scroll: ScrollConfig::default(),
            filters: FilterConfig::default(),
            reveal: RevealConfig::default(),
            dropdowns: DropdownConfig::default(),
            footer: FooterConfig::default(),
        }
    }
}

/// Selector pair for one mobile menu template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSelectors {
    pub toggle: String,
    pub panel: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// One entry per page template; each is wired independently
    pub menus: Vec<MenuSelectors>,
    pub link_selector: String,
    pub active_class: String,
    pub body_open_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            menus: vec![MenuSelectors {
                toggle: ".mobile-menu-toggle".to_string(),
                panel: ".nav".to_string(),
            }],
            link_selector: ".nav-link".to_string(),
            active_class: "active".to_string(),
            body_open_class: "menu-open".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub selector: String,
    pub scrolled_class: String,
    /// Offset (CSS px) above which the header counts as scrolled
    pub scroll_threshold: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            selector: ".header".to_string(),
            scrolled_class: "scrolled".to_string(),
            scroll_threshold: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub anchor_selector: String,
    /// Used when the page has no header or it reports zero height
    pub fallback_header_height: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            anchor_selector: "a[href^=\"#\"]".to_string(),
            fallback_header_height: 70.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub button_selector: String,
    pub group_selector: String,
    pub select_selector: String,
    /// Attribute on groups and selects naming the filter dimension
    pub dimension_attribute: String,
    /// Attribute on buttons holding the filter value
    pub value_attribute: String,
    /// Value meaning "no constraint"
    pub sentinel: String,
    pub active_class: String,
    pub card_selector: String,
    pub container_selector: String,
    pub advisory_class: String,
    pub advisory_message: String,
    pub reset_label: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            button_selector: ".filter-btn".to_string(),
            group_selector: ".filter-buttons".to_string(),
            select_selector: ".filter-select".to_string(),
            dimension_attribute: "data-filter-type".to_string(),
            value_attribute: "data-filter".to_string(),
            sentinel: "all".to_string(),
            active_class: "active".to_string(),
            card_selector: ".casino-card".to_string(),
            container_selector: ".casino-grid, .top-picks-grid".to_string(),
            advisory_class: "no-results".to_string(),
            advisory_message: "No casinos match your current filters.".to_string(),
            reset_label: "Reset Filters".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    /// Marker class shared with the filter engine
    pub class: String,
    /// Fraction of the element that must be visible
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".card, .category-card, .casino-card".to_string(),
            class: "animate-fade-in-up".to_string(),
            threshold: 0.1,
            root_margin: "0px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownConfig {
    pub item_selector: String,
    pub link_selector: String,
    pub submenu_selector: String,
    pub active_class: String,
    /// Viewports at most this wide toggle submenus on click
    pub max_touch_width: f64,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            item_selector: ".nav-item".to_string(),
            link_selector: ".nav-link".to_string(),
            submenu_selector: ".nav-dropdown".to_string(),
            active_class: "active".to_string(),
            max_touch_width: 768.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub year_selector: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            year_selector: ".js-current-year, [data-year]".to_string(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> ChoiceResult<Self> {
        let config: PageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ChoiceResult<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(invalid(format!("unknown log_level '{}'", self.log_level)));
        }

        for (i, menu) in self.nav.menus.iter().enumerate() {
            require(&format!("nav.menus[{i}].toggle"), &menu.toggle)?;
            require(&format!("nav.menus[{i}].panel"), &menu.panel)?;
        }

        let selectors = [
            ("nav.link_selector", &self.nav.link_selector),
            ("nav.active_class", &self.nav.active_class),
            ("nav.body_open_class", &self.nav.body_open_class),
            ("header.selector", &self.header.selector),
            ("header.scrolled_class", &self.header.scrolled_class),
            ("scroll.anchor_selector", &self.scroll.anchor_selector),
            ("filters.button_selector", &self.filters.button_selector),
            ("filters.group_selector", &self.filters.group_selector),
            ("filters.select_selector", &self.filters.select_selector),
            ("filters.dimension_attribute", &self.filters.dimension_attribute),
            ("filters.value_attribute", &self.filters.value_attribute),
            ("filters.sentinel", &self.filters.sentinel),
            ("filters.active_class", &self.filters.active_class),
            ("filters.card_selector", &self.filters.card_selector),
            ("filters.container_selector", &self.filters.container_selector),
            ("filters.advisory_class", &self.filters.advisory_class),
            ("reveal.selector", &self.reveal.selector),
            ("reveal.class", &self.reveal.class),
            ("dropdowns.item_selector", &self.dropdowns.item_selector),
            ("dropdowns.link_selector", &self.dropdowns.link_selector),
            ("dropdowns.submenu_selector", &self.dropdowns.submenu_selector),
            ("dropdowns.active_class", &self.dropdowns.active_class),
            ("footer.year_selector", &self.footer.year_selector),
        ];
        for (name, value) in selectors {
            require(name, value)?;
        }

        non_negative("header.scroll_threshold", self.header.scroll_threshold)?;
        non_negative("scroll.fallback_header_height", self.scroll.fallback_header_height)?;
        non_negative("dropdowns.max_touch_width", self.dropdowns.max_touch_width)?;

        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(invalid(format!(
                "reveal.threshold must be within [0, 1], got {}",
                self.reveal.threshold
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> ChoiceError {
    ChoiceError::InvalidConfig(message)
}

fn require(name: &str, value: &str) -> ChoiceResult<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{name} must not be empty")));
    }
    Ok(())
}

fn non_negative(name: &str, value: f64) -> ChoiceResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(format!("{name} must be a non-negative number, got {value}")));
    }
    Ok(())
}
