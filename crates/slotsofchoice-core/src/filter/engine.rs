//! Filter engine: keeps card visibility consistent with the filter controls.

use std::fmt::Debug;

use tracing::{debug, warn};

use super::active::ActiveFilterSet;
use crate::config::FilterConfig;
use crate::dom::{dataset_value, PageDom};
use crate::error::ChoiceResult;

/// Marker attribute on controls that reset all filters when clicked.
pub const RESET_ATTRIBUTE: &str = "data-filter-reset";

const ADVISORY_STYLE: &str = "text-align: center; padding: 3rem; color: var(--text-muted);";

/// A button group: mutually exclusive buttons sharing one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGroup<N> {
    pub group: N,
    pub buttons: Vec<N>,
}

/// Elements the filter engine works on, collected once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBindings<N> {
    pub groups: Vec<FilterGroup<N>>,
    /// Filter buttons outside any group
    pub ungrouped_buttons: Vec<N>,
    pub selects: Vec<N>,
    pub cards: Vec<N>,
    pub container: Option<N>,
}

impl<N> Default for FilterBindings<N> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            ungrouped_buttons: Vec::new(),
            selects: Vec::new(),
            cards: Vec::new(),
            container: None,
        }
    }
}

/// What happened to the no-results advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryChange {
    Unchanged,
    Inserted,
    Removed,
    /// No results container on the page
    Skipped,
}

/// Summary of one filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOutcome {
    pub visible: usize,
    pub hidden: usize,
    pub advisory: AdvisoryChange,
}

pub struct FilterEngine<N> {
    config: FilterConfig,
    reveal_class: String,
    bindings: FilterBindings<N>,
}

impl<N: Clone + PartialEq + Debug> FilterEngine<N> {
    pub fn new(config: FilterConfig, reveal_class: impl Into<String>, bindings: FilterBindings<N>) -> Self {
        Self {
            config,
            reveal_class: reveal_class.into(),
            bindings,
        }
    }

    pub fn bindings(&self) -> &FilterBindings<N> {
        &self.bindings
    }

    /// False on pages without any filter buttons or selects.
    pub fn has_controls(&self) -> bool {
        self.bindings.groups.iter().any(|g| !g.buttons.is_empty())
            || !self.bindings.ungrouped_buttons.is_empty()
            || !self.bindings.selects.is_empty()
    }

    pub fn is_button(&self, node: &N) -> bool {
        self.bindings.ungrouped_buttons.contains(node)
            || self.bindings.groups.iter().any(|g| g.buttons.contains(node))
    }

    pub fn is_select(&self, node: &N) -> bool {
        self.bindings.selects.contains(node)
    }

    /// Handle a click on a filter button: it becomes the only active button
    /// of its group, then filters are re-applied.
    pub fn activate_button<D>(&self, dom: &D, button: &N) -> Option<FilterOutcome>
    where
        D: PageDom<Node = N>,
    {
        if !self.has_controls() {
            return None;
        }
        let active = &self.config.active_class;

        if let Some(group) = self.bindings.groups.iter().find(|g| g.buttons.contains(button)) {
            for sibling in &group.buttons {
                dom.set_class(sibling, active, false);
            }
        } else if !self.bindings.ungrouped_buttons.contains(button) {
            return None;
        }

        dom.set_class(button, active, true);
        Some(self.apply_filters(dom))
    }

    /// Read every control and build the current constraint set.
    ///
    /// Groups are read before selects; a later control overwrites an earlier
    /// one declaring the same dimension.
    pub fn active_filters<D>(&self, dom: &D) -> ActiveFilterSet
    where
        D: PageDom<Node = N>,
    {
        let mut filters = ActiveFilterSet::new();

        for group in &self.bindings.groups {
            let Some(button) = group
                .buttons
                .iter()
                .find(|b| dom.has_class(b, &self.config.active_class))
            else {
                continue;
            };
            let dimension = dom.attribute(&group.group, &self.config.dimension_attribute);
            let value = dom.attribute(button, &self.config.value_attribute);
            self.record(&mut filters, dimension, value);
        }

        for select in &self.bindings.selects {
            let dimension = dom.attribute(select, &self.config.dimension_attribute);
            self.record(&mut filters, dimension, dom.value(select));
        }

        filters
    }

    fn record(&self, filters: &mut ActiveFilterSet, dimension: Option<String>, value: Option<String>) {
        let (Some(dimension), Some(value)) = (dimension, value) else {
            return;
        };
        if dimension.is_empty() || value.is_empty() || value == self.config.sentinel {
            return;
        }
        if let Some(previous) = filters.insert(dimension.clone(), value.clone()) {
            warn!(
                dimension = %dimension,
                previous = %previous,
                value = %value,
                "Duplicate filter dimension, last control wins"
            );
        }
    }

    pub fn card_matches<D>(&self, dom: &D, card: &N, filters: &ActiveFilterSet) -> bool
    where
        D: PageDom<Node = N>,
    {
        filters.matches(|dimension| dataset_value(dom, card, dimension))
    }

    /// Show matching cards, hide the rest, then update the advisory.
    pub fn apply_filters<D>(&self, dom: &D) -> FilterOutcome
    where
        D: PageDom<Node = N>,
    {
        let filters = self.active_filters(dom);
        let mut visible = 0;

        for card in &self.bindings.cards {
            let matches = self.card_matches(dom, card, &filters);
            dom.set_displayed(card, matches);
            dom.set_class(card, &self.reveal_class, matches);
            if matches {
                visible += 1;
            }
        }

        let advisory = self.sync_advisory(dom);
        let outcome = FilterOutcome {
            visible,
            hidden: self.bindings.cards.len() - visible,
            advisory,
        };
        debug!(
            filters = filters.len(),
            visible = outcome.visible,
            hidden = outcome.hidden,
            advisory = ?outcome.advisory,
            "Filters applied"
        );
        outcome
    }

    /// Insert or remove the "no results" advisory based on how many cards in
    /// the container are still displayed.
    pub fn sync_advisory<D>(&self, dom: &D) -> AdvisoryChange
    where
        D: PageDom<Node = N>,
    {
        let Some(container) = &self.bindings.container else {
            return AdvisoryChange::Skipped;
        };

        let visible = self
            .bindings
            .cards
            .iter()
            .filter(|card| dom.contains(container, card) && dom.is_displayed(card))
            .count();
        let existing = dom.find_by_class(container, &self.config.advisory_class);

        match (visible, existing) {
            (0, None) => match self.insert_advisory(dom, container) {
                Ok(_) => AdvisoryChange::Inserted,
                Err(e) => {
                    warn!(error = %e, "Failed to insert no-results advisory");
                    AdvisoryChange::Unchanged
                }
            },
            (0, Some(_)) => AdvisoryChange::Unchanged,
            (_, Some(advisory)) => {
                dom.remove(&advisory);
                AdvisoryChange::Removed
            }
            (_, None) => AdvisoryChange::Unchanged,
        }
    }

    fn insert_advisory<D>(&self, dom: &D, container: &N) -> ChoiceResult<N>
    where
        D: PageDom<Node = N>,
    {
        let advisory = dom.create_element("div")?;
        dom.set_class(&advisory, &self.config.advisory_class, true);

        let message = dom.create_element("p")?;
        dom.set_attribute(&message, "style", ADVISORY_STYLE)?;
        dom.set_text(&message, &format!("{} ", self.config.advisory_message));

        let button = dom.create_element("button")?;
        for class in ["btn", "btn-secondary", "btn-sm"] {
            dom.set_class(&button, class, true);
        }
        dom.set_attribute(&button, "type", "button")?;
        dom.set_attribute(&button, RESET_ATTRIBUTE, "")?;
        dom.set_text(&button, &self.config.reset_label);

        dom.append_child(&message, &button)?;
        dom.append_child(&advisory, &message)?;
        dom.append_child(container, &advisory)?;
        Ok(advisory)
    }

    /// First button of every group active, every select back to the
    /// sentinel, then re-apply.
    pub fn reset_filters<D>(&self, dom: &D) -> FilterOutcome
    where
        D: PageDom<Node = N>,
    {
        for group in &self.bindings.groups {
            for (index, button) in group.buttons.iter().enumerate() {
                dom.set_class(button, &self.config.active_class, index == 0);
            }
        }
        for select in &self.bindings.selects {
            dom.set_value(select, &self.config.sentinel);
        }
        debug!("Filters reset");
        self.apply_filters(dom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDom, NodeId};

    struct Fixture {
        dom: MemoryDom,
        engine: FilterEngine<NodeId>,
        grid: NodeId,
        buttons: Vec<NodeId>,
        select: NodeId,
        acme: NodeId,
        gamma: NodeId,
    }

    fn fixture() -> Fixture {
        let dom = MemoryDom::new();
        let group = dom.element("div", &["filter-buttons"]);
        dom.set_attr(group, "data-filter-type", "provider");

        let mut buttons = Vec::new();
        for (i, value) in ["all", "beta", "gamma"].into_iter().enumerate() {
            let classes: &[&str] = if i == 0 { &["filter-btn", "active"] } else { &["filter-btn"] };
            let button = dom.element("button", classes);
            dom.set_attr(button, "data-filter", value);
            dom.append(group, button);
            buttons.push(button);
        }

        let select = dom.control("select", &["filter-select"], "all");
        dom.set_attr(select, "data-filter-type", "category");

        let grid = dom.element("div", &["casino-grid"]);
        let acme = dom.element("article", &["casino-card"]);
        dom.set_attr(acme, "data-provider", "Acme,Beta");
        dom.set_attr(acme, "data-category", "slots, live");
        let gamma = dom.element("article", &["casino-card"]);
        dom.set_attr(gamma, "data-provider", "Gamma");
        dom.append(grid, acme);
        dom.append(grid, gamma);

        let bindings = FilterBindings {
            groups: vec![FilterGroup { group, buttons: buttons.clone() }],
            ungrouped_buttons: Vec::new(),
            selects: vec![select],
            cards: vec![acme, gamma],
            container: Some(grid),
        };
        let engine = FilterEngine::new(FilterConfig::default(), "animate-fade-in-up", bindings);

        Fixture { dom, engine, grid, buttons, select, acme, gamma }
    }

    #[test]
    fn sentinel_controls_produce_no_constraints() {
        let f = fixture();
        assert!(f.engine.active_filters(&f.dom).is_empty());
    }

    #[test]
    fn clicking_button_filters_cards() {
        let f = fixture();
        let outcome = f.engine.activate_button(&f.dom, &f.buttons[1]).unwrap();

        assert_eq!(outcome.visible, 1);
        assert_eq!(outcome.hidden, 1);
        assert!(f.dom.is_displayed(&f.acme));
        assert!(f.dom.has_class(&f.acme, "animate-fade-in-up"));
        assert!(!f.dom.is_displayed(&f.gamma));
        assert!(!f.dom.has_class(&f.gamma, "animate-fade-in-up"));

        let active: Vec<_> = f.buttons.iter().filter(|b| f.dom.has_class(b, "active")).collect();
        assert_eq!(active, vec![&f.buttons[1]]);
    }

    #[test]
    fn select_value_is_a_constraint() {
        let f = fixture();
        f.dom.set_value(&f.select, "LIVE");

        let filters = f.engine.active_filters(&f.dom);
        assert_eq!(filters.get("category"), Some("LIVE"));

        let outcome = f.engine.apply_filters(&f.dom);
        assert_eq!(outcome.visible, 1);
        assert!(!f.dom.is_displayed(&f.gamma));
    }

    #[test]
    fn advisory_is_inserted_once_and_removed() {
        let f = fixture();
        f.dom.set_value(&f.select, "poker");

        let first = f.engine.apply_filters(&f.dom);
        assert_eq!(first.advisory, AdvisoryChange::Inserted);
        let second = f.engine.apply_filters(&f.dom);
        assert_eq!(second.advisory, AdvisoryChange::Unchanged);
        assert_eq!(f.dom.descendants_with_class(f.grid, "no-results").len(), 1);

        f.dom.set_value(&f.select, "all");
        let restored = f.engine.apply_filters(&f.dom);
        assert_eq!(restored.advisory, AdvisoryChange::Removed);
        assert!(f.dom.descendants_with_class(f.grid, "no-results").is_empty());
    }

    #[test]
    fn advisory_carries_reset_button() {
        let f = fixture();
        f.dom.set_value(&f.select, "poker");
        f.engine.apply_filters(&f.dom);

        let advisory = f.dom.find_by_class(&f.grid, "no-results").unwrap();
        let button = f.dom.find_by_class(&advisory, "btn-secondary").unwrap();
        assert_eq!(f.dom.text(button), "Reset Filters");
        assert!(f.dom.attribute(&button, RESET_ATTRIBUTE).is_some());

        let message = f.dom.parent(button).unwrap();
        assert_eq!(f.dom.tag(message), "p");
        assert!(f.dom.text(message).starts_with("No casinos match"));
    }

    #[test]
    fn reset_restores_defaults() {
        let f = fixture();
        f.engine.activate_button(&f.dom, &f.buttons[2]);
        f.dom.set_value(&f.select, "poker");
        f.engine.apply_filters(&f.dom);

        let outcome = f.engine.reset_filters(&f.dom);

        assert_eq!(outcome.visible, 2);
        assert_eq!(outcome.advisory, AdvisoryChange::Removed);
        assert!(f.dom.has_class(&f.buttons[0], "active"));
        assert!(!f.dom.has_class(&f.buttons[2], "active"));
        assert_eq!(f.dom.value(&f.select).as_deref(), Some("all"));
    }

    #[test]
    fn no_container_skips_advisory() {
        let dom = MemoryDom::new();
        let card = dom.element("div", &["casino-card"]);
        let select = dom.control("select", &["filter-select"], "x");
        dom.set_attr(select, "data-filter-type", "provider");

        let bindings = FilterBindings {
            selects: vec![select],
            cards: vec![card],
            ..FilterBindings::default()
        };
        let engine = FilterEngine::new(FilterConfig::default(), "animate-fade-in-up", bindings);

        let outcome = engine.apply_filters(&dom);
        assert_eq!(outcome.visible, 0);
        assert_eq!(outcome.advisory, AdvisoryChange::Skipped);
    }

    #[test]
    fn select_overrides_group_for_same_dimension() {
        let f = fixture();
        f.dom.set_attr(f.select, "data-filter-type", "provider");
        f.engine.activate_button(&f.dom, &f.buttons[2]);
        f.dom.set_value(&f.select, "beta");

        let filters = f.engine.active_filters(&f.dom);
        assert_eq!(filters.len(), 1);
        assert_eq!(filters.get("provider"), Some("beta"));

        let outcome = f.engine.apply_filters(&f.dom);
        assert_eq!(outcome.visible, 1);
        assert!(f.dom.is_displayed(&f.acme));
        assert!(!f.dom.is_displayed(&f.gamma));
    }

    #[test]
    fn ungrouped_button_only_activates_itself() {
        let dom = MemoryDom::new();
        let group = dom.element("div", &["filter-buttons"]);
        dom.set_attr(group, "data-filter-type", "provider");
        let all = dom.element("button", &["filter-btn", "active"]);
        dom.set_attr(all, "data-filter", "all");
        let gamma = dom.element("button", &["filter-btn"]);
        dom.set_attr(gamma, "data-filter", "gamma");
        dom.append(group, all);
        dom.append(group, gamma);

        let featured = dom.element("button", &["filter-btn"]);
        dom.set_attr(featured, "data-filter", "beta");
        let newest = dom.element("button", &["filter-btn"]);
        dom.set_attr(newest, "data-filter", "gamma");

        let grid = dom.element("div", &["casino-grid"]);
        let acme = dom.element("article", &["casino-card"]);
        dom.set_attr(acme, "data-provider", "Acme");
        let other = dom.element("article", &["casino-card"]);
        dom.set_attr(other, "data-provider", "Gamma");
        dom.append(grid, acme);
        dom.append(grid, other);

        let bindings = FilterBindings {
            groups: vec![FilterGroup { group, buttons: vec![all, gamma] }],
            ungrouped_buttons: vec![featured, newest],
            cards: vec![acme, other],
            container: Some(grid),
            ..FilterBindings::default()
        };
        let engine = FilterEngine::new(FilterConfig::default(), "animate-fade-in-up", bindings);

        let outcome = engine.activate_button(&dom, &featured).unwrap();

        assert!(dom.has_class(&featured, "active"));
        assert!(!dom.has_class(&newest, "active"));
        assert!(dom.has_class(&all, "active"));
        assert!(!dom.has_class(&gamma, "active"));

        assert!(engine.active_filters(&dom).is_empty());
        assert_eq!(outcome.visible, 2);
        assert_eq!(outcome.advisory, AdvisoryChange::Unchanged);
    }

    #[test]
    fn unknown_button_is_ignored() {
        let f = fixture();
        let stray = f.dom.element("button", &["filter-btn"]);
        assert!(f.engine.activate_button(&f.dom, &stray).is_none());
        assert!(!f.dom.has_class(&stray, "active"));
    }
}
