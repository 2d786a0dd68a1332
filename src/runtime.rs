//! Event wiring between the live document and the page controller.
//!
//! Every listener turns a browser event into a [`PageEvent`], dispatches it
//! and applies the returned [`Reaction`]. Listeners are removed when the
//! runtime is dropped.

use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use slotsofchoice_core::filter::RESET_ATTRIBUTE;
use slotsofchoice_core::{Intersection, PageController, PageEvent, Reaction};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom::{js_error, WebDom};

type Controller = Rc<PageController<WebDom>>;
type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct RevealObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub struct PageRuntime {
    controller: Controller,
    listeners: Vec<EventListener>,
    observer: Option<RevealObserver>,
}

impl PageRuntime {
    /// Initialise the controller and attach every listener it needs.
    pub fn start(controller: PageController<WebDom>, year: i32) -> Self {
        let controller = Rc::new(controller);
        let observe = controller.init(year);

        let mut runtime = Self {
            controller,
            listeners: Vec::new(),
            observer: None,
        };
        runtime.bind_menus();
        runtime.bind_document();
        runtime.bind_scroll();
        runtime.bind_anchors();
        runtime.bind_filters();
        runtime.bind_dropdowns();
        runtime.observer = runtime.observe(observe);

        debug!(
            listeners = runtime.listener_count(),
            observing = runtime.is_observing(),
            "Page runtime started"
        );
        runtime
    }

    pub fn controller(&self) -> Controller {
        Rc::clone(&self.controller)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    fn listen<F>(
        &mut self,
        target: &web_sys::EventTarget,
        event_type: &'static str,
        cancelable: bool,
        event: F,
    )
    where
        F: Fn(&Event) -> Option<PageEvent<Element>> + 'static,
    {
        let controller = self.controller();
        let callback = move |e: &Event| {
            if let Some(page_event) = event(e) {
                let reaction = controller.dispatch(page_event);
                apply(controller.dom(), e, reaction);
            }
        };
        let listener = if cancelable {
            EventListener::new_with_options(
                target,
                event_type,
                EventListenerOptions::enable_prevent_default(),
                callback,
            )
        } else {
            EventListener::new(target, event_type, callback)
        };
        self.listeners.push(listener);
    }

    fn bind_menus(&mut self) {
        let menus: Vec<_> = self
            .controller
            .menus()
            .iter()
            .map(|menu| menu.binding().clone())
            .collect();

        for (index, binding) in menus.into_iter().enumerate() {
            self.listen(&binding.toggle, "click", false, move |_| {
                Some(PageEvent::MenuToggleClicked { menu: index })
            });
            for link in &binding.links {
                self.listen(link, "click", false, move |_| {
                    Some(PageEvent::NavLinkClicked { menu: index })
                });
            }
        }
    }

    /// Delegated document clicks: advisory reset buttons, then outside-click
    /// closing for the mobile menus.
    fn bind_document(&mut self) {
        let controller = self.controller();
        let document = controller.dom().document().clone();
        let reset_selector = format!("[{RESET_ATTRIBUTE}]");

        let listener = EventListener::new(&document, "click", move |e: &Event| {
            let target = e.target().and_then(|t| t.dyn_into::<Element>().ok());

            let is_reset = target
                .as_ref()
                .is_some_and(|t| matches!(t.closest(&reset_selector), Ok(Some(_))));
            if is_reset {
                controller.dispatch(PageEvent::ResetRequested);
            }
            controller.dispatch(PageEvent::DocumentClicked { target });
        });
        self.listeners.push(listener);
    }

    fn bind_scroll(&mut self) {
        if !self.controller.features().sticky_header {
            return;
        }
        let window = self.controller.dom().window().clone();
        let dom = self.controller.dom().clone();
        self.listen(&window, "scroll", false, move |_| {
            Some(PageEvent::Scrolled {
                offset: dom.page_y_offset(),
            })
        });
    }

    fn bind_anchors(&mut self) {
        let anchors = self.controller.smooth_scroll().anchors().to_vec();
        for anchor in anchors {
            let target = anchor.clone();
            self.listen(&anchor, "click", true, move |_| {
                Some(PageEvent::AnchorClicked {
                    anchor: target.clone(),
                })
            });
        }
    }

    fn bind_filters(&mut self) {
        let bindings = self.controller.filters().bindings().clone();
        let buttons = bindings
            .groups
            .iter()
            .flat_map(|group| group.buttons.iter())
            .chain(bindings.ungrouped_buttons.iter());

        for button in buttons {
            let target = button.clone();
            self.listen(button, "click", false, move |_| {
                Some(PageEvent::FilterButtonClicked {
                    button: target.clone(),
                })
            });
        }
        for select in &bindings.selects {
            let target = select.clone();
            self.listen(select, "change", false, move |_| {
                Some(PageEvent::FilterSelectChanged {
                    select: target.clone(),
                })
            });
        }
    }

    fn bind_dropdowns(&mut self) {
        let links: Vec<Element> = self
            .controller
            .dropdowns()
            .items()
            .iter()
            .filter_map(|item| item.link.clone())
            .collect();

        for link in links {
            let target = link.clone();
            let dom = self.controller.dom().clone();
            self.listen(&link, "click", true, move |_| {
                Some(PageEvent::DropdownLinkClicked {
                    link: target.clone(),
                    viewport_width: dom.viewport_width(),
                })
            });
        }
    }

    /// Start the reveal observer. Without observer support every element is
    /// revealed at once so nothing stays hidden.
    fn observe(&self, elements: Vec<Element>) -> Option<RevealObserver> {
        if elements.is_empty() {
            return None;
        }

        let controller = self.controller();
        let callback: ObserverCallback = Closure::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let intersections = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| Intersection {
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                    })
                    .collect();
                let reaction = controller.dispatch(PageEvent::Intersections(intersections));
                for element in &reaction.unobserve {
                    observer.unobserve(element);
                }
            },
        );

        let reveal = &self.controller.config().reveal;
        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(reveal.threshold));
        options.set_root_margin(&reveal.root_margin);

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => {
                for element in &elements {
                    observer.observe(element);
                }
                Some(RevealObserver {
                    observer,
                    _callback: callback,
                })
            }
            Err(e) => {
                warn!(error = %js_error(e), "IntersectionObserver unavailable, revealing immediately");
                let everything = elements
                    .into_iter()
                    .map(|target| Intersection {
                        target,
                        is_intersecting: true,
                    })
                    .collect();
                self.controller.dispatch(PageEvent::Intersections(everything));
                None
            }
        }
    }
}

fn apply(dom: &WebDom, event: &Event, reaction: Reaction<Element>) {
    if reaction.prevent_default {
        event.prevent_default();
    }
    if let Some(top) = reaction.scroll_to {
        dom.scroll_smoothly_to(top);
    }
}
