//! DomHost: the live marketplace page as a [`ListingHost`]

use crate::annotator::host::ListingHost;
use crate::annotator::render::Badge;
use crate::config::AnnotatorConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Node, NodeList};

#[derive(Clone)]
pub struct DomHost {
    document: Document,
    config: AnnotatorConfig,
}

impl DomHost {
    pub fn new(document: Document, config: AnnotatorConfig) -> Self {
        Self { document, config }
    }

    /// Host for the current window's document, if there is one
    pub fn from_window(config: AnnotatorConfig) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::new(document, config))
    }

    /// Node to watch for structural changes: the listing container, or the
    /// whole body when the page has no such container.
    pub fn observe_target(&self) -> Option<Node> {
        self.document
            .query_selector(&self.config.container_selector)
            .ok()
            .flatten()
            .map(Node::from)
            .or_else(|| self.document.body().map(Node::from))
    }

    fn select_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => elements(list),
            Err(e) => {
                console_error!("[DomHost] Invalid selector '{}': {}", selector, describe(e));
                Vec::new()
            }
        }
    }
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn describe(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

impl ListingHost for DomHost {
    type Element = Element;

    fn listings(&self) -> Vec<Element> {
        self.select_all(&self.config.listing_selector)
    }

    fn marked_listings(&self) -> Vec<Element> {
        self.select_all(&self.config.marked_selector)
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) {
        let _ = element.set_attribute(name, value);
    }

    fn remove_attribute(&self, element: &Element, name: &str) {
        let _ = element.remove_attribute(name);
    }

    fn anchor(&self, element: &Element) -> Option<Element> {
        element.query_selector(&self.config.anchor_selector).ok().flatten()
    }

    fn append_badge(&self, anchor: &Element, badge: &Badge) -> Result<(), String> {
        let span = self.document.create_element("span").map_err(describe)?;
        span.set_class_name(&badge.class_name);
        span.set_text_content(Some(&badge.label));
        span.set_attribute("title", &badge.tooltip).map_err(describe)?;
        span.set_attribute("style", &badge.style).map_err(describe)?;
        anchor.append_child(&span).map_err(describe)?;
        Ok(())
    }

    fn remove_badges(&self, element: &Element) -> usize {
        let Ok(list) = element.query_selector_all(&self.config.badge_selector) else {
            return 0;
        };
        let badges = elements(list);
        for badge in &badges {
            badge.remove();
        }
        badges.len()
    }
}
