//! In-memory page used by tests and the replay tool.
//!
//! Elements live in a flat list in document order; each may point at a
//! parent so forms can find their controls. Geometry is given up front in
//! document coordinates and never reflows.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
};

use serde::{Deserialize, Serialize};

use crate::{Display, Document, Rect, ScrollBehavior, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Description of one element to append to a [`MemoryPage`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ElementSpec {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub parent: Option<String>,
    pub value: String,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn parent(mut self, id: impl Into<String>) -> Self {
        self.parent = Some(id.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Vertical placement in document coordinates.
    pub fn at(mut self, top: f64, height: f64) -> Self {
        self.top = top;
        self.height = height;
        self
    }

    pub fn size(mut self, left: f64, width: f64) -> Self {
        self.left = left;
        self.width = width;
        self
    }
}

#[derive(Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    parent: Option<NodeId>,
    display: Option<Display>,
    inner_html: String,
    value: String,
    top: f64,
    left: f64,
    width: f64,
    height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Serialize)]
pub struct ElementSnapshot {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub inner_html: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct PageSnapshot {
    pub scroll_y: f64,
    pub inner_width: f64,
    pub scroll_requests: Vec<ScrollRequest>,
    pub elements: Vec<ElementSnapshot>,
}

pub struct MemoryPage {
    nodes: RefCell<Vec<Node>>,
    inner_width: Cell<f64>,
    inner_height: Cell<f64>,
    scroll_y: Cell<f64>,
    scroll_requests: RefCell<Vec<ScrollRequest>>,
}

impl MemoryPage {
    pub fn new(inner_width: f64, inner_height: f64) -> Self {
        Self {
            nodes: RefCell::new(vec![]),
            inner_width: Cell::new(inner_width),
            inner_height: Cell::new(inner_height),
            scroll_y: Cell::new(0.0),
            scroll_requests: RefCell::new(vec![]),
        }
    }

    /// Appends an element after every existing one.
    ///
    /// Fails when the spec names a parent id that is not on the page yet.
    pub fn append(&self, spec: ElementSpec) -> crate::Result<NodeId> {
        let parent = match spec.parent.as_deref() {
            Some(parent_id) => match self.element_by_id(parent_id) {
                Some(parent) => Some(parent),
                None => crate::bail!("unknown parent element #{parent_id}"),
            },
            None => None,
        };

        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            tag: if spec.tag.is_empty() {
                "div".to_owned()
            } else {
                spec.tag.to_lowercase()
            },
            id: spec.id,
            classes: spec.classes,
            attributes: spec.attributes,
            parent,
            display: None,
            inner_html: String::new(),
            value: spec.value,
            top: spec.top,
            left: spec.left,
            width: spec.width,
            height: spec.height,
        });

        Ok(NodeId(nodes.len() - 1))
    }

    pub fn extend(&self, specs: impl IntoIterator<Item = ElementSpec>) -> crate::Result<()> {
        for spec in specs {
            self.append(spec)?;
        }

        Ok(())
    }

    pub fn set_value(&self, element: &NodeId, value: impl Into<String>) {
        self.with_node_mut(element, |node| node.value = value.into());
    }

    pub fn set_scroll_y(&self, scroll_y: f64) {
        self.scroll_y.set(scroll_y);
    }

    pub fn set_inner_width(&self, inner_width: f64) {
        self.inner_width.set(inner_width);
    }

    pub fn classes(&self, element: &NodeId) -> Vec<String> {
        self.with_node(element, |node| node.classes.clone())
            .unwrap_or_default()
    }

    /// Inline `display` written by the behavior layer, if any.
    pub fn display(&self, element: &NodeId) -> Option<Display> {
        self.with_node(element, |node| node.display).flatten()
    }

    pub fn inner_html(&self, element: &NodeId) -> String {
        self.with_node(element, |node| node.inner_html.clone())
            .unwrap_or_default()
    }

    pub fn scroll_requests(&self) -> Vec<ScrollRequest> {
        self.scroll_requests.borrow().clone()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let elements = self
            .nodes
            .borrow()
            .iter()
            .map(|node| ElementSnapshot {
                tag: node.tag.clone(),
                id: node.id.clone(),
                classes: node.classes.clone(),
                attributes: node.attributes.clone(),
                display: node.display,
                inner_html: node.inner_html.clone(),
                value: node.value.clone(),
            })
            .collect();

        PageSnapshot {
            scroll_y: self.scroll_y.get(),
            inner_width: self.inner_width.get(),
            scroll_requests: self.scroll_requests(),
            elements,
        }
    }

    fn with_node<R>(&self, element: &NodeId, f: impl FnOnce(&Node) -> R) -> Option<R> {
        self.nodes.borrow().get(element.0).map(f)
    }

    fn with_node_mut(&self, element: &NodeId, f: impl FnOnce(&mut Node)) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(element.0) {
            f(node);
        }
    }

    fn find(&self, predicate: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, node)| predicate(node))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    fn is_descendant(nodes: &[Node], mut index: usize, ancestor: usize) -> bool {
        while let Some(NodeId(parent)) = nodes[index].parent {
            if parent == ancestor {
                return true;
            }
            index = parent;
        }

        false
    }
}

impl Document for MemoryPage {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find(|node| node.id.as_deref() == Some(id))
            .into_iter()
            .next()
    }

    /// Understands `#id`, `.class` and bare tag names.
    fn query(&self, selector: &str) -> Option<NodeId> {
        let selector = selector.trim();

        if let Some(id) = selector.strip_prefix('#') {
            if id.is_empty() {
                return None;
            }
            return self.element_by_id(id);
        }

        if let Some(class) = selector.strip_prefix('.') {
            return self.elements_by_class(class).into_iter().next();
        }

        if !selector.is_empty() && selector.chars().all(|c| c.is_ascii_alphanumeric()) {
            let tag = selector.to_lowercase();
            return self.find(|node| node.tag == tag).into_iter().next();
        }

        None
    }

    fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.find(|node| node.classes.iter().any(|c| c == class))
    }

    fn sections(&self) -> Vec<NodeId> {
        self.find(|node| node.tag == "section" && node.id.is_some())
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.with_node(element, |node| match name {
            "id" => node.id.clone(),
            "class" => Some(node.classes.join(" ")),
            _ => node.attributes.get(name).cloned(),
        })
        .flatten()
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) {
        self.with_node_mut(element, |node| {
            node.attributes.insert(name.to_owned(), value.to_owned());
        });
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.with_node(element, |node| node.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn add_class(&self, element: &NodeId, class: &str) {
        self.with_node_mut(element, |node| {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_owned());
            }
        });
    }

    fn remove_class(&self, element: &NodeId, class: &str) {
        self.with_node_mut(element, |node| node.classes.retain(|c| c != class));
    }

    fn set_class_name(&self, element: &NodeId, class_name: &str) {
        self.with_node_mut(element, |node| {
            node.classes = class_name.split_whitespace().map(str::to_owned).collect();
        });
    }

    fn set_display(&self, element: &NodeId, display: Display) {
        self.with_node_mut(element, |node| node.display = Some(display));
    }

    fn set_inner_html(&self, element: &NodeId, html: &str) {
        self.with_node_mut(element, |node| node.inner_html = html.to_owned());
    }

    fn value(&self, element: &NodeId) -> String {
        self.with_node(element, |node| node.value.clone())
            .unwrap_or_default()
    }

    fn reset_form(&self, form: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let descendants: Vec<usize> = (0..nodes.len())
            .filter(|index| Self::is_descendant(&nodes, *index, form.0))
            .collect();

        for index in descendants {
            nodes[index].value.clear();
        }
    }

    fn offset_top(&self, element: &NodeId) -> f64 {
        self.with_node(element, |node| node.top).unwrap_or(0.0)
    }

    fn offset_height(&self, element: &NodeId) -> f64 {
        self.with_node(element, |node| node.height).unwrap_or(0.0)
    }

    fn bounding_rect(&self, element: &NodeId) -> Rect {
        let scroll_y = self.scroll_y.get();
        self.with_node(element, |node| {
            Rect::new(node.top - scroll_y, node.left, node.width, node.height)
        })
        .unwrap_or_default()
    }
}

impl Viewport for MemoryPage {
    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn inner_width(&self) -> f64 {
        self.inner_width.get()
    }

    fn inner_height(&self) -> f64 {
        self.inner_height.get()
    }

    /// Records the request and lands on the destination immediately.
    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        self.scroll_requests
            .borrow_mut()
            .push(ScrollRequest { top, behavior });
        self.scroll_y.set(top.max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> MemoryPage {
        let page = MemoryPage::new(1024.0, 768.0);
        page.extend([
            ElementSpec::new("nav").id("navbar").at(0.0, 64.0),
            ElementSpec::new("a")
                .class("nav-link")
                .attr("href", "#about"),
            ElementSpec::new("section").id("about").at(600.0, 400.0),
            ElementSpec::new("section").class("no-id"),
            ElementSpec::new("form").id("contact-form"),
            ElementSpec::new("input")
                .id("name")
                .parent("contact-form")
                .value("Ada"),
            ElementSpec::new("input").id("outside").value("kept"),
        ])
        .unwrap();
        page
    }

    #[test]
    fn test_query() {
        let page = page();
        let about = page.element_by_id("about").unwrap();

        assert_eq!(page.query("#about"), Some(about));
        assert_eq!(page.query("#"), None);
        assert_eq!(page.query("#missing"), None);
        assert_eq!(page.query("section"), Some(about));
        assert!(page.query(".nav-link").is_some());
        assert_eq!(page.query("a[href]"), None);
    }

    #[test]
    fn test_sections_require_id() {
        let page = page();
        assert_eq!(page.sections(), vec![page.element_by_id("about").unwrap()]);
    }

    #[test]
    fn test_class_list() {
        let page = page();
        let link = page.query(".nav-link").unwrap();

        page.add_class(&link, "active");
        page.add_class(&link, "active");
        assert_eq!(page.classes(&link), vec!["nav-link", "active"]);

        page.remove_class(&link, "nav-link");
        assert!(!page.has_class(&link, "nav-link"));

        page.set_class_name(&link, "p-4  rounded-lg");
        assert_eq!(page.classes(&link), vec!["p-4", "rounded-lg"]);
    }

    #[test]
    fn test_reset_form_only_touches_descendants() {
        let page = page();
        let form = page.element_by_id("contact-form").unwrap();

        page.reset_form(&form);

        assert_eq!(page.value(&page.element_by_id("name").unwrap()), "");
        assert_eq!(page.value(&page.element_by_id("outside").unwrap()), "kept");
    }

    #[test]
    fn test_unknown_parent() {
        let page = page();
        let result = page.append(ElementSpec::new("input").parent("nope"));
        assert!(result.is_err());
    }

    #[test]
    fn test_bounding_rect_follows_scroll() {
        let page = page();
        let about = page.element_by_id("about").unwrap();

        page.scroll_to(500.0, ScrollBehavior::Smooth);

        assert_eq!(page.bounding_rect(&about).top, 100.0);
        assert_eq!(page.navbar_height(), 64.0);
        assert_eq!(
            page.scroll_requests(),
            vec![ScrollRequest {
                top: 500.0,
                behavior: ScrollBehavior::Smooth
            }]
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let page = page();
        let about = page.element_by_id("about").unwrap();
        page.set_display(&about, Display::None);

        let json = serde_json::to_value(page.snapshot()).unwrap();
        assert_eq!(json["elements"][2]["display"], "none");
        assert_eq!(json["elements"][2]["id"], "about");
    }
}
