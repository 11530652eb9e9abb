//! In-memory page platform.
//!
//! [`MemoryDom`] is a small element tree with enough layout (a fixed
//! document offset per element) and viewport state to drive every behavior
//! without a browser. [`ManualScheduler`] replaces the event loop with
//! virtual time. Both back the test suite and the native preview binary.

mod scheduler;
mod selector;

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

pub use scheduler::ManualScheduler;
pub use selector::{SelectorError, SelectorList};

use crate::dom::{Dom, DomError, IntersectionCallback, Observation, ObserverOptions};

/// Handle to an element of a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    attributes: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    text: String,
    value: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    offset_top: f64,
    removals: usize,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<NodeData>,
}

impl Tree {
    const ROOT: NodeId = NodeId(0);

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    fn insert(&mut self, tag: &str) -> NodeId {
        self.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..NodeData::default()
        });
        NodeId(self.nodes.len() - 1)
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|child| *child != id);
        }
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Descendants of `scope` in document order, excluding `scope`.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(scope).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    fn is_attached(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == Self::ROOT {
                return true;
            }
            cursor = self.node(current).parent;
        }
        false
    }

    fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let attributes = &mut self.node_mut(id).attributes;
        match attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_owned(),
            None => attributes.push((name.to_owned(), value.to_owned())),
        }
    }

    fn classes(&self, id: NodeId) -> Vec<String> {
        selector::ElementTree::attribute(self, id, "class")
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_owned)
            .collect()
    }

    fn text_content(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        out.push_str(&node.text);
        for child in &node.children {
            self.text_content(*child, out);
        }
    }
}

impl selector::ElementTree for Tree {
    type Id = NodeId;

    fn tag(&self, id: NodeId) -> &str {
        &self.node(id).tag
    }

    fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }
}

struct MemoryObserver {
    targets: Vec<NodeId>,
    options: ObserverOptions,
    on_enter: IntersectionCallback<NodeId>,
}

/// An in-memory document.
///
/// The tree starts as `<html><body></body></html>`. Elements are positioned
/// by an explicit document offset (see [`ElementBuilder::at`]), the
/// viewport by [`MemoryDom::set_scroll_y`], and intersection is triggered
/// by hand through [`MemoryDom::reveal`].
pub struct MemoryDom {
    tree: RefCell<Tree>,
    body: NodeId,
    scroll_y: Cell<f64>,
    scroll_requests: RefCell<Vec<f64>>,
    intersection_support: bool,
    observers: RefCell<Vec<Rc<RefCell<MemoryObserver>>>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Creates an empty document that supports intersection observers.
    pub fn new() -> Self {
        Self::with_intersection_support(true)
    }

    /// Creates an empty document emulating a browser without
    /// `IntersectionObserver`.
    pub fn without_intersection_observer() -> Self {
        Self::with_intersection_support(false)
    }

    fn with_intersection_support(intersection_support: bool) -> Self {
        let mut tree = Tree { nodes: Vec::new() };
        let root = tree.insert("html");
        let body = tree.insert("body");
        tree.append(root, body);

        Self {
            tree: RefCell::new(tree),
            body,
            scroll_y: Cell::new(0.0),
            scroll_requests: RefCell::new(Vec::new()),
            intersection_support,
            observers: RefCell::new(Vec::new()),
        }
    }

    /// The `<body>` element.
    pub fn body_node(&self) -> NodeId {
        self.body
    }

    /// Creates a `tag` element appended to `parent`.
    pub fn add(&self, parent: NodeId, tag: &str) -> ElementBuilder<'_> {
        let mut tree = self.tree.borrow_mut();
        let id = tree.insert(tag);
        tree.append(parent, id);
        ElementBuilder { dom: self, id }
    }

    /// Creates a `tag` element appended to `<body>`.
    pub fn add_to_body(&self, tag: &str) -> ElementBuilder<'_> {
        self.add(self.body, tag)
    }

    /// Moves the viewport without going through [`Dom::scroll_to`].
    pub fn set_scroll_y(&self, y: f64) {
        self.scroll_y.set(y);
    }

    /// Every position passed to [`Dom::scroll_to`], oldest first.
    pub fn scroll_requests(&self) -> Vec<f64> {
        self.scroll_requests.borrow().clone()
    }

    /// Inline style `property` of `node`, if set.
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.tree
            .borrow()
            .node(node)
            .styles
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value.clone())
    }

    /// Whether `node` is part of the document.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.tree.borrow().is_attached(node)
    }

    /// How many times [`Dom::remove`] detached `node`.
    pub fn removal_count(&self, node: NodeId) -> usize {
        self.tree.borrow().node(node).removals
    }

    /// Simulates the user typing `value` into a form field.
    pub fn set_value(&self, field: NodeId, value: &str) {
        self.tree.borrow_mut().node_mut(field).value = Some(value.to_owned());
    }

    /// Number of elements currently watched by intersection observers.
    pub fn observed_count(&self) -> usize {
        self.observers
            .borrow()
            .iter()
            .map(|observer| observer.borrow().targets.len())
            .sum()
    }

    /// Options of every registered intersection observer.
    pub fn observer_options(&self) -> Vec<ObserverOptions> {
        self.observers
            .borrow()
            .iter()
            .map(|observer| observer.borrow().options.clone())
            .collect()
    }

    /// Simulates `node` scrolling into view, notifying every observer that
    /// watches it.
    pub fn reveal(&self, node: NodeId) {
        let observers: Vec<_> = self.observers.borrow().clone();
        for observer in observers {
            let mut observer = observer.borrow_mut();
            if !observer.targets.contains(&node) {
                continue;
            }
            if (observer.on_enter)(&node) == Observation::Release {
                observer.targets.retain(|target| *target != node);
            }
        }
    }

    fn select(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        let selector = match SelectorList::parse(selector) {
            Ok(selector) => selector,
            Err(err) => {
                log::warn!("Ignoring query with invalid selector: {err}");
                return Vec::new();
            }
        };
        let tree = self.tree.borrow();
        tree.descendants(scope)
            .into_iter()
            .filter(|id| selector.matches(&*tree, *id))
            .collect()
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(Tree::ROOT, selector)
    }

    fn query_in(&self, scope: &NodeId, selector: &str) -> Option<NodeId> {
        self.query_all_in(scope, selector).into_iter().next()
    }

    fn query_all_in(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        self.select(*scope, selector)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(Tree::ROOT).into_iter().find(|node| {
            selector::ElementTree::attribute(&*tree, *node, "id") == Some(id)
        })
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let selector = match SelectorList::parse(selector) {
            Ok(selector) => selector,
            Err(err) => {
                log::warn!("Ignoring closest() with invalid selector: {err}");
                return None;
            }
        };
        let tree = self.tree.borrow();
        let mut cursor = Some(*node);
        while let Some(current) = cursor {
            if selector.matches(&*tree, current) {
                return Some(current);
            }
            cursor = tree.node(current).parent;
        }
        None
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        selector::ElementTree::attribute(&*self.tree.borrow(), *node, name).map(str::to_owned)
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.tree.borrow_mut().set_attribute(*node, name, value);
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.tree.borrow().classes(*node).iter().any(|c| c == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut tree = self.tree.borrow_mut();
        let mut classes = tree.classes(*node);
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
            tree.set_attribute(*node, "class", &classes.join(" "));
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        let mut tree = self.tree.borrow_mut();
        let mut classes = tree.classes(*node);
        let before = classes.len();
        classes.retain(|c| c != class);
        if classes.len() != before {
            tree.set_attribute(*node, "class", &classes.join(" "));
        }
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        let mut tree = self.tree.borrow_mut();
        let styles = &mut tree.node_mut(*node).styles;
        match styles.iter_mut().find(|(key, _)| key == property) {
            Some((_, existing)) => *existing = value.to_owned(),
            None => styles.push((property.to_owned(), value.to_owned())),
        }
    }

    fn text_content(&self, node: &NodeId) -> String {
        let mut out = String::new();
        self.tree.borrow().text_content(*node, &mut out);
        out
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        if tag.is_empty() {
            return Err(DomError::CreateElement(tag.to_owned()));
        }
        Ok(self.tree.borrow_mut().insert(tag))
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        let mut tree = self.tree.borrow_mut();
        for child in std::mem::take(&mut tree.node_mut(*node).children) {
            tree.node_mut(child).parent = None;
        }
        tree.node_mut(*node).text = text.to_owned();
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.tree.borrow_mut().append(*parent, *child);
    }

    fn remove(&self, node: &NodeId) {
        let mut tree = self.tree.borrow_mut();
        if tree.node(*node).parent.is_some() {
            tree.detach(*node);
            tree.node_mut(*node).removals += 1;
        }
    }

    fn bounding_top(&self, node: &NodeId) -> f64 {
        self.offset_top(node) - self.scroll_y.get()
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.tree.borrow().node(*node).offset_top
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn scroll_to(&self, top: f64) {
        self.scroll_requests.borrow_mut().push(top);
        self.scroll_y.set(top.max(0.0));
    }

    fn form_value(&self, form: &NodeId, field: &str) -> Option<String> {
        let selector = format!(r#"[name="{field}"]"#);
        let input = self.query_in(form, &selector)?;
        let tree = self.tree.borrow();
        let node = tree.node(input);
        node.value.clone().or_else(|| {
            selector::ElementTree::attribute(&*tree, input, "value").map(str::to_owned)
        })
    }

    fn reset_form(&self, form: &NodeId) {
        let fields = self.query_all_in(form, "[name]");
        let mut tree = self.tree.borrow_mut();
        for field in fields {
            tree.node_mut(field).value = None;
        }
    }

    fn supports_intersection_observer(&self) -> bool {
        self.intersection_support
    }

    fn observe_intersections(
        &self,
        targets: &[NodeId],
        options: &ObserverOptions,
        on_enter: IntersectionCallback<NodeId>,
    ) -> Result<(), DomError> {
        if !self.intersection_support {
            return Err(DomError::Unsupported("IntersectionObserver"));
        }
        self.observers
            .borrow_mut()
            .push(Rc::new(RefCell::new(MemoryObserver {
                targets: targets.to_vec(),
                options: options.clone(),
                on_enter,
            })));
        Ok(())
    }
}

/// Fluent setup of an element created by [`MemoryDom::add`].
pub struct ElementBuilder<'a> {
    dom: &'a MemoryDom,
    id: NodeId,
}

impl ElementBuilder<'_> {
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Adds a class; may be called repeatedly.
    pub fn class(self, class: &str) -> Self {
        self.dom.add_class(&self.id, class);
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.dom.set_attribute(&self.id, name, value);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.dom.tree.borrow_mut().node_mut(self.id).text = text.to_owned();
        self
    }

    /// Places the element `top` pixels from the top of the document.
    pub fn at(self, top: f64) -> Self {
        self.dom.tree.borrow_mut().node_mut(self.id).offset_top = top;
        self
    }

    /// Finishes the builder, returning the element handle.
    pub fn node(self) -> NodeId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_follow_document_order() {
        let dom = MemoryDom::new();
        let first = dom.add_to_body("section").id("one").node();
        let nested = dom.add(first, "section").id("nested").node();
        let second = dom.add_to_body("section").id("two").node();

        assert_eq!(dom.query_all("section[id]"), vec![first, nested, second]);
        assert_eq!(dom.query("section"), Some(first));
        assert_eq!(dom.query_all_in(&first, "section"), vec![nested]);
        assert_eq!(dom.element_by_id("two"), Some(second));
    }

    #[test]
    fn closest_includes_the_node_itself() {
        let dom = MemoryDom::new();
        let card = dom.add_to_body("div").class("feature-card").node();
        let heading = dom.add(card, "h3").text("Locations").node();

        assert_eq!(dom.closest(&heading, ".feature-card"), Some(card));
        assert_eq!(dom.closest(&card, ".feature-card"), Some(card));
        assert_eq!(dom.closest(&heading, ".news-card"), None);
    }

    #[test]
    fn class_list_edits_are_deduplicated() {
        let dom = MemoryDom::new();
        let nav = dom.add_to_body("nav").class("nav-menu").node();

        dom.add_class(&nav, "active");
        dom.add_class(&nav, "active");
        assert_eq!(dom.attribute(&nav, "class").as_deref(), Some("nav-menu active"));

        dom.remove_class(&nav, "active");
        assert!(!dom.has_class(&nav, "active"));
        assert!(dom.has_class(&nav, "nav-menu"));
    }

    #[test]
    fn text_content_spans_descendants() {
        let dom = MemoryDom::new();
        let address = dom.add_to_body("p").text("12 Main St\n").node();
        dom.add(address, "span").text("Springfield");

        assert_eq!(dom.text_content(&address), "12 Main St\nSpringfield");
        dom.set_text(&address, "moved");
        assert_eq!(dom.text_content(&address), "moved");
    }

    #[test]
    fn removing_twice_detaches_once() {
        let dom = MemoryDom::new();
        let toast = dom.add_to_body("div").class("notification").node();

        dom.remove(&toast);
        dom.remove(&toast);
        assert!(!dom.is_attached(toast));
        assert_eq!(dom.removal_count(toast), 1);
        assert!(dom.query(".notification").is_none());
    }

    #[test]
    fn form_values_reset_to_their_defaults() {
        let dom = MemoryDom::new();
        let form = dom.add_to_body("form").id("contactForm").node();
        let name = dom.add(form, "input").attr("name", "name").node();
        dom.add(form, "input")
            .attr("name", "subject")
            .attr("value", "General");

        dom.set_value(name, "Asha");
        assert_eq!(dom.form_value(&form, "name").as_deref(), Some("Asha"));
        assert_eq!(dom.form_value(&form, "subject").as_deref(), Some("General"));

        dom.reset_form(&form);
        assert_eq!(dom.form_value(&form, "name"), None);
        assert_eq!(dom.form_value(&form, "subject").as_deref(), Some("General"));
        assert_eq!(dom.form_value(&form, "phone"), None);
    }

    #[test]
    fn observers_release_revealed_targets() {
        let dom = MemoryDom::new();
        let image = dom.add_to_body("img").node();
        let seen = Rc::new(Cell::new(0));
        let counter = seen.clone();

        dom.observe_intersections(
            &[image],
            &ObserverOptions::default(),
            Box::new(move |_| {
                counter.set(counter.get() + 1);
                Observation::Release
            }),
        )
        .unwrap();

        dom.reveal(image);
        dom.reveal(image);
        assert_eq!(seen.get(), 1);
        assert_eq!(dom.observed_count(), 0);
    }

    #[test]
    fn unsupported_observer_is_an_error() {
        let dom = MemoryDom::without_intersection_observer();
        let result =
            dom.observe_intersections(&[], &ObserverOptions::default(), Box::new(|_| Observation::Keep));
        assert!(matches!(result, Err(DomError::Unsupported(_))));
    }
}
