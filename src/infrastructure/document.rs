//! In-memory DOM adapter.
//!
//! `MemoryDocument` implements the [`Document`] port over an arena of
//! elements. It is the adapter used by headless hosts and by the test
//! suite: the host builds the tree, sets viewport and layout facts, and
//! dispatches events through [`MemoryDocument::dispatch`].
//!
//! Event dispatch follows the browser model closely enough for the
//! enhancement layer: listeners for one node run in registration order,
//! bubbling events travel target → ancestors → document → window, and
//! `stop_propagation` halts the walk after the current node.

use crate::application::ports::{Document, Listener, ListenerId};
use crate::domain::event::{
    DomEvent, ElementId, EventKind, Key, ListenerTarget, Modifiers, ReadyState, ScrollBehavior,
};
use crate::domain::selector::{ElementView, SelectorList};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

const ROOT: usize = 0;

#[derive(Debug, Default)]
struct Node {
    tag: String,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    parent: Option<usize>,
    children: Vec<usize>,
    offset_height: f64,
    top: f64,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    fn class_list(&self) -> impl Iterator<Item = &str> {
        self.attrs
            .get("class")
            .map(String::as_str)
            .unwrap_or("")
            .split_whitespace()
    }
}

impl ElementView for Node {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
    body: usize,
    focused: Option<usize>,
    viewport_width: u32,
    scroll_y: f64,
    path: String,
    ready_state: ReadyState,
    reduced_motion: bool,
    scroll_requests: Vec<ScrollRequest>,
}

impl Tree {
    fn node(&self, id: ElementId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Pre-order walk below `root`, excluding `root`.
    fn descendants(&self, root: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.nodes[root].children.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            out.push(index);
            stack.extend(self.nodes[index].children.iter().rev().copied());
        }
        out
    }

    fn is_connected(&self, index: usize) -> bool {
        let mut current = Some(index);
        while let Some(i) = current {
            if i == ROOT {
                return true;
            }
            current = self.nodes[i].parent;
        }
        false
    }

    fn detach(&mut self, index: usize) {
        if let Some(parent) = self.nodes[index].parent.take() {
            self.nodes[parent].children.retain(|&c| c != index);
        }
    }
}

/// A scroll request recorded by [`Document::scroll_to`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

struct Registered {
    id: ListenerId,
    target: ListenerTarget,
    kind: EventKind,
    listener: Listener,
}

/// Arena-backed DOM with browser-like event dispatch.
pub struct MemoryDocument {
    tree: RefCell<Tree>,
    listeners: RefCell<Vec<Registered>>,
    next_listener: Cell<u64>,
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("elements", &self.tree.borrow().nodes.len())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An interactive document with `<html><body></body></html>` at path `/`,
    /// a 1280 px wide viewport, and no scroll offset.
    pub fn new() -> Self {
        let mut root = Node::new("html");
        let mut body = Node::new("body");
        body.parent = Some(ROOT);
        root.children.push(1);
        Self {
            tree: RefCell::new(Tree {
                nodes: vec![root, body],
                body: 1,
                focused: None,
                viewport_width: 1280,
                scroll_y: 0.0,
                path: "/".to_owned(),
                ready_state: ReadyState::Interactive,
                reduced_motion: false,
                scroll_requests: Vec::new(),
            }),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        }
    }

    /// Builder-style location override.
    pub fn with_path(self, path: &str) -> Self {
        self.set_path(path);
        self
    }

    /// Builder-style viewport override.
    pub fn with_viewport_width(self, width: u32) -> Self {
        self.set_viewport_width(width);
        self
    }

    pub fn set_path(&self, path: &str) {
        self.tree.borrow_mut().path = path.to_owned();
    }

    pub fn set_viewport_width(&self, width: u32) {
        self.tree.borrow_mut().viewport_width = width;
    }

    pub fn set_ready_state(&self, state: ReadyState) {
        self.tree.borrow_mut().ready_state = state;
    }

    pub fn set_reduced_motion(&self, reduced: bool) {
        self.tree.borrow_mut().reduced_motion = reduced;
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.tree.borrow_mut().scroll_y = y;
    }

    /// Set layout facts for an element: viewport-relative top and height.
    pub fn set_layout(&self, element: ElementId, top: f64, height: f64) {
        if let Some(node) = self.tree.borrow_mut().node_mut(element) {
            node.top = top;
            node.offset_height = height;
        }
    }

    /// Scroll requests issued so far, oldest first.
    pub fn scroll_requests(&self) -> Vec<ScrollRequest> {
        self.tree.borrow().scroll_requests.clone()
    }

    /// Create `<tag attrs...>` and append it to `parent`.
    ///
    /// A `value` attribute also seeds the control's current value.
    pub fn append(&self, parent: ElementId, tag: &str, attrs: &[(&str, &str)]) -> ElementId {
        let id = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attribute(id, name, value);
            if *name == "value" {
                self.set_value(id, value);
            }
        }
        self.append_child(parent, id);
        id
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Number of listeners of `kind` on `target`.
    pub fn listeners_on(&self, target: ListenerTarget, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|r| r.target == target && r.kind == kind)
            .count()
    }

    /// Dispatch `event` and hand it back for inspection.
    pub fn dispatch(&self, event: DomEvent) -> DomEvent {
        for node in self.propagation_path(&event) {
            let listeners: Vec<(ListenerId, Listener)> = self
                .listeners
                .borrow()
                .iter()
                .filter(|r| r.target == node && r.kind == event.kind())
                .map(|r| (r.id, Rc::clone(&r.listener)))
                .collect();
            for (id, listener) in listeners {
                // skip listeners removed earlier in this dispatch
                if !self.listeners.borrow().iter().any(|r| r.id == id) {
                    continue;
                }
                listener(&event);
            }
            if event.propagation_stopped() {
                break;
            }
        }
        event
    }

    /// Click `element`.
    pub fn click(&self, element: ElementId) -> DomEvent {
        self.dispatch(DomEvent::click(element))
    }

    /// Press `key` with the focused element (or the document) as target.
    pub fn key_down(&self, key: Key, modifiers: Modifiers) -> DomEvent {
        let target = match self.active_element() {
            Some(el) => ListenerTarget::Element(el),
            None => ListenerTarget::Document,
        };
        self.dispatch(DomEvent::key_down(target, key, modifiers))
    }

    /// Change the viewport width and fire `resize` on the window.
    pub fn resize(&self, width: u32) -> DomEvent {
        self.set_viewport_width(width);
        self.dispatch(DomEvent::resize())
    }

    /// Fire `event` of `kind` at `element`.
    pub fn fire(&self, kind: EventKind, element: ElementId) -> DomEvent {
        self.dispatch(DomEvent::new(kind, ListenerTarget::Element(element)))
    }

    /// Move to `Interactive` and fire `DOMContentLoaded` on the document.
    pub fn finish_loading(&self) -> DomEvent {
        self.set_ready_state(ReadyState::Interactive);
        self.dispatch(DomEvent::new(
            EventKind::DomContentLoaded,
            ListenerTarget::Document,
        ))
    }

    fn propagation_path(&self, event: &DomEvent) -> Vec<ListenerTarget> {
        let bubbles = event.kind().bubbles();
        let tree = self.tree.borrow();
        let mut path = Vec::new();
        match event.target() {
            ListenerTarget::Element(el) => {
                if tree.node(el).is_none() {
                    return path;
                }
                path.push(ListenerTarget::Element(el));
                if !bubbles {
                    return path;
                }
                let mut current = tree.nodes[el.0].parent;
                while let Some(i) = current {
                    path.push(ListenerTarget::Element(ElementId(i)));
                    current = tree.nodes[i].parent;
                }
                if tree.is_connected(el.0) {
                    path.push(ListenerTarget::Document);
                    path.push(ListenerTarget::Window);
                }
            }
            ListenerTarget::Document => {
                path.push(ListenerTarget::Document);
                if bubbles {
                    path.push(ListenerTarget::Window);
                }
            }
            ListenerTarget::Window => path.push(ListenerTarget::Window),
        }
        path
    }
}

impl Document for MemoryDocument {
    fn ready_state(&self) -> ReadyState {
        self.tree.borrow().ready_state
    }

    fn body(&self) -> ElementId {
        ElementId(self.tree.borrow().body)
    }

    fn query_selector_all(&self, selector: &SelectorList) -> Vec<ElementId> {
        let tree = self.tree.borrow();
        std::iter::once(ROOT)
            .chain(tree.descendants(ROOT))
            .filter(|&i| selector.matches(&tree.nodes[i]))
            .map(ElementId)
            .collect()
    }

    fn query_within(&self, root: ElementId, selector: &SelectorList) -> Vec<ElementId> {
        let tree = self.tree.borrow();
        if tree.node(root).is_none() {
            return Vec::new();
        }
        tree.descendants(root.0)
            .into_iter()
            .filter(|&i| selector.matches(&tree.nodes[i]))
            .map(ElementId)
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        let tree = self.tree.borrow();
        tree.descendants(ROOT)
            .into_iter()
            .find(|&i| tree.nodes[i].attribute("id") == Some(id))
            .map(ElementId)
    }

    fn tag_name(&self, element: ElementId) -> Option<String> {
        self.tree.borrow().node(element).map(|n| n.tag.clone())
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.tree
            .borrow()
            .node(element)
            .and_then(|n| n.attrs.get(name).cloned())
    }

    fn set_attribute(&self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.tree.borrow_mut().node_mut(element) {
            node.attrs.insert(name.to_owned(), value.to_owned());
        }
    }

    fn remove_attribute(&self, element: ElementId, name: &str) {
        if let Some(node) = self.tree.borrow_mut().node_mut(element) {
            node.attrs.remove(name);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.tree
            .borrow()
            .node(element)
            .is_some_and(|n| n.has_class(class))
    }

    fn add_class(&self, element: ElementId, class: &str) {
        let mut tree = self.tree.borrow_mut();
        let Some(node) = tree.node_mut(element) else {
            return;
        };
        if node.has_class(class) {
            return;
        }
        let mut classes: Vec<&str> = node.class_list().collect();
        classes.push(class);
        let joined = classes.join(" ");
        node.attrs.insert("class".to_owned(), joined);
    }

    fn remove_class(&self, element: ElementId, class: &str) {
        let mut tree = self.tree.borrow_mut();
        let Some(node) = tree.node_mut(element) else {
            return;
        };
        if !node.has_class(class) {
            return;
        }
        let joined = node
            .class_list()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        node.attrs.insert("class".to_owned(), joined);
    }

    fn classes(&self, element: ElementId) -> Vec<String> {
        self.tree
            .borrow()
            .node(element)
            .map(|n| n.class_list().map(str::to_owned).collect())
            .unwrap_or_default()
    }

    fn set_style(&self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.tree.borrow_mut().node_mut(element) {
            node.styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        self.tree
            .borrow()
            .node(element)
            .and_then(|n| n.styles.get(property).cloned())
    }

    fn text(&self, element: ElementId) -> String {
        self.tree
            .borrow()
            .node(element)
            .map(|n| n.text.clone())
            .unwrap_or_default()
    }

    fn set_text(&self, element: ElementId, text: &str) {
        if let Some(node) = self.tree.borrow_mut().node_mut(element) {
            node.text = text.to_owned();
        }
    }

    fn value(&self, element: ElementId) -> String {
        self.tree
            .borrow()
            .node(element)
            .map(|n| n.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&self, element: ElementId, value: &str) {
        if let Some(node) = self.tree.borrow_mut().node_mut(element) {
            node.value = value.to_owned();
        }
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.tree
            .borrow()
            .node(element)
            .and_then(|n| n.parent)
            .map(ElementId)
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.tree
            .borrow()
            .node(element)
            .map(|n| n.children.iter().copied().map(ElementId).collect())
            .unwrap_or_default()
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let tree = self.tree.borrow();
        if tree.node(node).is_none() {
            return false;
        }
        let mut current = Some(node.0);
        while let Some(i) = current {
            if i == ancestor.0 {
                return true;
            }
            current = tree.nodes[i].parent;
        }
        false
    }

    fn create_element(&self, tag: &str) -> ElementId {
        let mut tree = self.tree.borrow_mut();
        tree.nodes.push(Node::new(tag));
        ElementId(tree.nodes.len() - 1)
    }

    fn append_child(&self, parent: ElementId, child: ElementId) {
        let mut tree = self.tree.borrow_mut();
        if tree.node(parent).is_none() || tree.node(child).is_none() || parent == child {
            return;
        }
        // Refuse to create a cycle.
        let mut current = Some(parent.0);
        while let Some(i) = current {
            if i == child.0 {
                return;
            }
            current = tree.nodes[i].parent;
        }
        tree.detach(child.0);
        tree.nodes[child.0].parent = Some(parent.0);
        tree.nodes[parent.0].children.push(child.0);
    }

    fn remove_element(&self, element: ElementId) {
        let mut tree = self.tree.borrow_mut();
        if tree.node(element).is_some() && element.0 != ROOT {
            tree.detach(element.0);
            if tree.focused.is_some_and(|f| !tree.is_connected(f)) {
                tree.focused = None;
            }
        }
    }

    fn is_connected(&self, element: ElementId) -> bool {
        let tree = self.tree.borrow();
        tree.node(element).is_some() && tree.is_connected(element.0)
    }

    fn focus(&self, element: ElementId) {
        let mut tree = self.tree.borrow_mut();
        if tree.node(element).is_some() && tree.is_connected(element.0) {
            tree.focused = Some(element.0);
        }
    }

    fn active_element(&self) -> Option<ElementId> {
        self.tree.borrow().focused.map(ElementId)
    }

    fn viewport_width(&self) -> u32 {
        self.tree.borrow().viewport_width
    }

    fn scroll_y(&self) -> f64 {
        self.tree.borrow().scroll_y
    }

    fn offset_height(&self, element: ElementId) -> f64 {
        self.tree
            .borrow()
            .node(element)
            .map_or(0.0, |n| n.offset_height)
    }

    fn bounding_top(&self, element: ElementId) -> f64 {
        self.tree.borrow().node(element).map_or(0.0, |n| n.top)
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let mut tree = self.tree.borrow_mut();
        tree.scroll_requests.push(ScrollRequest { top, behavior });
        tree.scroll_y = top;
    }

    fn location_path(&self) -> String {
        self.tree.borrow().path.clone()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.tree.borrow().reduced_motion
    }

    fn add_event_listener(&self, target: ListenerTarget, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push(Registered {
            id,
            target,
            kind,
            listener,
        });
        id
    }

    fn remove_event_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|r| r.id != id);
        listeners.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(s: &str) -> SelectorList {
        SelectorList::parse(s).unwrap()
    }

    #[test]
    fn test_query_in_document_order() {
        let doc = MemoryDocument::new();
        let body = doc.body();
        let nav = doc.append(body, "nav", &[("class", "c-nav")]);
        let a1 = doc.append(nav, "a", &[("href", "/a")]);
        let div = doc.append(body, "div", &[]);
        let a2 = doc.append(div, "a", &[("href", "/b")]);
        let a0 = doc.append(nav, "a", &[("href", "/c")]);

        assert_eq!(doc.query_selector_all(&sel("a[href]")), vec![a1, a0, a2]);
        assert_eq!(doc.query_within(nav, &sel("a")), vec![a1, a0]);
        assert_eq!(doc.query_selector(&sel(".c-nav")), Some(nav));
    }

    #[test]
    fn test_class_manipulation() {
        let doc = MemoryDocument::new();
        let el = doc.append(doc.body(), "div", &[("class", "d-flex  card")]);

        doc.add_class(el, "gap-3");
        doc.add_class(el, "gap-3");
        assert_eq!(doc.classes(el), vec!["d-flex", "card", "gap-3"]);

        doc.remove_class(el, "card");
        assert!(!doc.has_class(el, "card"));
        assert_eq!(doc.attribute(el, "class").as_deref(), Some("d-flex gap-3"));
    }

    #[test]
    fn test_contains_and_detach() {
        let doc = MemoryDocument::new();
        let outer = doc.append(doc.body(), "div", &[]);
        let inner = doc.append(outer, "span", &[]);

        assert!(doc.contains(outer, inner));
        assert!(doc.contains(inner, inner));
        assert!(!doc.contains(inner, outer));

        doc.remove_element(inner);
        assert!(!doc.is_connected(inner));
        assert!(!doc.contains(outer, inner));
    }

    #[test]
    fn test_append_refuses_cycles() {
        let doc = MemoryDocument::new();
        let outer = doc.append(doc.body(), "div", &[]);
        let inner = doc.append(outer, "div", &[]);
        doc.append_child(inner, outer);
        assert_eq!(doc.parent(outer), Some(doc.body()));
    }

    #[test]
    fn test_bubbling_order_and_stop_propagation() {
        let doc = Rc::new(MemoryDocument::new());
        let outer = doc.append(doc.body(), "div", &[]);
        let inner = doc.append(outer, "button", &[]);
        let log = Rc::new(RefCell::new(Vec::new()));

        for (target, label) in [
            (ListenerTarget::Window, "window"),
            (ListenerTarget::Document, "document"),
            (ListenerTarget::Element(outer), "outer"),
            (ListenerTarget::Element(inner), "inner"),
        ] {
            let log = Rc::clone(&log);
            doc.add_event_listener(
                target,
                EventKind::Click,
                Rc::new(move |_: &DomEvent| log.borrow_mut().push(label)),
            );
        }

        doc.click(inner);
        assert_eq!(*log.borrow(), vec!["inner", "outer", "document", "window"]);

        log.borrow_mut().clear();
        doc.add_event_listener(
            ListenerTarget::Element(outer),
            EventKind::Click,
            Rc::new(|e: &DomEvent| e.stop_propagation()),
        );
        doc.click(inner);
        assert_eq!(*log.borrow(), vec!["inner", "outer"]);
    }

    #[test]
    fn test_non_bubbling_events_stay_on_target() {
        let doc = MemoryDocument::new();
        let img = doc.append(doc.body(), "img", &[]);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        doc.add_event_listener(
            ListenerTarget::Document,
            EventKind::Error,
            Rc::new(move |_: &DomEvent| h.set(h.get() + 1)),
        );
        doc.fire(EventKind::Error, img);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_listener_may_reenter_document() {
        let doc = Rc::new(MemoryDocument::new());
        let button = doc.append(doc.body(), "button", &[]);
        let weak = Rc::downgrade(&doc);
        doc.add_event_listener(
            ListenerTarget::Element(button),
            EventKind::Click,
            Rc::new(move |e: &DomEvent| {
                if let Some(doc) = weak.upgrade() {
                    doc.add_class(button, "clicked");
                    doc.add_event_listener(ListenerTarget::Window, EventKind::Resize, Rc::new(|_: &DomEvent| {}));
                    e.prevent_default();
                }
            }),
        );
        let event = doc.click(button);
        assert!(event.default_prevented());
        assert!(doc.has_class(button, "clicked"));
        assert_eq!(doc.listener_count(), 2);
    }

    #[test]
    fn test_remove_listener() {
        let doc = MemoryDocument::new();
        let id = doc.add_event_listener(ListenerTarget::Window, EventKind::Resize, Rc::new(|_: &DomEvent| {}));
        assert!(doc.remove_event_listener(id));
        assert!(!doc.remove_event_listener(id));
        assert_eq!(doc.listener_count(), 0);
    }

    #[test]
    fn test_listener_removed_mid_dispatch_is_skipped() {
        let doc = Rc::new(MemoryDocument::new());
        let button = doc.append(doc.body(), "button", &[]);
        let log = Rc::new(RefCell::new(Vec::new()));
        let doomed: Rc<RefCell<Vec<ListenerId>>> = Rc::new(RefCell::new(Vec::new()));

        let weak = Rc::downgrade(&doc);
        let (l, d) = (Rc::clone(&log), Rc::clone(&doomed));
        doc.add_event_listener(
            ListenerTarget::Element(button),
            EventKind::Click,
            Rc::new(move |_: &DomEvent| {
                l.borrow_mut().push("first");
                if let Some(doc) = weak.upgrade() {
                    for id in d.borrow().iter() {
                        doc.remove_event_listener(*id);
                    }
                }
            }),
        );
        for (target, label) in [
            (ListenerTarget::Element(button), "second"),
            (ListenerTarget::Document, "document"),
        ] {
            let l = Rc::clone(&log);
            let id = doc.add_event_listener(
                target,
                EventKind::Click,
                Rc::new(move |_: &DomEvent| l.borrow_mut().push(label)),
            );
            doomed.borrow_mut().push(id);
        }

        doc.click(button);
        assert_eq!(*log.borrow(), vec!["first"]);
        assert_eq!(doc.listener_count(), 1);
    }

    #[test]
    fn test_focus_requires_connection() {
        let doc = MemoryDocument::new();
        let detached = doc.create_element("button");
        doc.focus(detached);
        assert_eq!(doc.active_element(), None);

        let attached = doc.append(doc.body(), "button", &[]);
        doc.focus(attached);
        assert_eq!(doc.active_element(), Some(attached));
        doc.remove_element(attached);
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn test_element_by_id_and_append_value() {
        let doc = MemoryDocument::new();
        let input = doc.append(doc.body(), "input", &[("id", "email"), ("value", "a@b.c")]);
        assert_eq!(doc.element_by_id("email"), Some(input));
        assert_eq!(doc.value(input), "a@b.c");
        assert_eq!(doc.element_by_id("missing"), None);
    }
}
