//! Headless in-memory document.
//!
//! An arena of elements with just enough state to back [`Dom`]: identity,
//! classes, attributes, style properties, text or raw-HTML children, layout
//! rects and scroll metrics. It also serializes to HTML, which is how the
//! page renderer produces its output.

use crate::dom::{Dom, ScrollBehavior, ScrollMetrics, Selector};
use crate::visibility::Rect;

const VOID_TAGS: &[&str] = &["meta", "link", "br", "hr", "img", "input"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
enum Child {
    Element(NodeId),
    Text(String),
    Html(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    style: Vec<(String, String)>,
    children: Vec<Child>,
    rect: Rect,
    scroll: ScrollMetrics,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            style: Vec::new(),
            children: Vec::new(),
            rect: Rect::default(),
            scroll: ScrollMetrics::default(),
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn matches(&self, selector: &Selector<'_>) -> bool {
        match selector {
            Selector::Id(id) => self.id.as_deref() == Some(*id),
            Selector::IdPrefix(prefix) => self
                .id
                .as_deref()
                .is_some_and(|id| id.starts_with(prefix)),
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Tag(tag) => self.tag == *tag,
            Selector::Attr(name) => self.attr(name).is_some(),
            Selector::AttrEq(name, value) => self.attr(name) == Some(*value),
            Selector::All(inner) => inner.iter().all(|s| self.matches(s)),
            Selector::Any(inner) => inner.iter().any(|s| self.matches(s)),
        }
    }
}

/// In-memory document. Two documents compare equal when their trees, layout
/// and recorded scroll requests are identical.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Element>,
    viewport_height: f64,
    scrolls: Vec<(NodeId, ScrollBehavior)>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document whose root is an unnamed fragment; only the root's
    /// children are serialized.
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("")],
            viewport_height: 0.0,
            scrolls: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::new(tag));
        self.nodes[parent.0].children.push(Child::Element(id));
        id
    }

    /// Append an element carrying `classes` (space separated).
    pub fn append_with_class(&mut self, parent: NodeId, tag: &str, classes: &str) -> NodeId {
        let node = self.append(parent, tag);
        for class in classes.split_whitespace() {
            self.add_class(node, class);
        }
        node
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        self.nodes[parent.0]
            .children
            .push(Child::Text(text.to_string()));
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.nodes[node.0].id = Some(id.to_string());
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let attrs = &mut self.nodes[node.0].attrs;
        match attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attrs.push((name.to_string(), value.to_string())),
        }
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.nodes[node.0].rect = rect;
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    pub fn set_scroll_metrics(&mut self, node: NodeId, metrics: ScrollMetrics) {
        self.nodes[node.0].scroll = metrics;
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    /// Concatenated text of `node` and its descendants. Raw HTML children are
    /// included verbatim.
    pub fn text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        for child in &self.nodes[node.0].children {
            match child {
                Child::Element(id) => self.collect_text(*id, out),
                Child::Text(t) | Child::Html(t) => out.push_str(t),
            }
        }
    }

    pub fn style_property(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0]
            .style
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Scroll-into-view requests in the order they were made.
    pub fn scroll_requests(&self) -> &[(NodeId, ScrollBehavior)] {
        &self.scrolls
    }

    pub fn last_scrolled(&self) -> Option<NodeId> {
        self.scrolls.last().map(|(n, _)| *n)
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in &self.nodes[node.0].children {
            self.write_child(child, &mut out);
        }
        out
    }

    pub fn to_html(&self) -> String {
        self.inner_html(self.root())
    }

    fn write_child(&self, child: &Child, out: &mut String) {
        match child {
            Child::Element(id) => self.write_element(*id, out),
            Child::Text(t) => out.push_str(&escape_text(t)),
            Child::Html(h) => out.push_str(h),
        }
    }

    fn write_element(&self, node: NodeId, out: &mut String) {
        let el = &self.nodes[node.0];
        out.push('<');
        out.push_str(&el.tag);
        if let Some(id) = &el.id {
            out.push_str(&format!(" id=\"{}\"", escape_attr(id)));
        }
        if !el.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape_attr(&el.classes.join(" "))));
        }
        for (k, v) in &el.attrs {
            out.push_str(&format!(" {k}=\"{}\"", escape_attr(v)));
        }
        if !el.style.is_empty() {
            let style: Vec<String> = el.style.iter().map(|(k, v)| format!("{k}: {v}")).collect();
            out.push_str(&format!(" style=\"{}\"", escape_attr(&style.join("; "))));
        }
        out.push('>');
        if VOID_TAGS.contains(&el.tag.as_str()) {
            return;
        }
        for child in &el.children {
            self.write_child(child, out);
        }
        out.push_str("</");
        out.push_str(&el.tag);
        out.push('>');
    }

    fn descendants(&self, node: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.nodes[node.0].children {
            if let Child::Element(id) = child {
                out.push(*id);
                self.descendants(*id, out);
            }
        }
    }
}

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

impl Dom for Document {
    type Node = NodeId;

    fn query_all(&self, scope: Option<NodeId>, selector: &Selector<'_>) -> Vec<NodeId> {
        let mut all = Vec::new();
        self.descendants(scope.unwrap_or(self.root()), &mut all);
        all.retain(|n| self.nodes[n.0].matches(selector));
        all
    }

    fn id(&self, node: NodeId) -> Option<String> {
        self.nodes[node.0].id.clone()
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes[node.0].attr(name).map(str::to_string)
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node.0].children = vec![Child::Text(text.to_string())];
    }

    fn set_html(&mut self, node: NodeId, html: &str) {
        self.nodes[node.0].children = vec![Child::Html(html.to_string())];
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        let classes = &mut self.nodes[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.retain(|c| c != class);
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    fn set_style_property(&mut self, node: NodeId, name: &str, value: &str) {
        let style = &mut self.nodes[node.0].style;
        match style.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => style.push((name.to_string(), value.to_string())),
        }
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        self.nodes[node.0].rect
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn scroll_metrics(&self, node: NodeId) -> ScrollMetrics {
        self.nodes[node.0].scroll
    }

    fn scroll_into_view(&mut self, node: NodeId, behavior: ScrollBehavior) {
        self.scrolls.push((node, behavior));
    }
}
