//! Minimal DOM surface consumed by the view synchronizer.
//!
//! The synchronizer never touches a concrete document; it works through
//! [`Dom`] so the same logic runs against the headless
//! [`Document`](crate::document::Document) in tests and in the page renderer.

use crate::visibility::Rect;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// Scroll geometry of a scrollable element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Normalized scroll position: 0.0 at the top, 1.0 at the bottom, and
    /// 0.0 for content that does not scroll.
    pub fn progress(&self) -> f64 {
        let range = self.scroll_height - self.client_height;
        if range <= 0.0 {
            return 0.0;
        }
        (self.scroll_top / range).clamp(0.0, 1.0)
    }
}

/// The handful of selector shapes the synchronizer needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector<'a> {
    Id(&'a str),
    IdPrefix(&'a str),
    Class(&'a str),
    Tag(&'a str),
    Attr(&'a str),
    AttrEq(&'a str, &'a str),
    /// Matches when every inner selector matches.
    All(Vec<Selector<'a>>),
    /// Matches when any inner selector matches.
    Any(Vec<Selector<'a>>),
}

pub trait Dom {
    type Node: Copy + Eq + fmt::Debug;

    /// Descendants of `scope` (the whole document when `None`) matching
    /// `selector`, in document order.
    fn query_all(&self, scope: Option<Self::Node>, selector: &Selector<'_>) -> Vec<Self::Node>;

    fn query(&self, scope: Option<Self::Node>, selector: &Selector<'_>) -> Option<Self::Node> {
        self.query_all(scope, selector).into_iter().next()
    }

    fn id(&self, node: Self::Node) -> Option<String>;

    fn attr(&self, node: Self::Node, name: &str) -> Option<String>;

    fn set_text(&mut self, node: Self::Node, text: &str);

    fn set_html(&mut self, node: Self::Node, html: &str);

    fn add_class(&mut self, node: Self::Node, class: &str);

    fn remove_class(&mut self, node: Self::Node, class: &str);

    fn has_class(&self, node: Self::Node, class: &str) -> bool;

    fn set_style_property(&mut self, node: Self::Node, name: &str, value: &str);

    fn bounding_rect(&self, node: Self::Node) -> Rect;

    fn viewport_height(&self) -> f64;

    fn scroll_metrics(&self, node: Self::Node) -> ScrollMetrics;

    fn scroll_into_view(&mut self, node: Self::Node, behavior: ScrollBehavior);
}
