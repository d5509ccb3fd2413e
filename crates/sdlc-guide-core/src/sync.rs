//! View synchronizer: binds the stage table to the page and keeps the
//! sidebar's active item in step with clicks and scrolling.
//!
//! Every handler is a defensive no-op when the markup it expects is missing;
//! partial pages are normal, not errors.

use crate::active::ActiveStageStore;
use crate::catalog::{Stage, StageCatalog};
use crate::config::{Config, SyncConfig};
use crate::dom::{Dom, ScrollBehavior, Selector};
use crate::render::{self, PROMPT_BOX_TITLE};
use crate::throttle::ScrollThrottle;
use crate::types::{NavTarget, StageKey, SECTION_ID_PREFIX};
use std::time::Instant;

pub const SIDEBAR_CLASS: &str = "sidebar";
pub const CONTENT_CLASS: &str = "content";
pub const OVERVIEW_CLASS: &str = "overview-section";
pub const STAGE_ATTR: &str = "data-stage";

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Events a hosting environment forwards to [`ViewSynchronizer::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Load,
    SidebarClick(String),
    StageCardClick(String),
    Scroll(Instant),
    Resize(Instant),
    Intersection(Vec<IntersectionEntry>),
    /// Quiet period after scrolling; delivers a throttled trailing refresh.
    Idle(Instant),
}

/// Result of visibility detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleSection<N> {
    pub node: N,
    /// `None` when the section id names no known stage.
    pub target: Option<NavTarget>,
    pub fraction: f64,
}

// ---------------------------------------------------------------------------
// ViewSynchronizer
// ---------------------------------------------------------------------------

pub struct ViewSynchronizer<'a, D: Dom> {
    catalog: &'a StageCatalog,
    dom: D,
    settings: SyncConfig,
    default_stage: StageKey,
    active: ActiveStageStore,
    throttle: ScrollThrottle,
}

impl<'a, D: Dom> ViewSynchronizer<'a, D> {
    pub fn new(catalog: &'a StageCatalog, dom: D, config: &Config) -> Self {
        Self {
            catalog,
            dom,
            settings: config.sync.clone(),
            default_stage: config.page.default_stage,
            active: ActiveStageStore::new(),
            throttle: ScrollThrottle::from_millis(config.sync.scroll_throttle_ms),
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn into_dom(self) -> D {
        self.dom
    }

    pub fn active(&self) -> Option<NavTarget> {
        self.active.get()
    }

    pub fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::Load => self.on_load(),
            UiEvent::SidebarClick(key) => self.on_sidebar_item_click(&key),
            UiEvent::StageCardClick(key) => self.on_stage_card_click(&key),
            UiEvent::Scroll(now) | UiEvent::Resize(now) => self.on_scroll(now),
            UiEvent::Intersection(entries) => self.on_intersection(&entries),
            UiEvent::Idle(now) => self.on_idle(now),
        }
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    fn sidebar(&self) -> Option<D::Node> {
        self.dom.query(None, &Selector::Class(SIDEBAR_CLASS))
    }

    fn sidebar_items(&self) -> Vec<D::Node> {
        let Some(sidebar) = self.sidebar() else {
            return Vec::new();
        };
        self.dom.query_all(
            Some(sidebar),
            &Selector::All(vec![Selector::Tag("li"), Selector::Attr(STAGE_ATTR)]),
        )
    }

    fn sidebar_item(&self, key: &str) -> Option<D::Node> {
        let sidebar = self.sidebar()?;
        self.dom.query(
            Some(sidebar),
            &Selector::All(vec![Selector::Tag("li"), Selector::AttrEq(STAGE_ATTR, key)]),
        )
    }

    fn section(&self, key: StageKey) -> Option<D::Node> {
        self.dom.query(None, &Selector::Id(&key.section_id()))
    }

    fn overview_section(&self) -> Option<D::Node> {
        self.dom.query(None, &Selector::Class(OVERVIEW_CLASS))
    }

    // -----------------------------------------------------------------------
    // Population
    // -----------------------------------------------------------------------

    fn populate_section(&mut self, section: D::Node, stage: &Stage) {
        if let Some(heading) = self.dom.query(Some(section), &Selector::Tag("h2")) {
            self.dom.set_text(heading, stage.display_title());
        }
        if let Some(desc) = self.dom.query(Some(section), &Selector::Tag("p")) {
            self.dom.set_text(desc, &stage.description);
        }
        if let Some(prompt_box) = self.dom.query(Some(section), &Selector::Class("prompt-box")) {
            if let Some(title) = self.dom.query(Some(prompt_box), &Selector::Class("prompt-title")) {
                self.dom.set_text(title, PROMPT_BOX_TITLE);
            }
            if let Some(pre) = self.dom.query(Some(prompt_box), &Selector::Tag("pre")) {
                self.dom.set_text(pre, stage.first_prompt());
            }
        }
        if let Some(content) = self.dom.query(Some(section), &Selector::Class("stage-content")) {
            self.dom.set_html(content, &render::combined_content(stage));
        }
    }

    /// Fill every stage section present on the page. Idempotent.
    pub fn populate_all(&mut self) {
        let catalog = self.catalog;
        for stage in catalog.iter() {
            match self.section(stage.key) {
                Some(section) => self.populate_section(section, stage),
                None => tracing::debug!(stage = %stage.key, "no section on page, skipping"),
            }
        }
    }

    // -----------------------------------------------------------------------
    // Activation
    // -----------------------------------------------------------------------

    /// The single setter for active state: records `target` and re-projects
    /// the active class onto the sidebar.
    fn set_active(&mut self, target: NavTarget) {
        if self.active.set(target) {
            tracing::debug!(%target, "active stage changed");
        }
        let class = self.settings.active_class.clone();
        for item in self.sidebar_items() {
            let on = self.dom.attr(item, STAGE_ATTR).as_deref() == Some(target.key());
            if on {
                self.dom.add_class(item, &class);
            } else {
                self.dom.remove_class(item, &class);
            }
        }
    }

    /// Show `key`'s section: refresh its content, scroll to it and mark it
    /// active. Unknown keys and missing sections change nothing.
    pub fn activate(&mut self, key: &str) {
        let Some(target) = NavTarget::parse(key) else {
            tracing::debug!(key, "unknown stage key, ignoring");
            return;
        };

        match target {
            NavTarget::Overview => {
                let Some(section) = self.overview_section() else {
                    tracing::debug!("no overview section on page");
                    return;
                };
                self.dom.scroll_into_view(section, ScrollBehavior::Smooth);
            }
            NavTarget::Stage(stage_key) => {
                let catalog = self.catalog;
                let Some(stage) = catalog.get(stage_key) else {
                    tracing::debug!(key, "stage not in table, ignoring");
                    return;
                };
                let Some(section) = self.section(stage_key) else {
                    tracing::debug!(key, "no section on page, ignoring");
                    return;
                };
                self.populate_section(section, stage);
                self.dom.scroll_into_view(section, ScrollBehavior::Smooth);
            }
        }

        self.set_active(target);
    }

    pub fn on_sidebar_item_click(&mut self, key: &str) {
        self.activate(key);
    }

    /// Stage cards act through the sidebar entry with the same key.
    pub fn on_stage_card_click(&mut self, key: &str) {
        if self.sidebar_item(key).is_none() {
            tracing::debug!(key, "stage card has no sidebar entry");
            return;
        }
        self.on_sidebar_item_click(key);
    }

    // -----------------------------------------------------------------------
    // Scroll tracking
    // -----------------------------------------------------------------------

    /// The tracked section with the largest visible fraction, if it clears
    /// the visibility floor.
    pub fn compute_most_visible_section(&self) -> Option<VisibleSection<D::Node>> {
        let viewport = self.dom.viewport_height();
        let tracked = self.dom.query_all(
            None,
            &Selector::Any(vec![
                Selector::IdPrefix(SECTION_ID_PREFIX),
                Selector::Class(OVERVIEW_CLASS),
            ]),
        );
        let candidates = tracked.into_iter().filter_map(|node| {
            crate::visibility::visible_fraction(self.dom.bounding_rect(node), viewport)
                .map(|fraction| (node, fraction))
        });
        let (node, fraction) =
            crate::visibility::most_visible(candidates, self.settings.visibility_floor)?;
        Some(VisibleSection {
            node,
            target: NavTarget::from_section_id(self.dom.id(node).as_deref()),
            fraction,
        })
    }

    fn refresh_active_from_scroll(&mut self) {
        let Some(visible) = self.compute_most_visible_section() else {
            return;
        };
        match visible.target {
            Some(target) => self.set_active(target),
            None => tracing::debug!(node = ?visible.node, "visible section names no stage"),
        }
    }

    /// Write the progress property; false when there is no content pane.
    fn write_scroll_progress(&mut self) -> bool {
        let Some(content) = self.dom.query(None, &Selector::Class(CONTENT_CLASS)) else {
            return false;
        };
        let progress = self.dom.scroll_metrics(content).progress();
        if let Some(sidebar) = self.sidebar() {
            let name = self.settings.progress_property.clone();
            self.dom.set_style_property(sidebar, &name, &progress.to_string());
        }
        true
    }

    /// Publish the content pane's scroll fraction on the sidebar, then move
    /// the active item to the most visible section.
    pub fn update_scroll_progress(&mut self) {
        if self.write_scroll_progress() {
            self.refresh_active_from_scroll();
        }
    }

    // -----------------------------------------------------------------------
    // Event entry points
    // -----------------------------------------------------------------------

    /// Initial render: populate, highlight the default stage, seed progress.
    /// Visibility detection waits for the first scroll so the default holds.
    pub fn on_load(&mut self) {
        self.populate_all();
        self.set_active(NavTarget::Stage(self.default_stage));
        self.write_scroll_progress();
    }

    pub fn on_scroll(&mut self, now: Instant) {
        if self.throttle.hit(now) {
            self.update_scroll_progress();
        }
    }

    pub fn on_idle(&mut self, now: Instant) {
        if self.throttle.flush(now) {
            self.update_scroll_progress();
        }
    }

    pub fn on_intersection(&mut self, entries: &[IntersectionEntry]) {
        let threshold = self.settings.intersection_ratio;
        if entries
            .iter()
            .any(|e| e.is_intersecting && e.ratio > threshold)
        {
            self.update_scroll_progress();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Framework;
    use crate::document::{Document, NodeId};
    use crate::dom::ScrollMetrics;
    use crate::types::OVERVIEW_KEY;
    use crate::visibility::Rect;
    use std::time::Duration;

    fn stage(key: StageKey, title: &str) -> Stage {
        Stage {
            key,
            title: title.into(),
            description: format!("{key} description"),
            prompts: vec![format!("{key} prompt one"), format!("{key} prompt two")],
            best_practices: vec!["be specific".into()],
            framework: None,
            content: None,
        }
    }

    fn two_stage_catalog() -> StageCatalog {
        [
            stage(StageKey::Requirements, "Requirements Gathering"),
            stage(StageKey::Design, "System Design"),
        ]
        .into_iter()
        .collect()
    }

    /// Sidebar with Overview + the given keys, an overview section and a
    /// fully-formed section per key.
    fn page(keys: &[&str]) -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let nav = doc.append_with_class(root, "nav", SIDEBAR_CLASS);
        let ul = doc.append(nav, "ul");
        for key in std::iter::once(&OVERVIEW_KEY).chain(keys) {
            let li = doc.append(ul, "li");
            doc.set_attr(li, STAGE_ATTR, key);
        }
        let main = doc.append_with_class(root, "main", CONTENT_CLASS);
        let overview = doc.append_with_class(main, "section", OVERVIEW_CLASS);
        doc.set_id(overview, "overview");
        for key in keys {
            let card = doc.append_with_class(overview, "div", "stage-card");
            doc.set_attr(card, STAGE_ATTR, key);
        }
        for key in keys {
            let section = doc.append(main, "section");
            doc.set_id(section, &format!("section-{key}"));
            doc.append(section, "h2");
            doc.append(section, "p");
            let prompt_box = doc.append_with_class(section, "div", "prompt-box");
            doc.append_with_class(prompt_box, "div", "prompt-title");
            doc.append(prompt_box, "pre");
            doc.append_with_class(section, "div", "stage-content");
        }
        doc
    }

    fn section(doc: &Document, key: &str) -> NodeId {
        doc.query(None, &Selector::Id(&format!("section-{key}")))
            .unwrap()
    }

    fn heading(doc: &Document, key: &str) -> String {
        let s = section(doc, key);
        doc.text(doc.query(Some(s), &Selector::Tag("h2")).unwrap())
    }

    fn active_items(doc: &Document) -> Vec<String> {
        doc.query_all(None, &Selector::Attr(STAGE_ATTR))
            .into_iter()
            .filter(|n| doc.tag(*n) == "li" && doc.has_class(*n, "active"))
            .filter_map(|n| doc.attr(n, STAGE_ATTR))
            .collect()
    }

    // -- populate_all -------------------------------------------------------

    #[test]
    fn populate_all_sets_heading_description_and_prompt() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let mut sync = ViewSynchronizer::new(&catalog, page(&["Requirements", "Design"]), &config);
        sync.populate_all();
        let doc = sync.into_dom();

        assert_eq!(heading(&doc, "Requirements"), "Requirements Gathering");
        assert_eq!(heading(&doc, "Design"), "System Design");

        let design = section(&doc, "Design");
        let p = doc.query(Some(design), &Selector::Tag("p")).unwrap();
        assert_eq!(doc.text(p), "Design description");
        let title = doc.query(Some(design), &Selector::Class("prompt-title")).unwrap();
        assert_eq!(doc.text(title), "Prompt Templates");
        let pre = doc.query(Some(design), &Selector::Tag("pre")).unwrap();
        assert_eq!(doc.text(pre), "Design prompt one");
    }

    #[test]
    fn populate_all_heading_falls_back_to_key() {
        let catalog: StageCatalog = [stage(StageKey::Testing, "")].into_iter().collect();
        let config = Config::default();
        let mut sync = ViewSynchronizer::new(&catalog, page(&["Testing"]), &config);
        sync.populate_all();
        assert_eq!(heading(sync.dom(), "Testing"), "Testing");
    }

    #[test]
    fn populate_all_writes_rich_content() {
        let mut s = stage(StageKey::Design, "System Design");
        s.framework = Some(Framework {
            task: Some("design it".into()),
            ..Framework::default()
        });
        s.content = Some("<p>see also ADRs</p>".into());
        let catalog: StageCatalog = [s].into_iter().collect();
        let config = Config::default();
        let mut sync = ViewSynchronizer::new(&catalog, page(&["Design"]), &config);
        sync.populate_all();
        let doc = sync.into_dom();
        let design = section(&doc, "Design");
        let content = doc.query(Some(design), &Selector::Class("stage-content")).unwrap();
        let html = doc.inner_html(content);
        assert!(html.contains("framework-container"));
        assert!(html.ends_with("<p>see also ADRs</p>"));
    }

    #[test]
    fn populate_all_skips_missing_sections() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let mut sync = ViewSynchronizer::new(&catalog, page(&["Design"]), &config);
        sync.populate_all();
        assert_eq!(heading(sync.dom(), "Design"), "System Design");
    }

    #[test]
    fn populate_all_tolerates_partial_sections() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let mut doc = Document::new();
        let root = doc.root();
        let bare = doc.append(root, "section");
        doc.set_id(bare, "section-Requirements");
        let with_heading = doc.append(root, "section");
        doc.set_id(with_heading, "section-Design");
        doc.append(with_heading, "h2");

        let mut sync = ViewSynchronizer::new(&catalog, doc, &config);
        sync.populate_all();
        let doc = sync.into_dom();
        assert_eq!(doc.text(section(&doc, "Requirements")), "");
        assert_eq!(heading(&doc, "Design"), "System Design");
    }

    #[test]
    fn populate_all_is_idempotent() {
        let catalog = StageCatalog::builtin().unwrap();
        let config = Config::default();
        let keys: Vec<&str> = StageKey::all().iter().map(|k| k.as_str()).collect();

        let mut once = ViewSynchronizer::new(&catalog, page(&keys), &config);
        once.populate_all();
        let mut twice = ViewSynchronizer::new(&catalog, page(&keys), &config);
        twice.populate_all();
        twice.populate_all();

        assert_eq!(once.into_dom(), twice.into_dom());
    }

    // -- activate -----------------------------------------------------------

    #[test]
    fn activate_marks_exactly_one_item() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let mut sync = ViewSynchronizer::new(&catalog, page(&["Requirements", "Design"]), &config);
        sync.activate("Design");
        sync.activate("Requirements");
        assert_eq!(active_items(sync.dom()), vec!["Requirements".to_string()]);
        assert_eq!(
            sync.active(),
            Some(NavTarget::Stage(StageKey::Requirements))
        );
    }

    #[test]
    fn activate_scrolls_target_into_view() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let mut sync = ViewSynchronizer::new(&catalog, page(&["Requirements", "Design"]), &config);
        sync.activate("Design");
        let doc = sync.into_dom();
        assert_eq!(
            doc.scroll_requests(),
            &[(section(&doc, "Design"), ScrollBehavior::Smooth)]
        );
        assert_eq!(heading(&doc, "Design"), "System Design");
    }

    #[test]
    fn activate_unknown_key_changes_nothing() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let before = page(&["Requirements", "Design"]);
        let mut sync = ViewSynchronizer::new(&catalog, before.clone(), &config);
        sync.activate("Retrospective");
        assert_eq!(sync.active(), None);
        assert_eq!(sync.into_dom(), before);
    }

    #[test]
    fn activate_stage_missing_from_table_changes_nothing() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let before = page(&["Requirements", "Design", "Testing"]);
        let mut sync = ViewSynchronizer::new(&catalog, before.clone(), &config);
        sync.activate("Testing");
        assert_eq!(sync.into_dom(), before);
    }

    #[test]
    fn activate_missing_section_changes_nothing() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let before = page(&["Requirements"]);
        let mut sync = ViewSynchronizer::new(&catalog, before.clone(), &config);
        sync.activate("Design");
        assert_eq!(sync.active(), None);
        assert_eq!(sync.into_dom(), before);
    }

    #[test]
    fn activate_overview_only_scrolls() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let mut sync = ViewSynchronizer::new(&catalog, page(&["Requirements", "Design"]), &config);
        sync.activate("Overview");
        let doc = sync.into_dom();
        let overview = doc.query(None, &Selector::Class(OVERVIEW_CLASS)).unwrap();
        assert_eq!(doc.last_scrolled(), Some(overview));
        assert_eq!(active_items(&doc), vec!["Overview".to_string()]);
        assert_eq!(heading(&doc, "Requirements"), "");
    }

    // -- clicks ---------------------------------------------------------------

    #[test]
    fn card_click_matches_sidebar_click() {
        let catalog = two_stage_catalog();
        let config = Config::default();

        let mut by_sidebar =
            ViewSynchronizer::new(&catalog, page(&["Requirements", "Design"]), &config);
        by_sidebar.on_load();
        by_sidebar.on_sidebar_item_click("Design");

        let mut by_card =
            ViewSynchronizer::new(&catalog, page(&["Requirements", "Design"]), &config);
        by_card.on_load();
        by_card.on_stage_card_click("Design");

        assert_eq!(by_sidebar.active(), by_card.active());
        assert_eq!(by_sidebar.into_dom(), by_card.into_dom());
    }

    #[test]
    fn card_click_without_sidebar_entry_is_noop() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let mut doc = page(&["Requirements", "Design"]);
        let sidebar = doc.query(None, &Selector::Class(SIDEBAR_CLASS)).unwrap();
        let design_li = doc
            .query(Some(sidebar), &Selector::AttrEq(STAGE_ATTR, "Design"))
            .unwrap();
        doc.set_attr(design_li, STAGE_ATTR, "Elsewhere");
        let before = doc.clone();

        let mut sync = ViewSynchronizer::new(&catalog, doc, &config);
        sync.on_stage_card_click("Design");
        assert_eq!(sync.into_dom(), before);
    }

    #[test]
    fn load_then_click_scenario() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let mut sync = ViewSynchronizer::new(&catalog, page(&["Requirements", "Design"]), &config);

        sync.dispatch(UiEvent::Load);
        assert_eq!(active_items(sync.dom()), vec!["Requirements".to_string()]);
        assert_eq!(heading(sync.dom(), "Requirements"), "Requirements Gathering");
        assert!(sync.dom().scroll_requests().is_empty());

        sync.dispatch(UiEvent::SidebarClick("Design".into()));
        let doc = sync.into_dom();
        assert_eq!(active_items(&doc), vec!["Design".to_string()]);
        assert_eq!(doc.last_scrolled(), Some(section(&doc, "Design")));
    }

    #[test]
    fn load_honours_configured_default_stage() {
        let catalog = two_stage_catalog();
        let mut config = Config::default();
        config.page.default_stage = StageKey::Design;
        let mut sync = ViewSynchronizer::new(&catalog, page(&["Requirements", "Design"]), &config);
        sync.on_load();
        assert_eq!(active_items(sync.dom()), vec!["Design".to_string()]);
    }

    #[test]
    fn custom_active_class() {
        let catalog = two_stage_catalog();
        let mut config = Config::default();
        config.sync.active_class = "is-current".into();
        let mut sync = ViewSynchronizer::new(&catalog, page(&["Requirements", "Design"]), &config);
        sync.activate("Design");
        let doc = sync.into_dom();
        let sidebar = doc.query(None, &Selector::Class(SIDEBAR_CLASS)).unwrap();
        let li = doc
            .query(Some(sidebar), &Selector::AttrEq(STAGE_ATTR, "Design"))
            .unwrap();
        assert!(doc.has_class(li, "is-current"));
        assert!(!doc.has_class(li, "active"));
    }

    // -- visibility ---------------------------------------------------------

    /// Lay out overview, Requirements and Design stacked at `offset` px of
    /// scroll in an 800px viewport; each block is 600px tall.
    fn laid_out(offset: f64) -> Document {
        let mut doc = page(&["Requirements", "Design"]);
        doc.set_viewport_height(800.0);
        let overview = doc.query(None, &Selector::Class(OVERVIEW_CLASS)).unwrap();
        doc.set_rect(overview, Rect::new(-offset, 600.0));
        let req = section(&doc, "Requirements");
        doc.set_rect(req, Rect::new(600.0 - offset, 600.0));
        let design = section(&doc, "Design");
        doc.set_rect(design, Rect::new(1200.0 - offset, 600.0));
        let content = doc.query(None, &Selector::Class(CONTENT_CLASS)).unwrap();
        doc.set_scroll_metrics(
            content,
            ScrollMetrics {
                scroll_top: offset,
                scroll_height: 1800.0,
                client_height: 800.0,
            },
        );
        doc
    }

    #[test]
    fn most_visible_section_at_top_is_overview() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let sync = ViewSynchronizer::new(&catalog, laid_out(0.0), &config);
        let visible = sync.compute_most_visible_section().unwrap();
        assert_eq!(visible.target, Some(NavTarget::Overview));
        assert_eq!(visible.fraction, 1.0);
    }

    #[test]
    fn most_visible_section_follows_scroll() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let sync = ViewSynchronizer::new(&catalog, laid_out(1000.0), &config);
        let visible = sync.compute_most_visible_section().unwrap();
        assert_eq!(visible.target, Some(NavTarget::Stage(StageKey::Design)));
    }

    #[test]
    fn most_visible_tie_goes_to_document_order() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        // Requirements spans -200..400 and Design 400..1000: both show 400px.
        let sync = ViewSynchronizer::new(&catalog, laid_out(800.0), &config);
        let visible = sync.compute_most_visible_section().unwrap();
        assert_eq!(visible.fraction, 400.0 / 600.0);
        assert_eq!(
            visible.target,
            Some(NavTarget::Stage(StageKey::Requirements))
        );
    }

    #[test]
    fn most_visible_none_below_floor() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let mut doc = page(&["Requirements", "Design"]);
        doc.set_viewport_height(50.0);
        for n in doc.query_all(
            None,
            &Selector::Any(vec![
                Selector::IdPrefix("section-"),
                Selector::Class(OVERVIEW_CLASS),
            ]),
        ) {
            // 50px of a 1000px section is 5% visible.
            doc.set_rect(n, Rect::new(0.0, 1000.0));
        }
        let sync = ViewSynchronizer::new(&catalog, doc, &config);
        assert!(sync.compute_most_visible_section().is_none());
    }

    #[test]
    fn most_visible_ignores_unlaid_sections() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let sync = ViewSynchronizer::new(&catalog, page(&["Requirements", "Design"]), &config);
        assert!(sync.compute_most_visible_section().is_none());
    }

    // -- scroll progress ----------------------------------------------------

    #[test]
    fn update_scroll_progress_writes_property_and_active() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let mut sync = ViewSynchronizer::new(&catalog, laid_out(1000.0), &config);
        sync.on_load();
        sync.update_scroll_progress();
        let doc = sync.into_dom();
        let sidebar = doc.query(None, &Selector::Class(SIDEBAR_CLASS)).unwrap();
        assert_eq!(doc.style_property(sidebar, "--scroll-progress"), Some("1"));
        assert_eq!(active_items(&doc), vec!["Design".to_string()]);
    }

    #[test]
    fn update_scroll_progress_midway() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let mut sync = ViewSynchronizer::new(&catalog, laid_out(500.0), &config);
        sync.update_scroll_progress();
        let doc = sync.into_dom();
        let sidebar = doc.query(None, &Selector::Class(SIDEBAR_CLASS)).unwrap();
        assert_eq!(doc.style_property(sidebar, "--scroll-progress"), Some("0.5"));
        assert_eq!(active_items(&doc), vec!["Requirements".to_string()]);
    }

    #[test]
    fn update_scroll_progress_without_content_pane_is_noop() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let mut doc = Document::new();
        let root = doc.root();
        let nav = doc.append_with_class(root, "nav", SIDEBAR_CLASS);
        let li = doc.append(nav, "li");
        doc.set_attr(li, STAGE_ATTR, "Requirements");
        let before = doc.clone();
        let mut sync = ViewSynchronizer::new(&catalog, doc, &config);
        sync.update_scroll_progress();
        assert_eq!(sync.into_dom(), before);
    }

    #[test]
    fn load_does_not_apply_visibility() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let mut sync = ViewSynchronizer::new(&catalog, laid_out(1000.0), &config);
        sync.on_load();
        assert_eq!(active_items(sync.dom()), vec!["Requirements".to_string()]);
    }

    #[test]
    fn intersection_above_ratio_refreshes() {
        let catalog = two_stage_catalog();
        let config = Config::default();
        let mut sync = ViewSynchronizer::new(&catalog, laid_out(1000.0), &config);
        sync.on_load();

        sync.on_intersection(&[IntersectionEntry {
            is_intersecting: true,
            ratio: 0.1,
        }]);
        assert_eq!(active_items(sync.dom()), vec!["Requirements".to_string()]);

        sync.on_intersection(&[
            IntersectionEntry {
                is_intersecting: false,
                ratio: 0.9,
            },
            IntersectionEntry {
                is_intersecting: true,
                ratio: 0.5,
            },
        ]);
        assert_eq!(active_items(sync.dom()), vec!["Design".to_string()]);
    }

    #[test]
    fn throttle_suppresses_then_flushes() {
        let catalog = two_stage_catalog();
        let mut config = Config::default();
        config.sync.scroll_throttle_ms = 100;
        let start = Instant::now();

        let mut sync = ViewSynchronizer::new(&catalog, laid_out(1000.0), &config);
        sync.on_load();
        sync.on_scroll(start);
        assert_eq!(sync.active(), Some(NavTarget::Stage(StageKey::Design)));

        sync.activate("Requirements");
        sync.on_scroll(start + Duration::from_millis(40));
        assert_eq!(
            sync.active(),
            Some(NavTarget::Stage(StageKey::Requirements)),
            "suppressed scroll must not refresh"
        );

        sync.on_idle(start + Duration::from_millis(60));
        assert_eq!(sync.active(), Some(NavTarget::Stage(StageKey::Requirements)));

        sync.on_idle(start + Duration::from_millis(150));
        assert_eq!(sync.active(), Some(NavTarget::Stage(StageKey::Design)));
    }

    #[test]
    fn dispatch_routes_resize_and_idle_through_throttle() {
        let catalog = two_stage_catalog();
        let mut config = Config::default();
        config.sync.scroll_throttle_ms = 100;
        let start = Instant::now();

        let mut sync = ViewSynchronizer::new(&catalog, laid_out(1000.0), &config);
        sync.dispatch(UiEvent::Load);
        sync.dispatch(UiEvent::Resize(start));
        assert_eq!(sync.active(), Some(NavTarget::Stage(StageKey::Design)));

        // Resize shares the scroll throttle: a second one inside the window
        // is held back until the idle flush.
        sync.activate("Requirements");
        sync.dispatch(UiEvent::Resize(start + Duration::from_millis(20)));
        assert_eq!(sync.active(), Some(NavTarget::Stage(StageKey::Requirements)));

        sync.dispatch(UiEvent::Idle(start + Duration::from_millis(120)));
        assert_eq!(sync.active(), Some(NavTarget::Stage(StageKey::Design)));
        let sidebar = sync.dom().query(None, &Selector::Class(SIDEBAR_CLASS)).unwrap();
        assert_eq!(sync.dom().style_property(sidebar, "--scroll-progress"), Some("1"));

        // Nothing pending: a later idle changes nothing.
        sync.activate("Requirements");
        sync.dispatch(UiEvent::Idle(start + Duration::from_millis(500)));
        assert_eq!(sync.active(), Some(NavTarget::Stage(StageKey::Requirements)));
    }
}
