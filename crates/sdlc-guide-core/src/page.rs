//! Prerendered guide page.
//!
//! Builds the page skeleton as a headless [`Document`], lets the view
//! synchronizer run its load pass over it, and serializes the result. The
//! output is a self-contained HTML page with every section populated and the
//! default stage highlighted.

use crate::catalog::StageCatalog;
use crate::config::Config;
use crate::document::{Document, NodeId};
use crate::dom::Dom;
use crate::sync::{ViewSynchronizer, CONTENT_CLASS, OVERVIEW_CLASS, SIDEBAR_CLASS, STAGE_ATTR};
use crate::types::{NavTarget, OVERVIEW_KEY};

const OVERVIEW_ID: &str = "overview";
const OVERVIEW_BLURB: &str = "Prompt templates, a five-step prompting framework and \
    best practices for each stage of the software development lifecycle.";

/// Empty page markup for `catalog`: the sidebar, the overview with one card
/// per stage, and one unpopulated section per stage.
pub fn build_skeleton(catalog: &StageCatalog, config: &Config) -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    let html = doc.append(root, "html");
    doc.set_attr(html, "lang", "en");

    let head = doc.append(html, "head");
    let charset = doc.append(head, "meta");
    doc.set_attr(charset, "charset", "utf-8");
    let viewport = doc.append(head, "meta");
    doc.set_attr(viewport, "name", "viewport");
    doc.set_attr(viewport, "content", "width=device-width, initial-scale=1");
    let title = doc.append(head, "title");
    doc.set_text(title, &config.page.title);
    let css = doc.append(head, "link");
    doc.set_attr(css, "rel", "stylesheet");
    doc.set_attr(css, "href", &config.page.stylesheet);
    if !config.page.script.is_empty() {
        append_script(&mut doc, head, config);
    }

    let body = doc.append(html, "body");
    let layout = doc.append_with_class(body, "div", "layout");

    // Sidebar
    let nav = doc.append_with_class(layout, "nav", SIDEBAR_CLASS);
    let brand = doc.append_with_class(nav, "h1", "sidebar-title");
    doc.set_text(brand, &config.page.title);
    doc.append_with_class(nav, "div", "scroll-progress");
    let list = doc.append(nav, "ul");
    let targets = std::iter::once(NavTarget::Overview).chain(catalog.keys().map(NavTarget::Stage));
    for target in targets {
        let li = doc.append(list, "li");
        doc.set_attr(li, STAGE_ATTR, target.key());
        let link = doc.append(li, "a");
        match target {
            NavTarget::Overview => {
                doc.set_attr(link, "href", &format!("#{OVERVIEW_ID}"));
                doc.set_text(link, OVERVIEW_KEY);
            }
            NavTarget::Stage(key) => {
                doc.set_attr(link, "href", &format!("#{}", key.section_id()));
                let label = catalog.get(key).map(|s| s.display_title()).unwrap_or(key.as_str());
                doc.set_text(link, label);
            }
        }
    }

    // Content pane
    let main = doc.append_with_class(layout, "main", CONTENT_CLASS);

    let overview = doc.append_with_class(main, "section", OVERVIEW_CLASS);
    doc.set_id(overview, OVERVIEW_ID);
    let heading = doc.append(overview, "h2");
    doc.set_text(heading, &config.page.title);
    let blurb = doc.append(overview, "p");
    doc.set_text(blurb, OVERVIEW_BLURB);
    let grid = doc.append_with_class(overview, "div", "stage-grid");
    for stage in catalog.iter() {
        let card = doc.append_with_class(grid, "a", "stage-card");
        doc.set_attr(card, STAGE_ATTR, stage.key.as_str());
        doc.set_attr(card, "href", &format!("#{}", stage.key.section_id()));
        let h3 = doc.append(card, "h3");
        doc.set_text(h3, stage.display_title());
        let p = doc.append(card, "p");
        doc.set_text(p, &stage.description);
    }

    for stage in catalog.iter() {
        let section = doc.append_with_class(main, "section", "stage-section");
        doc.set_id(section, &stage.key.section_id());
        doc.append(section, "h2");
        doc.append(section, "p");
        let prompt_box = doc.append_with_class(section, "div", "prompt-box");
        doc.append_with_class(prompt_box, "div", "prompt-title");
        doc.append(prompt_box, "pre");
        if !stage.best_practices.is_empty() {
            let practices = doc.append_with_class(section, "div", "best-practices");
            let h3 = doc.append(practices, "h3");
            doc.set_text(h3, "Best Practices");
            let ul = doc.append(practices, "ul");
            for practice in &stage.best_practices {
                let li = doc.append(ul, "li");
                doc.set_text(li, practice);
            }
        }
        doc.append_with_class(section, "div", "stage-content");
    }

    doc
}

/// The browser script reads the sync settings from its own data attributes.
fn append_script(doc: &mut Document, head: NodeId, config: &Config) {
    let sync = &config.sync;
    let script = doc.append(head, "script");
    doc.set_attr(script, "src", &config.page.script);
    doc.set_attr(script, "defer", "");
    doc.set_attr(script, "data-active-class", &sync.active_class);
    doc.set_attr(script, "data-progress-property", &sync.progress_property);
    doc.set_attr(script, "data-visibility-floor", &sync.visibility_floor.to_string());
    doc.set_attr(script, "data-intersection-ratio", &sync.intersection_ratio.to_string());
    doc.set_attr(script, "data-scroll-throttle-ms", &sync.scroll_throttle_ms.to_string());
}

/// Render the complete page as HTML.
pub fn render_page(catalog: &StageCatalog, config: &Config) -> String {
    let skeleton = build_skeleton(catalog, config);
    let mut sync = ViewSynchronizer::new(catalog, skeleton, config);
    sync.on_load();
    let doc = sync.into_dom();
    tracing::debug!(stages = catalog.len(), "rendered guide page");
    format!("<!DOCTYPE html>\n{}\n", doc.to_html())
}
