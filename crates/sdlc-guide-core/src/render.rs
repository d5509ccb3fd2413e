use crate::catalog::{Framework, Stage};
use crate::document::Document;
use crate::dom::Dom;

pub const PROMPT_BOX_TITLE: &str = "Prompt Templates";
pub const FRAMEWORK_HEADING: &str = "5-Step Framework";

/// HTML block for a stage's five-step framework. Absent steps are skipped
/// but the remaining steps keep their position number.
pub fn framework_html(framework: &Framework) -> String {
    let mut doc = Document::new();
    let root = doc.root();
    let container = doc.append_with_class(root, "div", "framework-container");
    let heading = doc.append(container, "h3");
    doc.set_text(heading, FRAMEWORK_HEADING);

    for (index, (name, text)) in framework.steps().into_iter().enumerate() {
        let Some(text) = text else { continue };
        let step = doc.append_with_class(container, "div", "framework-step");
        let header = doc.append_with_class(step, "div", "step-header");
        let number = doc.append_with_class(header, "span", "step-number");
        doc.set_text(number, &(index + 1).to_string());
        let title = doc.append(header, "h4");
        doc.set_text(title, &name.to_uppercase());
        let body = doc.append_with_class(step, "div", "step-content");
        let pre = doc.append(body, "pre");
        doc.set_text(pre, text);
    }

    doc.to_html()
}

/// Rich content written into a section's `.stage-content`: the framework
/// block followed by the stage's own content. Empty when neither exists.
pub fn combined_content(stage: &Stage) -> String {
    let mut html = String::new();
    if let Some(framework) = &stage.framework {
        html.push_str(&framework_html(framework));
    }
    if let Some(content) = &stage.content {
        html.push_str(content);
    }
    html
}
