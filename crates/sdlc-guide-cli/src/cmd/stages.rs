use crate::output::{print_json, print_table};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let (_, catalog) = super::load_project(root)?;
    let summaries = catalog.summaries();

    if json {
        return print_json(&summaries);
    }

    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| {
            vec![
                s.key.to_string(),
                s.title.clone(),
                s.prompt_count.to_string(),
                if s.has_framework { "yes" } else { "-" }.to_string(),
            ]
        })
        .collect();
    print_table(&["KEY", "TITLE", "PROMPTS", "FRAMEWORK"], &rows);
    Ok(())
}
