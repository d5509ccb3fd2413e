use anyhow::Context;
use sdlc_guide_core::{io, page};
use std::path::Path;

/// Render the guide page. Without `out` the HTML goes to stdout.
pub fn run(root: &Path, out: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let (config, catalog) = super::load_project(root)?;
    let html = page::render_page(&catalog, &config);

    let Some(out) = out else {
        print!("{html}");
        return Ok(());
    };

    let path = if out.is_absolute() {
        out.to_path_buf()
    } else {
        root.join(out)
    };
    io::atomic_write(&path, html.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = html.len(), "page written");

    if json {
        crate::output::print_json(&serde_json::json!({
            "path": path,
            "bytes": html.len(),
            "stages": catalog.len(),
        }))?;
    } else {
        println!("Rendered {} stages to {}", catalog.len(), path.display());
    }
    Ok(())
}
