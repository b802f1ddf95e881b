//! Site-level output: the module index page and the navigation fragment
//! spliced into the docs layout template.

use crate::model::ModulePath;
use crate::render::markdown;
use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// File name of the index page inside the output directory.
pub const INDEX_FILE: &str = "index.md";

static RE_DIV_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<div[\s>]|</div\s*>").unwrap());

/// Link target for a module page.
pub fn module_href(base_url: &str, module: &ModulePath) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), module.slug())
}

/// Render the index page listing every module in collection order.
pub fn render_index(modules: &[ModulePath], base_url: &str, project: Option<&str>) -> String {
    let description = match project {
        Some(name) => format!("API documentation for the {} codebase", name),
        None => "API documentation for the codebase".to_string(),
    };
    let mut out = markdown::frontmatter("Codebase Documentation", &description);
    out.push_str("\n# Codebase Documentation\n\n");
    out.push_str(
        "This section contains the API documentation automatically generated from the source code.\n\n",
    );
    out.push_str("## Modules\n\n");
    for module in modules {
        out.push_str(&format!(
            "- [{}]({}) - {}\n",
            module.name,
            module_href(base_url, module),
            module.relative
        ));
    }
    out
}

/// Build the navigation fragment: an Overview link, then one link per module.
pub fn render_nav(modules: &[ModulePath], base_url: &str) -> String {
    let mut lines = vec![
        String::new(),
        "<div class=\"nav-group\">".to_string(),
        "    <h6>Codebase</h6>".to_string(),
        "    <ul>".to_string(),
        format!(
            "        <li><a href=\"{}\">Overview</a></li>",
            html_escape(base_url)
        ),
    ];
    for module in modules {
        lines.push(format!(
            "        <li><a href=\"{}\">{}</a></li>",
            html_escape(&module_href(base_url, module)),
            html_escape(&module.name)
        ));
    }
    lines.push("    </ul>".to_string());
    lines.push("</div>".to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// Replace the contents of `<div id="{nav_id}">…</div>` with `fragment`.
///
/// The closing tag is the `</div>` that balances the opening one, so nested
/// `<div>`s inside the region are fine. The opening tag is kept verbatim,
/// which makes repeated splices produce the same template. Returns `None`
/// when the opening tag or its balancing close is missing.
pub fn splice_nav(template: &str, nav_id: &str, fragment: &str) -> Option<String> {
    let start_re = Regex::new(&format!(
        r#"<div\s+id\s*=\s*"{}"\s*>"#,
        regex::escape(nav_id)
    ))
    .ok()?;
    let start = start_re.find(template)?;

    let mut depth = 1usize;
    let mut end = None;
    for tag in RE_DIV_TAG.find_iter(&template[start.end()..]) {
        if tag.as_str().starts_with("</") {
            depth -= 1;
            if depth == 0 {
                end = Some(start.end() + tag.end());
                break;
            }
        } else {
            depth += 1;
        }
    }
    let end = end?;

    let mut out = String::with_capacity(template.len() + fragment.len());
    out.push_str(&template[..start.end()]);
    out.push_str(fragment);
    out.push_str("</div>");
    out.push_str(&template[end..]);
    Some(out)
}

/// Write the index page into `output_dir`.
pub fn write_index(output_dir: &Path, content: &str) -> Result<PathBuf> {
    let path = output_dir.join(INDEX_FILE);
    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Outcome of [`update_layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutUpdate {
    Written,
    Unchanged,
    MarkerMissing,
}

/// Splice the navigation fragment into the layout template on disk.
///
/// The file is only rewritten when its content actually changes.
pub fn update_layout(layout: &Path, nav_id: &str, fragment: &str) -> Result<LayoutUpdate> {
    let template = fs::read_to_string(layout)
        .with_context(|| format!("failed to read layout template {}", layout.display()))?;
    let Some(updated) = splice_nav(&template, nav_id, fragment) else {
        return Ok(LayoutUpdate::MarkerMissing);
    };
    if updated == template {
        return Ok(LayoutUpdate::Unchanged);
    }
    fs::write(layout, &updated)
        .with_context(|| format!("failed to write layout template {}", layout.display()))?;
    Ok(LayoutUpdate::Written)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
