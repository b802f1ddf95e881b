//! Renderer module: trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::model::{Document, ModulePath};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Trait for rendering one file's Document into a page.
pub trait Renderer {
    fn render(&self, doc: &Document, module: &ModulePath) -> String;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use markdown or json",
            format
        )),
    }
}

/// Output file name for a module's page.
/// "config/theme.rs" → "config_theme.rs.md"
pub fn page_file_name(module: &ModulePath, renderer: &dyn Renderer) -> String {
    format!("{}.{}", module.slug(), renderer.file_extension())
}

/// Render a module's page and write it into `output_dir`.
pub fn write_page(
    output_dir: &Path,
    module: &ModulePath,
    doc: &Document,
    renderer: &dyn Renderer,
) -> Result<PathBuf> {
    let out_path = output_dir.join(page_file_name(module, renderer));
    fs::write(&out_path, renderer.render(doc, module))
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_formats() {
        assert_eq!(create_renderer("markdown").unwrap().file_extension(), "md");
        assert_eq!(create_renderer("md").unwrap().file_extension(), "md");
        assert_eq!(create_renderer("json").unwrap().file_extension(), "json");
    }

    #[test]
    fn unknown_format() {
        let err = create_renderer("xml").err().unwrap();
        assert!(err.to_string().contains("unknown format: xml"));
    }

    #[test]
    fn page_name_joins_components() {
        let renderer = markdown::MarkdownRenderer;
        let module = ModulePath::from_relative("shell/commands.rs");
        assert_eq!(page_file_name(&module, &renderer), "shell_commands.rs.md");
    }
}
