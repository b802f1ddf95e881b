//! JSON renderer: structured output for tooling integration.
//!
//! Serializes the Document model directly, tagged with the module's title
//! and relative path.

use crate::model::*;
use crate::render::Renderer;
use serde::Serialize;
use tracing::error;

pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonPage<'a> {
    title: &'a str,
    path: &'a str,
    #[serde(flatten)]
    doc: &'a Document,
}

impl Renderer for JsonRenderer {
    fn render(&self, doc: &Document, module: &ModulePath) -> String {
        let page = JsonPage {
            title: &module.name,
            path: &module.relative,
            doc,
        };
        let mut out = serde_json::to_string_pretty(&page).unwrap_or_else(|err| {
            error!(path = %module.relative, "failed to serialize page: {}", err);
            String::from("{}")
        });
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
