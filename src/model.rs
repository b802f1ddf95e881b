//! Data model for extracted documentation: format-agnostic.

use serde::Serialize;
use std::path::Path;

/// Complete documentation extracted from a single source file.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Leading documentation block of the file.
    pub description: String,
    /// Leading segments of `use` paths, deduplicated, first-seen order.
    pub dependencies: Vec<String>,
    pub functions: Vec<DeclDoc>,
    pub structs: Vec<DeclDoc>,
    pub traits: Vec<DeclDoc>,
    pub enums: Vec<DeclDoc>,
    pub tests: Vec<TestDoc>,
}

impl Document {
    /// Record a dependency unless it is already present.
    pub fn add_dependency(&mut self, name: &str) {
        if !self.dependencies.iter().any(|d| d == name) {
            self.dependencies.push(name.to_string());
        }
    }

    /// Append a declaration to the category matching its kind.
    pub fn push(&mut self, kind: DeclKind, doc: DeclDoc) {
        self.category_mut(kind).push(doc);
    }

    pub fn category(&self, kind: DeclKind) -> &[DeclDoc] {
        match kind {
            DeclKind::Function => &self.functions,
            DeclKind::Struct => &self.structs,
            DeclKind::Trait => &self.traits,
            DeclKind::Enum => &self.enums,
        }
    }

    fn category_mut(&mut self, kind: DeclKind) -> &mut Vec<DeclDoc> {
        match kind {
            DeclKind::Function => &mut self.functions,
            DeclKind::Struct => &mut self.structs,
            DeclKind::Trait => &mut self.traits,
            DeclKind::Enum => &mut self.enums,
        }
    }
}

/// The four documented declaration kinds.
///
/// Variant order is the classification precedence used when a header could
/// be read more than one way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Function,
    Struct,
    Trait,
    Enum,
}

impl DeclKind {
    pub const ALL: [DeclKind; 4] = [
        DeclKind::Function,
        DeclKind::Struct,
        DeclKind::Trait,
        DeclKind::Enum,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            DeclKind::Function => "fn",
            DeclKind::Struct => "struct",
            DeclKind::Trait => "trait",
            DeclKind::Enum => "enum",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<DeclKind> {
        DeclKind::ALL.into_iter().find(|k| k.keyword() == keyword)
    }
}

/// A single documented declaration.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclDoc {
    pub name: String,
    pub description: String,
    /// `# Arguments` (or `# Fields`) entries
    pub arguments: Vec<ArgDoc>,
    pub returns: String,
    /// Raw example lines, fence markers included
    pub examples: Vec<String>,
    pub where_clause: String,
    pub visibility: Visibility,
    pub deprecated: bool,
    pub since: String,
    /// Attribute contents without the `#[` `]` markers
    pub attributes: Vec<String>,
}

/// Parsed `* `name` - description` entry.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ArgDoc {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

/// A `#[test]` function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestDoc {
    pub name: String,
    pub description: String,
}

/// Location of a source file relative to the scanned root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePath {
    /// `/`-separated path relative to the root, e.g. `config/theme.rs`
    pub relative: String,
    /// File name without extension, e.g. `theme`
    pub name: String,
}

impl ModulePath {
    /// Locate `path` under `root`. A root that is the file itself yields the
    /// bare file name.
    pub fn new(root: &Path, path: &Path) -> Self {
        let relative = match path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => path.file_name().map(Path::new).unwrap_or(path),
        };
        let joined = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        Self::from_relative(&joined)
    }

    pub fn from_relative(relative: &str) -> Self {
        let name = Path::new(relative)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| relative.to_string());
        ModulePath {
            relative: relative.to_string(),
            name,
        }
    }

    /// Relative path with separators replaced by `_`, used for page file
    /// names and hrefs. "config/theme.rs" → "config_theme.rs"
    pub fn slug(&self) -> String {
        self.relative.replace('/', "_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependencies_are_deduplicated() {
        let mut doc = Document::default();
        doc.add_dependency("std");
        doc.add_dependency("regex");
        doc.add_dependency("std");
        assert_eq!(doc.dependencies, vec!["std", "regex"]);
    }

    #[test]
    fn push_routes_by_kind() {
        let mut doc = Document::default();
        for kind in DeclKind::ALL {
            doc.push(
                kind,
                DeclDoc {
                    name: kind.keyword().to_string(),
                    ..Default::default()
                },
            );
        }
        for kind in DeclKind::ALL {
            let category = doc.category(kind);
            assert_eq!(category.len(), 1);
            assert_eq!(category[0].name, kind.keyword());
        }
    }

    #[test]
    fn module_path_under_root() {
        let module = ModulePath::new(Path::new("src"), Path::new("src/config/theme.rs"));
        assert_eq!(module.relative, "config/theme.rs");
        assert_eq!(module.name, "theme");
        assert_eq!(module.slug(), "config_theme.rs");
    }

    #[test]
    fn module_path_root_is_file() {
        let module = ModulePath::new(Path::new("src/main.rs"), Path::new("src/main.rs"));
        assert_eq!(module.relative, "main.rs");
        assert_eq!(module.name, "main");
    }

    #[test]
    fn keyword_lookup() {
        assert_eq!(DeclKind::from_keyword("trait"), Some(DeclKind::Trait));
        assert_eq!(DeclKind::from_keyword("impl"), None);
    }
}
