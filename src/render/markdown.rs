//! Markdown page renderer.
//!
//! One page per source file: YAML frontmatter for the site generator, the
//! module heading and path, the module description, then Structures,
//! Functions, Traits and Enums in that order, each only when non-empty.

use crate::model::*;
use crate::render::Renderer;

pub struct MarkdownRenderer;

/// Frontmatter `layout` shared by every generated page.
pub const LAYOUT: &str = "docs";

/// Frontmatter `category` shared by every generated page.
pub const CATEGORY: &str = "Codebase";

/// Page sections, in output order.
const SECTIONS: [(DeclKind, &str); 4] = [
    (DeclKind::Struct, "Structures"),
    (DeclKind::Function, "Functions"),
    (DeclKind::Trait, "Traits"),
    (DeclKind::Enum, "Enums"),
];

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &Document, module: &ModulePath) -> String {
        let summary = doc
            .description
            .lines()
            .next()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Documentation for {}", module.relative));

        let mut output = frontmatter(&module.name, &summary);
        output.push_str(&format!(
            "\n# {}\n\n`{}`\n\n{}\n\n",
            module.name, module.relative, doc.description
        ));

        for (kind, title) in SECTIONS {
            let items = doc.category(kind);
            if items.is_empty() {
                continue;
            }
            output.push_str(&format!("\n## {}\n\n", title));
            for item in items {
                match kind {
                    DeclKind::Struct => {
                        render_heading(&mut output, item);
                        render_arguments(&mut output, "Fields", &item.arguments);
                    }
                    DeclKind::Function => render_function(&mut output, item),
                    // Traits and enums surface only name and description
                    DeclKind::Trait | DeclKind::Enum => render_heading(&mut output, item),
                }
            }
        }

        output
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// Render the `---` delimited frontmatter block.
pub fn frontmatter(title: &str, description: &str) -> String {
    let mut out = String::from("---\n");
    for (key, value) in [
        ("layout", LAYOUT),
        ("title", title),
        ("description", description),
        ("category", CATEGORY),
    ] {
        out.push_str(&format!("{}: {}\n", key, yaml_scalar(value)));
    }
    out.push_str("---\n");
    out
}

fn render_heading(output: &mut String, item: &DeclDoc) {
    output.push_str(&format!("### {}\n\n{}\n\n", item.name, item.description));
}

fn render_arguments(output: &mut String, title: &str, arguments: &[ArgDoc]) {
    if arguments.is_empty() {
        return;
    }
    output.push_str(&format!("#### {}\n\n", title));
    for arg in arguments {
        output.push_str(&format!("- `{}` - {}\n", arg.name, arg.description));
    }
    output.push('\n');
}

fn render_function(output: &mut String, func: &DeclDoc) {
    render_heading(output, func);
    render_arguments(output, "Arguments", &func.arguments);

    if !func.returns.is_empty() {
        output.push_str(&format!("#### Returns\n\n{}\n\n", func.returns));
    }

    if !func.examples.is_empty() {
        let fence = "`".repeat(fence_len(&func.examples));
        output.push_str("#### Example\n\n");
        output.push_str(&format!("{}rust\n", fence));
        output.push_str(&func.examples.join("\n"));
        output.push_str(&format!("\n{}\n\n", fence));
    }
}

/// Length of a backtick fence that cannot be closed by any line inside it.
fn fence_len(lines: &[String]) -> usize {
    let longest = lines
        .iter()
        .map(|line| longest_backtick_run(line))
        .max()
        .unwrap_or(0);
    if longest >= 3 {
        longest + 1
    } else {
        3
    }
}

fn longest_backtick_run(line: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for c in line.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// Plain scalars YAML resolves to booleans, null or special floats.
const YAML_RESERVED: [&str; 14] = [
    "true", "false", "yes", "no", "on", "off", "y", "n", "null", "~", ".inf", ".nan", "-.inf",
    "+.inf",
];

/// Emit a frontmatter value bare when YAML would read it back as the same
/// string, double-quoted otherwise.
fn yaml_scalar(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value != value.trim()
        || YAML_RESERVED.contains(&value.to_ascii_lowercase().as_str())
        || looks_numeric(value)
        || value.contains(": ")
        || value.contains(" #")
        || value.ends_with(':')
        || value.starts_with(|c: char| "-?:,[]{}#&*!|>'\"%@`".contains(c));
    if !needs_quotes {
        return value.to_string();
    }
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Integers, floats, and `0x`/`0o`/`0b` literals, with `_` separators.
fn looks_numeric(value: &str) -> bool {
    let plain = value.replace('_', "");
    let unsigned = plain.trim_start_matches(['+', '-']);
    plain.parse::<f64>().is_ok()
        || ["0x", "0o", "0b"].iter().any(|prefix| {
            unsigned
                .strip_prefix(prefix)
                .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()))
        })
}
