//! Split one declaration's doc lines into rustdoc-style sections.

use crate::model::{ArgDoc, DeclDoc};
use regex::Regex;
use std::sync::LazyLock;

static RE_ARGUMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\* `([^`]+)`\s*-\s*(.+)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Description,
    Arguments,
    Returns,
    Examples,
    Since,
}

/// Heading lines that move the section cursor. `# Fields` shares the
/// arguments list so struct fields render under their own heading.
fn heading(line: &str) -> Option<Section> {
    if line.starts_with("# Arguments") || line.starts_with("# Fields") {
        Some(Section::Arguments)
    } else if line.starts_with("# Returns") {
        Some(Section::Returns)
    } else if line.starts_with("# Example") {
        Some(Section::Examples)
    } else if line.starts_with("# Since") {
        Some(Section::Since)
    } else {
        None
    }
}

/// Parse doc lines (markers already stripped) into description, arguments,
/// returns, examples and since. All other fields are left at their defaults.
pub fn parse(lines: &[String]) -> DeclDoc {
    let mut doc = DeclDoc::default();
    let mut section = Section::Description;
    let mut in_code = false;

    for raw in lines {
        let line = raw.trim();

        if line.starts_with("```") {
            in_code = !in_code;
            if section == Section::Examples {
                doc.examples.push(raw.clone());
            }
            continue;
        }

        if !in_code {
            if let Some(next) = heading(line) {
                section = next;
                continue;
            }
        }

        if line.is_empty() {
            continue;
        }

        match section {
            Section::Description => {
                doc.description.push_str(line);
                doc.description.push('\n');
            }
            Section::Arguments => {
                if let Some(arg) = parse_argument(line) {
                    doc.arguments.push(arg);
                }
            }
            Section::Returns => {
                doc.returns.push_str(line);
                doc.returns.push('\n');
            }
            Section::Examples => doc.examples.push(raw.clone()),
            Section::Since => doc.since = line.to_string(),
        }
    }

    doc.description = doc.description.trim().to_string();
    doc.returns = doc.returns.trim().to_string();
    doc
}

/// Parse `* `name` - description`.
///
/// The type is only filled when the name itself carries a `:` separator;
/// no inference is attempted.
fn parse_argument(line: &str) -> Option<ArgDoc> {
    let caps = RE_ARGUMENT.captures(line)?;
    let name = caps[1].to_string();
    let ty = if name.contains(':') {
        name.split(':').nth(1).unwrap_or_default().trim().to_string()
    } else {
        String::new()
    };
    Some(ArgDoc {
        name,
        description: caps[2].trim().to_string(),
        ty,
    })
}
