//! Line tokenizer for Rust source.
//!
//! Splits a file into documentation lines, attribute tags, declaration
//! headers, imports and everything else. The extractor never looks at raw
//! text again; it only walks these tokens.

use crate::model::DeclKind;
use regex::Regex;
use std::sync::LazyLock;

/// Upper bound on lines joined into one attribute or one header signature.
const MAX_LOOKAHEAD: usize = 32;

static RE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*(?P<vis>pub(?:\s*\([^)]*\))?\s+)?",
        r#"(?:(?:const|async|unsafe|default|extern(?:\s+"[^"]*")?)\s+)*"#,
        r"(?P<kw>fn|struct|trait|enum|impl|mod|type|static|const|union|macro_rules!)",
        r"(?:\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)|[<\s{;]|$)",
    ))
    .unwrap()
});

static RE_USE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:pub(?:\s*\([^)]*\))?\s+)?use\s+([A-Za-z_][A-Za-z0-9_]*(?:::[A-Za-z_][A-Za-z0-9_]*)*)\s*;")
        .unwrap()
});

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `///` line, marker and one following space removed.
    Doc(String),
    /// `//!` line, same stripping.
    InnerDoc(String),
    /// Content of one `#[...]` tag.
    Attribute(String),
    Header(Header),
    /// Path of a single-line `use PATH;` statement.
    Import(String),
    Blank,
    /// Plain `//` or `/* */` comment line.
    Comment,
    Other(String),
}

/// A declaration line.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// `None` for items that are never documented (impl, mod, const, ...).
    pub kind: Option<DeclKind>,
    pub name: String,
    pub public: bool,
    /// Header line plus continuation lines up to the body or terminator.
    pub signature: String,
}

/// Tokenize a whole file.
pub fn tokenize(input: &str) -> Vec<Token> {
    let lines: Vec<&str> = input.lines().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        i = push_line(&lines, i, &mut tokens);
    }
    tokens
}

/// Tokenize the line at `i`, returning the index of the next unconsumed line.
fn push_line(lines: &[&str], i: usize, tokens: &mut Vec<Token>) -> usize {
    let mut text = lines[i].to_string();
    let mut next = i + 1;
    let mut peeled = false;

    // Leading attribute tags, possibly spanning several lines
    loop {
        let trimmed = text.trim_start();
        if !trimmed.starts_with("#[") {
            break;
        }
        let open = text.len() - trimmed.len();
        loop {
            if let Some((content, end)) = scan_attribute(&text, open) {
                tokens.push(Token::Attribute(content));
                text = text[end..].to_string();
                break;
            }
            if next >= lines.len()
                || next - i > MAX_LOOKAHEAD
                || ends_attribute(lines[next].trim())
            {
                tokens.push(Token::Attribute(text[open + 2..].trim().to_string()));
                return next;
            }
            text.push(' ');
            text.push_str(lines[next].trim());
            next += 1;
        }
        peeled = true;
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        if !peeled {
            tokens.push(Token::Blank);
        }
        return next;
    }

    if let Some(rest) = trimmed.strip_prefix("///") {
        if !rest.starts_with('/') {
            tokens.push(Token::Doc(strip_marker_space(rest)));
            return next;
        }
    }
    if let Some(rest) = trimmed.strip_prefix("//!") {
        tokens.push(Token::InnerDoc(strip_marker_space(rest)));
        return next;
    }
    if trimmed.starts_with("//") || trimmed.starts_with("/*") {
        tokens.push(Token::Comment);
        return next;
    }

    if let Some(caps) = RE_USE.captures(trimmed) {
        tokens.push(Token::Import(caps[1].to_string()));
        return next;
    }

    if let Some(caps) = RE_HEADER.captures(trimmed) {
        let name = caps.name("name").map(|m| m.as_str().to_string());
        let kind = match name {
            Some(_) => DeclKind::from_keyword(&caps["kw"]),
            None => None,
        };
        let mut signature = trimmed.to_string();
        if !is_terminated(&signature) {
            while next < lines.len() && next - i <= MAX_LOOKAHEAD {
                let cont = lines[next].trim();
                if is_doc_line(cont) {
                    break;
                }
                next += 1;
                if cont.is_empty() || cont.starts_with("//") || cont.starts_with("#[") {
                    continue;
                }
                signature.push(' ');
                signature.push_str(cont);
                if is_terminated(cont) {
                    break;
                }
            }
        }
        tokens.push(Token::Header(Header {
            kind,
            name: name.unwrap_or_default(),
            public: caps.name("vis").is_some(),
            signature,
        }));
        return next;
    }

    tokens.push(Token::Other(trimmed.to_string()));
    next
}

fn strip_marker_space(rest: &str) -> String {
    rest.strip_prefix(' ').unwrap_or(rest).trim_end().to_string()
}

fn is_doc_line(trimmed: &str) -> bool {
    (trimmed.starts_with("///") && !trimmed.starts_with("////")) || trimmed.starts_with("//!")
}

/// An unclosed attribute never swallows a line that starts something else.
fn ends_attribute(next: &str) -> bool {
    next.is_empty() || is_doc_line(next) || RE_HEADER.is_match(next)
}

fn is_terminated(text: &str) -> bool {
    text.contains('{') || text.contains(';')
}

/// Find the attribute opening at byte `open` (pointing at `#[`).
///
/// Returns the content between the brackets and the byte index just past the
/// closing `]`. String literals are skipped so `#[doc = "]"]` closes correctly.
pub fn scan_attribute(text: &str, open: usize) -> Option<(String, usize)> {
    let body_start = open + 2;
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    let mut in_string = false;
    let mut j = body_start;
    while j < bytes.len() {
        let b = bytes[j];
        if in_string {
            match b {
                b'\\' => j += 1,
                b'"' => in_string = false,
                _ => {}
            }
        } else {
            match b {
                b'"' => in_string = true,
                b'[' => depth += 1,
                b']' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some((text[body_start..j].trim().to_string(), j + 1));
                    }
                }
                _ => {}
            }
        }
        j += 1;
    }
    None
}

/// Every complete `#[...]` tag found anywhere in `text`, in order.
pub fn attribute_tags(text: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut from = 0;
    while let Some(offset) = text[from..].find("#[") {
        let open = from + offset;
        match scan_attribute(text, open) {
            Some((content, end)) => {
                tags.push(content);
                from = end;
            }
            None => break,
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(line: &str) -> Header {
        match tokenize(line).into_iter().next() {
            Some(Token::Header(h)) => h,
            other => panic!("expected header, got {other:?}"),
        }
    }

    #[test]
    fn doc_lines_keep_inner_indentation() {
        let tokens = tokenize("    ///     let x = 1;\n///\n//// not docs\n");
        assert_eq!(
            tokens,
            vec![
                Token::Doc("    let x = 1;".to_string()),
                Token::Doc(String::new()),
                Token::Comment,
            ]
        );
    }

    #[test]
    fn inner_doc_line() {
        assert_eq!(
            tokenize("//! Shell configuration"),
            vec![Token::InnerDoc("Shell configuration".to_string())]
        );
    }

    #[test]
    fn header_visibility_and_qualifiers() {
        let h = header("pub(crate) const unsafe fn load_config() -> Config {");
        assert_eq!(h.kind, Some(DeclKind::Function));
        assert_eq!(h.name, "load_config");
        assert!(h.public);

        let h = header("async fn run() {}");
        assert_eq!(h.kind, Some(DeclKind::Function));
        assert!(!h.public);

        let h = header(r#"pub extern "C" fn entry() {}"#);
        assert_eq!(h.name, "entry");
    }

    #[test]
    fn unclassified_items() {
        assert_eq!(header("impl Theme {").kind, None);
        assert_eq!(header("impl<T: Clone> Store<T> {").kind, None);
        assert_eq!(header("pub const MAX: usize = 3;").kind, None);
        assert_eq!(header("mod tests {").kind, None);
        assert_eq!(header("macro_rules! hello {").kind, None);
    }

    #[test]
    fn keyword_prefix_is_not_a_header() {
        assert_eq!(
            tokenize("fnord(1);"),
            vec![Token::Other("fnord(1);".to_string())]
        );
        assert_eq!(
            tokenize("let structure = 1;"),
            vec![Token::Other("let structure = 1;".to_string())]
        );
    }

    #[test]
    fn signature_spans_until_body() {
        let tokens = tokenize("pub fn merge<T>(a: T, b: T) -> T\nwhere\n    T: Clone,\n{\n    a\n}\n");
        match &tokens[0] {
            Token::Header(h) => {
                assert_eq!(h.signature, "pub fn merge<T>(a: T, b: T) -> T where T: Clone, {");
            }
            other => panic!("expected header, got {other:?}"),
        }
        assert_eq!(tokens[1], Token::Other("a".to_string()));
    }

    #[test]
    fn signature_skips_comments_and_blank_lines() {
        let tokens = tokenize(concat!(
            "pub fn merge<T>(\n",
            "    a: T,\n",
            "\n",
            "    #[allow(unused)] b: T,\n",
            ") -> T\n",
            "where\n",
            "    // must clone\n",
            "    T: Clone,\n",
            "{\n",
        ));
        assert_eq!(tokens.len(), 1);
        match &tokens[0] {
            Token::Header(h) => {
                assert_eq!(h.signature, "pub fn merge<T>( a: T, ) -> T where T: Clone, {");
            }
            other => panic!("expected header, got {other:?}"),
        }
    }

    #[test]
    fn signature_stops_at_doc_line() {
        let tokens = tokenize("fn broken(\n/// Next item.\nfn next() {}\n");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1], Token::Doc("Next item.".to_string()));
    }

    #[test]
    fn unclosed_attribute_stops_before_next_item() {
        let tokens = tokenize("#[derive(Debug\npub struct A;\n/// B.\npub fn b() {}\n");
        assert_eq!(tokens[0], Token::Attribute("derive(Debug".to_string()));
        assert!(matches!(&tokens[1], Token::Header(h) if h.name == "A"));
        assert_eq!(tokens[2], Token::Doc("B.".to_string()));
        assert!(matches!(&tokens[3], Token::Header(h) if h.name == "b"));

        let tokens = tokenize("#[cfg(unix\n\n/// Doc.\nfn f() {}\n");
        assert_eq!(tokens[0], Token::Attribute("cfg(unix".to_string()));
        assert_eq!(tokens[1], Token::Blank);
    }

    #[test]
    fn attributes_split_from_line() {
        let tokens = tokenize("#[test] #[ignore] fn slow() {}");
        assert_eq!(tokens[0], Token::Attribute("test".to_string()));
        assert_eq!(tokens[1], Token::Attribute("ignore".to_string()));
        assert!(matches!(&tokens[2], Token::Header(h) if h.name == "slow"));
    }

    #[test]
    fn multi_line_attribute() {
        let tokens = tokenize("#[cfg(all(\n    unix,\n    feature = \"x\"\n))]\nfn only_unix() {}\n");
        assert_eq!(
            tokens[0],
            Token::Attribute("cfg(all( unix, feature = \"x\" ))".to_string())
        );
        assert!(matches!(&tokens[1], Token::Header(h) if h.name == "only_unix"));
    }

    #[test]
    fn attribute_with_bracket_in_string() {
        assert_eq!(
            attribute_tags(r#"see #[doc = "]"] and #[inline]"#),
            vec![r#"doc = "]""#.to_string(), "inline".to_string()]
        );
    }

    #[test]
    fn imports() {
        assert_eq!(
            tokenize("use std::collections::HashMap;\npub use crate::model;\nuse a::{b, c};"),
            vec![
                Token::Import("std::collections::HashMap".to_string()),
                Token::Import("crate::model".to_string()),
                Token::Other("use a::{b, c};".to_string()),
            ]
        );
    }
}
