//! Rust doc comment extractor.
//!
//! Walks the token stream with two states: idle, or holding a pending doc
//! block (plus any attribute tags after it). A declaration header flushes the
//! pending block into a [`DeclDoc`]; anything else that is not blank or a
//! plain comment throws it away.
//!
//! - leading `///` / `//!` run → `Document.description`
//! - `use a::b;` → dependency `a`
//! - `#[test] fn name` → `Document.tests`
//! - `///` block before `fn`/`struct`/`trait`/`enum` → one `DeclDoc`

use crate::model::*;
use crate::parser::lexer::{self, Header, Token};
use crate::parser::sections;
use regex::Regex;
use std::sync::LazyLock;

static RE_WHERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bwhere\b\s*([^{;]*)").unwrap());

/// Description recorded for every `#[test]` function.
pub const TEST_DESCRIPTION: &str = "Unit test for functionality verification";

#[derive(Debug, Default)]
struct Pending {
    docs: Vec<String>,
    attributes: Vec<String>,
    /// Set by a blank or comment line: the block still attaches to the next
    /// header, but a new doc line starts a fresh block.
    closed: bool,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Pending(Pending),
}

/// Extract the documentation model of one file. Never fails: anything the
/// tokenizer does not recognize simply contributes nothing.
pub fn parse(input: &str) -> Document {
    let tokens = lexer::tokenize(input);
    let mut doc = Document {
        description: module_description(&tokens),
        ..Default::default()
    };

    let mut state = State::Idle;
    let mut test_armed = false;

    for token in tokens {
        match token {
            Token::Doc(text) => {
                if text.contains('{') {
                    test_armed = false;
                }
                if let State::Pending(p) = &mut state {
                    if !p.closed {
                        p.docs.push(text);
                        continue;
                    }
                }
                state = State::Pending(Pending {
                    docs: vec![text],
                    ..Default::default()
                });
            }
            Token::Attribute(content) => {
                if content == "test" {
                    test_armed = true;
                }
                if let State::Pending(p) = &mut state {
                    p.attributes.push(content);
                }
            }
            Token::Header(header) => {
                if test_armed {
                    if header.kind == Some(DeclKind::Function) {
                        doc.tests.push(TestDoc {
                            name: header.name.clone(),
                            description: TEST_DESCRIPTION.to_string(),
                        });
                        test_armed = false;
                    } else if header.signature.contains('{') {
                        test_armed = false;
                    }
                }
                if let State::Pending(p) = std::mem::take(&mut state) {
                    if let Some(kind) = header.kind {
                        doc.push(kind, build_decl(p, &header));
                    }
                }
            }
            Token::Import(path) => {
                if let Some(first) = path.split("::").next() {
                    doc.add_dependency(first);
                }
                state = State::Idle;
            }
            Token::Blank | Token::Comment => {
                if let State::Pending(p) = &mut state {
                    p.closed = true;
                }
            }
            Token::InnerDoc(_) => {}
            Token::Other(text) => {
                if text.contains('{') {
                    test_armed = false;
                }
                state = State::Idle;
            }
        }
    }

    doc
}

/// Leading run of doc lines starting at the first line of the file.
fn module_description(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map_while(|t| match t {
            Token::Doc(text) | Token::InnerDoc(text) => Some(text.trim()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn build_decl(pending: Pending, header: &Header) -> DeclDoc {
    let deprecated = pending.docs.iter().any(|l| l.contains("#[deprecated"))
        || pending
            .attributes
            .iter()
            .any(|a| a.starts_with("deprecated"));

    let mut attributes: Vec<String> = pending
        .docs
        .iter()
        .flat_map(|l| lexer::attribute_tags(l))
        .collect();
    attributes.extend(pending.attributes);

    DeclDoc {
        name: header.name.clone(),
        where_clause: where_clause(&header.signature),
        visibility: if header.public {
            Visibility::Public
        } else {
            Visibility::Private
        },
        deprecated,
        attributes,
        ..sections::parse(&pending.docs)
    }
}

/// Text after `where` up to the body or terminator, whitespace collapsed.
fn where_clause(signature: &str) -> String {
    RE_WHERE
        .captures(signature)
        .map(|caps| {
            caps[1]
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .trim_end_matches(',')
                .to_string()
        })
        .unwrap_or_default()
}
