//! Parser module: tokenizer, extractor and section parser.

pub mod lexer;
pub mod rust;
pub mod sections;

use crate::model::Document;

/// Extract the documentation model from the text of one source file.
pub fn extract(content: &str) -> Document {
    rust::parse(content)
}
