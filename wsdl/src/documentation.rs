use lazy_static::lazy_static;
use regex::Regex;

use super::reflection::{ClassDescriptor, PropertyDescriptor};

lazy_static! {
    static ref LEADING_STARS: Regex = Regex::new(r"^\s*\*+").unwrap();
    static ref BLOCK_END: Regex = Regex::new(r"(?i)^(@[a-z]|/)").unwrap();
}

/// Supplies the human readable documentation attached to generated complex types.
pub trait DocumentationStrategy {
    fn property_documentation(&self, property: &PropertyDescriptor) -> String;
    fn complex_type_documentation(&self, class: &ClassDescriptor) -> String;
}

/// Takes the free text of `/** ... */` doc comments, up to the first tag.
#[derive(Copy, Clone, Debug, Default)]
pub struct DocCommentDocumentation;

impl DocumentationStrategy for DocCommentDocumentation {
    fn property_documentation(&self, property: &PropertyDescriptor) -> String {
        parse_doc_comment(property.doc_comment.as_deref().unwrap_or_default())
    }

    fn complex_type_documentation(&self, class: &ClassDescriptor) -> String {
        parse_doc_comment(class.doc_comment.as_deref().unwrap_or_default())
    }
}

pub fn parse_doc_comment(doc_comment: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    // the first line holds the opening `/**`
    for line in doc_comment.split('\n').skip(1) {
        let line = match LEADING_STARS.find(line) {
            Some(stars) => &line[stars.end()..],
            None => line,
        }
        .trim();
        if BLOCK_END.is_match(line) {
            break;
        }
        if !lines.is_empty() || !line.is_empty() {
            lines.push(line);
        }
    }
    lines.join("\n")
}
