//! HTML plumbing for head inspection: a forgiving tokenizer, an arena DOM, the fragment
//! serializer used for markup normalization, compound selectors and head location.
pub mod dom;
pub mod head;
pub mod selector;
pub mod serialize;

mod entities;
mod tokenizer;
mod types;

pub use crate::dom::{Descendants, Document, ElementRef};
pub use crate::head::{STATIC_HEAD_TAG, find_head, rename_head_tags};
pub use crate::selector::{AttributeSelector, Selector, SelectorError};
pub use crate::serialize::normalize_fragment;
pub use crate::tokenizer::tokenize;
pub use crate::types::{Id, NodeId, NodeKind, Token};

pub fn is_html(content_type: Option<&str>) -> bool {
    let Some(value) = content_type else {
        return false;
    };
    let value = value.to_ascii_lowercase();
    value.contains("text/html") || value.contains("application/xhtml")
}
