use crate::dom::Document;
use crate::entities::{escape_attribute, escape_text};
use crate::types::{Id, NodeKind, is_rawtext_element, is_void_element};

pub(crate) fn inner_html(doc: &Document, id: Id) -> String {
    let mut out = String::new();
    let raw = doc
        .kind(id)
        .and_then(NodeKind::element_name)
        .is_some_and(is_rawtext_element);
    for child in doc.children(id) {
        push_node(doc, *child, raw, &mut out);
    }
    out
}

pub(crate) fn outer_html(doc: &Document, id: Id) -> String {
    let mut out = String::new();
    push_node(doc, id, false, &mut out);
    out
}

pub(crate) fn push_start_tag(
    name: &str,
    attributes: &[(String, Option<String>)],
    out: &mut String,
) {
    out.push('<');
    out.push_str(name);
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        escape_attribute(value.as_deref().unwrap_or(""), out);
        out.push('"');
    }
    out.push('>');
}

fn push_node(doc: &Document, id: Id, parent_is_raw: bool, out: &mut String) {
    let Some(kind) = doc.kind(id) else {
        return;
    };
    match kind {
        NodeKind::Document { doctype } => {
            if let Some(doctype) = doctype {
                out.push_str("<!DOCTYPE ");
                out.push_str(doctype);
                out.push('>');
            }
            for child in doc.children(id) {
                push_node(doc, *child, false, out);
            }
        }
        NodeKind::Element { name, attributes } => {
            push_start_tag(name, attributes, out);
            if is_void_element(name) {
                return;
            }
            let raw = is_rawtext_element(name);
            for child in doc.children(id) {
                push_node(doc, *child, raw, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        NodeKind::Text { text } => {
            if parent_is_raw {
                out.push_str(text);
            } else {
                escape_text(text, out);
            }
        }
        NodeKind::Comment { text } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

/// Canonical form of a markup fragment: parse it into a throwaway container and serialize the
/// container's children back out.
///
/// Two fragments that differ only in entity spelling, attribute quoting or tag-name case
/// normalize to the same string. The scratch document is dropped before returning.
pub fn normalize_fragment(markup: &str) -> String {
    let mut scratch = Document::new();
    let container = scratch.create_element("div");
    scratch.set_inner_html(container, markup);
    scratch.inner_html(container)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_html_round_trips_head_elements() {
        let doc = Document::parse(
            r#"<head><meta charset=utf-8><script async src="/a.js">if (a < b) {}</script><title>A &amp; B</title></head>"#,
        );
        let head = doc.find_element(doc.root(), "head").expect("head");
        assert_eq!(
            head.outer_html(),
            r#"<head><meta charset="utf-8"><script async="" src="/a.js">if (a < b) {}</script><title>A &amp; B</title></head>"#
        );
    }

    #[test]
    fn inner_html_of_script_is_not_escaped() {
        let doc = Document::parse("<script>x && y</script>");
        let script = doc.find_element(doc.root(), "script").expect("script");
        assert_eq!(script.inner_html(), "x && y");
    }

    #[test]
    fn normalization_erases_spelling_differences() {
        assert_eq!(normalize_fragment("&#50;"), "2");
        assert_eq!(
            normalize_fragment("<B CLASS=x>caf&eacute;</b>"),
            normalize_fragment("<b class='x'>caf&eacute;</b>")
        );
        assert_eq!(normalize_fragment("a&nbsp;b"), "a&nbsp;b");
        assert_eq!(normalize_fragment("a\u{a0}b"), "a&nbsp;b");
        assert_ne!(normalize_fragment("1"), normalize_fragment("2"));
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_fragment(r#"<span data-x='"q"'>x &lt; y</span><!--c-->"#);
        assert_eq!(normalize_fragment(&once), once);
    }

    #[test]
    fn document_serialization_includes_doctype() {
        let doc = Document::parse("<!DOCTYPE html><html></html>");
        assert_eq!(doc.outer_html(doc.root()), "<!DOCTYPE html><html></html>");
    }
}
