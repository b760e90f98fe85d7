use crate::dom::{Document, ElementRef};
use memchr::memchr;

/// Tag name the server-rendered `<head>` is renamed to before parsing, so it stays a plain
/// element that cannot merge with any other document's head.
pub const STATIC_HEAD_TAG: &str = "static-head";

/// Locates the document head: `html > head` when present, otherwise the first `<head>` in
/// document order.
pub fn find_head(doc: &Document) -> Option<ElementRef<'_>> {
    let root = doc.root();
    if let Some(html) = doc
        .children(root)
        .iter()
        .filter_map(|id| doc.element(*id))
        .find(|el| el.name() == "html")
    {
        if let Some(head) = html.child_elements().find(|el| el.name() == "head") {
            return Some(head);
        }
    }
    doc.find_element(root, "head")
}

/// Rewrites every `<head` / `</head` tag opening (any case) to use `placeholder` instead.
///
/// Only whole tag names are rewritten: `<header>` and `<headline>` are left alone. The rewrite
/// is purely textual, so occurrences inside comments or script bodies are renamed too.
pub fn rename_head_tags(input: &str, placeholder: &str) -> String {
    const NAME: &[u8] = b"head";
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut out = String::with_capacity(input.len() + placeholder.len() * 2);
    let mut copy_start = 0;
    let mut i = 0;

    while let Some(rel) = memchr(b'<', &bytes[i..]) {
        let lt = i + rel;
        let name_start = if bytes.get(lt + 1) == Some(&b'/') {
            lt + 2
        } else {
            lt + 1
        };
        let name_end = name_start + NAME.len();
        let is_head = name_end <= len
            && bytes[name_start..name_end].eq_ignore_ascii_case(NAME)
            && bytes
                .get(name_end)
                .is_none_or(|&b| !(b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':')));
        if is_head {
            out.push_str(&input[copy_start..name_start]);
            out.push_str(placeholder);
            copy_start = name_end;
            i = name_end;
        } else {
            i = lt + 1;
        }
    }
    out.push_str(&input[copy_start..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_rewrites_open_and_close_tags_case_insensitively() {
        let out = rename_head_tags("<HTML><Head lang=en><title>x</title></HEAD>", STATIC_HEAD_TAG);
        assert_eq!(
            out,
            "<HTML><static-head lang=en><title>x</title></static-head>"
        );
    }

    #[test]
    fn rename_leaves_similar_tag_names_alone() {
        let input = "<header></header><headline><head/>";
        assert_eq!(
            rename_head_tags(input, STATIC_HEAD_TAG),
            "<header></header><headline><static-head/>"
        );
    }

    #[test]
    fn rename_handles_truncated_input() {
        assert_eq!(rename_head_tags("<hea", STATIC_HEAD_TAG), "<hea");
        assert_eq!(rename_head_tags("</head", STATIC_HEAD_TAG), "</static-head");
        assert_eq!(rename_head_tags("<", STATIC_HEAD_TAG), "<");
    }

    #[test]
    fn find_head_prefers_html_child() {
        let doc = Document::parse(
            "<template><head id=a></head></template><html><head id=b></head></html>",
        );
        assert_eq!(find_head(&doc).and_then(|h| h.attr("id")), Some("b"));
    }

    #[test]
    fn find_head_falls_back_to_first_head_anywhere() {
        let doc = Document::parse("<div><head id=a></head></div>");
        assert_eq!(find_head(&doc).and_then(|h| h.attr("id")), Some("a"));
        assert!(find_head(&Document::parse("<p></p>")).is_none());
    }
}
