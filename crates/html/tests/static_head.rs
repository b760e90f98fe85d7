use html::{Document, STATIC_HEAD_TAG, Selector, find_head, normalize_fragment, rename_head_tags};

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<HEAD>
  <meta charset="utf-8">
  <title>Shop &amp; Co</title>
  <meta name="x" content="A">1</meta>
  <script src="/app.js" defer></script>
</HEAD>
<body><header><h1>Shop</h1></header></body>
</html>"#;

#[test]
fn renamed_snapshot_parses_into_a_plain_element() {
    let rewritten = rename_head_tags(PAGE, STATIC_HEAD_TAG);
    assert!(!rewritten.to_ascii_lowercase().contains("<head>"));
    assert!(rewritten.contains("<header>"));

    let snapshot = Document::parse(&rewritten);
    assert!(find_head(&snapshot).is_none());
    let head = snapshot
        .find_element(snapshot.root(), STATIC_HEAD_TAG)
        .expect("placeholder element");
    let names: Vec<&str> = head.child_elements().map(|e| e.name()).collect();
    assert_eq!(names, ["meta", "title", "meta", "script"]);
}

#[test]
fn fingerprint_from_live_element_finds_snapshot_counterpart() {
    let live = Document::parse(PAGE);
    let live_head = find_head(&live).expect("live head");
    let live_script = live_head
        .child_elements()
        .find(|e| e.name() == "script")
        .expect("script");

    let snapshot = Document::parse(&rename_head_tags(PAGE, STATIC_HEAD_TAG));
    let static_head = snapshot
        .find_element(snapshot.root(), STATIC_HEAD_TAG)
        .expect("placeholder element");
    let selector = Selector::for_element(live_script);
    let found = snapshot.query_selector_all(static_head.id(), &selector);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].attr("src"), Some("/app.js"));
    assert!(!found[0].same_node(&live_script));
    assert_eq!(
        normalize_fragment(&found[0].inner_html()),
        normalize_fragment(&live_script.inner_html())
    );
}
