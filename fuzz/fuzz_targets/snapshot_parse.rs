#![no_main]

use html::{Document, STATIC_HEAD_TAG, find_head, normalize_fragment, rename_head_tags};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let renamed = rename_head_tags(input, STATIC_HEAD_TAG);
    let snapshot = Document::parse(&renamed);
    assert!(find_head(&snapshot).is_none(), "a head survived the rename");
    if let Some(head) = snapshot.find_element(snapshot.root(), STATIC_HEAD_TAG) {
        let _ = head.inner_html();
    }

    let once = normalize_fragment(input);
    assert_eq!(normalize_fragment(&once), once, "normalization must be idempotent");
});
