#![no_main]

use html::{Document, Selector};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let mut doc = Document::new();
    let Some(id) = doc.create_element_from_selector(input) else {
        return;
    };
    let element = doc.element(id).expect("created element exists");
    let lenient = Selector::parse_lenient(input);
    assert!(lenient.has_unique_attribute_names());
    assert!(lenient.matches(element));

    let fingerprint = Selector::for_element(element);
    let reparsed = Selector::parse(&fingerprint.to_string()).expect("fingerprint reparses");
    assert!(reparsed.matches(element));
});
