use html_test_support::{ExpectedOrigin, load_cases};
use inspect::{Inspector, Origin, Severity};
use std::path::Path;

#[test]
fn head_resolution_cases() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/heads.toml");
    for case in load_cases(&path) {
        let doc = case.document();
        let sink = html_test_support::RecordingSink::new();
        let mut inspector = Inspector::new(&doc, &sink, case.config.clone());
        let session = inspector.resolve();

        let expected = match case.expect_origin {
            ExpectedOrigin::Static => Origin::Static,
            ExpectedOrigin::Live => Origin::Live,
        };
        assert_eq!(session.origin(), expected, "case {:?}", case.name);
        assert_eq!(
            sink.mentions("Falling back to document.head"),
            case.expect_fallback_warning,
            "case {:?}: {:#?}",
            case.name,
            sink.transcript()
        );
        assert_eq!(
            sink.count(Severity::Error),
            usize::from(case.fetch_error.is_some()),
            "case {:?}",
            case.name
        );
        if case.config.prefers_dynamic_assessment() {
            assert_eq!(doc.fetch_count(), 0, "case {:?}", case.name);
        } else {
            assert_eq!(doc.fetch_count(), 1, "case {:?}", case.name);
        }
        if let Some(children) = &case.expect_head_children {
            let names: Vec<&str> = session.head_elements().iter().map(|e| e.name()).collect();
            assert_eq!(&names, children, "case {:?}", case.name);
        }
    }
}
