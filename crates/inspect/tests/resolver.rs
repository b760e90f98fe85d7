use html::{Document, Id};
use html_test_support::{
    DEFAULT_LOCATION, FakeDocument, Recorded, RecordingSink, assert_lines_eq,
};
use inspect::{
    Inspector, InspectorConfig, LiveReason, Origin, PlaceholderTag, ResolvedHead, Severity,
    SnapshotError, SnapshotIsolation,
};

const LIVE: &str = "<html><head><title>Live</title></head><body></body></html>";
const SERVED: &str =
    "<html><head><meta charset=utf-8><title>Server</title></head><body></body></html>";

fn config() -> InspectorConfig {
    InspectorConfig::new().with_logging_prefix("[t] ")
}

#[test]
fn dynamic_preference_skips_the_fetch() {
    let doc = FakeDocument::new(LIVE).serving(SERVED);
    let sink = RecordingSink::new();
    let mut inspector = Inspector::new(&doc, &sink, config().with_dynamic_assessment(true));

    let session = inspector.resolve();
    assert_eq!(session.origin(), Origin::Live);
    assert!(matches!(
        session.resolved(),
        ResolvedHead::Live {
            reason: LiveReason::PrefersDynamicAssessment
        }
    ));
    assert!(session.head().unwrap().same_node(&doc.head_element()));
    assert_eq!(doc.fetch_count(), 0);
    assert!(sink.events().is_empty());
}

#[test]
fn static_head_comes_from_the_current_location() {
    let doc = FakeDocument::new(LIVE)
        .with_location("https://example.test/article?id=7")
        .serving(SERVED);
    let sink = RecordingSink::new();
    let mut inspector = Inspector::new(&doc, &sink, config());

    let session = inspector.resolve();
    assert_eq!(session.origin(), Origin::Static);
    let head = session.head().unwrap();
    assert_eq!(head.name(), html::STATIC_HEAD_TAG);
    assert!(!std::ptr::eq(head.document(), doc.live()));
    assert_eq!(
        head.inner_html(),
        r#"<meta charset="utf-8"><title>Server</title>"#
    );
    assert_eq!(doc.requested_urls(), vec!["https://example.test/article?id=7"]);
    assert!(sink.events().is_empty());
}

#[test]
fn fetch_error_logs_the_error_then_falls_back() {
    let doc = FakeDocument::new(LIVE).failing("connection reset");
    let sink = RecordingSink::new();
    let mut inspector = Inspector::new(&doc, &sink, config());

    let session = inspector.resolve();
    assert_eq!(session.origin(), Origin::Live);
    assert!(matches!(
        session.resolved().fallback_reason(),
        Some(SnapshotError::Fetch(_))
    ));
    assert!(session.head().unwrap().same_node(&doc.head_element()));

    let logs = sink.logs();
    assert_eq!(logs.len(), 2);
    assert_eq!(
        logs[0],
        (
            Severity::Error,
            vec![
                Recorded::Text("[t] An exception occurred while getting the static <head>:".into()),
                Recorded::Text("connection reset".into()),
            ]
        )
    );
    assert_eq!(
        logs[1],
        (
            Severity::Warn,
            vec![
                Recorded::Text(
                    "[t] Unable to parse the static (server-rendered) <head>. Falling back to document.head"
                        .into()
                ),
                Recorded::Element("<head><title>Live</title></head>".into()),
            ]
        )
    );
}

#[test]
fn snapshot_without_head_falls_back_with_a_single_warning() {
    let doc = FakeDocument::new(LIVE).serving("<body><header>nav</header></body>");
    let sink = RecordingSink::new();
    let mut inspector = Inspector::new(&doc, &sink, config());

    let session = inspector.resolve();
    assert!(matches!(
        session.resolved().fallback_reason(),
        Some(SnapshotError::MissingHead)
    ));
    assert_eq!(sink.count(Severity::Error), 0);
    assert_eq!(sink.count(Severity::Warn), 1);
}

#[test]
fn resolution_happens_once() {
    let doc = FakeDocument::new(LIVE).serving(SERVED);
    let sink = RecordingSink::new();
    let mut inspector = Inspector::new(&doc, &sink, config());
    assert!(inspector.resolved().is_none());

    let first: *const ResolvedHead = inspector.resolve().resolved();
    let second: *const ResolvedHead = inspector.resolve().resolved();
    assert!(std::ptr::eq(first, second));
    assert_eq!(doc.fetch_count(), 1);
    assert_eq!(doc.requested_urls(), vec![DEFAULT_LOCATION]);
}

#[test]
fn failed_resolution_is_not_retried() {
    let doc = FakeDocument::new(LIVE).failing("offline");
    let sink = RecordingSink::new();
    let mut inspector = Inspector::new(&doc, &sink, config());

    inspector.resolve();
    inspector.resolve();
    assert_eq!(doc.fetch_count(), 1);
    assert_eq!(sink.count(Severity::Warn), 1);
}

#[test]
fn live_document_without_head_markup_still_has_one() {
    let doc = FakeDocument::new("<p>body only</p>").failing("offline");
    let sink = RecordingSink::new();
    let mut inspector = Inspector::new(&doc, &sink, config());

    let session = inspector.resolve();
    assert_eq!(session.head().unwrap().name(), "head");
    assert!(session.head_elements().is_empty());
}

#[test]
fn fallback_transcript_reads_in_order() {
    let doc = FakeDocument::new(LIVE).failing("connection reset");
    let sink = RecordingSink::new();
    let mut inspector = Inspector::new(&doc, &sink, config());
    inspector.resolve();

    assert_lines_eq(
        &[
            "error: [t] An exception occurred while getting the static <head>: | connection reset",
            "warn: [t] Unable to parse the static (server-rendered) <head>. Falling back to \
             document.head | <head><title>Live</title></head>",
        ],
        &sink.transcript(),
    );
}

#[test]
fn static_sessions_still_expose_the_live_head() {
    let doc = FakeDocument::new(LIVE).serving(SERVED);
    let sink = RecordingSink::new();
    let mut inspector = Inspector::new(&doc, &sink, config());
    let session = inspector.resolve();

    assert_eq!(session.config().logging_prefix(), "[t] ");
    let live = session.live_head().unwrap();
    assert!(live.same_node(&doc.head_element()));
    assert!(!live.same_node(&session.head().unwrap()));
}

/// Finds no head in any markup.
struct NoHead;

impl SnapshotIsolation for NoHead {
    fn isolate(&self, _markup: &str) -> Option<(Document, Id)> {
        None
    }
}

#[test]
fn custom_isolation_without_a_head_falls_back() {
    let doc = FakeDocument::new(LIVE).serving(SERVED);
    let sink = RecordingSink::new();
    let mut inspector = Inspector::new(&doc, &sink, config()).with_isolation(NoHead);

    let session = inspector.resolve();
    assert_eq!(session.origin(), Origin::Live);
    assert!(matches!(
        session.resolved().fallback_reason(),
        Some(SnapshotError::MissingHead)
    ));
    assert_eq!(sink.count(Severity::Error), 0);
    assert!(sink.mentions("Falling back to document.head"));
    assert_eq!(inspector.document().fetch_count(), 1);
}

#[test]
fn custom_placeholder_tag_isolates_the_head() {
    let doc = FakeDocument::new(LIVE).serving(SERVED);
    let sink = RecordingSink::new();
    let mut inspector =
        Inspector::new(&doc, &sink, config()).with_isolation(PlaceholderTag::new("Server-Head"));
    assert_eq!(inspector.config().logging_prefix(), "[t] ");

    let session = inspector.resolve();
    let head = session.head().unwrap();
    assert_eq!(head.name(), "server-head");
    assert_eq!(
        head.child_elements().map(|e| e.name()).collect::<Vec<_>>(),
        ["meta", "title"]
    );
}
