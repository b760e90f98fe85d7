//! Fakes and fixtures for exercising the inspector without a browser or a network.
pub mod fake_document;
pub mod fixtures;
pub mod recording_sink;

pub use fake_document::{DEFAULT_LOCATION, FakeDocument, FakeFetchError};
pub use fixtures::{ExpectedOrigin, HeadCase, load_cases, parse_cases};
pub use recording_sink::{Recorded, RecordingSink, SinkEvent};

/// Line diff for assertion messages: the first mismatch with two lines of context.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    use std::fmt::Write;

    let missing = "<missing>";
    let longest = expected.len().max(actual.len());
    let first_mismatch = (0..longest).find(|&i| expected.get(i) != actual.get(i));
    let mut out = String::new();
    let Some(i) = first_mismatch else {
        return out;
    };
    let _ = writeln!(&mut out, "first mismatch at line {}:", i + 1);
    for line in i.saturating_sub(2)..(i + 3).min(longest) {
        let marker = if line == i { ">" } else { " " };
        let left = expected.get(line).map(String::as_str).unwrap_or(missing);
        let right = actual.get(line).map(String::as_str).unwrap_or(missing);
        let _ = writeln!(&mut out, "{marker} {:>3} expected: {left}", line + 1);
        let _ = writeln!(&mut out, "{marker} {:>3}   actual: {right}", line + 1);
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

#[track_caller]
pub fn assert_lines_eq(expected: &[&str], actual: &[String]) {
    let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    if expected != actual {
        panic!("transcript mismatch\n{}", diff_lines(&expected, actual));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_reports_first_mismatch() {
        let expected = vec!["a".to_string(), "b".to_string()];
        let actual = vec!["a".to_string(), "c".to_string(), "d".to_string()];
        let diff = diff_lines(&expected, &actual);
        assert!(diff.starts_with("first mismatch at line 2:"), "{diff}");
        assert!(diff.contains("expected 2 lines, actual 3 lines"));
        assert!(diff_lines(&expected, &expected).is_empty());
    }

    #[test]
    fn cases_parse_from_toml() {
        let cases = parse_cases(
            r#"
[[case]]
name = "fallback"
live = "<head><title>t</title></head>"
fetch_error = "offline"
expect_origin = "live"
expect_fallback_warning = true

[case.config]
logging_prefix = "[t] "
"#,
            "inline",
        );
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].expect_origin, ExpectedOrigin::Live);
        assert_eq!(cases[0].config.logging_prefix(), "[t] ");
        assert!(cases[0].config.is_validation_enabled());
    }
}
