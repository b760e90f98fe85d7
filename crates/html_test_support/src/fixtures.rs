use crate::fake_document::FakeDocument;
use inspect::InspectorConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedOrigin {
    Static,
    Live,
}

/// One head-resolution scenario from a TOML fixture file (`[[case]]` tables).
#[derive(Debug, Clone, Deserialize)]
pub struct HeadCase {
    pub name: String,
    pub live: String,
    /// Markup served for the snapshot fetch.
    #[serde(default)]
    pub snapshot: Option<String>,
    /// Fetch failure message; wins over `snapshot`.
    #[serde(default)]
    pub fetch_error: Option<String>,
    #[serde(default)]
    pub config: InspectorConfig,
    pub expect_origin: ExpectedOrigin,
    #[serde(default)]
    pub expect_fallback_warning: bool,
    /// Tag names of the ground-truth head's children, in order.
    #[serde(default)]
    pub expect_head_children: Option<Vec<String>>,
}

impl HeadCase {
    pub fn document(&self) -> FakeDocument {
        let doc = FakeDocument::new(&self.live);
        match (&self.fetch_error, &self.snapshot) {
            (Some(message), _) => doc.failing(message.clone()),
            (None, Some(markup)) => doc.serving(markup.clone()),
            (None, None) => doc,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CaseFile {
    #[serde(rename = "case")]
    cases: Vec<HeadCase>,
}

pub fn parse_cases(content: &str, origin: &str) -> Vec<HeadCase> {
    let file: CaseFile = toml::from_str(content)
        .unwrap_or_else(|err| panic!("failed to parse head cases in {origin}: {err}"));
    assert!(!file.cases.is_empty(), "{origin} declares no cases");
    file.cases
}

pub fn load_cases(path: &Path) -> Vec<HeadCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read head cases {path:?}: {err}"));
    parse_cases(&content, &path.display().to_string())
}
