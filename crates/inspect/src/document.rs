use crate::error::HostError;
use html::{Document, ElementRef, Id, STATIC_HEAD_TAG, rename_head_tags};

/// The hosting page, as seen by the inspector.
pub trait DocumentAccess {
    /// URL of the current document; the static snapshot is fetched from here.
    fn location(&self) -> &str;

    /// The head of the running document. Only read, never mutated.
    fn live_head(&self) -> Option<ElementRef<'_>>;

    /// Fetches `url` as text. Errors cover network failures and non-success responses alike.
    fn fetch_text(&self, url: &str) -> Result<String, HostError>;
}

impl<T: DocumentAccess + ?Sized> DocumentAccess for &T {
    fn location(&self) -> &str {
        (**self).location()
    }

    fn live_head(&self) -> Option<ElementRef<'_>> {
        (**self).live_head()
    }

    fn fetch_text(&self, url: &str) -> Result<String, HostError> {
        (**self).fetch_text(url)
    }
}

/// Turns fetched page markup into a detached document plus the element standing in for its
/// head.
pub trait SnapshotIsolation {
    fn isolate(&self, markup: &str) -> Option<(Document, Id)>;
}

/// Renames `<head>` to a placeholder tag before parsing, then looks the placeholder up.
///
/// The renamed element is an ordinary element to the parser, so it can never be merged with,
/// or mistaken for, the live document's head.
#[derive(Debug, Clone)]
pub struct PlaceholderTag {
    tag: String,
}

impl PlaceholderTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Default for PlaceholderTag {
    fn default() -> Self {
        Self::new(STATIC_HEAD_TAG)
    }
}

impl SnapshotIsolation for PlaceholderTag {
    fn isolate(&self, markup: &str) -> Option<(Document, Id)> {
        let rewritten = rename_head_tags(markup, &self.tag);
        let snapshot = Document::parse(&rewritten);
        let head = snapshot.find_element(snapshot.root(), &self.tag)?.id();
        Some((snapshot, head))
    }
}
