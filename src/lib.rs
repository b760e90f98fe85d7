//! `<head>` order inspection for server-rendered pages.
//!
//! [`PageDocument`] is the host for pages fetched over HTTP; any other host implements
//! [`DocumentAccess`] itself. See the `inspect` crate for the resolution and logging flow.
use std::fmt;

pub use html::{Document, ElementRef, Selector, normalize_fragment};
pub use inspect::{
    CustomValidations, DocumentAccess, HostError, Inspector, InspectorConfig, LogArg, LogSink,
    Origin, OutputSink, Palette, ResolvedHead, SelectorEntry, Session, Severity, SnapshotError,
    ValidationWarning, Weight, WeightedElement,
};
pub use net::NetError;

#[derive(Debug)]
pub enum PageError {
    Url(url::ParseError),
    Net(NetError),
    NotHtml {
        url: String,
        content_type: Option<String>,
    },
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::Url(err) => write!(f, "invalid page url: {err}"),
            PageError::Net(err) => write!(f, "{err}"),
            PageError::NotHtml { url, content_type } => write!(
                f,
                "{url} is not an HTML document (content type {})",
                content_type.as_deref().unwrap_or("missing")
            ),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PageError::Url(err) => Some(err),
            PageError::Net(err) => Some(err),
            PageError::NotHtml { .. } => None,
        }
    }
}

impl From<url::ParseError> for PageError {
    fn from(err: url::ParseError) -> Self {
        PageError::Url(err)
    }
}

impl From<NetError> for PageError {
    fn from(err: NetError) -> Self {
        PageError::Net(err)
    }
}

/// A page addressed by URL: its parsed live markup, and HTTP for the snapshot fetch.
#[derive(Debug)]
pub struct PageDocument {
    url: url::Url,
    dom: Document,
    head: html::Id,
}

impl PageDocument {
    /// Wraps markup already in hand. A missing head is created, like a browser would.
    pub fn new(url: &str, live_markup: &str) -> Result<Self, PageError> {
        let url = url::Url::parse(url)?;
        let mut dom = Document::parse(live_markup);
        let head = dom.ensure_head();
        Ok(Self { url, dom, head })
    }

    /// Downloads the page and uses the response as the live document.
    pub fn fetch(url: &str) -> Result<Self, PageError> {
        let page = fetch_html(url)?;
        Self::new(&page.url, &page.body)
    }

    pub fn url(&self) -> &url::Url {
        &self.url
    }

    pub fn dom(&self) -> &Document {
        &self.dom
    }
}

fn fetch_html(url: &str) -> Result<net::FetchResult, PageError> {
    let page = net::fetch_text(url)?;
    log::debug!(
        target: "headorder",
        "fetched {} for {} (HTTP {}, {} ms)",
        page.url,
        page.requested_url,
        page.status,
        page.duration_ms
    );
    if !html::is_html(page.content_type.as_deref()) {
        return Err(PageError::NotHtml {
            url: page.url,
            content_type: page.content_type,
        });
    }
    Ok(page)
}

impl DocumentAccess for PageDocument {
    fn location(&self) -> &str {
        self.url.as_str()
    }

    fn live_head(&self) -> Option<ElementRef<'_>> {
        self.dom.element(self.head)
    }

    fn fetch_text(&self, url: &str) -> Result<String, HostError> {
        Ok(fetch_html(url)?.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_location_is_the_normalized_url() {
        let page = PageDocument::new("HTTPS://Example.test", "<head></head>").unwrap();
        assert_eq!(page.location(), "https://example.test/");
    }

    #[test]
    fn relative_urls_are_rejected() {
        let err = PageDocument::new("/relative", "").unwrap_err();
        assert!(matches!(err, PageError::Url(_)));
    }

    #[test]
    fn live_head_is_always_present() {
        let page = PageDocument::new("https://example.test/", "<p>hi</p>").unwrap();
        let head = page.live_head().unwrap();
        assert_eq!(head.name(), "head");
        assert_eq!(head.inner_html(), "");
    }

    #[test]
    fn not_html_error_names_the_content_type() {
        let err = PageError::NotHtml {
            url: "https://example.test/a.json".into(),
            content_type: Some("application/json".into()),
        };
        assert_eq!(
            err.to_string(),
            "https://example.test/a.json is not an HTML document (content type application/json)"
        );
    }
}
