use html::{Document, ElementRef, Id};
use inspect::{DocumentAccess, HostError};
use std::cell::{Cell, RefCell};
use std::fmt;

pub const DEFAULT_LOCATION: &str = "https://example.test/page";

#[derive(Debug, Clone)]
pub struct FakeFetchError(pub String);

impl fmt::Display for FakeFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for FakeFetchError {}

#[derive(Debug, Clone)]
enum Response {
    Markup(String),
    Error(String),
}

/// Scripted host page: a parsed live document plus a canned response for the snapshot fetch.
#[derive(Debug)]
pub struct FakeDocument {
    location: String,
    live: Document,
    head: Id,
    response: Response,
    fetches: Cell<usize>,
    requested: RefCell<Vec<String>>,
}

impl FakeDocument {
    /// Parses `live_markup` as the running document. Fetches fail until a response is set.
    pub fn new(live_markup: &str) -> Self {
        let mut live = Document::parse(live_markup);
        let head = live.ensure_head();
        Self {
            location: DEFAULT_LOCATION.to_string(),
            live,
            head,
            response: Response::Error("no response scripted".to_string()),
            fetches: Cell::new(0),
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn serving(mut self, markup: impl Into<String>) -> Self {
        self.response = Response::Markup(markup.into());
        self
    }

    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.response = Response::Error(message.into());
        self
    }

    pub fn live(&self) -> &Document {
        &self.live
    }

    pub fn head_element(&self) -> ElementRef<'_> {
        self.live
            .element(self.head)
            .expect("ensure_head always yields an element")
    }

    /// Live head children in document order.
    pub fn head_children(&self) -> Vec<ElementRef<'_>> {
        self.head_element().child_elements().collect()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl DocumentAccess for FakeDocument {
    fn location(&self) -> &str {
        &self.location
    }

    fn live_head(&self) -> Option<ElementRef<'_>> {
        self.live.element(self.head)
    }

    fn fetch_text(&self, url: &str) -> Result<String, HostError> {
        self.fetches.set(self.fetches.get() + 1);
        self.requested.borrow_mut().push(url.to_string());
        match &self.response {
            Response::Markup(markup) => Ok(markup.clone()),
            Response::Error(message) => Err(Box::new(FakeFetchError(message.clone()))),
        }
    }
}
