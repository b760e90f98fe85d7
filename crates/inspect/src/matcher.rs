use crate::document::DocumentAccess;
use crate::resolver::{ResolvedHead, Session};
use crate::sink::OutputSink;
use html::{ElementRef, Selector, normalize_fragment};

impl<'s, D: DocumentAccess, S: OutputSink> Session<'s, D, S> {
    /// The element to show in place of `element`: its counterpart in the static head when one
    /// can be told apart, otherwise `element` itself.
    ///
    /// Candidates share `element`'s tag and attributes. With several of them, the first whose
    /// normalized inner markup equals `element`'s wins.
    pub fn loggable<'e>(&self, element: ElementRef<'e>) -> ElementRef<'e>
    where
        's: 'e,
    {
        let ResolvedHead::Static { snapshot, head } = self.head else {
            return element;
        };

        let selector = Selector::for_element(element);
        let candidates = snapshot.query_selector_all(*head, &selector);
        log::trace!(
            target: "headorder.match",
            "{selector}: {} candidate(s)",
            candidates.len()
        );

        match candidates.as_slice() {
            [] => element,
            [only] => *only,
            _ => {
                let wanted = normalize_fragment(&element.inner_html());
                candidates
                    .into_iter()
                    .find(|candidate| normalize_fragment(&candidate.inner_html()) == wanted)
                    .unwrap_or(element)
            }
        }
    }
}
