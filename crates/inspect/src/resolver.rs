use crate::config::InspectorConfig;
use crate::document::{DocumentAccess, PlaceholderTag, SnapshotIsolation};
use crate::error::SnapshotError;
use crate::sink::{LogArg, OutputSink, Severity};
use html::{Document, ElementRef, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The server-rendered head, reparsed off-screen.
    Static,
    /// The running document's head.
    Live,
}

#[derive(Debug)]
pub enum LiveReason {
    PrefersDynamicAssessment,
    Fallback(SnapshotError),
}

/// Outcome of head resolution. Fixed for the rest of the session once produced.
#[derive(Debug)]
pub enum ResolvedHead {
    Static { snapshot: Document, head: Id },
    Live { reason: LiveReason },
}

impl ResolvedHead {
    pub fn origin(&self) -> Origin {
        match self {
            ResolvedHead::Static { .. } => Origin::Static,
            ResolvedHead::Live { .. } => Origin::Live,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, ResolvedHead::Static { .. })
    }

    pub fn fallback_reason(&self) -> Option<&SnapshotError> {
        match self {
            ResolvedHead::Live {
                reason: LiveReason::Fallback(err),
            } => Some(err),
            _ => None,
        }
    }
}

/// Owns the host collaborators and the (once) resolved head.
pub struct Inspector<D, S> {
    document: D,
    sink: S,
    config: InspectorConfig,
    isolation: Box<dyn SnapshotIsolation>,
    head: Option<ResolvedHead>,
}

impl<D: DocumentAccess, S: OutputSink> Inspector<D, S> {
    pub fn new(document: D, sink: S, config: InspectorConfig) -> Self {
        Self {
            document,
            sink,
            config,
            isolation: Box::new(PlaceholderTag::default()),
            head: None,
        }
    }

    /// Swaps the strategy that turns fetched markup into a static head.
    pub fn with_isolation(mut self, isolation: impl SnapshotIsolation + 'static) -> Self {
        self.isolation = Box::new(isolation);
        self
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    pub fn resolved(&self) -> Option<&ResolvedHead> {
        self.head.as_ref()
    }

    /// Resolves the head on first call and hands out a session bound to it.
    ///
    /// Later calls reuse the first result: the snapshot is fetched at most once per inspector.
    pub fn resolve(&mut self) -> Session<'_, D, S> {
        let Self {
            document,
            sink,
            config,
            isolation,
            head,
        } = self;
        let (document, sink, config) = (&*document, &*sink, &*config);
        let head =
            head.get_or_insert_with(|| resolve_head(document, sink, config, isolation.as_ref()));
        Session {
            document,
            sink,
            config,
            head: &*head,
        }
    }
}

fn resolve_head<D: DocumentAccess, S: OutputSink>(
    document: &D,
    sink: &S,
    config: &InspectorConfig,
    isolation: &dyn SnapshotIsolation,
) -> ResolvedHead {
    if config.prefers_dynamic_assessment() {
        log::debug!(
            target: "headorder.resolve",
            "dynamic assessment preferred, using the live head"
        );
        return ResolvedHead::Live {
            reason: LiveReason::PrefersDynamicAssessment,
        };
    }

    match fetch_static_head(document, isolation) {
        Ok((snapshot, head)) => {
            log::debug!(
                target: "headorder.resolve",
                "static head resolved from {} ({} nodes)",
                document.location(),
                snapshot.len()
            );
            ResolvedHead::Static { snapshot, head }
        }
        Err(err) => {
            let prefix = config.logging_prefix();
            if let SnapshotError::Fetch(source) = &err {
                sink.log(
                    Severity::Error,
                    &[
                        LogArg::text(format!(
                            "{prefix}An exception occurred while getting the static <head>:"
                        )),
                        LogArg::text(source.to_string()),
                    ],
                );
            }
            let mut args = vec![LogArg::text(format!(
                "{prefix}Unable to parse the static (server-rendered) <head>. Falling back to document.head"
            ))];
            if let Some(live) = document.live_head() {
                args.push(LogArg::Element(live));
            }
            sink.log(Severity::Warn, &args);
            log::debug!(target: "headorder.resolve", "falling back to the live head: {err}");
            ResolvedHead::Live {
                reason: LiveReason::Fallback(err),
            }
        }
    }
}

fn fetch_static_head<D: DocumentAccess>(
    document: &D,
    isolation: &dyn SnapshotIsolation,
) -> Result<(Document, Id), SnapshotError> {
    let markup = document
        .fetch_text(document.location())
        .map_err(SnapshotError::Fetch)?;
    isolation
        .isolate(&markup)
        .ok_or(SnapshotError::MissingHead)
}

/// A resolved inspection session. Every match and log line goes through the same head.
pub struct Session<'s, D, S> {
    pub(crate) document: &'s D,
    pub(crate) sink: &'s S,
    pub(crate) config: &'s InspectorConfig,
    pub(crate) head: &'s ResolvedHead,
}

impl<D, S> Clone for Session<'_, D, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D, S> Copy for Session<'_, D, S> {}

impl<'s, D: DocumentAccess, S: OutputSink> Session<'s, D, S> {
    pub fn origin(&self) -> Origin {
        self.head.origin()
    }

    pub fn resolved(&self) -> &'s ResolvedHead {
        self.head
    }

    pub fn config(&self) -> &'s InspectorConfig {
        self.config
    }

    /// The head treated as ground truth: the static snapshot's, or the live one.
    pub fn head(&self) -> Option<ElementRef<'s>> {
        match self.head {
            ResolvedHead::Static { snapshot, head } => snapshot.element(*head),
            ResolvedHead::Live { .. } => self.document.live_head(),
        }
    }

    pub fn live_head(&self) -> Option<ElementRef<'s>> {
        self.document.live_head()
    }

    /// Children of the ground-truth head, in document order.
    pub fn head_elements(&self) -> Vec<ElementRef<'s>> {
        self.head()
            .map(|head| head.child_elements().collect())
            .unwrap_or_default()
    }

    /// Whether invalid elements should be flagged: only when the head in use is the one the
    /// caller asked for (the static snapshot, or the live head by preference), not a fallback.
    pub(crate) fn flags_invalid_elements(&self) -> bool {
        match self.head {
            ResolvedHead::Static { .. } => true,
            ResolvedHead::Live { reason } => matches!(reason, LiveReason::PrefersDynamicAssessment),
        }
    }
}
