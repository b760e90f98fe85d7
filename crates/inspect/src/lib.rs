//! Reconciles a running document's `<head>` with its server-rendered snapshot and reports each
//! element with a weighted, color-coded bar.
//!
//! Flow: build an [`Inspector`] from a [`DocumentAccess`] host, an [`OutputSink`] and an
//! [`InspectorConfig`]; call [`Inspector::resolve`] once to get a [`Session`]; then ask the
//! session for loggable counterparts ([`Session::loggable`]) and log them
//! ([`Session::log_element`], [`Session::log_head_summary`], ...).
pub mod config;
pub mod document;
pub mod error;
pub mod resolver;
pub mod sink;
pub mod validation;
pub mod visualize;

mod logger;
mod matcher;

pub use crate::config::{InspectorConfig, Palette, PaletteError};
pub use crate::document::{DocumentAccess, PlaceholderTag, SnapshotIsolation};
pub use crate::error::{HostError, SnapshotError};
pub use crate::resolver::{Inspector, LiveReason, Origin, ResolvedHead, Session};
pub use crate::sink::{LogArg, LogSink, OutputSink, Severity, render_args};
pub use crate::validation::{CustomValidations, SelectorEntry, ValidationWarning, WeightedElement};
pub use crate::visualize::{ElementVisualization, GLYPH, HeadVisualization, Weight};
