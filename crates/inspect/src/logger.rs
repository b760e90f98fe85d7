use crate::document::DocumentAccess;
use crate::resolver::Session;
use crate::sink::{LogArg, OutputSink, Severity};
use crate::validation::{SelectorEntry, ValidationWarning, WeightedElement};
use crate::visualize::{ElementVisualization, HeadVisualization, Weight, element_glyph, head_glyphs};
use html::{Document, ElementRef};

const MONOSPACE: &str = "font-family: monospace";
const INHERIT_FONT: &str = "font-family: inherit";
const WARNING_MARK: &str = "\u{274c}";

impl<'s, D: DocumentAccess, S: OutputSink> Session<'s, D, S> {
    pub fn element_glyph(&self, weight: Weight) -> ElementVisualization {
        element_glyph(self.config.palette(), weight)
    }

    pub fn head_glyphs(&self, weights: &[Weight]) -> HeadVisualization {
        head_glyphs(self.config.palette(), weights)
    }

    /// Logs one element with its weight bar, escalating to a warning when validation flags it.
    pub fn log_element(&self, entry: &WeightedElement<'_>) {
        self.emit_element(entry, true);
    }

    /// Builds the element described by `entry.selector` and `entry.inner_html`, swaps in its
    /// static counterpart when there is one, and logs it.
    pub fn log_element_from_selector(&self, entry: &SelectorEntry<'_>) {
        let mut scratch = Document::new();
        let built = scratch
            .create_element_from_selector(entry.selector)
            .map(|id| {
                scratch.set_inner_html(id, entry.inner_html);
                id
            });
        let Some(element) = built.and_then(|id| scratch.element(id)) else {
            self.sink.log(
                Severity::Warn,
                &[LogArg::text(format!(
                    "{}Unable to build an element from selector {:?}",
                    self.config.logging_prefix(),
                    entry.selector
                ))],
            );
            return;
        };
        let element = self.loggable(element);
        self.log_element(&WeightedElement {
            weight: entry.weight,
            element,
            is_valid: entry.is_valid,
            custom_validations: entry.custom_validations.clone(),
        });
    }

    /// Head-level warnings. Silent when validation is disabled.
    pub fn log_validation_warnings(&self, warnings: &[ValidationWarning<'_>]) {
        if !self.config.is_validation_enabled() {
            return;
        }
        let prefix = self.config.logging_prefix();
        for warning in warnings {
            let mut args = vec![LogArg::text(format!("{prefix}{}", warning.warning))];
            args.extend(
                warning
                    .elements
                    .iter()
                    .map(|element| LogArg::Element(self.loggable(*element))),
            );
            if let Some(element) = warning.element {
                args.push(LogArg::Element(element));
            }
            self.sink.log(Severity::Warn, &args);
        }
    }

    /// A collapsed group: the order banner, one line per element, then the head itself.
    pub fn log_head_summary(
        &self,
        group_name: &str,
        head: ElementRef<'_>,
        entries: &[WeightedElement<'_>],
    ) {
        let weights: Vec<Weight> = entries.iter().map(|entry| entry.weight).collect();
        let banner = self.head_glyphs(&weights);

        let mut title = vec![
            LogArg::text(format!(
                "{}{group_name} %chead%c order\n{}",
                self.config.logging_prefix(),
                banner.visual
            )),
            LogArg::style(MONOSPACE),
            LogArg::style(INHERIT_FONT),
        ];
        title.extend(banner.styles.into_iter().map(LogArg::Style));
        self.sink.group_collapsed(&title);

        for entry in entries {
            self.emit_element(entry, false);
        }

        self.sink.log(
            Severity::Info,
            &[
                LogArg::text(format!("{group_name} %chead%c element")),
                LogArg::style(MONOSPACE),
                LogArg::style(INHERIT_FONT),
                LogArg::Element(head),
            ],
        );
        self.sink.group_end();
    }

    fn emit_element(&self, entry: &WeightedElement<'_>, with_prefix: bool) {
        let viz = self.element_glyph(entry.weight);
        let visual = if with_prefix {
            format!("{}{}", self.config.logging_prefix(), viz.visual)
        } else {
            viz.visual
        };
        let mut args = vec![
            LogArg::Text(visual),
            LogArg::Style(viz.style),
            LogArg::Number(usize::from(entry.weight) + 1),
            LogArg::Element(entry.element),
        ];
        let severity = self.annotate(entry, &mut args);
        self.sink.log(severity, &args);
    }

    /// Appends payload and warning annotations and picks the severity. With validation
    /// disabled nothing is appended and the line stays informational.
    fn annotate(&self, entry: &WeightedElement<'_>, args: &mut Vec<LogArg<'_>>) -> Severity {
        if !self.config.is_validation_enabled() {
            return Severity::Info;
        }

        let custom = &entry.custom_validations;
        if let Some(payload) = &custom.payload {
            args.push(LogArg::Payload(payload.clone()));
        }

        if !custom.warnings.is_empty() {
            args.extend(
                custom
                    .warnings
                    .iter()
                    .map(|warning| LogArg::text(format!("{WARNING_MARK} {warning}"))),
            );
            return Severity::Warn;
        }

        if !entry.is_valid && self.flags_invalid_elements() {
            args.push(LogArg::text(format!(
                "{WARNING_MARK} invalid element ({})",
                entry.element.name().to_ascii_uppercase()
            )));
            return Severity::Warn;
        }

        Severity::Info
    }
}
