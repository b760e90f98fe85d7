use html::ElementRef;
use std::cell::Cell;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        })
    }
}

/// One argument of a console-style log call.
///
/// `Text` arguments may contain `%c` directives; each directive consumes the next `Style`
/// argument in order.
#[derive(Debug, Clone)]
pub enum LogArg<'a> {
    Text(String),
    Style(String),
    Number(usize),
    Element(ElementRef<'a>),
    Payload(serde_json::Value),
}

impl LogArg<'_> {
    pub fn text(s: impl Into<String>) -> Self {
        LogArg::Text(s.into())
    }

    pub fn style(s: impl Into<String>) -> Self {
        LogArg::Style(s.into())
    }
}

/// Where inspection output goes. Implementations decide how to render styles and elements.
pub trait OutputSink {
    fn log(&self, severity: Severity, args: &[LogArg<'_>]);
    fn group_collapsed(&self, args: &[LogArg<'_>]);
    fn group_end(&self);
}

impl<T: OutputSink + ?Sized> OutputSink for &T {
    fn log(&self, severity: Severity, args: &[LogArg<'_>]) {
        (**self).log(severity, args)
    }

    fn group_collapsed(&self, args: &[LogArg<'_>]) {
        (**self).group_collapsed(args)
    }

    fn group_end(&self) {
        (**self).group_end()
    }
}

/// Plain-text rendering: `%c` directives and styles are dropped, elements print their start
/// tag, payloads print as JSON.
pub fn render_args(args: &[LogArg<'_>]) -> String {
    let mut out = String::new();
    for arg in args {
        let piece = match arg {
            LogArg::Text(text) => text.replace("%c", ""),
            LogArg::Style(_) => continue,
            LogArg::Number(n) => n.to_string(),
            LogArg::Element(element) => element.start_tag(),
            LogArg::Payload(value) => value.to_string(),
        };
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&piece);
    }
    out
}

/// Sink that forwards to the `log` facade under the `headorder` target, indenting grouped
/// lines.
#[derive(Debug, Default)]
pub struct LogSink {
    depth: Cell<usize>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit(&self, severity: Severity, line: &str) {
        let indent = "  ".repeat(self.depth.get());
        match severity {
            Severity::Info => log::info!(target: "headorder", "{indent}{line}"),
            Severity::Warn => log::warn!(target: "headorder", "{indent}{line}"),
            Severity::Error => log::error!(target: "headorder", "{indent}{line}"),
        }
    }
}

impl OutputSink for LogSink {
    fn log(&self, severity: Severity, args: &[LogArg<'_>]) {
        self.emit(severity, &render_args(args));
    }

    fn group_collapsed(&self, args: &[LogArg<'_>]) {
        self.emit(Severity::Info, &render_args(args));
        self.depth.set(self.depth.get() + 1);
    }

    fn group_end(&self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::Document;

    #[test]
    fn render_drops_styles_and_prints_start_tags() {
        let doc = Document::parse(r#"<meta name="x" content="A">"#);
        let meta = doc.find_element(doc.root(), "meta").unwrap();
        let args = [
            LogArg::text("p: %c\u{2588}\u{2588}"),
            LogArg::style("color: red"),
            LogArg::Number(2),
            LogArg::Element(meta),
            LogArg::Payload(serde_json::json!({"k": 1})),
            LogArg::text("\u{274c} bad order"),
        ];
        assert_eq!(
            render_args(&args),
            "p: \u{2588}\u{2588} 2 <meta name=\"x\" content=\"A\"> {\"k\":1} \u{274c} bad order"
        );
    }

    #[test]
    fn group_depth_never_underflows() {
        let sink = LogSink::new();
        sink.group_end();
        sink.group_collapsed(&[LogArg::text("g")]);
        sink.group_end();
        sink.group_end();
        assert_eq!(sink.depth.get(), 0);
    }
}
