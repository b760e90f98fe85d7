use inspect::{LogArg, OutputSink, Severity};
use std::cell::RefCell;

/// Owned copy of a [`LogArg`]. Elements keep their outer markup.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Text(String),
    Style(String),
    Number(usize),
    Element(String),
    Payload(serde_json::Value),
}

impl Recorded {
    fn from_arg(arg: &LogArg<'_>) -> Self {
        match arg {
            LogArg::Text(text) => Recorded::Text(text.clone()),
            LogArg::Style(style) => Recorded::Style(style.clone()),
            LogArg::Number(n) => Recorded::Number(*n),
            LogArg::Element(element) => Recorded::Element(element.outer_html()),
            LogArg::Payload(value) => Recorded::Payload(value.clone()),
        }
    }

    fn render(&self) -> String {
        match self {
            Recorded::Text(text) => text.clone(),
            Recorded::Style(style) => format!("[{style}]"),
            Recorded::Number(n) => n.to_string(),
            Recorded::Element(html) => html.clone(),
            Recorded::Payload(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Log {
        severity: Severity,
        args: Vec<Recorded>,
    },
    GroupCollapsed(Vec<Recorded>),
    GroupEnd,
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.borrow().clone()
    }

    /// Log calls only, groups skipped.
    pub fn logs(&self) -> Vec<(Severity, Vec<Recorded>)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Log { severity, args } => Some((*severity, args.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.logs().iter().filter(|(s, _)| *s == severity).count()
    }

    /// True when some log call has a text argument containing `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.logs().iter().any(|(_, args)| {
            args.iter()
                .any(|arg| matches!(arg, Recorded::Text(text) if text.contains(needle)))
        })
    }

    /// One line per event, `severity: arg | arg | ...`, indented inside groups.
    pub fn transcript(&self) -> Vec<String> {
        let mut depth = 0usize;
        let mut lines = Vec::new();
        for event in self.events.borrow().iter() {
            let indent = "  ".repeat(depth);
            match event {
                SinkEvent::Log { severity, args } => {
                    lines.push(format!("{indent}{severity}: {}", join(args)));
                }
                SinkEvent::GroupCollapsed(args) => {
                    lines.push(format!("{indent}group: {}", join(args)));
                    depth += 1;
                }
                SinkEvent::GroupEnd => {
                    depth = depth.saturating_sub(1);
                }
            }
        }
        lines
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

fn join(args: &[Recorded]) -> String {
    args.iter()
        .map(Recorded::render)
        .collect::<Vec<_>>()
        .join(" | ")
}

impl OutputSink for RecordingSink {
    fn log(&self, severity: Severity, args: &[LogArg<'_>]) {
        self.events.borrow_mut().push(SinkEvent::Log {
            severity,
            args: args.iter().map(Recorded::from_arg).collect(),
        });
    }

    fn group_collapsed(&self, args: &[LogArg<'_>]) {
        self.events
            .borrow_mut()
            .push(SinkEvent::GroupCollapsed(args.iter().map(Recorded::from_arg).collect()));
    }

    fn group_end(&self) {
        self.events.borrow_mut().push(SinkEvent::GroupEnd);
    }
}
