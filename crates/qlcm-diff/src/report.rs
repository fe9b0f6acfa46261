//! Text rendering of diff events and the sink the lines are written to.

use qlcm_types::FunctionId;

use crate::event::{DiffEvent, FunctionRef};

const PREVIEW_INDENT: &str = "    ";

/// Receives report lines in emission order.
pub trait ReportSink {
    fn line(&mut self, line: &str);
}

/// A sink that keeps every line in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VecSink {
    pub lines: Vec<String>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl ReportSink for VecSink {
    fn line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// `[id]:(kind):"name"`
pub fn describe_typed(function: &FunctionRef) -> String {
    format!("[{}]:({}):\"{}\"", function.id, function.kind, function.name)
}

/// `[id]:"name"`
pub fn describe_named(function: &FunctionRef) -> String {
    format!("[{}]:\"{}\"", function.id, function.name)
}

fn describe_id(id: Option<FunctionId>) -> String {
    id.map_or_else(|| "[none]".to_string(), |id| format!("[{id}]"))
}

/// Render one event as report lines.
pub fn render_event(event: &DiffEvent) -> Vec<String> {
    match event {
        DiffEvent::LeftOnly { function, .. } => {
            vec!["LEFT ONLY:".into(), format!("  {}", describe_typed(function))]
        }
        DiffEvent::RightOnly { function, .. } => {
            vec!["RIGHT ONLY:".into(), format!("  {}", describe_typed(function))]
        }
        DiffEvent::Matched {
            reference,
            direction,
            candidate,
        } => vec![format!(" -- MATCHED: {reference} {direction} {candidate}")],
        DiffEvent::Possible {
            reference,
            direction,
            candidate,
        } => vec![format!(" -- POSSIBLE: {reference} {direction} {candidate}")],
        DiffEvent::ContentMismatch { function, .. } => {
            vec!["CONTENT:".into(), format!("  {}", describe_typed(function))]
        }
        DiffEvent::IdMismatch { left, right } => {
            vec!["ID:".into(), format!("  [{left}]"), format!("  [{right}]")]
        }
        DiffEvent::KindMismatch { left, right } => vec![
            "TYPE:".into(),
            format!("  {}", describe_typed(left)),
            format!("  {}", describe_typed(right)),
        ],
        DiffEvent::NameMismatch { left, right } => vec![
            "NAME:".into(),
            format!("  {}", describe_named(left)),
            format!("  {}", describe_named(right)),
        ],
        DiffEvent::Preview(preview) => vec![
            format!("{PREVIEW_INDENT}{}", preview.left),
            format!("{PREVIEW_INDENT}{}", preview.right),
        ],
        DiffEvent::Trailing {
            side,
            count,
            last_shared_id,
            last_index,
        } => {
            let index = last_index.map_or_else(|| "-".to_string(), |i| i.to_string());
            vec![format!(
                "*** {side} HAS {count} MORE FUNCTIONS AFTER ID {} (index {index}) ***",
                describe_id(*last_shared_id),
            )]
        }
        DiffEvent::ForkPoint { fork } => match fork {
            Some(fork) => vec![format!(
                "*** FORKED AT: [{}]|[{}] ***",
                fork.left_index, fork.right_index
            )],
            None => vec!["*** NO FORK POINT ***".into()],
        },
    }
}

/// Render every event in order into `sink`.
pub fn write_report<'e>(events: impl IntoIterator<Item = &'e DiffEvent>, sink: &mut dyn ReportSink) {
    for event in events {
        for line in render_event(event) {
            sink.line(&line);
        }
    }
}

/// Render every event in order into a list of lines.
pub fn report_lines<'e>(events: impl IntoIterator<Item = &'e DiffEvent>) -> Vec<String> {
    let mut sink = VecSink::new();
    write_report(events, &mut sink);
    sink.into_lines()
}
