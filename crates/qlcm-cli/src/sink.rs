use colored::{ColoredString, Colorize};
use tracing::debug;

use qlcm_diff::ReportSink;

/// Standard stream a [`ConsoleSink`] writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Writes report lines to a console stream, highlighting section headers.
pub struct ConsoleSink {
    stream: Stream,
}

impl ConsoleSink {
    pub fn new(color: bool, stream: Stream) -> Self {
        if !color {
            colored::control::set_override(false);
        }
        Self { stream }
    }
}

impl ReportSink for ConsoleSink {
    fn line(&mut self, line: &str) {
        debug!(target: "qlcmerge::report", "{line}");
        match self.stream {
            Stream::Stdout => println!("{}", highlight(line)),
            Stream::Stderr => eprintln!("{}", highlight(line)),
        }
    }
}

fn highlight(line: &str) -> ColoredString {
    if line.starts_with("LEFT ONLY") {
        line.red().bold()
    } else if line.starts_with("RIGHT ONLY") {
        line.green().bold()
    } else if line.starts_with(" -- MATCHED") {
        line.cyan()
    } else if line.starts_with(" -- POSSIBLE") {
        line.yellow()
    } else if ["CONTENT:", "ID:", "TYPE:", "NAME:"].contains(&line) {
        line.yellow().bold()
    } else if line.starts_with("***") {
        line.magenta().bold()
    } else {
        line.normal()
    }
}
