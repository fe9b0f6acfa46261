use std::path::Path;

use serde::Serialize;
use tracing::info;

use qlcm_diff::{align, report_lines, write_report, AlignmentOutcome, Comparison, ReportSink};
use qlcm_doc::{load_sequence, DocError};
use qlcm_types::FunctionSequence;

use crate::cli::{Cli, OutputFormat};
use crate::config::CompareConfig;
use crate::sink::{ConsoleSink, Stream};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    let mut notices = ConsoleSink::new(!cli.no_color, notice_stream(cli.format));

    let Some(comparison) = compare_files(&cli.left, &cli.right, &config, &mut notices) else {
        return Ok(());
    };

    match cli.format {
        OutputFormat::Text => write_report(&comparison.events, &mut notices),
        OutputFormat::Json => println!("{}", json_report(&cli.left, &cli.right, &comparison)?),
    }
    Ok(())
}

/// Load notices share stdout with the text report but must stay out of a
/// JSON document.
fn notice_stream(format: OutputFormat) -> Stream {
    match format {
        OutputFormat::Text => Stream::Stdout,
        OutputFormat::Json => Stream::Stderr,
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<CompareConfig> {
    let base = match &cli.config {
        Some(path) => CompareConfig::load(path)?,
        None => CompareConfig::default(),
    };
    base.with_overrides(cli.preview_width, cli.lead_in)
}

/// Load both files and align them.
///
/// Problems with the inputs are reported to `sink` and yield `None`: missing
/// files are reported before anything is parsed, and both files are parsed
/// before giving up on an invalid one.
pub fn compare_files(
    left: &Path,
    right: &Path,
    config: &CompareConfig,
    sink: &mut dyn ReportSink,
) -> Option<Comparison> {
    let mut missing = false;
    for path in [left, right] {
        if !path.is_file() {
            sink.line(&format!("Missing '{}'", path.display()));
            missing = true;
        }
    }
    if missing {
        return None;
    }

    let left_functions = load_side(left, sink);
    let right_functions = load_side(right, sink);
    let (left_functions, right_functions) = match (left_functions, right_functions) {
        (Loaded::Functions(l), Loaded::Functions(r)) => (l, r),
        (Loaded::Invalid, _) | (_, Loaded::Invalid) => return None,
        _ => {
            sink.line("Could not find functions in one or both of the files");
            return None;
        }
    };

    info!(
        left = left_functions.len(),
        right = right_functions.len(),
        "comparing function lists"
    );
    Some(align(&left_functions, &right_functions, &config.preview))
}

enum Loaded {
    Functions(FunctionSequence),
    NoFunctions,
    Invalid,
}

fn load_side(path: &Path, sink: &mut dyn ReportSink) -> Loaded {
    match load_sequence(path) {
        Ok(functions) => Loaded::Functions(functions),
        Err(e) if e.is_structural() => Loaded::NoFunctions,
        Err(DocError::InvalidXml(e)) => {
            sink.line(&format!("<{}> Not a valid XML document: {e}", path.display()));
            Loaded::Invalid
        }
        Err(e) => {
            sink.line(&format!("<{}> Could not be read: {e}", path.display()));
            Loaded::Invalid
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    left: &'a Path,
    right: &'a Path,
    outcome: &'a AlignmentOutcome,
    report: Vec<String>,
}

pub fn json_report(left: &Path, right: &Path, comparison: &Comparison) -> anyhow::Result<String> {
    let report = JsonReport {
        left,
        right,
        outcome: &comparison.outcome,
        report: report_lines(&comparison.events),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
