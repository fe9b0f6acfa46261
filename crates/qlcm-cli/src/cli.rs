use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "qlcmerge",
    about = "Report where two versions of a QLC+ workspace diverge",
    version
)]
pub struct Cli {
    /// Workspace file treated as the left side
    pub left: PathBuf,

    /// Workspace file treated as the right side
    pub right: PathBuf,

    /// Characters kept in each divergence preview line
    #[arg(long, value_name = "N")]
    pub preview_width: Option<usize>,

    /// Characters of context shown before the first difference
    #[arg(long, value_name = "N")]
    pub lead_in: Option<usize>,

    /// TOML file with comparison settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Returns `true` for DOS-style help requests such as `/?` or `-?`.
pub fn is_help_token(arg: &str) -> bool {
    arg.strip_suffix('?')
        .is_some_and(|lead| !lead.is_empty() && lead.chars().all(|c| c == '/' || c == '-'))
}

/// Parse the command line.
///
/// Returns `None` when usage, help, or an argument error was printed instead;
/// no comparison should run in that case.
pub fn parse_args<I, T>(args: I) -> anyhow::Result<Option<Cli>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    if args
        .get(1)
        .and_then(|a| a.to_str())
        .is_some_and(is_help_token)
    {
        Cli::command().print_help()?;
        return Ok(None);
    }

    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(e) => {
            e.print()?;
            Ok(None)
        }
    }
}
