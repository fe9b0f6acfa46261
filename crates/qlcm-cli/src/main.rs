use tracing::Level;

mod cli;
mod commands;
mod config;
mod sink;

fn main() -> anyhow::Result<()> {
    let Some(cli) = cli::parse_args(std::env::args_os())? else {
        return Ok(());
    };

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    commands::run_command(cli)
}
