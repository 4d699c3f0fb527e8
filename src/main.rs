use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);
    cli::run(cli)
}
