use std::io;

use board_cli::args::{Cli, Command};
use board_cli::{oneshot, CliError, Session, UreqTransport};
use board_core::{BoardApi, BoardClient};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let api = BoardApi::new(BoardClient::new(&cli.base_url), UreqTransport::new());

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            Session::new(api, stdin, stdout).run()
        }
        Command::Posts(posts) => {
            let mut api = api;
            oneshot::run_posts(&mut api, posts.command, &mut io::stdout().lock())
        }
    }
}
