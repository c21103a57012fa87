use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sysexits::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use tracklog_lib::{EntryHolder, Repository};

mod entry;
mod output;

#[derive(Parser, Debug)]
#[command(name = "tracklog")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Use this entry file instead of the configured one
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    #[command(flatten)]
    Entry(entry::Command),
    /// Print the sample entry
    Sample,
    /// Back up the entry file
    Backup,
}

fn main() -> ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set up logging: {err}");
    }

    run(Cli::parse())
}

fn run(cli: Cli) -> ExitCode {
    match &cli.command {
        Command::Sample => {
            output::detail(EntryHolder::new().entry());
            ExitCode::Ok
        }
        Command::Entry(cmd) => with_repository(cli.file.as_ref(), |repo| entry::handle(repo, cmd)),
        Command::Backup => with_repository(cli.file.as_ref(), |repo| match repo.backup() {
            Ok(path) => {
                println!("{}", path.display());
                ExitCode::Ok
            }
            Err(err) => output::failure(&err),
        }),
    }
}

/// Open the entry file given on the command line, or the configured one, and run `f` on it.
fn with_repository<F>(file: Option<&PathBuf>, f: F) -> ExitCode
where
    F: FnOnce(&Repository) -> ExitCode,
{
    let repo = match file {
        Some(path) => Repository::open(path),
        None => Repository::new(),
    };

    match repo {
        Ok(repo) => f(&repo),
        Err(err) => output::failure(&err),
    }
}
