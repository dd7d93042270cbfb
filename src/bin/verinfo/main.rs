//! verinfo CLI - version metadata generator for .NET builds

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use verinfo::util::Shell;

fn main() {
    if let Err(e) = run() {
        if e.downcast_ref::<commands::AlreadyReported>().is_none() {
            eprintln!("error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("verinfo=debug")
    } else {
        EnvFilter::new("verinfo=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = |json: bool| Shell::from_flags(cli.quiet, cli.verbose, cli.color, json);

    match cli.command {
        Commands::Generate(args) => {
            let shell = shell(args.message_format == cli::MessageFormat::Json);
            commands::generate::execute(args, &shell)
        }
        Commands::Languages(args) => {
            let shell = shell(args.message_format == cli::MessageFormat::Json);
            commands::languages::execute(args, &shell)
        }
        Commands::KeyInfo(args) => {
            let shell = shell(args.message_format == cli::MessageFormat::Json);
            commands::key_info::execute(args, &shell)
        }
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
