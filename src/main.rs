use anyhow::Result;
use clap::Parser;
use iconset::cli::{Cli, Commands};
use iconset::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        None | Some(Commands::Generate) => commands::generate::run(&cli),
        Some(Commands::Check) => commands::check::run(&cli),
        Some(Commands::Init { manifest }) => commands::init::run(&cli, *manifest),
    }
}
