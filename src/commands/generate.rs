use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::Cli;
use crate::composer;
use crate::config::Config;

pub fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    let asset_dir = config.resolve_asset_dir(&cli.config, cli.asset_dir.as_deref());
    std::fs::create_dir_all(&asset_dir)
        .with_context(|| format!("Failed to create {}", asset_dir.display()))?;

    let manifest_path = config.manifest_path(&cli.config, cli.asset_dir.as_deref());
    let report = composer::generate(&manifest_path, &config.naming, &config.recipe)?;

    for skipped in &report.skipped {
        println!("{} {}", "!".yellow(), skipped);
    }

    for target in &report.written {
        println!(
            "  {} {} {}",
            "+".green(),
            target.filename.bold(),
            format!("{0}x{0}", target.pixels).dimmed()
        );
    }

    println!(
        "{} App icons generated in {}",
        "✓".green(),
        asset_dir.display()
    );

    Ok(())
}
