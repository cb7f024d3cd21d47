use anyhow::{bail, Result};
use colored::Colorize;

use crate::cli::Cli;
use crate::composer::{self, FileStatus};
use crate::config::Config;

pub fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    if cli.config.exists() {
        println!("{} Config is valid ({})", "✓".green(), cli.config.display());
    }

    let manifest_path = config.manifest_path(&cli.config, cli.asset_dir.as_deref());
    let report = composer::check(&manifest_path, &config.naming, &config.recipe)?;
    println!(
        "{} Manifest is valid ({})",
        "✓".green(),
        manifest_path.display()
    );

    for skipped in &report.skipped {
        println!("{} {}", "!".yellow(), skipped);
    }

    for drift in &report.drift {
        println!(
            "{} Image #{} filename is {}, expected {}",
            "✗".red(),
            drift.index,
            drift.current.as_deref().unwrap_or("unset"),
            drift.expected
        );
    }

    for file in &report.files {
        let name = &file.target.filename;
        let pixels = file.target.pixels;
        match &file.status {
            FileStatus::UpToDate => {}
            FileStatus::Missing => println!("{} {} is missing", "✗".red(), name),
            FileStatus::WrongSize { width, height } => println!(
                "{} {} is {}x{}, expected {}x{}",
                "✗".red(),
                name,
                width,
                height,
                pixels,
                pixels
            ),
            FileStatus::Stale => println!("{} {} differs from a fresh render", "✗".red(), name),
        }
    }

    if !report.is_up_to_date() {
        bail!("Icon set is out of date. Run `iconset generate` to regenerate it.");
    }

    println!(
        "{} All {} icons are up to date.",
        "✓".green(),
        report.files.len()
    );
    Ok(())
}
