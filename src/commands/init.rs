use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::cli::Cli;
use crate::config::Config;
use crate::manifest::Manifest;

pub fn run(cli: &Cli, with_manifest: bool) -> Result<()> {
    let config_path = &cli.config;

    if config_path.exists() {
        bail!(
            "{} already exists. Remove it first or use a different path with --config.",
            config_path.display()
        );
    }

    let config = match cli.asset_dir.as_deref() {
        Some(dir) => Config {
            asset_dir: relative_to_config(config_path, dir)?,
            ..Config::default()
        },
        None => Config::default(),
    };

    let manifest_path = if with_manifest {
        let path = config.manifest_path(config_path, None);
        if path.exists() {
            bail!("{} already exists. Remove it first.", path.display());
        }
        Some(path)
    } else {
        None
    };

    std::fs::write(config_path, Config::template(&config.asset_dir))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("{} Created {}", "✓".green(), config_path.display());

    if let Some(path) = manifest_path {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        Manifest::iphone_template().save(&path)?;
        println!("{} Created {}", "✓".green(), path.display());
    }

    println!("Edit the file to adjust the icon recipe, then run `iconset generate`.");
    Ok(())
}

/// `--asset-dir` is relative to the working directory, the config entry to
/// the config file. Keep it as given when the two agree.
fn relative_to_config(config_path: &Path, dir: &Path) -> Result<PathBuf> {
    let config_dir = config_path.parent().unwrap_or(Path::new(""));
    if dir.is_absolute() || config_dir.as_os_str().is_empty() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    Ok(cwd.join(dir))
}
