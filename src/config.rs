use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::manifest::MANIFEST_NAME;
use crate::naming::Naming;
use crate::render::Recipe;

pub const CONFIG_NAME: &str = "iconset.toml";

#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The `.appiconset` directory, relative to the config file
    #[serde(default = "default_asset_dir")]
    pub asset_dir: PathBuf,

    #[serde(default)]
    pub naming: Naming,

    #[serde(default)]
    pub recipe: Recipe,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_dir: default_asset_dir(),
            naming: Naming::default(),
            recipe: Recipe::default(),
        }
    }
}

fn default_asset_dir() -> PathBuf {
    PathBuf::from("Run-C/Assets.xcassets/AppIcon.appiconset")
}

impl Config {
    /// Reads `path` if it exists; a missing config file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// The asset directory: `override_dir` when given, otherwise
    /// `asset_dir` resolved against the directory holding the config file.
    pub fn resolve_asset_dir(&self, config_path: &Path, override_dir: Option<&Path>) -> PathBuf {
        if let Some(dir) = override_dir {
            return dir.to_path_buf();
        }
        let config_dir = config_path.parent().unwrap_or(Path::new("."));
        config_dir.join(&self.asset_dir)
    }

    pub fn manifest_path(&self, config_path: &Path, override_dir: Option<&Path>) -> PathBuf {
        self.resolve_asset_dir(config_path, override_dir).join(MANIFEST_NAME)
    }

    /// Commented config file pointing at `asset_dir`.
    pub fn template(asset_dir: &Path) -> String {
        let asset_dir = toml::Value::String(asset_dir.to_string_lossy().into_owned());
        format!(
            r#"# iconset configuration

# Directory of the app icon set, relative to this file.
# Contents.json inside it lists the sizes to generate.
asset_dir = {asset_dir}

# File naming
# [naming]
# prefix = "Icon"      # Icon-60@2x.png, Icon-AppStore-1024.png

# Icon recipe
# [recipe]
# top_color = [10, 132, 255]     # gradient, first row
# bottom_color = [0, 96, 223]    # gradient, last row
# foreground = [255, 255, 255]   # glyph colour
# gloss = true                   # soft highlight near the top-left
# shadow = true                  # drop shadow beneath the glyph
"#
        )
    }
}
