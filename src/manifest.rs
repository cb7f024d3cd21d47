use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const MANIFEST_NAME: &str = "Contents.json";

/// Largest edge length, in pixels, a request may ask for.
pub const MAX_PIXELS: u32 = 4096;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Missing Contents.json at {}", .0.display())]
    Missing(PathBuf),

    #[error("Failed to parse {}", .path.display())]
    Unparsable {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid size '{0}': expected \"WxH\" in points")]
    InvalidSize(String),

    #[error("invalid scale '{0}': expected \"Nx\" with a positive integer N")]
    InvalidScale(String),

    #[error("size '{0}' is not square")]
    NotSquare(String),

    #[error("size '{size}' at scale '{scale}' yields an empty icon")]
    EmptyIcon { size: String, scale: String },

    #[error("size '{size}' at scale '{scale}' exceeds {max} pixels", max = MAX_PIXELS)]
    TooLarge { size: String, scale: String },
}

/// The `Contents.json` of an `.appiconset`. Keys the composer does not know
/// about are carried through `extra` in their original order.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Manifest {
    #[serde(default)]
    pub images: Vec<IconRequest>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A known string key of a request. `None` is an absent key, `Some(None)` an
/// explicit `null`. Both read as missing; only the latter is written back.
pub type Field = Option<Option<String>>;

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct IconRequest {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub filename: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub idiom: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub scale: Field,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub size: Field,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Field, D::Error> {
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Parsed `size` and `scale` of a request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconSpec {
    /// Edge length in points.
    pub points: f64,
    pub scale: u32,
}

impl IconSpec {
    /// Edge length of the rendered PNG.
    pub fn pixels(&self) -> u32 {
        (self.points * f64::from(self.scale)).round() as u32
    }
}

impl IconRequest {
    pub fn new(idiom: &str, size: &str, scale: &str) -> Self {
        Self {
            idiom: Some(Some(idiom.to_string())),
            size: Some(Some(size.to_string())),
            scale: Some(Some(scale.to_string())),
            ..Self::default()
        }
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_ref().and_then(|value| value.as_deref())
    }

    pub fn idiom(&self) -> Option<&str> {
        self.idiom.as_ref().and_then(|value| value.as_deref())
    }

    pub fn size(&self) -> Option<&str> {
        self.size.as_ref().and_then(|value| value.as_deref())
    }

    pub fn scale(&self) -> Option<&str> {
        self.scale.as_ref().and_then(|value| value.as_deref())
    }

    pub fn set_filename(&mut self, filename: String) {
        self.filename = Some(Some(filename));
    }

    /// `Ok(None)` when `size` or `scale` is absent or null; such records are
    /// skipped. Present but malformed values are an error.
    pub fn spec(&self) -> Result<Option<IconSpec>, ManifestError> {
        let (Some(size), Some(scale)) = (self.size(), self.scale()) else {
            return Ok(None);
        };

        let points = parse_size(size)?;
        let scale_factor = parse_scale(scale)?;

        let edge = points * f64::from(scale_factor);
        if !edge.is_finite() || edge.round() > f64::from(MAX_PIXELS) {
            return Err(ManifestError::TooLarge {
                size: size.to_string(),
                scale: scale.to_string(),
            });
        }

        let spec = IconSpec {
            points,
            scale: scale_factor,
        };

        if spec.pixels() == 0 {
            return Err(ManifestError::EmptyIcon {
                size: size.to_string(),
                scale: scale.to_string(),
            });
        }

        Ok(Some(spec))
    }

    pub fn is_marketing(&self) -> bool {
        self.idiom().is_some_and(|idiom| idiom.ends_with("marketing"))
    }
}

/// Parses `"WxH"` and returns `W`. Both sides must be equal.
pub fn parse_size(size: &str) -> Result<f64, ManifestError> {
    let invalid = || ManifestError::InvalidSize(size.to_string());

    let lowered = size.trim().to_ascii_lowercase();
    let (w, h) = lowered.split_once('x').ok_or_else(invalid)?;
    let w: f64 = w.trim().parse().map_err(|_| invalid())?;
    let h: f64 = h.trim().parse().map_err(|_| invalid())?;

    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(invalid());
    }
    if w != h {
        return Err(ManifestError::NotSquare(size.to_string()));
    }

    Ok(w)
}

/// Parses `"Nx"` into `N`.
pub fn parse_scale(scale: &str) -> Result<u32, ManifestError> {
    let trimmed = scale.trim();
    let digits = trimmed
        .strip_suffix('x')
        .or_else(|| trimmed.strip_suffix('X'))
        .unwrap_or(trimmed);

    match digits.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ManifestError::InvalidScale(scale.to_string())),
    }
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ManifestError::Missing(path.to_path_buf()).into());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let manifest = serde_json::from_str(&content).map_err(|source| {
            ManifestError::Unparsable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(manifest)
    }

    /// Writes through a temporary file in the same directory so an
    /// interrupted run never leaves a truncated manifest behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');

        let dir = path.parent().unwrap_or(Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        if let Ok(meta) = std::fs::metadata(path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .with_context(|| format!("Failed to copy permissions of {}", path.display()))?;
        }
        tmp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tmp.persist(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Starter manifest covering the iPhone home screen, settings,
    /// spotlight, notification and App Store slots.
    pub fn iphone_template() -> Self {
        let entries: &[(&str, &str, &str)] = &[
            ("iphone", "20x20", "2x"),
            ("iphone", "20x20", "3x"),
            ("iphone", "29x29", "2x"),
            ("iphone", "29x29", "3x"),
            ("iphone", "40x40", "2x"),
            ("iphone", "40x40", "3x"),
            ("iphone", "60x60", "2x"),
            ("iphone", "60x60", "3x"),
            ("ios-marketing", "1024x1024", "1x"),
        ];

        let images = entries
            .iter()
            .map(|(idiom, size, scale)| IconRequest::new(idiom, size, scale))
            .collect();

        let mut info = Map::new();
        info.insert("author".into(), Value::from("xcode"));
        info.insert("version".into(), Value::from(1));
        let mut extra = Map::new();
        extra.insert("info".into(), Value::Object(info));

        Self { images, extra }
    }
}
