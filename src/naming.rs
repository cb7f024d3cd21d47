use serde::Deserialize;

use crate::manifest::{IconSpec, Manifest, ManifestError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Naming {
    /// Leading part of every generated filename (default: "Icon")
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

impl Naming {
    /// Canonical filename for a request.
    ///
    /// Marketing idioms get `{prefix}-AppStore-{px}.png`, everything else
    /// `{prefix}-{points}@{scale}x.png`. Fractional point sizes keep their
    /// decimals (`83.5` stays `83.5`) so no two distinct outputs share a name.
    pub fn filename(&self, spec: &IconSpec, marketing: bool) -> String {
        if marketing {
            format!("{}-AppStore-{}.png", self.prefix, spec.pixels())
        } else {
            // f64 `Display` prints whole values without a fraction and never
            // switches to exponent notation.
            format!("{}-{}@{}x.png", self.prefix, spec.points, spec.scale)
        }
    }
}

fn default_prefix() -> String {
    "Icon".to_string()
}

/// A record left untouched because it lacks `size` or `scale`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub index: usize,
    pub idiom: Option<String>,
    pub missing: &'static str,
}

impl std::fmt::Display for Skipped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Skipping image #{} ({}): missing '{}'",
            self.index,
            self.idiom.as_deref().unwrap_or("no idiom"),
            self.missing
        )
    }
}

/// Fills in `filename` for every record that has both `size` and `scale`.
///
/// Records lacking either are reported back and left as they were. A record
/// whose `size` or `scale` is present but malformed fails the whole pass.
pub fn assign_filenames(
    manifest: &mut Manifest,
    naming: &Naming,
) -> Result<Vec<Skipped>, ManifestError> {
    let mut skipped = Vec::new();

    for (index, entry) in manifest.images.iter_mut().enumerate() {
        match entry.spec()? {
            Some(spec) => {
                let filename = naming.filename(&spec, entry.is_marketing());
                entry.set_filename(filename);
            }
            None => {
                let missing = if entry.size().is_none() { "size" } else { "scale" };
                skipped.push(Skipped {
                    index,
                    idiom: entry.idiom().map(str::to_string),
                    missing,
                });
            }
        }
    }

    Ok(skipped)
}
