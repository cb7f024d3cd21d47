//! The icon pipeline: manifest in, PNGs and updated manifest out.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, RgbImage, RgbaImage};

use crate::manifest::Manifest;
use crate::naming::{assign_filenames, Naming, Skipped};
use crate::render::{self, Recipe};

/// One PNG the manifest asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub filename: String,
    pub pixels: u32,
}

#[derive(Debug, Default)]
pub struct GenerateReport {
    pub written: Vec<Target>,
    pub skipped: Vec<Skipped>,
}

/// Renders every icon listed in the manifest at `manifest_path` into the
/// manifest's directory and rewrites the manifest with the derived filenames.
///
/// The manifest is only rewritten once every image has been written.
pub fn generate(manifest_path: &Path, naming: &Naming, recipe: &Recipe) -> Result<GenerateReport> {
    let mut manifest = Manifest::load(manifest_path)?;
    let skipped = assign_filenames(&mut manifest, naming)
        .with_context(|| format!("Invalid image entry in {}", manifest_path.display()))?;
    let targets = targets(&manifest)?;

    let asset_dir = manifest_path.parent().unwrap_or(Path::new("."));
    let master = recipe.render_master();
    let mut renders = Renders::new(&master);

    for target in &targets {
        let path = asset_dir.join(&target.filename);
        renders
            .get(target.pixels)
            .save_with_format(&path, ImageFormat::Png)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    manifest.save(manifest_path)?;

    Ok(GenerateReport {
        written: targets,
        skipped,
    })
}

/// Distinct output files, in manifest order. Records without a filename or
/// without size/scale produce nothing.
pub fn targets(manifest: &Manifest) -> Result<Vec<Target>> {
    let mut seen = BTreeSet::new();
    let mut targets = Vec::new();

    for entry in &manifest.images {
        let (Some(spec), Some(filename)) = (entry.spec()?, entry.filename()) else {
            continue;
        };
        if seen.insert(filename) {
            targets.push(Target {
                filename: filename.to_string(),
                pixels: spec.pixels(),
            });
        }
    }

    Ok(targets)
}

/// Opaque resampled copies of the master, one per edge length.
struct Renders<'a> {
    master: &'a RgbaImage,
    cache: BTreeMap<u32, RgbImage>,
}

impl<'a> Renders<'a> {
    fn new(master: &'a RgbaImage) -> Self {
        Self {
            master,
            cache: BTreeMap::new(),
        }
    }

    fn get(&mut self, pixels: u32) -> &RgbImage {
        let master = self.master;
        self.cache
            .entry(pixels)
            .or_insert_with(|| render::flatten(&render::resample(master, pixels)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    UpToDate,
    Missing,
    WrongSize { width: u32, height: u32 },
    Stale,
}

#[derive(Debug, Clone)]
pub struct FileCheck {
    pub target: Target,
    pub status: FileStatus,
}

/// A record whose `filename` differs from the one `generate` would write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameDrift {
    pub index: usize,
    pub current: Option<String>,
    pub expected: String,
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub files: Vec<FileCheck>,
    pub drift: Vec<FilenameDrift>,
    pub skipped: Vec<Skipped>,
}

impl CheckReport {
    pub fn is_up_to_date(&self) -> bool {
        self.drift.is_empty()
            && self
                .files
                .iter()
                .all(|file| file.status == FileStatus::UpToDate)
    }
}

/// Compares the asset directory against what `generate` would produce,
/// without writing anything.
pub fn check(manifest_path: &Path, naming: &Naming, recipe: &Recipe) -> Result<CheckReport> {
    let on_disk = Manifest::load(manifest_path)?;
    let mut expected = on_disk.clone();
    let skipped = assign_filenames(&mut expected, naming)
        .with_context(|| format!("Invalid image entry in {}", manifest_path.display()))?;

    let drift = on_disk
        .images
        .iter()
        .zip(&expected.images)
        .enumerate()
        .filter_map(|(index, (current, wanted))| {
            let derived = wanted.filename()?;
            (current.filename() != Some(derived)).then(|| FilenameDrift {
                index,
                current: current.filename().map(str::to_string),
                expected: derived.to_string(),
            })
        })
        .collect();

    let asset_dir = manifest_path.parent().unwrap_or(Path::new("."));
    let master = recipe.render_master();
    let mut renders = Renders::new(&master);
    let mut files = Vec::new();

    for target in targets(&expected)? {
        let path = asset_dir.join(&target.filename);
        let status = if !path.exists() {
            FileStatus::Missing
        } else {
            let existing = image::open(&path)
                .with_context(|| format!("Failed to open {}", path.display()))?
                .to_rgb8();
            let fresh = renders.get(target.pixels);
            if existing.dimensions() != fresh.dimensions() {
                FileStatus::WrongSize {
                    width: existing.width(),
                    height: existing.height(),
                }
            } else if render::pixel_hash(&existing) != render::pixel_hash(fresh) {
                FileStatus::Stale
            } else {
                FileStatus::UpToDate
            }
        };
        files.push(FileCheck { target, status });
    }

    Ok(CheckReport {
        files,
        drift,
        skipped,
    })
}
