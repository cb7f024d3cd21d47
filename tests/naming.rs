use std::collections::BTreeMap;

use iconset::manifest::{IconRequest, IconSpec, Manifest, ManifestError};
use iconset::naming::{assign_filenames, Naming};

fn entry(idiom: &str, size: &str, scale: &str) -> IconRequest {
    IconRequest::new(idiom, size, scale)
}

fn manifest(images: Vec<IconRequest>) -> Manifest {
    Manifest {
        images,
        ..Default::default()
    }
}

/// Every size slot Xcode lists for a universal iOS + macOS + watchOS icon.
fn universal_manifest() -> Manifest {
    let slots: &[(&str, &str, &str)] = &[
        ("iphone", "20x20", "2x"),
        ("iphone", "20x20", "3x"),
        ("iphone", "29x29", "2x"),
        ("iphone", "29x29", "3x"),
        ("iphone", "40x40", "2x"),
        ("iphone", "40x40", "3x"),
        ("iphone", "60x60", "2x"),
        ("iphone", "60x60", "3x"),
        ("ipad", "20x20", "1x"),
        ("ipad", "20x20", "2x"),
        ("ipad", "29x29", "1x"),
        ("ipad", "29x29", "2x"),
        ("ipad", "40x40", "1x"),
        ("ipad", "40x40", "2x"),
        ("ipad", "76x76", "1x"),
        ("ipad", "76x76", "2x"),
        ("ipad", "83.5x83.5", "2x"),
        ("ios-marketing", "1024x1024", "1x"),
        ("mac", "16x16", "1x"),
        ("mac", "16x16", "2x"),
        ("mac", "32x32", "1x"),
        ("mac", "32x32", "2x"),
        ("mac", "128x128", "1x"),
        ("mac", "128x128", "2x"),
        ("mac", "256x256", "1x"),
        ("mac", "256x256", "2x"),
        ("mac", "512x512", "1x"),
        ("mac", "512x512", "2x"),
        ("watch", "24x24", "2x"),
        ("watch", "27.5x27.5", "2x"),
        ("watch", "86x86", "2x"),
        ("watch", "98x98", "2x"),
        ("watch-marketing", "1024x1024", "1x"),
    ];
    manifest(
        slots
            .iter()
            .map(|(idiom, size, scale)| entry(idiom, size, scale))
            .collect(),
    )
}

#[test]
fn marketing_gets_reserved_name() {
    let naming = Naming::default();
    let spec = IconSpec {
        points: 1024.0,
        scale: 1,
    };
    assert_eq!(naming.filename(&spec, true), "Icon-AppStore-1024.png");
    assert_eq!(naming.filename(&spec, false), "Icon-1024@1x.png");
}

#[test]
fn regular_name_encodes_points_and_scale() {
    let naming = Naming::default();
    let spec = IconSpec {
        points: 60.0,
        scale: 2,
    };
    assert_eq!(naming.filename(&spec, false), "Icon-60@2x.png");

    let spec = IconSpec {
        points: 83.5,
        scale: 2,
    };
    assert_eq!(naming.filename(&spec, false), "Icon-83.5@2x.png");
}

#[test]
fn large_point_sizes_keep_distinct_names() {
    let naming = Naming::default();
    let smaller = IconSpec {
        points: 1e20,
        scale: 1,
    };
    let larger = IconSpec {
        points: 1e21,
        scale: 1,
    };
    assert_eq!(
        naming.filename(&smaller, false),
        "Icon-100000000000000000000@1x.png"
    );
    assert_eq!(
        naming.filename(&larger, false),
        "Icon-1000000000000000000000@1x.png"
    );

    // Such sizes never reach naming through a manifest.
    let mut manifest = manifest(vec![
        entry("iphone", "1e20x1e20", "1x"),
        entry("iphone", "1e21x1e21", "1x"),
    ]);
    let err = assign_filenames(&mut manifest, &naming).unwrap_err();
    assert!(matches!(err, ManifestError::TooLarge { .. }));
    assert!(manifest.images.iter().all(|image| image.filename().is_none()));
}

#[test]
fn custom_prefix() {
    let naming = Naming {
        prefix: "AppIcon".into(),
    };
    let spec = IconSpec {
        points: 40.0,
        scale: 3,
    };
    assert_eq!(naming.filename(&spec, false), "AppIcon-40@3x.png");
}

#[test]
fn assign_fills_every_valid_record() {
    let mut manifest = universal_manifest();
    let skipped = assign_filenames(&mut manifest, &Naming::default()).unwrap();

    assert!(skipped.is_empty());
    assert!(manifest.images.iter().all(|image| image.filename().is_some()));
    assert_eq!(
        manifest.images[17].filename(),
        Some("Icon-AppStore-1024.png")
    );
}

#[test]
fn filenames_are_collision_free() {
    let mut manifest = universal_manifest();
    assign_filenames(&mut manifest, &Naming::default()).unwrap();

    // A shared filename must always mean the same pixel dimensions.
    let mut by_name: BTreeMap<String, u32> = BTreeMap::new();
    for image in &manifest.images {
        let pixels = image.spec().unwrap().unwrap().pixels();
        let name = image.filename().unwrap().to_string();
        let previous = by_name.insert(name.clone(), pixels);
        if let Some(previous) = previous {
            assert_eq!(previous, pixels, "{} maps to two sizes", name);
        }
    }

    // iPhone and iPad 40@2x share a file; everything else is distinct.
    assert!(by_name.contains_key("Icon-40@2x.png"));
    assert!(by_name.contains_key("Icon-27.5@2x.png"));
    assert!(by_name.len() < manifest.images.len());
}

#[test]
fn filenames_are_deterministic() {
    let mut first = universal_manifest();
    let mut second = universal_manifest();
    assign_filenames(&mut first, &Naming::default()).unwrap();
    assign_filenames(&mut second, &Naming::default()).unwrap();
    assert_eq!(first, second);

    // Re-running over already named records changes nothing.
    let snapshot = first.clone();
    assign_filenames(&mut first, &Naming::default()).unwrap();
    assert_eq!(first, snapshot);
}

#[test]
fn records_missing_fields_are_skipped() {
    let mut no_scale = entry("iphone", "60x60", "2x");
    no_scale.scale = None;
    let mut no_size = entry("ipad", "76x76", "2x");
    no_size.size = None;
    no_size.set_filename("keep-me.png".into());

    let mut manifest = manifest(vec![entry("iphone", "20x20", "2x"), no_scale, no_size]);
    let skipped = assign_filenames(&mut manifest, &Naming::default()).unwrap();

    assert_eq!(skipped.len(), 2);
    assert_eq!(skipped[0].index, 1);
    assert_eq!(skipped[0].missing, "scale");
    assert_eq!(skipped[1].index, 2);
    assert_eq!(skipped[1].missing, "size");
    assert_eq!(
        skipped[0].to_string(),
        "Skipping image #1 (iphone): missing 'scale'"
    );

    assert_eq!(manifest.images[0].filename(), Some("Icon-20@2x.png"));
    assert_eq!(manifest.images[1].filename(), None);
    assert_eq!(manifest.images[2].filename(), Some("keep-me.png"));
}

#[test]
fn malformed_record_fails_the_pass() {
    let mut manifest = manifest(vec![
        entry("iphone", "20x20", "2x"),
        entry("iphone", "sixty", "2x"),
    ]);
    let err = assign_filenames(&mut manifest, &Naming::default()).unwrap_err();
    assert!(matches!(err, ManifestError::InvalidSize(_)));
}
