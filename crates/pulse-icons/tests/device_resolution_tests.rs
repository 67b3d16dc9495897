//! Device icon resolution tests.

use std::fs;
use std::path::Path;

use include_dir::{Dir, DirEntry, File};
use pulse_icons::prelude::*;
use tempfile::TempDir;

static BUNDLE: Dir<'static> = Dir::new(
    "",
    &[
        DirEntry::File(File::new("apple 9.png", b"")),
        DirEntry::File(File::new("other.png", b"")),
        DirEntry::File(File::new("xiaomi 9 pro.png", b"")),
    ],
);

fn images_dir(names: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for name in names {
        fs::write(dir.path().join(name), b"").expect("Failed to write fixture");
    }
    dir
}

/// Route library logs through the test harness so failures show them.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("pulse_icons=debug")
        .with_test_writer()
        .try_init();
}

fn resolver_for(path: &Path) -> DeviceIconResolver {
    DeviceIconResolver::new(AssetSource::directory(path))
        .with_default_icon(AssetRef::from_path(path.join("other.png")))
}

#[test]
fn test_empty_and_absent_names_use_default() {
    let dir = images_dir(&["other.png", "apple 9.png"]);
    let resolver = resolver_for(dir.path());

    assert_eq!(resolver.resolve(""), resolver.default_icon());
    assert_eq!(resolver.resolve(None), resolver.default_icon());
}

#[test]
fn test_full_model_match() {
    let dir = images_dir(&["other.png", "xiaomi 9 pro.png", "xiaomi 9.png"]);
    let resolver = resolver_for(dir.path());

    let icon = resolver.resolve("Xiaomi Mi Band 9 Pro");
    assert!(matches!(icon, IconReference::Raster(_)));
    assert!(icon.as_str().ends_with("xiaomi 9 pro.png"));
}

#[test]
fn test_brand_priority_follows_vocabulary_order() {
    // "apple" is listed before "huawei", so it wins even though "huawei"
    // appears first in the name.
    let descriptor = extract_brand_and_model("Huawei-compatible Apple 5").unwrap();
    assert_eq!(descriptor.brand, "apple");
    assert_eq!(descriptor.model, "5");
}

#[test]
fn test_unknown_brand_uses_default() {
    let dir = images_dir(&["other.png", "apple 9.png"]);
    let resolver = resolver_for(dir.path());
    assert!(resolver.resolve("Polar Vantage V3").is_default());
}

#[test]
fn test_empty_catalog_uses_default() {
    let dir = images_dir(&[]);
    let resolver = resolver_for(dir.path());
    let icon = resolver.resolve("Apple Watch Series 9");
    assert!(icon.is_default());
    assert!(is_raster_image(&icon));
}

#[test]
fn test_missing_directory_uses_default() {
    init_logging();
    let dir = images_dir(&[]);
    let resolver = resolver_for(&dir.path().join("missing"));
    assert!(resolver.resolve("Apple Watch Series 9").is_default());
    assert!(resolver.catalog().is_err());
}

#[test]
fn test_resolution_is_idempotent() {
    let dir = images_dir(&["other.png", "garmin venu.png", "samsung 6.png"]);
    let resolver = resolver_for(dir.path());

    for name in ["Garmin Venu+", "Samsung Watch6", "Unknown", ""] {
        assert_eq!(resolver.resolve(name), resolver.resolve(name));
    }
}

#[test]
fn test_strong_match_preferred_over_loose() {
    let dir = images_dir(&["garmin a venu.png", "garmin venu+ sq.png"]);
    let resolver = resolver_for(dir.path());

    let resolution = resolver.resolve_detailed("Garmin Venu+ Sq");
    assert_eq!(resolution.pass, Some(MatchPass::Strong));
    assert!(resolution.icon.as_str().ends_with("garmin venu+ sq.png"));
}

#[test]
fn test_extensions_filter_catalog() {
    let dir = images_dir(&["apple 9.webp", "other.png"]);

    let png_only = resolver_for(dir.path());
    assert!(png_only.resolve("Apple Watch 9").is_default());

    let with_webp = resolver_for(dir.path()).with_extensions(["png", "webp"]);
    let icon = with_webp.resolve("Apple Watch 9");
    assert!(icon.as_str().ends_with("apple 9.webp"));
    assert!(is_raster_image(&icon));
}

#[test]
fn test_memoized_catalog_needs_invalidate() {
    let dir = images_dir(&["other.png"]);
    let resolver = resolver_for(dir.path());
    assert!(resolver.resolve("Fitbit Charge 6").is_default());

    fs::write(dir.path().join("fitbit charge 6.png"), b"").unwrap();
    assert!(resolver.resolve("Fitbit Charge 6").is_default());

    resolver.invalidate();
    assert!(!resolver.resolve("Fitbit Charge 6").is_default());
}

#[test]
fn test_reload_swaps_catalog() {
    init_logging();
    let dir = images_dir(&["other.png"]);
    let resolver = resolver_for(dir.path());
    let before = resolver.catalog().unwrap();

    fs::write(dir.path().join("oppo 4.png"), b"").unwrap();
    assert_eq!(resolver.reload().unwrap(), 2);

    // A snapshot taken earlier is unaffected by the reload.
    assert_eq!(before.len(), 1);
    assert_eq!(resolver.catalog().unwrap().len(), 2);
}

#[test]
fn test_rebuild_policy_sees_new_files() {
    let dir = images_dir(&["other.png"]);
    let resolver = resolver_for(dir.path()).with_cache_policy(CachePolicy::Rebuild);
    assert!(resolver.resolve("Vivo Watch 3").is_default());

    fs::write(dir.path().join("vivo 3.png"), b"").unwrap();
    assert!(!resolver.resolve("Vivo Watch 3").is_default());
}

#[test]
fn test_custom_vocabulary() {
    let dir = images_dir(&["polar 3.png"]);
    let resolver = resolver_for(dir.path()).with_vocabulary(BrandVocabulary::new(["Polar"]));
    assert!(resolver.resolve("Polar Vantage V3").as_str().ends_with("polar 3.png"));
    assert!(resolver.resolve("Xiaomi Band 3").is_default());
}

#[test]
fn test_embedded_bundle() {
    let resolver = DeviceIconResolver::new(AssetSource::embedded(&BUNDLE))
        .with_default_icon(AssetRef::embedded("other.png"));

    let icon = resolver.resolve("Xiaomi Smart Band 9 Pro");
    assert_eq!(icon, IconReference::Raster(AssetRef::embedded("xiaomi 9 pro.png")));
    assert!(icon.asset().is_embedded());

    let fallback = resolver.resolve("Unknown");
    assert_eq!(fallback.as_str(), ":/other.png");
}

#[test]
fn test_icon_serializes_for_renderer() {
    let icon = IconReference::Raster(AssetRef::new("images/apple 9.png"));
    let json = serde_json::to_value(&icon).unwrap();
    assert_eq!(json["kind"], "raster");
    assert_eq!(json["location"], "images/apple 9.png");
}

#[tokio::test]
async fn test_async_resolution_matches_sync() {
    let dir = images_dir(&["other.png", "huawei 4.png", "realme 2.png"]);
    let resolver = resolver_for(dir.path());

    for name in ["HUAWEI WATCH GT 4", "realme Watch 2", "Nothing", ""] {
        let fresh = resolver_for(dir.path());
        assert_eq!(fresh.resolve_async(name).await, resolver.resolve(name));
    }
    assert!(resolver.resolve_async(None).await.is_default());
}

#[tokio::test]
async fn test_concurrent_resolution_during_reload() {
    let dir = images_dir(&["other.png", "apple 9.png"]);
    let resolver = std::sync::Arc::new(resolver_for(dir.path()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let resolver = std::sync::Arc::clone(&resolver);
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                let _ = resolver.reload();
            }
            resolver.resolve_async("Apple Watch Series 9").await
        }));
    }

    for handle in handles {
        let icon = handle.await.unwrap();
        assert!(icon.as_str().ends_with("apple 9.png"));
    }
}
