//! Icon classification tests.

use pulse_icons::prelude::*;

#[test]
fn test_default_icon_is_raster() {
    let resolver = DeviceIconResolver::with_catalog(AssetCatalog::new());
    let icon = resolver.resolve("anything");
    assert!(icon.is_default());
    assert_eq!(icon.as_str(), "other.png");
    assert!(is_raster_image(&icon));
}

#[test]
fn test_raster_extensions() {
    for location in ["a.png", "a.JPG", "a.jpeg", "a.webp", ":/bundle/a.gif"] {
        let icon = IconReference::Raster(AssetRef::new(location));
        assert!(is_raster_image(&icon), "{location} should be raster");
        assert_eq!(IconKind::classify(&icon), IconKind::Raster);
    }
}

#[test]
fn test_vector_is_never_raster() {
    let icon = IconReference::Vector(AssetRef::new("icons/windows.png"));
    assert!(!is_raster_image(&icon));
}

#[test]
fn test_unknown_extension_is_other() {
    let icon = IconReference::Default(AssetRef::new("icons/generic.svg"));
    assert!(!is_raster_image(&icon));
    assert_eq!(IconKind::classify(&icon), IconKind::Other);

    let icon = IconReference::Raster(AssetRef::new("no-extension"));
    assert_eq!(IconKind::classify(&icon), IconKind::Other);
}
