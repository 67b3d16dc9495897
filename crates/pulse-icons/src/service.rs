//! Device and platform resolution behind one handle.

use crate::catalog::AssetSource;
use crate::config::IconConfig;
use crate::platform::PlatformIconResolver;
use crate::reference::{self, IconReference};
use crate::resolver::DeviceIconResolver;
use crate::Result;

/// A device resolver and a platform resolver built from one configuration.
///
/// This is the handle most applications keep: it answers "which icon for this
/// device?", "which icon for this platform?" and "is this icon an image?".
///
/// # Example
///
/// ```ignore
/// let service = IconService::from_config(&IconConfig::load("icons.toml")?)?;
///
/// let device = service.device_icon("Galaxy Watch6 by Samsung");
/// let platform = service.platform_icon("android");
/// ```
#[derive(Debug)]
pub struct IconService {
    device: DeviceIconResolver,
    platform: PlatformIconResolver,
}

impl IconService {
    /// Combine two existing resolvers.
    pub fn new(device: DeviceIconResolver, platform: PlatformIconResolver) -> Self {
        Self { device, platform }
    }

    /// Build both resolvers from a configuration.
    ///
    /// Directories are not touched here; they are scanned on first use.
    pub fn from_config(config: &IconConfig) -> Result<Self> {
        config.validate()?;

        let device = DeviceIconResolver::new(AssetSource::directory(&config.images_dir))
            .with_vocabulary(config.vocabulary())
            .with_default_icon(config.default_icon_ref())
            .with_extensions(&config.raster_extensions)
            .with_cache_policy(config.cache_policy());

        let platform = PlatformIconResolver::new(AssetSource::directory(&config.icons_dir))
            .with_extensions(&config.vector_extensions)
            .with_cache_policy(config.cache_policy());

        Ok(Self::new(device, platform))
    }

    /// Get the device resolver.
    pub fn device(&self) -> &DeviceIconResolver {
        &self.device
    }

    /// Get the platform resolver.
    pub fn platform(&self) -> &PlatformIconResolver {
        &self.platform
    }

    /// Icon for a device name; the default icon when nothing matches.
    pub fn device_icon<'a>(&self, device_name: impl Into<Option<&'a str>>) -> IconReference {
        self.device.resolve(device_name)
    }

    /// Async version of [`device_icon`](Self::device_icon).
    pub async fn device_icon_async<'a>(
        &self,
        device_name: impl Into<Option<&'a str>>,
    ) -> IconReference {
        self.device.resolve_async(device_name).await
    }

    /// Icon for a platform identifier, if one is bundled.
    pub fn platform_icon<'a>(
        &self,
        platform_id: impl Into<Option<&'a str>>,
    ) -> Option<IconReference> {
        self.platform.resolve(platform_id)
    }

    /// Async version of [`platform_icon`](Self::platform_icon).
    pub async fn platform_icon_async<'a>(
        &self,
        platform_id: impl Into<Option<&'a str>>,
    ) -> Option<IconReference> {
        self.platform.resolve_async(platform_id).await
    }

    /// Check if an icon should be drawn as a raster image.
    pub fn is_raster_image(&self, icon: &IconReference) -> bool {
        reference::is_raster_image(icon)
    }

    /// Drop both cached catalogs.
    pub fn invalidate_all(&self) {
        self.device.invalidate();
        self.platform.invalidate();
    }
}
