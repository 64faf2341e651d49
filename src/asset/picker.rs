use crate::provider::ReleaseAsset;

/// Android package extension offered for download.
pub const DEFAULT_PACKAGE_EXTENSION: &str = ".apk";

/// Trait for selecting an asset from a list of available assets
pub trait AssetPicker: Send + Sync {
    /// Pick the asset to offer from the given list
    ///
    /// Returns `None` if no suitable asset is found
    fn pick<'a>(&self, assets: &'a [ReleaseAsset]) -> Option<&'a ReleaseAsset>;
}

/// Picks the first asset, in release order, whose file name ends with an extension.
#[derive(Debug, Clone)]
pub struct ExtensionPicker {
    extension: String,
}

impl ExtensionPicker {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl Default for ExtensionPicker {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGE_EXTENSION)
    }
}

impl AssetPicker for ExtensionPicker {
    fn pick<'a>(&self, assets: &'a [ReleaseAsset]) -> Option<&'a ReleaseAsset> {
        assets.iter().find(|a| a.name.ends_with(&self.extension))
    }
}
