//! Asset selection module
//!
//! Chooses which file of a release the download button should point to.

mod picker;

pub use picker::{AssetPicker, DEFAULT_PACKAGE_EXTENSION, ExtensionPicker};
