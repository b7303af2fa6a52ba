//! Core data structures.
//!
//! - Library specs (`name-version`)
//! - Platforms and build configurations
//! - The prebuilt tree layout and its lookup tables
//! - Build configurations for metadata generation

pub mod build_config;
pub mod layout;
pub mod platform;
pub mod spec;

pub use build_config::{BuildConfig, LibraryType, VersionConfig};
pub use layout::{ConfigurationNameMap, LibraryGlob, LibraryKind, PlatformExtensionMap, RootLayout};
pub use platform::{Configuration, Platform};
pub use spec::{LibrarySpec, SpecError};
