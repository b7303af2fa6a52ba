//! Prebuilt - resolves prebuilt third-party C/C++ libraries for a build
//!
//! Given `name-version` specs, a target platform and a build configuration,
//! the resolver locates headers, static libraries and runtime files in a
//! prebuilt library tree and reads the preprocessor definitions each library
//! version requires from `BuildMetadata.xml`.

pub mod core;
pub mod metadata;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities for building library trees on disk.
///
/// This module is only available when compiling with `--cfg test`.
#[cfg(test)]
pub mod test_support;

pub use core::{Configuration, LibrarySpec, Platform};
pub use metadata::BuildMetadata;
pub use resolver::{BuildContext, BuildSink, LibraryResolver, ResolutionResult, ResolveError};
pub use util::context::GlobalContext;
