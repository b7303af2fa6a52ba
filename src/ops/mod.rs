//! High-level operations.
//!
//! This module contains the implementation of prebuilt commands.

pub mod mappings;
pub mod metadata;
pub mod resolve;

pub use mappings::format_mappings;
pub use metadata::{
    format_listing, generate_metadata, load_metadata, skipped_warning, write_metadata, GenerateReport,
    MetadataOptions, SkipReason, SkippedVersion,
};
pub use resolve::{format_flags, format_json, format_text, resolve_libraries, ResolveOptions, ResolveReport};
