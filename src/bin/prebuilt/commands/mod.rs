//! Command implementations

pub mod completions;
pub mod list;
pub mod mappings;
pub mod metadata;
pub mod resolve;
