//! Third-party library resolution.
//!
//! Given `name-version` library specs and a [`BuildContext`], the resolver
//! finds each library's headers, static libraries and runtime files in the
//! prebuilt tree and joins its public definitions from the metadata
//! document. The pass is pure apart from filesystem reads and either
//! returns a complete [`ResolutionResult`] or an error.

pub mod errors;
pub mod resolve;
pub mod result;
pub mod sink;

pub use errors::ResolveError;
pub use resolve::{BuildContext, LibraryResolver};
pub use result::ResolutionResult;
pub use sink::{BuildSink, FlagSink};
