//! Implementation of `prebuilt mappings`.

use crate::core::layout::LibraryKind;
use crate::core::platform::{Configuration, Platform};
use crate::resolver::LibraryResolver;

/// Render the configuration-name and library pattern tables of a resolver.
///
/// Values without an entry are listed as `(unmapped)`; resolving with them
/// fails.
pub fn format_mappings(resolver: &LibraryResolver) -> String {
    let mut out = String::from("Configurations:\n");

    for configuration in Configuration::ALL {
        let name = resolver
            .configurations()
            .get(configuration)
            .unwrap_or("(unmapped)");
        out.push_str(&format!("  {:<12} {}\n", configuration.as_str(), name));
    }

    out.push_str("\nPlatforms:\n");
    for platform in Platform::ALL {
        let pattern = |kind| {
            resolver
                .extensions()
                .get(platform, kind)
                .map(|glob| glob.as_str().to_string())
                .unwrap_or_else(|_| "(unmapped)".to_string())
        };
        out.push_str(&format!(
            "  {:<12} static {:<12} dynamic {}\n",
            platform.as_str(),
            pattern(LibraryKind::Static),
            pattern(LibraryKind::Dynamic)
        ));
    }

    out
}
