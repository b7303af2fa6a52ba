//! Library resolution operations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::platform::{Configuration, Platform};
use crate::resolver::{BuildContext, FlagSink, ResolutionResult};
use crate::util::diagnostic::suggestions;
use crate::util::fs::relative_path;
use crate::util::GlobalContext;

/// Options for a resolution pass.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Library specs; falls back to `resolve.libraries` when empty
    pub libraries: Vec<String>,

    pub platform: Platform,

    pub configuration: Configuration,

    /// Root directory; falls back to `resolve.root` when absent
    pub root: Option<PathBuf>,
}

/// A finished pass together with the inputs that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveReport {
    pub root: PathBuf,
    pub platform: Platform,
    pub configuration: Configuration,
    pub libraries: Vec<String>,
    #[serde(flatten)]
    pub result: ResolutionResult,
}

/// Resolve libraries using the merged configuration of `ctx`.
pub fn resolve_libraries(ctx: &GlobalContext, opts: &ResolveOptions) -> Result<ResolveReport> {
    let config = ctx.load_config();
    let resolver = config
        .resolver()
        .with_context(|| {
            format!(
                "invalid [configurations] or [platforms] table\n{}",
                suggestions::SHOW_MAPPINGS
            )
        })?;
    let root = ctx.root_dir(opts.root.as_deref(), &config)?;

    let libraries = if opts.libraries.is_empty() {
        config.resolve.libraries.clone()
    } else {
        opts.libraries.clone()
    };
    if libraries.is_empty() {
        tracing::warn!("No libraries requested; pass library specs or set `resolve.libraries`");
    }

    let build_ctx = BuildContext::new(&root, opts.platform, opts.configuration);
    let result = resolver.resolve(&libraries, &build_ctx)?;

    Ok(ResolveReport {
        root,
        platform: opts.platform,
        configuration: opts.configuration,
        libraries,
        result,
    })
}

/// Render a report as a human-readable listing, paths relative to the root.
pub fn format_text(report: &ResolveReport) -> String {
    let mut out = String::new();
    let rel = |path: &Path| relative_path(&report.root, path).display().to_string();

    out.push_str(&format!(
        "Resolved {} libraries for {} {} from {}\n",
        report.libraries.len(),
        report.platform,
        report.configuration,
        report.root.display()
    ));

    let sections: [(&str, Vec<String>); 4] = [
        (
            "Include paths",
            report.result.include_paths.iter().map(|p| rel(p)).collect(),
        ),
        (
            "Static libraries",
            report.result.static_libraries.iter().map(|p| rel(p)).collect(),
        ),
        (
            "Runtime dependencies",
            report.result.runtime_dependencies.iter().map(|p| rel(p)).collect(),
        ),
        ("Definitions", report.result.definitions.clone()),
    ];

    for (title, items) in sections {
        out.push('\n');
        out.push_str(&format!("{}:\n", title));
        if items.is_empty() {
            out.push_str("  (none)\n");
        }
        for item in items {
            out.push_str(&format!("  {}\n", item));
        }
    }

    out
}

/// Render a report as compiler and linker flags, one group per line.
pub fn format_flags(report: &ResolveReport) -> String {
    let mut sink = FlagSink::new();
    report.result.apply(&mut sink);

    let mut out = String::new();
    out.push_str(&format!("# compile\n{}\n", sink.compile.join(" ")));
    out.push_str(&format!("# link\n{}\n", sink.link.join(" ")));
    out.push_str("# stage\n");
    for path in &sink.runtime {
        out.push_str(&format!("{}\n", path.display()));
    }
    out
}

/// Render a report as pretty JSON.
pub fn format_json(report: &ResolveReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize resolution result")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolveError;
    use crate::test_support::{LibraryTree, ZLIB_METADATA};

    fn zlib_tree() -> LibraryTree {
        LibraryTree::new()
            .with_headers("zlib-1.2")
            .with_install_file("zlib-1.2", "Linux", "Release", "lib/libz.a")
            .with_install_file("zlib-1.2", "Linux", "Release", "bin/libz.so")
            .with_metadata(ZLIB_METADATA)
    }

    fn context(tree: &LibraryTree) -> GlobalContext {
        GlobalContext::with_cwd(tree.root().to_path_buf())
            .unwrap()
            .with_home(tree.root().join("home"))
    }

    fn options(libraries: &[&str]) -> ResolveOptions {
        ResolveOptions {
            libraries: libraries.iter().map(|s| s.to_string()).collect(),
            platform: Platform::Linux,
            configuration: Configuration::Development,
            root: None,
        }
    }

    #[test]
    fn test_resolve_with_explicit_root() {
        let tree = zlib_tree();
        let ctx = context(&tree);
        let mut opts = options(&["zlib-1.2"]);
        opts.root = Some(tree.root().to_path_buf());

        let report = resolve_libraries(&ctx, &opts).unwrap();
        assert_eq!(report.libraries, vec!["zlib-1.2"]);
        assert_eq!(report.result.definitions, vec!["ZLIB_STATIC"]);
        assert_eq!(report.result.static_libraries.len(), 1);
    }

    #[test]
    fn test_resolve_uses_configured_libraries_and_root() {
        let tree = zlib_tree().with_file(
            ".prebuilt/config.toml",
            "[resolve]\nroot = \".\"\nlibraries = [\"zlib-1.2\"]\n",
        );
        let ctx = context(&tree);

        let report = resolve_libraries(&ctx, &options(&[])).unwrap();
        assert_eq!(report.libraries, vec!["zlib-1.2"]);
        assert_eq!(report.result.include_paths.len(), 1);
    }

    #[test]
    fn test_resolve_error_is_preserved() {
        let tree = zlib_tree();
        let ctx = context(&tree);
        let mut opts = options(&["zlib"]);
        opts.root = Some(tree.root().to_path_buf());

        let err = resolve_libraries(&ctx, &opts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResolveError>(),
            Some(ResolveError::MalformedSpec(_))
        ));
    }

    #[test]
    fn test_format_text_and_flags() {
        let tree = zlib_tree();
        let ctx = context(&tree);
        let mut opts = options(&["zlib-1.2"]);
        opts.root = Some(tree.root().to_path_buf());
        let report = resolve_libraries(&ctx, &opts).unwrap();

        let text = format_text(&report);
        assert!(text.contains("Include paths:\n  Headers/zlib-1.2\n"));
        assert!(text.contains("Installs/zlib-1.2/Linux/Release/lib/libz.a"));
        assert!(text.contains("Definitions:\n  ZLIB_STATIC\n"));

        let flags = format_flags(&report);
        assert!(flags.contains("-DZLIB_STATIC"));
        assert!(flags.contains(&format!("-I{}", tree.root().join("Headers/zlib-1.2").display())));

        let json: serde_json::Value = serde_json::from_str(&format_json(&report).unwrap()).unwrap();
        assert_eq!(json["platform"], "Linux");
        assert_eq!(json["definitions"][0], "ZLIB_STATIC");
    }
}
