//! `prebuilt resolve` command

use anyhow::Result;

use crate::cli::{OutputFormat, ResolveArgs};
use prebuilt::ops::resolve::{format_flags, format_json, format_text, resolve_libraries, ResolveOptions};
use prebuilt::util::GlobalContext;

pub fn execute(args: ResolveArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let opts = ResolveOptions {
        libraries: args.libraries,
        platform: args.platform,
        configuration: args.configuration,
        root: args.root,
    };

    let report = resolve_libraries(&ctx, &opts)?;

    let output = match args.format {
        OutputFormat::Text => format_text(&report),
        OutputFormat::Json => format_json(&report)? + "\n",
        OutputFormat::Flags => format_flags(&report),
    };
    print!("{}", output);

    Ok(())
}
