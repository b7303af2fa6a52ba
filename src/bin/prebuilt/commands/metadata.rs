//! `prebuilt metadata` command

use std::io::IsTerminal;

use anyhow::Result;

use crate::cli::MetadataArgs;
use prebuilt::ops::metadata::{skipped_warning, write_metadata, MetadataOptions};
use prebuilt::util::{diagnostic, GlobalContext};

pub fn execute(args: MetadataArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let opts = MetadataOptions {
        build_config: ctx.cwd().join(&args.build_config),
        root: args.root.map(|root| ctx.cwd().join(root)),
        output: args.output.map(|output| ctx.cwd().join(output)),
    };

    let report = write_metadata(&opts)?;

    if let Some(warning) = skipped_warning(&report) {
        diagnostic::emit(&warning, std::io::stderr().is_terminal());
    }
    if let Some(output) = &report.output {
        println!("Wrote {}", output.display());
    }

    Ok(())
}
