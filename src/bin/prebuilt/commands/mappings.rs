//! `prebuilt mappings` command

use anyhow::{Context, Result};

use prebuilt::ops::mappings::format_mappings;
use prebuilt::util::GlobalContext;

pub fn execute() -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config();

    let resolver = config
        .resolver()
        .context("invalid [configurations] or [platforms] table")?;
    print!("{}", format_mappings(&resolver));

    Ok(())
}
