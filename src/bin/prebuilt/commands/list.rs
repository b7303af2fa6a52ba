//! `prebuilt list` command

use anyhow::Result;

use crate::cli::ListArgs;
use prebuilt::ops::metadata::{format_listing, load_metadata};
use prebuilt::util::GlobalContext;

pub fn execute(args: ListArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config();
    let root = ctx.root_dir(args.root.as_deref(), &config)?;

    let metadata = load_metadata(&root)?;
    print!("{}", format_listing(&metadata));

    Ok(())
}
