//! `tfsgit head` -- find the changeset a head descends from.

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::HeadArgs;
use crate::context::RuntimeContext;
use crate::output::{HeadView, format_head_scan, output_json};

/// Execute the `tfsgit head` command.
///
/// A head that does not exist is reported, not treated as an error.
pub fn run(ctx: &RuntimeContext, args: &HeadArgs) -> Result<()> {
    let scan = ctx
        .repository()
        .head_info(&args.head)
        .with_context(|| format!("failed to scan history of {}", args.head))?;
    debug!(head = %args.head, local = scan.local_commits.len(), "head scanned");

    if ctx.json {
        output_json(&HeadView::new(&args.head, &scan));
    } else {
        println!("{}", format_head_scan(&args.head, &scan));
    }

    Ok(())
}
