//! `tfsgit lookup` -- resolve a path in a commit's tree.

use anyhow::Result;

use crate::cli::LookupArgs;
use crate::context::RuntimeContext;
use crate::output::{format_object, output_json};

/// Execute the `tfsgit lookup` command.
///
/// A missing path prints `null` (JSON) or a note and still succeeds.
pub fn run(ctx: &RuntimeContext, args: &LookupArgs) -> Result<()> {
    let object = ctx
        .repository()
        .lookup(Some(args.commit.as_str()), Some(args.path.as_str()))?;

    if ctx.json {
        output_json(&object);
        return Ok(());
    }

    match object {
        Some(object) => println!("{}", format_object(&object)),
        None => {
            if !ctx.quiet {
                eprintln!("{} not found in {}", args.path, args.commit);
            }
        }
    }
    Ok(())
}
