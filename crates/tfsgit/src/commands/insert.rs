//! `tfsgit insert` -- write content into the object database.

use std::io;

use anyhow::{Context, Result};

use crate::cli::InsertArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `tfsgit insert` command.
pub fn run(ctx: &RuntimeContext, args: &InsertArgs) -> Result<()> {
    let repo = ctx.repository();

    let id = match &args.file {
        Some(file) => {
            // Resolve against the invocation directory, not the work tree git runs in.
            let file = std::path::absolute(file)
                .with_context(|| format!("invalid path: {}", file.display()))?;
            if !file.is_file() {
                anyhow::bail!("not a file: {}", file.display());
            }
            repo.insert_file(&file)?
        }
        None => repo.insert_reader(&mut io::stdin().lock())?,
    };

    if ctx.json {
        output_json(&serde_json::json!({ "sha": id }));
    } else {
        println!("{id}");
    }
    Ok(())
}
