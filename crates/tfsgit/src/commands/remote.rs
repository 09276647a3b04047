//! `tfsgit remote` -- list, show, and find tfs remotes.

use anyhow::{Context, Result};

use crate::cli::{RemoteArgs, RemoteCommands};
use crate::context::RuntimeContext;
use crate::output::{format_remote_detail, output_json, output_table, remote_row};

/// Execute the `tfsgit remote` command.
pub fn run(ctx: &RuntimeContext, args: &RemoteArgs) -> Result<()> {
    let repo = ctx.repository();

    match &args.command {
        RemoteCommands::List => {
            let remotes = repo
                .read_all_remotes()
                .context("failed to read tfs remotes")?;
            if ctx.json {
                output_json(&remotes);
            } else if remotes.is_empty() {
                if !ctx.quiet {
                    println!("No tfs remotes configured.");
                }
            } else {
                let rows: Vec<Vec<String>> = remotes.iter().map(remote_row).collect();
                output_table(&["ID", "URL", "REPOSITORY", "USERNAME"], &rows);
            }
        }
        RemoteCommands::Show { id } => {
            let remote = repo.read_remote(id)?;
            if ctx.json {
                output_json(&remote);
            } else {
                println!("{}", format_remote_detail(&remote));
            }
        }
        RemoteCommands::Find { url, repository } => {
            let remote = repo.read_remote_by_url(url, repository)?;
            if ctx.json {
                output_json(&remote);
            } else {
                println!("{}", format_remote_detail(&remote));
            }
        }
    }

    Ok(())
}
