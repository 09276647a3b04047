//! Clap CLI definitions for the `tfsgit` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// tfsgit -- inspect the link between a git working copy and TFS.
#[derive(Parser, Debug)]
#[command(
    name = "tfsgit",
    about = "Inspect the link between a git working copy and TFS",
    long_about = "Reads tfs-remote configuration, finds the changeset a branch was last \
                  synchronised with, and reads or writes git objects.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Run as if started in this directory.
    #[arg(short = 'C', global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect configured tfs remotes.
    Remote(RemoteArgs),

    /// Show the changeset a head descends from and the local commits on top.
    Head(HeadArgs),

    /// Resolve a path in a commit's tree.
    Lookup(LookupArgs),

    /// Write a file (or stdin) into the object database.
    Insert(InsertArgs),

    /// Print version information.
    Version,

    /// Generate shell completion scripts.
    Completion(CompletionArgs),
}

// ---------------------------------------------------------------------------
// Remote
// ---------------------------------------------------------------------------

/// Arguments for `tfsgit remote`.
#[derive(Args, Debug)]
pub struct RemoteArgs {
    #[command(subcommand)]
    pub command: RemoteCommands,
}

/// Remote subcommands.
#[derive(Subcommand, Debug)]
pub enum RemoteCommands {
    /// List every configured remote.
    #[command(alias = "ls")]
    List,

    /// Show one remote by id.
    Show {
        /// Remote id (e.g. `default`).
        id: String,
    },

    /// Find the remote tracking a server path.
    Find {
        /// Server url.
        #[arg(long)]
        url: String,

        /// Server-side repository path (e.g. `$/Project/Main`).
        #[arg(long)]
        repository: String,
    },
}

// ---------------------------------------------------------------------------
// Head
// ---------------------------------------------------------------------------

/// Arguments for `tfsgit head`.
#[derive(Args, Debug)]
pub struct HeadArgs {
    /// Branch, tag, or commit to start from.
    #[arg(default_value = "HEAD")]
    pub head: String,
}

// ---------------------------------------------------------------------------
// Objects
// ---------------------------------------------------------------------------

/// Arguments for `tfsgit lookup`.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Commit-ish whose tree is searched.
    pub commit: String,

    /// Path from the repository root.
    pub path: String,
}

/// Arguments for `tfsgit insert`.
#[derive(Args, Debug)]
pub struct InsertArgs {
    /// File to insert; reads stdin when omitted.
    pub file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Arguments for `tfsgit completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn head_defaults_to_head() {
        let cli = Cli::parse_from(["tfsgit", "head"]);
        match cli.command {
            Some(Commands::Head(args)) => assert_eq!(args.head, "HEAD"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tfsgit", "remote", "list", "--json", "-C", "/tmp"]);
        assert!(cli.global.json);
        assert_eq!(cli.global.directory, Some(PathBuf::from("/tmp")));
    }
}
