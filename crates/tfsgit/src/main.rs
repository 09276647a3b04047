//! `tfsgit` -- inspect the link between a git working copy and TFS.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Filter used for `--verbose` when `RUST_LOG` is unset.
const VERBOSE_FILTER: &str = "tfsgit=debug,tfsgit_git=debug,tfsgit_core=debug";

fn main() {
    let cli = Cli::parse();

    init_logging(cli.global.verbose);

    let result = match cli.command {
        Some(Commands::Completion(ref args)) => commands::completion::run(args),
        Some(ref command) => RuntimeContext::from_global_args(&cli.global)
            .and_then(|ctx| dispatch(&ctx, command)),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    // Handle errors: print message and exit with code 1
    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn dispatch(ctx: &RuntimeContext, command: &Commands) -> anyhow::Result<()> {
    match command {
        Commands::Remote(args) => commands::remote::run(ctx, args),
        Commands::Head(args) => commands::head::run(ctx, args),
        Commands::Lookup(args) => commands::lookup::run(ctx, args),
        Commands::Insert(args) => commands::insert::run(ctx, args),
        Commands::Version => commands::version::run(ctx),
        Commands::Completion(args) => commands::completion::run(args),
    }
}

/// Logs go to stderr. `RUST_LOG` wins; otherwise `--verbose` enables debug
/// output for the tfsgit crates and everything else stays at `warn`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(VERBOSE_FILTER)
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
