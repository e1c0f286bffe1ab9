//! Cookbook CLI
//!
//! Usage:
//!   cookbook serve [--bind ADDR] [--seed FILE]   Run the HTTP server
//!   cookbook parse <input>                       Canonicalize a name
//!   cookbook summary <name> --seed FILE          Resolve a recipe offline
//!   cookbook check --seed FILE                   Validate every recipe in a seed

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use cookbook::server::{self, ServerState};
use cookbook::{Config, Entry, EntryStore, canonicalize, output, seed};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cookbook")]
#[command(about = "In-memory cookbook with recipe resolution")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a config file
    #[arg(short, long, global = true, env = "COOKBOOK_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the cookbook over HTTP
    Serve {
        /// Address to listen on (overrides config)
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        /// JSON file of entries to load at startup
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },

    /// Print the canonical form of a name
    Parse {
        /// Free-form name
        input: String,
    },

    /// Resolve a recipe into base ingredients and total cook time
    Summary {
        /// Recipe name
        name: String,

        /// JSON file of entries
        #[arg(short, long)]
        seed: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a seed file and try to resolve every recipe in it
    Check {
        /// JSON file of entries
        #[arg(short, long)]
        seed: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { bind, seed: seed_path } => {
            let store = match seed_path {
                Some(path) => seed::load_file(&path)?,
                None => EntryStore::new(),
            };
            let bind = bind.unwrap_or(config.bind);
            let state = ServerState::new(store, config.resolver());

            let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
            runtime.block_on(server::run_server(bind, state))?;
        }

        Commands::Parse { input } => {
            let name = canonicalize(&input).with_context(|| format!("Cannot parse {:?}", input))?;
            println!("{}", name);
        }

        Commands::Summary {
            name,
            seed: seed_path,
            json,
        } => {
            let store = seed::load_file(&seed_path)?;
            let target = canonicalize(&name)?;
            let summary = config
                .resolver()
                .resolve(&target, &store)
                .with_context(|| format!("Cannot resolve {}", target))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                output::summary(&summary);
            }
        }

        Commands::Check { seed: seed_path } => {
            output::action(&format!("Loading {}", seed_path.display()));
            let store = seed::load_file(&seed_path)?;
            check_store(&store, &config)?;
        }
    }

    Ok(())
}

/// List every entry and resolve every recipe, reporting each failure
fn check_store(store: &EntryStore, config: &Config) -> Result<()> {
    let resolver = config.resolver();
    let entries = store.entries();
    output::info(&format!("{} entries", entries.len()));

    let mut failures = 0usize;
    for entry in &entries {
        output::entry_line(entry);
        if let Entry::Recipe(recipe) = entry {
            match resolver.resolve(&recipe.name, store) {
                Ok(summary) => output::detail(&format!(
                    "{} ingredient(s), cook time {}",
                    summary.ingredients.len(),
                    summary.cook_time
                )),
                Err(e) => {
                    output::error(&e.to_string());
                    failures += 1;
                }
            }
        }
    }

    if failures > 0 {
        bail!("{} recipe(s) cannot be resolved", failures);
    }
    output::success("All recipes resolve");
    Ok(())
}
