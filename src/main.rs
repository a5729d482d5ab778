//! Rug Hunter CLI
//!
//! Resolve mint authorities, classify them against the rugged/good lists,
//! and maintain those lists from the command line. Every command prints
//! JSON on stdout; logs go to stderr.
//!
//! Usage:
//!   rug_hunter resolve <MINT>
//!   rug_hunter classify <MINT>
//!   rug_hunter add rugged <ADDRESS>
//!   rug_hunter list good

use clap::{Parser, Subcommand};
use eyre::Result;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rug_hunter::api::{ApiError, ListMutationData, ListSnapshotData, MembershipData};
use rug_hunter::{
    AddressListStore, AppConfig, AppResult, AuthorityResolver, Classifier, ListName,
};

/// Solana mint authority resolver and rugged/good list classifier
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the list files (overrides RUG_HUNTER_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Solana JSON-RPC endpoint (overrides SOLANA_RPC_ENDPOINT)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Per-fetch timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the authority controlling a mint
    Resolve {
        #[arg(value_name = "MINT")]
        mint: String,
    },
    /// Resolve a mint's authority and check it against both lists
    Classify {
        #[arg(value_name = "MINT")]
        mint: String,
    },
    /// Add an address to a list
    Add {
        #[arg(value_name = "LIST")]
        list: ListName,
        #[arg(value_name = "ADDRESS")]
        address: String,
    },
    /// Remove an address from a list
    Remove {
        #[arg(value_name = "LIST")]
        list: ListName,
        #[arg(value_name = "ADDRESS")]
        address: String,
    },
    /// Print a list
    List {
        #[arg(value_name = "LIST")]
        list: ListName,
    },
    /// Check whether an address is on a list
    Check {
        #[arg(value_name = "LIST")]
        list: ListName,
        #[arg(value_name = "ADDRESS")]
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "rug_hunter=debug" } else { "rug_hunter=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let mut config = AppConfig::from_env();
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc_url = rpc_url;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.rpc_timeout = Duration::from_millis(timeout_ms);
    }
    debug!(?config, "running {:?}", cli.command);

    let store = AddressListStore::from_config(&config);

    let outcome = match cli.command {
        Command::Resolve { mint } => {
            let resolver = AuthorityResolver::from_config(&config)?;
            emit(resolver.resolve(&mint).await)?
        }
        Command::Classify { mint } => {
            let resolver = AuthorityResolver::from_config(&config)?;
            let classifier = Classifier::new(resolver, store);
            emit(classifier.classify(&mint).await)?
        }
        Command::Add { list, address } => {
            emit(store.add(list, &address).await.map(ListMutationData::from))?
        }
        Command::Remove { list, address } => {
            emit(store.remove(list, &address).await.map(ListMutationData::from))?
        }
        Command::List { list } => {
            let addresses = store.list(list).await;
            emit(Ok(ListSnapshotData {
                list_name: list,
                count: addresses.len(),
                addresses,
            }))?
        }
        Command::Check { list, address } => {
            let member = store.contains(list, &address).await;
            emit(Ok(MembershipData {
                list_name: list,
                address,
                member,
            }))?
        }
    };

    if !outcome {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the value or the typed error as JSON. Returns whether it succeeded.
fn emit<T: Serialize>(result: AppResult<T>) -> Result<bool> {
    let (json, ok) = match result {
        Ok(value) => (serde_json::to_string_pretty(&value)?, true),
        Err(err) => (serde_json::to_string_pretty(&ApiError::from(&err))?, false),
    };
    println!("{}", json);
    Ok(ok)
}
