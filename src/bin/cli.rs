//! jsonkv CLI
//!
//! Thin driver that runs one store operation per invocation and prints the
//! result. Exists so a second, independent process can hit the same database
//! file (the cross-process tests spawn it); it is not a product surface.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use jsonkv::{Config, Store, WriteStrategy};
use serde_json::Value;
use tracing_subscriber::{fmt, EnvFilter};

/// jsonkv CLI
#[derive(Parser, Debug)]
#[command(name = "jsonkv")]
#[command(about = "CLI for the jsonkv single-file key-value store")]
#[command(version)]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./jsonkv.json")]
    db: String,

    /// Write to a temp file and rename over the database
    #[arg(long)]
    atomic: bool,

    /// fsync after every write
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set (JSON; anything else is stored as a string)
        value: String,
    },

    /// Remove a key
    Remove {
        /// The key to remove
        key: String,
    },

    /// List all keys
    Keys,

    /// List all values
    Values,

    /// List all key-value pairs
    Items,

    /// Print the database with sorted keys
    Dumps,

    /// Print the number of keys
    Size,

    /// Remove every key
    Truncate,
}

fn main() -> ExitCode {
    // Logs go to stderr, stdout carries command output only
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,jsonkv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let strategy = if args.atomic {
        WriteStrategy::AtomicRename
    } else {
        WriteStrategy::Overwrite
    };

    let config = Config::builder()
        .db_path(&args.db)
        .write_strategy(strategy)
        .sync_writes(args.sync)
        .build();

    let store = match Store::with_config(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&store, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(store: &Store, command: Commands) -> jsonkv::Result<()> {
    match command {
        Commands::Get { key } => match store.get(&key)? {
            Some(value) => println!("{}", value),
            None => println!("(nil)"),
        },
        Commands::Set { key, value } => {
            store.set(key, parse_value(&value))?;
            println!("OK");
        }
        Commands::Remove { key } => {
            store.remove(key)?;
            println!("OK");
        }
        Commands::Keys => {
            for key in store.keys()? {
                println!("{}", key);
            }
        }
        Commands::Values => {
            for value in store.values()? {
                println!("{}", value);
            }
        }
        Commands::Items => {
            for (key, value) in store.items()? {
                println!("{}\t{}", key, value);
            }
        }
        Commands::Dumps => println!("{}", store.dumps()?),
        Commands::Size => println!("{}", store.size()?),
        Commands::Truncate => {
            store.truncate()?;
            println!("OK");
        }
    }
    Ok(())
}

/// `42`, `[1,2]`, `{"a":1}` are JSON; `hello` becomes the string "hello"
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
