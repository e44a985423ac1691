//! Perun CLI - Command-line tool for reading Rebellion game data files.
//!
//! This is the main entry point for the Perun command-line application.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use perun::prelude::*;

/// Perun - Sins of a Solar Empire: Rebellion game data reader
#[derive(Parser)]
#[command(name = "perun")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Arguments selecting one data directory.
#[derive(Args)]
struct StoreArgs {
    /// Data directory to scan (e.g. GameInfo)
    #[arg(short, long, env = "PERUN_DATA_DIR")]
    dir: PathBuf,

    /// File extension of the directory's data files (e.g. entity)
    #[arg(short, long, env = "PERUN_DATA_EXT")]
    ext: String,

    /// Path to the ConvertData executable, for BIN files
    #[arg(short, long, env = "PERUN_CONVERTER")]
    converter: Option<PathBuf>,

    /// Game install root, used to locate the converter
    #[arg(short, long, env = "PERUN_GAME_ROOT")]
    game_root: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the logical keys in a data directory
    Keys {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Decode a data file and print its tree
    Dump {
        #[command(flatten)]
        store: StoreArgs,

        /// Logical key of the file (file name without extension)
        #[arg(short, long)]
        key: String,

        /// Print the tree as JSON instead of indented text
        #[arg(long)]
        json: bool,
    },

    /// Run a path query against a decoded data file
    Query {
        #[command(flatten)]
        store: StoreArgs,

        /// Logical key of the file (file name without extension)
        #[arg(short, long)]
        key: String,

        /// Path expression, e.g. basePrice/credits
        #[arg(short, long)]
        path: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Keys { store } => {
            let store = open_store(&store)?;
            for key in store.keys() {
                println!("{key}");
            }
        }

        Commands::Dump { store, key, json } => {
            let store = open_store(&store)?;
            let tree = store
                .get(&key)
                .with_context(|| format!("loading {key}"))?;
            if json {
                println!("{}", perun::sinstxt::export::tree_to_json_string(&tree)?);
            } else {
                for line in tree.to_lines() {
                    println!("{line}");
                }
            }
        }

        Commands::Query { store, key, path } => {
            let store = open_store(&store)?;
            let tree = store
                .get(&key)
                .with_context(|| format!("loading {key}"))?;
            let matches = tree
                .root()
                .select(&path)
                .with_context(|| format!("evaluating {path}"))?;
            for node in matches {
                match node.text() {
                    Some(text) => println!("{text}"),
                    None => println!("<{}>", node.tag),
                }
            }
        }
    }

    Ok(())
}

fn open_store(args: &StoreArgs) -> Result<TreeStore> {
    let store = if let Some(exe) = &args.converter {
        TreeStore::with_converter(&args.dir, &args.ext, Arc::new(ExternalConverter::new(exe)))?
    } else if let Some(root) = &args.game_root {
        let converter = ExternalConverter::locate(root)
            .with_context(|| format!("locating converter under {}", root.display()))?;
        TreeStore::with_converter(&args.dir, &args.ext, Arc::new(converter))?
    } else {
        TreeStore::open(&args.dir, &args.ext)?
    };
    Ok(store)
}
