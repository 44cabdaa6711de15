//! `merkletree`: commit to a list of files and check membership of one of
//! them.

mod commands;
mod error;
mod items;

use std::{
    io,
    path::PathBuf,
    process,
};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "merkletree", about = "Merkle tree commitments over files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TreeArgs {
    /// Hash primitive: sha256 or blake3
    #[arg(long, default_value = "sha256")]
    hash: String,

    /// Item files, in leaf order
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every stored node of the tree
    Export(TreeArgs),
    /// Print the root digest and root level
    Root(TreeArgs),
    /// Check whether a file is the committed item at a leaf index
    Prove {
        /// Leaf index to check against
        #[arg(long)]
        index: usize,

        /// File holding the claimed item
        #[arg(long)]
        item: PathBuf,

        #[command(flatten)]
        tree: TreeArgs,
    },
    /// Draw the tree
    Show(TreeArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = io::stdout().lock();

    let result = match cli.command {
        Commands::Export(args) => {
            commands::run_export(&args.files, &args.hash, &mut out).map(|()| 0)
        }
        Commands::Root(args) => commands::run_root(&args.files, &args.hash, &mut out).map(|()| 0),
        Commands::Prove { index, item, tree } => {
            commands::run_prove(&tree.files, &tree.hash, index, &item, &mut out)
                .map(|member| if member { 0 } else { 2 })
        }
        Commands::Show(args) => commands::run_show(&args.files, &args.hash, &mut out).map(|()| 0),
    };

    let status = commands::finish(result, &mut out);
    if status != 0 {
        process::exit(status);
    }
}
