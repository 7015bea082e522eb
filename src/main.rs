use anyhow::Result;
use clap::{Parser, Subcommand};
use cosi::analysis::Analyzer;
use cosi::index::build::{IndexOptions, build_index};
use cosi::index::stats::show_stats;
use cosi::query::search::{SearchOptions, run_search};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "cosi")]
#[command(about = "Vector-space text search engine with on-disk seekable postings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dictionary and postings files from a document directory
    Index {
        /// Directory of documents (one file per document, file name = integer id)
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Output dictionary file
        #[arg(short = 'd', long)]
        dictionary: PathBuf,

        /// Output postings file
        #[arg(short = 'p', long)]
        postings: PathBuf,
    },
    /// Run ranked retrieval over a file of queries
    Search {
        /// Dictionary file produced by `cosi index`
        #[arg(short = 'd', long)]
        dictionary: PathBuf,

        /// Postings file produced by `cosi index`
        #[arg(short = 'p', long)]
        postings: PathBuf,

        /// Input file of queries, one free-text query per line
        #[arg(short = 'q', long)]
        queries: PathBuf,

        /// Output file of results, one line of ranked doc ids per query
        #[arg(short = 'o', long)]
        output: PathBuf,
    },
    /// Show statistics for an existing index
    Stats {
        /// Dictionary file
        #[arg(short = 'd', long)]
        dictionary: PathBuf,

        /// Postings file
        #[arg(short = 'p', long)]
        postings: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let analyzer = Analyzer::new();

    match cli.command {
        Commands::Index {
            input,
            dictionary,
            postings,
        } => {
            let opts = IndexOptions {
                input_dir: input,
                dictionary_path: dictionary,
                postings_path: postings,
            };
            let summary = build_index(&opts, &analyzer)?;
            println!(
                "Indexed {} documents ({} distinct terms)",
                summary.documents, summary.terms
            );
        }
        Commands::Search {
            dictionary,
            postings,
            queries,
            output,
        } => {
            let opts = SearchOptions {
                dictionary_path: dictionary,
                postings_path: postings,
                queries_path: queries,
                results_path: output,
            };
            run_search(&opts, &analyzer)?;
        }
        Commands::Stats {
            dictionary,
            postings,
        } => {
            show_stats(&dictionary, &postings)?;
        }
    }

    Ok(())
}
