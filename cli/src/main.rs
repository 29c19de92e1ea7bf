use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use findex_cli::{
    apply_limit, build_and_save, index_file_for, load_or_build, render_console, render_html, repl,
};
use findex_core::search;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "findex")]
#[command(about = "Index and search directories of plain-text files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index for a directory of .txt files
    Index {
        /// Directory to index
        root: PathBuf,
        /// Where to write the index (defaults to index_data.txt inside the root)
        #[arg(long)]
        index_file: Option<PathBuf>,
        /// Overwrite an existing index
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Query the index; with no query words, start an interactive prompt
    Search {
        /// Query words
        query: Vec<String>,
        /// Directory the index describes
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Index file to read (defaults to index_data.txt inside the root)
        #[arg(long)]
        index_file: Option<PathBuf>,
        /// Build and save the index first if none exists
        #[arg(long, default_value_t = false)]
        build_missing: bool,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Write an HTML report to this path instead of printing
        #[arg(long)]
        html: Option<PathBuf>,
        /// Show at most this many results
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Index {
            root,
            index_file,
            force,
        } => {
            let file = index_file_for(&root, index_file);
            println!("{}", build_and_save(&root, &file, force)?);
            Ok(())
        }
        Commands::Search {
            query,
            root,
            index_file,
            build_missing,
            json,
            html,
            limit,
        } => {
            let file = index_file_for(&root, index_file);
            let index = load_or_build(&file, &root, build_missing)?;
            if query.is_empty() {
                return repl(&index, limit);
            }

            let query = query.join(" ");
            let results = apply_limit(search(&index, &query), limit);
            if let Some(path) = &html {
                fs::write(path, render_html(&results, &query))
                    .with_context(|| format!("writing report {}", path.display()))?;
                println!("Wrote {}", path.display());
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if html.is_none() {
                print!("{}", render_console(&results));
            }
            Ok(())
        }
    }
}
