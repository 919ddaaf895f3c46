use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "material-search")]
#[command(about = "Search, browse and autocomplete over an academic materials catalog", long_about = None)]
pub struct Cli {
    /// JSON catalog of materials
    #[arg(short, long, global = true, default_value = "materials.json")]
    pub catalog: PathBuf,
    /// TOML file overriding ranking parameters
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Recent-search file (defaults to the local data directory)
    #[arg(long, global = true)]
    pub history: Option<PathBuf>,
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Write logs to stderr as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank materials against a query
    Search {
        query: String,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[arg(long)]
        min_score: Option<f64>,
    },
    /// Filter and sort the catalog like the browse screen
    Browse {
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long, default_value = "all")]
        year: String,
        #[arg(long = "type", default_value = "all")]
        kind: String,
        #[arg(short, long, default_value = "relevance")]
        sort: String,
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Show the autocomplete dropdown for a partial query
    Suggest {
        #[arg(default_value = "")]
        query: String,
        /// Record the query in recent searches
        #[arg(long)]
        commit: bool,
    },
    /// Show or clear recent searches
    History {
        #[arg(long)]
        clear: bool,
    },
    /// List departments with material counts
    Categories,
}
