use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "click-rank")]
#[command(about = "Simulate how clicks reshape the ranking of search results")]
#[command(version)]
pub struct Args {
    /// JSON file holding the pages (created from the demo pages when missing)
    #[arg(short, long, default_value = "pages.json")]
    pub store: PathBuf,

    /// Path to a JSON engine configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every page, highest rank first
    List,

    /// Search titles, content and keywords
    Search {
        /// Whitespace-separated search terms
        query: String,
    },

    /// Simulate a click on a page
    Click {
        id: u64,
    },

    /// Show pages sharing a keyword with a page
    Related {
        id: u64,

        /// Maximum number of related pages
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print the edge list for a graph renderer
    Edges {
        /// Only edges into and out of this page
        #[arg(short, long)]
        focus: Option<u64>,
    },

    /// Restore the demo pages
    Reset,

    /// Add the pages of a text or HTML document
    Ingest {
        file: PathBuf,
    },
}
