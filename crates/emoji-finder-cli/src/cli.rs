//! Command-line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// emoji-finder - build and query the emoji lookup page
#[derive(Parser, Debug)]
#[command(name = "emoji-finder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Finder configuration (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Debug logging (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch raw emoji data and write the processed dataset and markup
    Fetch {
        /// Directory for emoji-data.json and emoji-html.html
        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,

        /// Raw emojilib data URL
        #[arg(long, default_value = emoji_data::DEFAULT_SOURCE_URL)]
        url: String,
    },

    /// Insert pre-rendered markup into a page template
    Inject {
        /// Page template containing the results container
        #[arg(long, value_name = "FILE")]
        template: PathBuf,

        /// Markup generated by `fetch`
        #[arg(long, value_name = "FILE")]
        markup: PathBuf,

        /// Output page
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Render the dataset headlessly and search it
    Search {
        /// Keyword to type into the search input
        keyword: String,

        /// Processed dataset (default: fetch from the network)
        #[arg(long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Click the n-th visible result (1-based) to copy it
        #[arg(long, value_name = "N")]
        copy: Option<usize>,

        /// Results per render frame
        #[arg(long, value_name = "N")]
        batch_size: Option<usize>,
    },
}
