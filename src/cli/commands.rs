//! CLI arguments

use crate::config;
use clap::Parser;
use std::path::PathBuf;

/// Search the Meta Ad Library archive and export the results
#[derive(Parser, Debug)]
#[command(name = "adscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Search keyword
    #[arg(short, long)]
    pub keyword: String,

    /// Target country code (ISO 3166-1 alpha-2)
    #[arg(short, long, default_value = config::DEFAULT_COUNTRY)]
    pub country: String,

    /// Ads to request per page (1-100)
    #[arg(short, long, default_value_t = config::DEFAULT_LIMIT)]
    pub limit: u32,

    /// Maximum pages to fetch
    #[arg(long, default_value_t = 10)]
    pub max_pages: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Access token; falls back to the ACCESS_TOKEN environment variable
    #[arg(long)]
    pub access_token: Option<String>,

    /// Directory for result files
    #[arg(short, long, default_value = "results")]
    pub output: PathBuf,

    /// Skip writing result files
    #[arg(long)]
    pub no_save: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
