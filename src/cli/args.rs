//! Command line argument definitions.

use clap::Parser;

/// Stream Checker - Find out which of your streaming services carry a title
///
/// Credentials and preferences come from the environment: TMDB_API_KEY and
/// TMDB_API_TOKEN are required; TMDB_REGION and TMDB_PROVIDERS are optional.
#[derive(Parser, Debug)]
#[command(name = "stream-checker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Look up a single title and exit instead of prompting
    #[arg(short = 't', long, value_name = "TITLE", conflicts_with = "id")]
    pub title: Option<String>,

    /// Look up a TMDB ID and exit instead of prompting
    #[arg(long, value_name = "ID")]
    pub id: Option<u64>,

    /// Media type to search: movie, tv or multi
    #[arg(short = 'm', long, default_value = "movie")]
    pub media: String,

    /// Region code, overriding TMDB_REGION (e.g., US, GB, DE)
    #[arg(short = 'r', long)]
    pub region: Option<String>,

    /// List provider names TMDB knows for the region and exit
    #[arg(long, conflicts_with_all = ["title", "id", "check"])]
    pub list_providers: bool,

    /// Verify credentials and the provider allow-list, then exit
    #[arg(long, conflicts_with_all = ["title", "id"])]
    pub check: bool,

    /// Output format: table, simple, json
    #[arg(long, default_value = "table")]
    pub format: String,
}

impl Cli {
    /// Whether to run the interactive prompt loop.
    pub fn is_interactive(&self) -> bool {
        self.title.is_none() && self.id.is_none() && !self.list_providers && !self.check
    }
}
