use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::fetch::{
    DEFAULT_BASE_URL, DEFAULT_FIRST_PERSON_ID, DEFAULT_LAST_PERSON_ID, DEFAULT_TIMEOUT_SECS,
};

#[derive(Parser, Debug)]
#[command(name = "swapi-to-csv")]
#[command(version, about = "Extract SWAPI people, vehicles and starships into CSV tables")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch everything and write the CSV tables
    Sync {
        /// Directory for the CSV files
        #[arg(default_value = ".")]
        output_dir: PathBuf,

        /// Also write the tables to this SQLite database (replaced if present)
        #[arg(long)]
        sqlite: Option<PathBuf>,

        /// API base URL
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// First person id to request
        #[arg(long, default_value_t = DEFAULT_FIRST_PERSON_ID)]
        first_id: i64,

        /// Last person id to request (inclusive)
        #[arg(long, default_value_t = DEFAULT_LAST_PERSON_ID)]
        last_id: i64,

        /// Per-request timeout in seconds
        #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,

        /// Show the terminal UI instead of log lines
        #[arg(long)]
        tui: bool,
    },

    /// List the output tables and their columns
    ListTables,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
