use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "mailstats", version, about = "Hourly mailbox provenance statistics")]
pub struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long, global = true, env = "MAILSTATS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Mailbox address; overrides the configured account.
    #[arg(long, global = true)]
    pub account: Option<String>,

    /// SQLite database path; overrides the configured path.
    #[arg(long, global = true, env = "MAILSTATS_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the JSON API on localhost.
    Serve {
        /// Override the configured port for this run only.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Aggregate one hour of messages from a JSONL file or directory.
    Ingest {
        /// A `.jsonl` file, or a directory searched for `.jsonl`/`.ndjson`.
        #[arg(long)]
        file: PathBuf,
        /// Hour start in Unix seconds or RFC 3339; defaults to the last
        /// complete hour.
        #[arg(long)]
        hour: Option<String>,
    },
    /// Print the record stored for one hour.
    Read { hour: String },
    /// Print the column series for an inclusive hour range.
    Range { start: String, end: String },
    /// Store a record given as a JSON object.
    Write {
        #[arg(long)]
        json: String,
    },
}
