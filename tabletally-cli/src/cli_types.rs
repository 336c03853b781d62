//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tabletally_formats::FormatKind;

#[derive(Parser)]
#[command(name = "tabletally")]
#[command(about = "Import and browse board game site statistics", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import an exported stats file into the database
    Import {
        /// File to import, or "-" to read from stdin
        file: PathBuf,

        /// Skip detection and treat the input as this format
        /// (listing, stats, timeline, bracket)
        #[arg(long)]
        format: Option<FormatKind>,

        /// Path to the stats database file
        #[arg(long)]
        db: Option<PathBuf>,

        /// Print the import report as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Detect which export format a file holds, without importing
    Detect {
        /// File to inspect, or "-" to read from stdin
        file: PathBuf,
    },

    /// Show storage counts for every table
    Stats {
        /// Path to the stats database file
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// List stored records
    List {
        #[command(subcommand)]
        target: ListTarget,
    },

    /// Show one record in detail
    Show {
        #[command(subcommand)]
        target: ShowTarget,
    },

    /// Merge provisional catalog items into their id-keyed counterparts
    Reconcile {
        /// Path to the stats database file
        #[arg(long)]
        db: Option<PathBuf>,

        /// Report what would be merged without changing anything
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Show recent imports
    History {
        /// Path to the stats database file
        #[arg(long)]
        db: Option<PathBuf>,

        /// Maximum number of entries to show
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ListTarget {
    /// List catalog items
    Items {
        /// Only show items whose name or slug contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Path to the stats database file
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// List participants
    Participants {
        /// Path to the stats database file
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// List tournaments
    Tournaments {
        /// Path to the stats database file
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ShowTarget {
    /// Show a participant's counters and per-item statistics
    Participant {
        /// Participant name
        name: String,

        /// Path to the stats database file
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Show a match event and its move timeline
    Event {
        /// Site table id of the event
        table_id: i64,

        /// Path to the stats database file
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Show a tournament, its matches, and their players
    Tournament {
        /// Site tournament id
        id: i64,

        /// Path to the stats database file
        #[arg(long)]
        db: Option<PathBuf>,
    },
}
