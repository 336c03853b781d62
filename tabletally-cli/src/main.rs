//! tabletally CLI
//!
//! Command-line interface for importing board game site stat exports into
//! a local SQLite database and browsing what was stored.

mod cli_types;
mod commands;
mod error;

use clap::Parser;

use cli_types::{Cli, Commands, ListTarget, ShowTarget};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Import {
            file,
            format,
            db,
            json,
        } => commands::import::run_import(file, format, db, json),
        Commands::Detect { file } => commands::detect::run_detect(file),
        Commands::Stats { db } => commands::stats::run_stats(db),
        Commands::List { target } => match target {
            ListTarget::Items { filter, db } => commands::list::run_list_items(filter, db),
            ListTarget::Participants { db } => commands::list::run_list_participants(db),
            ListTarget::Tournaments { db } => commands::list::run_list_tournaments(db),
        },
        Commands::Show { target } => match target {
            ShowTarget::Participant { name, db } => {
                commands::show::run_show_participant(name, db)
            }
            ShowTarget::Event { table_id, db } => commands::show::run_show_event(table_id, db),
            ShowTarget::Tournament { id, db } => commands::show::run_show_tournament(id, db),
        },
        Commands::Reconcile { db, dry_run } => commands::reconcile::run_reconcile(db, dry_run),
        Commands::History { db, limit } => commands::history::run_history(db, limit),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Configure the logger so the log macros double as the output channel.
///
/// At the default level, records print bare so info-level messages read as
/// normal command output. `--verbose` switches to the timestamped debug
/// format; `--quiet` drops everything below warn.
fn init_logging(quiet: bool, verbose: bool) {
    use std::io::Write;

    let level = if quiet {
        log::LevelFilter::Warn
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.target(env_logger::Target::Stdout);

    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| {
            if record.level() == log::Level::Error {
                writeln!(buf, "error: {}", record.args())
            } else {
                writeln!(buf, "{}", record.args())
            }
        });
    }

    builder.init();
}

/// Log an empty info line, so summaries can space their sections.
pub(crate) fn log_blank() {
    log::info!("");
}
