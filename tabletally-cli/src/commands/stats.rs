use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{default_db_path, open_existing_db};

/// Run the `stats` command.
pub(crate) fn run_stats(db_path: Option<PathBuf>) -> Result<(), CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let Some(conn) = open_existing_db(&db_path)? else {
        return Ok(());
    };

    let stats = tabletally_db::store_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query storage stats: {}", e)))?;

    log::info!(
        "{}",
        "Stats Database".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Catalog items:      {:>8}", stats.catalog_items);
    log::info!(
        "  Provisional items:  {:>8} (name-only, awaiting a listing)",
        stats.provisional_items,
    );
    log::info!("  Participants:       {:>8}", stats.participants);
    log::info!("  Item stats:         {:>8}", stats.item_stats);
    log::info!("  Match events:       {:>8}", stats.match_events);
    log::info!("  Match moves:        {:>8}", stats.match_moves);
    log::info!("  Tournaments:        {:>8}", stats.tournaments);
    log::info!("  Tournament matches: {:>8}", stats.tournament_matches);
    log::info!("  Imports:            {:>8}", stats.imports);

    Ok(())
}
