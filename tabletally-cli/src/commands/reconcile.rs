use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tabletally_import::reconcile_catalog_items;

use crate::CliError;

use super::{default_db_path, open_existing_db};

/// Run the `reconcile` command.
///
/// The merge itself runs inside a transaction owned here; a dry run rolls
/// the transaction back after reporting what it would have done.
pub(crate) fn run_reconcile(db_path: Option<PathBuf>, dry_run: bool) -> Result<(), CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let Some(conn) = open_existing_db(&db_path)? else {
        return Ok(());
    };

    log::info!(
        "{}",
        "Reconciling catalog items...".if_supports_color(Stdout, |t| t.bold()),
    );

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| CliError::database(format!("Failed to start transaction: {}", e)))?;

    let stats = reconcile_catalog_items(&tx)
        .map_err(|e| CliError::database(format!("Reconciliation failed: {}", e)))?;

    if stats.absorbed == 0 {
        log::info!("  No provisional items to merge.");
        return Ok(());
    }

    if dry_run {
        drop(tx);
        log::info!(
            "{}",
            "Dry run: no changes made.".if_supports_color(Stdout, |t| t.yellow()),
        );
    } else {
        tx.commit()
            .map_err(|e| CliError::database(format!("Failed to commit reconciliation: {}", e)))?;
        log::info!(
            "{}",
            "Reconciliation complete".if_supports_color(Stdout, |t| t.bold()),
        );
    }
    log::info!("  Provisional items absorbed: {:>4}", stats.absorbed);
    log::info!("  Stat rows moved:            {:>4}", stats.stats_moved);
    if stats.stats_dropped > 0 {
        log::info!("  Stat rows dropped:          {:>4}", stats.stats_dropped);
    }

    Ok(())
}
