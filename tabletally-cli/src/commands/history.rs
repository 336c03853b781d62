use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{default_db_path, open_existing_db};

/// Run the `history` command.
pub(crate) fn run_history(db_path: Option<PathBuf>, limit: Option<u32>) -> Result<(), CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let Some(conn) = open_existing_db(&db_path)? else {
        return Ok(());
    };

    let logs = tabletally_db::list_import_logs(&conn, limit)
        .map_err(|e| CliError::database(format!("Failed to query import history: {}", e)))?;

    if logs.is_empty() {
        log::info!(
            "{}",
            "No imports recorded.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{} recent import(s):", logs.len()).if_supports_color(Stdout, |t| t.bold()),
    );
    for entry in &logs {
        let errors = if entry.row_errors > 0 {
            format!(
                ", {}",
                format!("{} row error(s)", entry.row_errors)
                    .if_supports_color(Stdout, |t| t.yellow()),
            )
        } else {
            String::new()
        };
        log::info!(
            "  {}  {:<10} {} created, {} updated{}",
            entry.imported_at.if_supports_color(Stdout, |t| t.dimmed()),
            entry.format.if_supports_color(Stdout, |t| t.cyan()),
            entry.records_created,
            entry.records_updated,
            errors,
        );
    }

    Ok(())
}
