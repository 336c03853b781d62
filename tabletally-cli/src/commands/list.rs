use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{default_db_path, open_existing_db, truncate_str};

/// Run the `list items` command.
pub(crate) fn run_list_items(
    filter: Option<String>,
    db_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let Some(conn) = open_existing_db(&db_path)? else {
        return Ok(());
    };

    let items = tabletally_db::list_catalog_items(&conn, filter.as_deref())
        .map_err(|e| CliError::database(format!("Failed to list catalog items: {}", e)))?;

    if items.is_empty() {
        log::info!(
            "{}",
            "No catalog items stored.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{} catalog item(s):", items.len()).if_supports_color(Stdout, |t| t.bold()),
    );
    for item in &items {
        let status = match item.status {
            Some(s) => s.as_str().to_string(),
            None => "provisional".to_string(),
        };
        let premium = if item.premium == Some(true) {
            format!(" {}", "(premium)".if_supports_color(Stdout, |t| t.green()))
        } else {
            String::new()
        };
        log::info!(
            "  {} [{}] {}{}",
            truncate_str(&item.display_name, 40).if_supports_color(Stdout, |t| t.bold()),
            item.slug.if_supports_color(Stdout, |t| t.cyan()),
            status.if_supports_color(Stdout, |t| t.dimmed()),
            premium,
        );
    }

    Ok(())
}

/// Run the `list participants` command.
pub(crate) fn run_list_participants(db_path: Option<PathBuf>) -> Result<(), CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let Some(conn) = open_existing_db(&db_path)? else {
        return Ok(());
    };

    let participants = tabletally_db::list_participants(&conn)
        .map_err(|e| CliError::database(format!("Failed to list participants: {}", e)))?;

    if participants.is_empty() {
        log::info!(
            "{}",
            "No participants stored.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{} participant(s):", participants.len()).if_supports_color(Stdout, |t| t.bold()),
    );
    for p in &participants {
        log::info!(
            "  {}  xp {}, karma {}, {}/{} wins",
            p.name.if_supports_color(Stdout, |t| t.bold()),
            p.xp,
            p.karma,
            p.total_wins,
            p.total_matches,
        );
    }

    Ok(())
}

/// Run the `list tournaments` command.
pub(crate) fn run_list_tournaments(db_path: Option<PathBuf>) -> Result<(), CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let Some(conn) = open_existing_db(&db_path)? else {
        return Ok(());
    };

    let tournaments = tabletally_db::list_tournaments(&conn)
        .map_err(|e| CliError::database(format!("Failed to list tournaments: {}", e)))?;

    if tournaments.is_empty() {
        log::info!(
            "{}",
            "No tournaments stored.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{} tournament(s):", tournaments.len()).if_supports_color(Stdout, |t| t.bold()),
    );
    for tourn in &tournaments {
        log::info!(
            "  {} {} [{}] {} to {}, {} match(es)",
            format!("#{}", tourn.external_id).if_supports_color(Stdout, |t| t.dimmed()),
            truncate_str(&tourn.name, 40).if_supports_color(Stdout, |t| t.bold()),
            tourn.catalog_name.if_supports_color(Stdout, |t| t.cyan()),
            tourn.start_time,
            tourn.end_time,
            tourn.total_matches,
        );
    }

    Ok(())
}
