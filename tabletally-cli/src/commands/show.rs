use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{default_db_path, open_existing_db};

/// Run the `show participant` command.
pub(crate) fn run_show_participant(
    name: String,
    db_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let Some(conn) = open_existing_db(&db_path)? else {
        return Ok(());
    };

    let participant = tabletally_db::get_participant(&conn, &name)
        .map_err(|e| CliError::database(format!("Failed to look up participant: {}", e)))?
        .ok_or_else(|| CliError::not_found(format!("participant '{}'", name)))?;

    log::info!(
        "{}",
        participant.name.if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  {}             {}",
        "XP:".if_supports_color(Stdout, |t| t.cyan()),
        participant.xp,
    );
    log::info!(
        "  {}          {}",
        "Karma:".if_supports_color(Stdout, |t| t.cyan()),
        participant.karma,
    );
    log::info!(
        "  {}        {} ({} won)",
        "Matches:".if_supports_color(Stdout, |t| t.cyan()),
        participant.total_matches,
        participant.total_wins,
    );
    log::info!(
        "  {}      {}",
        "Abandoned:".if_supports_color(Stdout, |t| t.cyan()),
        participant.abandoned_count,
    );
    log::info!(
        "  {}       {}",
        "Timeouts:".if_supports_color(Stdout, |t| t.cyan()),
        participant.timeout_count,
    );
    log::info!(
        "  {} {}",
        "Recent matches:".if_supports_color(Stdout, |t| t.cyan()),
        participant.recent_matches,
    );
    log::info!(
        "  {}      {} day(s) ago",
        "Last seen:".if_supports_color(Stdout, |t| t.cyan()),
        participant.last_seen_days,
    );

    let stats = tabletally_db::stats_for_participant(&conn, participant.id)
        .map_err(|e| CliError::database(format!("Failed to query item stats: {}", e)))?;

    if stats.is_empty() {
        crate::log_blank();
        log::info!(
            "  {}",
            "No per-item stats stored.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    crate::log_blank();
    log::info!(
        "  {}",
        "Per-item stats:".if_supports_color(Stdout, |t| t.bright_magenta()),
    );
    for row in &stats {
        let rating = row.rating.as_deref().unwrap_or("-");
        let rank = row.rank.as_deref().unwrap_or("-");
        log::info!(
            "    {}  rating {}, rank {}, {} played, {} won",
            row.item_name.if_supports_color(Stdout, |t| t.bold()),
            rating,
            rank,
            row.played,
            row.won,
        );
    }

    Ok(())
}

/// Run the `show event` command.
pub(crate) fn run_show_event(table_id: i64, db_path: Option<PathBuf>) -> Result<(), CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let Some(conn) = open_existing_db(&db_path)? else {
        return Ok(());
    };

    let event = tabletally_db::get_event(&conn, table_id)
        .map_err(|e| CliError::database(format!("Failed to look up event: {}", e)))?
        .ok_or_else(|| CliError::not_found(format!("event for table {}", table_id)))?;

    log::info!(
        "{} {}",
        format!("Table {}", event.table_id).if_supports_color(Stdout, |t| t.bold()),
        format!("[{}]", event.catalog_name).if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "  {} {}",
        "Imported:".if_supports_color(Stdout, |t| t.cyan()),
        event.imported_at,
    );

    let moves = tabletally_db::moves_for_event(&conn, event.id)
        .map_err(|e| CliError::database(format!("Failed to query moves: {}", e)))?;

    crate::log_blank();
    log::info!(
        "  {}",
        format!("{} move(s):", moves.len()).if_supports_color(Stdout, |t| t.bright_magenta()),
    );
    for mv in &moves {
        let move_no = mv
            .move_no
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        let remaining = match &mv.remaining_time {
            Some(r) => format!(" ({} left)", r),
            None => String::new(),
        };
        log::info!(
            "    {:>4}  {}  {}{}",
            move_no,
            mv.actor.if_supports_color(Stdout, |t| t.bold()),
            mv.local_time,
            remaining.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    Ok(())
}

/// Run the `show tournament` command.
pub(crate) fn run_show_tournament(id: i64, db_path: Option<PathBuf>) -> Result<(), CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let Some(conn) = open_existing_db(&db_path)? else {
        return Ok(());
    };

    let tournament = tabletally_db::get_tournament(&conn, id)
        .map_err(|e| CliError::database(format!("Failed to look up tournament: {}", e)))?
        .ok_or_else(|| CliError::not_found(format!("tournament {}", id)))?;

    log::info!(
        "{} {} {}",
        format!("#{}", tournament.external_id).if_supports_color(Stdout, |t| t.dimmed()),
        tournament.name.if_supports_color(Stdout, |t| t.bold()),
        format!("[{}]", tournament.catalog_name).if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "  {}       {} (limit {})",
        "Rounds:".if_supports_color(Stdout, |t| t.cyan()),
        tournament.rounds,
        tournament.round_limit,
    );
    log::info!(
        "  {}      {} ({} timed out)",
        "Matches:".if_supports_color(Stdout, |t| t.cyan()),
        tournament.total_matches,
        tournament.timeout_matches,
    );
    log::info!(
        "  {} {}",
        "Participants:".if_supports_color(Stdout, |t| t.cyan()),
        tournament.participant_count,
    );
    log::info!(
        "  {}       {} to {}",
        "Played:".if_supports_color(Stdout, |t| t.cyan()),
        tournament.start_time,
        tournament.end_time,
    );

    let matches = tabletally_db::matches_for_tournament(&conn, tournament.id)
        .map_err(|e| CliError::database(format!("Failed to query matches: {}", e)))?;

    if matches.is_empty() {
        crate::log_blank();
        log::info!(
            "  {}",
            "No match rows stored.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    crate::log_blank();
    log::info!(
        "  {}",
        format!("{} stored match(es):", matches.len())
            .if_supports_color(Stdout, |t| t.bright_magenta()),
    );
    for m in &matches {
        let timeout = if m.timed_out {
            format!(" {}", "(timed out)".if_supports_color(Stdout, |t| t.yellow()))
        } else {
            String::new()
        };
        log::info!(
            "    {}  {}% complete{}",
            format!("table {}", m.table_id).if_supports_color(Stdout, |t| t.bold()),
            m.progress,
            timeout,
        );

        let players = tabletally_db::players_for_match(&conn, m.id)
            .map_err(|e| CliError::database(format!("Failed to query match players: {}", e)))?;
        for p in &players {
            log::info!(
                "      {}  {} point(s), {}s left",
                p.name.if_supports_color(Stdout, |t| t.bold()),
                p.points,
                p.remaining_seconds,
            );
        }
    }

    Ok(())
}
