//! Read queries for the stats database.
//!
//! Provides catalog and participant lookups, per-pair stat listings,
//! timeline and tournament detail, and store-wide counts.

use rusqlite::{params, Connection};
use tabletally_model::types::*;

use crate::operations::OperationError;

// ── Catalog Item Queries ────────────────────────────────────────────────────

/// List catalog items, optionally filtered by a name substring.
pub fn list_catalog_items(
    conn: &Connection,
    filter: Option<&str>,
) -> Result<Vec<CatalogItem>, OperationError> {
    match filter {
        Some(query) => {
            let pattern = format!("%{}%", query);
            let mut stmt = conn.prepare(
                "SELECT id, external_id, slug, display_name, status, premium,
                        created_at, updated_at
                 FROM catalog_items
                 WHERE display_name LIKE ?1 OR slug LIKE ?1
                 ORDER BY display_name LIMIT 100",
            )?;
            let rows = stmt.query_map(params![pattern], row_to_catalog_item)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT id, external_id, slug, display_name, status, premium,
                        created_at, updated_at
                 FROM catalog_items ORDER BY display_name",
            )?;
            let rows = stmt.query_map([], row_to_catalog_item)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        }
    }
}

/// Look up one catalog item by display name or slug. Id-keyed items win
/// over provisional ones when both carry the same name.
pub fn get_catalog_item(
    conn: &Connection,
    name: &str,
) -> Result<Option<CatalogItem>, OperationError> {
    let result = conn.query_row(
        "SELECT id, external_id, slug, display_name, status, premium,
                created_at, updated_at
         FROM catalog_items
         WHERE display_name = ?1 OR slug = ?1
         ORDER BY (external_id IS NULL), id
         LIMIT 1",
        params![name],
        row_to_catalog_item,
    );
    match result {
        Ok(item) => Ok(Some(item)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Participant Queries ─────────────────────────────────────────────────────

/// List all participants ordered by name.
pub fn list_participants(conn: &Connection) -> Result<Vec<Participant>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, external_id, name, xp, karma, total_matches, total_wins,
                abandoned_count, timeout_count, recent_matches, last_seen_days,
                created_at, updated_at
         FROM participants ORDER BY name",
    )?;
    let rows = stmt.query_map([], row_to_participant)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Look up one participant by name.
pub fn get_participant(
    conn: &Connection,
    name: &str,
) -> Result<Option<Participant>, OperationError> {
    let result = conn.query_row(
        "SELECT id, external_id, name, xp, karma, total_matches, total_wins,
                abandoned_count, timeout_count, recent_matches, last_seen_days,
                created_at, updated_at
         FROM participants WHERE name = ?1",
        params![name],
        row_to_participant,
    );
    match result {
        Ok(p) => Ok(Some(p)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List a participant's per-item stats with catalog names resolved.
pub fn stats_for_participant(
    conn: &Connection,
    participant_id: i64,
) -> Result<Vec<ParticipantStatRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT c.display_name, s.rating, s.rank, s.played, s.won, s.imported_at
         FROM participant_catalog_stats s
         JOIN catalog_items c ON c.id = s.catalog_item_id
         WHERE s.participant_id = ?1
         ORDER BY c.display_name",
    )?;
    let rows = stmt.query_map(params![participant_id], |row| {
        Ok(ParticipantStatRow {
            item_name: row.get(0)?,
            rating: row.get(1)?,
            rank: row.get(2)?,
            played: row.get(3)?,
            won: row.get(4)?,
            imported_at: row.get(5)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// One per-item stat line with the catalog name already joined in.
#[derive(Debug)]
pub struct ParticipantStatRow {
    pub item_name: String,
    pub rating: Option<String>,
    pub rank: Option<String>,
    pub played: i64,
    pub won: i64,
    pub imported_at: String,
}

// ── Match Event Queries ─────────────────────────────────────────────────────

/// Look up a match event by its table id.
pub fn get_event(conn: &Connection, table_id: i64) -> Result<Option<MatchEvent>, OperationError> {
    let result = conn.query_row(
        "SELECT id, table_id, catalog_name, imported_at
         FROM match_events WHERE table_id = ?1",
        params![table_id],
        |row| {
            Ok(MatchEvent {
                id: row.get(0)?,
                table_id: row.get(1)?,
                catalog_name: row.get(2)?,
                imported_at: row.get(3)?,
            })
        },
    );
    match result {
        Ok(event) => Ok(Some(event)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List an event's moves in the order they were imported.
pub fn moves_for_event(
    conn: &Connection,
    event_id: i64,
) -> Result<Vec<MatchMove>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, event_id, move_no, actor, local_time, locale_time, remaining_time
         FROM match_moves WHERE event_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![event_id], |row| {
        Ok(MatchMove {
            id: row.get(0)?,
            event_id: row.get(1)?,
            move_no: row.get(2)?,
            actor: row.get(3)?,
            local_time: row.get(4)?,
            locale_time: row.get(5)?,
            remaining_time: row.get(6)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Tournament Queries ──────────────────────────────────────────────────────

/// List all tournaments ordered by name.
pub fn list_tournaments(conn: &Connection) -> Result<Vec<Tournament>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, external_id, name, catalog_name, start_time, end_time,
                rounds, round_limit, total_matches, timeout_matches,
                participant_count, created_at, updated_at
         FROM tournaments ORDER BY name",
    )?;
    let rows = stmt.query_map([], row_to_tournament)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Look up a tournament by the site's numeric id.
pub fn get_tournament(
    conn: &Connection,
    external_id: i64,
) -> Result<Option<Tournament>, OperationError> {
    let result = conn.query_row(
        "SELECT id, external_id, name, catalog_name, start_time, end_time,
                rounds, round_limit, total_matches, timeout_matches,
                participant_count, created_at, updated_at
         FROM tournaments WHERE external_id = ?1",
        params![external_id],
        row_to_tournament,
    );
    match result {
        Ok(t) => Ok(Some(t)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List a tournament's matches in import order.
pub fn matches_for_tournament(
    conn: &Connection,
    tournament_id: i64,
) -> Result<Vec<TournamentMatch>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, tournament_id, table_id, timed_out, progress
         FROM tournament_matches WHERE tournament_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![tournament_id], |row| {
        Ok(TournamentMatch {
            id: row.get(0)?,
            tournament_id: row.get(1)?,
            table_id: row.get(2)?,
            timed_out: row.get(3)?,
            progress: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List the player result lines for one match.
pub fn players_for_match(
    conn: &Connection,
    match_id: i64,
) -> Result<Vec<TournamentMatchPlayer>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, match_id, name, remaining_seconds, points
         FROM tournament_match_players WHERE match_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![match_id], |row| {
        Ok(TournamentMatchPlayer {
            id: row.get(0)?,
            match_id: row.get(1)?,
            name: row.get(2)?,
            remaining_seconds: row.get(3)?,
            points: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get overall store statistics.
pub fn store_stats(conn: &Connection) -> Result<StoreStats, OperationError> {
    let catalog_items: i64 =
        conn.query_row("SELECT COUNT(*) FROM catalog_items", [], |r| r.get(0))?;
    let provisional: i64 = conn.query_row(
        "SELECT COUNT(*) FROM catalog_items WHERE external_id IS NULL",
        [],
        |r| r.get(0),
    )?;
    let participants: i64 =
        conn.query_row("SELECT COUNT(*) FROM participants", [], |r| r.get(0))?;
    let item_stats: i64 = conn.query_row(
        "SELECT COUNT(*) FROM participant_catalog_stats",
        [],
        |r| r.get(0),
    )?;
    let match_events: i64 =
        conn.query_row("SELECT COUNT(*) FROM match_events", [], |r| r.get(0))?;
    let match_moves: i64 =
        conn.query_row("SELECT COUNT(*) FROM match_moves", [], |r| r.get(0))?;
    let tournaments: i64 =
        conn.query_row("SELECT COUNT(*) FROM tournaments", [], |r| r.get(0))?;
    let tournament_matches: i64 =
        conn.query_row("SELECT COUNT(*) FROM tournament_matches", [], |r| r.get(0))?;
    let imports: i64 = conn.query_row("SELECT COUNT(*) FROM import_log", [], |r| r.get(0))?;

    Ok(StoreStats {
        catalog_items,
        provisional_items: provisional,
        participants,
        item_stats,
        match_events,
        match_moves,
        tournaments,
        tournament_matches,
        imports,
    })
}

/// Summary statistics for the store.
#[derive(Debug)]
pub struct StoreStats {
    pub catalog_items: i64,
    pub provisional_items: i64,
    pub participants: i64,
    pub item_stats: i64,
    pub match_events: i64,
    pub match_moves: i64,
    pub tournaments: i64,
    pub tournament_matches: i64,
    pub imports: i64,
}

// ── Import Log Queries ──────────────────────────────────────────────────────

/// List recent import logs.
pub fn list_import_logs(
    conn: &Connection,
    limit: Option<u32>,
) -> Result<Vec<ImportLog>, OperationError> {
    let limit = limit.unwrap_or(20);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, format, records_created, records_updated, row_errors, imported_at
         FROM import_log ORDER BY imported_at DESC, id DESC LIMIT {limit}"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            format: row.get(1)?,
            records_created: row.get(2)?,
            records_updated: row.get(3)?,
            row_errors: row.get(4)?,
            imported_at: row.get(5)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_catalog_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<CatalogItem> {
    let status: Option<String> = row.get(4)?;
    Ok(CatalogItem {
        id: row.get(0)?,
        external_id: row.get(1)?,
        slug: row.get(2)?,
        display_name: row.get(3)?,
        status: status.as_deref().and_then(CatalogStatus::parse),
        premium: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn row_to_participant(row: &rusqlite::Row<'_>) -> rusqlite::Result<Participant> {
    Ok(Participant {
        id: row.get(0)?,
        external_id: row.get(1)?,
        name: row.get(2)?,
        xp: row.get(3)?,
        karma: row.get(4)?,
        total_matches: row.get(5)?,
        total_wins: row.get(6)?,
        abandoned_count: row.get(7)?,
        timeout_count: row.get(8)?,
        recent_matches: row.get(9)?,
        last_seen_days: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

fn row_to_tournament(row: &rusqlite::Row<'_>) -> rusqlite::Result<Tournament> {
    Ok(Tournament {
        id: row.get(0)?,
        external_id: row.get(1)?,
        name: row.get(2)?,
        catalog_name: row.get(3)?,
        start_time: row.get(4)?,
        end_time: row.get(5)?,
        rounds: row.get(6)?,
        round_limit: row.get(7)?,
        total_matches: row.get(8)?,
        timeout_matches: row.get(9)?,
        participant_count: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}
