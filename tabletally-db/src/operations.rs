//! Write operations for the stats database.
//!
//! These are single-row primitives: find by natural key, insert, overwrite,
//! delete children. Created-versus-updated bookkeeping and transaction
//! boundaries belong to the import layer driving them.

use rusqlite::{params, Connection};
use tabletally_model::{
    BracketMatchRecord, BracketPlayerRecord, ImportLog, ItemStatRecord, ListingRecord, MoveRecord,
    ParticipantRecord, TournamentRecord,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: i64 },
}

// ── Catalog Item Operations ─────────────────────────────────────────────────

/// Find a catalog item by the site's numeric id.
pub fn find_catalog_item_by_external_id(
    conn: &Connection,
    external_id: i64,
) -> Result<Option<i64>, OperationError> {
    let result = conn.query_row(
        "SELECT id FROM catalog_items WHERE external_id = ?1",
        params![external_id],
        |row| row.get(0),
    );
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Find a catalog item referenced by display name or slug. Id-keyed items
/// win over provisional ones when both exist.
pub fn find_catalog_item_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<i64>, OperationError> {
    let result = conn.query_row(
        "SELECT id FROM catalog_items
         WHERE display_name = ?1 OR slug = ?1
         ORDER BY (external_id IS NULL), id
         LIMIT 1",
        params![name],
        |row| row.get(0),
    );
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Insert a catalog item from a listing record. Returns the new row id.
pub fn insert_catalog_item(
    conn: &Connection,
    record: &ListingRecord,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO catalog_items (external_id, slug, display_name, status, premium)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            record.external_id,
            record.slug,
            record.display_name,
            record.status.as_str(),
            record.premium,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite a catalog item with a fresh listing snapshot.
pub fn update_catalog_item(
    conn: &Connection,
    id: i64,
    record: &ListingRecord,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE catalog_items SET
             external_id = ?2,
             slug = ?3,
             display_name = ?4,
             status = ?5,
             premium = ?6,
             updated_at = datetime('now')
         WHERE id = ?1",
        params![
            id,
            record.external_id,
            record.slug,
            record.display_name,
            record.status.as_str(),
            record.premium,
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "catalog item".to_string(),
            id,
        });
    }
    Ok(())
}

/// Insert a provisional catalog item carrying only a name. External id,
/// status, and premium flag stay NULL until a listing import supplies them.
pub fn insert_provisional_item(
    conn: &Connection,
    display_name: &str,
    slug: &str,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO catalog_items (external_id, slug, display_name, status, premium)
         VALUES (NULL, ?1, ?2, NULL, NULL)",
        params![slug, display_name],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Participant Operations ──────────────────────────────────────────────────

/// Find a participant by display name (the import-facing key).
pub fn find_participant_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<i64>, OperationError> {
    let result = conn.query_row(
        "SELECT id FROM participants WHERE name = ?1",
        params![name],
        |row| row.get(0),
    );
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Insert a participant with a full counter snapshot. Returns the row id.
pub fn insert_participant(
    conn: &Connection,
    record: &ParticipantRecord,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO participants (name, xp, karma, total_matches, total_wins,
             abandoned_count, timeout_count, recent_matches, last_seen_days)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            record.name,
            record.xp,
            record.karma,
            record.total_matches,
            record.total_wins,
            record.abandoned_count,
            record.timeout_count,
            record.recent_matches,
            record.last_seen_days,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite every counter with the new snapshot. Counters are never
/// accumulated across imports.
pub fn update_participant(
    conn: &Connection,
    id: i64,
    record: &ParticipantRecord,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE participants SET
             xp = ?2,
             karma = ?3,
             total_matches = ?4,
             total_wins = ?5,
             abandoned_count = ?6,
             timeout_count = ?7,
             recent_matches = ?8,
             last_seen_days = ?9,
             updated_at = datetime('now')
         WHERE id = ?1",
        params![
            id,
            record.xp,
            record.karma,
            record.total_matches,
            record.total_wins,
            record.abandoned_count,
            record.timeout_count,
            record.recent_matches,
            record.last_seen_days,
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "participant".to_string(),
            id,
        });
    }
    Ok(())
}

// ── Item Stat Operations ────────────────────────────────────────────────────

/// Find the stat row for a (participant, catalog item) pair.
pub fn find_item_stat(
    conn: &Connection,
    participant_id: i64,
    catalog_item_id: i64,
) -> Result<Option<i64>, OperationError> {
    let result = conn.query_row(
        "SELECT id FROM participant_catalog_stats
         WHERE participant_id = ?1 AND catalog_item_id = ?2",
        params![participant_id, catalog_item_id],
        |row| row.get(0),
    );
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Insert a stat row for a pair. Returns the row id.
pub fn insert_item_stat(
    conn: &Connection,
    participant_id: i64,
    catalog_item_id: i64,
    stat: &ItemStatRecord,
    imported_at: &str,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO participant_catalog_stats
             (participant_id, catalog_item_id, rating, rank, played, won, imported_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            participant_id,
            catalog_item_id,
            stat.rating,
            stat.rank,
            stat.played,
            stat.won,
            imported_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite a pair's stat row with the new snapshot.
pub fn update_item_stat(
    conn: &Connection,
    id: i64,
    stat: &ItemStatRecord,
    imported_at: &str,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE participant_catalog_stats SET
             rating = ?2,
             rank = ?3,
             played = ?4,
             won = ?5,
             imported_at = ?6
         WHERE id = ?1",
        params![id, stat.rating, stat.rank, stat.played, stat.won, imported_at],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "item stat".to_string(),
            id,
        });
    }
    Ok(())
}

// ── Match Event Operations ──────────────────────────────────────────────────

/// Find a match event by its table id.
pub fn find_event_by_table_id(
    conn: &Connection,
    table_id: i64,
) -> Result<Option<i64>, OperationError> {
    let result = conn.query_row(
        "SELECT id FROM match_events WHERE table_id = ?1",
        params![table_id],
        |row| row.get(0),
    );
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Insert a match event header. Returns the row id.
pub fn insert_event(
    conn: &Connection,
    table_id: i64,
    catalog_name: &str,
    imported_at: &str,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO match_events (table_id, catalog_name, imported_at)
         VALUES (?1, ?2, ?3)",
        params![table_id, catalog_name, imported_at],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Refresh an event header for a re-import.
pub fn update_event(
    conn: &Connection,
    id: i64,
    catalog_name: &str,
    imported_at: &str,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE match_events SET catalog_name = ?2, imported_at = ?3 WHERE id = ?1",
        params![id, catalog_name, imported_at],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "match event".to_string(),
            id,
        });
    }
    Ok(())
}

/// Drop all moves for an event ahead of a snapshot re-insert.
pub fn delete_moves_for_event(conn: &Connection, event_id: i64) -> Result<usize, OperationError> {
    let deleted = conn.execute(
        "DELETE FROM match_moves WHERE event_id = ?1",
        params![event_id],
    )?;
    Ok(deleted)
}

/// Append one move to an event's timeline.
pub fn insert_move(
    conn: &Connection,
    event_id: i64,
    mv: &MoveRecord,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO match_moves (event_id, move_no, actor, local_time, locale_time, remaining_time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            event_id,
            mv.move_no,
            mv.actor,
            mv.local_time,
            mv.locale_time,
            mv.remaining_time,
        ],
    )?;
    Ok(())
}

// ── Tournament Operations ───────────────────────────────────────────────────

/// Find a tournament by the site's numeric id.
pub fn find_tournament_by_external_id(
    conn: &Connection,
    external_id: i64,
) -> Result<Option<i64>, OperationError> {
    let result = conn.query_row(
        "SELECT id FROM tournaments WHERE external_id = ?1",
        params![external_id],
        |row| row.get(0),
    );
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Insert a tournament summary. Returns the row id.
pub fn insert_tournament(
    conn: &Connection,
    record: &TournamentRecord,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO tournaments (external_id, name, catalog_name, start_time, end_time,
             rounds, round_limit, total_matches, timeout_matches, participant_count)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            record.external_id,
            record.name,
            record.catalog_name,
            record.start_time,
            record.end_time,
            record.rounds,
            record.round_limit,
            record.total_matches,
            record.timeout_matches,
            record.participant_count,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite a tournament summary with the new snapshot.
pub fn update_tournament(
    conn: &Connection,
    id: i64,
    record: &TournamentRecord,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE tournaments SET
             name = ?2,
             catalog_name = ?3,
             start_time = ?4,
             end_time = ?5,
             rounds = ?6,
             round_limit = ?7,
             total_matches = ?8,
             timeout_matches = ?9,
             participant_count = ?10,
             updated_at = datetime('now')
         WHERE id = ?1",
        params![
            id,
            record.name,
            record.catalog_name,
            record.start_time,
            record.end_time,
            record.rounds,
            record.round_limit,
            record.total_matches,
            record.timeout_matches,
            record.participant_count,
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "tournament".to_string(),
            id,
        });
    }
    Ok(())
}

/// Drop a tournament's matches (their player rows cascade) ahead of a
/// snapshot re-insert.
pub fn delete_matches_for_tournament(
    conn: &Connection,
    tournament_id: i64,
) -> Result<usize, OperationError> {
    let deleted = conn.execute(
        "DELETE FROM tournament_matches WHERE tournament_id = ?1",
        params![tournament_id],
    )?;
    Ok(deleted)
}

/// Insert one match row. Returns the row id for attaching player rows.
pub fn insert_tournament_match(
    conn: &Connection,
    tournament_id: i64,
    m: &BracketMatchRecord,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO tournament_matches (tournament_id, table_id, timed_out, progress)
         VALUES (?1, ?2, ?3, ?4)",
        params![tournament_id, m.table_id, m.timed_out, m.progress],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert one player result line for a match.
pub fn insert_match_player(
    conn: &Connection,
    match_id: i64,
    p: &BracketPlayerRecord,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO tournament_match_players (match_id, name, remaining_seconds, points)
         VALUES (?1, ?2, ?3, ?4)",
        params![match_id, p.name, p.remaining_seconds, p.points],
    )?;
    Ok(())
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Record an import in the log. Returns the new row id.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (format, imported_at, records_created, records_updated, row_errors)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            log.format,
            log.imported_at,
            log.records_created,
            log.records_updated,
            log.row_errors,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
