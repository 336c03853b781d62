//! Import pasted stat exports into the stats database.
//!
//! The orchestrator detects the format (unless one is given), parses the
//! whole input before touching the store, then drives the per-format upsert
//! inside a single transaction that also covers the import_log row. Row
//! errors ride along in the report; only structural and database failures
//! abort the import.

use rusqlite::Connection;
use serde::Serialize;
use tabletally_db::operations::{self, OperationError};
use tabletally_formats::{
    detect, parse_bracket, parse_listing, parse_participant_stats, parse_timeline, Detection,
    FormatKind, ParseError, RowError,
};
use tabletally_model::{
    ImportLog, ListingRecord, ParticipantRecord, TimelineRecord, TournamentRecord,
};
use thiserror::Error;

use crate::reconcile::reconcile_catalog_items;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Ambiguous input: no single format matches")]
    Ambiguous(Vec<FormatKind>),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Created/updated tallies per entity kind for a single import.
///
/// Children replaced wholesale (moves, tournament matches, match players)
/// count as updated when their parent already existed.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportCounts {
    pub catalog_items_created: u64,
    pub catalog_items_updated: u64,
    pub participants_created: u64,
    pub participants_updated: u64,
    pub pair_stats_created: u64,
    pub pair_stats_updated: u64,
    pub events_created: u64,
    pub events_updated: u64,
    pub moves_created: u64,
    pub moves_updated: u64,
    pub tournaments_created: u64,
    pub tournaments_updated: u64,
    pub matches_created: u64,
    pub matches_updated: u64,
    pub match_players_created: u64,
    pub match_players_updated: u64,
}

impl ImportCounts {
    /// Tallies for the format's top-level records, as logged in import_log.
    fn primary(&self, format: FormatKind) -> (i64, i64) {
        let (created, updated) = match format {
            FormatKind::CatalogListing => (self.catalog_items_created, self.catalog_items_updated),
            FormatKind::ParticipantStats => (self.participants_created, self.participants_updated),
            FormatKind::EventTimeline => (self.events_created, self.events_updated),
            FormatKind::TournamentBracket => (self.tournaments_created, self.tournaments_updated),
        };
        (created as i64, updated as i64)
    }
}

/// Outcome of one import call. Serializes to JSON for the CLI's `--json`.
#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub format: FormatKind,
    pub counts: ImportCounts,
    pub row_errors: Vec<RowError>,
}

/// Records parsed out of the raw text, before any write.
enum Parsed {
    Listing(Vec<ListingRecord>, Vec<RowError>),
    Stats(Vec<ParticipantRecord>, Vec<RowError>),
    Timeline(TimelineRecord, Vec<RowError>),
    Bracket(Vec<TournamentRecord>, Vec<RowError>),
}

/// Import one pasted export into the store.
///
/// `explicit` skips detection. The whole input parses before the transaction
/// opens, so a structural failure leaves the store untouched; row errors are
/// tolerated as long as at least one record survives.
pub fn import_text(
    conn: &Connection,
    raw: &str,
    explicit: Option<FormatKind>,
) -> Result<ImportReport, ImportError> {
    let format = match explicit {
        Some(kind) => kind,
        None => match detect(raw) {
            Detection::Known(kind) => kind,
            Detection::Ambiguous(candidates) => return Err(ImportError::Ambiguous(candidates)),
        },
    };

    let parsed = match format {
        FormatKind::CatalogListing => {
            let (records, errors) = parse_listing(raw)?;
            Parsed::Listing(records, errors)
        }
        FormatKind::ParticipantStats => {
            let (records, errors) = parse_participant_stats(raw)?;
            Parsed::Stats(records, errors)
        }
        FormatKind::EventTimeline => {
            let (record, errors) = parse_timeline(raw)?;
            Parsed::Timeline(record, errors)
        }
        FormatKind::TournamentBracket => {
            let (records, errors) = parse_bracket(raw)?;
            Parsed::Bracket(records, errors)
        }
    };

    let imported_at = chrono::Utc::now().to_rfc3339();
    let mut counts = ImportCounts::default();
    let tx = conn.unchecked_transaction()?;

    let row_errors = match parsed {
        Parsed::Listing(records, errors) => {
            for record in &records {
                upsert_catalog_item(&tx, record, &mut counts)?;
            }
            // A listing supplies real ids, so provisional rows created by
            // earlier stats imports can be absorbed now.
            let reconciled = reconcile_catalog_items(&tx)?;
            if reconciled.absorbed > 0 {
                log::info!(
                    "Absorbed {} provisional item(s) into listed entries",
                    reconciled.absorbed
                );
            }
            errors
        }
        Parsed::Stats(records, errors) => {
            for record in &records {
                upsert_participant(&tx, record, &imported_at, &mut counts)?;
            }
            errors
        }
        Parsed::Timeline(record, errors) => {
            upsert_match_event(&tx, &record, &imported_at, &mut counts)?;
            errors
        }
        Parsed::Bracket(records, errors) => {
            for record in &records {
                upsert_tournament(&tx, record, &mut counts)?;
            }
            errors
        }
    };

    let (records_created, records_updated) = counts.primary(format);
    let log_entry = ImportLog {
        id: 0,
        format: format.short_name().to_string(),
        records_created,
        records_updated,
        row_errors: row_errors.len() as i64,
        imported_at,
    };
    operations::insert_import_log(&tx, &log_entry)?;
    tx.commit()?;

    Ok(ImportReport {
        format,
        counts,
        row_errors,
    })
}

// ── Per-format Upsert Drivers ───────────────────────────────────────────────

/// Upsert one listing row, keyed by the site's external id.
fn upsert_catalog_item(
    conn: &Connection,
    record: &ListingRecord,
    counts: &mut ImportCounts,
) -> Result<(), ImportError> {
    match operations::find_catalog_item_by_external_id(conn, record.external_id)? {
        Some(id) => {
            operations::update_catalog_item(conn, id, record)?;
            counts.catalog_items_updated += 1;
        }
        None => {
            operations::insert_catalog_item(conn, record)?;
            counts.catalog_items_created += 1;
        }
    }
    Ok(())
}

/// Upsert one participant snapshot, keyed by name, plus its per-item stats.
fn upsert_participant(
    conn: &Connection,
    record: &ParticipantRecord,
    imported_at: &str,
    counts: &mut ImportCounts,
) -> Result<(), ImportError> {
    let participant_id = match operations::find_participant_by_name(conn, &record.name)? {
        Some(id) => {
            operations::update_participant(conn, id, record)?;
            counts.participants_updated += 1;
            id
        }
        None => {
            let id = operations::insert_participant(conn, record)?;
            counts.participants_created += 1;
            id
        }
    };

    for stat in &record.item_stats {
        let item_id = find_or_create_catalog_item_by_name(conn, &stat.catalog_name, counts)?;
        match operations::find_item_stat(conn, participant_id, item_id)? {
            Some(id) => {
                operations::update_item_stat(conn, id, stat, imported_at)?;
                counts.pair_stats_updated += 1;
            }
            None => {
                operations::insert_item_stat(conn, participant_id, item_id, stat, imported_at)?;
                counts.pair_stats_created += 1;
            }
        }
    }
    Ok(())
}

/// Resolve a catalog item referenced by name alone, creating a provisional
/// row (no external id yet) when nothing carries that name.
fn find_or_create_catalog_item_by_name(
    conn: &Connection,
    name: &str,
    counts: &mut ImportCounts,
) -> Result<i64, ImportError> {
    if let Some(id) = operations::find_catalog_item_by_name(conn, name)? {
        return Ok(id);
    }
    let id = operations::insert_provisional_item(conn, name, &slugify(name))?;
    counts.catalog_items_created += 1;
    Ok(id)
}

/// Upsert one event timeline, keyed by table id. An existing event has its
/// move set replaced wholesale.
fn upsert_match_event(
    conn: &Connection,
    record: &TimelineRecord,
    imported_at: &str,
    counts: &mut ImportCounts,
) -> Result<(), ImportError> {
    let (event_id, existed) = match operations::find_event_by_table_id(conn, record.table_id)? {
        Some(id) => {
            operations::update_event(conn, id, &record.catalog_name, imported_at)?;
            operations::delete_moves_for_event(conn, id)?;
            counts.events_updated += 1;
            (id, true)
        }
        None => {
            let id =
                operations::insert_event(conn, record.table_id, &record.catalog_name, imported_at)?;
            counts.events_created += 1;
            (id, false)
        }
    };

    for mv in &record.moves {
        operations::insert_move(conn, event_id, mv)?;
    }
    if existed {
        counts.moves_updated += record.moves.len() as u64;
    } else {
        counts.moves_created += record.moves.len() as u64;
    }
    Ok(())
}

/// Upsert one tournament, keyed by external id. An existing tournament has
/// its matches (and their player rows) replaced wholesale.
fn upsert_tournament(
    conn: &Connection,
    record: &TournamentRecord,
    counts: &mut ImportCounts,
) -> Result<(), ImportError> {
    let (tournament_id, existed) =
        match operations::find_tournament_by_external_id(conn, record.external_id)? {
            Some(id) => {
                operations::update_tournament(conn, id, record)?;
                operations::delete_matches_for_tournament(conn, id)?;
                counts.tournaments_updated += 1;
                (id, true)
            }
            None => {
                let id = operations::insert_tournament(conn, record)?;
                counts.tournaments_created += 1;
                (id, false)
            }
        };

    let mut players_written = 0u64;
    for m in &record.matches {
        let match_id = operations::insert_tournament_match(conn, tournament_id, m)?;
        for p in &m.players {
            operations::insert_match_player(conn, match_id, p)?;
            players_written += 1;
        }
    }
    if existed {
        counts.matches_updated += record.matches.len() as u64;
        counts.match_players_updated += players_written;
    } else {
        counts.matches_created += record.matches.len() as u64;
        counts.match_players_created += players_written;
    }
    Ok(())
}

// ── Name Handling ───────────────────────────────────────────────────────────

/// Convert a referenced name to a URL-safe slug for provisional rows.
fn slugify(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut last_was_separator = false;

    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_separator = false;
        } else if !last_was_separator && !result.is_empty() {
            result.push('-');
            last_was_separator = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}
