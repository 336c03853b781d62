//! Normalized records produced by the format parsers.
//!
//! Parsers emit these after field validation and coercion; the import
//! drivers persist them without further interpretation.

use crate::types::CatalogStatus;

// ── Catalog listing ─────────────────────────────────────────────────────────

/// One validated catalog listing line.
#[derive(Debug, Clone)]
pub struct ListingRecord {
    pub external_id: i64,
    pub slug: String,
    pub display_name: String,
    pub status: CatalogStatus,
    pub premium: bool,
}

// ── Participant statistics ──────────────────────────────────────────────────

/// A participant's aggregate counters plus per-item stat lines, grouped
/// from interleaved rows by the leading name field.
#[derive(Debug, Clone)]
pub struct ParticipantRecord {
    pub name: String,
    pub xp: i64,
    pub karma: i64,
    pub total_matches: i64,
    pub total_wins: i64,
    pub abandoned_count: i64,
    pub timeout_count: i64,
    pub recent_matches: i64,
    pub last_seen_days: i64,
    pub item_stats: Vec<ItemStatRecord>,
}

/// One per-item stat line. The item is referenced by display name only;
/// resolution against the catalog happens at persistence time.
#[derive(Debug, Clone)]
pub struct ItemStatRecord {
    pub catalog_name: String,
    pub rating: Option<String>,
    pub rank: Option<String>,
    pub played: i64,
    pub won: i64,
}

// ── Event timeline ──────────────────────────────────────────────────────────

/// A match event and its move timeline. The event identity comes from the
/// first valid line of the input.
#[derive(Debug, Clone)]
pub struct TimelineRecord {
    pub table_id: i64,
    pub catalog_name: String,
    pub moves: Vec<MoveRecord>,
}

/// One timeline line.
#[derive(Debug, Clone)]
pub struct MoveRecord {
    pub move_no: Option<i64>,
    pub actor: String,
    pub local_time: String,
    pub locale_time: String,
    pub remaining_time: Option<String>,
}

// ── Tournament bracket ──────────────────────────────────────────────────────

/// A tournament summary with the match rows attributed to it.
#[derive(Debug, Clone)]
pub struct TournamentRecord {
    pub external_id: i64,
    pub name: String,
    pub catalog_name: String,
    pub start_time: String,
    pub end_time: String,
    pub rounds: i64,
    pub round_limit: i64,
    pub total_matches: i64,
    pub timeout_matches: i64,
    pub participant_count: i64,
    pub matches: Vec<BracketMatchRecord>,
}

/// One match row from a bracket export.
#[derive(Debug, Clone)]
pub struct BracketMatchRecord {
    pub table_id: i64,
    pub timed_out: bool,
    pub progress: i64,
    pub players: Vec<BracketPlayerRecord>,
}

/// One (name, remaining time, points) triplet from a match row. Remaining
/// time may be negative when the player ran over their clock.
#[derive(Debug, Clone)]
pub struct BracketPlayerRecord {
    pub name: String,
    pub remaining_seconds: i64,
    pub points: i64,
}
