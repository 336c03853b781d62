//! Data model types for the stats archive.
//!
//! These types represent the persistent schema: catalog items, participants,
//! per-item statistics, match events, tournaments, and import tracking.

use serde::{Deserialize, Serialize};

// ── Catalog ─────────────────────────────────────────────────────────────────

/// A board game in the site catalog.
///
/// `external_id` is the site's numeric id and is NULL for provisional items
/// created from a name reference before any catalog listing supplied the
/// real id. Provisional items also leave `status` and `premium` unset.
#[derive(Debug, Clone)]
pub struct CatalogItem {
    pub id: i64,
    pub external_id: Option<i64>,
    pub slug: String,
    pub display_name: String,
    pub status: Option<CatalogStatus>,
    pub premium: Option<bool>,
    pub created_at: String,
    pub updated_at: String,
}

/// Lifecycle status of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogStatus {
    Alpha,
    Beta,
    Published,
}

impl CatalogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Published => "published",
        }
    }

    /// Strict parse: unknown values are rejected, never defaulted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "alpha" => Some(Self::Alpha),
            "beta" => Some(Self::Beta),
            "published" => Some(Self::Published),
            _ => None,
        }
    }
}

// ── Participant ─────────────────────────────────────────────────────────────

/// A player with lifetime and recent-activity counters.
///
/// Counters are snapshots overwritten on every import, not accumulated.
/// `name` is the import-facing key; no in-scope format carries the site's
/// numeric player id, so `external_id` stays NULL.
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: i64,
    pub external_id: Option<i64>,
    pub name: String,
    pub xp: i64,
    /// Reputation score, 0-100.
    pub karma: i64,
    pub total_matches: i64,
    pub total_wins: i64,
    pub abandoned_count: i64,
    pub timeout_count: i64,
    pub recent_matches: i64,
    pub last_seen_days: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Per-(participant, catalog item) statistics.
#[derive(Debug, Clone)]
pub struct ParticipantCatalogStat {
    pub id: i64,
    pub participant_id: i64,
    pub catalog_item_id: i64,
    /// Opaque rating text; the source emits sentinels like "N/A".
    pub rating: Option<String>,
    pub rank: Option<String>,
    pub played: i64,
    pub won: i64,
    pub imported_at: String,
}

// ── Match Events ────────────────────────────────────────────────────────────

/// A single table whose move timeline was imported.
#[derive(Debug, Clone)]
pub struct MatchEvent {
    pub id: i64,
    pub table_id: i64,
    /// Free-text item name as exported, deliberately not a catalog FK.
    pub catalog_name: String,
    pub imported_at: String,
}

/// One move in a match event timeline.
#[derive(Debug, Clone)]
pub struct MatchMove {
    pub id: i64,
    pub event_id: i64,
    pub move_no: Option<i64>,
    pub actor: String,
    pub local_time: String,
    /// Locale-formatted numeric timestamp (decimal comma), kept verbatim.
    pub locale_time: String,
    pub remaining_time: Option<String>,
}

// ── Tournaments ─────────────────────────────────────────────────────────────

/// A tournament summary row.
#[derive(Debug, Clone)]
pub struct Tournament {
    pub id: i64,
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
    pub created_at: String,
    pub updated_at: String,
}

/// One played match within a tournament.
#[derive(Debug, Clone)]
pub struct TournamentMatch {
    pub id: i64,
    pub tournament_id: i64,
    pub table_id: i64,
    pub timed_out: bool,
    /// Completion percentage, 0-100.
    pub progress: i64,
}

/// A player's result line within a tournament match.
#[derive(Debug, Clone)]
pub struct TournamentMatchPlayer {
    pub id: i64,
    pub match_id: i64,
    pub name: String,
    /// May be negative when the player ran over their clock.
    pub remaining_seconds: i64,
    pub points: i64,
}

// ── Import Tracking ─────────────────────────────────────────────────────────

/// Log entry for one import call.
#[derive(Debug, Clone)]
pub struct ImportLog {
    pub id: i64,
    pub format: String,
    pub records_created: i64,
    pub records_updated: i64,
    pub row_errors: i64,
    pub imported_at: String,
}
