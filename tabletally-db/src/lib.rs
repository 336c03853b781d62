//! SQLite persistence layer for imported site stats.
//!
//! Provides schema creation, single-row write operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use rusqlite::Connection;

pub use operations::{
    delete_matches_for_tournament, delete_moves_for_event, find_catalog_item_by_external_id,
    find_catalog_item_by_name, find_event_by_table_id, find_item_stat, find_participant_by_name,
    find_tournament_by_external_id, insert_catalog_item, insert_event, insert_import_log,
    insert_item_stat, insert_match_player, insert_move, insert_participant,
    insert_provisional_item, insert_tournament, insert_tournament_match, update_catalog_item,
    update_event, update_item_stat, update_participant, update_tournament, OperationError,
};
pub use queries::{
    get_catalog_item, get_event, get_participant, get_tournament, list_catalog_items,
    list_import_logs, list_participants, list_tournaments, matches_for_tournament,
    moves_for_event, players_for_match, stats_for_participant, store_stats, ParticipantStatRow,
    StoreStats,
};
pub use schema::{open_database, open_memory};
