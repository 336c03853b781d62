//! Data model for the board-game stats archive.
//!
//! This crate defines the persistent entity types and the normalized records
//! the format parsers produce, without any database or I/O dependencies.
//! Consumers pass these to `tabletally-db` for persistence.

pub mod records;
pub mod types;

pub use records::{
    BracketMatchRecord, BracketPlayerRecord, ItemStatRecord, ListingRecord, MoveRecord,
    ParticipantRecord, TimelineRecord, TournamentRecord,
};
pub use types::*;
