//! Import format detection and parsing.
//!
//! Turns raw delimiter-separated text exported from the site into the
//! validated, typed records defined in `tabletally-model`. Detection never
//! guesses between formats; parsers tolerate bad lines by collecting row
//! errors and only fail outright on structural problems.

pub mod bracket;
pub mod detect;
pub mod error;
mod fields;
pub mod listing;
pub mod participant_stats;
pub mod timeline;

pub use bracket::parse_bracket;
pub use detect::{detect, Detection, FormatKind, FormatParseError};
pub use error::{ParseError, RowError};
pub use listing::parse_listing;
pub use participant_stats::parse_participant_stats;
pub use timeline::parse_timeline;
