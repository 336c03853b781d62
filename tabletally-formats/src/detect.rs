//! Import format detection.
//!
//! Inspects raw export text and decides which import format it holds.
//! Detection never guesses: when zero or several format signatures match,
//! the result is [`Detection::Ambiguous`] and the caller has to ask for an
//! explicit format instead.

use serde::Serialize;

use crate::fields;
use crate::participant_stats::{RECENT_SENTINEL, XP_SENTINEL};

/// The four export formats the site produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatKind {
    CatalogListing,
    ParticipantStats,
    EventTimeline,
    TournamentBracket,
}

/// All format variants in detection order.
const ALL_FORMATS: &[FormatKind] = &[
    FormatKind::CatalogListing,
    FormatKind::ParticipantStats,
    FormatKind::EventTimeline,
    FormatKind::TournamentBracket,
];

impl FormatKind {
    /// Canonical short name used for CLI arguments.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::CatalogListing => "listing",
            Self::ParticipantStats => "stats",
            Self::EventTimeline => "timeline",
            Self::TournamentBracket => "bracket",
        }
    }

    /// Human-readable name for messages and summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CatalogListing => "catalog listing",
            Self::ParticipantStats => "participant stats",
            Self::EventTimeline => "event timeline",
            Self::TournamentBracket => "tournament bracket",
        }
    }

    /// All accepted names for this format (case-insensitive matching).
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::CatalogListing => &["listing", "catalog", "catalog-listing"],
            Self::ParticipantStats => &["stats", "participant-stats", "player-stats"],
            Self::EventTimeline => &["timeline", "moves", "event-timeline"],
            Self::TournamentBracket => &["bracket", "tournament", "tournament-bracket"],
        }
    }

    /// All four format variants.
    pub fn all() -> &'static [FormatKind] {
        ALL_FORMATS
    }
}

impl std::fmt::Display for FormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string cannot be parsed into a `FormatKind`.
#[derive(Debug, Clone)]
pub struct FormatParseError(pub String);

impl std::fmt::Display for FormatParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown format: '{}'", self.0)
    }
}

impl std::error::Error for FormatParseError {}

impl std::str::FromStr for FormatKind {
    type Err = FormatParseError;

    /// Parse a format from any recognized name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        for &format in ALL_FORMATS {
            if format.short_name() == lower {
                return Ok(format);
            }
            for alias in format.aliases() {
                if *alias == lower {
                    return Ok(format);
                }
            }
        }
        Err(FormatParseError(s.to_string()))
    }
}

/// Outcome of format detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Exactly one format signature matched.
    Known(FormatKind),
    /// Zero or several signatures matched; the caller must select a format
    /// explicitly. An empty candidate list means nothing matched at all.
    Ambiguous(Vec<FormatKind>),
}

/// Decide which import format `raw` holds.
///
/// Lines are classified by delimiter first: a line containing a tab is
/// tab-delimited, otherwise a line containing a semicolon is
/// semicolon-delimited. Inputs mixing both kinds of line never resolve to
/// a format.
pub fn detect(raw: &str) -> Detection {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return Detection::Ambiguous(Vec::new());
    }

    let mut saw_tab = false;
    let mut saw_semicolon = false;
    for line in &lines {
        if line.contains('\t') {
            saw_tab = true;
        } else if line.contains(';') {
            saw_semicolon = true;
        }
    }
    if saw_tab && saw_semicolon {
        return Detection::Ambiguous(Vec::new());
    }

    let mut candidates = Vec::new();
    if matches_listing(&lines) {
        candidates.push(FormatKind::CatalogListing);
    }
    if matches_participant_stats(&lines) {
        candidates.push(FormatKind::ParticipantStats);
    }
    if matches_timeline(&lines) {
        candidates.push(FormatKind::EventTimeline);
    }
    if matches_bracket(&lines) {
        candidates.push(FormatKind::TournamentBracket);
    }

    if candidates.len() == 1 {
        Detection::Known(candidates[0])
    } else {
        Detection::Ambiguous(candidates)
    }
}

/// Every line: exactly 5 tab fields, numeric id first, 0/1 flag last.
fn matches_listing(lines: &[&str]) -> bool {
    lines.iter().all(|line| {
        let parts: Vec<&str> = line.split('\t').collect();
        parts.len() == 5 && fields::is_integer(parts[0]) && matches!(parts[4], "0" | "1")
    })
}

/// At least one `XP` row and one `Recent games` row, by sentinel value in
/// the second field. Malformed lines do not defeat the sentinel check;
/// they surface as row errors at parse time instead.
fn matches_participant_stats(lines: &[&str]) -> bool {
    let mut saw_xp = false;
    let mut saw_recent = false;
    for line in lines {
        match line.split('\t').nth(1) {
            Some(XP_SENTINEL) => saw_xp = true,
            Some(RECENT_SENTINEL) => saw_recent = true,
            _ => {}
        }
    }
    saw_xp && saw_recent
}

/// Every line: 7 semicolon fields, numeric table id, numeric-or-`null`
/// move number, decimal-comma timestamp in field 5.
fn matches_timeline(lines: &[&str]) -> bool {
    lines.iter().all(|line| {
        let parts: Vec<&str> = line.split(';').collect();
        parts.len() == 7
            && fields::is_integer(parts[0])
            && (parts[2] == "null" || fields::is_integer(parts[2]))
            && parts[4].contains(',')
    })
}

/// First line: the 11-field summary shape with its mandatory empty
/// placeholder. Later lines: match rows of at least 7 fields.
fn matches_bracket(lines: &[&str]) -> bool {
    let mut iter = lines.iter();
    let Some(first) = iter.next() else {
        return false;
    };
    let parts: Vec<&str> = first.split('\t').collect();
    if parts.len() != 11 || !parts[2].is_empty() {
        return false;
    }
    iter.all(|line| line.split('\t').count() >= 7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_catalog_listing() {
        let raw = "1\tchess\tChess\tpublished\t0\n42\tticket\tTicket to Ride\tpublished\t1";
        assert_eq!(detect(raw), Detection::Known(FormatKind::CatalogListing));
    }

    #[test]
    fn detects_participant_stats() {
        let raw = "JohnDoe\tXP\t45000\t95\t1250\t650\n\
                   JohnDoe\tRecent games\t2\t1\t45\t3\n\
                   JohnDoe\tTicket to Ride\t1500\t42\t150\t75";
        assert_eq!(detect(raw), Detection::Known(FormatKind::ParticipantStats));
    }

    #[test]
    fn malformed_line_does_not_defeat_stats_detection() {
        let raw = "JohnDoe\tXP\t45000\t95\t1250\t650\n\
                   JohnDoe\tRecent games\t2\t1\t45\t3\n\
                   JohnDoe\tTicket to Ride\t1500\t42\t150\t75\n\
                   JohnDoe\tBadGame\tNOTANUMBER";
        assert_eq!(detect(raw), Detection::Known(FormatKind::ParticipantStats));
    }

    #[test]
    fn detects_event_timeline() {
        let raw = "9876;Chess;1;2024-01-15 14:30:00;45278,65625;Alice;0:12:34\n\
                   9876;Chess;2;2024-01-15 14:31:10;45278,65711;Bob;0:11:02";
        assert_eq!(detect(raw), Detection::Known(FormatKind::EventTimeline));
    }

    #[test]
    fn detects_tournament_bracket() {
        let raw = "55\tSpring Cup\t\tChess\t2024-01-01\t2024-02-01\t5\t8\t24\t3\t16\n\
                   55\t9901\t0\t100\tAlice\t120\t2\tBob\t-30\t0";
        assert_eq!(detect(raw), Detection::Known(FormatKind::TournamentBracket));
    }

    #[test]
    fn mixed_delimiters_are_ambiguous() {
        let raw = "1\tchess\tChess\tpublished\t0\n9876;Chess;1;x;1,5;Alice;0:12:34";
        assert_eq!(detect(raw), Detection::Ambiguous(Vec::new()));
    }

    #[test]
    fn empty_input_is_ambiguous() {
        assert_eq!(detect(""), Detection::Ambiguous(Vec::new()));
        assert_eq!(detect("\n  \n"), Detection::Ambiguous(Vec::new()));
    }

    #[test]
    fn unrecognized_input_is_ambiguous() {
        assert_eq!(detect("hello world"), Detection::Ambiguous(Vec::new()));
    }

    #[test]
    fn format_names_round_trip() {
        for &format in FormatKind::all() {
            let parsed: FormatKind = format.short_name().parse().unwrap();
            assert_eq!(parsed, format);
        }
        assert!("bogus".parse::<FormatKind>().is_err());
    }

    #[test]
    fn format_aliases_parse() {
        assert_eq!(
            "tournament".parse::<FormatKind>().unwrap(),
            FormatKind::TournamentBracket
        );
        assert_eq!(
            "PLAYER-STATS".parse::<FormatKind>().unwrap(),
            FormatKind::ParticipantStats
        );
    }
}
