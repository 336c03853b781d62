//! Per-participant statistics parser.
//!
//! Tab-separated rows in three shapes told apart by the second field: the
//! literal `XP` marks a participant's aggregate counters, the literal
//! `Recent games` marks their recent-activity counters, and anything else
//! names a catalog item for a per-item stat row. One participant's rows
//! share the leading name field and may interleave with other
//! participants' rows; a complete participant needs exactly one row of
//! each sentinel shape.

use std::collections::HashMap;

use tabletally_model::{ItemStatRecord, ParticipantRecord};

use crate::error::{ParseError, RowError};
use crate::fields;

/// Second-field sentinel for the aggregate counters row.
pub(crate) const XP_SENTINEL: &str = "XP";
/// Second-field sentinel for the recent-activity row.
pub(crate) const RECENT_SENTINEL: &str = "Recent games";

/// Row shape, decided from the sentinel field before any value is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Aggregate,
    Recent,
    ItemStat,
}

fn classify(parts: &[&str]) -> RowKind {
    match parts.get(1).copied() {
        Some(XP_SENTINEL) => RowKind::Aggregate,
        Some(RECENT_SENTINEL) => RowKind::Recent,
        _ => RowKind::ItemStat,
    }
}

#[derive(Debug, Clone, Copy)]
struct AggregateCounters {
    xp: i64,
    karma: i64,
    total_matches: i64,
    total_wins: i64,
}

#[derive(Debug, Clone, Copy)]
struct RecentCounters {
    abandoned_count: i64,
    timeout_count: i64,
    recent_matches: i64,
    last_seen_days: i64,
}

/// Rows collected for one participant while scanning the input.
#[derive(Debug)]
struct PendingParticipant {
    name: String,
    first_line: usize,
    aggregate: Option<AggregateCounters>,
    recent: Option<RecentCounters>,
    item_stats: Vec<ItemStatRecord>,
}

/// Parse a per-participant statistics export.
///
/// Participants come out in first-appearance order. A participant missing
/// either sentinel row is dropped whole, reported as one row error at the
/// line where that participant first appeared.
pub fn parse_participant_stats(
    raw: &str,
) -> Result<(Vec<ParticipantRecord>, Vec<RowError>), ParseError> {
    let mut pending: Vec<PendingParticipant> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();
    let mut errors = Vec::new();

    for (idx, raw_line) in raw.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();

        let name = match fields::required_text(parts[0], "participant name") {
            Ok(name) => name,
            Err(message) => {
                errors.push(RowError::new(line_no, message));
                continue;
            }
        };

        let slot = match by_name.get(&name) {
            Some(&i) => i,
            None => {
                let i = pending.len();
                by_name.insert(name.clone(), i);
                pending.push(PendingParticipant {
                    name,
                    first_line: line_no,
                    aggregate: None,
                    recent: None,
                    item_stats: Vec::new(),
                });
                i
            }
        };

        if let Err(message) = apply_row(&mut pending[slot], &parts) {
            errors.push(RowError::new(line_no, message));
        }
    }

    let mut records = Vec::new();
    for entry in pending {
        match (entry.aggregate, entry.recent) {
            (Some(aggregate), Some(recent)) => records.push(ParticipantRecord {
                name: entry.name,
                xp: aggregate.xp,
                karma: aggregate.karma,
                total_matches: aggregate.total_matches,
                total_wins: aggregate.total_wins,
                abandoned_count: recent.abandoned_count,
                timeout_count: recent.timeout_count,
                recent_matches: recent.recent_matches,
                last_seen_days: recent.last_seen_days,
                item_stats: entry.item_stats,
            }),
            (None, _) => errors.push(RowError::new(
                entry.first_line,
                format!("participant '{}' has no XP row; skipped", entry.name),
            )),
            (_, None) => errors.push(RowError::new(
                entry.first_line,
                format!(
                    "participant '{}' has no 'Recent games' row; skipped",
                    entry.name
                ),
            )),
        }
    }

    // Completeness errors surface at end of input; keep the report in
    // line order.
    errors.sort_by_key(|e| e.line);

    if records.is_empty() {
        if errors.is_empty() {
            return Err(ParseError::Empty);
        }
        return Err(ParseError::NoValidRows { errors });
    }
    Ok((records, errors))
}

fn apply_row(entry: &mut PendingParticipant, parts: &[&str]) -> Result<(), String> {
    let kind = classify(parts);
    if parts.len() != 6 {
        return Err(format!("expected 6 fields, got {}", parts.len()));
    }

    match kind {
        RowKind::Aggregate => {
            if entry.aggregate.is_some() {
                return Err(format!("duplicate XP row for '{}'", entry.name));
            }
            entry.aggregate = Some(AggregateCounters {
                xp: fields::parse_int(parts[2], "xp")?,
                karma: fields::parse_int_in_range(parts[3], "karma", 0, 100)?,
                total_matches: fields::parse_int(parts[4], "total matches")?,
                total_wins: fields::parse_int(parts[5], "total wins")?,
            });
        }
        RowKind::Recent => {
            if entry.recent.is_some() {
                return Err(format!("duplicate 'Recent games' row for '{}'", entry.name));
            }
            entry.recent = Some(RecentCounters {
                abandoned_count: fields::parse_int(parts[2], "abandoned count")?,
                timeout_count: fields::parse_int(parts[3], "timeout count")?,
                recent_matches: fields::parse_int(parts[4], "recent matches")?,
                last_seen_days: fields::parse_int(parts[5], "days since last seen")?,
            });
        }
        RowKind::ItemStat => {
            let catalog_name = fields::required_text(parts[1], "catalog item name")?;
            entry.item_stats.push(ItemStatRecord {
                catalog_name,
                rating: fields::optional_text(parts[2]),
                rank: fields::optional_text(parts[3]),
                played: fields::parse_int(parts[4], "matches played")?,
                won: fields::parse_int(parts[5], "matches won")?,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOHN: &str = "JohnDoe\tXP\t45000\t95\t1250\t650\n\
                        JohnDoe\tRecent games\t2\t1\t45\t3\n\
                        JohnDoe\tTicket to Ride\t1500\t42\t150\t75";

    #[test]
    fn parses_one_participant_with_stats() {
        let (records, errors) = parse_participant_stats(JOHN).unwrap();
        assert!(errors.is_empty());
        assert_eq!(records.len(), 1);

        let john = &records[0];
        assert_eq!(john.name, "JohnDoe");
        assert_eq!(john.xp, 45000);
        assert_eq!(john.karma, 95);
        assert_eq!(john.total_matches, 1250);
        assert_eq!(john.total_wins, 650);
        assert_eq!(john.abandoned_count, 2);
        assert_eq!(john.timeout_count, 1);
        assert_eq!(john.recent_matches, 45);
        assert_eq!(john.last_seen_days, 3);

        assert_eq!(john.item_stats.len(), 1);
        let stat = &john.item_stats[0];
        assert_eq!(stat.catalog_name, "Ticket to Ride");
        assert_eq!(stat.rating.as_deref(), Some("1500"));
        assert_eq!(stat.rank.as_deref(), Some("42"));
        assert_eq!(stat.played, 150);
        assert_eq!(stat.won, 75);
    }

    #[test]
    fn malformed_line_is_reported_and_skipped() {
        let raw = format!("{JOHN}\nJohnDoe\tBadGame\tNOTANUMBER");
        let (records, errors) = parse_participant_stats(&raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item_stats.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 4);
        assert!(errors[0].message.contains("expected 6 fields"));
    }

    #[test]
    fn interleaved_participants_group_by_name() {
        let raw = "Alice\tXP\t100\t90\t10\t5\n\
                   Bob\tXP\t200\t80\t20\t8\n\
                   Alice\tRecent games\t0\t0\t3\t1\n\
                   Bob\tRecent games\t1\t0\t5\t2\n\
                   Alice\tChess\tN/A\t\t4\t2";
        let (records, errors) = parse_participant_stats(raw).unwrap();
        assert!(errors.is_empty());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Alice");
        assert_eq!(records[1].name, "Bob");
        assert_eq!(records[0].item_stats.len(), 1);
        assert!(records[1].item_stats.is_empty());
    }

    #[test]
    fn incomplete_participant_is_dropped_whole() {
        let raw = "Alice\tXP\t100\t90\t10\t5\n\
                   Alice\tChess\t1200\t7\t4\t2\n\
                   Bob\tXP\t200\t80\t20\t8\n\
                   Bob\tRecent games\t1\t0\t5\t2";
        let (records, errors) = parse_participant_stats(raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Bob");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 1);
        assert!(errors[0].message.contains("Recent games"));
    }

    #[test]
    fn duplicate_sentinel_row_keeps_the_first() {
        let raw = "Alice\tXP\t100\t90\t10\t5\n\
                   Alice\tXP\t999\t90\t10\t5\n\
                   Alice\tRecent games\t0\t0\t3\t1";
        let (records, errors) = parse_participant_stats(raw).unwrap();
        assert_eq!(records[0].xp, 100);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 2);
        assert!(errors[0].message.contains("duplicate XP row"));
    }

    #[test]
    fn karma_outside_range_is_rejected() {
        let raw = "Jane\tXP\t100\t150\t10\t5\n\
                   Jane\tRecent games\t0\t0\t3\t1\n\
                   Bob\tXP\t200\t80\t20\t8\n\
                   Bob\tRecent games\t1\t0\t5\t2";
        let (records, errors) = parse_participant_stats(raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Bob");
        // The bad karma value and the resulting incomplete participant are
        // both reported.
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("karma"));
        assert!(errors[1].message.contains("no XP row"));
    }

    #[test]
    fn empty_rating_and_rank_become_none() {
        let raw = "Alice\tXP\t100\t90\t10\t5\n\
                   Alice\tRecent games\t0\t0\t3\t1\n\
                   Alice\tChess\t\t\t4\t2";
        let (records, _) = parse_participant_stats(raw).unwrap();
        let stat = &records[0].item_stats[0];
        assert_eq!(stat.rating, None);
        assert_eq!(stat.rank, None);
    }

    #[test]
    fn nonnumeric_rating_is_kept_opaque() {
        let raw = "Alice\tXP\t100\t90\t10\t5\n\
                   Alice\tRecent games\t0\t0\t3\t1\n\
                   Alice\tChess\tN/A\t-\t4\t2";
        let (records, _) = parse_participant_stats(raw).unwrap();
        let stat = &records[0].item_stats[0];
        assert_eq!(stat.rating.as_deref(), Some("N/A"));
        assert_eq!(stat.rank.as_deref(), Some("-"));
    }

    #[test]
    fn no_complete_participant_fails() {
        let raw = "Alice\tXP\t100\t90\t10\t5";
        match parse_participant_stats(raw) {
            Err(ParseError::NoValidRows { errors }) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].message.contains("Recent games"));
            }
            other => panic!("expected NoValidRows, got {other:?}"),
        }
    }
}
