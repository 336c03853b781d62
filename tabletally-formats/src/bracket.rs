//! Tournament bracket parser.
//!
//! Tab-separated export mixing two row shapes. A summary row has exactly
//! 11 fields, one of them a mandatory empty placeholder; a match row has 4
//! fixed fields followed by one (name, remaining time, points) triplet per
//! player. Field counts tell the shapes apart: a match row has 4 + 3n
//! fields, which is never 11. Several tournaments may share one input,
//! each introduced by its own summary row.

use std::collections::HashMap;

use tabletally_model::{BracketMatchRecord, BracketPlayerRecord, TournamentRecord};

use crate::error::{ParseError, RowError};
use crate::fields;

/// Row shape, decided from the field count before any value is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Summary,
    Match,
}

fn classify(parts: &[&str]) -> RowKind {
    if parts.len() == 11 {
        RowKind::Summary
    } else {
        RowKind::Match
    }
}

/// Parse a tournament bracket export.
///
/// The first non-blank line must be a valid summary row; without one, no
/// match row can be attributed, so the parse fails structurally. Match
/// rows attach to the most recent summary carrying their tournament id.
pub fn parse_bracket(raw: &str) -> Result<(Vec<TournamentRecord>, Vec<RowError>), ParseError> {
    let mut tournaments: Vec<TournamentRecord> = Vec::new();
    let mut by_external_id: HashMap<i64, usize> = HashMap::new();
    let mut errors = Vec::new();
    let mut saw_first = false;

    for (idx, raw_line) in raw.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();

        if !saw_first {
            saw_first = true;
            match parse_summary(&parts) {
                Ok(record) => {
                    by_external_id.insert(record.external_id, 0);
                    tournaments.push(record);
                }
                Err(message) => return Err(ParseError::structural(line_no, message)),
            }
            continue;
        }

        match classify(&parts) {
            RowKind::Summary => match parse_summary(&parts) {
                Ok(record) => {
                    // A repeated id starts a fresh record; later match rows
                    // attach to the newest one.
                    by_external_id.insert(record.external_id, tournaments.len());
                    tournaments.push(record);
                }
                Err(message) => errors.push(RowError::new(line_no, message)),
            },
            RowKind::Match => match parse_match(&parts) {
                Ok((tournament_id, m)) => match by_external_id.get(&tournament_id) {
                    Some(&i) => tournaments[i].matches.push(m),
                    None => errors.push(RowError::new(
                        line_no,
                        format!("match row references unknown tournament {tournament_id}"),
                    )),
                },
                Err(message) => errors.push(RowError::new(line_no, message)),
            },
        }
    }

    if !saw_first {
        return Err(ParseError::Empty);
    }
    Ok((tournaments, errors))
}

fn parse_summary(parts: &[&str]) -> Result<TournamentRecord, String> {
    if parts.len() != 11 {
        return Err(format!(
            "summary row must have 11 fields, got {}",
            parts.len()
        ));
    }

    let external_id = fields::parse_int(parts[0], "tournament id")?;
    let name = fields::required_text(parts[1], "tournament name")?;
    if !parts[2].is_empty() {
        return Err(format!(
            "placeholder field must be empty, got '{}'",
            parts[2]
        ));
    }
    let catalog_name = fields::required_text(parts[3], "item name")?;

    Ok(TournamentRecord {
        external_id,
        name,
        catalog_name,
        start_time: parts[4].to_string(),
        end_time: parts[5].to_string(),
        rounds: fields::parse_int(parts[6], "rounds")?,
        round_limit: fields::parse_int(parts[7], "round limit")?,
        total_matches: fields::parse_int(parts[8], "total matches")?,
        timeout_matches: fields::parse_int(parts[9], "timeout matches")?,
        participant_count: fields::parse_int(parts[10], "participant count")?,
        matches: Vec::new(),
    })
}

fn parse_match(parts: &[&str]) -> Result<(i64, BracketMatchRecord), String> {
    if parts.len() < 7 {
        return Err(format!(
            "match row must have at least 7 fields, got {}",
            parts.len()
        ));
    }
    if (parts.len() - 4) % 3 != 0 {
        return Err(format!(
            "player fields must come in (name, time, points) triplets, got {} extra fields",
            parts.len() - 4
        ));
    }

    let tournament_id = fields::parse_int(parts[0], "tournament id")?;
    let table_id = fields::parse_int(parts[1], "table id")?;
    let timed_out = fields::parse_flag(parts[2], "timeout flag")?;
    let progress = fields::parse_int_in_range(parts[3], "progress", 0, 100)?;

    let mut players = Vec::new();
    for triplet in parts[4..].chunks(3) {
        players.push(BracketPlayerRecord {
            name: fields::required_text(triplet[0], "player name")?,
            remaining_seconds: fields::parse_int(triplet[1], "remaining time")?,
            points: fields::parse_int(triplet[2], "points")?,
        });
    }

    Ok((
        tournament_id,
        BracketMatchRecord {
            table_id,
            timed_out,
            progress,
            players,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUP: &str = "55\tSpring Cup\t\tChess\t2024-01-01\t2024-02-01\t5\t8\t24\t3\t16\n\
                       55\t9901\t0\t100\tAlice\t120\t2\tBob\t-30\t0\n\
                       55\t9902\t1\t60\tCarol\t-5\t1\tDave\t300\t1\tErin\t45\t0";

    #[test]
    fn parses_summary_and_matches() {
        let (records, errors) = parse_bracket(CUP).unwrap();
        assert!(errors.is_empty());
        assert_eq!(records.len(), 1);

        let cup = &records[0];
        assert_eq!(cup.external_id, 55);
        assert_eq!(cup.name, "Spring Cup");
        assert_eq!(cup.catalog_name, "Chess");
        assert_eq!(cup.rounds, 5);
        assert_eq!(cup.round_limit, 8);
        assert_eq!(cup.total_matches, 24);
        assert_eq!(cup.timeout_matches, 3);
        assert_eq!(cup.participant_count, 16);
        assert_eq!(cup.matches.len(), 2);

        let first = &cup.matches[0];
        assert_eq!(first.table_id, 9901);
        assert!(!first.timed_out);
        assert_eq!(first.progress, 100);
        assert_eq!(first.players.len(), 2);
        assert_eq!(first.players[1].name, "Bob");
        assert_eq!(first.players[1].remaining_seconds, -30);

        let second = &cup.matches[1];
        assert!(second.timed_out);
        assert_eq!(second.players.len(), 3);
        assert_eq!(second.players[0].remaining_seconds, -5);
    }

    #[test]
    fn missing_placeholder_fails_structurally() {
        // 10 fields: the mandatory empty third field is gone.
        let raw = "55\tSpring Cup\tChess\t2024-01-01\t2024-02-01\t5\t8\t24\t3\t16";
        match parse_bracket(raw) {
            Err(ParseError::Structural { line, message }) => {
                assert_eq!(line, 1);
                assert!(message.contains("11 fields"));
            }
            other => panic!("expected Structural, got {other:?}"),
        }
    }

    #[test]
    fn nonempty_placeholder_fails_structurally_on_first_row() {
        let raw = "55\tSpring Cup\tX\tChess\t2024-01-01\t2024-02-01\t5\t8\t24\t3\t16";
        match parse_bracket(raw) {
            Err(ParseError::Structural { line, message }) => {
                assert_eq!(line, 1);
                assert!(message.contains("placeholder"));
            }
            other => panic!("expected Structural, got {other:?}"),
        }
    }

    #[test]
    fn match_shaped_first_row_fails_structurally() {
        let raw = "55\t9901\t0\t100\tAlice\t120\t2";
        assert!(matches!(
            parse_bracket(raw),
            Err(ParseError::Structural { line: 1, .. })
        ));
    }

    #[test]
    fn two_tournaments_in_one_input() {
        let raw = "55\tSpring Cup\t\tChess\t2024-01-01\t2024-02-01\t5\t8\t24\t3\t16\n\
                   55\t9901\t0\t100\tAlice\t120\t2\tBob\t-30\t0\n\
                   56\tSummer Cup\t\tGo\t2024-06-01\t2024-07-01\t3\t6\t12\t0\t8\n\
                   56\t9950\t0\t100\tCarol\t60\t1\tDave\t90\t0";
        let (records, errors) = parse_bracket(raw).unwrap();
        assert!(errors.is_empty());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].matches.len(), 1);
        assert_eq!(records[1].matches.len(), 1);
        assert_eq!(records[1].name, "Summer Cup");
    }

    #[test]
    fn match_for_unknown_tournament_is_a_row_error() {
        let raw = "55\tSpring Cup\t\tChess\t2024-01-01\t2024-02-01\t5\t8\t24\t3\t16\n\
                   77\t9901\t0\t100\tAlice\t120\t2\tBob\t-30\t0";
        let (records, errors) = parse_bracket(raw).unwrap();
        assert!(records[0].matches.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 2);
        assert!(errors[0].message.contains("unknown tournament 77"));
    }

    #[test]
    fn broken_triplet_is_a_row_error() {
        let raw = "55\tSpring Cup\t\tChess\t2024-01-01\t2024-02-01\t5\t8\t24\t3\t16\n\
                   55\t9901\t0\t100\tAlice\t120\t2\tBob\t-30";
        let (records, errors) = parse_bracket(raw).unwrap();
        assert!(records[0].matches.is_empty());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("triplets"));
    }

    #[test]
    fn progress_outside_range_is_a_row_error() {
        let raw = "55\tSpring Cup\t\tChess\t2024-01-01\t2024-02-01\t5\t8\t24\t3\t16\n\
                   55\t9901\t0\t150\tAlice\t120\t2";
        let (_, errors) = parse_bracket(raw).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("progress"));
    }

    #[test]
    fn later_bad_summary_is_a_row_error_not_fatal() {
        let raw = "55\tSpring Cup\t\tChess\t2024-01-01\t2024-02-01\t5\t8\t24\t3\t16\n\
                   56\tSummer Cup\tX\tGo\t2024-06-01\t2024-07-01\t3\t6\t12\t0\t8";
        let (records, errors) = parse_bracket(raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 2);
        assert!(errors[0].message.contains("placeholder"));
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(parse_bracket("\n\n"), Err(ParseError::Empty)));
    }
}
