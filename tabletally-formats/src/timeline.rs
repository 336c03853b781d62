//! Event timeline parser.
//!
//! Semicolon-delimited move log for a single table. Seven fields per line:
//! table id, catalog item name, move number (or the literal `null`), local
//! datetime, locale-formatted numeric datetime, actor name, remaining
//! time. The event identity is fixed by the first valid line; lines naming
//! a different table are reported, not fatal.

use tabletally_model::{MoveRecord, TimelineRecord};

use crate::error::{ParseError, RowError};
use crate::fields;

/// Parse an event timeline export into one event and its moves.
pub fn parse_timeline(raw: &str) -> Result<(TimelineRecord, Vec<RowError>), ParseError> {
    let mut identity: Option<(i64, String)> = None;
    let mut moves = Vec::new();
    let mut errors = Vec::new();

    for (idx, raw_line) in raw.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let (table_id, catalog_name, mv) = match parse_line(line) {
            Ok(parsed) => parsed,
            Err(message) => {
                errors.push(RowError::new(line_no, message));
                continue;
            }
        };

        match &identity {
            None => {
                identity = Some((table_id, catalog_name));
                moves.push(mv);
            }
            Some((event_table, event_name)) => {
                if table_id != *event_table || catalog_name != *event_name {
                    errors.push(RowError::new(
                        line_no,
                        format!(
                            "table {table_id} ('{catalog_name}') does not match \
                             event table {event_table} ('{event_name}')"
                        ),
                    ));
                } else {
                    moves.push(mv);
                }
            }
        }
    }

    match identity {
        Some((table_id, catalog_name)) => Ok((
            TimelineRecord {
                table_id,
                catalog_name,
                moves,
            },
            errors,
        )),
        None if errors.is_empty() => Err(ParseError::Empty),
        None => Err(ParseError::NoValidRows { errors }),
    }
}

fn parse_line(line: &str) -> Result<(i64, String, MoveRecord), String> {
    let parts: Vec<&str> = line.split(';').collect();
    if parts.len() != 7 {
        return Err(format!("expected 7 fields, got {}", parts.len()));
    }

    let table_id = fields::parse_int(parts[0], "table id")?;
    let catalog_name = fields::required_text(parts[1], "item name")?;
    let move_no = if parts[2] == "null" {
        None
    } else {
        Some(fields::parse_int(parts[2], "move number")?)
    };
    let locale_time = parts[4];
    if !locale_time.contains(',') {
        return Err(format!(
            "locale timestamp must use a decimal comma, got '{locale_time}'"
        ));
    }
    let actor = fields::required_text(parts[5], "actor name")?;

    Ok((
        table_id,
        catalog_name,
        MoveRecord {
            move_no,
            actor,
            local_time: parts[3].to_string(),
            locale_time: locale_time.to_string(),
            remaining_time: fields::optional_text(parts[6]),
        },
    ))
}
