//! Catalog listing parser.
//!
//! Five tab-separated fields per line: external id, slug, display name,
//! lifecycle status, premium flag. No header row.

use tabletally_model::{CatalogStatus, ListingRecord};

use crate::error::{ParseError, RowError};
use crate::fields;

/// Parse a catalog listing export.
///
/// Bad lines become row errors; the parse only fails when the input is
/// empty or no line at all survives validation.
pub fn parse_listing(raw: &str) -> Result<(Vec<ListingRecord>, Vec<RowError>), ParseError> {
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for (idx, raw_line) in raw.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(record) => records.push(record),
            Err(message) => errors.push(RowError::new(idx + 1, message)),
        }
    }

    if records.is_empty() {
        if errors.is_empty() {
            return Err(ParseError::Empty);
        }
        return Err(ParseError::NoValidRows { errors });
    }
    Ok((records, errors))
}

fn parse_line(line: &str) -> Result<ListingRecord, String> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() != 5 {
        return Err(format!("expected 5 fields, got {}", parts.len()));
    }

    let external_id = fields::parse_positive_int(parts[0], "item id")?;
    let slug = fields::required_text(parts[1], "item name")?;
    let display_name = fields::required_text(parts[2], "display name")?;
    let status = CatalogStatus::parse(parts[3])
        .ok_or_else(|| format!("status must be alpha, beta or published, got '{}'", parts[3]))?;
    let premium = fields::parse_flag(parts[4], "premium flag")?;

    Ok(ListingRecord {
        external_id,
        slug,
        display_name,
        status,
        premium,
    })
}
