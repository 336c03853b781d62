//! Provisional catalog item absorption.
//!
//! Stat rows reference catalog items by name, so a stats import may create
//! provisional items carrying nothing but that name. Once a catalog listing
//! supplies id-keyed entries, a provisional row whose name matches a listed
//! item's display name or slug is absorbed: its stat rows move over and the
//! provisional row is deleted.

use rusqlite::{params, Connection};
use tabletally_db::operations::OperationError;

/// Statistics from a reconciliation run.
#[derive(Debug, Default)]
pub struct ReconcileStats {
    pub absorbed: usize,
    pub stats_moved: usize,
    pub stats_dropped: usize,
}

/// A provisional row paired with the id-keyed item that absorbs it.
struct Candidate {
    provisional_id: i64,
    provisional_name: String,
    target_id: i64,
    target_name: String,
}

/// Absorb provisional catalog items into id-keyed ones carrying the same
/// name.
///
/// Callers own the transaction: the listing import runs this inside its
/// import transaction, and the CLI command wraps it in one of its own
/// (rolled back for a dry run).
pub fn reconcile_catalog_items(conn: &Connection) -> Result<ReconcileStats, OperationError> {
    let mut stats = ReconcileStats::default();

    for candidate in find_candidates(conn)? {
        // Stat rows follow the item. A pair the target already has keeps
        // the target's row; the provisional copy is dropped.
        let moved = conn.execute(
            "UPDATE OR IGNORE participant_catalog_stats
             SET catalog_item_id = ?2 WHERE catalog_item_id = ?1",
            params![candidate.provisional_id, candidate.target_id],
        )?;
        let dropped = conn.execute(
            "DELETE FROM participant_catalog_stats WHERE catalog_item_id = ?1",
            params![candidate.provisional_id],
        )?;
        if dropped > 0 {
            log::warn!(
                "Dropped {} stat row(s) from provisional '{}' already present on '{}'",
                dropped,
                candidate.provisional_name,
                candidate.target_name
            );
        }
        conn.execute(
            "DELETE FROM catalog_items WHERE id = ?1",
            params![candidate.provisional_id],
        )?;

        log::debug!(
            "Absorbed provisional '{}' into '{}'",
            candidate.provisional_name,
            candidate.target_name
        );
        stats.absorbed += 1;
        stats.stats_moved += moved;
        stats.stats_dropped += dropped;
    }

    Ok(stats)
}

/// Pair each provisional item with an absorbing id-keyed item, matching the
/// provisional's name against listed display names and slugs.
fn find_candidates(conn: &Connection) -> Result<Vec<Candidate>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.display_name, t.id, t.display_name
         FROM catalog_items p
         JOIN catalog_items t
           ON t.external_id IS NOT NULL
          AND (t.display_name = p.display_name OR t.slug = p.display_name)
         WHERE p.external_id IS NULL
         ORDER BY p.id, t.id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Candidate {
            provisional_id: row.get(0)?,
            provisional_name: row.get(1)?,
            target_id: row.get(2)?,
            target_name: row.get(3)?,
        })
    })?;
    let mut candidates: Vec<Candidate> = rows.collect::<Result<Vec<_>, _>>()?;
    // Several listed items can match one provisional; the lowest target id
    // wins.
    candidates.dedup_by_key(|c| c.provisional_id);
    Ok(candidates)
}
