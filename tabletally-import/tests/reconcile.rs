use tabletally_db::*;
use tabletally_import::*;
use tabletally_model::*;

fn listing(external_id: i64, slug: &str, name: &str) -> ListingRecord {
    ListingRecord {
        external_id,
        slug: slug.to_string(),
        display_name: name.to_string(),
        status: CatalogStatus::Published,
        premium: false,
    }
}

fn participant(name: &str) -> ParticipantRecord {
    ParticipantRecord {
        name: name.to_string(),
        xp: 1000,
        karma: 90,
        total_matches: 20,
        total_wins: 11,
        abandoned_count: 0,
        timeout_count: 0,
        recent_matches: 4,
        last_seen_days: 1,
        item_stats: vec![],
    }
}

fn stat(rating: &str) -> ItemStatRecord {
    ItemStatRecord {
        catalog_name: String::new(),
        rating: Some(rating.to_string()),
        rank: None,
        played: 10,
        won: 5,
    }
}

#[test]
fn absorbs_matching_provisional() {
    let conn = open_memory().unwrap();
    let p = insert_participant(&conn, &participant("JohnDoe")).unwrap();
    let prov = insert_provisional_item(&conn, "Ticket to Ride", "ticket-to-ride").unwrap();
    insert_item_stat(&conn, p, prov, &stat("1500"), "2024-06-01T00:00:00Z").unwrap();
    let target = insert_catalog_item(&conn, &listing(42, "ticket", "Ticket to Ride")).unwrap();

    let stats = reconcile_catalog_items(&conn).unwrap();
    assert_eq!(stats.absorbed, 1);
    assert_eq!(stats.stats_moved, 1);
    assert_eq!(stats.stats_dropped, 0);

    // The provisional row is gone; the stat row follows the id-keyed item.
    assert_eq!(find_catalog_item_by_name(&conn, "Ticket to Ride").unwrap(), Some(target));
    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM catalog_items", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 1);
    assert!(find_item_stat(&conn, p, target).unwrap().is_some());
}

#[test]
fn slug_reference_also_absorbs() {
    let conn = open_memory().unwrap();
    // A stat row that referenced the item by its slug left a provisional
    // whose display name is that slug.
    insert_provisional_item(&conn, "ticket", "ticket").unwrap();
    let target = insert_catalog_item(&conn, &listing(42, "ticket", "Ticket to Ride")).unwrap();

    let stats = reconcile_catalog_items(&conn).unwrap();
    assert_eq!(stats.absorbed, 1);
    assert_eq!(find_catalog_item_by_name(&conn, "ticket").unwrap(), Some(target));
}

#[test]
fn conflicting_pair_keeps_the_target_row() {
    let conn = open_memory().unwrap();
    let p = insert_participant(&conn, &participant("JohnDoe")).unwrap();
    let target = insert_catalog_item(&conn, &listing(42, "ticket", "Ticket to Ride")).unwrap();
    let prov = insert_provisional_item(&conn, "Ticket to Ride", "ticket-to-ride").unwrap();
    insert_item_stat(&conn, p, target, &stat("1600"), "2024-06-02T00:00:00Z").unwrap();
    insert_item_stat(&conn, p, prov, &stat("1500"), "2024-06-01T00:00:00Z").unwrap();

    let stats = reconcile_catalog_items(&conn).unwrap();
    assert_eq!(stats.absorbed, 1);
    assert_eq!(stats.stats_moved, 0);
    assert_eq!(stats.stats_dropped, 1);

    let rows = stats_for_participant(&conn, p).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].rating.as_deref(), Some("1600"));
}

#[test]
fn unmatched_provisional_is_left_alone() {
    let conn = open_memory().unwrap();
    let prov = insert_provisional_item(&conn, "Cascadia", "cascadia").unwrap();
    insert_catalog_item(&conn, &listing(1, "chess", "Chess")).unwrap();

    let stats = reconcile_catalog_items(&conn).unwrap();
    assert_eq!(stats.absorbed, 0);
    assert_eq!(find_catalog_item_by_name(&conn, "Cascadia").unwrap(), Some(prov));
}

#[test]
fn empty_store_reconciles_to_zero() {
    let conn = open_memory().unwrap();
    let stats = reconcile_catalog_items(&conn).unwrap();
    assert_eq!(stats.absorbed, 0);
    assert_eq!(stats.stats_moved, 0);
    assert_eq!(stats.stats_dropped, 0);
}

#[test]
fn rolled_back_run_changes_nothing() {
    let conn = open_memory().unwrap();
    insert_provisional_item(&conn, "Ticket to Ride", "ticket-to-ride").unwrap();
    insert_catalog_item(&conn, &listing(42, "ticket", "Ticket to Ride")).unwrap();

    // Dry runs wrap the reconciler in a transaction and drop it uncommitted.
    {
        let tx = conn.unchecked_transaction().unwrap();
        let stats = reconcile_catalog_items(&tx).unwrap();
        assert_eq!(stats.absorbed, 1);
    }

    let remaining: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM catalog_items WHERE external_id IS NULL",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(remaining, 1);
}
