use tabletally_db::*;
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
        xp: 1200,
        karma: 85,
        total_matches: 40,
        total_wins: 21,
        abandoned_count: 0,
        timeout_count: 0,
        recent_matches: 5,
        last_seen_days: 2,
        item_stats: vec![],
    }
}

#[test]
fn list_catalog_items_with_and_without_filter() {
    let conn = open_memory().unwrap();
    insert_catalog_item(&conn, &listing(1, "seasalt", "Sea Salt & Paper")).unwrap();
    insert_catalog_item(&conn, &listing(2, "hanabi", "Hanabi")).unwrap();
    insert_provisional_item(&conn, "Cascadia", "cascadia").unwrap();

    let all = list_catalog_items(&conn, None).unwrap();
    assert_eq!(all.len(), 3);
    // Ordered by display name
    assert_eq!(all[0].display_name, "Cascadia");
    assert_eq!(all[2].display_name, "Sea Salt & Paper");

    let filtered = list_catalog_items(&conn, Some("salt")).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].slug, "seasalt");
}

#[test]
fn get_catalog_item_resolves_status_and_premium() {
    let conn = open_memory().unwrap();
    let mut record = listing(7, "cascadia", "Cascadia");
    record.status = CatalogStatus::Beta;
    record.premium = true;
    insert_catalog_item(&conn, &record).unwrap();

    let item = get_catalog_item(&conn, "cascadia").unwrap().unwrap();
    assert_eq!(item.external_id, Some(7));
    assert_eq!(item.status, Some(CatalogStatus::Beta));
    assert_eq!(item.premium, Some(true));

    let missing = get_catalog_item(&conn, "wingspan").unwrap();
    assert!(missing.is_none());
}

#[test]
fn provisional_item_reads_back_with_none_fields() {
    let conn = open_memory().unwrap();
    insert_provisional_item(&conn, "Hanabi", "hanabi").unwrap();

    let item = get_catalog_item(&conn, "Hanabi").unwrap().unwrap();
    assert_eq!(item.external_id, None);
    assert_eq!(item.status, None);
    assert_eq!(item.premium, None);
}

#[test]
fn participant_lookup_and_stat_join() {
    let conn = open_memory().unwrap();
    let p = insert_participant(&conn, &participant("john_doe")).unwrap();
    let item = insert_catalog_item(&conn, &listing(1, "seasalt", "Sea Salt & Paper")).unwrap();
    let stat = ItemStatRecord {
        catalog_name: "Sea Salt & Paper".to_string(),
        rating: Some("1500".to_string()),
        rank: None,
        played: 30,
        won: 18,
    };
    insert_item_stat(&conn, p, item, &stat, "2024-06-01T00:00:00Z").unwrap();

    let found = get_participant(&conn, "john_doe").unwrap().unwrap();
    assert_eq!(found.karma, 85);

    let stats = stats_for_participant(&conn, found.id).unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].item_name, "Sea Salt & Paper");
    assert_eq!(stats[0].rating.as_deref(), Some("1500"));
    assert_eq!(stats[0].rank, None);
    assert_eq!(stats[0].played, 30);

    assert!(get_participant(&conn, "nobody").unwrap().is_none());
    assert_eq!(list_participants(&conn).unwrap().len(), 1);
}

#[test]
fn event_moves_keep_import_order() {
    let conn = open_memory().unwrap();
    let event = insert_event(&conn, 4021, "Hanabi", "2024-06-01T00:00:00Z").unwrap();

    // Move numbers out of order on purpose; import order wins.
    for (move_no, actor) in [(Some(3), "carol"), (None, "alice"), (Some(1), "bob")] {
        let mv = MoveRecord {
            move_no,
            actor: actor.to_string(),
            local_time: "2024-05-30 18:02".to_string(),
            locale_time: "45442,3".to_string(),
            remaining_time: Some("0:12:00".to_string()),
        };
        insert_move(&conn, event, &mv).unwrap();
    }

    let found = get_event(&conn, 4021).unwrap().unwrap();
    assert_eq!(found.catalog_name, "Hanabi");

    let moves = moves_for_event(&conn, found.id).unwrap();
    assert_eq!(moves.len(), 3);
    assert_eq!(moves[0].actor, "carol");
    assert_eq!(moves[1].actor, "alice");
    assert_eq!(moves[1].move_no, None);
    assert_eq!(moves[2].actor, "bob");
}

#[test]
fn tournament_detail_queries() {
    let conn = open_memory().unwrap();
    let record = TournamentRecord {
        external_id: 900,
        name: "Spring Cup".to_string(),
        catalog_name: "Hanabi".to_string(),
        start_time: "2024-03-01".to_string(),
        end_time: "2024-03-15".to_string(),
        rounds: 4,
        round_limit: 5,
        total_matches: 16,
        timeout_matches: 1,
        participant_count: 16,
        matches: vec![],
    };
    let tournament = insert_tournament(&conn, &record).unwrap();

    let m = BracketMatchRecord {
        table_id: 5100,
        timed_out: true,
        progress: 80,
        players: vec![],
    };
    let match_id = insert_tournament_match(&conn, tournament, &m).unwrap();
    for (name, points) in [("alice", 3), ("bob", 1)] {
        let p = BracketPlayerRecord {
            name: name.to_string(),
            remaining_seconds: 90,
            points,
        };
        insert_match_player(&conn, match_id, &p).unwrap();
    }

    let found = get_tournament(&conn, 900).unwrap().unwrap();
    assert_eq!(found.name, "Spring Cup");
    assert_eq!(found.participant_count, 16);

    let matches = matches_for_tournament(&conn, found.id).unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches[0].timed_out);
    assert_eq!(matches[0].progress, 80);

    let players = players_for_match(&conn, matches[0].id).unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].name, "alice");
    assert_eq!(players[1].points, 1);

    assert_eq!(list_tournaments(&conn).unwrap().len(), 1);
    assert!(get_tournament(&conn, 901).unwrap().is_none());
}

#[test]
fn store_stats_counts_every_table() {
    let conn = open_memory().unwrap();
    insert_catalog_item(&conn, &listing(1, "seasalt", "Sea Salt & Paper")).unwrap();
    insert_provisional_item(&conn, "Hanabi", "hanabi").unwrap();
    insert_participant(&conn, &participant("john_doe")).unwrap();
    let event = insert_event(&conn, 4021, "Hanabi", "2024-06-01T00:00:00Z").unwrap();
    let mv = MoveRecord {
        move_no: Some(1),
        actor: "alice".to_string(),
        local_time: "2024-05-30 18:02".to_string(),
        locale_time: "45442,3".to_string(),
        remaining_time: None,
    };
    insert_move(&conn, event, &mv).unwrap();

    let stats = store_stats(&conn).unwrap();
    assert_eq!(stats.catalog_items, 2);
    assert_eq!(stats.provisional_items, 1);
    assert_eq!(stats.participants, 1);
    assert_eq!(stats.item_stats, 0);
    assert_eq!(stats.match_events, 1);
    assert_eq!(stats.match_moves, 1);
    assert_eq!(stats.tournaments, 0);
    assert_eq!(stats.imports, 0);
}

#[test]
fn import_logs_list_newest_first() {
    let conn = open_memory().unwrap();
    for (format, stamp) in [
        ("listing", "2024-06-01T00:00:00Z"),
        ("stats", "2024-06-02T00:00:00Z"),
        ("timeline", "2024-06-03T00:00:00Z"),
    ] {
        let log = ImportLog {
            id: 0,
            format: format.to_string(),
            records_created: 1,
            records_updated: 0,
            row_errors: 0,
            imported_at: stamp.to_string(),
        };
        insert_import_log(&conn, &log).unwrap();
    }

    let logs = list_import_logs(&conn, None).unwrap();
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[0].format, "timeline");
    assert_eq!(logs[2].format, "listing");

    let limited = list_import_logs(&conn, Some(1)).unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].format, "timeline");
}
