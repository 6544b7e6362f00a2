//! End-to-end tests: an in-memory catalog stands in for the HTTP API, the
//! pipeline writes real files into a temp directory, and the files are read
//! back and checked against the table invariants.

use rusqlite::Connection;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use swapi_to_csv::fetch::{parse_envelope, Resource, ResourceBody, ResourceSource, SkipReason};
use swapi_to_csv::parser::EntityId;
use swapi_to_csv::pipeline::{run_pipeline, sync};
use swapi_to_csv::schema::ALL_TABLES;
use swapi_to_csv::ui::SilentUi;

// =============================================================================
// Fake API
// =============================================================================

const API: &str = "https://www.swapi.tech/api";

/// Serves canned JSON bodies; anything not registered is a 404
#[derive(Default)]
struct FakeApi {
    bodies: HashMap<(Resource, EntityId), String>,
}

impl FakeApi {
    fn body(mut self, resource: Resource, id: EntityId, body: Value) -> Self {
        self.bodies.insert((resource, id), body.to_string());
        self
    }

    fn raw(mut self, resource: Resource, id: EntityId, body: &str) -> Self {
        self.bodies.insert((resource, id), body.to_string());
        self
    }

    fn person(self, id: EntityId, name: &str, vehicles: &[EntityId], starships: &[EntityId]) -> Self {
        let vehicles: Vec<String> = vehicles.iter().map(|v| format!("{}/vehicles/{}/", API, v)).collect();
        let starships: Vec<String> = starships.iter().map(|s| format!("{}/starships/{}", API, s)).collect();
        self.body(
            Resource::People,
            id,
            ok(id.to_string(), json!({
                "name": name,
                "gender": "n/a",
                "height": "100",
                "vehicles": vehicles,
                "starships": starships,
            })),
        )
    }

    fn vehicle(self, id: EntityId, name: &str) -> Self {
        self.body(
            Resource::Vehicles,
            id,
            ok(id.to_string(), json!({
                "name": name,
                "model": format!("{} model", name),
                "vehicle_class": "wheeled",
                "url": format!("{}/vehicles/{}", API, id),
            })),
        )
    }

    fn starship(self, id: EntityId, name: &str) -> Self {
        self.body(
            Resource::Starships,
            id,
            ok(id.to_string(), json!({
                "name": name,
                "starship_class": "Starfighter",
                "hyperdrive_rating": "1.0",
                "MGLT": "100",
                "url": format!("{}/starships/{}", API, id),
            })),
        )
    }
}

impl ResourceSource for FakeApi {
    fn fetch(&self, resource: Resource, id: EntityId) -> Result<ResourceBody, SkipReason> {
        match self.bodies.get(&(resource, id)) {
            Some(body) => parse_envelope(body),
            None => Err(SkipReason::HttpStatus(404)),
        }
    }
}

fn ok(uid: impl Into<Value>, properties: Value) -> Value {
    json!({
        "message": "ok",
        "result": { "uid": uid.into(), "properties": properties },
    })
}

// =============================================================================
// CSV helpers
// =============================================================================

/// Header and rows of a written CSV file
fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open CSV");
    let headers = reader
        .headers()
        .expect("Failed to read header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("Failed to read row").iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

fn int_column(rows: &[Vec<String>], idx: usize) -> Vec<i64> {
    rows.iter()
        .map(|r| r[idx].parse::<i64>().expect("ID column must be an integer"))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_sand_crawler_scenario() {
    let api = FakeApi::default()
        .person(1, "Luke Skywalker", &[4], &[])
        .person(2, "C-3PO", &[], &[])
        .body(
            Resource::Vehicles,
            4,
            ok("4", json!({ "name": "Sand Crawler", "model": "Digger Crawler" })),
        );
    let dir = tempfile::tempdir().unwrap();

    let (extraction, paths) = sync(&api, 1..=2, dir.path(), None, &mut SilentUi::new()).unwrap();
    assert_eq!(paths.len(), 5);

    let (headers, rows) = read_csv(&dir.path().join("person_vehicles.csv"));
    assert_eq!(headers, vec!["uid", "vehicle_id"]);
    assert_eq!(rows, vec![vec!["1".to_string(), "4".to_string()]]);

    let (headers, rows) = read_csv(&dir.path().join("vehicles.csv"));
    assert_eq!(headers[0], "vehicle_id");
    assert_eq!(headers.len(), 13);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "4");
    assert_eq!(rows[0][2], "Sand Crawler");

    let (headers, rows) = read_csv(&dir.path().join("starships.csv"));
    assert_eq!(headers.last().map(String::as_str), Some("MGLT"));
    assert!(rows.is_empty());

    assert!(extraction.report.skips.is_empty());
}

#[test]
fn test_every_table_has_its_header() {
    let dir = tempfile::tempdir().unwrap();
    sync(&FakeApi::default(), 1..=3, dir.path(), None, &mut SilentUi::new()).unwrap();

    for table in ALL_TABLES {
        let (headers, rows) = read_csv(&dir.path().join(table.file_name));
        assert_eq!(headers, table.column_names(), "header of {}", table.name);
        assert!(rows.is_empty());
    }
}

#[test]
fn test_join_integrity() {
    let api = FakeApi::default()
        .person(1, "Luke Skywalker", &[14, 30, 14], &[12, 22])
        .person(2, "C-3PO", &[], &[])
        .person(3, "R2-D2", &[], &[12])
        .person(5, "Leia Organa", &[30], &[])
        .vehicle(14, "Snowspeeder")
        .vehicle(30, "Imperial Speeder Bike")
        .starship(12, "X-wing")
        .starship(22, "Imperial shuttle");
    let dir = tempfile::tempdir().unwrap();

    sync(&api, 1..=6, dir.path(), None, &mut SilentUi::new()).unwrap();

    let (_, people) = read_csv(&dir.path().join("people.csv"));
    let uids: HashSet<i64> = int_column(&people, 0).into_iter().collect();
    assert_eq!(uids, HashSet::from([1, 2, 3, 5]));

    for (join, catalog) in [
        ("person_vehicles.csv", "vehicles.csv"),
        ("person_starships.csv", "starships.csv"),
    ] {
        let (_, rows) = read_csv(&dir.path().join(join));
        let pairs: Vec<(i64, i64)> = int_column(&rows, 0)
            .into_iter()
            .zip(int_column(&rows, 1))
            .collect();

        let distinct: HashSet<_> = pairs.iter().copied().collect();
        assert_eq!(distinct.len(), pairs.len(), "duplicate pair in {}", join);
        assert!(pairs.iter().all(|(uid, id)| uids.contains(uid) && *id >= 0));

        let (_, catalog_rows) = read_csv(&dir.path().join(catalog));
        let keys = int_column(&catalog_rows, 0);
        let distinct_keys: HashSet<_> = keys.iter().copied().collect();
        assert_eq!(distinct_keys.len(), keys.len(), "duplicate key in {}", catalog);
        for (_, id) in &pairs {
            assert!(distinct_keys.contains(id));
        }
    }

    let (_, rows) = read_csv(&dir.path().join("person_vehicles.csv"));
    assert_eq!(rows.len(), 3);
}

#[test]
fn test_non_ok_catalog_entry_is_skipped() {
    let api = FakeApi::default()
        .person(1, "Luke Skywalker", &[14, 8], &[])
        .vehicle(14, "Snowspeeder")
        .raw(Resource::Vehicles, 8, r#"{"message":"not found"}"#);
    let dir = tempfile::tempdir().unwrap();

    let (extraction, _) = sync(&api, 1..=1, dir.path(), None, &mut SilentUi::new()).unwrap();

    let (_, rows) = read_csv(&dir.path().join("vehicles.csv"));
    assert_eq!(int_column(&rows, 0), vec![14]);

    // The join row survives; only the catalog entry is missing
    let (_, rows) = read_csv(&dir.path().join("person_vehicles.csv"));
    assert_eq!(rows.len(), 2);

    let skips: Vec<_> = extraction.report.skips_for("vehicles").collect();
    assert_eq!(skips.len(), 1);
    assert_eq!(skips[0].requested_id, 8);
    assert_eq!(skips[0].reason, SkipReason::StatusMarker(Some("not found".into())));
}

#[test]
fn test_identity_falls_back_to_requested_id() {
    let api = FakeApi::default()
        .person(1, "Han Solo", &[], &[10, 11])
        .body(Resource::Starships, 10, ok("unknown", json!({ "name": "Millennium Falcon" })))
        .body(Resource::Starships, 11, ok(Value::Null, json!({ "name": "Y-wing" })));

    let extraction = run_pipeline(&api, 1..=1, &mut SilentUi::new());

    let ids: Vec<_> = extraction.starships.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![10, 11]);
}

#[test]
fn test_unusable_people_are_skipped() {
    let api = FakeApi::default()
        .person(1, "Luke Skywalker", &[], &[])
        .raw(Resource::People, 2, "<html>Bad gateway</html>")
        .raw(Resource::People, 3, r#"{"message":"ok"}"#)
        .raw(Resource::People, 4, r#"{"message":"error","result":{"uid":"4"}}"#);

    let extraction = run_pipeline(&api, 1..=5, &mut SilentUi::new());

    assert_eq!(extraction.people.len(), 1);
    let reasons: Vec<_> = extraction
        .report
        .skips_for("people")
        .map(|s| (s.requested_id, s.reason.clone()))
        .collect();
    assert_eq!(reasons.len(), 4);
    assert!(matches!(reasons[0], (2, SkipReason::MalformedBody(_))));
    assert!(matches!(reasons[1], (3, SkipReason::MalformedBody(_))));
    assert_eq!(reasons[2], (4, SkipReason::StatusMarker(Some("error".into()))));
    assert_eq!(reasons[3], (5, SkipReason::HttpStatus(404)));
}

#[test]
fn test_unresolvable_reference_dropped() {
    let api = FakeApi::default()
        .body(
            Resource::People,
            1,
            ok("1", json!({
                "name": "Wedge Antilles",
                "vehicles": [format!("{}/vehicles/", API), format!("{}/vehicles/14", API)],
                "starships": null,
            })),
        )
        .vehicle(14, "Snowspeeder");

    let extraction = run_pipeline(&api, 1..=1, &mut SilentUi::new());

    assert_eq!(extraction.person_vehicles.len(), 1);
    assert_eq!(extraction.person_vehicles[0].entity_id, 14);
    assert_eq!(extraction.report.unresolved.len(), 1);
    assert_eq!(extraction.report.row_count("person_starships"), Some(0));
}

#[test]
fn test_sqlite_output_matches_csv() {
    let api = FakeApi::default()
        .person(1, "Luke Skywalker", &[14], &[12])
        .person(2, "Biggs Darklighter", &[], &[12])
        .vehicle(14, "Snowspeeder")
        .starship(12, "X-wing");
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("swapi.db");

    sync(&api, 1..=2, dir.path(), Some(&db_path), &mut SilentUi::new()).unwrap();

    let conn = Connection::open(&db_path).unwrap();
    let mut stmt = conn
        .prepare(
            "SELECT p.name FROM people p
             JOIN person_starships ps ON ps.uid = p.uid
             JOIN starships s ON s.starship_id = ps.starship_id
             WHERE s.name = 'X-wing' ORDER BY p.uid",
        )
        .unwrap();
    let pilots: Vec<String> = stmt
        .query_map([], |r| r.get(0))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(pilots, vec!["Luke Skywalker", "Biggs Darklighter"]);

    let mglt: String = conn
        .query_row("SELECT MGLT FROM starships WHERE starship_id = 12", [], |r| r.get(0))
        .unwrap();
    assert_eq!(mglt, "100");
}
