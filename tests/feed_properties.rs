//! Feed normalization properties.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{json, Value};

use roadaid_core::extraction::{normalize_snapshot, normalize_timestamp};
use roadaid_core::feed::{FeedState, MapFeed};
use roadaid_core::logging::LogContext;
use roadaid_core::storage::{DocumentSnapshot, InMemoryStore, Snapshot};

const REPORTS: &str = "accidentReports";

#[derive(Debug, Clone)]
enum RawLocation {
    Valid(f64, f64),
    Missing,
    Null,
    LatitudeOnly(f64),
    StringLatitude(f64, f64),
}

impl RawLocation {
    fn is_valid(&self) -> bool {
        matches!(self, RawLocation::Valid(..))
    }

    fn to_document(&self, severity: &str) -> Value {
        let mut doc = json!({"severity": severity, "status": "Unattended"});
        let location = match self {
            RawLocation::Valid(lat, lng) => Some(json!({"latitude": lat, "longitude": lng})),
            RawLocation::Missing => None,
            RawLocation::Null => Some(Value::Null),
            RawLocation::LatitudeOnly(lat) => Some(json!({"latitude": lat})),
            RawLocation::StringLatitude(lat, lng) => {
                Some(json!({"latitude": lat.to_string(), "longitude": lng}))
            }
        };
        if let Some(location) = location {
            doc["location"] = location;
        }
        doc
    }
}

fn raw_location() -> impl Strategy<Value = RawLocation> {
    prop_oneof![
        3 => (-90.0f64..90.0, -180.0f64..180.0).prop_map(|(a, b)| RawLocation::Valid(a, b)),
        1 => Just(RawLocation::Missing),
        1 => Just(RawLocation::Null),
        1 => (-90.0f64..90.0).prop_map(RawLocation::LatitudeOnly),
        1 => (-90.0f64..90.0, -180.0f64..180.0).prop_map(|(a, b)| RawLocation::StringLatitude(a, b)),
    ]
}

fn severity() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("Critical"), Just("Moderate"), Just("Minor"), Just("Unknown")]
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn build(docs: &[(RawLocation, &'static str)]) -> Snapshot {
    Snapshot::new(
        docs.iter()
            .enumerate()
            .map(|(i, (loc, sev))| DocumentSnapshot::new(&format!("doc-{}", i), loc.to_document(sev)))
            .collect(),
    )
}

proptest! {
    #[test]
    fn normalized_is_exactly_the_located_subset_in_order(
        docs in prop::collection::vec((raw_location(), severity()), 0..40)
    ) {
        let snapshot = build(&docs);
        let ctx = LogContext::new("prop");
        let ids: Vec<String> = normalize_snapshot(&snapshot, now(), &ctx)
            .into_iter()
            .map(|r| r.id)
            .collect();
        let expected: Vec<String> = docs
            .iter()
            .enumerate()
            .filter(|(_, (loc, _))| loc.is_valid())
            .map(|(i, _)| format!("doc-{}", i))
            .collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn same_snapshot_twice_gives_same_list(
        docs in prop::collection::vec((raw_location(), severity()), 0..40)
    ) {
        let snapshot = build(&docs);
        let ctx = LogContext::new("prop");
        let first = normalize_snapshot(&snapshot, now(), &ctx);
        let second = normalize_snapshot(&snapshot, now(), &ctx);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn iso_strings_resolve_to_their_instant(secs in 0i64..4_000_000_000) {
        let at = Utc.timestamp_opt(secs, 0).unwrap();
        let raw = json!(at.to_rfc3339());
        prop_assert_eq!(normalize_timestamp(Some(&raw), now()), at);
    }
}

#[test]
fn redelivered_snapshot_does_not_accumulate() {
    let store = InMemoryStore::new();
    store.insert(REPORTS, "a", RawLocation::Valid(1.0, 2.0).to_document("Minor"));
    store.insert(REPORTS, "b", RawLocation::Missing.to_document("Minor"));
    store.insert(REPORTS, "c", RawLocation::Valid(3.0, 4.0).to_document("Critical"));
    let feed = MapFeed::open_map(&store, REPORTS, &LogContext::new("t"));
    let first = feed.items();

    // Rewriting a document unchanged re-delivers the identical full set,
    // undated documents included.
    std::thread::sleep(std::time::Duration::from_millis(20));
    store.insert(REPORTS, "a", RawLocation::Valid(1.0, 2.0).to_document("Minor"));
    let second = feed.items();

    assert_eq!(feed.snapshots_seen(), 2);
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[test]
fn timestamp_forms() {
    let before = Utc::now();
    let resolved = normalize_timestamp(None, Utc::now());
    let after = Utc::now();
    assert!(resolved >= before && resolved <= after);

    let iso = json!("2024-01-01T00:00:00Z");
    assert_eq!(
        normalize_timestamp(Some(&iso), Utc::now()),
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    );

    let native = json!({"seconds": 1_704_067_200, "nanoseconds": 0});
    assert_eq!(
        normalize_timestamp(Some(&native), Utc::now()),
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    );
}

#[test]
fn undated_reports_resolve_near_now() {
    let store = InMemoryStore::new();
    store.insert(REPORTS, "a", RawLocation::Valid(1.0, 2.0).to_document("Minor"));
    let before = Utc::now();
    let feed = MapFeed::open_map(&store, REPORTS, &LogContext::new("t"));
    let after = Utc::now();

    match feed.state() {
        FeedState::Data(reports) => {
            let ts = reports[0].details.timestamp;
            assert!(ts >= before && ts <= after);
        }
        other => panic!("expected data, got {:?}", other),
    }
}
