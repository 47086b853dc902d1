use approx::assert_relative_eq;

use model::{LocationHistory, PathStatus, Replay, ReplayConfig, TrailError};

const HISTORY: &str = r#"{
  "locations": [
    {"timestampMs": "1565827200000", "latitudeE7": 476052100, "longitudeE7": -1223320700, "accuracy": 18},
    {"timestampMs": "1565827290000", "latitudeE7": 476062100, "longitudeE7": -1223330700},
    {"timestampMs": "1565833200000", "latitudeE7": 476152100, "longitudeE7": -1223420700},
    {"timestampMs": "1565854200000", "latitudeE7": 476552100, "longitudeE7": -1223820700}
  ]
}"#;

const CONFIG: &str = r#"{
  "clock": {"loop_length": 1800, "speed": 30},
  "policy": {"policy": "elapsed_minutes", "start": "2019-08-15T00:00:00"},
  "trail_length": 180
}"#;

fn replay() -> Replay {
    let config = ReplayConfig::from_reader(CONFIG.as_bytes()).unwrap();
    Replay::new(&config).unwrap()
}

#[test]
fn history_file_to_frames() {
    let history = LocationHistory::from_reader(HISTORY.as_bytes()).unwrap();
    let mut replay = replay();
    replay.load(Some(&history)).unwrap();

    let path = replay.path();
    assert_eq!(path.status(), PathStatus::Ready);
    assert_eq!(path.timeline(), &[0.0, 1.0, 100.0, 450.0]);
    assert_relative_eq!(path.points()[0].x(), -122.33207, epsilon = 1e-9);
    assert_relative_eq!(path.points()[0].y(), 47.60521, epsilon = 1e-9);

    // 4 real seconds in, the cursor is at 120 and the trail reaches back to 0
    let frame = replay.frame(4.0);
    assert_eq!(frame.current_time, 120.0);
    assert_eq!(frame.trail.indices, vec![0, 1, 2]);

    // At 450, only the last point is within 180 units
    let frame = replay.frame(15.0);
    assert_eq!(frame.trail.indices, vec![3]);

    let json = serde_json::to_value(&frame).unwrap();
    assert_eq!(json["status"], "READY");
    assert_eq!(json["current_time"], 450.0);
}

#[test]
fn malformed_history_never_animates() {
    let broken = HISTORY.replace(r#""timestampMs": "1565833200000", "#, "");
    let history = LocationHistory::from_reader(broken.as_bytes()).unwrap();
    let mut replay = replay();
    let err = replay.load(Some(&history)).unwrap_err();
    assert_eq!(
        err,
        TrailError::MalformedRecord {
            index: 2,
            reason: "missing timestampMs".to_string()
        }
    );
    assert_eq!(replay.path().status(), PathStatus::Loading);
    assert!(replay.path().timeline().is_empty());
    assert!(replay.frame(4.0).trail.is_empty());
}

#[test]
fn geojson_export_round_trips_through_text() {
    let history = LocationHistory::from_reader(HISTORY.as_bytes()).unwrap();
    let mut replay = replay();
    replay.load(Some(&history)).unwrap();
    let text = serde_json::to_string(&replay.path().to_geojson()).unwrap();
    let parsed: geojson::GeoJson = text.parse().unwrap();
    match parsed {
        geojson::GeoJson::FeatureCollection(fc) => assert_eq!(fc.features.len(), 1),
        _ => panic!("expected a FeatureCollection"),
    }
}

#[test]
fn wrongly_typed_fields_name_the_record() {
    let cases = [
        (r#"{"latitudeE7": 1, "longitudeE7": 2, "timestampMs": true}"#, "timestampMs"),
        (r#"{"latitudeE7": 1, "longitudeE7": 2, "timestampMs": []}"#, "timestampMs"),
        (r#"{"latitudeE7": "47.6", "longitudeE7": 2, "timestampMs": 5}"#, "latitudeE7"),
        (r#"{"latitudeE7": 1, "longitudeE7": 2.5, "timestampMs": 5}"#, "longitudeE7"),
    ];
    for (bad, field) in cases {
        let input = format!(
            r#"{{"locations": [{{"latitudeE7": 1, "longitudeE7": 2, "timestampMs": 0}}, {bad}]}}"#
        );
        let history = LocationHistory::from_reader(input.as_bytes()).unwrap();
        let mut replay = replay();
        match replay.load(Some(&history)) {
            Err(TrailError::MalformedRecord { index, reason }) => {
                assert_eq!(index, 1, "{bad}");
                assert!(reason.contains(field), "{bad} gave {reason}");
            }
            Err(err) => panic!("{bad} gave {err}"),
            Ok(()) => panic!("{bad} was accepted"),
        }
        assert!(replay.path().is_empty());
    }
}
