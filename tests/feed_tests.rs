use chrono::NaiveDateTime;
use railfeed::{
    feed::{Error, FeedBuilder, FeedInfoConfig},
    gtfs::{GtfsShape, GtfsStopTime},
    schedule::{self, RawTripEvent, group_events},
    static_data::StaticData,
};

fn version() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2025-04-20 10:15:00", "%Y-%m-%d %H:%M:%S").unwrap()
}

fn events() -> Vec<RawTripEvent> {
    vec![
        RawTripEvent::new("Villach - Edirne", "26.04.2025 21:32", "28.04.2025 06:03"),
        RawTripEvent::new("Edirne - Villach", "02.05.2025 17:45", "04.05.2025 08:11"),
        RawTripEvent::new("Villach - Edirne", "03.05.2025 21:32", "05.05.2025 06:03"),
    ]
}

fn shape(shape_id: &str) -> GtfsShape {
    GtfsShape {
        shape_id: shape_id.into(),
        shape_pt_lat: 41.6606,
        shape_pt_lon: 26.56,
        shape_pt_sequence: 0,
        shape_dist_traveled: Some(0.0),
    }
}

#[test]
fn build_feed_test() {
    let patterns = group_events(&events()).unwrap();
    let feed = FeedBuilder::new(StaticData::optima().unwrap())
        .with_shapes(vec![shape("EDIRNE")])
        .build(&patterns, version())
        .unwrap();

    assert_eq!(feed.agency.len(), 1);
    assert_eq!(feed.routes[0].route_id, "OPTIMA");
    assert_eq!(feed.stops.len(), 9);

    assert_eq!(feed.trips.len(), 2);
    assert_eq!(feed.trips[0].trip_id, "T1");
    assert_eq!(feed.trips[0].service_id, "S1");
    assert_eq!(feed.trips[0].trip_headsign.as_deref(), Some("Edirne"));
    assert_eq!(feed.trips[0].shape_id.as_deref(), Some("EDIRNE"));
    assert_eq!(feed.trips[1].trip_headsign.as_deref(), Some("Villach"));
    assert_eq!(feed.trips[1].shape_id, None);

    let dates: Vec<_> = feed
        .calendar_dates
        .iter()
        .map(|cd| (cd.service_id.as_str(), cd.date.as_str(), cd.exception_type))
        .collect();
    assert_eq!(
        dates,
        vec![
            ("S1", "20250426", 1),
            ("S1", "20250503", 1),
            ("S2", "20250502", 1)
        ]
    );

    assert_eq!(feed.stop_times.len(), 18);
    let first: Vec<&GtfsStopTime> = feed
        .stop_times
        .iter()
        .filter(|st| st.trip_id == "T1")
        .collect();
    assert_eq!(first.len(), 9);
    assert_eq!(first[0].stop_id, "VILLACH");
    assert_eq!(first[0].departure_time, "21:32:00");
    assert_eq!((first[0].pickup_type, first[0].drop_off_type), (1, 0));
    assert_eq!(first[0].timepoint, 1);
    assert_eq!((first[4].pickup_type, first[4].drop_off_type), (1, 1));
    assert_eq!(first[4].timepoint, 0);
    assert_eq!(first[8].stop_id, "EDIRNE");
    assert_eq!(first[8].arrival_time, "54:03:00");
    assert_eq!((first[8].pickup_type, first[8].drop_off_type), (0, 1));

    let feed_info = &feed.feed_info[0];
    assert_eq!(feed_info.feed_start_date, "20250426");
    // 03.05.2025 plus 120 days
    assert_eq!(feed_info.feed_end_date, "20250831");
    assert_eq!(feed_info.feed_version, "20250420T101500");
}

#[test]
fn stop_times_ordered_by_trip_test() {
    let patterns = group_events(&events()).unwrap();
    let feed = FeedBuilder::new(StaticData::optima().unwrap())
        .build(&patterns, version())
        .unwrap();
    let keys: Vec<_> = feed
        .stop_times
        .iter()
        .map(|st| (st.trip_id.clone(), st.stop_sequence))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(keys[0], ("T1".to_string(), 1));
    assert_eq!(keys[17], ("T2".to_string(), 9));
}

#[test]
fn custom_feed_info_test() {
    let patterns = group_events(&events()).unwrap();
    let info = FeedInfoConfig {
        publisher_name: "Test".into(),
        contact_email: Some("info@example.org".into()),
        validity_extension_days: 0,
        ..Default::default()
    };
    let feed = FeedBuilder::new(StaticData::optima().unwrap())
        .with_feed_info(info)
        .build(&patterns, version())
        .unwrap();
    assert_eq!(feed.feed_info[0].feed_publisher_name, "Test");
    assert_eq!(feed.feed_info[0].feed_end_date, "20250503");
}

#[test]
fn empty_schedule_test() {
    let feed = FeedBuilder::new(StaticData::optima().unwrap())
        .build(&[], version())
        .unwrap();
    assert!(feed.trips.is_empty());
    assert!(feed.stop_times.is_empty());
    assert!(feed.feed_info.is_empty());
}

#[test]
fn unknown_direction_fails_feed_test() {
    let mut events = events();
    events.push(RawTripEvent::new(
        "Villach - Istanbul",
        "26.04.2025 21:32",
        "28.04.2025 16:03",
    ));
    let patterns = group_events(&events).unwrap();
    let result = FeedBuilder::new(StaticData::optima().unwrap()).build(&patterns, version());
    assert!(matches!(
        result,
        Err(Error::Schedule(schedule::Error::UnknownDirection(_)))
    ));
}
