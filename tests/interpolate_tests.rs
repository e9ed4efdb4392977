use chrono::{NaiveDate, NaiveTime};
use railfeed::{
    schedule::{
        Direction, Error, Interpolator, NormalizedArrival, RawTripEvent, ReferenceStop,
        ReferenceTimeline, ReferenceTimelines, StopAliases, SynthesizedStopTime, TripPattern,
        TripPatternKey, group_events,
    },
    static_data::StaticData,
};

fn interpolator() -> Interpolator {
    let timeline = ReferenceTimeline::new(vec![
        ReferenceStop::new("A", 0, 0),
        ReferenceStop::new("B", 290, 310),
        ReferenceStop::new("C", 600, 600),
    ])
    .unwrap();
    let aliases = StopAliases::new().with("Villach", "A").with("Edirne", "C");
    Interpolator::new(aliases, ReferenceTimelines::new().with("A", "C", timeline))
}

fn pattern(direction: &str, departure: &str, arrival: &str) -> TripPattern {
    let events = vec![RawTripEvent::new(direction, departure, arrival)];
    group_events(&events).unwrap().remove(0)
}

fn times(stop_time: &SynthesizedStopTime) -> (String, String) {
    (
        stop_time.arrival_time.to_hms_string(),
        stop_time.departure_time.to_hms_string(),
    )
}

#[test]
fn proportional_rescaling_test() {
    // 21:32 until 32:02 is 630 minutes against a 600 minute reference
    let pattern = pattern("Villach - Edirne", "26.04.2025 21:32", "27.04.2025 08:02");
    let stop_times = interpolator().synthesize("T1", &pattern).unwrap();
    assert_eq!(stop_times.len(), 3);
    assert_eq!(times(&stop_times[0]), ("21:32:00".into(), "21:32:00".into()));
    // 1292 + 290 / 600 * 630 = 1596.5 and 1292 + 310 / 600 * 630 = 1617.5
    assert_eq!(times(&stop_times[1]), ("26:37:00".into(), "26:58:00".into()));
    assert_eq!(times(&stop_times[2]), ("32:02:00".into(), "32:02:00".into()));
}

#[test]
fn midpoint_rescaling_test() {
    let timeline = ReferenceTimeline::new(vec![
        ReferenceStop::new("A", 0, 0),
        ReferenceStop::new("B", 300, 300),
        ReferenceStop::new("C", 600, 600),
    ])
    .unwrap();
    let interpolator = Interpolator::new(
        StopAliases::new().with("Villach", "A").with("Edirne", "C"),
        ReferenceTimelines::new().with("A", "C", timeline),
    );
    let pattern = pattern("Villach - Edirne", "26.04.2025 21:32", "27.04.2025 08:02");
    let stop_times = interpolator.synthesize("T1", &pattern).unwrap();
    assert_eq!(stop_times[1].arrival_time.to_hms_string(), "26:47:00");
}

#[test]
fn boundary_flags_test() {
    let pattern = pattern("Villach - Edirne", "26.04.2025 21:32", "27.04.2025 08:02");
    let stop_times = interpolator().synthesize("T7", &pattern).unwrap();

    let first = &stop_times[0];
    assert!(!first.pickup_allowed && first.drop_off_allowed && first.is_exact_time);
    let middle = &stop_times[1];
    assert!(!middle.pickup_allowed && !middle.drop_off_allowed && !middle.is_exact_time);
    let last = &stop_times[2];
    assert!(last.pickup_allowed && !last.drop_off_allowed && !last.is_exact_time);

    assert!(stop_times.iter().all(|st| &*st.trip_id == "T7"));
    let sequences: Vec<_> = stop_times.iter().map(|st| st.stop_sequence).collect();
    assert_eq!(sequences, vec![1, 2, 3]);
}

#[test]
fn optima_day_variants_test() {
    let data = StaticData::optima().unwrap();
    let interpolator = data.interpolator();
    let variants = [
        ("Villach - Edirne", "26.04.2025 21:32", "28.04.2025 06:03"),
        ("Villach - Edirne", "03.05.2025 21:32", "05.05.2025 09:50"),
        ("Edirne - Villach", "02.05.2025 17:45", "04.05.2025 08:11"),
        ("Edirne - Villach", "09.05.2025 18:30", "11.05.2025 07:02"),
    ];
    for (direction, departure, arrival) in variants {
        let pattern = pattern(direction, departure, arrival);
        let stop_times = interpolator.synthesize("T1", &pattern).unwrap();
        assert_eq!(stop_times.len(), 9);
        assert_eq!(stop_times.iter().filter(|st| st.is_exact_time).count(), 1);
        assert_eq!(stop_times[0].departure_time, pattern.departure_time());
        assert_eq!(stop_times[8].arrival_time, pattern.arrival_time());
        assert!(stop_times.iter().all(|st| st.arrival_time <= st.departure_time));
        assert!(
            stop_times
                .windows(2)
                .all(|pair| pair[0].departure_time <= pair[1].arrival_time
                    && pair[0].stop_sequence < pair[1].stop_sequence)
        );
    }
}

#[test]
fn unknown_alias_test() {
    let pattern = pattern("Wien - Edirne", "26.04.2025 21:32", "27.04.2025 08:02");
    assert!(matches!(
        interpolator().synthesize("T1", &pattern),
        Err(Error::UnknownDirection(_))
    ));
}

#[test]
fn missing_timeline_test() {
    // Both aliases resolve but only A to C has a timeline
    let pattern = pattern("Edirne - Villach", "26.04.2025 21:32", "27.04.2025 08:02");
    assert!(matches!(
        interpolator().synthesize("T1", &pattern),
        Err(Error::UnknownDirection(_))
    ));
}

#[test]
fn zero_reference_duration_test() {
    let timeline = ReferenceTimeline::new(vec![
        ReferenceStop::new("A", 0, 0),
        ReferenceStop::new("C", 0, 0),
    ])
    .unwrap();
    let interpolator = Interpolator::new(
        StopAliases::new().with("Villach", "A").with("Edirne", "C"),
        ReferenceTimelines::new().with("A", "C", timeline),
    );
    let pattern = pattern("Villach - Edirne", "26.04.2025 21:32", "27.04.2025 08:02");
    assert!(matches!(
        interpolator.synthesize("T1", &pattern),
        Err(Error::InvalidDuration { .. })
    ));
}

#[test]
fn non_positive_trip_duration_test() {
    let key = TripPatternKey {
        direction: Direction::parse("Villach - Edirne"),
        departure: NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
        arrival: NormalizedArrival::new(22, 0).unwrap(),
    };
    let date = NaiveDate::from_ymd_opt(2025, 4, 26).unwrap();
    let pattern = TripPattern::new(key, vec![date]).unwrap();
    assert!(matches!(
        interpolator().synthesize("T1", &pattern),
        Err(Error::InvalidDuration { minutes: -60, .. })
    ));
}

#[test]
fn pattern_needs_dates_test() {
    let key = TripPatternKey {
        direction: Direction::parse("Villach - Edirne"),
        departure: NaiveTime::from_hms_opt(21, 32, 0).unwrap(),
        arrival: NormalizedArrival::new(30, 3).unwrap(),
    };
    assert!(TripPattern::new(key, Vec::new()).is_none());
}

#[test]
fn scaled_past_largest_time_test() {
    // The last stop departs as long after its arrival as the whole reference run
    let timeline = ReferenceTimeline::new(vec![
        ReferenceStop::new("A", 0, 0),
        ReferenceStop::new("C", 600, 1200),
    ])
    .unwrap();
    let interpolator = Interpolator::new(
        StopAliases::new().with("Villach", "A").with("Edirne", "C"),
        ReferenceTimelines::new().with("A", "C", timeline),
    );
    let key = TripPatternKey {
        direction: Direction::parse("Villach - Edirne"),
        departure: NaiveTime::from_hms_opt(21, 32, 0).unwrap(),
        arrival: NormalizedArrival::new(1_193_046, 0).unwrap(),
    };
    let date = NaiveDate::from_ymd_opt(2025, 4, 26).unwrap();
    let pattern = TripPattern::new(key, vec![date]).unwrap();
    assert!(matches!(
        interpolator.synthesize("T1", &pattern),
        Err(Error::InvalidDuration { .. })
    ));
}
