use railfeed::schedule::{NormalizedArrival, normalize_arrival, parse_timestamp};

fn normalize(departure: &str, arrival: &str) -> NormalizedArrival {
    let departure = parse_timestamp(departure).unwrap();
    let arrival = parse_timestamp(arrival).unwrap();
    normalize_arrival(&departure, &arrival).unwrap()
}

#[test]
fn overnight_arrival_test() {
    assert_eq!(
        normalize("26.04.2025 21:32", "27.04.2025 06:03").to_string(),
        "30:03:00"
    );
}

#[test]
fn two_day_arrival_test() {
    assert_eq!(
        normalize("26.04.2025 17:45", "28.04.2025 09:50").to_string(),
        "57:50:00"
    );
}

#[test]
fn departure_clock_is_ignored_test() {
    // Only the day offset and the arrival clock count
    let early = normalize("26.04.2025 00:05", "27.04.2025 06:03");
    let late = normalize("26.04.2025 23:59", "27.04.2025 06:03");
    assert_eq!(early, late);
    assert_eq!(early.hours(), 30);
    assert_eq!(early.minutes(), 3);
}

#[test]
fn hours_follow_calendar_days_test() {
    let arrivals = [
        (0, "26.04.2025 23:10"),
        (1, "27.04.2025 23:10"),
        (3, "29.04.2025 23:10"),
    ];
    for (days, arrival) in arrivals {
        let normalized = normalize("26.04.2025 22:00", arrival);
        assert_eq!(normalized.hours(), days * 24 + 23);
        assert_eq!(normalized.minutes(), 10);
    }
}

#[test]
fn month_boundary_test() {
    assert_eq!(
        normalize("30.04.2025 21:32", "01.05.2025 06:03").to_string(),
        "30:03:00"
    );
}

#[test]
fn unparseable_timestamp_test() {
    assert!(parse_timestamp("26.04.2025").is_err());
    assert!(parse_timestamp("32.04.2025 21:32").is_err());
    assert!(parse_timestamp("26.04.2025 25:32").is_err());
}
