use std::fmt::Display;

use chrono::{NaiveDateTime, NaiveTime, Timelike};

use crate::{
    schedule::Error,
    shared::{MINUTES_PER_DAY, Time},
};

/// Arrival expressed relative to the departure's service day, e.g. `57:50:00`.
///
/// The hour is `days_elapsed * 24 + arrival_hour`. It is never derived from the
/// elapsed minutes of the trip, that gives a different hour whenever the arrival
/// minute is smaller than the departure minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedArrival {
    hours: u32,
    minutes: u32,
}

impl NormalizedArrival {
    /// `None` for minutes past 59 or an arrival too late to express as a `Time`.
    pub fn new(hours: u32, minutes: u32) -> Option<Self> {
        if minutes > 59 {
            return None;
        }
        let total = hours.checked_mul(60)?.checked_add(minutes)?;
        Time::checked_from_minutes(total)?;
        Some(Self { hours, minutes })
    }

    pub const fn hours(&self) -> u32 {
        self.hours
    }

    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    pub const fn as_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }

    pub const fn to_time(&self) -> Time {
        Time::from_minutes(self.as_minutes())
    }
}

impl Display for NormalizedArrival {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:00", self.hours, self.minutes)
    }
}

pub fn normalize_arrival(
    departure: &NaiveDateTime,
    arrival: &NaiveDateTime,
) -> Result<NormalizedArrival, Error> {
    let days_elapsed = (arrival.date() - departure.date()).num_days();
    let days_elapsed = u32::try_from(days_elapsed).map_err(|_| {
        Error::malformed(
            arrival.to_string(),
            format!("arrival date is {} days before departure", -days_elapsed),
        )
    })?;
    days_elapsed
        .checked_mul(24)
        .and_then(|hours| hours.checked_add(arrival.hour()))
        .and_then(|hours| NormalizedArrival::new(hours, arrival.minute()))
        .ok_or_else(|| {
            Error::malformed(
                arrival.to_string(),
                format!("arrival is {days_elapsed} days after departure"),
            )
        })
}

/// Minutes after midnight of a wall clock time.
pub fn clock_minutes(time: &NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

pub(crate) fn day_rollover(minutes: u32, previous: u32) -> u32 {
    let mut minutes = minutes;
    while minutes < previous {
        minutes += MINUTES_PER_DAY;
    }
    minutes
}

#[test]
fn normalize_overnight_test() {
    let departure = crate::schedule::parse_timestamp("26.04.2025 21:32").unwrap();
    let arrival = crate::schedule::parse_timestamp("27.04.2025 06:03").unwrap();
    let normalized = normalize_arrival(&departure, &arrival).unwrap();
    assert_eq!(normalized.to_string(), "30:03:00");
    assert_eq!(normalized.as_minutes(), 1803);
}

#[test]
fn normalize_same_day_test() {
    let departure = crate::schedule::parse_timestamp("26.04.2025 08:15").unwrap();
    let arrival = crate::schedule::parse_timestamp("26.04.2025 09:05").unwrap();
    assert_eq!(
        normalize_arrival(&departure, &arrival).unwrap(),
        NormalizedArrival::new(9, 5).unwrap()
    );
}

#[test]
fn normalize_negative_days_test() {
    let departure = crate::schedule::parse_timestamp("27.04.2025 21:32").unwrap();
    let arrival = crate::schedule::parse_timestamp("26.04.2025 06:03").unwrap();
    assert!(matches!(
        normalize_arrival(&departure, &arrival),
        Err(Error::MalformedTimestamp { .. })
    ));
}

#[test]
fn day_rollover_test() {
    assert_eq!(day_rollover(60, 0), 60);
    assert_eq!(day_rollover(60, 1400), 1500);
    assert_eq!(day_rollover(60, 1600), 2940);
}

#[test]
fn normalized_arrival_bounds_test() {
    assert!(NormalizedArrival::new(30, 60).is_none());
    assert!(NormalizedArrival::new(1_193_046, 28).is_some());
    assert!(NormalizedArrival::new(1_193_046, 29).is_none());
    assert!(NormalizedArrival::new(u32::MAX, 0).is_none());
}
