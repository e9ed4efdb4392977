use std::{fmt::Display, sync::Arc};

use chrono::NaiveDateTime;

use crate::schedule::Error;

/// `DD.MM.YYYY HH:MM`, local civil time.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";
pub const DIRECTION_DELIMITER: &str = " - ";

/// One departure tile exactly as it was scraped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTripEvent {
    pub direction: Option<String>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
}

impl RawTripEvent {
    pub fn new(direction: &str, departure: &str, arrival: &str) -> Self {
        Self {
            direction: Some(direction.into()),
            departure: Some(departure.into()),
            arrival: Some(arrival.into()),
        }
    }

    pub fn parse(&self) -> Result<TripEvent, Error> {
        let direction = present(&self.direction).ok_or(Error::MissingField("direction"))?;
        let departure = present(&self.departure).ok_or(Error::MissingField("departure"))?;
        let arrival = present(&self.arrival).ok_or(Error::MissingField("arrival"))?;

        Ok(TripEvent {
            direction: Direction::parse(direction),
            departure: parse_timestamp(departure)?,
            arrival: parse_timestamp(arrival)?,
        })
    }
}

/// Blank attributes count as missing.
fn present(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
        .map_err(|err| Error::malformed(value, err))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripEvent {
    pub direction: Direction,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
}

/// A direction label such as `Villach - Edirne`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Direction {
    pub label: Arc<str>,
    pub origin: Arc<str>,
    pub destination: Arc<str>,
}

impl Direction {
    /// Origin is the first part of the label, destination the last one.
    /// A label without delimiter names the same endpoint twice.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        let mut parts = label.split(DIRECTION_DELIMITER).map(str::trim);
        let origin = parts.next().unwrap_or(label);
        let destination = parts.last().unwrap_or(origin);
        Self {
            label: label.into(),
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

#[test]
fn direction_parse_test() {
    let direction = Direction::parse(" Villach - Edirne ");
    assert_eq!(&*direction.label, "Villach - Edirne");
    assert_eq!(&*direction.origin, "Villach");
    assert_eq!(&*direction.destination, "Edirne");
}

#[test]
fn direction_without_delimiter_test() {
    let direction = Direction::parse("Villach");
    assert_eq!(&*direction.origin, "Villach");
    assert_eq!(&*direction.destination, "Villach");
}

#[test]
fn missing_field_test() {
    let mut event = RawTripEvent::new("Villach - Edirne", "26.04.2025 21:32", "27.04.2025 06:03");
    event.arrival = None;
    assert_eq!(event.parse(), Err(Error::MissingField("arrival")));
    event.direction = Some("   ".into());
    assert_eq!(event.parse(), Err(Error::MissingField("direction")));
}

#[test]
fn blank_timestamp_is_missing_test() {
    let mut event = RawTripEvent::new("Villach - Edirne", "26.04.2025 21:32", "");
    assert_eq!(event.parse(), Err(Error::MissingField("arrival")));
    event.departure = Some(" ".into());
    assert_eq!(event.parse(), Err(Error::MissingField("departure")));
}

#[test]
fn malformed_timestamp_test() {
    let event = RawTripEvent::new("Villach - Edirne", "2025-04-26 21:32", "27.04.2025 06:03");
    assert!(matches!(
        event.parse(),
        Err(Error::MalformedTimestamp { .. })
    ));
}
