use std::{collections::HashMap, time::Instant};

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};

use crate::{
    schedule::{Direction, Error, NormalizedArrival, RawTripEvent, clock_minutes, normalize_arrival},
    shared::Time,
};

/// Two events with equal keys are the same recurring service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripPatternKey {
    pub direction: Direction,
    pub departure: NaiveTime,
    pub arrival: NormalizedArrival,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripPattern {
    pub key: TripPatternKey,
    operating_dates: Vec<NaiveDate>,
}

impl TripPattern {
    /// `None` without operating dates.
    pub fn new(key: TripPatternKey, mut operating_dates: Vec<NaiveDate>) -> Option<Self> {
        if operating_dates.is_empty() {
            return None;
        }
        operating_dates.sort_unstable();
        operating_dates.dedup();
        Some(Self {
            key,
            operating_dates,
        })
    }

    pub fn direction(&self) -> &Direction {
        &self.key.direction
    }

    /// Calendar dates ascending, without duplicates.
    pub fn operating_dates(&self) -> &[NaiveDate] {
        &self.operating_dates
    }

    pub fn departure_time(&self) -> Time {
        Time::from_minutes(clock_minutes(&self.key.departure))
    }

    pub fn arrival_time(&self) -> Time {
        self.key.arrival.to_time()
    }
}

/// Folds raw events into trip patterns, ordered by first occurrence.
///
/// Events missing a field are dropped. Any other parse failure, or an arrival
/// that is not after its departure, fails the whole run.
pub fn group_events(events: &[RawTripEvent]) -> Result<Vec<TripPattern>, Error> {
    debug!("Grouping {} raw trip events...", events.len());
    let now = Instant::now();
    let mut lookup: HashMap<TripPatternKey, usize> = HashMap::new();
    let mut patterns: Vec<TripPattern> = Vec::new();

    for (i, raw) in events.iter().enumerate() {
        let event = match raw.parse() {
            Ok(event) => event,
            Err(Error::MissingField(field)) => {
                warn!("Dropping raw trip event {i}: missing {field}");
                continue;
            }
            Err(err) => return Err(err),
        };

        let elapsed = (event.arrival - event.departure).num_minutes();
        if elapsed <= 0 {
            return Err(Error::InvalidDuration {
                context: format!("{} departing {}", event.direction, event.departure),
                minutes: elapsed,
            });
        }

        let key = TripPatternKey {
            arrival: normalize_arrival(&event.departure, &event.arrival)?,
            departure: event.departure.time(),
            direction: event.direction,
        };
        let date = event.departure.date();
        match lookup.get(&key) {
            Some(index) => patterns[*index].operating_dates.push(date),
            None => {
                lookup.insert(key.clone(), patterns.len());
                patterns.push(TripPattern {
                    key,
                    operating_dates: vec![date],
                });
            }
        }
    }

    patterns.iter_mut().for_each(|pattern| {
        pattern.operating_dates.sort_unstable();
        pattern.operating_dates.dedup();
    });

    debug!(
        "Grouping into {} trip patterns took {:?}",
        patterns.len(),
        now.elapsed()
    );
    Ok(patterns)
}
