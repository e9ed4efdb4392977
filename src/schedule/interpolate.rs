use std::sync::Arc;

use crate::{
    schedule::{Error, ReferenceTimeline, ReferenceTimelines, StopAliases, TripPattern},
    shared::Time,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedStopTime {
    pub trip_id: Arc<str>,
    pub stop_id: Arc<str>,
    pub arrival_time: Time,
    pub departure_time: Time,
    pub stop_sequence: u16,
    pub pickup_allowed: bool,
    pub drop_off_allowed: bool,
    pub is_exact_time: bool,
}

/// Synthesizes stop times by rescaling a direction's reference timeline onto
/// the observed departure and arrival of a trip pattern.
///
/// Only the first stop is exact. Every other time assumes the dwell and travel
/// proportions of the reference run hold for all day variants, it is an
/// approximation and not a published schedule.
#[derive(Debug, Clone, Default)]
pub struct Interpolator {
    aliases: StopAliases,
    timelines: ReferenceTimelines,
}

impl Interpolator {
    pub fn new(aliases: StopAliases, timelines: ReferenceTimelines) -> Self {
        Self { aliases, timelines }
    }

    /// Reference timeline for the pattern's direction, resolved through the stop aliases.
    pub fn timeline(&self, pattern: &TripPattern) -> Result<&ReferenceTimeline, Error> {
        let direction = pattern.direction();
        let origin = self.aliases.resolve(&direction.origin)?;
        let destination = self.aliases.resolve(&direction.destination)?;
        self.timelines.get(origin, destination).ok_or_else(|| {
            Error::UnknownDirection(format!(
                "no reference timeline from {origin} to {destination} ({direction})"
            ))
        })
    }

    pub fn synthesize(
        &self,
        trip_id: &str,
        pattern: &TripPattern,
    ) -> Result<Vec<SynthesizedStopTime>, Error> {
        let timeline = self.timeline(pattern)?;

        let start = pattern.departure_time().as_minutes() as i64;
        let end = pattern.arrival_time().as_minutes() as i64;
        let actual_duration = end - start;
        if actual_duration <= 0 {
            return Err(Error::InvalidDuration {
                context: format!("trip {trip_id} ({})", pattern.direction()),
                minutes: actual_duration,
            });
        }

        let ref_start = timeline.start() as i64;
        let ref_duration = timeline.duration();
        if ref_duration <= 0 {
            return Err(Error::InvalidDuration {
                context: format!("reference timeline of {}", pattern.direction()),
                minutes: ref_duration,
            });
        }

        let scale = |offset: u32| {
            let relative = (offset as i64 - ref_start) as f64;
            let minutes = start as f64 + relative / ref_duration as f64 * actual_duration as f64;
            let minutes = minutes.round().max(0.0);
            u32::try_from(minutes as u64)
                .ok()
                .and_then(Time::checked_from_minutes)
                .ok_or_else(|| Error::InvalidDuration {
                    context: format!(
                        "trip {trip_id} ({}) scaled past the largest service time",
                        pattern.direction()
                    ),
                    minutes: minutes as i64,
                })
        };

        let shared_trip_id: Arc<str> = trip_id.into();
        let last = timeline.stops().len() - 1;
        timeline
            .stops()
            .iter()
            .enumerate()
            .map(|(i, stop)| -> Result<SynthesizedStopTime, Error> {
                let stop_sequence = u16::try_from(i + 1)
                    .map_err(|_| Error::TooManyStops(timeline.stops().len()))?;
                Ok(SynthesizedStopTime {
                    trip_id: shared_trip_id.clone(),
                    stop_id: stop.stop_id.clone(),
                    arrival_time: scale(stop.arrival_offset)?,
                    departure_time: scale(stop.departure_offset)?,
                    stop_sequence,
                    pickup_allowed: i == last,
                    drop_off_allowed: i == 0,
                    is_exact_time: i == 0,
                })
            })
            .collect()
    }
}
