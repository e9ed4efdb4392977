use std::{collections::HashMap, sync::Arc};

use crate::{
    schedule::{Error, day_rollover},
    shared::{MINUTES_PER_DAY, Time},
};

/// A stop of the reference run, offsets in minutes after its first clock time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceStop {
    pub stop_id: Arc<str>,
    pub arrival_offset: u32,
    pub departure_offset: u32,
}

impl ReferenceStop {
    pub fn new(stop_id: &str, arrival_offset: u32, departure_offset: u32) -> Self {
        Self {
            stop_id: stop_id.into(),
            arrival_offset,
            departure_offset,
        }
    }
}

/// The best known stopping pattern of one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTimeline {
    stops: Box<[ReferenceStop]>,
}

impl ReferenceTimeline {
    pub fn new(stops: Vec<ReferenceStop>) -> Result<Self, Error> {
        if stops.is_empty() {
            return Err(Error::InvalidDuration {
                context: "empty reference timeline".into(),
                minutes: 0,
            });
        }
        if u16::try_from(stops.len()).is_err() {
            return Err(Error::TooManyStops(stops.len()));
        }
        Ok(Self {
            stops: stops.into(),
        })
    }

    /// Builds a timeline from `(stop_id, "HH:MM", optional "HH:MM")` entries.
    /// A missing departure equals the arrival. Clock times roll over midnight
    /// as often as needed to never go back in time.
    pub fn from_clock_times<'a, I>(entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (&'a str, &'a str, Option<&'a str>)>,
    {
        let mut base: Option<u32> = None;
        let mut previous = 0;
        let mut stops = Vec::new();
        for (stop_id, arrival, departure) in entries {
            let arrival = parse_clock(arrival)?;
            let departure = departure.map(parse_clock).transpose()?.unwrap_or(arrival);
            let first = *base.get_or_insert(arrival);

            let arrival_offset = day_rollover(offset_in_day(arrival, first), previous);
            let departure_offset = day_rollover(offset_in_day(departure, first), arrival_offset);
            previous = departure_offset;
            stops.push(ReferenceStop::new(stop_id, arrival_offset, departure_offset));
        }
        Self::new(stops)
    }

    pub fn stops(&self) -> &[ReferenceStop] {
        &self.stops
    }

    /// Departure offset of the first stop.
    pub fn start(&self) -> u32 {
        self.stops.first().map_or(0, |stop| stop.departure_offset)
    }

    /// Arrival offset of the last stop.
    pub fn end(&self) -> u32 {
        self.stops.last().map_or(0, |stop| stop.arrival_offset)
    }

    pub fn duration(&self) -> i64 {
        self.end() as i64 - self.start() as i64
    }
}

fn parse_clock(clock: &str) -> Result<u32, Error> {
    Time::from_hm(clock)
        .map(|time| time.as_minutes())
        .ok_or_else(|| Error::malformed(clock, "expected HH:MM"))
}

fn offset_in_day(minutes: u32, base: u32) -> u32 {
    (minutes + MINUTES_PER_DAY - base) % MINUTES_PER_DAY
}

/// Reference timelines keyed by origin and destination stop id.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTimelines {
    timelines: HashMap<Arc<str>, HashMap<Arc<str>, ReferenceTimeline>>,
}

impl ReferenceTimelines {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with(mut self, origin: &str, destination: &str, timeline: ReferenceTimeline) -> Self {
        self.insert(origin, destination, timeline);
        self
    }

    pub fn insert(&mut self, origin: &str, destination: &str, timeline: ReferenceTimeline) {
        self.timelines
            .entry(origin.into())
            .or_default()
            .insert(destination.into(), timeline);
    }

    pub fn get(&self, origin: &str, destination: &str) -> Option<&ReferenceTimeline> {
        self.timelines.get(origin)?.get(destination)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &ReferenceTimeline)> {
        self.timelines.iter().flat_map(|(origin, timelines)| {
            timelines
                .iter()
                .map(move |(destination, timeline)| (&**origin, &**destination, timeline))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.timelines.values().all(HashMap::is_empty)
    }
}

/// Maps endpoint names as they appear in direction labels to stop ids.
#[derive(Debug, Clone, Default)]
pub struct StopAliases {
    aliases: HashMap<Arc<str>, Arc<str>>,
}

impl StopAliases {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with(mut self, name: &str, stop_id: &str) -> Self {
        self.aliases.insert(name.into(), stop_id.into());
        self
    }

    pub fn resolve(&self, name: &str) -> Result<&str, Error> {
        self.aliases
            .get(name)
            .map(|stop_id| &**stop_id)
            .ok_or_else(|| Error::UnknownDirection(format!("no stop alias for {name:?}")))
    }

    pub fn stop_ids(&self) -> impl Iterator<Item = &str> {
        self.aliases.values().map(|stop_id| &**stop_id)
    }
}

#[test]
fn rollover_over_two_midnights_test() {
    let timeline = ReferenceTimeline::from_clock_times([
        ("EDIRNE", "17:45", None),
        ("DOBOVA", "23:58", Some("01:16")),
        ("VILLACH", "08:11", None),
    ])
    .unwrap();
    let offsets: Vec<_> = timeline
        .stops()
        .iter()
        .map(|stop| (stop.arrival_offset, stop.departure_offset))
        .collect();
    assert_eq!(offsets, vec![(0, 0), (373, 451), (866, 866)]);
    assert_eq!(timeline.duration(), 866);
}

#[test]
fn rollover_keeps_order_test() {
    let timeline = ReferenceTimeline::from_clock_times([
        ("A", "21:32", None),
        ("B", "22:09", Some("22:39")),
        ("C", "01:20", Some("01:44")),
        ("D", "19:40", Some("20:10")),
        ("E", "06:03", None),
    ])
    .unwrap();
    assert_eq!(timeline.start(), 0);
    assert_eq!(timeline.end(), 1951);
}

#[test]
fn empty_timeline_test() {
    assert!(ReferenceTimeline::new(Vec::new()).is_err());
}

#[test]
fn too_many_stops_test() {
    let stops = (0..=u16::MAX as u32)
        .map(|i| ReferenceStop::new("A", i, i))
        .collect::<Vec<_>>();
    assert_eq!(
        ReferenceTimeline::new(stops),
        Err(Error::TooManyStops(65_536))
    );
}
