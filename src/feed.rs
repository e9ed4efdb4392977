//! Assembles trip patterns and static data into feed tables.

use std::{collections::HashSet, time::Instant};

use chrono::{Days, NaiveDateTime};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    gtfs::{
        self, GTFS_DATE_FORMAT, GtfsCalendarDate, GtfsFeed, GtfsFeedInfo, GtfsShape, GtfsStopTime,
        GtfsTrip,
    },
    schedule::{self, SynthesizedStopTime, TripPattern},
    shape,
    static_data::StaticData,
};

pub const FEED_VERSION_FORMAT: &str = "%Y%m%dT%H%M%S";
/// calendar_dates.txt: service added on that date.
const SERVICE_ADDED: u8 = 1;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Schedule error: {0}")]
    Schedule(#[from] schedule::Error),
    #[error("Gtfs error: {0}")]
    Gtfs(#[from] gtfs::Error),
    #[error("Shape error: {0}")]
    Shape(#[from] shape::Error),
}

/// Publisher fields of `feed_info.txt`.
///
/// `feed_start_date` is the earliest operating date, not the build date.
pub struct FeedInfoConfig {
    pub publisher_name: String,
    pub publisher_url: String,
    pub lang: String,
    pub contact_email: Option<String>,
    /// Days the feed stays valid after the last operating date.
    pub validity_extension_days: u64,
}

impl Default for FeedInfoConfig {
    fn default() -> Self {
        Self {
            publisher_name: "No official feed".into(),
            publisher_url: "https://github.com/jonaes/gtfs/".into(),
            lang: "de".into(),
            contact_email: None,
            validity_extension_days: 120,
        }
    }
}

impl From<&SynthesizedStopTime> for GtfsStopTime {
    fn from(value: &SynthesizedStopTime) -> Self {
        Self {
            trip_id: value.trip_id.to_string(),
            arrival_time: value.arrival_time.to_hms_string(),
            departure_time: value.departure_time.to_hms_string(),
            stop_id: value.stop_id.to_string(),
            stop_sequence: value.stop_sequence,
            pickup_type: access_type(value.pickup_allowed),
            drop_off_type: access_type(value.drop_off_allowed),
            timepoint: value.is_exact_time as u8,
        }
    }
}

/// 0 is regular service, 1 means not available.
fn access_type(allowed: bool) -> u8 {
    if allowed { 0 } else { 1 }
}

pub fn trip_id(index: usize) -> String {
    format!("T{}", index + 1)
}

pub fn service_id(index: usize) -> String {
    format!("S{}", index + 1)
}

pub struct FeedBuilder {
    static_data: StaticData,
    info: FeedInfoConfig,
    shapes: Vec<GtfsShape>,
}

impl FeedBuilder {
    pub fn new(static_data: StaticData) -> Self {
        Self {
            static_data,
            info: Default::default(),
            shapes: Vec::new(),
        }
    }

    pub fn with_feed_info(mut self, info: FeedInfoConfig) -> Self {
        self.info = info;
        self
    }

    pub fn with_shapes(mut self, shapes: Vec<GtfsShape>) -> Self {
        self.shapes = shapes;
        self
    }

    /// Any pattern that fails to synthesize fails the whole feed.
    pub fn build(
        &self,
        patterns: &[TripPattern],
        version: NaiveDateTime,
    ) -> Result<GtfsFeed, Error> {
        self.static_data.validate()?;
        let stop_times = self.stop_times(patterns)?;

        let shape_ids: HashSet<&str> = self
            .shapes
            .iter()
            .map(|shape| shape.shape_id.as_str())
            .collect();
        let mut trips = Vec::with_capacity(patterns.len());
        let mut calendar_dates = Vec::new();
        for (i, pattern) in patterns.iter().enumerate() {
            let direction = pattern.direction();
            let destination = self.static_data.aliases.resolve(&direction.destination)?;
            let service_id = service_id(i);
            trips.push(GtfsTrip {
                route_id: self.static_data.route.route_id.clone(),
                service_id: service_id.clone(),
                trip_id: trip_id(i),
                trip_headsign: Some(direction.destination.to_string()),
                shape_id: shape_ids.contains(destination).then(|| destination.to_string()),
            });
            calendar_dates.extend(pattern.operating_dates().iter().map(|date| {
                GtfsCalendarDate {
                    service_id: service_id.clone(),
                    date: date.format(GTFS_DATE_FORMAT).to_string(),
                    exception_type: SERVICE_ADDED,
                }
            }));
        }

        let feed = GtfsFeed {
            agency: vec![self.static_data.agency.clone()],
            stops: self.static_data.stops.clone(),
            routes: vec![self.static_data.route.clone()],
            trips,
            stop_times,
            calendar_dates,
            shapes: self.shapes.clone(),
            feed_info: self.feed_info(patterns, version).into_iter().collect(),
        };
        info!(
            "Assembled {} trips, {} calendar dates and {} stop times",
            feed.trips.len(),
            feed.calendar_dates.len(),
            feed.stop_times.len()
        );
        Ok(feed)
    }

    fn stop_times(&self, patterns: &[TripPattern]) -> Result<Vec<GtfsStopTime>, schedule::Error> {
        debug!("Synthesizing stop times...");
        let now = Instant::now();
        let interpolator = self.static_data.interpolator();
        let per_trip: Vec<Vec<SynthesizedStopTime>> = patterns
            .par_iter()
            .enumerate()
            .map(|(i, pattern)| interpolator.synthesize(&trip_id(i), pattern))
            .collect::<Result<_, _>>()?;
        let stop_times = per_trip
            .iter()
            .flatten()
            .map(GtfsStopTime::from)
            .collect();
        debug!("Synthesizing stop times took {:?}", now.elapsed());
        Ok(stop_times)
    }

    /// Valid from the first operating date until the last one plus the configured extension.
    fn feed_info(&self, patterns: &[TripPattern], version: NaiveDateTime) -> Option<GtfsFeedInfo> {
        let dates = patterns.iter().flat_map(|pattern| pattern.operating_dates());
        let start = dates.clone().min()?;
        let end = dates.max()?;
        let end = end
            .checked_add_days(Days::new(self.info.validity_extension_days))
            .unwrap_or(*end);
        Some(GtfsFeedInfo {
            feed_publisher_name: self.info.publisher_name.clone(),
            feed_publisher_url: self.info.publisher_url.clone(),
            feed_lang: self.info.lang.clone(),
            feed_start_date: start.format(GTFS_DATE_FORMAT).to_string(),
            feed_end_date: end.format(GTFS_DATE_FORMAT).to_string(),
            feed_version: version.format(FEED_VERSION_FORMAT).to_string(),
            feed_contact_email: self.info.contact_email.clone(),
        })
    }
}
