//! Operator data that is not published on the timetable page.

use std::collections::HashSet;

use crate::{
    gtfs::{GtfsAgency, GtfsRoute, GtfsStop, TimelineRecord},
    schedule::{self, Interpolator, ReferenceTimeline, ReferenceTimelines, StopAliases},
};

type ClockEntry = (&'static str, &'static str, Option<&'static str>);

const VILLACH_EDIRNE: &[ClockEntry] = &[
    ("VILLACH", "21:32", None),
    ("JESENICE", "22:09", Some("22:39")),
    ("DOBOVA", "01:20", Some("01:44")),
    ("TOVARNIK", "07:30", Some("07:55")),
    ("SID", "08:03", Some("08:43")),
    ("BEOGRAD", "10:16", Some("10:20")),
    ("NIS", "15:41", Some("16:22")),
    ("DIMITROVGRAD", "19:40", Some("20:10")),
    ("EDIRNE", "06:03", None),
];

const EDIRNE_VILLACH: &[ClockEntry] = &[
    ("EDIRNE", "17:45", None),
    ("DIMITROVGRAD", "03:02", Some("03:53")),
    ("NIS", "07:08", Some("07:55")),
    ("BEOGRAD", "12:58", Some("13:15")),
    ("SID", "15:35", Some("16:50")),
    ("TOVARNIK", "16:59", Some("17:29")),
    ("DOBOVA", "23:58", Some("01:16")),
    ("JESENICE", "05:09", Some("07:33")),
    ("VILLACH", "08:11", None),
];

const STOPS: &[(&str, &str, f64, f64)] = &[
    ("VILLACH", "Villach Hbf", 46.618_6, 13.848_5),
    ("JESENICE", "Jesenice", 46.430_6, 14.058_6),
    ("DOBOVA", "Dobova", 45.897_2, 15.655_0),
    ("TOVARNIK", "Tovarnik", 45.164_4, 19.152_8),
    ("SID", "Šid", 45.128_6, 19.226_4),
    ("BEOGRAD", "Beograd Centar", 44.808_4, 20.457_6),
    ("NIS", "Niš", 43.329_2, 21.894_7),
    ("DIMITROVGRAD", "Dimitrovgrad", 43.014_7, 22.780_0),
    ("EDIRNE", "Edirne", 41.660_6, 26.560_0),
];

/// Agency, route, stop registry and the reference data the interpolator needs.
#[derive(Debug, Clone)]
pub struct StaticData {
    pub agency: GtfsAgency,
    pub route: GtfsRoute,
    pub stops: Vec<GtfsStop>,
    pub aliases: StopAliases,
    pub timelines: ReferenceTimelines,
}

impl StaticData {
    /// The Optima Express car train between Villach and Edirne.
    pub fn optima() -> Result<Self, schedule::Error> {
        let agency = GtfsAgency {
            agency_id: "OPTIMA".into(),
            agency_name: "Optima Express".into(),
            agency_url: "https://optimatours.de".into(),
            agency_timezone: "Europe/Vienna".into(),
            agency_lang: Some("de".into()),
        };
        let route = GtfsRoute {
            route_id: "OPTIMA".into(),
            agency_id: "OPTIMA".into(),
            route_short_name: Some("Optima Express".into()),
            route_long_name: None,
            // Rail
            route_type: 2,
        };
        let stops = STOPS
            .iter()
            .map(|(stop_id, stop_name, stop_lat, stop_lon)| GtfsStop {
                stop_id: stop_id.to_string(),
                stop_name: stop_name.to_string(),
                stop_lat: *stop_lat,
                stop_lon: *stop_lon,
                location_type: None,
                parent_station: None,
            })
            .collect();
        let aliases = StopAliases::new()
            .with("Villach", "VILLACH")
            .with("Edirne", "EDIRNE");
        let timelines = ReferenceTimelines::new()
            .with(
                "VILLACH",
                "EDIRNE",
                ReferenceTimeline::from_clock_times(VILLACH_EDIRNE.iter().copied())?,
            )
            .with(
                "EDIRNE",
                "VILLACH",
                ReferenceTimeline::from_clock_times(EDIRNE_VILLACH.iter().copied())?,
            );

        Ok(Self {
            agency,
            route,
            stops,
            aliases,
            timelines,
        })
    }

    /// Replaces the stop registry, an empty list keeps the current one.
    pub fn with_stops(mut self, stops: Vec<GtfsStop>) -> Self {
        if !stops.is_empty() {
            self.stops = stops;
        }
        self
    }

    /// Replaces the timelines of every direction present in `records`.
    pub fn with_timeline_records(mut self, records: &[TimelineRecord]) -> Result<Self, schedule::Error> {
        let mut directions: Vec<(&str, &str)> = Vec::new();
        records.iter().for_each(|record| {
            let direction = (record.origin.as_str(), record.destination.as_str());
            if !directions.contains(&direction) {
                directions.push(direction);
            }
        });

        for (origin, destination) in directions {
            let entries = records
                .iter()
                .filter(|record| record.origin == origin && record.destination == destination)
                .map(|record| {
                    (
                        record.stop_id.as_str(),
                        record.arrival_time.as_str(),
                        record.departure_time.as_deref().filter(|time| !time.is_empty()),
                    )
                });
            let timeline = ReferenceTimeline::from_clock_times(entries)?;
            self.timelines.insert(origin, destination, timeline);
        }
        Ok(self)
    }

    /// Every stop an alias or timeline points at must be in the stop registry.
    pub fn validate(&self) -> Result<(), schedule::Error> {
        let known: HashSet<&str> = self.stops.iter().map(|stop| stop.stop_id.as_str()).collect();
        let timeline_stops = self.timelines.iter().flat_map(|(origin, destination, timeline)| {
            [origin, destination]
                .into_iter()
                .chain(timeline.stops().iter().map(|stop| &*stop.stop_id))
        });
        self.aliases
            .stop_ids()
            .chain(timeline_stops)
            .find(|stop_id| !known.contains(stop_id))
            .map_or(Ok(()), |stop_id| {
                Err(schedule::Error::UnknownDirection(format!(
                    "stop {stop_id} is not in the stop registry"
                )))
            })
    }

    pub fn interpolator(&self) -> Interpolator {
        Interpolator::new(self.aliases.clone(), self.timelines.clone())
    }
}

#[test]
fn optima_is_consistent_test() {
    let data = StaticData::optima().unwrap();
    assert!(data.validate().is_ok());
    let timeline = data.timelines.get("EDIRNE", "VILLACH").unwrap();
    assert_eq!(timeline.stops().len(), 9);
    // 17:45 until 08:11 two days later
    assert_eq!(timeline.duration(), 38 * 60 + 26);
}

#[test]
fn unknown_registry_stop_test() {
    let data = StaticData::optima().unwrap();
    let data = StaticData {
        aliases: data.aliases.clone().with("Wien", "WIEN"),
        ..data
    };
    assert!(matches!(
        data.validate(),
        Err(schedule::Error::UnknownDirection(_))
    ));
}
