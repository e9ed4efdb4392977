pub mod feed;
pub mod gtfs;
pub mod schedule;
pub mod scrape;
pub mod shape;
pub mod shared;
pub mod static_data;

pub mod prelude {
    pub use crate::feed::{FeedBuilder, FeedInfoConfig};
    pub use crate::gtfs::{GtfsFeed, GtfsLoader, GtfsWriter};
    pub use crate::schedule::{
        Interpolator, RawTripEvent, ReferenceTimeline, ReferenceTimelines, StopAliases,
        SynthesizedStopTime, TripPattern, group_events,
    };
    pub use crate::scrape::scrape_timetable;
    pub use crate::shared::Time;
    pub use crate::static_data::StaticData;
}
