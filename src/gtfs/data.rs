use crate::gtfs::{
    GtfsAgency, GtfsCalendarDate, GtfsFeedInfo, GtfsRoute, GtfsShape, GtfsStop, GtfsStopTime,
    GtfsTrip,
};

/// Every table of a generated feed, rows in output order.
#[derive(Default, Debug, Clone)]
pub struct GtfsFeed {
    pub agency: Vec<GtfsAgency>,
    pub stops: Vec<GtfsStop>,
    pub routes: Vec<GtfsRoute>,
    pub trips: Vec<GtfsTrip>,
    pub stop_times: Vec<GtfsStopTime>,
    pub calendar_dates: Vec<GtfsCalendarDate>,
    pub shapes: Vec<GtfsShape>,
    pub feed_info: Vec<GtfsFeedInfo>,
}
