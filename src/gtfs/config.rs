pub struct Config {
    pub agency_file_name: String,
    pub stops_file_name: String,
    pub routes_file_name: String,
    pub trips_file_name: String,
    pub stop_times_file_name: String,
    pub calendar_dates_file_name: String,
    pub shapes_file_name: String,
    pub feed_info_file_name: String,
    pub timeline_file_name: String,
    pub archive_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agency_file_name: "agency.txt".into(),
            stops_file_name: "stops.txt".into(),
            routes_file_name: "routes.txt".into(),
            trips_file_name: "trips.txt".into(),
            stop_times_file_name: "stop_times.txt".into(),
            calendar_dates_file_name: "calendar_dates.txt".into(),
            shapes_file_name: "shapes.txt".into(),
            feed_info_file_name: "feed_info.txt".into(),
            timeline_file_name: "timeline.csv".into(),
            archive_name: "optima_gtfs.zip".into(),
        }
    }
}
