mod config;
mod fetch;

use crate::{
    config::AppConfig,
    fetch::{FetchError, fetch_timetable},
};
use chrono::Local;
use railfeed::{feed, gtfs, prelude::*, scrape, shape};
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Scrape(#[from] scrape::Error),
    #[error(transparent)]
    Feed(#[from] feed::Error),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let gtfs_config = gtfs::Config::default();
    let config = AppConfig::from_args(std::env::args(), &gtfs_config.archive_name);
    if let Err(err) = run(config, gtfs_config).await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig, gtfs_config: gtfs::Config) -> Result<(), AppError> {
    let now = Instant::now();
    info!("Fetching {}...", config.url);
    let html = fetch_timetable(&config.url, config.fetch_timeout).await?;

    let events = scrape_timetable(&html)?;
    let patterns = group_events(&events).map_err(feed::Error::from)?;
    info!(
        "Found {} trip patterns in {} departures",
        patterns.len(),
        events.len()
    );
    for pattern in patterns.iter() {
        info!(
            "{} {} -> {} on {} days",
            pattern.direction(),
            pattern.departure_time(),
            pattern.key.arrival,
            pattern.operating_dates().len()
        );
    }

    let mut static_data = StaticData::optima().map_err(feed::Error::from)?;
    if let Some(dir) = &config.static_dir {
        let loader = GtfsLoader::new(gtfs::Config::default())
            .load_from_dir(dir)
            .map_err(feed::Error::from)?;
        static_data = static_data
            .with_stops(loader.stops().clone())
            .with_timeline_records(loader.timeline())
            .map_err(feed::Error::from)?;
    }

    let shapes = match &config.shapes_dir {
        Some(dir) => shape::load_shapes_from_dir(dir).map_err(feed::Error::from)?,
        None => {
            warn!("No shapes directory given, trips are written without shape_id");
            Vec::new()
        }
    };

    let gtfs_feed = FeedBuilder::new(static_data)
        .with_shapes(shapes)
        .build(&patterns, Local::now().naive_local())?;
    GtfsWriter::new(gtfs_config)
        .write_zip(&gtfs_feed, &config.output)
        .map_err(feed::Error::from)?;
    info!("Building feed took {:?}", now.elapsed());
    Ok(())
}
