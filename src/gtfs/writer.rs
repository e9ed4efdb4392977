use crate::gtfs::{self, Config, GtfsFeed};
use serde::Serialize;
use std::{
    fs::File,
    io::{Seek, Write},
    path::Path,
    time::Instant,
};
use tracing::{debug, info};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

#[derive(Default)]
pub struct GtfsWriter {
    config: Config,
}

impl GtfsWriter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn write_zip<P: AsRef<Path>>(&self, feed: &GtfsFeed, path: P) -> Result<(), gtfs::Error> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_archive(feed, file)?;
        info!("Wrote {}", path.display());
        Ok(())
    }

    /// Writes every non-empty table as a deflated CSV entry and returns the inner writer.
    pub fn write_archive<W>(&self, feed: &GtfsFeed, writer: W) -> Result<W, gtfs::Error>
    where
        W: Write + Seek,
    {
        debug!("Packing feed...");
        let now = Instant::now();
        let mut archive = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let config = &self.config;
        write_table(&mut archive, options, &config.agency_file_name, &feed.agency)?;
        write_table(&mut archive, options, &config.stops_file_name, &feed.stops)?;
        write_table(&mut archive, options, &config.routes_file_name, &feed.routes)?;
        write_table(&mut archive, options, &config.trips_file_name, &feed.trips)?;
        write_table(&mut archive, options, &config.stop_times_file_name, &feed.stop_times)?;
        write_table(
            &mut archive,
            options,
            &config.calendar_dates_file_name,
            &feed.calendar_dates,
        )?;
        write_table(&mut archive, options, &config.shapes_file_name, &feed.shapes)?;
        write_table(&mut archive, options, &config.feed_info_file_name, &feed.feed_info)?;
        let writer = archive.finish()?;
        debug!("Packing feed took {:?}", now.elapsed());
        Ok(writer)
    }
}

fn write_table<W, T>(
    archive: &mut ZipWriter<W>,
    options: SimpleFileOptions,
    name: &str,
    records: &[T],
) -> Result<(), gtfs::Error>
where
    W: Write + Seek,
    T: Serialize,
{
    if records.is_empty() {
        debug!("Skipping empty {name}");
        return Ok(());
    }
    archive.start_file(name, options)?;
    let mut writer = csv::Writer::from_writer(&mut *archive);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    debug!("Packed {name} with {} rows", records.len());
    Ok(())
}
