use crate::gtfs::{self, Config, GtfsStop, TimelineRecord};
use csv::Reader;
use serde::de::DeserializeOwned;
use std::{fs, io::Read, path::Path};
use tracing::debug;

/// Reads hand maintained static tables from a directory.
/// Files that are not present are left empty.
#[derive(Default)]
pub struct GtfsLoader {
    pub(crate) stops: Vec<GtfsStop>,
    pub(crate) timeline: Vec<TimelineRecord>,
    pub(crate) config: Config,
}

impl GtfsLoader {
    pub fn new(config: Config) -> Self {
        Self {
            stops: Default::default(),
            timeline: Default::default(),
            config,
        }
    }

    pub fn load_from_dir<P: AsRef<Path>>(mut self, path: P) -> Result<Self, gtfs::Error> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(gtfs::Error::FileNotFound(path.display().to_string()));
        }
        let stops_path = path.join(&self.config.stops_file_name);
        if stops_path.is_file() {
            parse_csv(&mut self.stops, &mut fs::File::open(&stops_path)?)?;
            debug!("Loaded {} stops from {}", self.stops.len(), stops_path.display());
        }
        let timeline_path = path.join(&self.config.timeline_file_name);
        if timeline_path.is_file() {
            parse_csv(&mut self.timeline, &mut fs::File::open(&timeline_path)?)?;
            debug!(
                "Loaded {} timeline rows from {}",
                self.timeline.len(),
                timeline_path.display()
            );
        }
        Ok(self)
    }

    pub fn stops(&self) -> &Vec<GtfsStop> {
        &self.stops
    }

    pub fn timeline(&self) -> &Vec<TimelineRecord> {
        &self.timeline
    }
}

pub(crate) fn parse_csv<R, T>(buf: &mut Vec<T>, reader: &mut R) -> Result<(), gtfs::Error>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut rdr = Reader::from_reader(reader);
    for result in rdr.deserialize() {
        let record: T = result?;
        buf.push(record);
    }
    Ok(())
}
