use std::io;
use thiserror::Error;

mod config;
mod data;
mod loader;
pub mod models;
mod writer;
pub use config::*;
pub use data::*;
pub use loader::*;
pub use models::*;
pub use writer::*;

/// Date format of `calendar_dates.txt` and `feed_info.txt`.
pub const GTFS_DATE_FORMAT: &str = "%Y%m%d";

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
}
