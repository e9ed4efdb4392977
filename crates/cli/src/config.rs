use std::{path::PathBuf, time::Duration};

pub const DEFAULT_URL: &str = "https://optimatours.de/timetable";
pub const URL_ENV: &str = "RAILFEED_URL";

pub struct AppConfig {
    pub url: String,
    pub output: PathBuf,
    pub shapes_dir: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
    pub fetch_timeout: Duration,
}

impl AppConfig {
    /// `railfeed [output.zip] [shapes_dir] [static_dir]`
    pub fn from_args<I>(args: I, archive_name: &str) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter().skip(1);
        Self {
            url: std::env::var(URL_ENV).unwrap_or_else(|_| DEFAULT_URL.into()),
            output: args
                .next()
                .map(PathBuf::from)
                .unwrap_or_else(|| archive_name.into()),
            shapes_dir: args.next().map(PathBuf::from),
            static_dir: args.next().map(PathBuf::from),
            fetch_timeout: Duration::from_secs(30),
        }
    }
}
