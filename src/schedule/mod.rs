//! Schedule synthesis: turns scraped departures into recurring trip patterns
//! and rescales a reference timeline onto every pattern.

use thiserror::Error;

mod event;
mod grouper;
mod interpolate;
mod normalize;
mod timeline;

pub use event::*;
pub use grouper::*;
pub use interpolate::*;
pub use normalize::*;
pub use timeline::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Malformed timestamp {value:?}: {reason}")]
    MalformedTimestamp { value: String, reason: String },
    #[error("Invalid duration of {minutes} minutes for {context}")]
    InvalidDuration { context: String, minutes: i64 },
    #[error("Unknown direction: {0} (add a stop alias or reference timeline)")]
    UnknownDirection(String),
    #[error("Raw trip event is missing its {0}")]
    MissingField(&'static str),
    #[error("Reference timeline has {0} stops, stop_sequence cannot number them")]
    TooManyStops(usize),
}

impl Error {
    pub(crate) fn malformed(value: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedTimestamp {
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
