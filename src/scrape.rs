//! Extracts raw trip events from the operator's timetable page.
//!
//! Every `.card.fp-card` block is one direction, every `.calc-day` tile in it a
//! departure with `data-dep` and `data-arr` timestamps.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

use crate::schedule::RawTripEvent;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid selector {0}: {1}")]
    Selector(&'static str, String),
}

struct Selectors {
    block: Selector,
    heading: Selector,
    header: Selector,
    trip: Selector,
}

impl Selectors {
    fn new() -> Result<Self, Error> {
        Ok(Self {
            block: selector(".card.fp-card")?,
            heading: selector("h5")?,
            header: selector(".card-header > div")?,
            trip: selector(".calc-day")?,
        })
    }
}

fn selector(css: &'static str) -> Result<Selector, Error> {
    Selector::parse(css).map_err(|err| Error::Selector(css, err.to_string()))
}

pub fn scrape_timetable(html: &str) -> Result<Vec<RawTripEvent>, Error> {
    let selectors = Selectors::new()?;
    let document = Html::parse_document(html);
    let mut events = Vec::new();
    for block in document.select(&selectors.block) {
        let Some(direction) = direction_label(&block, &selectors) else {
            debug!("Skipping timetable block without direction");
            continue;
        };
        events.extend(block.select(&selectors.trip).map(|trip| RawTripEvent {
            direction: Some(direction.clone()),
            departure: trip.value().attr("data-dep").map(str::to_owned),
            arrival: trip.value().attr("data-arr").map(str::to_owned),
        }));
    }
    debug!("Scraped {} raw trip events", events.len());
    Ok(events)
}

/// The `h5` heading of older page layouts, else the first text of the card header.
fn direction_label(block: &ElementRef, selectors: &Selectors) -> Option<String> {
    let heading = block
        .select(&selectors.heading)
        .next()
        .map(|h5| h5.text().collect::<String>().trim().to_owned())
        .filter(|label| !label.is_empty());
    heading.or_else(|| {
        block
            .select(&selectors.header)
            .next()?
            .text()
            .map(str::trim)
            .find(|text| !text.is_empty())
            .map(str::to_owned)
    })
}
