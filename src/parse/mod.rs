//! HTML extraction for index and detail pages
//!
//! Both parsers are tolerant by construction: structure they do not
//! recognise yields fewer locators or "no result", never an error. The one
//! exception is a coordinate that is present but unreadable, which points at
//! an upstream format change and is reported as [`DetailError`].

pub mod detail;
pub mod index;

pub use detail::{DetailError, DetailParser};
pub use index::IndexParser;

use crate::{core::config::SelectorConfig, CrawlError, Result};
use scraper::{ElementRef, Selector};

/// Compiled form of [`SelectorConfig`] plus the fixed table selectors
#[derive(Debug, Clone)]
pub struct Selectors {
    pub index_table: Selector,
    pub row: Selector,
    pub cell: Selector,
    pub link: Selector,
    pub heading: Selector,
    pub geo: Selector,
}

impl Selectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            index_table: compile_one(&config.index_table)?,
            row: compile_one("tr")?,
            cell: compile_one("td")?,
            link: compile_one("a[href]")?,
            heading: compile_one(&config.heading)?,
            geo: compile_one(&config.geo)?,
        })
    }
}

fn compile_one(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| CrawlError::InvalidSelector(format!("{selector:?}: {e}")))
}

/// All text below `element`, with runs of whitespace collapsed to one space
pub(crate) fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
