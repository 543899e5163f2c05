use super::Selectors;
use crate::core::place::Locator;
use scraper::{ElementRef, Html, Selector};

/// Extracts detail-page locators from the index table.
///
/// Only the first table matching the configured selector is read, and only
/// its own rows: tables nested inside a cell are not walked. Each row
/// contributes the first linked anchor of its first data cell; header rows
/// and rows without such a link are skipped.
#[derive(Debug, Clone)]
pub struct IndexParser {
    table: Selector,
    row: Selector,
    cell: Selector,
    link: Selector,
}

impl IndexParser {
    pub fn new(selectors: &Selectors) -> Self {
        Self {
            table: selectors.index_table.clone(),
            row: selectors.row.clone(),
            cell: selectors.cell.clone(),
            link: selectors.link.clone(),
        }
    }

    /// Locators in row order. A page without the table yields an empty list.
    pub fn parse(&self, body: &str) -> Vec<Locator> {
        let document = Html::parse_document(body);
        let Some(table) = document.select(&self.table).next() else {
            log::debug!("index page has no element matching the table selector");
            return Vec::new();
        };

        let mut locators = Vec::new();
        let rows = table
            .select(&self.row)
            .filter(|row| owning_table(*row).map(|owner| owner.id()) == Some(table.id()));
        for (position, row) in rows.enumerate() {
            let Some(cell) = row
                .children()
                .filter_map(ElementRef::wrap)
                .find(|child| self.cell.matches(child))
            else {
                continue;
            };
            let href = cell
                .select(&self.link)
                .next()
                .and_then(|anchor| anchor.value().attr("href"))
                .map(str::trim)
                .filter(|href| !href.is_empty() && !href.starts_with('#'));

            match href {
                Some(href) => locators.push(Locator::new(href)),
                None => log::debug!("skipping index row {} without a usable link", position),
            }
        }
        locators
    }
}

/// Nearest enclosing `<table>` of a row
fn owning_table(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "table")
}
