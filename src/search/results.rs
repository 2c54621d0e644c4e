//! Search results page extraction.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

// CSS selector strings
const RESULTS_TABLE_SELECTOR_STR: &str = "table.table3";
const ROW_SELECTOR_STR: &str = "tr";
const CELL_SELECTOR_STR: &str = "td";
const RESULT_COUNT_SELECTOR_STR: &str = "body > div.customize-table > form > h2";

// Regex patterns
const RESULT_COUNT_PATTERN: &str = r"of\s([,0-9]*)\sSearch";

static RESULTS_TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(RESULTS_TABLE_SELECTOR_STR)
        .expect("Failed to parse results table selector - this is a bug")
});

static ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(ROW_SELECTOR_STR).expect("Failed to parse row selector - this is a bug")
});

static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(CELL_SELECTOR_STR).expect("Failed to parse cell selector - this is a bug")
});

static RESULT_COUNT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(RESULT_COUNT_SELECTOR_STR)
        .expect("Failed to parse result count selector - this is a bug")
});

static RESULT_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(RESULT_COUNT_PATTERN).expect("Failed to compile result count regex - this is a bug")
});

/// Rows and hit count scraped from one results page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// Total hits reported in the page heading, if it could be read
    pub total: Option<u64>,
    /// Cell texts of every table row on this page, header rows included
    pub records: Vec<Vec<String>>,
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Extracts the results table and total from a search results page.
///
/// Only the rows of the page that was returned are read; later pages are
/// not followed. A page without a results table yields no records and no
/// total.
pub fn parse_search_results(body: &str) -> SearchResults {
    let document = Html::parse_document(body);
    let mut results = SearchResults::default();

    let Some(table) = document.select(&RESULTS_TABLE_SELECTOR).next() else {
        log::debug!("No results table on search page");
        return results;
    };

    results.records = table
        .select(&ROW_SELECTOR)
        .map(|row| row.select(&CELL_SELECTOR).map(cell_text).collect())
        .collect();

    results.total = document
        .select(&RESULT_COUNT_SELECTOR)
        .next()
        .and_then(|heading| parse_total(&heading.text().collect::<String>()));

    results
}

/// Reads the hit count from a heading such as `Results 1-10 of 1,234 Search`.
pub fn parse_total(heading: &str) -> Option<u64> {
    let caps = RESULT_COUNT_RE.captures(heading)?;
    caps[1].replace(',', "").parse().ok()
}
