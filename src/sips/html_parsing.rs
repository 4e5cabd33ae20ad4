//! Shared HTML parsing utilities for the SIPS table parsers.
//!
//! Table fragments cut out by the table locator are parsed with `scraper` so
//! cell text comes back with tags stripped and entities decoded.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

pub static ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| html_selector("tr"));
pub static BODY_ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| html_selector("tbody tr"));
pub static DATA_CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| html_selector("td"));
pub static ANY_CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| html_selector("th, td"));

/// Creates a CSS selector from one of the constant patterns above.
///
/// # Panics
///
/// If `selector` is not valid CSS. Only called with literals.
fn html_selector(selector: &str) -> Selector {
    Selector::parse(selector).unwrap_or_else(|e| panic!("invalid selector '{}': {}", selector, e))
}

/// Parses a `<table>...</table>` fragment.
pub fn parse_table_fragment(table_html: &str) -> Html {
    Html::parse_fragment(table_html)
}

/// Text content of a cell with surrounding whitespace removed.
///
/// # Example
///
/// ```no_run
/// // "<td> <b>2.0TD</b>&nbsp;</td>" yields "2.0TD"
/// let tarifa = cell_text(cell);
/// ```
pub fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Collects the cells of `row` matching `cells`.
pub fn row_cells<'a>(row: ElementRef<'a>, cells: &Selector) -> Vec<ElementRef<'a>> {
    row.select(cells).collect()
}
