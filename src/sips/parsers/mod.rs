//! Parsers for the three table sections of the SIPS result page.

mod annual_consumption_parser;
mod key_value_parser;
mod reading_parser;

pub use annual_consumption_parser::AnnualConsumptionParser;
pub use key_value_parser::KeyValueTableParser;
pub use reading_parser::ReadingTableParser;

/// Converts one `<table>...</table>` fragment into a domain type.
///
/// Parsers never fail: rows that do not fit the expected shape are skipped,
/// and an unusable table yields an empty output.
pub trait TableParser {
    /// The type of data this parser produces
    type Output;

    /// Parse a table fragment into the output type
    fn parse_table(&self, table_html: &str) -> Self::Output;
}
