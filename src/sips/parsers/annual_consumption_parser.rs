use crate::model::AnnualConsumption;
use crate::sips::helper::parse_thousands_locale;
use crate::sips::html_parsing::{
    cell_text, parse_table_fragment, row_cells, ANY_CELL_SELECTOR, ROW_SELECTOR,
};
use crate::sips::parsers::TableParser;

/// Parses the "Consumo anual" table: a period label (`th` or `td`) followed by
/// a kWh value cell in the Spanish thousands convention.
///
/// The `"Total"` row is kept; [`AnnualConsumption::into_periods`] drops it.
pub struct AnnualConsumptionParser;

impl TableParser for AnnualConsumptionParser {
    type Output = AnnualConsumption;

    fn parse_table(&self, table_html: &str) -> Self::Output {
        let document = parse_table_fragment(table_html);
        let mut annual = AnnualConsumption::default();

        for row in document.select(&ROW_SELECTOR) {
            let cells = row_cells(row, &ANY_CELL_SELECTOR);
            if cells.len() < 2 || cells[1].value().name() != "td" {
                continue;
            }
            let label = cell_text(cells[0]);
            if label.is_empty() {
                continue;
            }
            annual.insert(label, parse_thousands_locale(&cell_text(cells[1])));
        }

        annual
    }
}
