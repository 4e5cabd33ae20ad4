use crate::model::SupplyPointMetadata;
use crate::sips::html_parsing::{
    cell_text, parse_table_fragment, row_cells, DATA_CELL_SELECTOR, ROW_SELECTOR,
};
use crate::sips::parsers::TableParser;

/// Parses two-column label/value tables such as "Datos suministro".
pub struct KeyValueTableParser;

impl TableParser for KeyValueTableParser {
    type Output = SupplyPointMetadata;

    fn parse_table(&self, table_html: &str) -> Self::Output {
        let document = parse_table_fragment(table_html);
        let mut metadata = SupplyPointMetadata::new();

        for row in document.select(&ROW_SELECTOR) {
            let cells = row_cells(row, &DATA_CELL_SELECTOR);
            if cells.len() < 2 {
                continue;
            }
            let label = cell_text(cells[0]);
            if label.is_empty() {
                continue;
            }
            // later rows win on duplicate labels
            metadata.insert(label, cell_text(cells[1]));
        }

        metadata
    }
}
