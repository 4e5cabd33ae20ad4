use crate::model::{NumericLocale, RawReadingRow, ReadingKind, PERIOD_COUNT};
use crate::sips::helper::parse_locale_number;
use crate::sips::html_parsing::{
    cell_text, parse_table_fragment, row_cells, BODY_ROW_SELECTOR, DATA_CELL_SELECTOR,
};
use crate::sips::parsers::TableParser;

/// Parses the readings table ("Lecturas"): date, reading kind, then up to six
/// period columns.
///
/// The portal renders energy and demand readings with different separators,
/// so the numeric convention is fixed per parser instance and picked from the
/// reading kind the caller wants.
pub struct ReadingTableParser {
    locale: NumericLocale,
}

impl ReadingTableParser {
    /// Dot as thousands separator for Activa and Reactiva, dot as decimal
    /// separator for Maxímetro.
    pub fn for_kind(kind: ReadingKind) -> Self {
        Self {
            locale: kind.locale(),
        }
    }
}

impl TableParser for ReadingTableParser {
    type Output = Vec<RawReadingRow>;

    fn parse_table(&self, table_html: &str) -> Self::Output {
        // Checked on the raw markup on purpose: the HTML parser inserts an
        // implicit <tbody>, and on this portal a table without one in the
        // source only carries header rows.
        if !table_html.contains("<tbody") {
            tracing::debug!("Readings table has no <tbody> in its markup, nothing to parse");
            return Vec::new();
        }

        tracing::debug!("Parsing readings table with the {} locale", self.locale);
        let document = parse_table_fragment(table_html);
        document
            .select(&BODY_ROW_SELECTOR)
            .filter_map(|row| {
                let cells = row_cells(row, &DATA_CELL_SELECTOR);
                if cells.len() < 2 {
                    return None;
                }
                let mut periods = [None; PERIOD_COUNT];
                for (slot, cell) in periods.iter_mut().zip(cells.iter().skip(2)) {
                    *slot = Some(parse_locale_number(&cell_text(*cell), self.locale));
                }
                Some(RawReadingRow {
                    date: cell_text(cells[0]),
                    kind: cell_text(cells[1]),
                    periods,
                })
            })
            .collect()
    }
}
