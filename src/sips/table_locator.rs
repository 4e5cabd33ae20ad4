//! Locates a named `<table>` in the SIPS result page.
//!
//! This is a narrow substring scan, not an HTML parser: it relies on the one
//! document shape the portal renders, where each section heading is a `div`
//! whose text is exactly the heading and the section's table is the next
//! `<table>` after it. Callers only see [`locate_named_table`], so swapping in
//! a DOM-based implementation does not touch them.

/// Result of looking up a heading's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLookup<'a> {
    /// `<table ...>...</table>` inclusive
    Found(&'a str),
    /// No `div` with this heading text
    HeadingMissing,
    /// Heading present but no `<table` after it
    TableMissing,
    /// `<table` present but never closed
    TableUnterminated,
}

impl<'a> TableLookup<'a> {
    pub fn table(self) -> Option<&'a str> {
        match self {
            TableLookup::Found(table) => Some(table),
            _ => None,
        }
    }

    /// True when the heading exists but its table could not be cut out, which
    /// points at markup drift rather than an absent section.
    pub fn is_malformed(self) -> bool {
        matches!(
            self,
            TableLookup::TableMissing | TableLookup::TableUnterminated
        )
    }
}

const TABLE_OPEN: &str = "<table";
const TABLE_CLOSE: &str = "</table>";

/// Finds the first table following the `div` headed `heading`.
pub fn locate_named_table<'a>(html: &'a str, heading: &str) -> TableLookup<'a> {
    let marker = format!(">{}</div>", heading);
    let Some(heading_at) = html.find(&marker) else {
        return TableLookup::HeadingMissing;
    };

    let after_heading = heading_at + marker.len();
    let Some(table_start) = html[after_heading..]
        .find(TABLE_OPEN)
        .map(|offset| after_heading + offset)
    else {
        return TableLookup::TableMissing;
    };

    match html[table_start..].find(TABLE_CLOSE) {
        Some(offset) => {
            TableLookup::Found(&html[table_start..table_start + offset + TABLE_CLOSE.len()])
        }
        None => TableLookup::TableUnterminated,
    }
}

/// Like [`locate_named_table`], logging a warning when the heading is present
/// but its table is malformed. Both that case and a missing heading yield
/// `None`.
pub fn table_or_warn<'a>(html: &'a str, heading: &str) -> Option<&'a str> {
    let lookup = locate_named_table(html, heading);
    if lookup.is_malformed() {
        tracing::warn!(
            "Section '{}' found but its table could not be located ({:?})",
            heading,
            lookup
        );
    } else if lookup == TableLookup::HeadingMissing {
        tracing::debug!("Section '{}' not present in page", heading);
    }
    lookup.table()
}
