use serde_derive::Serialize;
use std::fmt;

/// Number of tariff periods the portal reports (`P1`..`P6`).
pub const PERIOD_COUNT: usize = 6;

/// Period labels in column order.
pub const PERIOD_LABELS: [&str; PERIOD_COUNT] = ["P1", "P2", "P3", "P4", "P5", "P6"];

/// Numeric convention used by a portal column.
///
/// The SIPS page renders energy and demand readings with different separators,
/// so the convention is chosen per reading kind and never inferred from text.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum NumericLocale {
    /// `.` groups thousands, `,` marks decimals (`"1.162,50"` is 1162.5)
    Thousands,
    /// `.` marks decimals, `,` groups thousands (`"4.844"` is 4.844)
    Decimals,
}

impl fmt::Display for NumericLocale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NumericLocale::Thousands => write!(f, "thousands"),
            NumericLocale::Decimals => write!(f, "decimals"),
        }
    }
}

/// Reading channel named in the second column of the readings table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ReadingKind {
    /// Active energy (kWh)
    Activa,
    /// Reactive energy (kVArh)
    Reactiva,
    /// Peak demand (kW)
    Maximetro,
}

impl ReadingKind {
    /// Matches a portal label, tolerating a missing accent and surrounding
    /// whitespace. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Activa" => Some(ReadingKind::Activa),
            "Reactiva" => Some(ReadingKind::Reactiva),
            "Maxímetro" | "Maximetro" => Some(ReadingKind::Maximetro),
            _ => None,
        }
    }

    /// Numeric convention the portal uses for this channel.
    pub fn locale(self) -> NumericLocale {
        match self {
            ReadingKind::Activa | ReadingKind::Reactiva => NumericLocale::Thousands,
            ReadingKind::Maximetro => NumericLocale::Decimals,
        }
    }
}

/// Six per-period values, serialised as `{"P1": .., "P6": ..}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct PeriodValues {
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
    pub p4: f64,
    pub p5: f64,
    pub p6: f64,
}

impl PeriodValues {
    pub fn from_array(values: [f64; PERIOD_COUNT]) -> Self {
        let [p1, p2, p3, p4, p5, p6] = values;
        Self {
            p1,
            p2,
            p3,
            p4,
            p5,
            p6,
        }
    }

    /// Mutable slot for a zero-based period index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut f64> {
        match index {
            0 => Some(&mut self.p1),
            1 => Some(&mut self.p2),
            2 => Some(&mut self.p3),
            3 => Some(&mut self.p4),
            4 => Some(&mut self.p5),
            5 => Some(&mut self.p6),
            _ => None,
        }
    }
}

/// One row of the readings table before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReadingRow {
    /// `dd/mm/yyyy` as rendered by the portal
    pub date: String,
    /// Reading channel label, e.g. "Activa"
    pub kind: String,
    /// `None` when the row has fewer cells than periods
    pub periods: [Option<f64>; PERIOD_COUNT],
}

impl RawReadingRow {
    pub fn kind(&self) -> Option<ReadingKind> {
        ReadingKind::from_label(&self.kind)
    }
}
