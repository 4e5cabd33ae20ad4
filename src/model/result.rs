use crate::model::types::PeriodValues;
use serde_derive::Serialize;
use std::collections::BTreeMap;

/// Reserved row label of the annual-consumption table.
pub const TOTAL_LABEL: &str = "Total";

/// `"MM/YY"` month key to the summed period values of that month.
///
/// Sparse: months without readings have no key.
pub type MonthlyAggregate = BTreeMap<String, PeriodValues>;

/// Label/value pairs from the "Datos suministro" table.
pub type SupplyPointMetadata = BTreeMap<String, String>;

/// Per-period yearly consumption as scraped, `"Total"` row included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnualConsumption {
    entries: BTreeMap<String, f64>,
}

impl AnnualConsumption {
    pub fn insert(&mut self, label: impl Into<String>, kwh: f64) {
        self.entries.insert(label.into(), kwh);
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries.get(label).copied()
    }

    /// Value of the reserved `"Total"` row, if the portal rendered one.
    pub fn total(&self) -> Option<f64> {
        self.entries.get(TOTAL_LABEL).copied()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Per-period map with the `"Total"` row removed.
    pub fn into_periods(mut self) -> BTreeMap<String, f64> {
        self.entries.remove(TOTAL_LABEL);
        self.entries
    }
}

/// The record returned for a CUPS found on the portal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalResult {
    #[serde(rename = "CUPS")]
    pub cups: String,
    #[serde(rename = "Tarifa")]
    pub tarifa: String,
    #[serde(rename = "PotContratada")]
    pub pot_contratada: PeriodValues,
    #[serde(rename = "ConsumoAnual")]
    pub consumo_anual: BTreeMap<String, f64>,
    #[serde(rename = "ConsumoMensual")]
    pub consumo_mensual: MonthlyAggregate,
    #[serde(rename = "PotenciaConsumida")]
    pub potencia_consumida: MonthlyAggregate,
}

/// Outcome of one lookup that reached the portal successfully.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(FinalResult),
    /// The page carried no supply data (unknown CUPS or a silent login failure)
    NotFound,
}
