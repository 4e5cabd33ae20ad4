use crate::model::{
    AnnualConsumption, FinalResult, LookupOutcome, MonthlyAggregate, PeriodValues,
    SupplyPointMetadata, PERIOD_COUNT, PERIOD_LABELS,
};
use crate::sips::helper::parse_thousands_locale;

pub const CUPS_LABEL: &str = "CUPS";
pub const TARIFF_LABEL: &str = "Tarifa";

/// Metadata label carrying the contracted power of `period` ("P1".."P6").
pub fn contracted_power_label(period: &str) -> String {
    format!("Potencia contratada {}", period)
}

/// Builds the lookup outcome from the parsed page sections.
///
/// Empty metadata means the portal did not render supply data (unknown CUPS,
/// or the login page came back instead) and yields [`LookupOutcome::NotFound`].
pub fn assemble(
    metadata: SupplyPointMetadata,
    annual: AnnualConsumption,
    consumo_mensual: MonthlyAggregate,
    potencia_consumida: MonthlyAggregate,
) -> LookupOutcome {
    if metadata.is_empty() {
        return LookupOutcome::NotFound;
    }

    let mut pot_contratada = [0.0; PERIOD_COUNT];
    for (slot, period) in pot_contratada.iter_mut().zip(PERIOD_LABELS) {
        if let Some(text) = metadata.get(&contracted_power_label(period)) {
            *slot = parse_thousands_locale(text);
        }
    }

    let portal_total = annual.total();
    let consumo_anual = annual.into_periods();
    if let Some(total) = portal_total {
        tracing::debug!(
            "Annual consumption: {} kWh over periods, portal total {} kWh",
            consumo_anual.values().sum::<f64>(),
            total
        );
    }

    LookupOutcome::Found(FinalResult {
        cups: metadata.get(CUPS_LABEL).cloned().unwrap_or_default(),
        tarifa: metadata.get(TARIFF_LABEL).cloned().unwrap_or_default(),
        pot_contratada: PeriodValues::from_array(pot_contratada),
        consumo_anual,
        consumo_mensual,
        potencia_consumida,
    })
}
