//! Domain model for SIPS supply-point lookups.
//!
//! Raw rows as scraped from the portal, the aggregated month buckets, and the
//! final record handed back to callers.

pub mod result;
pub mod types;

// Re-export commonly used items at the module level
pub use result::{
    AnnualConsumption, FinalResult, LookupOutcome, MonthlyAggregate, SupplyPointMetadata,
};
pub use types::{
    NumericLocale, PeriodValues, RawReadingRow, ReadingKind, PERIOD_COUNT, PERIOD_LABELS,
};
