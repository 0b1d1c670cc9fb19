//! Real-estate pro forma for redeveloping the waterfront.
//!
//! `compute` is a pure function: it validates a `ParameterSet` against the
//! declared bounds and derives every `MetricsSet` figure in one pass. Nothing is
//! cached between calls, so front ends simply call it again after each change.

mod engine;
pub mod inputs;
pub mod metrics;
pub mod router;
pub mod scenarios;
pub mod summary;

pub use engine::{
    compute, ProFormaEngine, AFFORDABLE_PRICE_FLOOR_PSF, AREA_PER_HOME, PARKING_AREA_PER_SPACE,
    SQUARE_FEET_PER_ACRE, USABLE_AREA_EFFICIENCY,
};
pub use inputs::{InputBound, OutOfRangeInput, ParameterField, ParameterSet, DPA_ACRES};
pub use metrics::{MetricsSet, ProfitMargin, UndefinedMetric};
pub use router::{proforma_router, ParameterCatalog, ProFormaResponse};
pub use scenarios::{
    evaluate_scenarios, Scenario, ScenarioImportError, ScenarioImporter, ScenarioOutcome,
};
pub use summary::{MetricEntry, MetricSection, MetricUnit};
