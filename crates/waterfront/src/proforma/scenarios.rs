use super::engine::compute;
use super::inputs::{OutOfRangeInput, ParameterSet};
use super::metrics::MetricsSet;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum ScenarioImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ScenarioImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioImportError::Io(err) => write!(f, "failed to read scenario file: {}", err),
            ScenarioImportError::Csv(err) => write!(f, "invalid scenario CSV data: {}", err),
        }
    }
}

impl std::error::Error for ScenarioImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioImportError::Io(err) => Some(err),
            ScenarioImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ScenarioImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ScenarioImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// A named parameter set, typically one row of a scenario sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub parameters: ParameterSet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub result: Result<MetricsSet, OutOfRangeInput>,
}

// Every lever is optional so a sheet only needs the columns it varies; empty
// cells read as `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScenarioRow {
    #[serde(deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    total_acres: Option<f64>,
    open_space_pct: Option<i64>,
    residential_floors: Option<i64>,
    parking_ratio: Option<i64>,
    hard_cost_psf: Option<f64>,
    soft_cost_ratio_pct: Option<i64>,
    residential_price_psf: Option<f64>,
    commercial_price_psf: Option<f64>,
    affordable_pct: Option<i64>,
    development_fee_pct: Option<i64>,
    land_cost_per_gsf: Option<f64>,
    public_benefit_pct: Option<i64>,
}

impl ScenarioRow {
    fn into_scenario(self, position: usize) -> Scenario {
        let defaults = ParameterSet::default();
        let parameters = ParameterSet {
            total_acres: self.total_acres.unwrap_or(defaults.total_acres),
            open_space_pct: self.open_space_pct.unwrap_or(defaults.open_space_pct),
            residential_floors: self
                .residential_floors
                .unwrap_or(defaults.residential_floors),
            parking_ratio: self.parking_ratio.unwrap_or(defaults.parking_ratio),
            hard_cost_psf: self.hard_cost_psf.unwrap_or(defaults.hard_cost_psf),
            soft_cost_ratio_pct: self
                .soft_cost_ratio_pct
                .unwrap_or(defaults.soft_cost_ratio_pct),
            residential_price_psf: self
                .residential_price_psf
                .unwrap_or(defaults.residential_price_psf),
            commercial_price_psf: self
                .commercial_price_psf
                .unwrap_or(defaults.commercial_price_psf),
            affordable_pct: self.affordable_pct.unwrap_or(defaults.affordable_pct),
            development_fee_pct: self
                .development_fee_pct
                .unwrap_or(defaults.development_fee_pct),
            land_cost_per_gsf: self.land_cost_per_gsf.unwrap_or(defaults.land_cost_per_gsf),
            public_benefit_pct: self
                .public_benefit_pct
                .unwrap_or(defaults.public_benefit_pct),
        };

        Scenario {
            name: self
                .name
                .unwrap_or_else(|| format!("scenario {}", position + 1)),
            parameters,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub struct ScenarioImporter;

impl ScenarioImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, ScenarioImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parses rows without range checks; each scenario is validated when it is
    /// evaluated so one bad row does not sink the sheet.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Scenario>, ScenarioImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut scenarios = Vec::new();
        for (position, record) in csv_reader.deserialize::<ScenarioRow>().enumerate() {
            scenarios.push(record?.into_scenario(position));
        }

        Ok(scenarios)
    }
}

pub fn evaluate_scenarios(scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
    scenarios
        .iter()
        .map(|scenario| ScenarioOutcome {
            scenario: scenario.clone(),
            result: compute(&scenario.parameters),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn missing_columns_and_empty_cells_take_defaults() {
        let csv = "name,open_space_pct,residential_floors,affordable_pct\n\
Tall towers,20,25,\n\
,80,,40\n";
        let scenarios = ScenarioImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].name, "Tall towers");
        assert_eq!(scenarios[0].parameters.open_space_pct, 20);
        assert_eq!(scenarios[0].parameters.residential_floors, 25);
        assert_eq!(
            scenarios[0].parameters.affordable_pct,
            ParameterSet::default().affordable_pct
        );

        assert_eq!(scenarios[1].name, "scenario 2");
        assert_eq!(scenarios[1].parameters.residential_floors, 5);
        assert_eq!(scenarios[1].parameters.affordable_pct, 40);
        assert_eq!(scenarios[1].parameters.hard_cost_psf, 350.0);
    }

    #[test]
    fn malformed_numbers_fail_the_import() {
        let csv = "name,open_space_pct\nBroken,lots\n";
        let error = ScenarioImporter::from_reader(Cursor::new(csv)).expect_err("bad number");
        assert!(matches!(error, ScenarioImportError::Csv(_)));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = ScenarioImporter::from_path("./does-not-exist.csv").expect_err("missing file");
        match error {
            ScenarioImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn evaluation_isolates_out_of_range_rows() {
        let csv = "name,open_space_pct\nBaseline,50\nImpossible,150\n";
        let scenarios = ScenarioImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        let outcomes = evaluate_scenarios(&scenarios);

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].result.is_ok());
        let err = outcomes[1].result.as_ref().expect_err("row rejected");
        assert_eq!(err.field, "open_space_pct");
        assert_eq!(err.value, 150.0);
    }

    #[test]
    fn negative_cells_reject_only_their_row() {
        let csv = "name,open_space_pct\nBaseline,50\nNegative,-5\n";
        let scenarios = ScenarioImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(scenarios[1].parameters.open_space_pct, -5);

        let outcomes = evaluate_scenarios(&scenarios);
        assert!(outcomes[0].result.is_ok());
        let err = outcomes[1].result.as_ref().expect_err("row rejected");
        assert_eq!(err.field, "open_space_pct");
        assert_eq!(err.value, -5.0);
        assert_eq!(err.bound.min, 0.0);
    }
}
