use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

const EAST_BOSTON_HOUSEHOLDS_CSV: &str = include_str!("../../data/east_boston_households.csv");

/// Households counted in the American Community Survey 2020.
pub const EAST_BOSTON_TOTAL_HOUSEHOLDS: u32 = 17_123;
/// Income-restricted homes listed on the City of Boston open data portal.
pub const EAST_BOSTON_INCOME_RESTRICTED_HOMES: u32 = 2_761;

#[derive(Debug)]
pub enum NeighborhoodDataError {
    Io(std::io::Error),
    Csv(csv::Error),
    Empty,
}

impl std::fmt::Display for NeighborhoodDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NeighborhoodDataError::Io(err) => write!(f, "failed to read household table: {}", err),
            NeighborhoodDataError::Csv(err) => write!(f, "invalid household CSV data: {}", err),
            NeighborhoodDataError::Empty => write!(f, "household table has no income bands"),
        }
    }
}

impl std::error::Error for NeighborhoodDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NeighborhoodDataError::Io(err) => Some(err),
            NeighborhoodDataError::Csv(err) => Some(err),
            NeighborhoodDataError::Empty => None,
        }
    }
}

impl From<std::io::Error> for NeighborhoodDataError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for NeighborhoodDataError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Households in one income bracket and how many of them are cost-burdened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeBand {
    #[serde(rename = "income")]
    pub label: String,
    pub households: u32,
    pub cost_burdened_households: u32,
}

impl IncomeBand {
    pub fn cost_burdened_pct(&self) -> f64 {
        if self.households == 0 {
            return 0.0;
        }
        100.0 * f64::from(self.cost_burdened_households) / f64::from(self.households)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborhoodProfile {
    pub name: String,
    pub total_households: u32,
    pub income_restricted_homes: u32,
    pub bands: Vec<IncomeBand>,
}

impl NeighborhoodProfile {
    pub fn east_boston() -> Result<Self, NeighborhoodDataError> {
        let bands = HouseholdTableLoader::from_reader(EAST_BOSTON_HOUSEHOLDS_CSV.as_bytes())?;
        Ok(Self::east_boston_with_bands(bands))
    }

    /// East Boston totals paired with an externally supplied household table.
    pub fn east_boston_with_bands(bands: Vec<IncomeBand>) -> Self {
        Self {
            name: "East Boston".to_string(),
            total_households: EAST_BOSTON_TOTAL_HOUSEHOLDS,
            income_restricted_homes: EAST_BOSTON_INCOME_RESTRICTED_HOMES,
            bands,
        }
    }

    pub fn cost_burdened_households(&self) -> u32 {
        self.bands
            .iter()
            .map(|band| band.cost_burdened_households)
            .sum()
    }

    /// Cost-burdened households left without an income-restricted home.
    pub fn income_restricted_home_gap(&self) -> u32 {
        self.cost_burdened_households()
            .saturating_sub(self.income_restricted_homes)
    }
}

pub struct HouseholdTableLoader;

impl HouseholdTableLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<IncomeBand>, NeighborhoodDataError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<IncomeBand>, NeighborhoodDataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let bands = csv_reader
            .deserialize::<IncomeBand>()
            .collect::<Result<Vec<_>, _>>()?;

        if bands.is_empty() {
            return Err(NeighborhoodDataError::Empty);
        }

        Ok(bands)
    }
}
