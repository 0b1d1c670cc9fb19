use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Land area of the East Boston Designated Port Area, in acres.
pub const DPA_ACRES: f64 = 33.0;

/// Inclusive numeric range accepted for a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputBound {
    pub min: f64,
    pub max: f64,
}

impl InputBound {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Non-finite values are never in range.
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

/// A parameter that violates its declared bound.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{field} = {value} is outside [{}, {}]", .bound.min, .bound.max)]
pub struct OutOfRangeInput {
    pub field: &'static str,
    pub value: f64,
    pub bound: InputBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterField {
    TotalAcres,
    OpenSpacePct,
    ResidentialFloors,
    ParkingRatio,
    HardCostPsf,
    SoftCostRatioPct,
    ResidentialPricePsf,
    CommercialPricePsf,
    AffordablePct,
    DevelopmentFeePct,
    LandCostPerGsf,
    PublicBenefitPct,
}

impl ParameterField {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::TotalAcres,
            Self::OpenSpacePct,
            Self::ResidentialFloors,
            Self::ParkingRatio,
            Self::HardCostPsf,
            Self::SoftCostRatioPct,
            Self::ResidentialPricePsf,
            Self::CommercialPricePsf,
            Self::AffordablePct,
            Self::DevelopmentFeePct,
            Self::LandCostPerGsf,
            Self::PublicBenefitPct,
        ]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::TotalAcres => "total_acres",
            Self::OpenSpacePct => "open_space_pct",
            Self::ResidentialFloors => "residential_floors",
            Self::ParkingRatio => "parking_ratio",
            Self::HardCostPsf => "hard_cost_psf",
            Self::SoftCostRatioPct => "soft_cost_ratio_pct",
            Self::ResidentialPricePsf => "residential_price_psf",
            Self::CommercialPricePsf => "commercial_price_psf",
            Self::AffordablePct => "affordable_pct",
            Self::DevelopmentFeePct => "development_fee_pct",
            Self::LandCostPerGsf => "land_cost_per_gsf",
            Self::PublicBenefitPct => "public_benefit_pct",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TotalAcres => "Available acres",
            Self::OpenSpacePct => "Open space (e.g. parks)",
            Self::ResidentialFloors => "Residential floors above ground-floor commercial",
            Self::ParkingRatio => "Homes per parking spot",
            Self::HardCostPsf => "Construction cost per sq. ft.",
            Self::SoftCostRatioPct => "Soft costs as % of construction",
            Self::ResidentialPricePsf => "Market-rate home price per sq. ft.",
            Self::CommercialPricePsf => "Market-rate commercial price per sq. ft.",
            Self::AffordablePct => "Income-restricted share of homes",
            Self::DevelopmentFeePct => "Developer fee as % of construction",
            Self::LandCostPerGsf => "Landowner payout per developed sq. ft.",
            Self::PublicBenefitPct => "Additional public benefits as % of construction",
        }
    }

    pub const fn bound(self) -> InputBound {
        match self {
            Self::TotalAcres => InputBound::new(DPA_ACRES, DPA_ACRES),
            Self::OpenSpacePct
            | Self::ParkingRatio
            | Self::SoftCostRatioPct
            | Self::AffordablePct
            | Self::DevelopmentFeePct => InputBound::new(0.0, 100.0),
            Self::ResidentialFloors => InputBound::new(1.0, 30.0),
            Self::HardCostPsf => InputBound::new(0.0, 800.0),
            Self::ResidentialPricePsf => InputBound::new(0.0, 1500.0),
            Self::CommercialPricePsf => InputBound::new(0.0, 1000.0),
            Self::LandCostPerGsf => InputBound::new(0.0, 500.0),
            Self::PublicBenefitPct => InputBound::new(0.0, 20.0),
        }
    }
}

/// The twelve policy and market levers of a redevelopment scenario.
///
/// Missing fields take the explainer's initial slider positions, so callers may
/// supply only the levers they move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterSet {
    pub total_acres: f64,
    pub open_space_pct: i64,
    pub residential_floors: i64,
    pub parking_ratio: i64,
    pub hard_cost_psf: f64,
    pub soft_cost_ratio_pct: i64,
    pub residential_price_psf: f64,
    pub commercial_price_psf: f64,
    pub affordable_pct: i64,
    pub development_fee_pct: i64,
    pub land_cost_per_gsf: f64,
    pub public_benefit_pct: i64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            total_acres: DPA_ACRES,
            open_space_pct: 50,
            residential_floors: 5,
            parking_ratio: 10,
            hard_cost_psf: 350.0,
            soft_cost_ratio_pct: 30,
            residential_price_psf: 900.0,
            commercial_price_psf: 250.0,
            affordable_pct: 20,
            development_fee_pct: 10,
            land_cost_per_gsf: 35.0,
            public_benefit_pct: 5,
        }
    }
}

impl ParameterSet {
    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::TotalAcres => self.total_acres,
            ParameterField::OpenSpacePct => self.open_space_pct as f64,
            ParameterField::ResidentialFloors => self.residential_floors as f64,
            ParameterField::ParkingRatio => self.parking_ratio as f64,
            ParameterField::HardCostPsf => self.hard_cost_psf,
            ParameterField::SoftCostRatioPct => self.soft_cost_ratio_pct as f64,
            ParameterField::ResidentialPricePsf => self.residential_price_psf,
            ParameterField::CommercialPricePsf => self.commercial_price_psf,
            ParameterField::AffordablePct => self.affordable_pct as f64,
            ParameterField::DevelopmentFeePct => self.development_fee_pct as f64,
            ParameterField::LandCostPerGsf => self.land_cost_per_gsf,
            ParameterField::PublicBenefitPct => self.public_benefit_pct as f64,
        }
    }

    pub fn bounds() -> [(&'static str, InputBound); 12] {
        ParameterField::ordered().map(|field| (field.name(), field.bound()))
    }

    /// Checks fields in declaration order and reports the first violation.
    pub fn validate(&self) -> Result<(), OutOfRangeInput> {
        for field in ParameterField::ordered() {
            let value = self.get(field);
            let bound = field.bound();
            if !bound.contains(value) {
                return Err(OutOfRangeInput {
                    field: field.name(),
                    value,
                    bound,
                });
            }
        }
        Ok(())
    }

    /// Pulls every field into its bound. NaN lands on the lower bound.
    pub fn clamped(&self) -> Self {
        let real = |field: ParameterField| field.bound().clamp(self.get(field));
        let whole = |field: ParameterField| real(field) as i64;

        Self {
            total_acres: real(ParameterField::TotalAcres),
            open_space_pct: whole(ParameterField::OpenSpacePct),
            residential_floors: whole(ParameterField::ResidentialFloors),
            parking_ratio: whole(ParameterField::ParkingRatio),
            hard_cost_psf: real(ParameterField::HardCostPsf),
            soft_cost_ratio_pct: whole(ParameterField::SoftCostRatioPct),
            residential_price_psf: real(ParameterField::ResidentialPricePsf),
            commercial_price_psf: real(ParameterField::CommercialPricePsf),
            affordable_pct: whole(ParameterField::AffordablePct),
            development_fee_pct: whole(ParameterField::DevelopmentFeePct),
            land_cost_per_gsf: real(ParameterField::LandCostPerGsf),
            public_benefit_pct: whole(ParameterField::PublicBenefitPct),
        }
    }
}
