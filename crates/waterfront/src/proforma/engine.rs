use super::inputs::{OutOfRangeInput, ParameterSet};
use super::metrics::{MetricsSet, ProfitMargin};
use tracing::debug;

pub const SQUARE_FEET_PER_ACRE: f64 = 43_560.0;
/// Share of gross floor area that can be sold or leased.
pub const USABLE_AREA_EFFICIENCY: f64 = 0.85;
/// Floor area set aside for each parking space.
pub const PARKING_AREA_PER_SPACE: f64 = 350.0;
pub const AREA_PER_HOME: f64 = 1_000.0;
/// Price per sq. ft. an income-restricted home sells for.
pub const AFFORDABLE_PRICE_FLOOR_PSF: f64 = 200.0;

/// Stateless calculator turning policy and market levers into project metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProFormaEngine;

impl ProFormaEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(&self, inputs: &ParameterSet) -> Result<MetricsSet, OutOfRangeInput> {
        compute(inputs)
    }
}

/// Validates `inputs` and derives the full pro forma from them.
pub fn compute(inputs: &ParameterSet) -> Result<MetricsSet, OutOfRangeInput> {
    inputs.validate()?;

    let open_space_acres = inputs.total_acres * inputs.open_space_pct as f64 / 100.0;
    let developable_area = (inputs.total_acres - open_space_acres) * SQUARE_FEET_PER_ACRE;

    // Commercial occupies the ground floor only.
    let commercial_area = developable_area;
    let residential_area = developable_area * inputs.residential_floors as f64;
    let total_area = commercial_area + residential_area;

    let usable_commercial_area = commercial_area * USABLE_AREA_EFFICIENCY;
    let usable_residential_area = residential_area * USABLE_AREA_EFFICIENCY;

    // A ratio of zero means no parking at all.
    let parking_ratio = inputs.parking_ratio as f64;
    let parking_allocation_per_home = if inputs.parking_ratio > 0 {
        PARKING_AREA_PER_SPACE / parking_ratio
    } else {
        0.0
    };
    let home_count = usable_residential_area / (AREA_PER_HOME + parking_allocation_per_home);
    let parking_spot_count = if inputs.parking_ratio > 0 {
        home_count / parking_ratio
    } else {
        0.0
    };

    let hard_cost = total_area * inputs.hard_cost_psf;
    let development_cost = hard_cost * (1.0 + inputs.soft_cost_ratio_pct as f64 / 100.0);

    let commercial_revenue = inputs.commercial_price_psf * usable_commercial_area;
    let residential_revenue = inputs.residential_price_psf * usable_residential_area;
    let potential_revenue = commercial_revenue + residential_revenue;
    let project_value = potential_revenue - development_cost;

    let affordable_share = inputs.affordable_pct as f64 / 100.0;
    let blended_residential_price = inputs.residential_price_psf
        - (inputs.residential_price_psf - AFFORDABLE_PRICE_FLOOR_PSF) * affordable_share;
    let adjusted_revenue = blended_residential_price * usable_residential_area + commercial_revenue;

    let development_fee = hard_cost * inputs.development_fee_pct as f64 / 100.0;
    let landowner_payout = total_area * inputs.land_cost_per_gsf;
    let public_benefit_contribution = hard_cost * inputs.public_benefit_pct as f64 / 100.0;

    let profit = adjusted_revenue
        - development_cost
        - development_fee
        - landowner_payout
        - public_benefit_contribution;
    let profit_margin = ProfitMargin::from_ratio(profit, adjusted_revenue);

    let income_restricted_home_count = affordable_share * home_count;

    debug!(
        home_count,
        income_restricted_home_count,
        profit,
        margin = ?profit_margin,
        "pro forma computed"
    );

    Ok(MetricsSet {
        open_space_acres,
        developable_area,
        commercial_area,
        residential_area,
        total_area,
        usable_commercial_area,
        usable_residential_area,
        parking_allocation_per_home,
        home_count,
        parking_spot_count,
        hard_cost,
        development_cost,
        commercial_revenue,
        residential_revenue,
        potential_revenue,
        project_value,
        income_restricted_home_count,
        blended_residential_price,
        adjusted_revenue,
        development_fee,
        landowner_payout,
        public_benefit_contribution,
        profit,
        profit_margin,
    })
}
