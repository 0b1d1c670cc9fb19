use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A derived figure that has no value for the given inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{metric} is undefined: {reason}")]
pub struct UndefinedMetric {
    pub metric: &'static str,
    pub reason: &'static str,
}

/// Profit as a share of adjusted revenue.
///
/// Zero adjusted revenue leaves the margin `Undefined` instead of producing a
/// NaN or infinity that would leak into displays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ProfitMargin {
    Defined(f64),
    Undefined,
}

impl ProfitMargin {
    pub fn from_ratio(profit: f64, adjusted_revenue: f64) -> Self {
        if adjusted_revenue == 0.0 {
            Self::Undefined
        } else {
            Self::Defined(profit / adjusted_revenue)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Self::Defined(value) => Some(value),
            Self::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }

    pub fn require(self) -> Result<f64, UndefinedMetric> {
        self.value().ok_or(UndefinedMetric {
            metric: "profit_margin",
            reason: "adjusted revenue is zero",
        })
    }
}

/// Every figure derived from one `ParameterSet`.
///
/// Areas are in square feet unless named otherwise; money is in dollars. Counts
/// are left fractional so the presentation layer decides how to round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSet {
    pub open_space_acres: f64,
    pub developable_area: f64,
    pub commercial_area: f64,
    pub residential_area: f64,
    pub total_area: f64,
    pub usable_commercial_area: f64,
    pub usable_residential_area: f64,
    pub parking_allocation_per_home: f64,
    pub home_count: f64,
    pub parking_spot_count: f64,
    pub hard_cost: f64,
    pub development_cost: f64,
    pub commercial_revenue: f64,
    pub residential_revenue: f64,
    pub potential_revenue: f64,
    /// Potential revenue less development cost, before affordability and payouts.
    pub project_value: f64,
    pub income_restricted_home_count: f64,
    pub blended_residential_price: f64,
    pub adjusted_revenue: f64,
    pub development_fee: f64,
    pub landowner_payout: f64,
    pub public_benefit_contribution: f64,
    pub profit: f64,
    pub profit_margin: ProfitMargin,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_revenue_margin_is_undefined() {
        let margin = ProfitMargin::from_ratio(-5.0, 0.0);
        assert_eq!(margin, ProfitMargin::Undefined);
        assert!(margin.value().is_none());

        let err = margin.require().expect_err("undefined margin");
        assert_eq!(err.metric, "profit_margin");
        assert_eq!(
            err.to_string(),
            "profit_margin is undefined: adjusted revenue is zero"
        );
    }

    #[test]
    fn margin_serializes_with_explicit_status() {
        let defined = serde_json::to_value(ProfitMargin::Defined(0.25)).expect("serializes");
        assert_eq!(defined, json!({ "status": "defined", "value": 0.25 }));

        let undefined = serde_json::to_value(ProfitMargin::Undefined).expect("serializes");
        assert_eq!(undefined, json!({ "status": "undefined" }));
    }
}
