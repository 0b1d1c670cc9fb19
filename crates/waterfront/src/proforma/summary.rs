use super::metrics::MetricsSet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricUnit {
    Acres,
    SquareFeet,
    Count,
    Currency,
    Ratio,
}

impl MetricUnit {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Acres => "acres",
            Self::SquareFeet => "sq. ft.",
            Self::Count => "count",
            Self::Currency => "USD",
            Self::Ratio => "ratio",
        }
    }
}

/// A raw figure paired with the label it is displayed under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: MetricUnit,
    /// `None` only when the metric is undefined for the inputs.
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSection {
    pub title: &'static str,
    pub entries: Vec<MetricEntry>,
}

fn entry(key: &'static str, label: &'static str, unit: MetricUnit, value: f64) -> MetricEntry {
    MetricEntry {
        key,
        label,
        unit,
        value: Some(value),
    }
}

impl MetricsSet {
    /// Headline figures grouped the way the explainer walks through them.
    pub fn summary(&self) -> Vec<MetricSection> {
        vec![
            MetricSection {
                title: "Primary constraints",
                entries: vec![
                    entry(
                        "open_space_acres",
                        "New open space",
                        MetricUnit::Acres,
                        self.open_space_acres,
                    ),
                    entry(
                        "commercial_area",
                        "Commercial floor area",
                        MetricUnit::SquareFeet,
                        self.commercial_area,
                    ),
                    entry("home_count", "Homes", MetricUnit::Count, self.home_count),
                    entry(
                        "parking_spot_count",
                        "Parking spots",
                        MetricUnit::Count,
                        self.parking_spot_count,
                    ),
                ],
            },
            MetricSection {
                title: "Project value",
                entries: vec![
                    entry(
                        "development_cost",
                        "Development cost",
                        MetricUnit::Currency,
                        self.development_cost,
                    ),
                    entry(
                        "potential_revenue",
                        "Potential revenue",
                        MetricUnit::Currency,
                        self.potential_revenue,
                    ),
                    entry(
                        "project_value",
                        "Total value",
                        MetricUnit::Currency,
                        self.project_value,
                    ),
                ],
            },
            MetricSection {
                title: "Value split",
                entries: vec![
                    entry(
                        "income_restricted_home_count",
                        "Income-restricted homes",
                        MetricUnit::Count,
                        self.income_restricted_home_count,
                    ),
                    entry(
                        "development_fee",
                        "Development fee",
                        MetricUnit::Currency,
                        self.development_fee,
                    ),
                    entry(
                        "landowner_payout",
                        "Landowner payout",
                        MetricUnit::Currency,
                        self.landowner_payout,
                    ),
                    entry(
                        "public_benefit_contribution",
                        "Addl. public benefits",
                        MetricUnit::Currency,
                        self.public_benefit_contribution,
                    ),
                ],
            },
            MetricSection {
                title: "Investor return",
                entries: vec![
                    entry("profit", "Profit", MetricUnit::Currency, self.profit),
                    MetricEntry {
                        key: "profit_margin",
                        label: "Profit margin",
                        unit: MetricUnit::Ratio,
                        value: self.profit_margin.value(),
                    },
                ],
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use crate::proforma::{compute, ParameterSet};

    #[test]
    fn summary_groups_headline_metrics_in_order() {
        let metrics = compute(&ParameterSet::default()).expect("valid inputs");
        let sections = metrics.summary();

        let titles: Vec<_> = sections.iter().map(|section| section.title).collect();
        assert_eq!(
            titles,
            [
                "Primary constraints",
                "Project value",
                "Value split",
                "Investor return"
            ]
        );

        let homes = sections[0]
            .entries
            .iter()
            .find(|entry| entry.key == "home_count")
            .expect("homes entry present");
        assert_eq!(homes.value, Some(metrics.home_count));
    }

    #[test]
    fn undefined_margin_has_no_value() {
        let metrics = compute(&ParameterSet {
            open_space_pct: 100,
            ..ParameterSet::default()
        })
        .expect("valid inputs");

        let margin = metrics
            .summary()
            .into_iter()
            .flat_map(|section| section.entries)
            .find(|entry| entry.key == "profit_margin")
            .expect("margin entry present");
        assert!(margin.value.is_none());
    }
}
