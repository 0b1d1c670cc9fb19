use waterfront::neighborhood::{DesignatedPortArea, NeighborhoodProfile};
use waterfront::proforma::{
    MetricEntry, MetricUnit, MetricsSet, ParameterField, ParameterSet, ScenarioOutcome,
};

const SCALES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

fn trim_decimals(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Short human figure such as `1.96B` or `2.95K`.
pub(crate) fn abbreviate(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let magnitude = value.abs();
    let (scaled, suffix) = SCALES
        .iter()
        .find(|(scale, _)| magnitude >= *scale)
        .map(|(scale, suffix)| (magnitude / scale, *suffix))
        .unwrap_or((magnitude, ""));

    let body = trim_decimals(scaled, decimals);
    if value < 0.0 && body != "0" {
        format!("-{body}{suffix}")
    } else {
        format!("{body}{suffix}")
    }
}

pub(crate) fn money(value: f64, decimals: usize) -> String {
    let figure = abbreviate(value, decimals);
    match figure.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${figure}"),
    }
}

pub(crate) fn percent(ratio: f64) -> String {
    format!("{}%", trim_decimals(ratio * 100.0, 1))
}

pub(crate) fn format_entry(entry: &MetricEntry) -> String {
    let Some(value) = entry.value else {
        return "n/a".to_string();
    };

    match entry.unit {
        MetricUnit::Acres => format!("{} acres", trim_decimals(value, 2)),
        MetricUnit::SquareFeet => format!("{} sq. ft.", abbreviate(value, 1)),
        MetricUnit::Count => abbreviate(value.round(), 2),
        MetricUnit::Currency => money(value, 2),
        MetricUnit::Ratio => percent(value),
    }
}

fn format_parameter(params: &ParameterSet, field: ParameterField) -> String {
    let value = params.get(field);
    match field {
        ParameterField::HardCostPsf
        | ParameterField::ResidentialPricePsf
        | ParameterField::CommercialPricePsf
        | ParameterField::LandCostPerGsf => format!("${}", trim_decimals(value, 2)),
        ParameterField::OpenSpacePct
        | ParameterField::SoftCostRatioPct
        | ParameterField::AffordablePct
        | ParameterField::DevelopmentFeePct
        | ParameterField::PublicBenefitPct => format!("{}%", trim_decimals(value, 2)),
        ParameterField::TotalAcres
        | ParameterField::ResidentialFloors
        | ParameterField::ParkingRatio => trim_decimals(value, 2),
    }
}

pub(crate) fn render_proforma(params: &ParameterSet, metrics: &MetricsSet) -> String {
    let mut lines = vec!["Redevelopment parameters".to_string()];
    for field in ParameterField::ordered() {
        lines.push(format!(
            "- {}: {}",
            field.label(),
            format_parameter(params, field)
        ));
    }

    for section in metrics.summary() {
        lines.push(String::new());
        lines.push(section.title.to_string());
        for entry in &section.entries {
            lines.push(format!("- {}: {}", entry.label, format_entry(entry)));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

pub(crate) fn render_neighborhood(
    profile: &NeighborhoodProfile,
    site: &DesignatedPortArea,
) -> String {
    let mut lines = vec![
        format!("{} by the numbers", profile.name),
        format!("- Households: {}", abbreviate(f64::from(profile.total_households), 2)),
        format!(
            "- Cost-burdened households: {}",
            abbreviate(f64::from(profile.cost_burdened_households()), 2)
        ),
        format!(
            "- Income-restricted homes: {}",
            abbreviate(f64::from(profile.income_restricted_homes), 2)
        ),
        format!(
            "- Income-restricted home gap: {}",
            abbreviate(f64::from(profile.income_restricted_home_gap()), 2)
        ),
        String::new(),
        "Households by income".to_string(),
    ];

    for band in &profile.bands {
        lines.push(format!(
            "- {}: {} households, {} cost-burdened ({}%)",
            band.label,
            band.households,
            band.cost_burdened_households,
            trim_decimals(band.cost_burdened_pct(), 1)
        ));
    }

    lines.push(
        "Sources: U.S. Census Bureau - American Community Survey 2020; City of Boston Open Data Portal"
            .to_string(),
    );
    lines.push(String::new());
    lines.push(site.name.to_string());
    lines.push(format!("- Available acres: {}", trim_decimals(site.acres, 2)));
    lines.push(format!("- Current homes: {}", site.current_homes));
    lines.push(format!("- Currently allowed homes: {}", site.allowed_homes));
    lines.push(format!("- Map: {}", site.map_embed_url));
    lines.push(String::new());
    lines.join("\n")
}

pub(crate) fn render_batch(outcomes: &[ScenarioOutcome]) -> String {
    let mut lines = vec![format!("{} scenario(s)", outcomes.len())];

    for outcome in outcomes {
        let line = match &outcome.result {
            Ok(metrics) => format!(
                "- {}: {} homes ({} income-restricted), profit {}, margin {}",
                outcome.scenario.name,
                abbreviate(metrics.home_count.round(), 2),
                abbreviate(metrics.income_restricted_home_count.round(), 2),
                money(metrics.profit, 1),
                metrics
                    .profit_margin
                    .value()
                    .map(percent)
                    .unwrap_or_else(|| "n/a".to_string()),
            ),
            Err(error) => format!("- {}: rejected ({error})", outcome.scenario.name),
        };
        lines.push(line);
    }

    lines.push(String::new());
    lines.join("\n")
}
