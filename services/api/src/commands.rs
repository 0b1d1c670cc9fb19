use crate::display::{render_batch, render_neighborhood, render_proforma};
use crate::infra::load_neighborhood;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use waterfront::config::AppConfig;
use waterfront::error::AppError;
use waterfront::neighborhood::DesignatedPortArea;
use waterfront::proforma::router::{BatchResponse, ScenarioResultView};
use waterfront::proforma::{
    compute, evaluate_scenarios, ParameterSet, ProFormaResponse, ScenarioImporter,
};

#[derive(Args, Debug)]
pub(crate) struct ProFormaArgs {
    /// Share of the site set aside as open space (%)
    #[arg(long, default_value_t = ParameterSet::default().open_space_pct)]
    pub(crate) open_space_pct: i64,
    /// Floors of housing above the ground-floor commercial space
    #[arg(long, default_value_t = ParameterSet::default().residential_floors)]
    pub(crate) residential_floors: i64,
    /// Homes per parking spot (0 = no parking)
    #[arg(long, default_value_t = ParameterSet::default().parking_ratio)]
    pub(crate) parking_ratio: i64,
    /// Construction cost per sq. ft. ($)
    #[arg(long, default_value_t = ParameterSet::default().hard_cost_psf)]
    pub(crate) hard_cost_psf: f64,
    /// Soft costs as a percentage of construction cost
    #[arg(long, default_value_t = ParameterSet::default().soft_cost_ratio_pct)]
    pub(crate) soft_cost_ratio_pct: i64,
    /// Market-rate home price per sq. ft. ($)
    #[arg(long, default_value_t = ParameterSet::default().residential_price_psf)]
    pub(crate) residential_price_psf: f64,
    /// Market-rate commercial price per sq. ft. ($)
    #[arg(long, default_value_t = ParameterSet::default().commercial_price_psf)]
    pub(crate) commercial_price_psf: f64,
    /// Share of homes that are income-restricted (%)
    #[arg(long, default_value_t = ParameterSet::default().affordable_pct)]
    pub(crate) affordable_pct: i64,
    /// Developer fee as a percentage of construction cost
    #[arg(long, default_value_t = ParameterSet::default().development_fee_pct)]
    pub(crate) development_fee_pct: i64,
    /// Landowner payout per developed sq. ft. ($)
    #[arg(long, default_value_t = ParameterSet::default().land_cost_per_gsf)]
    pub(crate) land_cost_per_gsf: f64,
    /// Additional public benefits as a percentage of construction cost
    #[arg(long, default_value_t = ParameterSet::default().public_benefit_pct)]
    pub(crate) public_benefit_pct: i64,
    /// Clamp out-of-range values into their bounds instead of failing
    #[arg(long)]
    pub(crate) clamp: bool,
    /// Print the JSON response body instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

impl ProFormaArgs {
    pub(crate) fn parameters(&self) -> ParameterSet {
        let params = ParameterSet {
            open_space_pct: self.open_space_pct,
            residential_floors: self.residential_floors,
            parking_ratio: self.parking_ratio,
            hard_cost_psf: self.hard_cost_psf,
            soft_cost_ratio_pct: self.soft_cost_ratio_pct,
            residential_price_psf: self.residential_price_psf,
            commercial_price_psf: self.commercial_price_psf,
            affordable_pct: self.affordable_pct,
            development_fee_pct: self.development_fee_pct,
            land_cost_per_gsf: self.land_cost_per_gsf,
            public_benefit_pct: self.public_benefit_pct,
            ..ParameterSet::default()
        };

        if self.clamp {
            params.clamped()
        } else {
            params
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV sheet with a `name` column and any parameter columns to vary
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the JSON response body instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct NeighborhoodArgs {
    /// Household table to use instead of the embedded East Boston figures
    #[arg(long)]
    pub(crate) households_csv: Option<PathBuf>,
}

pub(crate) fn run_proforma(args: ProFormaArgs) -> Result<(), AppError> {
    let params = args.parameters();
    let metrics = compute(&params)?;

    if args.json {
        let body = ProFormaResponse::new(params, metrics);
        let rendered = serde_json::to_string_pretty(&body).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", render_proforma(&params, &metrics));
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let scenarios = ScenarioImporter::from_path(&args.csv)?;
    let outcomes = evaluate_scenarios(&scenarios);

    if args.json {
        let body = BatchResponse {
            generated_at: Utc::now(),
            results: outcomes.into_iter().map(ScenarioResultView::from).collect(),
        };
        let rendered = serde_json::to_string_pretty(&body).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", render_batch(&outcomes));
    }

    Ok(())
}

pub(crate) fn run_neighborhood(args: NeighborhoodArgs) -> Result<(), AppError> {
    let households_csv = households_override(args)?;
    let profile = load_neighborhood(households_csv.as_deref())?;
    print!(
        "{}",
        render_neighborhood(&profile, &DesignatedPortArea::east_boston())
    );
    Ok(())
}

pub(crate) fn run_demo(args: NeighborhoodArgs) -> Result<(), AppError> {
    let households_csv = households_override(args)?;
    let profile = load_neighborhood(households_csv.as_deref())?;

    println!("Waterfront for All demo\n");
    print!(
        "{}",
        render_neighborhood(&profile, &DesignatedPortArea::east_boston())
    );

    let params = ParameterSet::default();
    let metrics = compute(&params)?;
    println!("\nStarting point: the default redevelopment parameters\n");
    print!("{}", render_proforma(&params, &metrics));

    let car_free = ParameterSet {
        parking_ratio: 0,
        ..params
    };
    let car_free_metrics = compute(&car_free)?;
    println!("\nSame plan without parking\n");
    print!("{}", render_proforma(&car_free, &car_free_metrics));

    Ok(())
}

fn households_override(args: NeighborhoodArgs) -> Result<Option<PathBuf>, AppError> {
    match args.households_csv {
        Some(path) => Ok(Some(path)),
        None => Ok(AppConfig::load()?.reference.households_csv),
    }
}
