use crate::commands::{
    run_batch, run_demo, run_neighborhood, run_proforma, BatchArgs, NeighborhoodArgs,
    ProFormaArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use waterfront::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Waterfront for All",
    about = "Explore what redeveloping the East Boston Designated Port Area could deliver",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute the pro forma for one set of redevelopment parameters
    Proforma(ProFormaArgs),
    /// Compute the pro forma for every scenario row in a CSV sheet
    Batch(BatchArgs),
    /// Show household affordability statistics and site facts
    Neighborhood(NeighborhoodArgs),
    /// Walk through the neighborhood panel and the default pro forma
    Demo(NeighborhoodArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Household table to serve instead of the embedded East Boston figures
    #[arg(long)]
    pub(crate) households_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Proforma(args) => run_proforma(args),
        Command::Batch(args) => run_batch(args),
        Command::Neighborhood(args) => run_neighborhood(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["waterfront-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn proforma_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "waterfront-api",
            "proforma",
            "--open-space-pct",
            "30",
            "--parking-ratio",
            "0",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Proforma(args)) => {
                let params = args.parameters();
                assert_eq!(params.open_space_pct, 30);
                assert_eq!(params.parking_ratio, 0);
                assert_eq!(params.residential_floors, 5);
                assert!(args.json);
            }
            other => panic!("expected proforma command, got {other:?}"),
        }
    }

    #[test]
    fn clamp_flag_pulls_values_into_bounds() {
        let cli = Cli::try_parse_from([
            "waterfront-api",
            "proforma",
            "--public-benefit-pct",
            "90",
            "--clamp",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Proforma(args)) => {
                assert!(args.clamp);
                let params = args.parameters();
                assert_eq!(params.public_benefit_pct, 20);
                assert_eq!(params.open_space_pct, 50);
                assert!(params.validate().is_ok());
            }
            other => panic!("expected proforma command, got {other:?}"),
        }
    }

    #[test]
    fn batch_requires_a_sheet() {
        assert!(Cli::try_parse_from(["waterfront-api", "batch"]).is_err());
    }
}
