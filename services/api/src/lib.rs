mod cli;
mod commands;
mod display;
mod infra;
mod routes;
mod server;

use waterfront::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
