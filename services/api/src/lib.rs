mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use decision_trainer::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
