mod cli;
mod demo;
mod infra;
mod render;
mod routes;
mod server;

use poultry_dx::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
