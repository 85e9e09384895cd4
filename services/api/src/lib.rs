mod chat;
mod cli;
mod infra;
mod quiz;
mod routes;
mod server;

use aracnidata::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
