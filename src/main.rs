use clap::Parser;

use rangeportal::bootstrap::run_app;
use rangeportal::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    run_app(cli).await
}
