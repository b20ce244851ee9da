use anyhow::Context;
use aqi_forecast::cli::{run, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).await.context("aqi-forecast failed")
}
