use anyhow::Result;
use flasq::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
