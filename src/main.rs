use clap::Parser;

use purgify::cli;
use purgify::cli::Args;
use purgify::config::load_storage_config;
use purgify::error::Result;
use purgify::store::OpenDalStore;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run_app(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_app(args: Args) -> Result<()> {
    let config = load_storage_config()?;
    let store = OpenDalStore::new(config).await?;
    cli::run(args, store).await?;
    Ok(())
}
