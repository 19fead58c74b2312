use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use pkghandler::cmd::{Runner, System};
use pkghandler::config::Settings;
use pkghandler::menu;
use pkghandler::prompt::Terminal;
use pkghandler::{Catalog, Distribution};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load()?;
    let catalog = Catalog::load(&settings)?;

    let runner: Arc<dyn Runner> = Arc::new(System);
    let mut distribution = Distribution::detect(&settings, runner).await?;

    tokio::task::spawn_blocking(move || menu::run(&mut distribution, &catalog, &mut Terminal))
        .await?
}
