use clap::Parser;

use catalog_rs::cli::{self, Cli};
use catalog_rs::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli::load_and_merge_config(&cli)?;
    let _log_handle = cli::init_logger_from_settings(&settings)?;

    cli::execute_command(&cli, settings.clone()).await?;

    if cli.is_serve() {
        Server::new(settings).run().await?;
    }

    Ok(())
}
