use std::path::Path;

use anyhow::Result;
use clap::Parser;

use gator::cli::{App, Cli};
use gator::config::Config;
use gator::data::Database;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::read()?;
    let database = Database::open(Path::new(&config.db_url))?;

    let app = App::new(config, &database);
    app.run(cli.command).await
}
