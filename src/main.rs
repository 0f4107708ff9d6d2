use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use task_manager::config::Config;
use task_manager::{logger, web};

/// Task manager web application
#[derive(Parser, Debug)]
#[command(name = "task-manager")]
#[command(version)]
#[command(about = "A task manager web application", long_about = None)]
struct Args {
    /// Write the default configuration to PATH (or the XDG config path) and exit
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    generate_config: Option<Option<PathBuf>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.generate_config {
        Some(Some(path)) => return Config::generate_default_config(path),
        Some(None) => return Config::generate_default_config(Config::get_default_config_path()?),
        None => {}
    }

    let config = Config::load()?;
    logger::init(&config.logging)?;
    log::info!("Starting task manager");

    web::serve(config).await
}
