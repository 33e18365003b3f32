mod commands;
mod config;
mod main_lib;
mod opt;

use clap::Parser;
use config::Config;
use main_lib::init_tracing;
use opt::Cli;

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    init_tracing(&config.log_format);
    let cli = Cli::parse();

    if let Err(e) = commands::exec(cli, &config).await {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
