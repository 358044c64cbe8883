mod cli;
mod config;
mod download;
mod errors;
mod json;
mod product;
mod reading;
mod series;
mod swpc;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};
use log::{debug, error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.shared.to_config();
    debug!("{:?}", config);

    match &cli.command {
        Commands::Date {
            dates,
            days,
            satellites,
            products,
            columns,
            merge,
        } => match command::by_date(
            &config,
            dates,
            *days,
            satellites,
            products,
            columns.clone(),
            *merge,
        )
        .await
        {
            Ok(files) => {
                for file in &files {
                    println!("File saved to `{}`", file.display());
                }
                if files.is_empty() {
                    error!("No files saved");
                }
            }
            Err(e) => eprintln!("Error: {:#}", e),
        },
        Commands::Recent {} => match command::recent(&config).await {
            Ok(files) => {
                for file in &files {
                    println!("File saved to `{}`", file.display());
                }
            }
            Err(e) => eprintln!("Error: {:#}", e),
        },
        Commands::Xrays { interval } => match command::xrays(&config, *interval).await {
            Ok(file) => println!("File saved to `{}`", file.display()),
            Err(e) => eprintln!("Error: {:#}", e),
        },
    }

    Ok(())
}
