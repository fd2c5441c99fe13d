mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod server;
mod services;
#[cfg(test)]
mod testing;
mod workflow;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::serve::{self, ServeArgs};
use crate::cmd::submit::{self, SubmitArgs};
use crate::config::load_env_file;
use crate::error::AppResult;

#[derive(Parser)]
#[command(
    name = "ticketsmith",
    author,
    version,
    about = "Turn free-text task lists into Jira tickets"
)]
struct Cli {
    /// Dotenv file to load before reading the environment (defaults to `.env` if present).
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Send raw text to a running server and print the created tickets.
    Submit(SubmitArgs),
    /// Inspect the environment configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    load_env_file(cli.env_file.as_deref())?;

    match cli.command {
        Commands::Serve(args) => {
            init_tracing();
            serve::run(args).await
        }
        Commands::Submit(args) => {
            let created = submit::run(args).await?;
            println!("Created {} ticket(s):", created.len());
            for ticket in &created {
                println!("  {}", submit::format_ticket(ticket));
            }
            Ok(())
        }
        Commands::Config(args) => config_cmd::run(args.command),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
