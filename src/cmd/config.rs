use std::env;

use clap::{Args, Subcommand};

use crate::config::{AppConfig, ENV_VARS};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the configuration read from the environment (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(),
    }
}

fn run_show() -> AppResult<()> {
    for var in &ENV_VARS {
        let value = env::var(var.name).ok();
        let shown = if var.secret {
            mask_secret(value.as_deref())
        } else {
            display_value(value.as_deref(), var.default)
        };
        println!("{}: {shown}", var.name);
    }

    match AppConfig::from_env() {
        Ok(_) => println!("\nConfiguration is complete."),
        Err(err) => println!("\nConfiguration is incomplete: {err}"),
    }
    Ok(())
}

fn display_value(value: Option<&str>, default: Option<&str>) -> String {
    match (value.filter(|v| !v.trim().is_empty()), default) {
        (Some(value), _) => value.to_string(),
        (None, Some(default)) => format!("{default} (default)"),
        (None, None) => "<not set>".to_string(),
    }
}

fn mask_secret(value: Option<&str>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let prefix: String = token.chars().take(3).collect();
            let suffix: String = token
                .chars()
                .rev()
                .take(3)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
