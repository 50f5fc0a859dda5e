use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Text};
use tracing::{debug, info};
use weather_now_core::{Config, QueryState, WeatherQuery};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-now", version, about = "Current weather for any place name")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Edit endpoint, language and timeout settings.
    Configure,

    /// Show current weather for a place.
    Show {
        /// Place name, e.g. "Berlin".
        place: String,

        /// Print the result as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for place names until cancelled.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { place, json } => show(&place, json).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn load_config() -> anyhow::Result<Config> {
    let path = Config::config_file_path()?;
    let cfg = Config::load()?;
    debug!(
        path = %path.display(),
        exists = path.exists(),
        geocoding = %cfg.geocoding.base_url,
        forecast = %cfg.forecast.base_url,
        "loaded configuration"
    );
    Ok(cfg)
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = load_config()?;

    cfg.geocoding.base_url = Text::new("Geocoding API base URL:")
        .with_initial_value(&cfg.geocoding.base_url)
        .prompt()?;
    cfg.geocoding.language = Text::new("Place name language:")
        .with_initial_value(&cfg.geocoding.language)
        .prompt()?;
    cfg.forecast.base_url = Text::new("Forecast API base URL:")
        .with_initial_value(&cfg.forecast.base_url)
        .prompt()?;
    cfg.timeout_secs = CustomType::<u64>::new("Request timeout in seconds (Esc for none):")
        .with_error_message("Please enter a whole number of seconds")
        .prompt_skippable()?;

    cfg.save()?;
    let path = Config::config_file_path()?;
    info!(path = %path.display(), "saved configuration");
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(place: &str, json: bool) -> anyhow::Result<()> {
    let query = WeatherQuery::from_config(&load_config()?)?;

    let state = query.run(place).await?;

    if json {
        let out = serde_json::to_string_pretty(&state).context("Failed to serialize result")?;
        println!("{out}");
    }

    match state {
        // anyhow's report prints the reason on stderr and exits non-zero.
        QueryState::Failed(reason) => bail!(reason),
        state if !json => println!("{}", render::render(&state)),
        _ => {}
    }

    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let query = WeatherQuery::from_config(&load_config()?)?;
    println!("{}", render::title());

    loop {
        let input = match Text::new("City:").with_placeholder("Enter city name...").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        let submission = match query.submit(&input) {
            Ok(submission) => submission,
            Err(err) => {
                debug!(error = %err, "input rejected");
                // Previous result stays on screen.
                println!("{err}");
                continue;
            }
        };

        println!("{}", render::render(&query.state()));
        submission.wait().await;
        println!("{}", render::render(&query.state()));
    }

    Ok(())
}
