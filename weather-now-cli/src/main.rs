//! Binary crate for the `weather-now` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive lookups and configuration
//! - Human-friendly output formatting

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose);
    cmd.run().await
}

/// Filter used when RUST_LOG is unset. `weather_now` is this binary's target.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "warn,weather_now_core=debug,weather_now=debug" } else { "warn" }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_filter_covers_core_and_cli_targets() {
        let directives = default_filter(true);

        assert!(directives.contains("weather_now_core=debug"));
        assert!(directives.contains("weather_now=debug"));
        assert_eq!(module_path!().split("::").next(), Some("weather_now"));
        assert!(EnvFilter::try_new(directives).is_ok());
    }

    #[test]
    fn quiet_filter_is_warn_only() {
        assert_eq!(default_filter(false), "warn");
        assert!(EnvFilter::try_new(default_filter(false)).is_ok());
    }
}
