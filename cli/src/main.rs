//! Affise command line client.
//!
//! Prints API results as JSON on stdout. Connection settings come from
//! flags or from the matching `AFFISE_*` environment variables.
//!
//! ```text
//! AFFISE_BASE_URL=https://api-demo.affise.com AFFISE_API_KEY=... affise offers --page 1
//! ```

use std::time::Duration;

use affise_sdk::services::offer::OfferListOpts;
use affise_sdk::services::statistic::{ConversionListOpts, GroupedStatOpts, StatFilter, StatGrouping};
use affise_sdk::{AffiseClient, ClientConfig};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "affise", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Public API base URL.
    #[arg(long, env = "AFFISE_BASE_URL")]
    base_url: Option<String>,

    /// Admin API base URL.
    #[arg(long, env = "AFFISE_ADMIN_URL")]
    admin_url: Option<String>,

    /// API key sent in the `API-Key` header.
    #[arg(long, env = "AFFISE_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Overall request timeout in seconds.
    #[arg(long, env = "AFFISE_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Account of the API key.
    Me,
    /// Public offer list.
    Offers {
        /// Page to fetch.
        #[arg(long)]
        page: Option<u32>,
    },
    /// Single offer.
    Offer {
        /// Offer ID.
        id: u64,
    },
    /// Country reference list.
    Countries,
    /// Grouped statistics for a date range.
    Stats {
        /// First day, `YYYY-MM-DD`.
        from: NaiveDate,
        /// Last day, `YYYY-MM-DD`.
        to: NaiveDate,
        /// Report grouping, e.g. `date`, `countries` or `devicemodels`.
        #[arg(long, default_value = "date", value_parser = parse_grouping)]
        grouping: StatGrouping,
    },
    /// Conversions in a date range.
    Conversions {
        /// First day, `YYYY-MM-DD`.
        from: NaiveDate,
        /// Last day, `YYYY-MM-DD`.
        to: NaiveDate,
    },
}

impl Cli {
    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.api_key.clone());
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(admin_url) = &self.admin_url {
            config = config.with_admin_url(admin_url.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

fn parse_grouping(name: &str) -> Result<StatGrouping, String> {
    StatGrouping::ALL
        .into_iter()
        .find(|grouping| grouping.as_str() == name)
        .ok_or_else(|| format!("unknown grouping {name:?}"))
}

async fn run(client: &AffiseClient, command: Command) -> anyhow::Result<Value> {
    let value = match command {
        Command::Me => serde_json::to_value(client.affiliate().me().await?.0)?,
        Command::Offers { page } => {
            let opts = OfferListOpts {
                page,
                ..Default::default()
            };
            let (offers, response) = client.offer().list(&opts).await?;
            if let Some(pagination) = response.pagination() {
                tracing::info!(?pagination, "offers page");
            }
            serde_json::to_value(offers)?
        }
        Command::Offer { id } => serde_json::to_value(client.offer().get(id).await?.0)?,
        Command::Countries => serde_json::to_value(client.other().list_countries().await?.0)?,
        Command::Stats { from, to, grouping } => {
            let opts = GroupedStatOpts {
                filter: StatFilter::between_dates(from, to),
                ..Default::default()
            };
            serde_json::to_value(client.statistic().get_by(grouping, &opts).await?.0)?
        }
        Command::Conversions { from, to } => {
            let opts = ConversionListOpts {
                date_from: Some(from.to_string()),
                date_to: Some(to.to_string()),
                ..Default::default()
            };
            serde_json::to_value(client.statistic().conversions(&opts).await?.0)?
        }
    };
    Ok(value)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.config();
    tracing::debug!(?config, "configuration loaded");
    let client = AffiseClient::new(config)?;

    let value = run(&client, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);

    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(["affise", "--api-key", "test-key"].into_iter().chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_grouping() {
        assert_eq!(parse_grouping("devicemodels").ok(), Some(StatGrouping::DeviceModels));
        assert!(parse_grouping("weekly").is_err());
    }

    #[test]
    fn test_stats_dates_and_grouping() {
        let cli = parse(&["stats", "2024-01-01", "2024-01-31", "--grouping", "countries"]).expect("stats");
        assert_eq!(
            cli.command,
            Command::Stats {
                from: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
                to: NaiveDate::from_ymd_opt(2024, 1, 31).expect("date"),
                grouping: StatGrouping::Countries,
            }
        );

        let cli = parse(&["stats", "2024-01-01", "2024-01-31"]).expect("default grouping");
        assert!(matches!(cli.command, Command::Stats { grouping: StatGrouping::Date, .. }));
    }

    #[test]
    fn test_stats_requires_two_dates() {
        let err = parse(&["stats", "2024-01-01"]).expect_err("missing date");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_invalid_date_and_grouping() {
        let err = parse(&["conversions", "2024-13-01", "2024-01-31"]).expect_err("bad date");
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let err = parse(&["stats", "2024-01-01", "2024-01-31", "--grouping", "weekly"]).expect_err("bad grouping");
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_help_and_unknown_command() {
        let err = parse(&["--help"]).expect_err("help");
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = parse(&["refund"]).expect_err("unknown");
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_config_from_flags() {
        let cli = Cli::try_parse_from([
            "affise",
            "--api-key",
            "k",
            "--base-url",
            "https://api.example.com",
            "--timeout-secs",
            "5",
            "offer",
            "1066",
        ])
        .expect("offer");
        assert_eq!(cli.command, Command::Offer { id: 1066 });

        let config = cli.config();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
