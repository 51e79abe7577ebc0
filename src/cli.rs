use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use herdops::config::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "herdops", version, about = "Goat herd management checks and alerts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Herd snapshot file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Evaluate as of this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true)]
    pub as_of: Option<NaiveDate>,

    /// Output format, overrides the config file
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List herd alerts
    Alerts {
        /// Only high-priority alerts
        #[arg(long)]
        urgent: bool,
    },
    /// Herd counts and alert totals
    Summary,
    /// Check whether a proposed mating is allowed
    Mate {
        #[arg(long)]
        female: i64,
        #[arg(long)]
        male: i64,
        /// Proposed service date, defaults to the evaluation date
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Age, maturity and withdrawal status of one animal
    Animal {
        #[arg(long)]
        id: i64,
    },
    /// Validate the herd snapshot
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mate_command() {
        let cli = Cli::try_parse_from([
            "herdops", "--as-of", "2024-06-01", "mate", "--female", "3", "--male", "7",
        ])
        .unwrap();
        assert_eq!(cli.as_of, NaiveDate::from_ymd_opt(2024, 6, 1));
        match cli.command {
            Commands::Mate { female, male, date } => {
                assert_eq!((female, male), (3, 7));
                assert!(date.is_none());
            }
            _ => panic!("expected mate command"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["herdops", "alerts", "--urgent", "-f", "json", "-vv"]).unwrap();
        assert!(matches!(cli.command, Commands::Alerts { urgent: true }));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn rejects_bad_date() {
        assert!(Cli::try_parse_from(["herdops", "--as-of", "2024-13-01", "summary"]).is_err());
    }
}
