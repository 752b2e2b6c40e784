//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "hotelprice")]
#[command(author, version, about = "Local store for scraped hotel prices", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path of the SQLite store
    #[arg(long, global = true, value_name = "PATH", default_value = hotelprice_store::DEFAULT_DB_PATH)]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the hotel_prices table if it does not exist
    Init,

    /// Print tables, row counts, recent records and the cheapest prices per city
    Inspect,

    /// Show price statistics per city
    Stats {
        /// Only show this city
        #[arg(short, long)]
        city: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_db_defaults_to_local_file() {
        let cli = Cli::try_parse_from(["hotelprice", "inspect"]).unwrap();
        assert_eq!(cli.db, PathBuf::from("hotel_pricing.db"));
        assert!(matches!(cli.command, Commands::Inspect));
    }

    #[test]
    fn test_db_is_global() {
        let cli = Cli::try_parse_from(["hotelprice", "init", "--db", "/tmp/x.db"]).unwrap();
        assert_eq!(cli.db, PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn test_stats_arguments() {
        let cli =
            Cli::try_parse_from(["hotelprice", "stats", "--city", "Paris", "-f", "json"]).unwrap();
        match cli.command {
            Commands::Stats { city, format } => {
                assert_eq!(city.as_deref(), Some("Paris"));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected stats command"),
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["hotelprice", "-v", "-q", "inspect"]).is_err());
    }
}
