//gymtext-cli/src/cli.rs
use chrono::{Duration, NaiveDate, Utc};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use gymtext_lib::ExerciseKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Parse workout plans and training logs written as plain text", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Print CSV instead of a table
    #[arg(long, global = true, conflicts_with = "json")]
    pub export_csv: bool,
    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,
    /// Log parser decisions (dropped days, skipped weeks) to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdStrategyCli {
    Sequential,
    Uuid,
}

// Custom parser for date strings and shorthands
pub fn parse_date_shorthand(s: &str) -> Result<NaiveDate, String> {
    match s.to_lowercase().as_str() {
        "today" => Ok(Utc::now().date_naive()),
        "yesterday" => Ok((Utc::now() - Duration::days(1)).date_naive()),
        _ => {
            // Try parsing YYYY-MM-DD first
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(date)
            }
            // Try parsing DD.MM.YYYY next
            else if let Ok(date) = NaiveDate::parse_from_str(s, "%d.%m.%Y") {
                Ok(date)
            }
            // Try parsing YYYY/MM/DD
            else if let Ok(date) = NaiveDate::parse_from_str(s, "%Y/%m/%d") {
                Ok(date)
            } else {
                Err(format!(
                    "Invalid date format: '{s}'. Use 'today', 'yesterday', YYYY-MM-DD, DD.MM.YYYY, or YYYY/MM/DD."
                ))
            }
        }
    }
}

pub fn parse_exercise_kind(s: &str) -> Result<ExerciseKind, String> {
    ExerciseKind::try_from(s).map_err(|e| e.to_string())
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a weekly plan ("День 1", "1. Exercise", "3 підходи по 8-12")
    Plan {
        /// Plan text file, or '-' for stdin
        input: PathBuf,
        /// Only show exercises of this kind (normal, superset, dropset)
        #[arg(long, value_parser = parse_exercise_kind)]
        kind: Option<ExerciseKind>,
    },
    /// Parse a training log with "Тиждень: DD.MM.YYYY - DD.MM.YYYY" headers
    History {
        /// History text file, or '-' for stdin
        input: PathBuf,
        /// Print every workout in the import text format instead of a table
        #[arg(long)]
        pretty: bool,
    },
    /// Print a sample history text in the import format
    Example,
    /// Summarize a training log the way the weight-suggestion prompt sees it
    Summary {
        /// History text file, or '-' for stdin
        input: PathBuf,
        /// Reference date for the lookback window (default: today)
        #[arg(long, value_parser = parse_date_shorthand)]
        today: Option<NaiveDate>,
    },
    /// Print the plan and history digests that make up a suggestion prompt
    Prompt {
        /// Plan text file
        #[arg(long)]
        plan: PathBuf,
        /// History text file
        #[arg(long)]
        history: PathBuf,
        /// First day of the planned week
        #[arg(long, value_parser = parse_date_shorthand)]
        week_start: NaiveDate,
        /// Last day of the planned week (default: week start + 6 days)
        #[arg(long, value_parser = parse_date_shorthand)]
        week_end: Option<NaiveDate>,
        /// Reference date for the lookback window (default: today)
        #[arg(long, value_parser = parse_date_shorthand)]
        today: Option<NaiveDate>,
    },
    /// Show the path to the config file
    ConfigPath,
    /// Set the table header color (e.g. Green, DarkCyan)
    SetHeaderColor { color: String },
    /// Choose how exercise ids are generated
    SetIdStrategy {
        #[arg(value_enum)]
        strategy: IdStrategyCli,
    },
    /// Set the date format used in output (chrono strftime syntax)
    SetDateFormat { format: String },
    /// Generate shell completion scripts
    GenerateCompletion {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// Function to parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
