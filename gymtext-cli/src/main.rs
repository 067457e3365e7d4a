//gymtext-cli/src/main.rs
mod cli; // Keep cli module for parsing args

use anyhow::{bail, Context, Result};
use chrono::{Days, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::fs;
use std::io::{self, stdout, Read};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use gymtext_lib::{
    format_set, import_example, AppService, DayWorkout, ExerciseKind, IdStrategy,
    ParsedHistoryWorkout,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputMode {
    Table,
    Csv,
    Json,
}

fn main() -> Result<()> {
    let cli_args = cli::parse_args(); // Parse arguments once
    init_logging(cli_args.verbose);

    let output = if cli_args.json {
        OutputMode::Json
    } else if cli_args.export_csv {
        OutputMode::Csv
    } else {
        OutputMode::Table
    };

    if let cli::Commands::GenerateCompletion { shell } = cli_args.command {
        let mut cmd = cli::build_cli_command();
        let bin_name = cmd.get_name().to_string();

        eprintln!("Generating completion script for {shell}...");
        clap_complete::generate(shell, &mut cmd, bin_name, &mut stdout());
        return Ok(());
    }

    // Initialize the application service (loads config)
    let mut service =
        AppService::initialize().context("Failed to initialize application service")?;
    tracing::debug!(path = %service.config_path.display(), "Loaded configuration");
    let header_color = service.config.theme.header_color();

    match cli_args.command {
        cli::Commands::GenerateCompletion { .. } => {
            unreachable!("Completion generation should have exited already");
        }
        cli::Commands::Plan { input, kind } => {
            let text = read_input(&input)?;
            let mut days = service.parse_plan(&text);
            if days.is_empty() {
                bail!("No training days recognized. Make sure the text contains \"День 1\", \"День 2\", ... followed by numbered exercises.");
            }
            if let Some(kind) = kind {
                days = filter_plan_by_kind(days, kind);
                if days.is_empty() {
                    println!("No {kind} exercises in the plan.");
                    return Ok(());
                }
            }
            match output {
                OutputMode::Json => println!("{}", serde_json::to_string_pretty(&days)?),
                OutputMode::Csv => print_plan_csv(&days)?,
                OutputMode::Table => print_plan_table(&days, header_color),
            }
        }
        cli::Commands::History { input, pretty } => {
            let text = read_input(&input)?;
            let workouts = parse_history_or_bail(&service, &text)?;
            if pretty {
                for workout in &workouts {
                    print!("{}", service.format_history_workout(workout));
                }
            } else {
                match output {
                    OutputMode::Json => println!("{}", serde_json::to_string_pretty(&workouts)?),
                    OutputMode::Csv => print_history_csv(&workouts)?,
                    OutputMode::Table => {
                        print_history_table(&workouts, &service.config.date_format, header_color);
                    }
                }
            }
        }
        cli::Commands::Example => println!("{}", import_example()),
        cli::Commands::Summary { input, today } => {
            let text = read_input(&input)?;
            // An import with no usable workouts still gets the digest's own
            // "no history" text.
            let workouts = match service.parse_history(&text) {
                Ok(workouts) => workouts,
                Err(e) => bail!("Invalid history format: {}", e),
            };
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            println!("{}", service.history_summary(&workouts, today));
        }
        cli::Commands::Prompt {
            plan,
            history,
            week_start,
            week_end,
            today,
        } => {
            let week_end = match week_end {
                Some(end) if end < week_start => {
                    bail!("Week end {end} is before week start {week_start}.")
                }
                Some(end) => end,
                None => week_start
                    .checked_add_days(Days::new(6))
                    .context("Week start is too close to the end of the calendar")?,
            };
            let plan_text = read_input(&plan)?;
            let weekly_plan = service.parse_weekly_plan(week_start, week_end, &plan_text);
            if weekly_plan.days.is_empty() {
                bail!("No training days recognized in {}.", plan.display());
            }
            let history_text = read_input(&history)?;
            let workouts = match service.parse_history(&history_text) {
                Ok(workouts) => workouts,
                Err(e) => bail!("Invalid history format in {}: {}", history.display(), e),
            };
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            println!("{}", service.plan_summary(&weekly_plan));
            println!("{}", service.history_summary(&workouts, today));
        }
        cli::Commands::ConfigPath => {
            println!("{}", service.get_config_path().display());
        }
        cli::Commands::SetHeaderColor { color } => match service.set_header_color(&color) {
            Ok(color) => println!("Table header color set to {color:?}."),
            Err(e) => bail!("Error setting header color: {}", e),
        },
        cli::Commands::SetIdStrategy { strategy } => {
            let strategy = match strategy {
                cli::IdStrategyCli::Sequential => IdStrategy::Sequential,
                cli::IdStrategyCli::Uuid => IdStrategy::Uuid,
            };
            match service.set_id_strategy(strategy) {
                Ok(()) => println!("Exercise ids will be generated as: {strategy}"),
                Err(e) => bail!("Error setting id strategy: {}", e),
            }
        }
        cli::Commands::SetDateFormat { format } => match service.set_date_format(&format) {
            Ok(()) => println!("Date format set to '{format}'."),
            Err(e) => bail!("Error setting date format: {}", e),
        },
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Reads a file, or stdin when the path is '-'.
fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        return Ok(buffer);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// A missing week header and a log with no usable workouts get different
/// messages: the first is a format problem, the second an empty import.
fn parse_history_or_bail(service: &AppService, text: &str) -> Result<Vec<ParsedHistoryWorkout>> {
    match service.parse_history(text) {
        Ok(workouts) if workouts.is_empty() => {
            bail!("No workouts found in the text. Check that days contain exercises with sets.")
        }
        Ok(workouts) => Ok(workouts),
        Err(e) => bail!("Invalid history format: {}", e),
    }
}

/// Keeps only exercises of `kind`, dropping days left empty.
fn filter_plan_by_kind(days: Vec<DayWorkout>, kind: ExerciseKind) -> Vec<DayWorkout> {
    days.into_iter()
        .filter_map(|mut day| {
            day.exercises.retain(|e| e.type_ == kind);
            (!day.exercises.is_empty()).then_some(day)
        })
        .collect()
}

/// Prints plan exercises in a formatted table.
fn print_plan_table(days: &[DayWorkout], header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Day").fg(header_color),
            Cell::new("#").fg(header_color),
            Cell::new("Exercise").fg(header_color),
            Cell::new("Sets").fg(header_color),
            Cell::new("Reps").fg(header_color),
            Cell::new("Type").fg(header_color),
            Cell::new("Notes").fg(header_color),
        ]);

    for day in days {
        for (idx, exercise) in day.exercises.iter().enumerate() {
            table.add_row(vec![
                Cell::new(day.day.to_string()),
                Cell::new((idx + 1).to_string()),
                Cell::new(&exercise.name),
                Cell::new(exercise.sets.to_string()),
                Cell::new(&exercise.reps),
                Cell::new(exercise.type_.to_string()),
                Cell::new(if exercise.notes.is_empty() {
                    "-"
                } else {
                    exercise.notes.as_str()
                }),
            ]);
        }
    }
    println!("{table}");
}

fn print_plan_csv(days: &[DayWorkout]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["Day", "Order", "Exercise", "Sets", "Reps", "Type", "Notes"])?;

    for day in days {
        for (idx, exercise) in day.exercises.iter().enumerate() {
            writer.write_record([
                day.day.to_string(),
                (idx + 1).to_string(),
                exercise.name.clone(),
                exercise.sets.to_string(),
                exercise.reps.clone(),
                exercise.type_.to_string(),
                exercise.notes.clone(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Prints one row per set.
fn print_history_table(workouts: &[ParsedHistoryWorkout], date_format: &str, header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Date").fg(header_color),
            Cell::new("Day").fg(header_color),
            Cell::new("Exercise").fg(header_color),
            Cell::new("Set").fg(header_color),
            Cell::new("Performed").fg(header_color),
            Cell::new("Volume (kg)").fg(header_color),
        ]);

    for workout in workouts {
        let date = gymtext_lib::text::format_date(workout.date, date_format);
        for exercise in &workout.exercises {
            for set in &exercise.sets {
                table.add_row(vec![
                    Cell::new(&date),
                    Cell::new(workout.day_number.to_string()),
                    Cell::new(&exercise.name),
                    Cell::new(set.set_number.to_string()),
                    Cell::new(format_set(set)),
                    Cell::new(if set.is_bodyweight() {
                        "-".to_string()
                    } else {
                        format!("{:.1}", set.volume())
                    }),
                ]);
            }
        }
    }
    println!("{table}");
}

fn print_history_csv(workouts: &[ParsedHistoryWorkout]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["Date", "Day", "Exercise", "Set", "Weight_kg", "Reps"])?;

    for workout in workouts {
        for exercise in &workout.exercises {
            for set in &exercise.sets {
                writer.write_record([
                    workout.date.format("%Y-%m-%d").to_string(), // ISO 8601 for CSV
                    workout.day_number.to_string(),
                    exercise.name.clone(),
                    set.set_number.to_string(),
                    set.weight.to_string(),
                    set.reps.to_string(),
                ])?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}
