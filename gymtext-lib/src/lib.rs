// src/lib.rs
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

// --- Declare modules ---
pub mod config;
pub mod history;
pub mod ids;
pub mod model;
pub mod plan;
pub mod summary;
pub mod text;

// --- Expose public types ---
pub use config::{
    get_config_path as get_config_path_util, load as load_config_util, parse_color,
    save as save_config_util, Config, ConfigError, StandardColor, SummaryConfig, ThemeConfig,
};
pub use history::{
    format_history_workout, format_set, import_example, parse_history, parse_set_line,
    FormatError,
};
pub use ids::{IdGenerator, IdStrategy, SequentialIds, UuidIds};
pub use model::{
    CompletedExercise, DayWorkout, Exercise, ExerciseKind, ExerciseSet, ParsedHistoryWorkout,
    WeeklyPlan,
};
pub use plan::{format_exercise_for_display, format_plan, parse_plan};
pub use summary::{format_history_summary, format_plan_summary};

/// Config-aware entry point used by the CLI. The parsers themselves are free
/// functions and hold no state; the service only decides which id generator
/// and date format they get.
pub struct AppService {
    pub config: Config,
    pub config_path: PathBuf,
}

impl AppService {
    /// Initializes the application service.
    /// # Errors
    /// Returns `anyhow::Error` if config path determination or loading fails.
    pub fn initialize() -> Result<Self> {
        let config_path =
            config::get_config_path().context("Failed to determine configuration file path")?;
        let config = config::load(&config_path)
            .with_context(|| format!("Failed to load config from {config_path:?}"))?;

        Ok(Self {
            config,
            config_path,
        })
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }

    /// Saves the current configuration state.
    /// # Errors
    /// Returns `ConfigError` if saving fails.
    pub fn save_config(&self) -> Result<(), ConfigError> {
        config::save(&self.config_path, &self.config)
    }

    /// Sets the table header color.
    /// # Errors
    /// - `ConfigError::InvalidColor` if the name is unknown.
    /// - `ConfigError` variants if saving fails.
    pub fn set_header_color(&mut self, color_name: &str) -> Result<StandardColor, ConfigError> {
        let color = parse_color(color_name)?;
        self.config.theme.header_color = format!("{color:?}");
        self.save_config()?;
        Ok(color)
    }

    /// Sets how exercise ids are generated.
    /// # Errors
    /// Returns `ConfigError` variants if saving fails.
    pub fn set_id_strategy(&mut self, strategy: IdStrategy) -> Result<(), ConfigError> {
        self.config.id_strategy = strategy;
        self.save_config()
    }

    /// Sets the date format used in rendered output.
    /// # Errors
    /// - `ConfigError::InvalidDateFormat` if the pattern is not valid strftime.
    /// - `ConfigError` variants if saving fails.
    pub fn set_date_format(&mut self, pattern: &str) -> Result<(), ConfigError> {
        if !text::is_valid_date_format(pattern) {
            return Err(ConfigError::InvalidDateFormat(pattern.to_string()));
        }
        self.config.date_format = pattern.to_string();
        self.save_config()
    }

    /// Parses plan text. An empty result means no `День N` block with
    /// exercises was recognized.
    pub fn parse_plan(&self, text: &str) -> Vec<DayWorkout> {
        let ids = self.config.id_strategy.generator();
        plan::parse_plan(text, ids.as_ref())
    }

    pub fn parse_weekly_plan(
        &self,
        week_start: NaiveDate,
        week_end: NaiveDate,
        text: &str,
    ) -> WeeklyPlan {
        let ids = self.config.id_strategy.generator();
        WeeklyPlan::from_text(week_start, week_end, text, ids.as_ref())
    }

    /// Parses history text.
    /// # Errors
    /// Returns `FormatError` if the text has no week header.
    pub fn parse_history(&self, text: &str) -> Result<Vec<ParsedHistoryWorkout>, FormatError> {
        let ids = self.config.id_strategy.generator();
        history::parse_history(text, ids.as_ref())
    }

    pub fn format_history_workout(&self, workout: &ParsedHistoryWorkout) -> String {
        history::format_history_workout(workout, &self.config.date_format)
    }

    pub fn history_summary(&self, workouts: &[ParsedHistoryWorkout], today: NaiveDate) -> String {
        summary::format_history_summary(
            workouts,
            today,
            &self.config.summary,
            &self.config.date_format,
        )
    }

    pub fn plan_summary(&self, plan: &WeeklyPlan) -> String {
        summary::format_plan_summary(plan, &self.config.date_format)
    }
}
