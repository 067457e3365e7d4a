//src/model.rs
use anyhow::bail;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::ids::IdGenerator;
use crate::plan;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    #[default]
    Normal,
    Superset,
    Dropset,
}

impl TryFrom<&str> for ExerciseKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "superset" | "суперсет" => Ok(Self::Superset),
            "dropset" | "дропсет" => Ok(Self::Dropset),
            _ => {
                let valid: Vec<String> = Self::iter().map(|kind| kind.to_string()).collect();
                bail!(
                    "Invalid exercise kind: {}. Valid kinds: {}",
                    value,
                    valid.join(", ")
                )
            }
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Superset => write!(f, "superset"),
            Self::Dropset => write!(f, "dropset"),
        }
    }
}

/// One prescribed exercise from a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub sets: u32,
    /// Rep range as written, e.g. "8-12" or "макс".
    pub reps: String,
    #[serde(rename = "type")]
    pub type_: ExerciseKind,
    /// Raw detail text the other fields were extracted from.
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayWorkout {
    pub day: u32,
    pub exercises: Vec<Exercise>,
}

/// A plan bound to the calendar week it is meant for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub days: Vec<DayWorkout>,
    pub raw_text: String,
}

impl WeeklyPlan {
    pub fn from_text(
        week_start: NaiveDate,
        week_end: NaiveDate,
        raw_text: &str,
        ids: &dyn IdGenerator,
    ) -> Self {
        Self {
            week_start,
            week_end,
            days: plan::parse_plan(raw_text, ids),
            raw_text: raw_text.to_string(),
        }
    }

    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.days.iter().map(|d| d.exercises.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSet {
    pub set_number: u32,
    /// Zero means bodyweight / no external load.
    pub weight: f64,
    pub reps: u32,
}

impl ExerciseSet {
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }

    #[must_use]
    pub fn is_bodyweight(&self) -> bool {
        self.weight == 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedExercise {
    pub exercise_id: String,
    pub name: String,
    pub sets: Vec<ExerciseSet>,
}

impl CompletedExercise {
    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.sets.iter().map(ExerciseSet::volume).sum()
    }

    /// Heaviest load lifted in any set, 0 for pure bodyweight work.
    #[must_use]
    pub fn max_weight(&self) -> f64 {
        self.sets.iter().map(|s| s.weight).fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedHistoryWorkout {
    pub date: NaiveDate,
    pub day_number: u32,
    pub exercises: Vec<CompletedExercise>,
}

impl ParsedHistoryWorkout {
    #[must_use]
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}
