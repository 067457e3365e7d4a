//src/summary.rs
//! Plain-text digests of parsed data for the weight-suggestion prompt.

use chrono::{Months, NaiveDate};
use std::collections::HashMap;
use std::fmt::Write;

use crate::config::SummaryConfig;
use crate::model::{ExerciseKind, ExerciseSet, ParsedHistoryWorkout, WeeklyPlan};
use crate::text::{self, DAY_WORD, DROPSET_LABEL, SETS_OF, SUPERSET_LABEL, WEEK_WORD, WEIGHT_UNIT};

pub const NO_HISTORY: &str = "Історія тренувань відсутня. Це перший план користувача.";

fn compact_sets(sets: &[ExerciseSet]) -> String {
    sets.iter()
        .map(|s| format!("{}{WEIGHT_UNIT}×{}", s.weight, s.reps))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One exercise's appearances, most recent first.
struct ExerciseTrail<'a> {
    name: &'a str,
    records: Vec<(NaiveDate, &'a [ExerciseSet])>,
}

fn group_by_exercise<'a>(workouts: &[&'a ParsedHistoryWorkout]) -> Vec<ExerciseTrail<'a>> {
    let mut trails: Vec<ExerciseTrail<'a>> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for &workout in workouts {
        for exercise in &workout.exercises {
            let slot = *index.entry(exercise.name.as_str()).or_insert_with(|| {
                trails.push(ExerciseTrail {
                    name: exercise.name.as_str(),
                    records: Vec::new(),
                });
                trails.len() - 1
            });
            trails[slot]
                .records
                .push((workout.date, exercise.sets.as_slice()));
        }
    }

    trails
}

/// Summarizes the workouts inside the lookback window ending at `today`:
/// per-exercise progression first, then the latest sessions.
pub fn format_history_summary(
    workouts: &[ParsedHistoryWorkout],
    today: NaiveDate,
    config: &SummaryConfig,
    date_format: &str,
) -> String {
    if workouts.is_empty() {
        return NO_HISTORY.to_string();
    }

    let cutoff = today
        .checked_sub_months(Months::new(config.lookback_months))
        .unwrap_or(NaiveDate::MIN);
    let mut recent: Vec<&ParsedHistoryWorkout> =
        workouts.iter().filter(|w| w.date >= cutoff).collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));

    if recent.is_empty() {
        return format!(
            "Історія тренувань за останні {} міс. відсутня. Це перший план користувача за цей період.",
            config.lookback_months
        );
    }

    let mut out = format!(
        "Всього тренувань за останні {} міс.: {}\n\n",
        config.lookback_months,
        recent.len()
    );

    out.push_str("ІСТОРІЯ ПО ВПРАВАХ:\n\n");
    for trail in group_by_exercise(&recent) {
        let _ = writeln!(out, "▸ {}:", trail.name);
        for (date, sets) in trail.records.iter().take(config.max_records_per_exercise) {
            let _ = writeln!(
                out,
                "  {}: {}",
                text::format_date(*date, date_format),
                compact_sets(sets)
            );
        }
        out.push('\n');
    }

    out.push_str("\nОСТАННІ ТРЕНУВАННЯ:\n");
    for workout in recent.iter().take(config.max_recent_workouts) {
        let _ = writeln!(
            out,
            "\nДата: {} ({DAY_WORD} {}):",
            text::format_date(workout.date, date_format),
            workout.day_number
        );
        for exercise in &workout.exercises {
            let _ = writeln!(out, "  - {}: {}", exercise.name, compact_sets(&exercise.sets));
        }
    }

    out
}

/// The new week's plan as the prompt presents it.
pub fn format_plan_summary(plan: &WeeklyPlan, date_format: &str) -> String {
    let mut out = format!(
        "{WEEK_WORD}: {} - {}\n\n",
        text::format_date(plan.week_start, date_format),
        text::format_date(plan.week_end, date_format)
    );

    for day in &plan.days {
        let _ = writeln!(out, "{} {}:", DAY_WORD.to_uppercase(), day.day);
        for (idx, exercise) in day.exercises.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", idx + 1, exercise.name);
            let _ = writeln!(out, "   {} {SETS_OF} {}", exercise.sets, exercise.reps);
            let label = match exercise.type_ {
                ExerciseKind::Superset => Some(SUPERSET_LABEL),
                ExerciseKind::Dropset => Some(DROPSET_LABEL),
                ExerciseKind::Normal => None,
            };
            if let Some(label) = label {
                let _ = writeln!(out, "   Тип: {label}");
            }
        }
        out.push('\n');
    }

    out
}
