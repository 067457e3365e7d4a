//src/plan.rs
//! Parser for a single week's plan text (`День N` blocks, numbered
//! exercises, free-form set/rep hints).

use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::ids::IdGenerator;
use crate::model::{DayWorkout, Exercise, ExerciseKind};
use crate::text::{self, DAY_WORD, DROPSET_LABEL, SETS_OF, SUPERSET_LABEL};

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: &str = "8-12";

static SUPERSET: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)суперсет").ok());
static DROPSET: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)дропсет").ok());

// "3 підходи", "4 підходів"
static SETS_WORD: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)\s*підход").ok());

// "3×8-12", "4x10", "3 х макс"; not "2 хв"
static SETS_SHORTHAND: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)\s*[×xх]\s*(?:[0-9]|макс)").ok());

static REPS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(?:по\s+)?([0-9]+(?:[-–][0-9]+)?|макс)").ok());

fn is_match(re: Option<&Regex>, haystack: &str) -> bool {
    re.is_some_and(|re| re.is_match(haystack))
}

/// Parses plan text into day blocks. Never fails: text without day markers,
/// or whose days hold no exercises, yields an empty list.
pub fn parse_plan(text: &str, ids: &dyn IdGenerator) -> Vec<DayWorkout> {
    let clean = text::normalize(text);

    let days: Vec<DayWorkout> = text::segment_days(&clean)
        .into_iter()
        .filter_map(|block| {
            let exercises = parse_exercises(block.text, ids);
            if exercises.is_empty() {
                debug!(day = block.number, "Dropping plan day without exercises");
                return None;
            }
            Some(DayWorkout {
                day: block.number,
                exercises,
            })
        })
        .collect();

    info!(days = days.len(), "Parsed workout plan");
    days
}

struct OpenExercise {
    name: String,
    details: String,
}

impl OpenExercise {
    fn append(&mut self, line: &str) {
        if !self.details.is_empty() {
            self.details.push(' ');
        }
        self.details.push_str(line);
    }
}

fn parse_exercises(day_text: &str, ids: &dyn IdGenerator) -> Vec<Exercise> {
    let mut exercises = Vec::new();
    let mut current: Option<OpenExercise> = None;

    for line in day_text.lines().map(str::trim) {
        if let Some(header) = text::split_exercise_header(line) {
            if let Some(done) = current.take() {
                exercises.push(build_exercise(done.name, done.details, ids));
            }
            let mut open = OpenExercise {
                name: header.name.to_string(),
                details: String::new(),
            };
            if let Some(detail) = header.detail {
                open.append(detail);
            }
            current = Some(open);
        } else if let Some(open) = current.as_mut() {
            if !line.is_empty() {
                open.append(line);
            }
        }
    }

    if let Some(done) = current {
        exercises.push(build_exercise(done.name, done.details, ids));
    }

    exercises
}

/// Detects the exercise kind from keywords anywhere in the details.
/// Superset wins when both words are present.
pub fn detect_kind(details: &str) -> ExerciseKind {
    if is_match(SUPERSET.as_ref(), details) {
        ExerciseKind::Superset
    } else if is_match(DROPSET.as_ref(), details) {
        ExerciseKind::Dropset
    } else {
        ExerciseKind::Normal
    }
}

/// Returns the set count and the byte offset right after it, where the rep
/// search starts.
fn extract_sets(details: &str) -> Option<(u32, usize)> {
    [SETS_WORD.as_ref(), SETS_SHORTHAND.as_ref()]
        .into_iter()
        .flatten()
        .find_map(|re| {
            let count = re.captures(details)?.get(1)?;
            let sets = count.as_str().parse().ok()?;
            Some((sets, count.end()))
        })
}

/// Set count and rep range from free text.
///
/// Reps are the first number or range (or "макс") after the set count,
/// with or without a trailing "повторень": both "3 підходи по 8-12" and
/// "3 підходи 8-12 повторень" give "8-12". Without a set count the whole
/// text is searched, so "по 10" alone gives reps "10" and the default sets.
pub fn extract_sets_and_reps(details: &str) -> (u32, String) {
    let (sets, reps_from) = extract_sets(details).unwrap_or((DEFAULT_SETS, 0));
    let reps = REPS
        .as_ref()
        .and_then(|re| re.captures(&details[reps_from..]))
        .and_then(|caps| caps.get(1))
        .map_or_else(|| DEFAULT_REPS.to_string(), |m| m.as_str().to_string());
    (sets, reps)
}

fn build_exercise(name: String, details: String, ids: &dyn IdGenerator) -> Exercise {
    let (sets, reps) = extract_sets_and_reps(&details);
    Exercise {
        id: ids.next_id(),
        name,
        sets,
        reps,
        type_: detect_kind(&details),
        notes: details,
    }
}

/// `"<name>\n<sets> підходи по <reps>"`, prefixed for supersets and dropsets.
pub fn format_exercise_for_display(exercise: &Exercise) -> String {
    let body = format!(
        "{}\n{} {} {}",
        exercise.name, exercise.sets, SETS_OF, exercise.reps
    );
    match exercise.type_ {
        ExerciseKind::Superset => format!("{SUPERSET_LABEL} - {body}"),
        ExerciseKind::Dropset => format!("{DROPSET_LABEL} - {body}"),
        ExerciseKind::Normal => body,
    }
}

/// Renders parsed days back into plan text that `parse_plan` accepts.
pub fn format_plan(days: &[DayWorkout]) -> String {
    let mut out = String::new();
    for (i, day) in days.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{DAY_WORD} {}", day.day);
        for (idx, exercise) in day.exercises.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", idx + 1, exercise.name);
            let _ = write!(out, "{} {} {}", exercise.sets, SETS_OF, exercise.reps);
            match exercise.type_ {
                ExerciseKind::Superset => out.push_str(" (суперсет)"),
                ExerciseKind::Dropset => out.push_str(" (дропсет)"),
                ExerciseKind::Normal => {}
            }
            out.push('\n');
        }
    }
    out
}
