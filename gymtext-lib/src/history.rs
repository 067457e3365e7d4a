//src/history.rs
use chrono::Days;
use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info};

use crate::ids::IdGenerator;
use crate::model::{CompletedExercise, ExerciseSet, ParsedHistoryWorkout};
use crate::text::{self, DAY_WORD, WEIGHT_UNIT};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("no week headers found, expected \"Тиждень: ДД.ММ.РРРР - ДД.ММ.РРРР\"")]
    NoWeekHeaders,
}

// "100 кг × 12", "52,5 кг x 10", "20", optionally labelled "1. 100 кг × 12"
static SET_LINE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[0-9]+[.)]\s+)?(?:([0-9]+(?:[.,][0-9]+)?)\s*кг\s*[×xх]\s*)?([0-9]+)$").ok()
});

static SPACED_GLYPH: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)\s[×xх]\s").ok());

fn is_bare_integer(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a set line into `(weight, reps)`. Bare integers are bodyweight
/// reps with weight 0.
pub fn parse_set_line(line: &str) -> Option<(f64, u32)> {
    let caps = SET_LINE.as_ref()?.captures(line)?;
    let reps = caps.get(2)?.as_str().parse().ok()?;
    let weight = match caps.get(1) {
        Some(w) => w.as_str().replace(',', ".").parse().ok()?,
        None => 0.0,
    };
    Some((weight, reps))
}

/// Exercise headers and numbered set lines both start with `N.`; the name
/// part (before any ` – ` tail) must not carry the weight unit, a spaced
/// multiplication glyph, or be a bare number. The tail may hold "3 x 10".
/// Exercises literally named like a set are misread.
fn exercise_name(line: &str) -> Option<&str> {
    let header = text::split_exercise_header(line)?;
    let name = header.name;
    let looks_like_set = name.to_lowercase().contains(WEIGHT_UNIT)
        || SPACED_GLYPH.as_ref().is_some_and(|re| re.is_match(name))
        || is_bare_integer(name);
    (!looks_like_set).then_some(name)
}

struct OpenExercise {
    name: String,
    sets: Vec<ExerciseSet>,
}

fn close(open: OpenExercise, ids: &dyn IdGenerator, out: &mut Vec<CompletedExercise>) {
    if open.sets.is_empty() {
        debug!(exercise = %open.name, "Dropping exercise without recognized sets");
        return;
    }
    out.push(CompletedExercise {
        exercise_id: ids.next_id(),
        name: open.name,
        sets: open.sets,
    });
}

fn parse_history_exercises(day_text: &str, ids: &dyn IdGenerator) -> Vec<CompletedExercise> {
    let mut exercises = Vec::new();
    let mut current: Option<OpenExercise> = None;

    for line in day_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(name) = exercise_name(line) {
            if let Some(done) = current.take() {
                close(done, ids, &mut exercises);
            }
            current = Some(OpenExercise {
                name: name.to_string(),
                sets: Vec::new(),
            });
        } else if let (Some(open), Some((weight, reps))) = (current.as_mut(), parse_set_line(line)) {
            // Any set number printed in the source is ignored.
            let set_number = open.sets.len() as u32 + 1;
            open.sets.push(ExerciseSet {
                set_number,
                weight,
                reps,
            });
        }
    }

    if let Some(done) = current {
        close(done, ids, &mut exercises);
    }

    exercises
}

/// Parses multi-week history text into dated workouts, in the order the
/// week headers appear (not sorted by date).
///
/// # Errors
/// Returns `FormatError::NoWeekHeaders` if the text contains no
/// `Тиждень: ...` header at all. Weeks, days and lines that cannot be read
/// are skipped instead.
pub fn parse_history(
    text: &str,
    ids: &dyn IdGenerator,
) -> Result<Vec<ParsedHistoryWorkout>, FormatError> {
    let clean = text::normalize(text);
    let weeks = text::segment_weeks(&clean).ok_or(FormatError::NoWeekHeaders)?;

    let mut workouts = Vec::new();
    for week in &weeks {
        for day in text::segment_days(week.text) {
            let exercises = parse_history_exercises(day.text, ids);
            if exercises.is_empty() {
                debug!(week_start = %week.start, day = day.number, "Dropping day without exercises");
                continue;
            }
            // The date comes from the day's position in the week.
            let Some(date) = week.start.checked_add_days(Days::new(u64::from(day.number - 1)))
            else {
                debug!(day = day.number, "Day offset overflows the calendar");
                continue;
            };
            workouts.push(ParsedHistoryWorkout {
                date,
                day_number: day.number,
                exercises,
            });
        }
    }

    info!(
        weeks = weeks.len(),
        workouts = workouts.len(),
        "Parsed workout history"
    );
    Ok(workouts)
}

/// Renders one workout as `Дата: ...`, `День N`, then numbered exercises
/// with one set per line.
pub fn format_history_workout(workout: &ParsedHistoryWorkout, date_format: &str) -> String {
    let mut out = format!(
        "Дата: {}\n{DAY_WORD} {}\n\n",
        text::format_date(workout.date, date_format),
        workout.day_number
    );

    for (idx, exercise) in workout.exercises.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", idx + 1, exercise.name);
        for set in &exercise.sets {
            let _ = writeln!(out, "   {}", format_set(set));
        }
        out.push('\n');
    }

    out
}

/// `"<weight> кг × <reps>"`, or just the reps for bodyweight sets.
pub fn format_set(set: &ExerciseSet) -> String {
    if set.weight > 0.0 {
        format!("{} {WEIGHT_UNIT} × {}", set.weight, set.reps)
    } else {
        set.reps.to_string()
    }
}

/// Sample history text in the exact import format: two weeks, weighted and
/// bodyweight sets, several days.
pub fn import_example() -> &'static str {
    IMPORT_EXAMPLE
}

const IMPORT_EXAMPLE: &str = "Тиждень: 25.08.2024 - 31.08.2024

День 1
1. Присідання зі штангою – 3×8-12
100 кг × 12
100 кг × 10
100 кг × 8

2. Жим ногами – 3×10-15
150 кг × 15
150 кг × 12
150 кг × 10

3. Згинання ніг сидячи у тренажері – 3×10-15
27 кг × 12
32 кг × 10
32 кг × 10

4. Підйом на носки стоячи (ікра) – 3×15-20
40 кг × 20
50 кг × 18
50 кг × 15

День 2
1. Жим штанги лежачи – 3×8-12
80 кг × 12
80 кг × 10
80 кг × 8

2. Жим гантелей сидячи – 3×8-12
15 кг × 12
17,5 кг × 10
17.5 кг × 8

3. Махи гантелями в сторони – 3×12-15
5 кг × 15
5 кг × 12
5 кг × 12

День 3
1. Віджимання від підлоги – 3×макс
20
18
15

2. Підтягування – 3×макс
10
8
6

3. Тяга верхнього блока – 3×10-12
41 кг × 12
45 кг × 10
50 кг × 8

Тиждень: 01.09.2024 - 07.09.2024

День 1
1. Присідання зі штангою – 3×8-12
102,5 кг × 12
102,5 кг × 10
102,5 кг × 9

2. Жим ногами – 3×10-15
155 кг × 15
155 кг × 12
155 кг × 11

День 2
1. Жим штанги лежачи – 4×6-10
82,5 кг × 10
82,5 кг × 8
82,5 кг × 8
80 кг × 9

2. Молотки – 3×8-12
8 кг × 12
10 кг × 10
10 кг × 8";
