use anyhow::Result;
use chrono::NaiveDate;
use std::collections::HashSet;

use gymtext_lib::{
    format_exercise_for_display, format_history_summary, format_history_workout, format_plan,
    format_plan_summary, import_example, parse_history, parse_plan, parse_set_line, text,
    Config, ConfigError, ExerciseKind, FormatError, IdGenerator, IdStrategy, SequentialIds,
    SummaryConfig, UuidIds, WeeklyPlan,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// --- Plan parser ---

#[test]
fn test_parse_simple_plan() -> Result<()> {
    let text = "День 1\n1. Присідання зі штангою\n3 підходи по 8-12";
    let days = parse_plan(text, &SequentialIds::default());

    assert_eq!(days.len(), 1);
    assert_eq!(days[0].day, 1);
    assert_eq!(days[0].exercises.len(), 1);
    let exercise = &days[0].exercises[0];
    assert_eq!(exercise.name, "Присідання зі штангою");
    assert_eq!(exercise.sets, 3);
    assert_eq!(exercise.reps, "8-12");
    assert_eq!(exercise.type_, ExerciseKind::Normal);
    assert_eq!(exercise.notes, "3 підходи по 8-12");
    Ok(())
}

#[test]
fn test_parse_plan_multiple_days_and_exercises_in_order() -> Result<()> {
    let text = "День 1
1. Присідання зі штангою
3 підходи по 8-12

2. Жим ногами
3 підходи по 10-15

День 2
1. Жим штанги лежачи
4 підходи по 6-10";
    let days = parse_plan(text, &SequentialIds::default());

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].day, 1);
    assert_eq!(days[1].day, 2);
    let names: Vec<&str> = days[0].exercises.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Присідання зі штангою", "Жим ногами"]);
    assert_eq!(days[1].exercises[0].sets, 4);
    assert_eq!(days[1].exercises[0].reps, "6-10");
    Ok(())
}

#[test]
fn test_plan_superset_and_dropset_detection() -> Result<()> {
    let text = "День 1
1. Присідання
Суперсет 3 підходи по 8-12
2. Розведення
ДРОПСЕТ 2 підходи по 15
3. Жим
суперсет з дропсетом 3 підходи";
    let days = parse_plan(text, &SequentialIds::default());
    let kinds: Vec<ExerciseKind> = days[0].exercises.iter().map(|e| e.type_).collect();
    assert_eq!(
        kinds,
        vec![ExerciseKind::Superset, ExerciseKind::Dropset, ExerciseKind::Superset]
    );
    Ok(())
}

#[test]
fn test_plan_defaults_without_keywords() -> Result<()> {
    let text = "День 1\n1. Планка\nтримати рівно спину\n2. Скручування";
    let days = parse_plan(text, &SequentialIds::default());

    assert_eq!(days[0].exercises.len(), 2);
    for exercise in &days[0].exercises {
        assert_eq!(exercise.sets, 3);
        assert_eq!(exercise.reps, "8-12");
    }
    assert_eq!(days[0].exercises[0].notes, "тримати рівно спину");
    assert_eq!(days[0].exercises[1].notes, "");
    Ok(())
}

#[test]
fn test_plan_reps_with_and_without_unit_word() -> Result<()> {
    // "по" form, bare form, and trailing "повторень" all resolve the same range.
    let text = "День 1
1. Жим
3 підходи по 8-12
2. Тяга
3 підходи 8-12
3. Присідання
3 підходи 8-12 повторень";
    let days = parse_plan(text, &SequentialIds::default());
    for exercise in &days[0].exercises {
        assert_eq!(exercise.sets, 3, "{}", exercise.name);
        assert_eq!(exercise.reps, "8-12", "{}", exercise.name);
    }
    Ok(())
}

#[test]
fn test_plan_reps_permissive_without_set_count() -> Result<()> {
    let text = "День 1\n1. Біг\nпо 10 хвилин";
    let days = parse_plan(text, &SequentialIds::default());
    assert_eq!(days[0].exercises[0].sets, 3);
    assert_eq!(days[0].exercises[0].reps, "10");
    Ok(())
}

#[test]
fn test_plan_header_tail_and_shorthand() -> Result<()> {
    let text = "День 1
1. Присідання зі штангою – 4×6-8
2. Віджимання – 3×макс
3. Т-тяга
3 підходи по 10, відпочинок 2 хв";
    let days = parse_plan(text, &SequentialIds::default());
    let ex = &days[0].exercises;

    assert_eq!(ex[0].name, "Присідання зі штангою");
    assert_eq!((ex[0].sets, ex[0].reps.as_str()), (4, "6-8"));
    assert_eq!(ex[1].name, "Віджимання");
    assert_eq!((ex[1].sets, ex[1].reps.as_str()), (3, "макс"));
    assert_eq!(ex[2].name, "Т-тяга");
    assert_eq!((ex[2].sets, ex[2].reps.as_str()), (3, "10"));
    Ok(())
}

#[test]
fn test_plan_details_are_space_joined() -> Result<()> {
    let text = "День 1\n1. Жим\n3 підходи\n\nпо 8-12\nсуперсет";
    let days = parse_plan(text, &SequentialIds::default());
    let exercise = &days[0].exercises[0];
    assert_eq!(exercise.notes, "3 підходи по 8-12 суперсет");
    assert_eq!(exercise.reps, "8-12");
    assert_eq!(exercise.type_, ExerciseKind::Superset);
    Ok(())
}

#[test]
fn test_plan_empty_and_markerless_input() -> Result<()> {
    let ids = SequentialIds::default();
    assert!(parse_plan("", &ids).is_empty());
    assert!(parse_plan("   \n\n ", &ids).is_empty());
    assert!(parse_plan("Some random text without day markers", &ids).is_empty());
    Ok(())
}

#[test]
fn test_plan_day_without_exercises_is_dropped() -> Result<()> {
    let text = "День 1\nвідпочинок\n\nДень 2\n1. Жим\n3 підходи по 5";
    let days = parse_plan(text, &SequentialIds::default());
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].day, 2);
    Ok(())
}

#[test]
fn test_plan_line_endings_do_not_change_result() -> Result<()> {
    let unix = "День 1\n1. Присідання зі штангою\n3 підходи по 8-12\n\n\n\n\nДень 2\n1. Жим\n4 підходи по 6";
    let windows = unix.replace('\n', "\r\n");
    let a = parse_plan(unix, &SequentialIds::default());
    let b = parse_plan(&windows, &SequentialIds::default());
    assert_eq!(a, b);
    assert_eq!(a.len(), 2);
    Ok(())
}

#[test]
fn test_plan_ids_unique_within_call() -> Result<()> {
    let text = "День 1\n1. A\n2. B\nДень 2\n1. C\n2. D";
    for ids in [IdStrategy::Sequential.generator(), IdStrategy::Uuid.generator()] {
        let days = parse_plan(text, ids.as_ref());
        let all: HashSet<&str> = days
            .iter()
            .flat_map(|d| d.exercises.iter().map(|e| e.id.as_str()))
            .collect();
        assert_eq!(all.len(), 4);
    }
    Ok(())
}

#[test]
fn test_format_exercise_for_display() -> Result<()> {
    let days = parse_plan(
        "День 1\n1. Присідання зі штангою\n3 підходи по 8-12\n2. Жим\nсуперсет 4 підходи по 10\n3. Махи\nдропсет 2 підходи по 15-20",
        &SequentialIds::default(),
    );
    let ex = &days[0].exercises;

    assert_eq!(
        format_exercise_for_display(&ex[0]),
        "Присідання зі штангою\n3 підходи по 8-12"
    );
    assert_eq!(format_exercise_for_display(&ex[1]), "Суперсет - Жим\n4 підходи по 10");
    assert_eq!(format_exercise_for_display(&ex[2]), "Дропсет - Махи\n2 підходи по 15-20");
    Ok(())
}

#[test]
fn test_format_plan_round_trips() -> Result<()> {
    let text = "День 1\n1. Присідання\n4 підходи по 6-8\n2. Жим\nсуперсет 3 підходи по 10\n\nДень 3\n1. Тяга\nдропсет 2 підходи по 12-15";
    let days = parse_plan(text, &SequentialIds::default());
    let reparsed = parse_plan(&format_plan(&days), &SequentialIds::default());

    assert_eq!(reparsed.len(), days.len());
    for (a, b) in days.iter().zip(&reparsed) {
        assert_eq!(a.day, b.day);
        for (x, y) in a.exercises.iter().zip(&b.exercises) {
            assert_eq!((&x.name, x.sets, &x.reps, x.type_), (&y.name, y.sets, &y.reps, y.type_));
        }
    }
    Ok(())
}

#[test]
fn test_plan_parse_of_import_example_keeps_prescriptions() -> Result<()> {
    let days = parse_plan(import_example(), &SequentialIds::default());
    let first = &days[0].exercises[0];
    let shown = format_exercise_for_display(first);

    assert_eq!(first.name, "Присідання зі штангою");
    assert_eq!((first.sets, first.reps.as_str()), (3, "8-12"));
    assert!(shown.contains("3 підходи по 8-12"));

    // Every "N×range" prescription in the fixture survives the plan parser.
    for day in &days {
        for exercise in &day.exercises {
            let prescription = format!("{}×{}", exercise.sets, exercise.reps);
            assert!(
                import_example().contains(&format!("{} – {}", exercise.name, prescription)),
                "{prescription} not found for {}",
                exercise.name
            );
        }
    }
    Ok(())
}

#[test]
fn test_weekly_plan_from_text() -> Result<()> {
    let plan = WeeklyPlan::from_text(
        date(2024, 9, 2),
        date(2024, 9, 8),
        "День 1\n1. Жим\n3 підходи по 8\n2. Тяга\nДень 2\n1. Присідання",
        &SequentialIds::default(),
    );
    assert_eq!(plan.days.len(), 2);
    assert_eq!(plan.exercise_count(), 3);
    assert!(plan.raw_text.starts_with("День 1"));
    Ok(())
}

// --- History parser ---

#[test]
fn test_parse_simple_history() -> Result<()> {
    let text = "Тиждень: 25.08.2024 - 31.08.2024

День 1
1. Присідання зі штангою – 3×8-12
100 кг × 12
100 кг × 10
100 кг × 8";
    let workouts = parse_history(text, &SequentialIds::default())?;

    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0].day_number, 1);
    assert_eq!(workouts[0].date, date(2024, 8, 25));
    let exercise = &workouts[0].exercises[0];
    assert_eq!(exercise.name, "Присідання зі штангою");
    let sets: Vec<(u32, f64, u32)> = exercise
        .sets
        .iter()
        .map(|s| (s.set_number, s.weight, s.reps))
        .collect();
    assert_eq!(sets, vec![(1, 100.0, 12), (2, 100.0, 10), (3, 100.0, 8)]);
    Ok(())
}

#[test]
fn test_history_date_from_day_offset() -> Result<()> {
    let text = "Тиждень: 01.01.2024 - 07.01.2024\nДень 3\n1. Жим\n80 кг × 10";
    let workouts = parse_history(text, &SequentialIds::default())?;
    assert_eq!(workouts[0].date, date(2024, 1, 3));
    Ok(())
}

#[test]
fn test_history_date_crosses_month_boundary() -> Result<()> {
    let text = "Тиждень: 28.02.2024 - 05.03.2024\nДень 3\n1. Жим\n80 кг × 10\nДень 4\n1. Тяга\n60 кг × 10";
    let workouts = parse_history(text, &SequentialIds::default())?;
    assert_eq!(workouts[0].date, date(2024, 3, 1)); // 2024 is a leap year
    assert_eq!(workouts[1].date, date(2024, 3, 2));
    Ok(())
}

#[test]
fn test_history_bodyweight_and_decimal_comma() -> Result<()> {
    let text = "Тиждень: 25.08.2024 - 31.08.2024
День 1
1. Віджимання від підлоги – 3×макс
20
18
2. Жим гантелей
52,5 кг × 10
17.5 кг x 8
60кг×6";
    let workouts = parse_history(text, &SequentialIds::default())?;
    let pushups = &workouts[0].exercises[0];
    assert_eq!((pushups.sets[0].weight, pushups.sets[0].reps), (0.0, 20));
    assert!(pushups.sets[1].is_bodyweight());

    let press = &workouts[0].exercises[1];
    let weights: Vec<f64> = press.sets.iter().map(|s| s.weight).collect();
    assert_eq!(weights, vec![52.5, 17.5, 60.0]);
    Ok(())
}

#[test]
fn test_parse_set_line_forms() {
    assert_eq!(parse_set_line("20"), Some((0.0, 20)));
    assert_eq!(parse_set_line("52,5 кг × 10"), Some((52.5, 10)));
    assert_eq!(parse_set_line("100 КГ х 5"), Some((100.0, 5)));
    assert_eq!(parse_set_line("2. 40 кг × 12"), Some((40.0, 12)));
    assert_eq!(parse_set_line("макс"), None);
    assert_eq!(parse_set_line("100 кг"), None);
    assert_eq!(parse_set_line("гарне самопочуття"), None);
}

#[test]
fn test_history_set_numbers_ignore_source_labels() -> Result<()> {
    let text = "Тиждень: 25.08.2024 - 31.08.2024
День 1
1. Жим лежачи
3. 80 кг × 12
1. 80 кг × 10
7) 82,5 кг × 8";
    let workouts = parse_history(text, &SequentialIds::default())?;
    assert_eq!(workouts[0].exercises.len(), 1);
    for (i, set) in workouts[0].exercises[0].sets.iter().enumerate() {
        assert_eq!(set.set_number as usize, i + 1);
    }
    assert_eq!(workouts[0].exercises[0].sets.len(), 3);
    Ok(())
}

#[test]
fn test_history_set_numbering_on_fixture() -> Result<()> {
    let workouts = parse_history(import_example(), &SequentialIds::default())?;
    for workout in &workouts {
        for exercise in &workout.exercises {
            assert!(!exercise.sets.is_empty());
            for (i, set) in exercise.sets.iter().enumerate() {
                assert_eq!(set.set_number as usize, i + 1);
            }
        }
    }
    Ok(())
}

#[test]
fn test_history_commentary_is_ignored() -> Result<()> {
    let text = "Тиждень: 25.08.2024 - 31.08.2024
Хороший тиждень, спав добре.
День 1
1. Присідання – 3×8-12
розминка з грифом
100 кг × 12
важко йшло
100 кг × 10";
    let workouts = parse_history(text, &SequentialIds::default())?;
    assert_eq!(workouts[0].exercises[0].sets.len(), 2);
    Ok(())
}

#[test]
fn test_history_drops_empty_exercises_and_days() -> Result<()> {
    let text = "Тиждень: 25.08.2024 - 31.08.2024
День 1
1. Розминка
2. Присідання
100 кг × 5
День 2
1. Відпочинок
День 3
1. Жим
80 кг × 8";
    let workouts = parse_history(text, &SequentialIds::default())?;
    let days: Vec<u32> = workouts.iter().map(|w| w.day_number).collect();
    assert_eq!(days, vec![1, 3]);
    assert_eq!(workouts[0].exercises.len(), 1);
    assert_eq!(workouts[0].exercises[0].name, "Присідання");
    Ok(())
}

#[test]
fn test_history_multiple_weeks_in_header_order() -> Result<()> {
    let text = "Тиждень: 01.09.2024 - 07.09.2024

День 1
1. Присідання зі штангою – 3×8-12
105 кг × 12

Тиждень: 25.08.2024 - 31.08.2024

День 1
1. Присідання зі штангою – 3×8-12
100 кг × 12";
    let workouts = parse_history(text, &SequentialIds::default())?;

    assert_eq!(workouts.len(), 2);
    // Header order, not chronological order.
    assert_eq!(workouts[0].date, date(2024, 9, 1));
    assert_eq!(workouts[1].date, date(2024, 8, 25));
    assert_eq!(workouts[0].exercises[0].sets[0].weight, 105.0);
    Ok(())
}

#[test]
fn test_history_date_separators() -> Result<()> {
    for header in [
        "Тиждень: 25-08-2024 - 31-08-2024",
        "Тиждень: 25/08/2024 - 31/08/2024",
        "тиждень:25.08.2024–31.08.2024",
    ] {
        let text = format!("{header}\n\nДень 2\n1. Жим\n80 кг × 12");
        let workouts = parse_history(&text, &SequentialIds::default())?;
        assert_eq!(workouts.len(), 1, "{header}");
        assert_eq!(workouts[0].date, date(2024, 8, 26));
    }
    Ok(())
}

#[test]
fn test_history_without_week_header_fails() {
    let ids = SequentialIds::default();
    assert_eq!(parse_history("", &ids), Err(FormatError::NoWeekHeaders));

    let err = parse_history("Invalid text without week format\nДень 1\n1. Жим\n80 кг × 5", &ids)
        .unwrap_err();
    assert!(err.to_string().contains("no week headers found"));
    assert!(err.to_string().contains("Тиждень"));
}

#[test]
fn test_history_week_without_days_is_empty_not_error() -> Result<()> {
    let workouts = parse_history(
        "Тиждень: 25.08.2024 - 31.08.2024\nнічого не робив",
        &SequentialIds::default(),
    )?;
    assert!(workouts.is_empty());
    Ok(())
}

#[test]
fn test_history_exercise_ids_unique() -> Result<()> {
    let workouts = parse_history(import_example(), &SequentialIds::new("h"))?;
    let ids: Vec<&str> = workouts
        .iter()
        .flat_map(|w| w.exercises.iter().map(|e| e.exercise_id.as_str()))
        .collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
    assert!(ids.iter().all(|id| id.starts_with("h-")));
    Ok(())
}

#[test]
fn test_import_example_parses() -> Result<()> {
    let example = import_example();
    assert!(example.starts_with("Тиждень:"));

    let workouts = parse_history(example, &UuidIds)?;
    assert!(workouts.len() >= 3);
    let bodyweight_sets = workouts
        .iter()
        .flat_map(|w| &w.exercises)
        .flat_map(|e| &e.sets)
        .filter(|s| s.is_bodyweight())
        .count();
    assert!(bodyweight_sets > 0);
    Ok(())
}

#[test]
fn test_format_history_workout() -> Result<()> {
    let workout = parse_history(
        "Тиждень: 25.08.2024 - 31.08.2024
День 1
1. Присідання зі штангою – 3×8-12
100 кг × 12
52,5 кг × 10
2. Віджимання від підлоги
20
18",
        &SequentialIds::default(),
    )?
    .remove(0);

    let rendered = format_history_workout(&workout, text::DEFAULT_DATE_FORMAT);
    assert!(rendered.starts_with("Дата: 25.08.2024\nДень 1\n"));
    assert!(rendered.contains("1. Присідання зі штангою\n"));
    assert!(rendered.contains("   100 кг × 12\n"));
    assert!(rendered.contains("   52.5 кг × 10\n"));
    assert!(rendered.contains("2. Віджимання від підлоги\n   20\n   18\n"));
    Ok(())
}

#[test]
fn test_formatted_history_reparses_to_same_sets() -> Result<()> {
    let workouts = parse_history(import_example(), &SequentialIds::default())?;
    let first = &workouts[0];
    let rendered = format!(
        "Тиждень: 25.08.2024 - 31.08.2024\n{}",
        format_history_workout(first, text::DEFAULT_DATE_FORMAT)
    );
    let reparsed = parse_history(&rendered, &SequentialIds::default())?;

    assert_eq!(reparsed.len(), 1);
    for (a, b) in first.exercises.iter().zip(&reparsed[0].exercises) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.sets, b.sets);
    }
    Ok(())
}

#[test]
fn test_completed_exercise_analytics() -> Result<()> {
    let workouts = parse_history(
        "Тиждень: 25.08.2024 - 31.08.2024\nДень 1\n1. Жим\n100 кг × 10\n80 кг × 5\n12",
        &SequentialIds::default(),
    )?;
    let exercise = &workouts[0].exercises[0];
    assert_eq!(exercise.total_volume(), 1400.0);
    assert_eq!(exercise.max_weight(), 100.0);
    assert_eq!(workouts[0].total_sets(), 3);
    Ok(())
}

// --- Prompt summaries ---

#[test]
fn test_history_summary_empty_and_stale() -> Result<()> {
    let config = SummaryConfig::default();
    let today = date(2024, 12, 1);
    assert_eq!(
        format_history_summary(&[], today, &config, text::DEFAULT_DATE_FORMAT),
        gymtext_lib::summary::NO_HISTORY
    );

    let workouts = parse_history(import_example(), &SequentialIds::default())?;
    let stale = format_history_summary(&workouts, today, &config, text::DEFAULT_DATE_FORMAT);
    assert!(stale.contains("за останні 2 міс. відсутня"));
    Ok(())
}

#[test]
fn test_history_summary_groups_and_limits() -> Result<()> {
    let workouts = parse_history(import_example(), &SequentialIds::default())?;
    let config = SummaryConfig {
        lookback_months: 2,
        max_records_per_exercise: 5,
        max_recent_workouts: 2,
    };
    let summary =
        format_history_summary(&workouts, date(2024, 9, 10), &config, text::DEFAULT_DATE_FORMAT);

    assert!(summary.starts_with(&format!("Всього тренувань за останні 2 міс.: {}", workouts.len())));
    // Most recent occurrence of squats is listed first.
    let squats = summary.find("▸ Присідання зі штангою:").unwrap();
    let newer = summary.find("01.09.2024: 102.5кг×12").unwrap();
    let older = summary.find("25.08.2024: 100кг×12").unwrap();
    assert!(squats < newer && newer < older);
    assert!(summary.contains("  27.08.2024: 0кг×20, 0кг×18, 0кг×15\n"));

    let recent_section = &summary[summary.find("ОСТАННІ ТРЕНУВАННЯ").unwrap()..];
    assert_eq!(recent_section.matches("\nДата: ").count(), 2);
    assert!(recent_section.contains("Дата: 02.09.2024 (День 2):"));
    Ok(())
}

#[test]
fn test_plan_summary() -> Result<()> {
    let plan = WeeklyPlan::from_text(
        date(2024, 9, 2),
        date(2024, 9, 8),
        "День 1\n1. Жим\nсуперсет 4 підходи по 6-8\n2. Тяга\n3 підходи по 10",
        &SequentialIds::default(),
    );
    let summary = format_plan_summary(&plan, text::DEFAULT_DATE_FORMAT);
    assert!(summary.starts_with("Тиждень: 02.09.2024 - 08.09.2024\n\nДЕНЬ 1:\n"));
    assert!(summary.contains("1. Жим\n   4 підходи по 6-8\n   Тип: Суперсет\n"));
    assert!(summary.contains("2. Тяга\n   3 підходи по 10\n"));
    Ok(())
}

// --- Ids and config ---

#[test]
fn test_sequential_ids() {
    let ids = SequentialIds::new("ex");
    assert_eq!(ids.next_id(), "ex-1");
    assert_eq!(ids.next_id(), "ex-2");
}

#[test]
fn test_config_round_trip_and_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");

    let loaded = gymtext_lib::load_config_util(&path)?;
    assert_eq!(loaded, Config::default());
    assert!(path.exists());

    let custom = Config {
        id_strategy: IdStrategy::Uuid,
        date_format: "%Y-%m-%d".to_string(),
        ..Default::default()
    };
    gymtext_lib::save_config_util(&path, &custom)?;
    assert_eq!(gymtext_lib::load_config_util(&path)?, custom);
    Ok(())
}

#[test]
fn test_config_partial_file_uses_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "id_strategy = \"uuid\"\n[summary]\nmax_recent_workouts = 3\n")?;

    let config = gymtext_lib::load_config_util(&path)?;
    assert_eq!(config.id_strategy, IdStrategy::Uuid);
    assert_eq!(config.summary.max_recent_workouts, 3);
    assert_eq!(config.summary.lookback_months, 2);
    assert_eq!(config.date_format, text::DEFAULT_DATE_FORMAT);
    Ok(())
}

#[test]
fn test_config_rejects_invalid_values() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");

    std::fs::write(&path, "date_format = \"%Q\"\n")?;
    assert!(matches!(
        gymtext_lib::load_config_util(&path),
        Err(ConfigError::InvalidDateFormat(_))
    ));

    std::fs::write(&path, "[summary]\nlookback_months = 0\n")?;
    assert!(matches!(
        gymtext_lib::load_config_util(&path),
        Err(ConfigError::InvalidSummaryLimit("lookback_months"))
    ));

    assert!(matches!(
        gymtext_lib::parse_color("ultraviolet"),
        Err(ConfigError::InvalidColor(_))
    ));
    Ok(())
}

#[test]
fn test_app_service_uses_config() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut service = gymtext_lib::AppService {
        config: Config::default(),
        config_path: dir.path().join("config.toml"),
    };

    service.set_date_format("%Y-%m-%d")?;
    service.set_id_strategy(IdStrategy::Uuid)?;
    assert!(service.set_date_format("%Q").is_err());
    assert!(service.set_header_color("DarkCyan").is_ok());

    let reloaded = gymtext_lib::load_config_util(service.get_config_path())?;
    assert_eq!(reloaded.date_format, "%Y-%m-%d");
    assert_eq!(reloaded.id_strategy, IdStrategy::Uuid);
    assert_eq!(reloaded.theme.header_color, "DarkCyan");

    let workouts = service.parse_history(import_example())?;
    let rendered = service.format_history_workout(&workouts[0]);
    assert!(rendered.starts_with("Дата: 2024-08-25\n"));
    assert!(!workouts[0].exercises[0].exercise_id.starts_with("ex-"));

    let plan = service.parse_weekly_plan(date(2024, 9, 2), date(2024, 9, 8), "День 1\n1. Жим");
    assert!(service.plan_summary(&plan).starts_with("Тиждень: 2024-09-02 - 2024-09-08"));
    assert_eq!(service.parse_plan("").len(), 0);
    Ok(())
}

#[test]
fn test_history_headers_with_letter_glyph_keep_their_sets() -> Result<()> {
    let text = "Тиждень: 25.08.2024 - 31.08.2024
День 3
1. Віджимання – 3 x макс
20
18
2. Підтягування – 3 х макс
10
8
3. Жим – 3 х 10
2. 60 кг x 10
60 кг х 9";
    let workouts = parse_history(text, &SequentialIds::default())?;

    assert_eq!(workouts.len(), 1);
    let summary: Vec<(&str, usize)> = workouts[0]
        .exercises
        .iter()
        .map(|e| (e.name.as_str(), e.sets.len()))
        .collect();
    assert_eq!(summary, vec![("Віджимання", 2), ("Підтягування", 2), ("Жим", 2)]);
    assert_eq!(workouts[0].exercises[2].sets[0].weight, 60.0);

    // The plan parser reads the same header the same way.
    let plan = parse_plan("День 1\n1. Віджимання – 3 x макс", &SequentialIds::default());
    assert_eq!(plan[0].exercises[0].name, "Віджимання");
    Ok(())
}

#[test]
fn test_date_format_with_time_fields_is_rejected() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut service = gymtext_lib::AppService {
        config: Config::default(),
        config_path: dir.path().join("config.toml"),
    };

    assert!(matches!(
        service.set_date_format("%d.%m.%Y %H:%M"),
        Err(ConfigError::InvalidDateFormat(_))
    ));
    assert_eq!(service.config.date_format, text::DEFAULT_DATE_FORMAT);

    let path = dir.path().join("config.toml");
    std::fs::write(&path, "date_format = \"%Y-%m-%d %H:%M\"\n")?;
    assert!(matches!(
        gymtext_lib::load_config_util(&path),
        Err(ConfigError::InvalidDateFormat(_))
    ));
    Ok(())
}

#[test]
fn test_exercise_kind_from_str() -> Result<()> {
    use strum::IntoEnumIterator;

    for kind in ExerciseKind::iter() {
        assert_eq!(ExerciseKind::try_from(kind.to_string().as_str())?, kind);
    }
    assert_eq!(ExerciseKind::try_from(" Суперсет ")?, ExerciseKind::Superset);
    assert_eq!(ExerciseKind::try_from("дропсет")?, ExerciseKind::Dropset);

    let err = ExerciseKind::try_from("giant").unwrap_err();
    assert!(err.to_string().contains("Valid kinds: normal, superset, dropset"));
    Ok(())
}

#[test]
fn test_summary_of_import_without_workouts() -> Result<()> {
    let service = gymtext_lib::AppService {
        config: Config::default(),
        config_path: std::path::PathBuf::from("config.toml"),
    };
    let workouts = service.parse_history("Тиждень: 25.08.2024 - 31.08.2024\nДень 1\nвідпочинок")?;
    assert!(workouts.is_empty());
    assert_eq!(
        service.history_summary(&workouts, date(2024, 9, 1)),
        gymtext_lib::summary::NO_HISTORY
    );
    Ok(())
}
