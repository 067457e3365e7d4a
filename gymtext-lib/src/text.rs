//src/text.rs
//! Text normalization and the marker-based segmentation shared by the plan
//! and history parsers.
//!
//! Both formats nest the same way: week header -> `День N` marker ->
//! numbered exercise lines. Each level is cut out by [`segment_by_marker`],
//! which turns every marker match into a span running up to the next match.

use chrono::NaiveDate;
use regex::{Captures, Regex};
use std::fmt::Write;
use std::sync::LazyLock;
use tracing::{debug, warn};

// Words of the input language, reused by the formatters.
pub const DAY_WORD: &str = "День";
pub const WEEK_WORD: &str = "Тиждень";
pub const WEIGHT_UNIT: &str = "кг";
pub const SETS_OF: &str = "підходи по";
pub const SUPERSET_LABEL: &str = "Суперсет";
pub const DROPSET_LABEL: &str = "Дропсет";

/// Same shape as the `uk-UA` short date: 25.08.2024.
pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

// Patterns are compiled once. A pattern that fails to compile is stored as
// None and behaves as "never matches".
static BLANK_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\n{3,}").ok());

// Word boundary keeps "Тиждень 2" from reading as a day marker.
static DAY_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\bдень\s+([0-9]+)").ok());

static WEEK_HEADER: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Тиждень: 25.08.2024 - 31.08.2024 (also 25-08-2024, 25/08/2024)
    Regex::new(
        r"(?i)тиждень:\s*([0-9]{1,2})[./-]([0-9]{1,2})[./-]([0-9]{4})\s*[-–]\s*([0-9]{1,2})[./-]([0-9]{1,2})[./-]([0-9]{4})",
    )
    .ok()
});

static EXERCISE_HEADER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.\s+(.+?)(?:\s+[–—-]\s*(.*))?$").ok());

/// CRLF -> LF, runs of 3+ newlines -> one blank line, outer whitespace trimmed.
/// Applying it twice gives the same text as applying it once.
pub fn normalize(text: &str) -> String {
    let unix = text.replace("\r\n", "\n");
    let collapsed = match BLANK_RUN.as_ref() {
        Some(re) => re.replace_all(&unix, "\n\n").into_owned(),
        None => unix,
    };
    collapsed.trim().to_string()
}

/// One marker match plus the text it owns.
#[derive(Debug)]
pub struct Segment<'t> {
    pub marker: Captures<'t>,
    /// From the start of this marker to the start of the next one, or to the
    /// end of the text for the last marker.
    pub text: &'t str,
}

/// Splits `text` at every match of `marker`. Text before the first match is
/// not part of any segment.
pub fn segment_by_marker<'t>(text: &'t str, marker: &Regex) -> Vec<Segment<'t>> {
    let mut segments = Vec::new();
    let mut matches = marker.captures_iter(text).peekable();

    while let Some(caps) = matches.next() {
        let start = caps.get(0).map_or(0, |m| m.start());
        let end = matches
            .peek()
            .and_then(|next| next.get(0))
            .map_or(text.len(), |m| m.start());
        segments.push(Segment {
            marker: caps,
            text: &text[start..end],
        });
    }

    segments
}

fn capture_u32(caps: &Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBlock<'t> {
    pub number: u32,
    pub text: &'t str,
}

/// Cuts text at `День N` markers. Markers numbered 0 (or too large for u32)
/// are dropped together with their span.
pub fn segment_days(text: &str) -> Vec<DayBlock<'_>> {
    let Some(marker) = DAY_MARKER.as_ref() else {
        return Vec::new();
    };

    segment_by_marker(text, marker)
        .into_iter()
        .filter_map(|segment| match capture_u32(&segment.marker, 1) {
            Some(number) if number > 0 => Some(DayBlock {
                number,
                text: segment.text,
            }),
            _ => {
                debug!(marker = &segment.marker[0], "Skipping day marker without a usable number");
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekBlock<'t> {
    pub start: NaiveDate,
    /// None when the end date is not a real calendar date; only `start` is
    /// used for date math.
    pub end: Option<NaiveDate>,
    pub text: &'t str,
}

fn capture_date(caps: &Captures<'_>, first: usize) -> Option<NaiveDate> {
    let day = capture_u32(caps, first)?;
    let month = capture_u32(caps, first + 1)?;
    let year = caps.get(first + 2)?.as_str().parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Returns None when the text holds no week header at all, so the caller can
/// tell "no headers" apart from "headers with unusable dates".
pub fn segment_weeks(text: &str) -> Option<Vec<WeekBlock<'_>>> {
    let marker = WEEK_HEADER.as_ref()?;
    let segments = segment_by_marker(text, marker);
    if segments.is_empty() {
        return None;
    }

    let weeks = segments
        .into_iter()
        .filter_map(|segment| {
            let Some(start) = capture_date(&segment.marker, 1) else {
                warn!(header = &segment.marker[0], "Skipping week with an invalid start date");
                return None;
            };
            Some(WeekBlock {
                start,
                end: capture_date(&segment.marker, 4),
                text: segment.text,
            })
        })
        .collect();
    Some(weeks)
}

/// A `N. Name – detail` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseHeader<'l> {
    pub name: &'l str,
    pub detail: Option<&'l str>,
}

/// Matches `<int>. <name>` with an optional ` – <detail>` tail. The dash must
/// follow whitespace, so hyphenated names like "Т-тяга" stay whole.
pub fn split_exercise_header(line: &str) -> Option<ExerciseHeader<'_>> {
    let caps = EXERCISE_HEADER.as_ref()?.captures(line)?;
    let name = caps.get(2)?.as_str().trim();
    let detail = caps
        .get(3)
        .map(|m| m.as_str().trim())
        .filter(|d| !d.is_empty());
    Some(ExerciseHeader { name, detail })
}

/// A pattern is valid when it renders a plain date. Unknown specifiers and
/// time fields (`%H`, `%M`, ...) fail, since there is no time to print.
pub fn is_valid_date_format(pattern: &str) -> bool {
    let Some(sample) = NaiveDate::from_ymd_opt(2024, 8, 25) else {
        return false;
    };
    let mut out = String::new();
    write!(out, "{}", sample.format(pattern)).is_ok()
}

/// Formats with `pattern`, falling back to [`DEFAULT_DATE_FORMAT`] when the
/// pattern is not a valid strftime string.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        out.clear();
        let _ = write!(out, "{}", date.format(DEFAULT_DATE_FORMAT));
    }
    out
}
