use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::models::NOT_INFORMED;

// ── DateProcessor ─────────────────────────────────────────────────────────────

/// Parses service dates written day-first, the way Brazilian spreadsheets
/// store them.
pub struct DateProcessor;

impl DateProcessor {
    /// Parse `s` into a calendar date, or `None` if it is not a date.
    ///
    /// Accepted shapes, each optionally followed by a time of day separated
    /// by a space (or `T` for the ISO form):
    /// * `DD/MM/YYYY`, `DD-MM-YYYY`, `DD.MM.YYYY` and their two-digit-year
    ///   variants
    /// * `YYYY-MM-DD`, which is what native workbook date cells render as
    ///
    /// A time part that is present but malformed rejects the whole value.
    pub fn parse(s: &str) -> Option<NaiveDate> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }

        let (date_part, time_part) = match trimmed.find([' ', 'T']) {
            Some(idx) => (&trimmed[..idx], Some(trimmed[idx + 1..].trim())),
            None => (trimmed, None),
        };

        if let Some(time) = time_part {
            if !Self::is_time_of_day(time) {
                return None;
            }
        }

        if let Some(caps) = iso_pattern().captures(date_part) {
            let year = caps[1].parse().ok()?;
            let month = caps[2].parse().ok()?;
            let day = caps[3].parse().ok()?;
            return NaiveDate::from_ymd_opt(year, month, day);
        }

        let caps = day_first_pattern().captures(date_part)?;
        let day = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let year_text = &caps[3];
        let year: i32 = year_text.parse().ok()?;
        let year = if year_text.len() == 2 {
            expand_two_digit_year(year)
        } else {
            year
        };
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn is_time_of_day(s: &str) -> bool {
        const FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];
        FORMATS
            .iter()
            .any(|fmt| NaiveTime::parse_from_str(s, fmt).is_ok())
    }
}

/// POSIX pivot: 69–99 are the 1900s, 00–68 the 2000s.
fn expand_two_digit_year(year: i32) -> i32 {
    if year >= 69 {
        1900 + year
    } else {
        2000 + year
    }
}

fn day_first_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4}|\d{2})$").expect("regex is valid")
    })
}

fn iso_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("regex is valid"))
}

// ── AmountProcessor ───────────────────────────────────────────────────────────

/// Coerces locale-formatted money cells into numbers.
pub struct AmountProcessor;

impl AmountProcessor {
    /// Parse `s` as a decimal amount written with a comma decimal separator.
    ///
    /// Every `,` is rewritten to `.` before parsing. Returns `None` when the
    /// result is not a finite number; callers fall back to zero.
    pub fn parse(s: &str) -> Option<f64> {
        let normalised = s.trim().replace(',', ".");
        if normalised.is_empty() {
            return None;
        }
        normalised.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Like [`AmountProcessor::parse`] but coerces failures to `0.0`.
    ///
    /// The boolean is `true` when the fallback was used.
    pub fn coerce(s: &str) -> (f64, bool) {
        match Self::parse(s) {
            Some(v) => (v, false),
            None => (0.0, true),
        }
    }
}

// ── TextNormalizer ────────────────────────────────────────────────────────────

/// Canonicalises categorical cells so equal values group together.
pub struct TextNormalizer;

impl TextNormalizer {
    /// Uppercase `s`, substituting [`NOT_INFORMED`] for blank input.
    ///
    /// Surrounding whitespace is dropped so `"dr a "` and `"DR A"` count as
    /// the same category.
    pub fn category(s: &str) -> String {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            NOT_INFORMED.to_string()
        } else {
            trimmed.to_uppercase()
        }
    }
}
