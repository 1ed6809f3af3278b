//! Grammars for typed conversation input.

use chrono::{NaiveDate, NaiveTime, Weekday};

/// Ends a cancellable conversation.
pub const CANCEL_KEYWORD: &str = "cancel";

/// Ends list input.
pub const DONE_KEYWORD: &str = "done";

/// Parses `dd.mm.yyyy` and renders it as `Weekday, dd.mm.yyyy`.
pub fn parse_date(input: &str) -> Option<String> {
    NaiveDate::parse_from_str(input.trim(), "%d.%m.%Y")
        .ok()
        .map(|date| date.format("%A, %d.%m.%Y").to_string())
}

/// Parses `HH:MM`, normalizing to two-digit hours.
pub fn parse_time(input: &str) -> Option<String> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .ok()
        .map(|time| time.format("%H:%M").to_string())
}

pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

/// Accepts full or abbreviated English weekday names.
pub fn parse_weekday(input: &str) -> Option<Weekday> {
    input.trim().parse::<Weekday>().ok()
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parses a 1-based menu choice into an index below `len`.
pub fn parse_choice(input: &str, len: usize) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|choice| (1..=len).contains(choice))
        .map(|choice| choice - 1)
}

/// Picks an option by 1-based number or by name, ignoring case.
pub fn pick<'a, S: AsRef<str>>(input: &str, options: &'a [S]) -> Option<&'a S> {
    if let Some(index) = parse_choice(input, options.len()) {
        return options.get(index);
    }
    options
        .iter()
        .find(|option| option.as_ref().eq_ignore_ascii_case(input.trim()))
}

pub fn is_keyword(input: &str, keyword: &str) -> bool {
    input.trim().eq_ignore_ascii_case(keyword)
}

/// Numbered list, one option per line.
pub fn numbered<S: AsRef<str>>(options: &[S]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("{}. {}", i + 1, option.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}
