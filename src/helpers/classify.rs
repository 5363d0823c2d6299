use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::helpers::calendar::is_weekend;
use crate::models::timesheet::DayStatus;

const HOLIDAY: &str = "holiday";
const LEAVE: &str = "leave";
const WEEKEND: &str = "weekend";

/// Classify one date. First matching rule wins:
///
/// 1. configured holiday on that date
/// 2. description starting with the word `holiday` (or `holidays`)
/// 3. description starting with the word `leave` (or `leaves`)
/// 4. description starting with the word `weekend` (or `weekends`), or a Saturday/Sunday
///    without a description
/// 5. anything else is a regular day
///
/// A Saturday or Sunday with a work description counts as a regular day,
/// and an explicit `weekend` marks any weekday as weekend.
pub fn classify(
    date: NaiveDate,
    description: &str,
    holidays: &BTreeMap<NaiveDate, String>,
) -> DayStatus {
    let description = description.trim();

    if let Some(name) = holidays.get(&date) {
        return DayStatus::Holiday(format!("Holiday - {}", name));
    }
    if starts_with_word(description, HOLIDAY) {
        return DayStatus::Holiday(label(description, "Holiday"));
    }
    if starts_with_word(description, LEAVE) {
        return DayStatus::Leave(label(description, "Leave"));
    }
    if starts_with_word(description, WEEKEND) || (description.is_empty() && is_weekend(date)) {
        return DayStatus::Weekend;
    }
    DayStatus::RegularDay
}

/// Whether a regular day's description should go through the summarizer.
///
/// Text that merely begins with one of the status keywords (`Leaving
/// notes for handover`) is kept verbatim.
pub fn should_summarize(description: &str) -> bool {
    let lower = description.trim().to_lowercase();
    !lower.is_empty() && ![HOLIDAY, LEAVE, WEEKEND].iter().any(|k| lower.starts_with(k))
}

/// Case-insensitive keyword match at the start of `description`, plural
/// allowed (`Holidays`, `leaves`), followed by a word boundary
fn starts_with_word(description: &str, keyword: &str) -> bool {
    let Some(head) = description.get(..keyword.len()) else {
        return false;
    };
    if !head.eq_ignore_ascii_case(keyword) {
        return false;
    }
    let rest = &description[keyword.len()..];
    let rest = rest.strip_prefix(['s', 'S']).unwrap_or(rest);
    !rest.starts_with(|c: char| c.is_alphanumeric())
}

fn label(description: &str, bare: &str) -> String {
    if description.len() > bare.len() {
        description.to_string()
    } else {
        bare.to_string()
    }
}
