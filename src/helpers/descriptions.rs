//! Parsing of the free-text daily description block.
//!
//! Each line looks like `5 Mon: Fixed login bug`. Only the leading
//! day-of-month is used to find the date: it is matched against the first
//! date in the range with that day number, whatever its month. For a range
//! spanning two months, `3 Mon:` can therefore only ever reach the earlier
//! month's 3rd, and the later month's 3rd gets no description. This is kept
//! as-is because the intended behaviour for multi-month ranges is unclear.

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use tracing::debug;

/// Mapping from date to raw (trimmed) description
pub type DescriptionMap = HashMap<NaiveDate, String>;

/// Parse `text` against the ordered `dates` of the active range.
///
/// Lines without a colon, or whose first token before the colon is not an
/// integer, are ignored. A later line for the same day replaces an earlier one.
pub fn parse_descriptions(text: &str, dates: &[NaiveDate]) -> DescriptionMap {
    let mut descriptions = DescriptionMap::new();

    for line in text.lines() {
        let Some((prefix, description)) = line.split_once(':') else {
            continue;
        };

        let Some(day) = prefix
            .split_whitespace()
            .next()
            .and_then(|token| token.parse::<u32>().ok())
        else {
            debug!("Ignoring description line without a day number: {:?}", line);
            continue;
        };

        match dates.iter().find(|date| date.day() == day) {
            Some(date) => {
                descriptions.insert(*date, description.trim().to_string());
            }
            None => debug!("Day {} is not in the selected range, ignoring", day),
        }
    }

    descriptions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::calendar::date_range;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn maps_day_to_trimmed_description() {
        let dates = date_range(date(2025, 5, 1), date(2025, 5, 10));
        let map = parse_descriptions("5 Mon: Fixed login bug  ", &dates);
        assert_eq!(map.get(&date(2025, 5, 5)).map(String::as_str), Some("Fixed login bug"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn drops_lines_without_colon_or_day() {
        let dates = date_range(date(2025, 5, 1), date(2025, 5, 10));
        let text = "5 Mon Fixed login bug\nabc: test\n: nothing\n\n6 Tue: Code review";
        let map = parse_descriptions(text, &dates);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&date(2025, 5, 6)).map(String::as_str), Some("Code review"));
    }

    #[test]
    fn only_first_colon_splits() {
        let dates = date_range(date(2025, 5, 1), date(2025, 5, 10));
        let map = parse_descriptions("7: Meeting at 10:30 with QA", &dates);
        assert_eq!(
            map.get(&date(2025, 5, 7)).map(String::as_str),
            Some("Meeting at 10:30 with QA")
        );
    }

    #[test]
    fn day_outside_range_is_ignored() {
        let dates = date_range(date(2025, 5, 1), date(2025, 5, 10));
        let map = parse_descriptions("25 Sun: Deploy", &dates);
        assert!(map.is_empty());
    }

    #[test]
    fn multi_month_range_first_match_wins() {
        // both months contain a 3rd and a 5th, January wins
        let dates = date_range(date(2025, 1, 3), date(2025, 2, 5));
        let map = parse_descriptions("3 Mon: Sprint planning\n5 Wed: Release", &dates);
        assert_eq!(map.get(&date(2025, 1, 3)).map(String::as_str), Some("Sprint planning"));
        assert_eq!(map.get(&date(2025, 2, 3)), None);
        assert_eq!(map.get(&date(2025, 1, 5)).map(String::as_str), Some("Release"));
        assert_eq!(map.get(&date(2025, 2, 5)), None);
    }
}
