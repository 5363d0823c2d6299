use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;

use crate::models::timesheet::DateRange;

/// Date format used for holidays in the settings file and the HTTP API
pub const ISO_DATE: &str = "%Y-%m-%d";

/// English ordinal suffix for a day of month (1st, 2nd, 3rd, 4th, 11th ...)
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// All dates from `start` to `end` inclusive. Empty when `end < start`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|date| *date <= end).collect()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `5th Mar 2025`
pub fn display_date(date: NaiveDate) -> String {
    format!(
        "{}{} {}",
        date.day(),
        ordinal_suffix(date.day()),
        date.format("%b %Y")
    )
}

/// `05 Mar 2025`, used in the document title
pub fn title_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Pre-filled description block offered before the user types anything.
///
/// One line per date in the form `5 Wed: `, with resolved holidays and
/// weekends already annotated.
pub fn default_description_text(range: &DateRange, holidays: &BTreeMap<NaiveDate, String>) -> String {
    range
        .dates()
        .into_iter()
        .map(|date| {
            let mut line = format!("{} {}: ", date.day(), date.format("%a"));
            if let Some(name) = holidays.get(&date) {
                line.push_str(&format!("Holiday - {}", name));
            } else if is_weekend(date) {
                line.push_str("Weekend");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ordinal_suffixes() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (30, "30th"),
            (31, "31st"),
        ];
        for (day, expected) in cases {
            assert_eq!(format!("{}{}", day, ordinal_suffix(day)), expected);
        }
    }

    #[test]
    fn date_range_is_inclusive_and_crosses_months() {
        let dates = date_range(date(2025, 2, 27), date(2025, 3, 2));
        assert_eq!(
            dates,
            vec![
                date(2025, 2, 27),
                date(2025, 2, 28),
                date(2025, 3, 1),
                date(2025, 3, 2)
            ]
        );
    }

    #[test]
    fn date_range_empty_when_reversed() {
        assert!(date_range(date(2025, 3, 2), date(2025, 3, 1)).is_empty());
    }

    #[test]
    fn display_formats() {
        assert_eq!(display_date(date(2025, 3, 22)), "22nd Mar 2025");
        assert_eq!(title_date(date(2025, 3, 5)), "05 Mar 2025");
    }

    #[test]
    fn default_text_marks_holidays_and_weekends() {
        // Thu 6 Mar 2025 .. Sun 9 Mar 2025
        let range = DateRange::new(date(2025, 3, 6), date(2025, 3, 9)).unwrap();
        let mut holidays = BTreeMap::new();
        holidays.insert(date(2025, 3, 7), "Founders Day".to_string());

        let text = default_description_text(&range, &holidays);
        assert_eq!(
            text,
            "6 Thu: \n7 Fri: Holiday - Founders Day\n8 Sat: Weekend\n9 Sun: Weekend"
        );
    }
}
