use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TimesheetError};
use crate::helpers::calendar;

/// Employee details shown in the document header
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EmployeeInfo {
    pub name: String,
    pub designation: String,
    pub department: String,
    pub employee_id: String,
}

impl Default for EmployeeInfo {
    fn default() -> Self {
        Self {
            name: "Rahul R".to_string(),
            designation: "Software Engineer".to_string(),
            department: "Engineering".to_string(),
            employee_id: "EMP123".to_string(),
        }
    }
}

/// Default hours copied onto every regular working day. Free-form, never validated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WorkHours {
    pub start: String,
    pub end: String,
    pub duration: String,
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            start: "7:30 AM".to_string(),
            end: "3:30 PM".to_string(),
            duration: "8 Hrs".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

/// A holiday as kept in the settings file.
///
/// Fields stay raw so a hand-edited file with a bad date or a missing key
/// still loads; such records are skipped when holidays are resolved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct HolidayRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl HolidayRecord {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date: Some(date.format(calendar::ISO_DATE).to_string()),
            name: Some(name.into()),
        }
    }

    /// Parsed form of the record, `None` when the date or name is unusable
    pub fn parse(&self) -> Option<Holiday> {
        let date = NaiveDate::parse_from_str(self.date.as_deref()?, calendar::ISO_DATE).ok()?;
        let name = self.name.clone()?;
        Some(Holiday { date, name })
    }
}

/// Inclusive range of calendar dates, guaranteed `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(TimesheetError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date in the range, ascending, both endpoints included
    pub fn dates(&self) -> Vec<NaiveDate> {
        calendar::date_range(self.start, self.end)
    }
}

/// Classification of a single day.
///
/// `Holiday` and `Leave` carry the exact label written to the status column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayStatus {
    RegularDay,
    Weekend,
    Holiday(String),
    Leave(String),
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayStatus::RegularDay => f.write_str("Regular Day"),
            DayStatus::Weekend => f.write_str("Weekend"),
            DayStatus::Holiday(label) | DayStatus::Leave(label) => f.write_str(label),
        }
    }
}

/// One row of the timesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub weekday_name: String,
    pub status: DayStatus,
    /// Only set for regular days with a description
    pub hours: Option<WorkHours>,
    pub task: String,
}

impl DayRecord {
    pub fn new(date: NaiveDate, status: DayStatus) -> Self {
        Self {
            date,
            weekday_name: date.format("%a").to_string(),
            status,
            hours: None,
            task: String::new(),
        }
    }

    pub fn date_display(&self) -> String {
        calendar::display_date(self.date)
    }

    pub fn start_time(&self) -> &str {
        self.hours.as_ref().map_or("", |h| h.start.as_str())
    }

    pub fn end_time(&self) -> &str {
        self.hours.as_ref().map_or("", |h| h.end.as_str())
    }

    pub fn duration(&self) -> &str {
        self.hours.as_ref().map_or("", |h| h.duration.as_str())
    }

    pub fn preview(&self) -> PreviewRow {
        PreviewRow {
            date: self.date_display(),
            day: self.weekday_name.clone(),
            status: self.status.to_string(),
            task: if self.task.is_empty() {
                "N/A".to_string()
            } else {
                self.task.clone()
            },
        }
    }
}

/// Lightweight projection of a [`DayRecord`] for display
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    pub date: String,
    pub day: String,
    pub status: String,
    pub task: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimesheetSummary {
    pub total_days: usize,
    pub working_days: usize,
    pub holidays: usize,
    pub leave_days: usize,
    pub weekends: usize,
}

impl TimesheetSummary {
    pub fn from_records(records: &[DayRecord]) -> Self {
        let mut summary = TimesheetSummary {
            total_days: records.len(),
            ..Default::default()
        };

        for record in records {
            match record.status {
                DayStatus::RegularDay => summary.working_days += 1,
                DayStatus::Weekend => summary.weekends += 1,
                DayStatus::Holiday(_) => summary.holidays += 1,
                DayStatus::Leave(_) => summary.leave_days += 1,
            }
        }

        summary
    }
}
