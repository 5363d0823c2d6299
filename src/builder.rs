use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::helpers::classify::{classify, should_summarize};
use crate::helpers::descriptions::parse_descriptions;
use crate::helpers::llm::Summarizer;
use crate::models::settings::Settings;
use crate::models::timesheet::{
    DateRange, DayRecord, DayStatus, EmployeeInfo, PreviewRow, TimesheetSummary,
};

const NO_SUMMARIZER: &str = "Summarizer unavailable, task descriptions kept as written";

/// Input for a single timesheet build
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TimesheetRequest {
    #[serde(default)]
    pub employee: Option<EmployeeInfo>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub descriptions: String,
}

/// Receives `(current, total)` once per processed date
pub trait ProgressReporter {
    fn report(&self, current: usize, total: usize);
}

impl<F: Fn(usize, usize)> ProgressReporter for F {
    fn report(&self, current: usize, total: usize) {
        self(current, total)
    }
}

/// Progress reporter that writes to the log
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report(&self, current: usize, total: usize) {
        info!("Processing date {}/{}", current, total);
    }
}

/// Result of a build: ordered day records plus any non-fatal warnings
#[derive(Debug, Clone)]
pub struct Timesheet {
    pub employee: EmployeeInfo,
    pub range: DateRange,
    pub records: Vec<DayRecord>,
    pub warnings: Vec<String>,
}

impl Timesheet {
    pub fn preview(&self) -> Vec<PreviewRow> {
        self.records.iter().map(DayRecord::preview).collect()
    }

    pub fn summary(&self) -> TimesheetSummary {
        TimesheetSummary::from_records(&self.records)
    }

    /// `timesheet_Rahul_R_20250301-20250331.xlsx`
    pub fn file_name(&self) -> String {
        format!(
            "timesheet_{}_{}-{}.xlsx",
            self.employee.name.replace(' ', "_"),
            self.range.start().format("%Y%m%d"),
            self.range.end().format("%Y%m%d")
        )
    }
}

/// Walks a date range and produces one [`DayRecord`] per date.
///
/// `summarizer` is optional: without one, task descriptions are kept as typed.
pub struct TimesheetBuilder<'a, S> {
    settings: &'a Settings,
    summarizer: Option<&'a S>,
}

impl<'a, S: Summarizer> TimesheetBuilder<'a, S> {
    pub fn new(settings: &'a Settings, summarizer: Option<&'a S>) -> Self {
        Self {
            settings,
            summarizer,
        }
    }

    pub async fn build<P: ProgressReporter>(
        &self,
        request: &TimesheetRequest,
        progress: &P,
    ) -> Result<Timesheet> {
        let range = DateRange::new(request.start_date, request.end_date)?;
        let employee = request
            .employee
            .clone()
            .unwrap_or_else(|| self.settings.employee.clone());

        info!(
            "Building timesheet for {} from {} to {}",
            employee.name,
            range.start(),
            range.end()
        );

        let dates = range.dates();
        let descriptions = parse_descriptions(&request.descriptions, &dates);
        let holidays = self.settings.holidays.resolve(&range);
        info!(
            "Parsed {} description(s), {} holiday(s) in range",
            descriptions.len(),
            holidays.len()
        );

        let mut records = Vec::with_capacity(dates.len());
        let mut warnings = Vec::new();
        let total = dates.len();

        for (i, date) in dates.into_iter().enumerate() {
            progress.report(i + 1, total);

            let description = descriptions.get(&date).map(String::as_str).unwrap_or("");
            let mut record = DayRecord::new(date, classify(date, description, &holidays));

            if record.status == DayStatus::RegularDay && !description.trim().is_empty() {
                record.hours = Some(self.settings.work_hours.clone());
                record.task = self.task_for(date, description, &mut warnings).await;
            }

            records.push(record);
        }

        info!("Built timesheet with {} day(s)", records.len());

        Ok(Timesheet {
            employee,
            range,
            records,
            warnings,
        })
    }

    async fn task_for(&self, date: NaiveDate, description: &str, warnings: &mut Vec<String>) -> String {
        if !should_summarize(description) {
            return description.to_string();
        }

        let Some(summarizer) = self.summarizer else {
            if !warnings.iter().any(|w| w == NO_SUMMARIZER) {
                warn!("{}", NO_SUMMARIZER);
                warnings.push(NO_SUMMARIZER.to_string());
            }
            return description.to_string();
        };

        match summarizer.summarize(description).await {
            Ok(summary) => summary,
            Err(e) => {
                let message = format!("Error summarizing task for {}: {:#}", date, e);
                warn!("{}", message);
                warnings.push(message);
                description.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    struct Shout;

    impl Summarizer for Shout {
        async fn summarize(&self, description: &str) -> anyhow::Result<String> {
            Ok(description.to_uppercase())
        }
    }

    struct Offline;

    impl Summarizer for Offline {
        async fn summarize(&self, _description: &str) -> anyhow::Result<String> {
            Err(anyhow!("connection refused"))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(start: NaiveDate, end: NaiveDate, descriptions: &str) -> TimesheetRequest {
        TimesheetRequest {
            employee: None,
            start_date: start,
            end_date: end,
            descriptions: descriptions.to_string(),
        }
    }

    #[tokio::test]
    async fn reversed_range_produces_nothing() {
        let settings = Settings::default();
        let calls = RefCell::new(0);
        let builder = TimesheetBuilder::new(&settings, Some(&Shout));

        let result = builder
            .build(
                &request(date(2025, 3, 9), date(2025, 3, 3), "3 Mon: work"),
                &|_: usize, _: usize| *calls.borrow_mut() += 1,
            )
            .await;

        assert!(result.unwrap_err().is_validation());
        assert_eq!(*calls.borrow(), 0);
    }

    #[tokio::test]
    async fn summarizer_output_becomes_task() {
        let settings = Settings::default();
        let builder = TimesheetBuilder::new(&settings, Some(&Shout));

        let sheet = builder
            .build(
                &request(date(2025, 3, 3), date(2025, 3, 3), "3 Mon: fixed login bug"),
                &LogProgress,
            )
            .await
            .unwrap();

        assert_eq!(sheet.records[0].task, "FIXED LOGIN BUG");
        assert_eq!(sheet.records[0].start_time(), "7:30 AM");
        assert!(sheet.warnings.is_empty());
    }

    #[tokio::test]
    async fn failing_summarizer_passes_description_through() {
        let settings = Settings::default();
        let builder = TimesheetBuilder::new(&settings, Some(&Offline));

        let sheet = builder
            .build(
                &request(date(2025, 3, 3), date(2025, 3, 4), "3 Mon: Fixed login bug\n4 Tue: Code review"),
                &LogProgress,
            )
            .await
            .unwrap();

        assert_eq!(sheet.records[0].task, "Fixed login bug");
        assert_eq!(sheet.records[1].task, "Code review");
        assert_eq!(sheet.records[0].status, DayStatus::RegularDay);
        assert_eq!(sheet.warnings.len(), 2);
    }

    #[tokio::test]
    async fn missing_summarizer_warns_once() {
        let settings = Settings::default();
        let builder = TimesheetBuilder::<Offline>::new(&settings, None);

        let sheet = builder
            .build(
                &request(date(2025, 3, 3), date(2025, 3, 4), "3 Mon: Fixed login bug\n4 Tue: Code review"),
                &LogProgress,
            )
            .await
            .unwrap();

        assert_eq!(sheet.records[1].task, "Code review");
        assert_eq!(sheet.warnings.len(), 1);
    }

    #[tokio::test]
    async fn empty_weekday_is_regular_without_hours() {
        let settings = Settings::default();
        let builder = TimesheetBuilder::new(&settings, Some(&Shout));

        let sheet = builder
            .build(&request(date(2025, 3, 3), date(2025, 3, 3), ""), &LogProgress)
            .await
            .unwrap();

        let record = &sheet.records[0];
        assert_eq!(record.status, DayStatus::RegularDay);
        assert_eq!(record.hours, None);
        assert_eq!(record.task, "");
        assert_eq!(record.preview().task, "N/A");
    }

    #[tokio::test]
    async fn progress_reports_every_date() {
        let settings = Settings::default();
        let builder = TimesheetBuilder::new(&settings, Some(&Shout));
        let seen = RefCell::new(Vec::new());

        builder
            .build(
                &request(date(2025, 3, 30), date(2025, 4, 2), ""),
                &|current: usize, total: usize| seen.borrow_mut().push((current, total)),
            )
            .await
            .unwrap();

        assert_eq!(*seen.borrow(), vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
    }

    #[test]
    fn file_name_embeds_name_and_range() {
        let sheet = Timesheet {
            employee: EmployeeInfo::default(),
            range: DateRange::new(date(2025, 3, 1), date(2025, 3, 31)).unwrap(),
            records: Vec::new(),
            warnings: Vec::new(),
        };
        assert_eq!(sheet.file_name(), "timesheet_Rahul_R_20250301-20250331.xlsx");
    }
}
