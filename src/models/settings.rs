use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{Result, TimesheetError};
use crate::models::timesheet::{DateRange, EmployeeInfo, HolidayRecord, WorkHours};

/// User-maintained list of holidays
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct HolidayStore {
    records: Vec<HolidayRecord>,
}

impl HolidayStore {
    /// Add a holiday unless the exact same one is already listed.
    /// Returns whether the list changed.
    pub fn add(&mut self, date: NaiveDate, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TimesheetError::EmptyHolidayName);
        }

        let record = HolidayRecord::new(date, name);
        if self.records.contains(&record) {
            return Ok(false);
        }

        info!("Added holiday: {} on {}", name, date);
        self.records.push(record);
        Ok(true)
    }

    pub fn clear(&mut self) {
        info!("Clearing {} holiday(s)", self.records.len());
        self.records.clear();
    }

    pub fn list(&self) -> &[HolidayRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Holidays falling inside `range`, keyed by date.
    ///
    /// Records with an unparseable date or a missing name are skipped.
    pub fn resolve(&self, range: &DateRange) -> BTreeMap<NaiveDate, String> {
        let mut resolved = BTreeMap::new();
        for record in &self.records {
            match record.parse() {
                Some(holiday) if range.contains(holiday.date) => {
                    resolved.insert(holiday.date, holiday.name);
                }
                Some(_) => {}
                None => warn!("Skipping invalid holiday entry: {:?}", record),
            }
        }
        resolved
    }
}

/// Session configuration handed to the builder on every run.
///
/// Loaded once at startup and only written back on an explicit save.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub work_hours: WorkHours,
    pub holidays: HolidayStore,
    pub employee: EmployeeInfo,
}

impl Settings {
    /// Read settings from `path`, falling back to defaults if the file does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => {
                let settings: Settings = serde_json::from_str(&content).map_err(|e| {
                    TimesheetError::Settings(format!("{}: {}", path.display(), e))
                })?;
                info!(
                    "Loaded settings from {} with {} holiday(s)",
                    path.display(),
                    settings.holidays.len()
                );
                Ok(settings)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No settings file at {}, using defaults", path.display());
                Ok(Settings::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_ignores_exact_duplicates() {
        let mut store = HolidayStore::default();
        assert!(store.add(date(2025, 3, 14), "Holi").unwrap());
        assert!(!store.add(date(2025, 3, 14), "Holi").unwrap());
        assert!(store.add(date(2025, 3, 14), "Holi (observed)").unwrap());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn add_rejects_blank_name() {
        let mut store = HolidayStore::default();
        assert!(store.add(date(2025, 3, 14), "  ").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn resolve_filters_range_and_skips_bad_records() {
        let store: HolidayStore = serde_json::from_str(
            r#"[
                {"date": "2025-03-14", "name": "Holi"},
                {"date": "2025-04-18", "name": "Good Friday"},
                {"date": "14.03.2025", "name": "Broken"},
                {"name": "No date"},
                {"date": "2025-03-03"}
            ]"#,
        )
        .unwrap();

        let range = DateRange::new(date(2025, 3, 1), date(2025, 3, 31)).unwrap();
        let resolved = store.resolve(&range);

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.get(&date(2025, 3, 14)).map(String::as_str), Some("Holi"));
    }

    #[test]
    fn settings_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        assert_eq!(Settings::load(&path).unwrap(), Settings::default());

        let mut settings = Settings::default();
        settings.work_hours.start = "9:00 AM".to_string();
        settings.holidays.add(date(2025, 12, 25), "Christmas").unwrap();
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn corrupt_settings_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Settings::load(&path),
            Err(TimesheetError::Settings(_))
        ));
    }
}
