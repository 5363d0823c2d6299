use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced by the timesheet library
#[derive(Debug, Error)]
pub enum TimesheetError {
    #[error("End date {end} must not be before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Holiday name must not be empty")]
    EmptyHolidayName,

    #[error("Failed to render spreadsheet: {0}")]
    Render(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to send email: {0}")]
    Email(#[from] resend_rs::Error),

    #[error("Email delivery is not configured")]
    EmailNotConfigured,

    #[error("Settings error: {0}")]
    Settings(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TimesheetError {
    /// Whether the error stems from user input rather than the system
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TimesheetError::InvalidRange { .. } | TimesheetError::EmptyHolidayName
        )
    }
}

pub type Result<T> = std::result::Result<T, TimesheetError>;
