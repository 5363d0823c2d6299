//! Timesheet Generator Library
//!
//! This library turns a free-text daily work log and a date range into a
//! spreadsheet timesheet, classifying each day as a regular day, weekend,
//! holiday or leave and summarizing task descriptions with a local LLM.

pub mod builder;
pub mod config;
pub mod error;
pub mod helpers;
pub mod models;
pub mod service;

pub use builder::{LogProgress, ProgressReporter, Timesheet, TimesheetBuilder, TimesheetRequest};
pub use error::{Result, TimesheetError};
pub use service::TimesheetService;

// Re-export key types for convenience
pub use helpers::llm::{OllamaSummarizer, Summarizer};
pub use models::settings::{HolidayStore, Settings};
pub use models::timesheet::{DayRecord, DayStatus, EmployeeInfo, WorkHours};
