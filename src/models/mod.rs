pub mod settings;
pub mod timesheet;
