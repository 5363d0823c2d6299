pub mod calendar;
pub mod classify;
pub mod descriptions;
pub mod email;
pub mod llm;
pub mod xlsx;
