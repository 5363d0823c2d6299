use resend_rs::{
    Resend,
    types::{Attachment, CreateEmailBaseOptions, CreateEmailResponse},
};
use tracing::{error, info};

use crate::builder::Timesheet;
use crate::helpers::calendar::title_date;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Where generated timesheets get mailed
#[derive(Clone)]
pub struct Mailer {
    pub resend: Resend,
    pub from: String,
    pub manager: String,
}

impl Mailer {
    pub fn new(api_key: &str, from: impl Into<String>, manager: impl Into<String>) -> Self {
        Self {
            resend: Resend::new(api_key),
            from: from.into(),
            manager: manager.into(),
        }
    }
}

pub fn timesheet_subject(sheet: &Timesheet) -> String {
    format!(
        "Timesheet {} to {} - {}",
        title_date(sheet.range.start()),
        title_date(sheet.range.end()),
        sheet.employee.name
    )
}

pub async fn send_timesheet_email(
    mailer: &Mailer,
    sheet: &Timesheet,
    workbook: Vec<u8>,
) -> Result<CreateEmailResponse, resend_rs::Error> {
    let subject = timesheet_subject(sheet);
    let summary = sheet.summary();

    info!("Preparing email with subject: {}", &subject);
    info!("Timesheet attachment size: {} bytes", workbook.len());

    let body = format!(
        "{}\n\nTotal days: {}\nWorking days: {}\nHolidays: {}\nLeave days: {}\nWeekends: {}",
        subject,
        summary.total_days,
        summary.working_days,
        summary.holidays,
        summary.leave_days,
        summary.weekends
    );

    let email = CreateEmailBaseOptions::new(&mailer.from, [mailer.manager.as_str()], &subject)
        .with_text(&body)
        .with_attachment(
            Attachment::from_content(workbook)
                .with_filename(&sheet.file_name())
                .with_content_type(XLSX_CONTENT_TYPE),
        );

    let result = mailer.resend.emails.send(email).await;
    match &result {
        Ok(response) => info!("Timesheet email sent successfully with ID: {}", response.id),
        Err(e) => error!("Failed to send timesheet email: {}", e),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timesheet::{DateRange, EmployeeInfo};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn subject_names_range_and_employee() {
        let sheet = Timesheet {
            employee: EmployeeInfo::default(),
            range: DateRange::new(
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            )
            .unwrap(),
            records: Vec::new(),
            warnings: Vec::new(),
        };
        assert_eq!(
            timesheet_subject(&sheet),
            "Timesheet 01 Mar 2025 to 31 Mar 2025 - Rahul R"
        );
    }
}
