use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::info;

use crate::builder::Timesheet;
use crate::error::Result;
use crate::helpers::calendar::title_date;
use crate::models::timesheet::{DayRecord, DayStatus};

const HEADERS: [&str; 7] = [
    "Date",
    "Day",
    "Status",
    "Start Time",
    "End Time",
    "Duration (hrs)",
    "Task Details",
];
const COLUMN_WIDTHS: [u16; 7] = [15, 10, 15, 12, 12, 12, 50];

const HEADER_ROW: u32 = 4;
const FIRST_DATA_ROW: u32 = 5;

const TITLE_FONT_SIZE: u8 = 14;
const HEADER_FONT_SIZE: u8 = 12;
const HEADER_BG: u32 = 0xDDEBF7;
const WEEKEND_BG: u32 = 0xF2F2F2;
const HOLIDAY_BG: u32 = 0xFCE4D6;
const LEAVE_BG: u32 = 0xFFF2CC;

struct SheetFormats {
    title: Format,
    bold: Format,
    header: Format,
    normal: Format,
    weekend: Format,
    holiday: Format,
    leave: Format,
}

impl SheetFormats {
    fn new() -> Self {
        let cell = Format::new()
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin);

        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(TITLE_FONT_SIZE)
                .set_align(FormatAlign::Center),
            bold: Format::new().set_bold(),
            header: Format::new()
                .set_bold()
                .set_font_size(HEADER_FONT_SIZE)
                .set_background_color(Color::RGB(HEADER_BG))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap()
                .set_border(FormatBorder::Thin),
            weekend: cell.clone().set_background_color(Color::RGB(WEEKEND_BG)),
            holiday: cell.clone().set_background_color(Color::RGB(HOLIDAY_BG)),
            leave: cell.clone().set_background_color(Color::RGB(LEAVE_BG)),
            normal: cell,
        }
    }

    fn for_status(&self, status: &DayStatus) -> &Format {
        match status {
            DayStatus::Holiday(_) => &self.holiday,
            DayStatus::Leave(_) => &self.leave,
            DayStatus::Weekend => &self.weekend,
            DayStatus::RegularDay => &self.normal,
        }
    }
}

/// Render a built timesheet into `.xlsx` bytes
pub fn create_timesheet_workbook(sheet: &Timesheet) -> Result<Vec<u8>> {
    let formats = SheetFormats::new();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Timesheet")?;

    write_header_block(worksheet, sheet, &formats)?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    for (i, record) in sheet.records.iter().enumerate() {
        write_day_row(worksheet, FIRST_DATA_ROW + i as u32, record, &formats)?;
    }

    // one blank row between the data and the signatures
    let signature_row = FIRST_DATA_ROW + sheet.records.len() as u32 + 1;
    worksheet.merge_range(signature_row, 0, signature_row, 2, "Employee Signature", &formats.bold)?;
    worksheet.merge_range(signature_row, 4, signature_row, 6, "Manager Signature", &formats.bold)?;

    let buffer = workbook.save_to_buffer()?;
    info!(
        "Rendered timesheet workbook with {} row(s), size: {} bytes",
        sheet.records.len(),
        buffer.len()
    );
    Ok(buffer)
}

fn write_header_block(
    worksheet: &mut Worksheet,
    sheet: &Timesheet,
    formats: &SheetFormats,
) -> std::result::Result<(), XlsxError> {
    let title = format!(
        "Timesheet: {} to {}",
        title_date(sheet.range.start()),
        title_date(sheet.range.end())
    );
    worksheet.merge_range(0, 0, 0, 6, &title, &formats.title)?;

    let employee = &sheet.employee;
    worksheet.merge_range(1, 0, 1, 2, &format!("Employee: {}", employee.name), &formats.bold)?;
    worksheet.merge_range(
        1,
        3,
        1,
        4,
        &format!("Designation: {}", employee.designation),
        &formats.bold,
    )?;
    worksheet.merge_range(
        1,
        5,
        1,
        6,
        &format!("Department: {}", employee.department),
        &formats.bold,
    )?;
    worksheet.merge_range(
        2,
        0,
        2,
        2,
        &format!("Employee ID: {}", employee.employee_id),
        &formats.bold,
    )?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_with_format(HEADER_ROW, col as u16, *header, &formats.header)?;
    }
    Ok(())
}

fn write_day_row(
    worksheet: &mut Worksheet,
    row: u32,
    record: &DayRecord,
    formats: &SheetFormats,
) -> std::result::Result<(), XlsxError> {
    let format = formats.for_status(&record.status);
    let status = record.status.to_string();
    let values = [
        record.date_display(),
        record.weekday_name.clone(),
        status,
        record.start_time().to_string(),
        record.end_time().to_string(),
        record.duration().to_string(),
        record.task.clone(),
    ];

    for (col, value) in values.iter().enumerate() {
        if value.is_empty() {
            worksheet.write_blank(row, col as u16, format)?;
        } else {
            worksheet.write_with_format(row, col as u16, value.as_str(), format)?;
        }
    }
    Ok(())
}
