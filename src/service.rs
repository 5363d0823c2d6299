use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::{
    builder::{LogProgress, Timesheet, TimesheetBuilder, TimesheetRequest},
    error::{Result, TimesheetError},
    helpers::{
        calendar::default_description_text,
        email::{self, Mailer, XLSX_CONTENT_TYPE},
        llm::OllamaSummarizer,
        xlsx::create_timesheet_workbook,
    },
    models::{
        settings::Settings,
        timesheet::{DateRange, HolidayRecord, PreviewRow, TimesheetSummary, WorkHours},
    },
};

/// Timesheet service: builds, renders and mails timesheets, and keeps the
/// session settings (work hours, holidays) in memory
#[derive(Clone)]
pub struct TimesheetService {
    pub settings: Arc<RwLock<Settings>>,
    pub settings_path: PathBuf,
    pub summarizer: Option<OllamaSummarizer>,
    pub mailer: Option<Mailer>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PreviewResponse {
    pub preview: Vec<PreviewRow>,
    pub summary: TimesheetSummary,
    pub warnings: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TemplateQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct NewHoliday {
    pub date: NaiveDate,
    pub name: String,
}

impl TimesheetService {
    pub fn new(
        settings: Settings,
        settings_path: PathBuf,
        summarizer: Option<OllamaSummarizer>,
        mailer: Option<Mailer>,
    ) -> Self {
        info!("Creating new TimesheetService instance");
        Self {
            settings: Arc::new(RwLock::new(settings)),
            settings_path,
            summarizer,
            mailer,
        }
    }

    /// Create an Axum router for the timesheet service
    pub fn router(self) -> Router {
        info!("Creating timesheet service router");
        let shared_state = Arc::new(self);

        Router::new()
            .route("/timesheet/generate", post(generate_timesheet))
            .route("/timesheet/preview", post(preview_timesheet))
            .route("/timesheet/template", get(description_template))
            .route("/timesheet/email", post(email_timesheet))
            .route("/settings", get(get_settings))
            .route("/settings/work-hours", put(update_work_hours))
            .route(
                "/settings/holidays",
                get(list_holidays).post(add_holiday).delete(clear_holidays),
            )
            .route("/settings/save", post(save_settings))
            .with_state(shared_state)
    }

    /// Build a timesheet against a snapshot of the current settings
    pub async fn build(&self, request: &TimesheetRequest) -> Result<Timesheet> {
        let settings = self.settings.read().await.clone();
        let builder = TimesheetBuilder::new(&settings, self.summarizer.as_ref());
        builder.build(request, &LogProgress).await
    }

    /// Build and render a timesheet into workbook bytes
    pub async fn process_timesheet(&self, request: &TimesheetRequest) -> Result<(Timesheet, Vec<u8>)> {
        let sheet = self.build(request).await?;
        let workbook = create_timesheet_workbook(&sheet)?;
        Ok((sheet, workbook))
    }
}

/// Error wrapper turning library errors into HTTP responses
pub struct ApiError(TimesheetError);

impl From<TimesheetError> for ApiError {
    fn from(err: TimesheetError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            err if err.is_validation() => StatusCode::BAD_REQUEST,
            TimesheetError::EmailNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            info!("Rejected request: {}", self.0);
        }
        (status, self.0.to_string()).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

// Route handlers
async fn generate_timesheet(
    State(service): State<Arc<TimesheetService>>,
    Json(request): Json<TimesheetRequest>,
) -> ApiResult<Response> {
    info!("Received timesheet generation request");

    let (sheet, workbook) = service.process_timesheet(&request).await?;
    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (header::CONTENT_DISPOSITION, content_disposition(&sheet.file_name())),
    ];

    info!("Timesheet generated successfully: {}", sheet.file_name());
    Ok((headers, workbook).into_response())
}

/// `attachment` header value with an ASCII-safe `filename` and the exact
/// name in an RFC 6266 `filename*` parameter
pub fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '/' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(file_name)
    )
}

async fn preview_timesheet(
    State(service): State<Arc<TimesheetService>>,
    Json(request): Json<TimesheetRequest>,
) -> ApiResult<Json<PreviewResponse>> {
    info!("Received timesheet preview request");

    let sheet = service.build(&request).await?;
    Ok(Json(PreviewResponse {
        preview: sheet.preview(),
        summary: sheet.summary(),
        warnings: sheet.warnings,
    }))
}

async fn description_template(
    State(service): State<Arc<TimesheetService>>,
    Query(query): Query<TemplateQuery>,
) -> ApiResult<String> {
    let range = DateRange::new(query.start_date, query.end_date)?;
    let holidays = service.settings.read().await.holidays.resolve(&range);
    Ok(default_description_text(&range, &holidays))
}

async fn email_timesheet(
    State(service): State<Arc<TimesheetService>>,
    Json(request): Json<TimesheetRequest>,
) -> ApiResult<String> {
    info!("Received timesheet email request");

    let Some(mailer) = service.mailer.as_ref() else {
        return Err(TimesheetError::EmailNotConfigured.into());
    };

    let (sheet, workbook) = service.process_timesheet(&request).await?;
    let response = email::send_timesheet_email(mailer, &sheet, workbook)
        .await
        .map_err(TimesheetError::from)?;

    Ok(response.id.to_string())
}

async fn get_settings(State(service): State<Arc<TimesheetService>>) -> Json<Settings> {
    Json(service.settings.read().await.clone())
}

async fn update_work_hours(
    State(service): State<Arc<TimesheetService>>,
    Json(work_hours): Json<WorkHours>,
) -> Json<WorkHours> {
    info!(
        "Updating work hours to {} - {} ({})",
        work_hours.start, work_hours.end, work_hours.duration
    );
    service.settings.write().await.work_hours = work_hours.clone();
    Json(work_hours)
}

async fn list_holidays(State(service): State<Arc<TimesheetService>>) -> Json<Vec<HolidayRecord>> {
    Json(service.settings.read().await.holidays.list().to_vec())
}

async fn add_holiday(
    State(service): State<Arc<TimesheetService>>,
    Json(holiday): Json<NewHoliday>,
) -> ApiResult<(StatusCode, String)> {
    let added = service
        .settings
        .write()
        .await
        .holidays
        .add(holiday.date, &holiday.name)?;

    if added {
        Ok((
            StatusCode::CREATED,
            format!("Added holiday: {} on {}", holiday.name.trim(), holiday.date),
        ))
    } else {
        Ok((StatusCode::OK, "Holiday already defined".to_string()))
    }
}

async fn clear_holidays(State(service): State<Arc<TimesheetService>>) -> String {
    service.settings.write().await.holidays.clear();
    "All holidays cleared".to_string()
}

async fn save_settings(State(service): State<Arc<TimesheetService>>) -> ApiResult<String> {
    let settings = service.settings.read().await.clone();
    settings.save(&service.settings_path)?;
    Ok(format!("Settings saved to {}", service.settings_path.display()))
}
