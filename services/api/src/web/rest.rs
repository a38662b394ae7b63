//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the tracker endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::ApiError;
use crate::web::auth::{self, LoginRequest, RegisterRequest, UserResponse};
use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use chrono::{DateTime, NaiveDate, Utc};
use health_tracker_core::cycle::{self, CyclePrediction, DateRange};
use health_tracker_core::{
    analyze_symptoms, parse_symptoms, Reminder, SessionUser, SymptomRecord,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register_handler,
        auth::login_handler,
        auth::logout_handler,
        me_handler,
        analyze_symptoms_handler,
        latest_symptoms_handler,
        predict_cycle_handler,
        set_reminder_handler,
        latest_reminder_handler,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            UserResponse,
            AnalyzeSymptomsRequest,
            SymptomAnalysisResponse,
            PredictCycleRequest,
            CyclePredictionResponse,
            DateRangeResponse,
            ReminderRequest,
            ReminderResponse,
        )
    ),
    tags(
        (name = "Health Tracker API", description = "Symptom analysis, cycle prediction and reminders.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Request and Response Structs
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct AnalyzeSymptomsRequest {
    /// Comma-separated symptoms, e.g. "pain, acne".
    pub symptoms: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SymptomAnalysisResponse {
    pub symptoms: Vec<String>,
    pub risk_level: String,
    pub risk_score: i32,
    pub food_recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<SymptomRecord> for SymptomAnalysisResponse {
    fn from(record: SymptomRecord) -> Self {
        Self {
            symptoms: record.symptoms,
            risk_level: record.risk_level.to_string(),
            risk_score: record.risk_score,
            food_recommendations: record.food_recommendations,
            timestamp: record.timestamp,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct PredictCycleRequest {
    pub last_period: NaiveDate,
    /// Average cycle length in days, 20 to 45.
    pub avg_cycle_length: i64,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq)]
pub struct DateRangeResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl From<DateRange> for DateRangeResponse {
    fn from(range: DateRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CyclePredictionResponse {
    pub next_period: NaiveDate,
    pub ovulation: NaiveDate,
    pub luteal_phase: DateRangeResponse,
    pub fertile_window: DateRangeResponse,
}

impl From<CyclePrediction> for CyclePredictionResponse {
    fn from(prediction: CyclePrediction) -> Self {
        Self {
            next_period: prediction.next_period,
            ovulation: prediction.ovulation,
            luteal_phase: prediction.luteal_phase.into(),
            fertile_window: prediction.fertile_window.into(),
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct ReminderRequest {
    pub reminder_text: String,
    pub reminder_date: NaiveDate,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ReminderResponse {
    pub reminder_text: String,
    pub reminder_date: NaiveDate,
    pub timestamp: DateTime<Utc>,
}

impl From<Reminder> for ReminderResponse {
    fn from(reminder: Reminder) -> Self {
        Self {
            reminder_text: reminder.reminder_text,
            reminder_date: reminder.reminder_date,
            timestamp: reminder.timestamp,
        }
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// The logged-in user.
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn me_handler(Extension(user): Extension<SessionUser>) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

/// Score comma-separated symptoms and save the result as the user's current analysis.
#[utoipa::path(
    post,
    path = "/symptoms/analyze",
    request_body = AnalyzeSymptomsRequest,
    responses(
        (status = 200, description = "Analysis computed and saved", body = SymptomAnalysisResponse),
        (status = 400, description = "No symptoms given"),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn analyze_symptoms_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
    Json(req): Json<AnalyzeSymptomsRequest>,
) -> Result<Json<SymptomAnalysisResponse>, ApiError> {
    let symptoms = parse_symptoms(&req.symptoms);
    if symptoms.is_empty() {
        return Err(ApiError::Validation(
            "Enter at least one symptom".to_string(),
        ));
    }

    let analysis = analyze_symptoms(&symptoms);
    let record = SymptomRecord {
        user_id: user.user_id,
        username: user.username,
        symptoms,
        risk_level: analysis.risk_level,
        risk_score: analysis.risk_score,
        food_recommendations: analysis.food_recommendations,
        timestamp: Utc::now(),
    };

    state.records.upsert_symptom_record(record.clone()).await?;
    info!(
        "Saved symptom analysis for {} (risk {})",
        record.username, record.risk_level
    );

    Ok(Json(record.into()))
}

/// The user's most recently saved symptom analysis.
#[utoipa::path(
    get,
    path = "/symptoms/latest",
    responses(
        (status = 200, description = "Saved analysis", body = SymptomAnalysisResponse),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "No analysis saved yet")
    )
)]
pub async fn latest_symptoms_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<SymptomAnalysisResponse>, ApiError> {
    let record = state
        .records
        .get_symptom_record(user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No symptom analysis saved".to_string()))?;
    Ok(Json(record.into()))
}

/// Predict the next period, ovulation, luteal phase and fertile window.
#[utoipa::path(
    post,
    path = "/cycle/predict",
    request_body = PredictCycleRequest,
    responses(
        (status = 200, description = "Predicted dates", body = CyclePredictionResponse),
        (status = 400, description = "Cycle length outside 20 to 45 days"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn predict_cycle_handler(
    Json(req): Json<PredictCycleRequest>,
) -> Result<Json<CyclePredictionResponse>, ApiError> {
    if !cycle::is_valid_cycle_length(req.avg_cycle_length) {
        return Err(ApiError::Validation(format!(
            "Average cycle length must be between {} and {} days",
            cycle::MIN_CYCLE_LENGTH,
            cycle::MAX_CYCLE_LENGTH
        )));
    }

    let prediction = cycle::predict_cycle(req.last_period, req.avg_cycle_length)
        .ok_or_else(|| ApiError::Validation("Last period date is out of range".to_string()))?;
    Ok(Json(prediction.into()))
}

/// Save a reminder, replacing the user's previous one.
#[utoipa::path(
    post,
    path = "/reminders",
    request_body = ReminderRequest,
    responses(
        (status = 201, description = "Reminder saved", body = ReminderResponse),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn set_reminder_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
    Json(req): Json<ReminderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reminder = Reminder {
        user_id: user.user_id,
        username: user.username,
        reminder_text: req.reminder_text,
        reminder_date: req.reminder_date,
        timestamp: Utc::now(),
    };

    state.records.upsert_reminder(reminder.clone()).await?;
    info!(
        "Saved reminder for {} on {}",
        reminder.username, reminder.reminder_date
    );

    Ok((StatusCode::CREATED, Json(ReminderResponse::from(reminder))))
}

/// The user's current reminder.
#[utoipa::path(
    get,
    path = "/reminders/latest",
    responses(
        (status = 200, description = "Saved reminder", body = ReminderResponse),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "No reminder saved yet")
    )
)]
pub async fn latest_reminder_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<ReminderResponse>, ApiError> {
    let reminder = state
        .records
        .get_reminder(user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No reminder saved".to_string()))?;
    Ok(Json(reminder.into()))
}
