//! Patient Endpoints
//! Mission: Paginated listing, lookup, and creation of patient records

use crate::api::{error::ApiError, routes::AppState};
use crate::models::{NewPatient, Patient};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct PatientQuery {
    /// Page number for pagination (1-based)
    pub page: Option<u32>,
    /// Number of patients per page
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientPage {
    pub patients: Vec<Patient>,
    pub total_pages: u32,
}

/// List patients - GET /api/patients
pub async fn list_patients(
    State(state): State<AppState>,
    Query(params): Query<PatientQuery>,
) -> Result<Json<PatientPage>, ApiError> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(10);

    let (patients, total_pages) = state.records.list_patients(page, limit)?;

    Ok(Json(PatientPage {
        patients,
        total_pages,
    }))
}

/// Get a patient by id - GET /api/patients/:id
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Patient>, ApiError> {
    state
        .records
        .get_patient(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Patient not found".to_string()))
}

/// Add a patient - POST /api/patients
pub async fn create_patient(
    State(state): State<AppState>,
    Json(payload): Json<NewPatient>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let patient = state.records.insert_patient(payload)?;
    Ok((StatusCode::CREATED, Json(patient)))
}
