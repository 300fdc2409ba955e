//! Record Storage
//! Mission: Persist patient records and authorization requests in SQLite

use crate::models::{
    AuthorizationRequest, NewAuthorizationRequest, NewPatient, Patient, RequestStatus,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use tracing::info;
use uuid::Uuid;

/// Document store for patients and authorization requests.
pub struct RecordStore {
    db_path: String,
}

impl RecordStore {
    /// Create a new record store and initialize the schema.
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS patients (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                age INTEGER NOT NULL,
                condition TEXT NOT NULL,
                medical_history TEXT NOT NULL,
                treatment_plan TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS authorization_requests (
                id TEXT PRIMARY KEY,
                patient_id TEXT NOT NULL,
                treatment_type TEXT NOT NULL,
                insurance_plan TEXT NOT NULL,
                date_of_service TEXT NOT NULL,
                diagnosis_code TEXT NOT NULL,
                doctor_notes TEXT,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    // ===== Patients =====

    /// Insert a new patient record.
    pub fn insert_patient(&self, new: NewPatient) -> Result<Patient> {
        let patient = Patient {
            id: Uuid::new_v4(),
            name: new.name,
            age: new.age,
            condition: new.condition,
            medical_history: new.medical_history,
            treatment_plan: new.treatment_plan,
        };

        let history_json = serde_json::to_string(&patient.medical_history)
            .context("Failed to serialize medical history")?;

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO patients (id, name, age, condition, medical_history, treatment_plan)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                patient.id.to_string(),
                patient.name,
                patient.age,
                patient.condition,
                history_json,
                patient.treatment_plan,
            ],
        )
        .context("Failed to insert patient")?;

        info!("Added patient record {}", patient.id);

        Ok(patient)
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: &Uuid) -> Result<Option<Patient>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, name, age, condition, medical_history, treatment_plan
             FROM patients WHERE id = ?1",
        )?;

        let result = stmt.query_row(params![id.to_string()], row_to_patient);

        match result {
            Ok(patient) => Ok(Some(patient)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List patients one page at a time. Returns the page plus the total
    /// page count for the given limit. Limit is capped at 500 per page.
    pub fn list_patients(&self, page: u32, limit: u32) -> Result<(Vec<Patient>, u32)> {
        let limit = limit.clamp(1, 500);
        let page = page.max(1);
        // Both values are caller-controlled; widen before multiplying so an
        // extreme page/limit pair cannot overflow.
        let offset = (page as i64 - 1) * limit as i64;

        let conn = Connection::open(&self.db_path)?;

        let total: u32 = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;

        let mut stmt = conn.prepare(
            "SELECT id, name, age, condition, medical_history, treatment_plan
             FROM patients LIMIT ?1 OFFSET ?2",
        )?;

        let patients = stmt
            .query_map(params![limit, offset], row_to_patient)?
            .collect::<Result<Vec<_>, _>>()?;

        let total_pages = total.div_ceil(limit);

        Ok((patients, total_pages))
    }

    // ===== Authorization requests =====

    /// Insert a new authorization request. Status always starts at pending.
    pub fn insert_authorization(&self, new: NewAuthorizationRequest) -> Result<AuthorizationRequest> {
        let request = AuthorizationRequest {
            id: Uuid::new_v4(),
            patient_id: new.patient_id,
            treatment_type: new.treatment_type,
            insurance_plan: new.insurance_plan,
            date_of_service: new.date_of_service,
            diagnosis_code: new.diagnosis_code,
            doctor_notes: new.doctor_notes,
            status: RequestStatus::Pending,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO authorization_requests
             (id, patient_id, treatment_type, insurance_plan, date_of_service,
              diagnosis_code, doctor_notes, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                request.id.to_string(),
                request.patient_id.to_string(),
                request.treatment_type,
                request.insurance_plan,
                request.date_of_service.to_rfc3339(),
                request.diagnosis_code,
                request.doctor_notes,
                request.status.as_str(),
                request.created_at,
            ],
        )
        .context("Failed to insert authorization request")?;

        info!(
            "Submitted authorization request {} for patient {}",
            request.id, request.patient_id
        );

        Ok(request)
    }

    /// List all authorization requests.
    pub fn list_authorizations(&self) -> Result<Vec<AuthorizationRequest>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, patient_id, treatment_type, insurance_plan, date_of_service,
                    diagnosis_code, doctor_notes, status, created_at
             FROM authorization_requests",
        )?;

        let requests = stmt
            .query_map([], row_to_authorization)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(requests)
    }

    /// Update the status of an authorization request. Returns the updated
    /// record, or `None` when no request with that id exists.
    pub fn update_authorization_status(
        &self,
        id: &Uuid,
        status: RequestStatus,
    ) -> Result<Option<AuthorizationRequest>> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected = conn.execute(
            "UPDATE authorization_requests SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id.to_string()],
        )?;

        if rows_affected == 0 {
            return Ok(None);
        }

        let mut stmt = conn.prepare(
            "SELECT id, patient_id, treatment_type, insurance_plan, date_of_service,
                    diagnosis_code, doctor_notes, status, created_at
             FROM authorization_requests WHERE id = ?1",
        )?;

        let updated = stmt.query_row(params![id.to_string()], row_to_authorization)?;

        info!("Authorization request {} moved to {}", id, status.as_str());

        Ok(Some(updated))
    }
}

fn row_to_patient(row: &Row) -> rusqlite::Result<Patient> {
    let id: String = row.get(0)?;
    let history_json: String = row.get(4)?;
    Ok(Patient {
        id: Uuid::parse_str(&id).unwrap_or_default(),
        name: row.get(1)?,
        age: row.get(2)?,
        condition: row.get(3)?,
        medical_history: serde_json::from_str(&history_json).unwrap_or_default(),
        treatment_plan: row.get(5)?,
    })
}

fn row_to_authorization(row: &Row) -> rusqlite::Result<AuthorizationRequest> {
    let id: String = row.get(0)?;
    let patient_id: String = row.get(1)?;
    let date_of_service: String = row.get(4)?;
    let status: String = row.get(7)?;
    Ok(AuthorizationRequest {
        id: Uuid::parse_str(&id).unwrap_or_default(),
        patient_id: Uuid::parse_str(&patient_id).unwrap_or_default(),
        treatment_type: row.get(2)?,
        insurance_plan: row.get(3)?,
        date_of_service: DateTime::parse_from_rfc3339(&date_of_service)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_default(),
        diagnosis_code: row.get(5)?,
        doctor_notes: row.get(6)?,
        status: RequestStatus::from_str(&status).unwrap_or(RequestStatus::Pending),
        created_at: row.get(8)?,
    })
}
