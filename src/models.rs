//! Domain Models
//! Mission: Patient records and insurance authorization requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Patient record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
    pub condition: String,
    pub medical_history: Vec<String>,
    pub treatment_plan: String,
}

/// Patient creation body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub condition: String,
    pub medical_history: Vec<String>,
    pub treatment_plan: String,
}

/// Insurance authorization request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRequest {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub treatment_type: String,
    pub insurance_plan: String,
    pub date_of_service: DateTime<Utc>,
    pub diagnosis_code: String,
    pub doctor_notes: Option<String>,
    pub status: RequestStatus,
    pub created_at: String,
}

/// Authorization request creation body. Status always starts at pending.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuthorizationRequest {
    pub patient_id: Uuid,
    pub treatment_type: String,
    pub insurance_plan: String,
    pub date_of_service: DateTime<Utc>,
    pub diagnosis_code: String,
    pub doctor_notes: Option<String>,
}

/// Status update body for PATCH /api/authorization/:id
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: RequestStatus,
}

/// Authorization request lifecycle states
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequestStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "approved")]
    Approved,
    #[serde(rename = "denied")]
    Denied,
}

impl RequestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Denied => "denied",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(RequestStatus::Pending),
            "approved" => Some(RequestStatus::Approved),
            "denied" => Some(RequestStatus::Denied),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_status_serialization() {
        let pending = RequestStatus::Pending;
        let json = serde_json::to_string(&pending).unwrap();
        assert_eq!(json, r#""pending""#);

        let approved: RequestStatus = serde_json::from_str(r#""approved""#).unwrap();
        assert_eq!(approved, RequestStatus::Approved);
    }

    #[test]
    fn test_request_status_string_conversion() {
        assert_eq!(RequestStatus::Pending.as_str(), "pending");
        assert_eq!(RequestStatus::Approved.as_str(), "approved");
        assert_eq!(RequestStatus::Denied.as_str(), "denied");

        assert_eq!(RequestStatus::from_str("denied"), Some(RequestStatus::Denied));
        assert_eq!(RequestStatus::from_str("APPROVED"), Some(RequestStatus::Approved));
        assert_eq!(RequestStatus::from_str("invalid"), None);
    }

    #[test]
    fn test_patient_uses_camel_case_fields() {
        let patient = Patient {
            id: Uuid::new_v4(),
            name: "John Doe".to_string(),
            age: 30,
            condition: "Asthma".to_string(),
            medical_history: vec!["None".to_string()],
            treatment_plan: "Use inhaler".to_string(),
        };

        let json = serde_json::to_string(&patient).unwrap();
        assert!(json.contains("medicalHistory"));
        assert!(json.contains("treatmentPlan"));
    }
}
