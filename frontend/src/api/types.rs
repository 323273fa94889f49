use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::normalize::{pick, pick_display, pick_str};

pub const CIVIL_ID_FIELD: &str = "civilId";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub civil_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub civil_id: String,
    pub date_of_birth: String,
    pub user_first_name: String,
    pub user_last_name: String,
    pub email_address: String,
    pub phone_number: String,
    pub gender: u8,
}

/// Profile record as returned by the backend. Only presence is checked;
/// accessors tolerate the backend's mixed casing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct UserProfile(pub Value);

impl UserProfile {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    pub fn full_name(&self) -> Option<String> {
        if let Some(name) = pick_str(&self.0, &["fullName", "FullName", "full_name", "name", "Name"]) {
            return Some(name.to_string());
        }
        let first = pick_str(&self.0, &["userFirstName", "firstName", "FirstName"]);
        let last = pick_str(&self.0, &["userLastName", "lastName", "LastName"]);
        match (first, last) {
            (Some(f), Some(l)) => Some(format!("{} {}", f, l)),
            (Some(f), None) => Some(f.to_string()),
            (None, Some(l)) => Some(l.to_string()),
            (None, None) => None,
        }
    }

    pub fn email(&self) -> Option<String> {
        pick_str(&self.0, &["email", "Email", "emailAddress", "EmailAddress"]).map(str::to_string)
    }

    pub fn id(&self) -> Option<String> {
        pick_display(&self.0, &["id", "Id", "userId", "UserId"])
    }

    pub fn civil_id(&self) -> Option<String> {
        pick_display(&self.0, &["civilId", "CivilId", "civilIdNum", "CivilIdNum"])
    }

    pub fn phone(&self) -> Option<String> {
        pick_display(&self.0, &["phone", "Phone", "phoneNumber", "PhoneNumber"])
    }

    pub fn roles(&self) -> Vec<String> {
        match pick(&self.0, &["roles", "Roles", "role", "Role"]) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Some(Value::String(role)) => vec![role.clone()],
            _ => Vec::new(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.roles().iter().any(|r| r.eq_ignore_ascii_case("admin"))
    }

    pub fn display_name(&self) -> String {
        self.full_name()
            .or_else(|| self.email())
            .unwrap_or_else(|| "Patient".to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    #[serde(alias = "Id")]
    pub id: i64,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateCategoryRequest {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Hospital and specialization lists may arrive as plain strings or as
/// `{id, name}` objects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LookupItem {
    Named {
        #[serde(default, alias = "Id")]
        id: Option<Value>,
        #[serde(alias = "Name")]
        name: String,
    },
    Plain(String),
}

impl LookupItem {
    pub fn label(&self) -> &str {
        match self {
            LookupItem::Named { name, .. } => name,
            LookupItem::Plain(name) => name,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lookups {
    #[serde(default, alias = "Hospitals")]
    pub hospitals: Vec<LookupItem>,
    #[serde(default, alias = "Specializations")]
    pub specializations: Vec<LookupItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Attachment {
    pub file_name: String,
    pub base64_content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRequestPayload {
    pub hospital: String,
    pub specialization: String,
    pub diagnosis: String,
    pub notes: String,
    pub patient_full_name: String,
    pub patient_civil_id_num: String,
    pub patient_mobile_num: String,
    pub patient_email_address: String,
    pub patient_gender: String,
    #[serde(rename = "PatientRelationShip")]
    pub patient_relationship: String,
    pub files: Vec<Attachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct NewMessage {
    pub request_id: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct NewEscort {
    pub request_id: i64,
    pub escort_full_name: String,
    pub escort_civil_id_num: String,
    pub escort_mobile_num: String,
    #[serde(rename = "RelationShip")]
    pub relationship: String,
}

/// Treatment request as listed or fetched by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct MedicalRequest(pub Value);

impl MedicalRequest {
    pub fn id(&self) -> Option<String> {
        pick_display(&self.0, &["id", "Id", "requestId", "RequestId"])
    }

    pub fn number(&self) -> String {
        pick_display(&self.0, &["requestNumber", "RequestNumber"])
            .or_else(|| self.id().map(|id| format!("Request #{}", id)))
            .unwrap_or_else(|| "Request".to_string())
    }

    pub fn specialization(&self) -> Option<String> {
        pick_display(&self.0, &["Specialization", "specialization"])
    }

    pub fn hospital(&self) -> Option<String> {
        pick_display(&self.0, &["Hospital", "hospital"])
    }

    pub fn diagnosis(&self) -> Option<String> {
        pick_display(&self.0, &["Diagnosis", "diagnosis"])
    }

    pub fn treatment_plan(&self) -> Option<String> {
        pick_display(&self.0, &["treatment_plan", "treatmentPlan", "TreatmentPlan"])
    }

    pub fn requested_on(&self) -> Option<String> {
        pick_display(&self.0, &["requestDate", "RequestDate", "createdAt", "CreatedAt"])
    }

    pub fn doctor(&self) -> Option<String> {
        pick_display(&self.0, &["doctor", "Doctor"])
    }

    pub fn status(&self) -> String {
        pick_display(&self.0, &["status", "Status"]).unwrap_or_else(|| "Under review".to_string())
    }

    pub fn patient_name(&self) -> Option<String> {
        if let Some(full) = pick_display(&self.0, &["PatientFullName", "patientFullName"]) {
            return Some(full);
        }
        let first = pick_display(&self.0, &["Patient_FirstName"]);
        let last = pick_display(&self.0, &["Patient_LastName"]);
        match (first, last) {
            (Some(f), Some(l)) => Some(format!("{} {}", f, l)),
            (f, l) => f.or(l),
        }
    }

    pub fn patient_civil_id(&self) -> Option<String> {
        pick_display(&self.0, &["Patient_CivilId", "PatientCivilIdNum"])
    }

    pub fn patient_phone(&self) -> Option<String> {
        pick_display(&self.0, &["Patient_phoneNumber", "PatientMobileNum"])
    }

    pub fn patient_email(&self) -> Option<String> {
        pick_display(&self.0, &["Patient_emailAddress", "PatientEmailAddress"])
    }

    pub fn escorts(&self) -> Vec<Escort> {
        match pick(&self.0, &["escorts", "Escorts"]) {
            Some(Value::Array(items)) => items.iter().cloned().map(Escort).collect(),
            _ => Vec::new(),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        match pick(&self.0, &["messages", "Messages"]) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|m| match m {
                    Value::String(s) => Some(s.clone()),
                    other => pick_display(other, &["message", "Message", "text"]),
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Escort attached to a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Escort(pub Value);

impl Escort {
    pub fn id(&self) -> Option<String> {
        pick_display(&self.0, &["id", "Id", "escortId", "EscortId"])
    }

    pub fn full_name(&self) -> String {
        pick_display(&self.0, &["EscortFullName", "escortFullName", "fullName"]).unwrap_or_default()
    }

    pub fn relationship(&self) -> Option<String> {
        pick_display(&self.0, &["RelationShip", "relationShip", "relationship"])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Ticket(pub Value);

impl Ticket {
    pub fn title(&self) -> String {
        pick_display(&self.0, &["title", "Title"]).unwrap_or_default()
    }

    pub fn description(&self) -> Option<String> {
        pick_display(&self.0, &["description", "Description"])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Notification(pub Value);

impl Notification {
    pub fn id(&self) -> Option<String> {
        pick_display(&self.0, &["id", "Id"])
    }

    pub fn text(&self) -> String {
        pick_display(&self.0, &["message", "Message", "title", "Title"]).unwrap_or_default()
    }

    pub fn is_read(&self) -> bool {
        pick(&self.0, &["isRead", "IsRead"])
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

pub const CODE_VALIDATION: &str = "VALIDATION_ERROR";
pub const CODE_NETWORK: &str = "NETWORK_ERROR";
pub const CODE_TIMEOUT: &str = "TIMEOUT";
pub const CODE_HTTP: &str = "HTTP_ERROR";
pub const CODE_PARSE: &str = "PARSE_ERROR";
pub const CODE_UNKNOWN: &str = "UNKNOWN";

/// The only error shape the view layer receives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    pub status: Option<u16>,
    pub field: Option<String>,
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn with_code(code: &str, msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            status: None,
            field: None,
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(CODE_VALIDATION, msg)
    }

    pub fn validation_field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::validation(msg).on_field(field)
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(CODE_UNKNOWN, msg)
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(CODE_NETWORK, msg)
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::with_code(CODE_TIMEOUT, msg)
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::with_code(CODE_PARSE, msg)
    }

    pub fn http(status: u16, msg: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::with_code(CODE_HTTP, msg)
        }
    }

    pub fn on_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn is_timeout(&self) -> bool {
        self.code == CODE_TIMEOUT
    }

    pub fn is_network(&self) -> bool {
        self.code == CODE_NETWORK
    }

    pub fn is_retryable(&self) -> bool {
        self.is_network() || self.is_timeout() || self.status.is_some_and(|s| s >= 500)
    }

    pub fn is_field(&self, field: &str) -> bool {
        self.field.as_deref() == Some(field)
    }
}
