use crate::{
    api::{Attachment, CreateRequestPayload, NewEscort, NewMessage, UserProfile},
    components::forms::FieldErrors,
    utils::validation::{is_civil_id, is_email, is_phone_number, MAX_ATTACHMENT_BYTES},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

pub const FIELD_HOSPITAL: &str = "Hospital";
pub const FIELD_SPECIALIZATION: &str = "Specialization";
pub const FIELD_DIAGNOSIS: &str = "Diagnosis";
pub const FIELD_NOTES: &str = "Notes";
pub const FIELD_PATIENT_NAME: &str = "PatientFullName";
pub const FIELD_PATIENT_CIVIL_ID: &str = "PatientCivilIdNum";
pub const FIELD_PATIENT_MOBILE: &str = "PatientMobileNum";
pub const FIELD_PATIENT_EMAIL: &str = "PatientEmailAddress";
pub const FIELD_PATIENT_GENDER: &str = "PatientGender";
pub const FIELD_RELATIONSHIP: &str = "PatientRelationShip";

pub const FIELD_ESCORT_NAME: &str = "EscortFullName";
pub const FIELD_ESCORT_CIVIL_ID: &str = "EscortCivilIdNum";
pub const FIELD_ESCORT_MOBILE: &str = "EscortMobileNum";
pub const FIELD_ESCORT_RELATIONSHIP: &str = "RelationShip";

pub const GENDERS: &[&str] = &["Male", "Female"];
pub const RELATIONSHIPS: &[&str] = &[
    "Self",
    "Spouse",
    "Son/Daughter",
    "Father/Mother",
    "Brother/Sister",
    "Other",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateRequestForm {
    pub hospital: String,
    pub specialization: String,
    pub diagnosis: String,
    pub notes: String,
    pub patient_full_name: String,
    pub patient_civil_id: String,
    pub patient_mobile: String,
    pub patient_email: String,
    pub patient_gender: String,
    pub relationship: String,
    pub files: Vec<Attachment>,
}

impl CreateRequestForm {
    /// Starts the patient section from the signed-in user's profile.
    pub fn prefilled(user: Option<&UserProfile>) -> Self {
        let Some(user) = user else {
            return Self::default();
        };
        Self {
            patient_full_name: user.full_name().unwrap_or_default(),
            patient_civil_id: user.civil_id().unwrap_or_default(),
            patient_mobile: user.phone().unwrap_or_default(),
            patient_email: user.email().unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<CreateRequestPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, FIELD_HOSPITAL, &self.hospital, "Hospital is required.");
        require(
            &mut errors,
            FIELD_SPECIALIZATION,
            &self.specialization,
            "Specialization is required.",
        );
        require(&mut errors, FIELD_DIAGNOSIS, &self.diagnosis, "Diagnosis is required.");
        require(
            &mut errors,
            FIELD_PATIENT_NAME,
            &self.patient_full_name,
            "Patient name is required.",
        );
        check_civil_id(&mut errors, FIELD_PATIENT_CIVIL_ID, &self.patient_civil_id);
        check_mobile(&mut errors, FIELD_PATIENT_MOBILE, &self.patient_mobile);
        let email = self.patient_email.trim();
        if !email.is_empty() && !is_email(email) {
            errors.insert(FIELD_PATIENT_EMAIL, "Please enter a valid email address.");
        }
        require(&mut errors, FIELD_PATIENT_GENDER, &self.patient_gender, "Gender is required.");
        require(
            &mut errors,
            FIELD_RELATIONSHIP,
            &self.relationship,
            "Relationship is required.",
        );

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CreateRequestPayload {
            hospital: self.hospital.trim().to_string(),
            specialization: self.specialization.trim().to_string(),
            diagnosis: self.diagnosis.trim().to_string(),
            notes: self.notes.trim().to_string(),
            patient_full_name: self.patient_full_name.trim().to_string(),
            patient_civil_id_num: self.patient_civil_id.trim().to_string(),
            patient_mobile_num: self.patient_mobile.trim().to_string(),
            patient_email_address: email.to_string(),
            patient_gender: self.patient_gender.clone(),
            patient_relationship: self.relationship.clone(),
            files: self.files.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscortForm {
    pub full_name: String,
    pub civil_id: String,
    pub mobile: String,
    pub relationship: String,
}

impl EscortForm {
    pub fn validate(&self, request_id: i64) -> Result<NewEscort, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, FIELD_ESCORT_NAME, &self.full_name, "Escort name is required.");
        check_civil_id(&mut errors, FIELD_ESCORT_CIVIL_ID, &self.civil_id);
        check_mobile(&mut errors, FIELD_ESCORT_MOBILE, &self.mobile);
        require(
            &mut errors,
            FIELD_ESCORT_RELATIONSHIP,
            &self.relationship,
            "Relationship is required.",
        );
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewEscort {
            request_id,
            escort_full_name: self.full_name.trim().to_string(),
            escort_civil_id_num: self.civil_id.trim().to_string(),
            escort_mobile_num: self.mobile.trim().to_string(),
            relationship: self.relationship.clone(),
        })
    }
}

pub fn build_message(request_id: i64, text: &str) -> Result<NewMessage, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("Message cannot be empty.".into());
    }
    Ok(NewMessage {
        request_id,
        message: text.to_string(),
    })
}

/// Route ids are numeric on this backend.
pub fn numeric_request_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

pub fn check_attachment(name: &str, size: u64) -> Result<(), String> {
    if size > MAX_ATTACHMENT_BYTES {
        return Err(format!("{} is too large. The maximum size is 5 MB.", name));
    }
    Ok(())
}

pub fn encode_attachment(name: &str, bytes: &[u8]) -> Attachment {
    Attachment {
        file_name: name.to_string(),
        base64_content: STANDARD.encode(bytes),
    }
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

fn check_civil_id(errors: &mut FieldErrors, field: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, "Civil ID is required.");
    } else if !is_civil_id(value) {
        errors.insert(field, "Civil ID must be exactly 12 digits.");
    }
}

fn check_mobile(errors: &mut FieldErrors, field: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, "Mobile number is required.");
    } else if !is_phone_number(value) {
        errors.insert(field, "Mobile number must be 8 to 15 digits.");
    }
}
