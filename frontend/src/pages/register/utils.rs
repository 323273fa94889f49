use crate::{
    api::RegisterRequest,
    components::forms::FieldErrors,
    utils::validation::{is_civil_id, is_email, is_phone_number},
};

pub const FIELD_CIVIL_ID: &str = "civilId";
pub const FIELD_DATE_OF_BIRTH: &str = "dateOfBirth";
pub const FIELD_FIRST_NAME: &str = "userFirstName";
pub const FIELD_LAST_NAME: &str = "userLastName";
pub const FIELD_EMAIL: &str = "emailAddress";
pub const FIELD_PHONE: &str = "phoneNumber";
pub const FIELD_GENDER: &str = "gender";

pub const REGISTER_FIELDS: &[&str] = &[
    FIELD_CIVIL_ID,
    FIELD_DATE_OF_BIRTH,
    FIELD_FIRST_NAME,
    FIELD_LAST_NAME,
    FIELD_EMAIL,
    FIELD_PHONE,
    FIELD_GENDER,
];

pub const GENDER_MALE: u8 = 1;
pub const GENDER_FEMALE: u8 = 2;

/// Raw form values as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub civil_id: String,
    pub date_of_birth: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub gender: u8,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.civil_id.is_empty() {
            errors.insert(FIELD_CIVIL_ID, "Civil ID is required.");
        } else if !is_civil_id(&self.civil_id) {
            errors.insert(FIELD_CIVIL_ID, "Civil ID must be exactly 12 digits.");
        }
        if self.date_of_birth.trim().is_empty() {
            errors.insert(FIELD_DATE_OF_BIRTH, "Date of birth is required.");
        }
        if self.first_name.trim().is_empty() {
            errors.insert(FIELD_FIRST_NAME, "First name is required.");
        }
        if self.last_name.trim().is_empty() {
            errors.insert(FIELD_LAST_NAME, "Last name is required.");
        }
        let email = self.email.trim();
        if email.is_empty() {
            errors.insert(FIELD_EMAIL, "Email is required.");
        } else if !is_email(email) {
            errors.insert(FIELD_EMAIL, "Please enter a valid email address.");
        }
        if self.phone.is_empty() {
            errors.insert(FIELD_PHONE, "Phone number is required.");
        } else if !is_phone_number(&self.phone) {
            errors.insert(FIELD_PHONE, "Phone number must be 8 to 15 digits.");
        }
        if self.gender != GENDER_MALE && self.gender != GENDER_FEMALE {
            errors.insert(FIELD_GENDER, "Please select a gender.");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RegisterRequest {
            civil_id: self.civil_id.clone(),
            date_of_birth: self.date_of_birth.trim().to_string(),
            user_first_name: self.first_name.trim().to_string(),
            user_last_name: self.last_name.trim().to_string(),
            email_address: email.to_string(),
            phone_number: self.phone.clone(),
            gender: self.gender,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegisterForm {
        RegisterForm {
            civil_id: "290010112345".into(),
            date_of_birth: "1990-01-01".into(),
            first_name: " Sara ".into(),
            last_name: "Ali".into(),
            email: "sara@example.com".into(),
            phone: "96550001234".into(),
            gender: GENDER_FEMALE,
        }
    }

    #[test]
    fn valid_form_builds_trimmed_request() {
        let request = valid_form().validate().unwrap();
        assert_eq!(request.user_first_name, "Sara");
        assert_eq!(request.gender, 2);
    }

    #[test]
    fn every_empty_field_is_reported_by_id() {
        let errors = RegisterForm::default().validate().unwrap_err();
        for field in REGISTER_FIELDS {
            assert!(errors.contains(field), "missing error for {}", field);
        }
    }

    #[test]
    fn shape_errors_are_specific() {
        let form = RegisterForm {
            civil_id: "1234".into(),
            email: "not-an-email".into(),
            phone: "1234567".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FIELD_CIVIL_ID), Some("Civil ID must be exactly 12 digits."));
        assert_eq!(errors.get(FIELD_EMAIL), Some("Please enter a valid email address."));
        assert_eq!(errors.get(FIELD_PHONE), Some("Phone number must be 8 to 15 digits."));
        assert_eq!(errors.len(), 3);
    }
}
