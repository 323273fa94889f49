use crate::utils::validation::is_civil_id;

pub const MSG_CIVIL_ID_REQUIRED: &str = "Please enter your civil ID.";
pub const MSG_CIVIL_ID_INVALID: &str = "Civil ID must be exactly 12 digits.";

pub fn validate_civil_id(civil_id: &str) -> Result<(), String> {
    if civil_id.is_empty() {
        return Err(MSG_CIVIL_ID_REQUIRED.into());
    }
    if !is_civil_id(civil_id) {
        return Err(MSG_CIVIL_ID_INVALID.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn civil_id_must_be_present_and_twelve_digits() {
        assert_eq!(validate_civil_id(""), Err(MSG_CIVIL_ID_REQUIRED.into()));
        assert_eq!(validate_civil_id("12345"), Err(MSG_CIVIL_ID_INVALID.into()));
        assert!(validate_civil_id("285010112345").is_ok());
    }
}
