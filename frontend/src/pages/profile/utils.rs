use crate::api::UserProfile;

/// Avatar letter from the name, else the email.
pub fn initial(user: &UserProfile) -> String {
    user.full_name()
        .or_else(|| user.email())
        .and_then(|s| s.trim().chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

pub fn short_id(user: &UserProfile) -> Option<String> {
    user.id().map(|id| {
        if id.chars().count() > 8 {
            format!("{}...", id.chars().take(8).collect::<String>())
        } else {
            id
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn initial_falls_back_to_email() {
        assert_eq!(initial(&UserProfile::new(json!({ "fullName": "sara ali" }))), "S");
        assert_eq!(initial(&UserProfile::new(json!({ "Email": "ali@example.com" }))), "A");
        assert_eq!(initial(&UserProfile::default()), "?");
    }

    #[test]
    fn long_ids_are_shortened() {
        let user = UserProfile::new(json!({ "Id": "3f2a9c7e-1111-2222" }));
        assert_eq!(short_id(&user).as_deref(), Some("3f2a9c7e..."));
        let user = UserProfile::new(json!({ "id": 7 }));
        assert_eq!(short_id(&user).as_deref(), Some("7"));
    }
}
