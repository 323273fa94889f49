pub const CIVIL_ID_LEN: usize = 12;
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

pub fn is_civil_id(value: &str) -> bool {
    value.len() == CIVIL_ID_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_phone_number(value: &str) -> bool {
    (8..=15).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Input filter for numeric-only fields.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
