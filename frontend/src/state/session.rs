use std::rc::Rc;

use crate::{
    api::UserProfile,
    config::SESSION_DURATION,
    utils::{
        storage::{default_store, KeyValueStore, StorageError},
        time::{duration_ms, elapsed_ms},
    },
};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const USER_DATA_KEY: &str = "userData";
pub const LOGIN_TIME_KEY: &str = "loginTime";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

const SESSION_KEYS: &[&str] = &[
    ACCESS_TOKEN_KEY,
    USER_DATA_KEY,
    LOGIN_TIME_KEY,
    REFRESH_TOKEN_KEY,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
    pub issued_at_ms: i64,
}

impl Session {
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        elapsed_ms(self.issued_at_ms, now_ms) < duration_ms(SESSION_DURATION)
    }
}

/// Persists the session under fixed keys in client storage.
#[derive(Clone)]
pub struct SessionStore {
    store: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn browser() -> Self {
        Self::new(default_store())
    }

    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(&session.user)
            .map_err(|_| StorageError::Write(USER_DATA_KEY.to_string()))?;
        self.store.set(ACCESS_TOKEN_KEY, &session.token)?;
        self.store.set(USER_DATA_KEY, &user_json)?;
        self.store
            .set(LOGIN_TIME_KEY, &session.issued_at_ms.to_string())?;
        Ok(())
    }

    /// Returns the stored session whether or not it has expired.
    pub fn load(&self) -> Option<Session> {
        let token = self.read_present(ACCESS_TOKEN_KEY)?;
        let user_raw = self.read_present(USER_DATA_KEY)?;
        let issued_at_ms = self.read_present(LOGIN_TIME_KEY)?.trim().parse::<i64>().ok()?;
        let user = match serde_json::from_str::<UserProfile>(&user_raw) {
            Ok(user) => user,
            Err(err) => {
                log::warn!("stored user profile is unreadable: {}", err);
                return None;
            }
        };
        Some(Session {
            token,
            user,
            issued_at_ms,
        })
    }

    pub fn token(&self) -> Option<String> {
        self.read_present(ACCESS_TOKEN_KEY)
    }

    /// Best effort: a key that cannot be removed is logged and skipped.
    pub fn clear(&self) {
        for key in SESSION_KEYS {
            if let Err(err) = self.store.remove(key) {
                log::warn!("{}", err);
            }
        }
    }

    /// Earlier builds stored `JSON.stringify(undefined)`; those strings mean "absent".
    fn read_present(&self, key: &str) -> Option<String> {
        let value = self.store.get(key).ok().flatten()?;
        match value.trim() {
            "" | "undefined" | "null" => None,
            _ => Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;
    use serde_json::json;

    fn store() -> (MemoryStorage, SessionStore) {
        let memory = MemoryStorage::new();
        let sessions = SessionStore::new(Rc::new(memory.clone()));
        (memory, sessions)
    }

    fn session(issued_at_ms: i64) -> Session {
        Session {
            token: "tok".into(),
            user: UserProfile::new(json!({ "fullName": "Sara Ali" })),
            issued_at_ms,
        }
    }

    #[test]
    fn save_then_load_returns_same_session() {
        let (memory, sessions) = store();
        sessions.save(&session(1_000)).unwrap();
        assert_eq!(memory.get(LOGIN_TIME_KEY).unwrap().as_deref(), Some("1000"));
        assert_eq!(sessions.load(), Some(session(1_000)));
        assert_eq!(sessions.token().as_deref(), Some("tok"));
    }

    #[test]
    fn literal_undefined_and_null_are_absent() {
        let (memory, sessions) = store();
        sessions.save(&session(1_000)).unwrap();
        memory.set(USER_DATA_KEY, "undefined").unwrap();
        assert!(sessions.load().is_none());
        memory.set(USER_DATA_KEY, "null").unwrap();
        assert!(sessions.load().is_none());
        memory.set(ACCESS_TOKEN_KEY, "undefined").unwrap();
        assert!(sessions.token().is_none());
    }

    #[test]
    fn missing_or_garbled_login_time_is_absent() {
        let (memory, sessions) = store();
        sessions.save(&session(1_000)).unwrap();
        memory.remove(LOGIN_TIME_KEY).unwrap();
        assert!(sessions.load().is_none());
        memory.set(LOGIN_TIME_KEY, "yesterday").unwrap();
        assert!(sessions.load().is_none());
    }

    #[test]
    fn unparseable_profile_is_absent() {
        let (memory, sessions) = store();
        sessions.save(&session(1_000)).unwrap();
        memory.set(USER_DATA_KEY, "{not json").unwrap();
        assert!(sessions.load().is_none());
    }

    #[test]
    fn clear_removes_only_session_keys() {
        let (memory, sessions) = store();
        sessions.save(&session(1_000)).unwrap();
        memory.set(REFRESH_TOKEN_KEY, "r").unwrap();
        memory.set("theme", "dark").unwrap();
        sessions.clear();
        assert!(sessions.load().is_none());
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn validity_window_is_exclusive_at_twenty_minutes() {
        let s = session(0);
        let limit = duration_ms(SESSION_DURATION);
        assert!(s.is_valid_at(limit - 1));
        assert!(!s.is_valid_at(limit));
    }
}
