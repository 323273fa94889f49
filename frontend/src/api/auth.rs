use reqwest::Method;
use serde_json::Value;

use super::{
    client::{ensure_success, to_body, ApiClient, RequestOptions, LOGIN_PATH},
    errors,
    normalize::{envelope_record, unwrap_envelope},
    types::{ApiError, LoginRequest, RegisterRequest, UserProfile},
};

pub const LOGOUT_PATH: &str = "/auth/logout";
pub const CURRENT_USER_PATH: &str = "/auth/me";
pub const FAMILY_STATUS_PATH: &str = "/getFamilyStatus";

fn patient_options() -> RequestOptions {
    RequestOptions::default().query("Patient", "true").anonymous()
}

impl ApiClient {
    /// Posts credentials and returns the unparsed body; token extraction
    /// belongs to the auth coordinator.
    pub async fn login_raw(&self, request: &LoginRequest) -> Result<Value, ApiError> {
        let response = self
            .send(Method::POST, LOGIN_PATH, Some(to_body(request)?), patient_options())
            .await?;
        if response.is_success() {
            Ok(response.body)
        } else {
            Err(errors::login_error(response.status, &response.body))
        }
    }

    /// Registration shares the login endpoint. A success body can still report
    /// that the civil ID is taken.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, ApiError> {
        let response = self
            .send(Method::POST, LOGIN_PATH, Some(to_body(request)?), patient_options())
            .await?;
        if !response.is_success() {
            return Err(errors::register_error(response.status, &response.body));
        }
        match errors::register_success_conflict(&response.body) {
            Some(conflict) => Err(conflict),
            None => Ok(response.body),
        }
    }

    pub async fn logout_remote(&self) -> Result<(), ApiError> {
        let response = self
            .send(Method::POST, LOGOUT_PATH, None, RequestOptions::default())
            .await?;
        ensure_success(response).map(|_| ())
    }

    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        let response = self
            .send(Method::GET, CURRENT_USER_PATH, None, RequestOptions::default())
            .await?;
        let body = ensure_success(response)?;
        envelope_record(body).map_err(|err| ApiError::parse(err.to_string()))
    }

    pub async fn family_status(&self) -> Result<Value, ApiError> {
        let response = self
            .send(Method::GET, FAMILY_STATUS_PATH, None, RequestOptions::default())
            .await?;
        let body = ensure_success(response)?;
        Ok(unwrap_envelope(&body).clone())
    }
}
