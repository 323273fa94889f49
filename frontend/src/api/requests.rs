use reqwest::Method;
use serde_json::Value;

use super::{
    client::{ensure_success, to_body, ApiClient, RequestOptions},
    normalize::{envelope_list, envelope_record},
    types::{ApiError, CreateRequestPayload, MedicalRequest, NewEscort, NewMessage, Ticket},
};

pub const LIST_REQUESTS_PATH: &str = "/api/Request/GetAllRequests";
pub const GET_REQUEST_PATH: &str = "/GetRequestById";
pub const CREATE_REQUEST_PATH: &str = "/CreateNewRequest";
pub const CREATE_ANONYMOUS_REQUEST_PATH: &str = "/CreateNewRequestWithNoLogin";
pub const ADD_MESSAGE_PATH: &str = "/AddNewMessage";
pub const ADD_ESCORT_PATH: &str = "/AddNewEscort";
pub const REMOVE_ESCORT_PATH: &str = "/RemoveEscortByHisId";
pub const LIST_TICKETS_PATH: &str = "/GetAllTicketsByRequestId";

fn parse_error(err: serde_json::Error) -> ApiError {
    ApiError::parse(format!("Unexpected response from server: {}", err))
}

impl ApiClient {
    pub async fn list_requests(&self) -> Result<Vec<MedicalRequest>, ApiError> {
        let response = self
            .send(Method::GET, LIST_REQUESTS_PATH, None, RequestOptions::default())
            .await?;
        envelope_list(ensure_success(response)?).map_err(parse_error)
    }

    pub async fn get_request(&self, id: &str) -> Result<MedicalRequest, ApiError> {
        let response = self
            .send(
                Method::GET,
                GET_REQUEST_PATH,
                None,
                RequestOptions::default().query("id", id),
            )
            .await?;
        envelope_record(ensure_success(response)?).map_err(parse_error)
    }

    pub async fn create_request(&self, payload: &CreateRequestPayload) -> Result<Value, ApiError> {
        let response = self
            .send(
                Method::POST,
                CREATE_REQUEST_PATH,
                Some(to_body(payload)?),
                RequestOptions::default(),
            )
            .await?;
        ensure_success(response)
    }

    pub async fn create_request_without_login(
        &self,
        payload: &CreateRequestPayload,
    ) -> Result<Value, ApiError> {
        let response = self
            .send(
                Method::POST,
                CREATE_ANONYMOUS_REQUEST_PATH,
                Some(to_body(payload)?),
                RequestOptions::default().anonymous(),
            )
            .await?;
        ensure_success(response)
    }

    pub async fn add_message(&self, message: &NewMessage) -> Result<Value, ApiError> {
        let response = self
            .send(
                Method::POST,
                ADD_MESSAGE_PATH,
                Some(to_body(message)?),
                RequestOptions::default(),
            )
            .await?;
        ensure_success(response)
    }

    pub async fn add_escort(&self, escort: &NewEscort) -> Result<Value, ApiError> {
        let response = self
            .send(
                Method::POST,
                ADD_ESCORT_PATH,
                Some(to_body(escort)?),
                RequestOptions::default(),
            )
            .await?;
        ensure_success(response)
    }

    /// The backend exposes escort removal as a GET.
    pub async fn remove_escort(&self, escort_id: &str) -> Result<Value, ApiError> {
        let response = self
            .send(
                Method::GET,
                REMOVE_ESCORT_PATH,
                None,
                RequestOptions::default().query("id", escort_id),
            )
            .await?;
        ensure_success(response)
    }

    pub async fn list_tickets(&self, request_id: &str) -> Result<Vec<Ticket>, ApiError> {
        let response = self
            .send(
                Method::GET,
                LIST_TICKETS_PATH,
                None,
                RequestOptions::default().query("requestId", request_id),
            )
            .await?;
        envelope_list(ensure_success(response)?).map_err(parse_error)
    }
}
