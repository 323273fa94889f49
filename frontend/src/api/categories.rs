use reqwest::Method;

use super::{
    client::{decode, ensure_success, to_body, ApiClient, RequestOptions},
    normalize::{envelope_list, envelope_record},
    types::{ApiError, Category, CategoryPayload, UpdateCategoryRequest},
};

pub const CATEGORIES_PATH: &str = "/Categories";

fn category_path(id: i64) -> String {
    format!("{}/{}", CATEGORIES_PATH, id)
}

fn parse_error(err: serde_json::Error) -> ApiError {
    ApiError::parse(format!("Unexpected response from server: {}", err))
}

impl ApiClient {
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = self
            .send(Method::GET, CATEGORIES_PATH, None, RequestOptions::default())
            .await?;
        envelope_list(ensure_success(response)?).map_err(parse_error)
    }

    pub async fn get_category(&self, id: i64) -> Result<Category, ApiError> {
        let response = self
            .send(Method::GET, &category_path(id), None, RequestOptions::default())
            .await?;
        envelope_record(ensure_success(response)?).map_err(parse_error)
    }

    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<(), ApiError> {
        let response = self
            .send(
                Method::POST,
                CATEGORIES_PATH,
                Some(to_body(payload)?),
                RequestOptions::default(),
            )
            .await?;
        ensure_success(response).map(|_| ())
    }

    /// The backend rejects updates whose body does not repeat the id.
    pub async fn update_category(&self, id: i64, payload: &CategoryPayload) -> Result<(), ApiError> {
        let body = UpdateCategoryRequest {
            id,
            name: payload.name.clone(),
            description: payload.description.clone(),
        };
        let path = category_path(id);
        let response = self
            .send(Method::PUT, &path, Some(to_body(&body)?), RequestOptions::default())
            .await?;
        ensure_success(response).map(|_| ())
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        let path = category_path(id);
        let response = self
            .send(Method::DELETE, &path, None, RequestOptions::default())
            .await?;
        decode::<serde_json::Value>(&path, response).map(|_| ())
    }
}
