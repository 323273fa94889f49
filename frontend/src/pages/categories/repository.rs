use crate::api::{ApiClient, ApiError, Category, CategoryPayload};
use std::rc::Rc;

#[derive(Clone)]
pub struct CategoriesRepository {
    client: Rc<ApiClient>,
}

impl CategoriesRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        self.client.list_categories().await
    }

    pub async fn get(&self, id: i64) -> Result<Category, ApiError> {
        self.client.get_category(id).await
    }

    /// Creates when `id` is absent, otherwise updates that category.
    pub async fn save(&self, id: Option<i64>, payload: CategoryPayload) -> Result<(), ApiError> {
        match id {
            Some(id) => self.client.update_category(id, &payload).await,
            None => self.client.create_category(&payload).await,
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_category(id).await
    }
}
