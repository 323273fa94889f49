use crate::api::{
    ApiClient, ApiError, CreateRequestPayload, Lookups, MedicalRequest, NewEscort, NewMessage,
    Ticket,
};
use std::rc::Rc;

#[derive(Clone)]
pub struct RequestsRepository {
    client: Rc<ApiClient>,
}

impl RequestsRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn list(&self) -> Result<Vec<MedicalRequest>, ApiError> {
        self.client.list_requests().await
    }

    pub async fn get(&self, id: &str) -> Result<MedicalRequest, ApiError> {
        self.client.get_request(id).await
    }

    /// Tickets are secondary; a failure leaves the list empty.
    pub async fn tickets(&self, id: &str) -> Vec<Ticket> {
        match self.client.list_tickets(id).await {
            Ok(tickets) => tickets,
            Err(err) => {
                log::warn!("tickets for request {} unavailable: {}", id, err);
                Vec::new()
            }
        }
    }

    pub async fn lookups(&self) -> Lookups {
        match self.client.all_lookups().await {
            Ok(lookups) => lookups,
            Err(err) => {
                log::warn!("lookups unavailable: {}", err);
                Lookups::default()
            }
        }
    }

    pub async fn create(&self, payload: CreateRequestPayload) -> Result<(), ApiError> {
        self.client.create_request(&payload).await.map(|_| ())
    }

    pub async fn add_message(&self, message: NewMessage) -> Result<(), ApiError> {
        self.client.add_message(&message).await.map(|_| ())
    }

    pub async fn add_escort(&self, escort: NewEscort) -> Result<(), ApiError> {
        self.client.add_escort(&escort).await.map(|_| ())
    }

    pub async fn remove_escort(&self, escort_id: &str) -> Result<(), ApiError> {
        self.client.remove_escort(escort_id).await.map(|_| ())
    }
}
