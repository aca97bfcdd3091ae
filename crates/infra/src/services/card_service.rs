//! Card endpoints

use stickyboard_domain::{CardCreateDto, CardDto, CardUpdateDto, IdResponse, SuccessResponse};
use uuid::Uuid;

use crate::api::{ApiClient, ApiError, Endpoint};

#[derive(Debug, Clone)]
pub struct CardService {
    api: ApiClient,
}

impl CardService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self, id: Uuid) -> Result<CardDto, ApiError> {
        self.api.request(&Endpoint::get(format!("Cards/{id}"))).await
    }

    pub async fn get_by_tab(&self, tab_id: Uuid) -> Result<Vec<CardDto>, ApiError> {
        self.api.request(&Endpoint::get(format!("Cards/tab/{tab_id}"))).await
    }

    pub async fn get_by_section(&self, section_id: Uuid) -> Result<Vec<CardDto>, ApiError> {
        self.api.request(&Endpoint::get(format!("Cards/section/{section_id}"))).await
    }

    pub async fn create(&self, dto: &CardCreateDto) -> Result<Uuid, ApiError> {
        let created: IdResponse = self.api.request(&Endpoint::post("Cards").with_body(dto)).await?;
        Ok(created.id)
    }

    pub async fn update(&self, id: Uuid, dto: &CardUpdateDto) -> Result<(), ApiError> {
        let endpoint = Endpoint::put(format!("Cards/{id}")).with_body(dto);
        self.api.request::<SuccessResponse>(&endpoint).await.map(|_| ())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let endpoint = Endpoint::delete(format!("Cards/{id}"));
        self.api.request::<SuccessResponse>(&endpoint).await.map(|_| ())
    }
}
