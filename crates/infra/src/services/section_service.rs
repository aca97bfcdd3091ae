//! Section endpoints

use stickyboard_domain::{
    IdResponse, SectionCreateDto, SectionDto, SectionMoveDto, SectionUpdateDto, SuccessResponse,
};
use uuid::Uuid;

use crate::api::{ApiClient, ApiError, Endpoint};

#[derive(Debug, Clone)]
pub struct SectionService {
    api: ApiClient,
}

impl SectionService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_for_tab(&self, tab_id: Uuid) -> Result<Vec<SectionDto>, ApiError> {
        self.api.request(&Endpoint::get(format!("Sections/tab/{tab_id}"))).await
    }

    pub async fn create(&self, dto: &SectionCreateDto) -> Result<Uuid, ApiError> {
        let created: IdResponse =
            self.api.request(&Endpoint::post("Sections").with_body(dto)).await?;
        Ok(created.id)
    }

    pub async fn update(&self, id: Uuid, dto: &SectionUpdateDto) -> Result<(), ApiError> {
        let endpoint = Endpoint::put(format!("Sections/{id}")).with_body(dto);
        self.api.request::<SuccessResponse>(&endpoint).await.map(|_| ())
    }

    /// Reorder and/or reparent a section
    pub async fn move_section(&self, id: Uuid, dto: &SectionMoveDto) -> Result<(), ApiError> {
        let endpoint = Endpoint::put(format!("Sections/{id}/move")).with_body(dto);
        self.api.request::<SuccessResponse>(&endpoint).await.map(|_| ())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let endpoint = Endpoint::delete(format!("Sections/{id}"));
        self.api.request::<SuccessResponse>(&endpoint).await.map(|_| ())
    }
}
