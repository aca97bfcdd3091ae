//! Tab endpoints

use stickyboard_domain::{
    IdResponse, SuccessResponse, TabCreateDto, TabDto, TabMoveDto, TabUpdateDto,
};
use uuid::Uuid;

use crate::api::{ApiClient, ApiError, Endpoint};

#[derive(Debug, Clone)]
pub struct TabService {
    api: ApiClient,
}

impl TabService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_for_board(&self, board_id: Uuid) -> Result<Vec<TabDto>, ApiError> {
        self.api.request(&Endpoint::get(format!("Tabs/board/{board_id}"))).await
    }

    pub async fn create(&self, dto: &TabCreateDto) -> Result<Uuid, ApiError> {
        let created: IdResponse = self.api.request(&Endpoint::post("Tabs").with_body(dto)).await?;
        Ok(created.id)
    }

    pub async fn update(&self, id: Uuid, dto: &TabUpdateDto) -> Result<(), ApiError> {
        let endpoint = Endpoint::put(format!("Tabs/{id}")).with_body(dto);
        self.api.request::<SuccessResponse>(&endpoint).await.map(|_| ())
    }

    /// Reorder a tab within its board
    pub async fn move_tab(&self, id: Uuid, new_position: i32) -> Result<(), ApiError> {
        let endpoint =
            Endpoint::put(format!("Tabs/{id}/move")).with_body(&TabMoveDto { new_position });
        self.api.request::<SuccessResponse>(&endpoint).await.map(|_| ())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let endpoint = Endpoint::delete(format!("Tabs/{id}"));
        self.api.request::<SuccessResponse>(&endpoint).await.map(|_| ())
    }
}
