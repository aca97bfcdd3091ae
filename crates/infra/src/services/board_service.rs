//! Board endpoints

use stickyboard_domain::{
    BoardCreateDto, BoardDto, BoardUpdateDto, IdResponse, MoveBoardFolderDto, MoveBoardOrgDto,
    RenameBoardDto, SuccessResponse,
};
use uuid::Uuid;

use crate::api::{ApiClient, ApiError, Endpoint};

#[derive(Debug, Clone)]
pub struct BoardService {
    api: ApiClient,
}

impl BoardService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Boards owned by the current user
    pub async fn get_mine(&self) -> Result<Vec<BoardDto>, ApiError> {
        self.api.request(&Endpoint::get("Boards/mine")).await
    }

    /// Boards owned by or shared with the current user
    pub async fn get_accessible(&self) -> Result<Vec<BoardDto>, ApiError> {
        self.api.request(&Endpoint::get("Boards/accessible")).await
    }

    /// Search accessible boards; an empty keyword lists everything
    pub async fn search(&self, keyword: &str) -> Result<Vec<BoardDto>, ApiError> {
        let keyword = Some(keyword).filter(|k| !k.is_empty());
        self.api.request(&Endpoint::get("Boards/search").with_query("keyword", keyword)).await
    }

    pub async fn get(&self, id: Uuid) -> Result<BoardDto, ApiError> {
        self.api.request(&Endpoint::get(format!("Boards/{id}"))).await
    }

    /// Create a board and return its id
    pub async fn create(&self, dto: &BoardCreateDto) -> Result<Uuid, ApiError> {
        let created: IdResponse = self.api.request(&Endpoint::post("Boards").with_body(dto)).await?;
        Ok(created.id)
    }

    pub async fn update(&self, id: Uuid, dto: &BoardUpdateDto) -> Result<(), ApiError> {
        self.mutate(Endpoint::put(format!("Boards/{id}")).with_body(dto)).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.mutate(Endpoint::delete(format!("Boards/{id}"))).await
    }

    pub async fn rename(&self, id: Uuid, title: &str) -> Result<(), ApiError> {
        let body = RenameBoardDto { title: title.to_owned() };
        self.mutate(Endpoint::patch(format!("Boards/{id}/rename")).with_body(&body)).await
    }

    /// Move into `folder_id`, or out of any folder with `None`
    pub async fn move_to_folder(&self, id: Uuid, folder_id: Option<Uuid>) -> Result<(), ApiError> {
        let body = MoveBoardFolderDto { folder_id };
        self.mutate(Endpoint::patch(format!("Boards/{id}/folder")).with_body(&body)).await
    }

    /// Move into `org_id`, or back to personal space with `None`
    pub async fn move_to_org(&self, id: Uuid, org_id: Option<Uuid>) -> Result<(), ApiError> {
        let body = MoveBoardOrgDto { org_id };
        self.mutate(Endpoint::patch(format!("Boards/{id}/org")).with_body(&body)).await
    }

    async fn mutate(&self, endpoint: Endpoint) -> Result<(), ApiError> {
        self.api.request::<SuccessResponse>(&endpoint).await.map(|_| ())
    }
}
