//! Typed resource services.
//!
//! Each service is a stateless facade over [`crate::api::ApiClient`]: one
//! method per backend operation, one [`crate::api::Endpoint`] per method.

pub mod auth_service;
pub mod board_service;
pub mod card_service;
pub mod section_service;
pub mod tab_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use board_service::BoardService;
pub use card_service::CardService;
pub use section_service::SectionService;
pub use tab_service::TabService;
pub use user_service::UserService;
