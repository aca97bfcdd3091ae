//! Wire DTOs for the StickyBoard REST API
//!
//! Field names follow the backend's camelCase JSON. Free-form JSON columns
//! (`prefs`, `meta`, `theme`, `layout`, `content`, `inkData`) are carried as
//! `serde_json::Value`.

pub mod auth;
pub mod board;
pub mod card;
pub mod enums;
pub mod envelope;
pub mod section;
pub mod tab;
pub mod user;

pub use auth::*;
pub use board::*;
pub use card::*;
pub use enums::*;
pub use envelope::*;
pub use section::*;
pub use tab::*;
pub use user::*;
