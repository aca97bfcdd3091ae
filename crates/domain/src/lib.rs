//! # StickyBoard Domain
//!
//! Wire-level domain types for the StickyBoard REST API.
//!
//! This crate contains:
//! - DTOs mirroring the backend schema (boards, tabs, sections, cards, users)
//! - Tolerant integer-backed enums and the error-code set
//! - The response envelope and structured error payload
//! - Date/time codec shared by every DTO
//! - API configuration and the crate-level error type
//!
//! ## Architecture
//! - No dependencies on other StickyBoard crates
//! - No I/O: pure data, serde and validation only

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
