//! Testing utilities
//!
//! - **[`mocks`]**: in-memory stand-ins for platform services

pub mod mocks;

pub use mocks::MockKeychainProvider;
