//! Serialization utilities shared by the domain DTOs

pub mod dates;
