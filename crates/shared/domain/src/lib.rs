//! Domain layer - Core business entities.
//!
//! This crate contains the entity model shared by every layer, with no
//! infrastructure dependencies.

pub mod constants;
pub mod user;

pub use constants::*;
pub use user::User;
