//! Request extractors that report bad input as `AppError::BadRequest`.

mod json_body;
mod user_id;

pub use json_body::JsonBody;
pub use user_id::UserId;
