//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names that clients depend on (`sessionId`, `transactionId`,
//! `contestorderId`, `type`) are pinned with serde renames.

pub mod contest_dto;
pub mod draft_dto;
pub mod payment_dto;
pub mod user_dto;

pub use contest_dto::*;
pub use draft_dto::*;
pub use payment_dto::*;
pub use user_dto::*;
