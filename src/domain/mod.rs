//! Domain layer: the persisted entities of the contest platform.
//!
//! These are the documents the HTTP surface reads and writes: users,
//! contests, orders, submissions, and contest drafts. Each type doubles
//! as the database row mapping and the JSON response body.

pub mod contest;
pub mod draft;
pub mod order;
pub mod submission;
pub mod user;

pub use contest::Contest;
pub use draft::ContestDraft;
pub use order::Order;
pub use submission::Submission;
pub use user::User;
