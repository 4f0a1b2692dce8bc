//! # contest-gateway
//!
//! REST API backend for the contest platform.
//!
//! Every endpoint is thin request/response plumbing over PostgreSQL; the
//! one component with internal structure is the order reconciliation flow
//! in [`service::OrderService`], which confirms a completed checkout
//! session with the payment processor, records the order exactly once per
//! payment-intent, and registers the payer as a contest participant.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │     └── AuthedUser extractor (auth/)
//!     │
//!     ├── OrderService (service/)
//!     │     ├── PaymentProcessor port (payments/)
//!     │     └── ContestStore port (persistence/)
//!     │
//!     └── PostgreSQL (persistence/postgres)
//! ```
//!
//! External collaborators (store, payment processor, token verifier) are
//! trait objects constructed in `main` and injected through
//! [`app_state::AppState`], so every seam can be substituted with a test
//! double.

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod payments;
pub mod persistence;
pub mod service;
