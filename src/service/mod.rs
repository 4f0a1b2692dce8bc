//! Service layer: payment checkout and order reconciliation.
//!
//! [`OrderService`] is the one place in this codebase with multi-step
//! logic; everything else is a single store call behind a handler.

pub mod order_service;

pub use order_service::{OrderService, ReconciledOrder};
