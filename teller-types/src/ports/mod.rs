//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod biller;
mod repository;

pub use biller::{BillerGateway, BillerReceipt, GatewayError, SubmitPayment};
pub use repository::LedgerRepository;
