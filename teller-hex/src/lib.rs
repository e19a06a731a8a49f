//! # Teller Hex
//!
//! Application service layer and HTTP adapters for the teller console.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates domain operations)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `outbound/` - Biller gateway adapter (reqwest client)
//!
//! The service is generic over `R: LedgerRepository` and
//! `G: BillerGateway`, allowing different adapters to be injected.

pub mod inbound;
mod openapi;
pub mod outbound;
pub mod service;


pub use service::ConsoleService;
