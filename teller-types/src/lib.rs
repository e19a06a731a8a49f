//! # Teller Types
//!
//! Domain types and port traits for the teller console service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Money, Client, Account, Transfer, Payment, Loan)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AccessToken, AccessTokenId, Account, AccountId, AccountKind, AccountStatus, Client, ClientId,
    ClientStatus, Currency, Loan, LoanId, LoanStatus, Money, OutcomeStatus, PaymentId,
    PaymentRecord, ServiceCategory, TransferDestination, TransferId, TransferKind, TransferRecord,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use ports::{BillerGateway, BillerReceipt, GatewayError, LedgerRepository, SubmitPayment};
