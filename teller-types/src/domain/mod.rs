//! Domain models for the teller console service.

pub mod access_token;
pub mod account;
pub mod client;
pub mod loan;
pub mod money;
pub mod payment;
pub mod transfer;

pub use access_token::{AccessToken, AccessTokenId};
pub use account::{Account, AccountId, AccountKind, AccountStatus};
pub use client::{Client, ClientId, ClientStatus};
pub use loan::{Loan, LoanId, LoanStatus};
pub use money::{Currency, Money};
pub use payment::{PaymentId, PaymentRecord, ServiceCategory};
pub use transfer::{OutcomeStatus, TransferDestination, TransferId, TransferKind, TransferRecord};
