//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Every operation takes an explicit typed request struct; dynamic
//! payloads are validated into one of these at the boundary before any
//! domain call runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AccountId, AccountKind, AccountStatus, ClientId, Currency, ServiceCategory,
};

// ─────────────────────────────────────────────────────────────────────────────
// Client DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to register a new client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateClientRequest {
    /// Given name
    #[schema(example = "Juan")]
    pub first_name: String,
    /// Family names
    #[schema(example = "Perez Garcia")]
    pub last_name: String,
    /// National identity document (CI/NIT)
    #[schema(example = "12345678")]
    pub national_id: String,
    #[schema(example = "juan.perez@example.com")]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub address: String,
}

/// Partial update of a client record. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateClientRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub national_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Account DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to open a new account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    /// Owning client
    pub client_id: ClientId,
    pub kind: AccountKind,
    #[serde(default = "default_currency")]
    pub currency: Currency,
    /// Initial balance in smallest currency unit; must be non-negative
    #[serde(default)]
    #[schema(example = 0)]
    pub initial_balance: i64,
}

fn default_currency() -> Currency {
    Currency::BOB
}

/// Request to change an account's status. Idempotent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountStatusRequest {
    pub status: AccountStatus,
}

// ─────────────────────────────────────────────────────────────────────────────
// Balance operation DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to deposit (credit) money into an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepositRequest {
    /// Target account ID
    pub account_id: AccountId,
    /// Amount in smallest currency unit
    #[schema(example = 10000)]
    pub amount: i64,
    pub currency: Currency,
}

/// Request to withdraw (debit) money from an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WithdrawRequest {
    /// Source account ID
    pub account_id: AccountId,
    /// Amount in smallest currency unit
    #[schema(example = 5000)]
    pub amount: i64,
    pub currency: Currency,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transfer DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to transfer between two local accounts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InternalTransferRequest {
    /// Source account ID
    pub from_account_id: AccountId,
    /// Destination account ID
    pub to_account_id: AccountId,
    /// Amount in smallest currency unit
    #[schema(example = 50000)]
    pub amount: i64,
    pub currency: Currency,
    /// Optional free-text memo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Request to transfer to an external destination (third-party or
/// interbank; the route determines the kind).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExternalTransferRequest {
    /// Source account ID
    pub from_account_id: AccountId,
    /// Destination account number at the receiving institution
    #[schema(example = "2001234567")]
    pub destination_account_number: String,
    /// Receiving bank, for interbank transfers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    /// Amount in smallest currency unit
    #[schema(example = 30000)]
    pub amount: i64,
    pub currency: Currency,
    /// Optional free-text memo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to pay a service bill from an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentRequest {
    /// Account to debit
    pub account_id: AccountId,
    pub category: ServiceCategory,
    /// External biller identifier (supply/reference code)
    #[schema(example = "LUZ-123456")]
    pub supply_code: String,
    /// Amount in smallest currency unit
    #[schema(example = 25000)]
    pub amount: i64,
    pub currency: Currency,
    /// Optional free-text memo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Loan DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to submit a loan application.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoanApplicationRequest {
    /// Requesting client
    pub client_id: ClientId,
    /// Requested principal in smallest currency unit
    #[schema(example = 500000)]
    pub principal: i64,
    #[serde(default = "default_currency")]
    pub currency: Currency,
    /// Term in months (1..=360)
    #[schema(example = 24)]
    pub term_months: u32,
    /// Annual interest rate, percent (0..=50)
    #[schema(example = 8.5)]
    pub annual_rate_pct: f64,
}
