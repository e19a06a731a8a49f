//! Transfer record domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::account::AccountId;
use super::money::Money;

/// Unique identifier for a Transfer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TransferId(Uuid);

impl TransferId {
    /// Creates a new random TransferId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a TransferId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TransferId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TransferId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The kind of transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferKind {
    /// Between two local accounts of the same holder
    Internal,
    /// To another holder's account, identified by an external account number
    ToThirdParty,
    /// To an account at another bank
    InterbankExternal,
}

impl std::fmt::Display for TransferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferKind::Internal => write!(f, "INTERNAL"),
            TransferKind::ToThirdParty => write!(f, "TO_THIRD_PARTY"),
            TransferKind::InterbankExternal => write!(f, "INTERBANK_EXTERNAL"),
        }
    }
}

/// Outcome of a recorded transfer or payment attempt.
///
/// `Pending` is reserved for "outcome not yet known" and is reconciled
/// by a process outside this core; it is never a terminal state here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    Succeeded,
    Failed,
    Pending,
}

/// Where the money went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransferDestination {
    /// A local account (Internal transfers only)
    Local(AccountId),
    /// An opaque external identifier (third-party and interbank transfers)
    External {
        account_number: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        bank_name: Option<String>,
    },
}

/// A recorded transfer attempt.
///
/// Records are append-only once created; `status` is the only field a
/// reconciliation pass may adjust after the fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Unique identifier
    pub id: TransferId,
    pub kind: TransferKind,
    /// Source account (always local)
    pub source_account_id: AccountId,
    pub destination: TransferDestination,
    /// Amount moved (always positive)
    pub amount: Money,
    /// Free-text memo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub status: OutcomeStatus,
    /// When the attempt was recorded
    pub created_at: DateTime<Utc>,
}

impl TransferRecord {
    /// Creates a record for an internal transfer attempt.
    pub fn internal(
        source: AccountId,
        destination: AccountId,
        amount: Money,
        memo: Option<String>,
        status: OutcomeStatus,
    ) -> Self {
        Self {
            id: TransferId::new(),
            kind: TransferKind::Internal,
            source_account_id: source,
            destination: TransferDestination::Local(destination),
            amount,
            memo,
            status,
            created_at: Utc::now(),
        }
    }

    /// Creates a record for a third-party or interbank transfer attempt.
    pub fn external(
        kind: TransferKind,
        source: AccountId,
        account_number: String,
        bank_name: Option<String>,
        amount: Money,
        memo: Option<String>,
        status: OutcomeStatus,
    ) -> Self {
        debug_assert!(kind != TransferKind::Internal);
        Self {
            id: TransferId::new(),
            kind,
            source_account_id: source,
            destination: TransferDestination::External {
                account_number,
                bank_name,
            },
            amount,
            memo,
            status,
            created_at: Utc::now(),
        }
    }
}
