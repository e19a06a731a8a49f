//! Account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::client::ClientId;
use super::money::{Currency, Money};
use crate::error::DomainError;

/// Unique identifier for an Account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Creates a new random AccountId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an AccountId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Product kind of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountKind {
    Savings,
    Checking,
}

/// Operational status of an account.
///
/// A Blocked account rejects every credit and debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Blocked,
}

/// A financial account that holds a balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Display/routing identifier, distinct from the id
    pub account_number: String,
    /// Owning client (reference, not ownership)
    pub client_id: ClientId,
    pub kind: AccountKind,
    /// Current balance (includes currency information; never negative)
    pub balance: Money,
    pub status: AccountStatus,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new active account.
    ///
    /// # Validation
    /// - Initial balance must be non-negative (enforced by `Money`)
    pub fn new(
        account_number: String,
        client_id: ClientId,
        kind: AccountKind,
        initial_balance: Money,
    ) -> Result<Self, DomainError> {
        if account_number.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Account number cannot be empty".into(),
            ));
        }

        Ok(Self {
            id: AccountId::new(),
            account_number,
            client_id,
            kind,
            balance: initial_balance,
            status: AccountStatus::Active,
            created_at: Utc::now(),
        })
    }

    /// Reconstructs an account from stored fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: AccountId,
        account_number: String,
        client_id: ClientId,
        kind: AccountKind,
        balance: Money,
        status: AccountStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            account_number,
            client_id,
            kind,
            balance,
            status,
            created_at,
        }
    }

    /// Returns the currency of this account. Immutable after creation.
    pub fn currency(&self) -> Currency {
        self.balance.currency()
    }

    /// Returns true if the account accepts operations.
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    fn ensure_active(&self) -> Result<(), DomainError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(DomainError::AccountBlocked(self.id))
        }
    }

    /// Credits (adds) money to the account. Rejected when Blocked.
    pub fn credit(&mut self, amount: Money) -> Result<(), DomainError> {
        self.ensure_active()?;
        self.balance = self.balance.checked_add(amount)?;
        Ok(())
    }

    /// Debits (subtracts) money from the account. Rejected when Blocked
    /// or when the amount exceeds the balance.
    pub fn debit(&mut self, amount: Money) -> Result<(), DomainError> {
        self.ensure_active()?;
        self.balance = self.balance.checked_sub(amount)?;
        Ok(())
    }

    /// Compensating credit for a previously applied debit.
    ///
    /// Skips the Blocked check: funds taken from an account must be
    /// restorable even if the account was blocked in the meantime.
    pub fn revert_debit(&mut self, amount: Money) -> Result<(), DomainError> {
        self.balance = self.balance.checked_add(amount)?;
        Ok(())
    }

    /// Checks if the account has sufficient funds for a debit.
    pub fn has_sufficient_funds(&self, amount: &Money) -> bool {
        self.balance.currency() == amount.currency() && self.balance.gte(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account_with(balance: i64, currency: Currency) -> Account {
        Account::new(
            "1001234567890".to_string(),
            ClientId::new(),
            AccountKind::Savings,
            Money::new(balance, currency).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_account_creation() {
        let account = account_with(0, Currency::BOB);
        assert_eq!(account.balance.amount(), 0);
        assert_eq!(account.currency(), Currency::BOB);
        assert_eq!(account.status, AccountStatus::Active);
    }

    #[test]
    fn test_empty_account_number_fails() {
        let result = Account::new(
            "".to_string(),
            ClientId::new(),
            AccountKind::Checking,
            Money::zero(Currency::USD),
        );
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_account_credit() {
        let mut account = account_with(0, Currency::BOB);
        account
            .credit(Money::new(1000, Currency::BOB).unwrap())
            .unwrap();
        assert_eq!(account.balance.amount(), 1000);
    }

    #[test]
    fn test_account_debit() {
        let mut account = account_with(1000, Currency::BOB);
        account
            .debit(Money::new(300, Currency::BOB).unwrap())
            .unwrap();
        assert_eq!(account.balance.amount(), 700);
    }

    #[test]
    fn test_insufficient_funds_leaves_balance_unchanged() {
        let mut account = account_with(100, Currency::USD);
        let result = account.debit(Money::new(200, Currency::USD).unwrap());
        assert!(matches!(result, Err(DomainError::InsufficientFunds { .. })));
        assert_eq!(account.balance.amount(), 100);
    }

    #[test]
    fn test_blocked_account_rejects_operations() {
        let mut account = account_with(500, Currency::BOB);
        account.status = AccountStatus::Blocked;

        let credit = account.credit(Money::new(100, Currency::BOB).unwrap());
        assert!(matches!(credit, Err(DomainError::AccountBlocked(_))));

        let debit = account.debit(Money::new(100, Currency::BOB).unwrap());
        assert!(matches!(debit, Err(DomainError::AccountBlocked(_))));

        assert_eq!(account.balance.amount(), 500);
    }

    #[test]
    fn test_revert_debit_bypasses_block() {
        let mut account = account_with(500, Currency::BOB);
        account
            .debit(Money::new(200, Currency::BOB).unwrap())
            .unwrap();
        account.status = AccountStatus::Blocked;

        account
            .revert_debit(Money::new(200, Currency::BOB).unwrap())
            .unwrap();
        assert_eq!(account.balance.amount(), 500);
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let mut account = account_with(500, Currency::BOB);
        let result = account.credit(Money::new(100, Currency::USD).unwrap());
        assert!(matches!(result, Err(DomainError::CurrencyMismatch { .. })));
    }
}
