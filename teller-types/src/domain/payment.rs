//! Service payment record domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::account::AccountId;
use super::money::Money;
use super::transfer::OutcomeStatus;

/// Unique identifier for a Payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Creates a new random PaymentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a PaymentId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaymentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Category of the billed service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceCategory {
    Electricity,
    Water,
    Phone,
    Gas,
    Internet,
    Other,
}

impl ServiceCategory {
    /// Wire code expected by the external biller service.
    pub fn biller_code(&self) -> &'static str {
        match self {
            ServiceCategory::Electricity => "LUZ",
            ServiceCategory::Water => "AGUA",
            ServiceCategory::Phone => "TELEFONO",
            ServiceCategory::Gas => "GAS",
            ServiceCategory::Internet => "INTERNET",
            ServiceCategory::Other => "OTRO",
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ServiceCategory::Electricity => "ELECTRICITY",
            ServiceCategory::Water => "WATER",
            ServiceCategory::Phone => "PHONE",
            ServiceCategory::Gas => "GAS",
            ServiceCategory::Internet => "INTERNET",
            ServiceCategory::Other => "OTHER",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for ServiceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ELECTRICITY" => Ok(ServiceCategory::Electricity),
            "WATER" => Ok(ServiceCategory::Water),
            "PHONE" => Ok(ServiceCategory::Phone),
            "GAS" => Ok(ServiceCategory::Gas),
            "INTERNET" => Ok(ServiceCategory::Internet),
            "OTHER" => Ok(ServiceCategory::Other),
            _ => Err(format!("Unknown service category: {}", s)),
        }
    }
}

/// A recorded service payment attempt.
///
/// Debits exactly one account by the amount on success. Append-only;
/// `status` is the only field adjusted after the fact (settlement).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Unique identifier
    pub id: PaymentId,
    /// Debited account
    pub account_id: AccountId,
    pub category: ServiceCategory,
    /// External biller identifier (supply/reference code)
    pub supply_code: String,
    /// Amount paid (always positive)
    pub amount: Money,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// When the attempt was recorded
    pub created_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Creates a new payment record.
    pub fn new(
        account_id: AccountId,
        category: ServiceCategory,
        supply_code: String,
        amount: Money,
        memo: Option<String>,
        status: OutcomeStatus,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            account_id,
            category,
            supply_code,
            amount,
            status,
            memo,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Currency;

    #[test]
    fn test_payment_record_creation() {
        let account = AccountId::new();
        let amount = Money::new(25000, Currency::BOB).unwrap();
        let record = PaymentRecord::new(
            account,
            ServiceCategory::Electricity,
            "LUZ-123456".into(),
            amount,
            Some("monthly bill".into()),
            OutcomeStatus::Pending,
        );

        assert_eq!(record.account_id, account);
        assert_eq!(record.status, OutcomeStatus::Pending);
        assert_eq!(record.category.biller_code(), "LUZ");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(
            "water".parse::<ServiceCategory>().unwrap(),
            ServiceCategory::Water
        );
        assert!("CABLE".parse::<ServiceCategory>().is_err());
    }
}
