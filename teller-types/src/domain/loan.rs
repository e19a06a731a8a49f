//! Loan request evaluation and amortization.
//!
//! The approval rule is a deliberate placeholder policy, not a credit
//! scoring system: small principals are approved automatically, larger
//! ones go to manual review. Rejection is always a manual action and
//! never produced here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::client::ClientId;
use super::money::Money;
use crate::error::DomainError;

/// Principal at or below this (in minor units) is auto-approved.
pub const AUTO_APPROVE_LIMIT_MINOR: i64 = 1_000_000;

/// Maximum term in months.
pub const MAX_TERM_MONTHS: u32 = 360;

/// Maximum annual interest rate, in percent.
pub const MAX_ANNUAL_RATE_PCT: f64 = 50.0;

/// Unique identifier for a Loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct LoanId(Uuid);

impl LoanId {
    /// Creates a new random LoanId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a LoanId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LoanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LoanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LoanId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Status of a loan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    UnderReview,
    Approved,
    Rejected,
}

/// An evaluated loan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Unique identifier
    pub id: LoanId,
    /// Requesting client
    pub client_id: ClientId,
    /// Requested principal (always positive)
    pub principal: Money,
    /// Term in months (1..=360)
    pub term_months: u32,
    /// Annual interest rate, percent (0..=50)
    pub annual_rate_pct: f64,
    pub status: LoanStatus,
    /// Monthly installment, present once evaluated as Approved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_installment: Option<Money>,
    /// When the request was submitted
    pub requested_at: DateTime<Utc>,
}

impl Loan {
    /// Validates and evaluates a loan application.
    ///
    /// Out-of-range inputs fail with `ValidationError` before any
    /// evaluation runs. The installment is computed only when the
    /// request is Approved.
    pub fn evaluate_application(
        client_id: ClientId,
        principal: Money,
        term_months: u32,
        annual_rate_pct: f64,
    ) -> Result<Self, DomainError> {
        if principal.is_zero() {
            return Err(DomainError::ValidationError(
                "Loan principal must be greater than zero".into(),
            ));
        }
        if term_months < 1 || term_months > MAX_TERM_MONTHS {
            return Err(DomainError::ValidationError(format!(
                "Loan term must be between 1 and {} months",
                MAX_TERM_MONTHS
            )));
        }
        if !(0.0..=MAX_ANNUAL_RATE_PCT).contains(&annual_rate_pct) {
            return Err(DomainError::ValidationError(format!(
                "Annual rate must be between 0 and {} percent",
                MAX_ANNUAL_RATE_PCT
            )));
        }

        let status = evaluate(principal);
        let monthly_installment = match status {
            LoanStatus::Approved => Some(monthly_installment(
                principal,
                term_months,
                annual_rate_pct,
            )),
            _ => None,
        };

        Ok(Self {
            id: LoanId::new(),
            client_id,
            principal,
            term_months,
            annual_rate_pct,
            status,
            monthly_installment,
            requested_at: Utc::now(),
        })
    }
}

/// Threshold-based auto-approval rule.
///
/// Never returns `Rejected`: rejection is a manual decision taken
/// outside this core.
pub fn evaluate(principal: Money) -> LoanStatus {
    if principal.amount() <= AUTO_APPROVE_LIMIT_MINOR {
        LoanStatus::Approved
    } else {
        LoanStatus::UnderReview
    }
}

/// Monthly installment by the standard annuity formula, rounded to
/// minor units.
///
/// A zero rate degenerates the formula (division by zero) and is
/// special-cased as straight principal / term.
pub fn monthly_installment(principal: Money, term_months: u32, annual_rate_pct: f64) -> Money {
    let p = principal.amount() as f64;
    let n = term_months as f64;

    let minor = if annual_rate_pct == 0.0 {
        (p / n).round() as i64
    } else {
        let r = annual_rate_pct / 100.0 / 12.0;
        let growth = (1.0 + r).powf(n);
        (p * (r * growth) / (growth - 1.0)).round() as i64
    };

    // Rounding a positive quotient of positives cannot go negative.
    Money::new(minor, principal.currency()).expect("installment is non-negative")
}
