//! Biller gateway port.
//!
//! This trait defines the interface to the external service-payment
//! backend. Implementations can be HTTP clients, mock gateways, etc.

use crate::domain::{AccountId, Money, ServiceCategory};

/// Error type for biller gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Biller service unavailable: {0}")]
    Unavailable(String),

    #[error("Biller request timed out")]
    Timeout,

    #[error("Payment rejected by biller: {0}")]
    Rejected(String),
}

/// A payment to submit to the external biller.
#[derive(Debug, Clone)]
pub struct SubmitPayment {
    pub account_id: AccountId,
    pub category: ServiceCategory,
    pub amount: Money,
    /// Supply/reference code identifying the bill
    pub reference: String,
}

/// Confirmation returned by the biller.
#[derive(Debug, Clone)]
pub struct BillerReceipt {
    /// Biller-side confirmation identifier, when one is provided
    pub confirmation: Option<String>,
}

/// Port trait for the external biller backend.
///
/// Callers supply the timeout (adapter construction); a timed-out call
/// surfaces as `GatewayError::Timeout` and must translate to a Failed
/// payment outcome, never a dangling Pending record.
#[async_trait::async_trait]
pub trait BillerGateway: Send + Sync + 'static {
    /// Submits one payment to the biller backend.
    async fn submit_payment(&self, payment: &SubmitPayment) -> Result<BillerReceipt, GatewayError>;
}
