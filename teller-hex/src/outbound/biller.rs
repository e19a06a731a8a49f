//! HTTP adapter for the external biller service.
//!
//! Speaks the biller's observed wire contract:
//! `POST /api/pagos` with `{cuenta_id, tipo_servicio, monto, referencia}`.

use std::time::Duration;

use serde::Serialize;

use teller_types::{BillerGateway, BillerReceipt, GatewayError, SubmitPayment};

/// Reqwest-based biller gateway.
pub struct HttpBillerGateway {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct BillerPaymentBody<'a> {
    cuenta_id: String,
    tipo_servicio: &'a str,
    monto: i64,
    referencia: &'a str,
}

impl HttpBillerGateway {
    /// Creates a new gateway. Every request carries `timeout`; a
    /// timed-out call surfaces as `GatewayError::Timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait::async_trait]
impl BillerGateway for HttpBillerGateway {
    async fn submit_payment(
        &self,
        payment: &SubmitPayment,
    ) -> Result<BillerReceipt, GatewayError> {
        let body = BillerPaymentBody {
            cuenta_id: payment.account_id.to_string(),
            tipo_servicio: payment.category.biller_code(),
            monto: payment.amount.amount(),
            referencia: &payment.reference,
        };

        let resp = self
            .http
            .post(format!("{}/api/pagos", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::Unavailable(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected(format!("{}: {}", status, text)));
        }

        // The biller echoes the stored payment; its id is our confirmation.
        let confirmation = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("id").map(|id| id.to_string()));

        Ok(BillerReceipt { confirmation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_strips_trailing_slash() {
        let gateway =
            HttpBillerGateway::new("http://localhost:8003/", Duration::from_secs(5)).unwrap();
        assert_eq!(gateway.base_url, "http://localhost:8003");
    }
}
