//! # Teller Client SDK
//!
//! A typed Rust client for the Teller Console API.

use reqwest::Client;
use serde::de::DeserializeOwned;

use teller_types::{
    Account, AccountId, AccountKind, AccountStatus, AccountStatusRequest, Client as BankClient,
    ClientId, CreateAccountRequest, CreateClientRequest, Currency, DepositRequest,
    ExternalTransferRequest, InternalTransferRequest, Loan, LoanApplicationRequest,
    PaymentRecord, PaymentRequest, ServiceCategory, TransferRecord, UpdateClientRequest,
    WithdrawRequest,
};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Teller Console API client.
pub struct TellerClient {
    base_url: String,
    token: Option<String>,
    http: Client,
}

#[derive(serde::Deserialize)]
struct BootstrapResponse {
    token: String,
}

impl TellerClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            http: Client::new(),
        }
    }

    /// Sets the access token for authentication.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Creates the first access token. Only works while none exist.
    pub async fn bootstrap(&self, name: &str) -> Result<String, ClientError> {
        let resp: BootstrapResponse = self
            .post("/api/bootstrap", &serde_json::json!({ "name": name }))
            .await?;
        Ok(resp.token)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Clients
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers a new client.
    pub async fn create_client(
        &self,
        req: CreateClientRequest,
    ) -> Result<BankClient, ClientError> {
        self.post("/api/clients", &req).await
    }

    /// Gets a client by ID.
    pub async fn get_client(&self, id: ClientId) -> Result<BankClient, ClientError> {
        self.get(&format!("/api/clients/{}", id)).await
    }

    /// Lists all clients.
    pub async fn list_clients(&self) -> Result<Vec<BankClient>, ClientError> {
        self.get("/api/clients").await
    }

    /// Applies a partial update to a client.
    pub async fn update_client(
        &self,
        id: ClientId,
        req: UpdateClientRequest,
    ) -> Result<BankClient, ClientError> {
        self.patch(&format!("/api/clients/{}", id), &req).await
    }

    /// Marks a client Inactive.
    pub async fn deactivate_client(&self, id: ClientId) -> Result<BankClient, ClientError> {
        self.delete(&format!("/api/clients/{}", id)).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Accounts
    // ─────────────────────────────────────────────────────────────────────────────

    /// Opens a new account.
    pub async fn create_account(
        &self,
        client_id: ClientId,
        kind: AccountKind,
        currency: Currency,
        initial_balance: i64,
    ) -> Result<Account, ClientError> {
        let req = CreateAccountRequest {
            client_id,
            kind,
            currency,
            initial_balance,
        };
        self.post("/api/accounts", &req).await
    }

    /// Gets an account by ID.
    pub async fn get_account(&self, id: AccountId) -> Result<Account, ClientError> {
        self.get(&format!("/api/accounts/{}", id)).await
    }

    /// Lists all accounts.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, ClientError> {
        self.get("/api/accounts").await
    }

    /// Sets an account's status.
    pub async fn set_account_status(
        &self,
        id: AccountId,
        status: AccountStatus,
    ) -> Result<Account, ClientError> {
        self.patch(
            &format!("/api/accounts/{}/status", id),
            &AccountStatusRequest { status },
        )
        .await
    }

    /// Deposits money into an account.
    pub async fn deposit(
        &self,
        account_id: AccountId,
        amount: i64,
        currency: Currency,
    ) -> Result<Account, ClientError> {
        let req = DepositRequest {
            account_id,
            amount,
            currency,
        };
        self.post("/api/operations/deposit", &req).await
    }

    /// Withdraws money from an account.
    pub async fn withdraw(
        &self,
        account_id: AccountId,
        amount: i64,
        currency: Currency,
    ) -> Result<Account, ClientError> {
        let req = WithdrawRequest {
            account_id,
            amount,
            currency,
        };
        self.post("/api/operations/withdraw", &req).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transfers
    // ─────────────────────────────────────────────────────────────────────────────

    /// Transfers money between two local accounts.
    pub async fn transfer_internal(
        &self,
        req: InternalTransferRequest,
    ) -> Result<TransferRecord, ClientError> {
        self.post("/api/transfers/internal", &req).await
    }

    /// Transfers money to another holder's account at this bank.
    pub async fn transfer_third_party(
        &self,
        req: ExternalTransferRequest,
    ) -> Result<TransferRecord, ClientError> {
        self.post("/api/transfers/third-party", &req).await
    }

    /// Transfers money to an account at another bank.
    pub async fn transfer_interbank(
        &self,
        req: ExternalTransferRequest,
    ) -> Result<TransferRecord, ClientError> {
        self.post("/api/transfers/interbank", &req).await
    }

    /// Lists transfer records, newest first.
    pub async fn list_transfers(&self) -> Result<Vec<TransferRecord>, ClientError> {
        self.get("/api/transfers").await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payments
    // ─────────────────────────────────────────────────────────────────────────────

    /// Pays a service bill from an account.
    pub async fn pay_service(
        &self,
        account_id: AccountId,
        category: ServiceCategory,
        supply_code: &str,
        amount: i64,
        currency: Currency,
        memo: Option<String>,
    ) -> Result<PaymentRecord, ClientError> {
        let req = PaymentRequest {
            account_id,
            category,
            supply_code: supply_code.to_string(),
            amount,
            currency,
            memo,
        };
        self.post("/api/payments", &req).await
    }

    /// Lists payment records, optionally for one account.
    pub async fn list_payments(
        &self,
        account_id: Option<AccountId>,
    ) -> Result<Vec<PaymentRecord>, ClientError> {
        match account_id {
            Some(id) => self.get(&format!("/api/payments?account_id={}", id)).await,
            None => self.get("/api/payments").await,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Loans
    // ─────────────────────────────────────────────────────────────────────────────

    /// Submits a loan application.
    pub async fn request_loan(
        &self,
        req: LoanApplicationRequest,
    ) -> Result<Loan, ClientError> {
        self.post("/api/loans", &req).await
    }

    /// Lists loan records, newest first.
    pub async fn list_loans(&self) -> Result<Vec<Loan>, ClientError> {
        self.get("/api/loans").await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Plumbing
    // ─────────────────────────────────────────────────────────────────────────────

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.header("Authorization", format!("Bearer {}", token)),
            None => req,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let req = self.authorize(self.http.get(format!("{}{}", self.base_url, path)));
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let req = self.authorize(
            self.http
                .post(format!("{}{}", self.base_url, path))
                .json(body),
        );
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn patch<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let req = self.authorize(
            self.http
                .patch(format!("{}{}", self.base_url, path))
                .json(body),
        );
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let req = self.authorize(self.http.delete(format!("{}{}", self.base_url, path)));
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TellerClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = TellerClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_token() {
        let client = TellerClient::new("http://localhost:3000").with_token("test-token");
        assert_eq!(client.token, Some("test-token".to_string()));
    }
}
