//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use teller_types::domain::{
    AccountId, AccountKind, AccountStatus, ClientId, Currency, LoanId, LoanStatus, OutcomeStatus,
    PaymentId, ServiceCategory, TransferId, TransferKind,
};
use teller_types::dto::{
    AccountStatusRequest, CreateAccountRequest, CreateClientRequest, DepositRequest,
    ExternalTransferRequest, InternalTransferRequest, LoanApplicationRequest, PaymentRequest,
    UpdateClientRequest, WithdrawRequest,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

use crate::inbound::handlers::{BootstrapRequest, BootstrapResponse, CreateTokenRequest, TokenInfo};

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Bootstrap first access token
#[utoipa::path(
    post,
    path = "/api/bootstrap",
    tag = "auth",
    request_body = BootstrapRequest,
    responses(
        (status = 201, description = "Access token created successfully", body = BootstrapResponse),
        (status = 400, description = "Bootstrap not allowed - access tokens already exist")
    )
)]
async fn bootstrap() {}

/// Create a new access token (requires authentication)
#[utoipa::path(
    post,
    path = "/api/tokens",
    tag = "auth",
    request_body = CreateTokenRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Access token created", body = BootstrapResponse),
        (status = 401, description = "Unauthorized")
    )
)]
async fn create_token() {}

/// List all access tokens (without exposing raw tokens)
#[utoipa::path(
    get,
    path = "/api/tokens",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of access tokens", body = Vec<TokenInfo>),
        (status = 401, description = "Unauthorized")
    )
)]
async fn list_tokens() {}

/// Delete (deactivate) an access token
#[utoipa::path(
    delete,
    path = "/api/tokens/{id}",
    tag = "auth",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Access token ID (UUID)")
    ),
    responses(
        (status = 204, description = "Access token deleted"),
        (status = 404, description = "Access token not found"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn delete_token() {}

/// Register a new client
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "clients",
    request_body = CreateClientRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Client registered"),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn create_client() {}

/// List all clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "clients",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of clients"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn list_clients() {}

/// Get client by ID
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(
        ("id" = ClientId, Path, description = "Client ID (UUID)")
    ),
    responses(
        (status = 200, description = "Client details"),
        (status = 404, description = "Client not found"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn get_client() {}

/// Update a client
#[utoipa::path(
    patch,
    path = "/api/clients/{id}",
    tag = "clients",
    request_body = UpdateClientRequest,
    security(("bearer_auth" = [])),
    params(
        ("id" = ClientId, Path, description = "Client ID (UUID)")
    ),
    responses(
        (status = 200, description = "Updated client"),
        (status = 404, description = "Client not found"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn update_client() {}

/// Deactivate a client (never physically deleted)
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(
        ("id" = ClientId, Path, description = "Client ID (UUID)")
    ),
    responses(
        (status = 200, description = "Client marked inactive"),
        (status = 404, description = "Client not found"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn deactivate_client() {}

/// Open a new account
#[utoipa::path(
    post,
    path = "/api/accounts",
    tag = "accounts",
    request_body = CreateAccountRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Account created successfully"),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn create_account() {}

/// List all accounts
#[utoipa::path(
    get,
    path = "/api/accounts",
    tag = "accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of accounts"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn list_accounts() {}

/// Get account by ID
#[utoipa::path(
    get,
    path = "/api/accounts/{id}",
    tag = "accounts",
    security(("bearer_auth" = [])),
    params(
        ("id" = AccountId, Path, description = "Account ID (UUID)")
    ),
    responses(
        (status = 200, description = "Account details"),
        (status = 404, description = "Account not found"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn get_account() {}

/// Set account status (Active/Blocked)
#[utoipa::path(
    patch,
    path = "/api/accounts/{id}/status",
    tag = "accounts",
    request_body = AccountStatusRequest,
    security(("bearer_auth" = [])),
    params(
        ("id" = AccountId, Path, description = "Account ID (UUID)")
    ),
    responses(
        (status = 200, description = "Updated account"),
        (status = 404, description = "Account not found"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn set_account_status() {}

/// Deposit money into an account
#[utoipa::path(
    post,
    path = "/api/operations/deposit",
    tag = "operations",
    request_body = DepositRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Deposit successful"),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Account is blocked"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn deposit() {}

/// Withdraw money from an account
#[utoipa::path(
    post,
    path = "/api/operations/withdraw",
    tag = "operations",
    request_body = WithdrawRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Withdrawal successful"),
        (status = 400, description = "Insufficient funds or invalid request"),
        (status = 409, description = "Account is blocked"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn withdraw() {}

/// Transfer between two local accounts
#[utoipa::path(
    post,
    path = "/api/transfers/internal",
    tag = "transfers",
    request_body = InternalTransferRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Transfer successful"),
        (status = 400, description = "Insufficient funds or invalid accounts"),
        (status = 409, description = "Account is blocked"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn transfer_internal() {}

/// Transfer to another holder's account at this bank
#[utoipa::path(
    post,
    path = "/api/transfers/third-party",
    tag = "transfers",
    request_body = ExternalTransferRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Transfer successful"),
        (status = 400, description = "Insufficient funds or invalid request"),
        (status = 409, description = "Account is blocked"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn transfer_third_party() {}

/// Transfer to an account at another bank
#[utoipa::path(
    post,
    path = "/api/transfers/interbank",
    tag = "transfers",
    request_body = ExternalTransferRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Transfer successful"),
        (status = 400, description = "Insufficient funds or invalid request"),
        (status = 409, description = "Account is blocked"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn transfer_interbank() {}

/// List transfer records
#[utoipa::path(
    get,
    path = "/api/transfers",
    tag = "transfers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of transfer records, newest first"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn list_transfers() {}

/// Pay a service bill
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "payments",
    request_body = PaymentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Payment settled"),
        (status = 400, description = "Insufficient funds or invalid request"),
        (status = 409, description = "Account is blocked"),
        (status = 502, description = "Biller service unavailable"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn pay_service() {}

/// List payment records
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(
        ("account_id" = Option<String>, Query, description = "Filter by account ID")
    ),
    responses(
        (status = 200, description = "List of payment records, newest first"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn list_payments() {}

/// Submit a loan application
#[utoipa::path(
    post,
    path = "/api/loans",
    tag = "loans",
    request_body = LoanApplicationRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Loan evaluated and stored"),
        (status = 400, description = "Out-of-range principal, term or rate"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn request_loan() {}

/// List loan records
#[utoipa::path(
    get,
    path = "/api/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of loan records, newest first"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn list_loans() {}

/// OpenAPI documentation for the Teller Console API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Teller Console API",
        version = "1.0.0",
        description = "Back-office ledger service: clients, accounts, transfers, service payments and loan evaluation.\n\n## Authentication\n\nMost endpoints require Bearer token authentication. Use the `/api/bootstrap` endpoint to create your first access token, then include it in the `Authorization` header:\n\n```\nAuthorization: Bearer tk_your_token_here\n```",
        license(name = "MIT"),
    ),
    paths(
        health,
        bootstrap,
        create_token,
        list_tokens,
        delete_token,
        create_client,
        list_clients,
        get_client,
        update_client,
        deactivate_client,
        create_account,
        list_accounts,
        get_account,
        set_account_status,
        deposit,
        withdraw,
        transfer_internal,
        transfer_third_party,
        transfer_interbank,
        list_transfers,
        pay_service,
        list_payments,
        request_loan,
        list_loans,
    ),
    components(
        schemas(
            CreateClientRequest,
            UpdateClientRequest,
            CreateAccountRequest,
            AccountStatusRequest,
            DepositRequest,
            WithdrawRequest,
            InternalTransferRequest,
            ExternalTransferRequest,
            PaymentRequest,
            LoanApplicationRequest,
            BootstrapRequest,
            BootstrapResponse,
            CreateTokenRequest,
            TokenInfo,
            Currency,
            AccountKind,
            AccountStatus,
            TransferKind,
            OutcomeStatus,
            ServiceCategory,
            LoanStatus,
            ClientId,
            AccountId,
            TransferId,
            PaymentId,
            LoanId,
        )
    ),

    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Access token management"),
        (name = "clients", description = "Client registry operations"),
        (name = "accounts", description = "Account management operations"),
        (name = "operations", description = "Deposit and withdrawal operations"),
        (name = "transfers", description = "Internal, third-party and interbank transfers"),
        (name = "payments", description = "Service bill payments"),
        (name = "loans", description = "Loan applications and evaluation"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for Bearer token authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
