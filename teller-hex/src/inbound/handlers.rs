//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use teller_types::{
    AccountId, AccountStatusRequest, AppError, BillerGateway, ClientId, CreateAccountRequest,
    CreateClientRequest, DepositRequest, ExternalTransferRequest, InternalTransferRequest,
    LedgerRepository, LoanApplicationRequest, PaymentRequest, UpdateClientRequest,
    WithdrawRequest,
};

use crate::ConsoleService;

/// Application state shared across handlers.
pub struct AppState<R: LedgerRepository, G: BillerGateway> {
    pub service: ConsoleService<R, G>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::AccountBlocked(msg) => {
                (StatusCode::CONFLICT, format!("Account is blocked: {}", msg))
            }
            AppError::InsufficientFunds {
                available,
                requested,
            } => (
                StatusCode::BAD_REQUEST,
                format!(
                    "Insufficient funds: available {}, requested {}",
                    available, requested
                ),
            ),
            AppError::ExternalService(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Clients
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, req))]
pub async fn create_client<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(req): Json<CreateClientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let client = state.service.create_client(req).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

#[tracing::instrument(skip(state))]
pub async fn list_clients<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
) -> Result<impl IntoResponse, ApiError> {
    let clients = state.service.list_clients().await?;
    Ok(Json(clients))
}

#[tracing::instrument(skip(state), fields(client_id = %id))]
pub async fn get_client<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let client_id: ClientId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid client ID".into()))?;

    let client = state.service.get_client(client_id).await?;
    Ok(Json(client))
}

#[tracing::instrument(skip(state, req), fields(client_id = %id))]
pub async fn update_client<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateClientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let client_id: ClientId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid client ID".into()))?;

    let client = state.service.update_client(client_id, req).await?;
    Ok(Json(client))
}

/// Marks a client Inactive. Clients are never physically deleted.
#[tracing::instrument(skip(state), fields(client_id = %id))]
pub async fn deactivate_client<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let client_id: ClientId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid client ID".into()))?;

    let client = state.service.deactivate_client(client_id).await?;
    Ok(Json(client))
}

// ─────────────────────────────────────────────────────────────────────────────
// Accounts
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state), fields(client_id = %req.client_id))]
pub async fn create_account<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state.service.create_account(req).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

#[tracing::instrument(skip(state))]
pub async fn list_accounts<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
) -> Result<impl IntoResponse, ApiError> {
    let accounts = state.service.list_accounts().await?;
    Ok(Json(accounts))
}

#[tracing::instrument(skip(state), fields(account_id = %id))]
pub async fn get_account<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let account_id: AccountId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid account ID".into()))?;

    let account = state.service.get_account(account_id).await?;
    Ok(Json(account))
}

/// Toggles an account between Active and Blocked.
#[tracing::instrument(skip(state), fields(account_id = %id, status = ?req.status))]
pub async fn set_account_status<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Path(id): Path<String>,
    Json(req): Json<AccountStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account_id: AccountId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid account ID".into()))?;

    let account = state
        .service
        .set_account_status(account_id, req.status)
        .await?;
    Ok(Json(account))
}

// ─────────────────────────────────────────────────────────────────────────────
// Balance operations
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state), fields(account_id = %req.account_id, amount = req.amount))]
pub async fn deposit<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(req): Json<DepositRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state.service.deposit(req).await?;
    Ok(Json(account))
}

#[tracing::instrument(skip(state), fields(account_id = %req.account_id, amount = req.amount))]
pub async fn withdraw<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(req): Json<WithdrawRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state.service.withdraw(req).await?;
    Ok(Json(account))
}

// ─────────────────────────────────────────────────────────────────────────────
// Transfers
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state), fields(from = %req.from_account_id, to = %req.to_account_id, amount = req.amount))]
pub async fn transfer_internal<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(req): Json<InternalTransferRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.service.transfer_internal(req).await?;
    Ok(Json(record))
}

#[tracing::instrument(skip(state), fields(from = %req.from_account_id, amount = req.amount))]
pub async fn transfer_third_party<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(req): Json<ExternalTransferRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.service.transfer_third_party(req).await?;
    Ok(Json(record))
}

#[tracing::instrument(skip(state), fields(from = %req.from_account_id, amount = req.amount))]
pub async fn transfer_interbank<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(req): Json<ExternalTransferRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.service.transfer_interbank(req).await?;
    Ok(Json(record))
}

#[tracing::instrument(skip(state))]
pub async fn list_transfers<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
) -> Result<impl IntoResponse, ApiError> {
    let transfers = state.service.list_transfers().await?;
    Ok(Json(transfers))
}

// ─────────────────────────────────────────────────────────────────────────────
// Payments
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state), fields(account_id = %req.account_id, amount = req.amount))]
pub async fn pay_service<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(req): Json<PaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.service.pay_service(req).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[derive(Debug, serde::Deserialize)]
pub struct PaymentListQuery {
    pub account_id: Option<String>,
}

#[tracing::instrument(skip(state))]
pub async fn list_payments<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Query(query): Query<PaymentListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let account_id = match query.account_id {
        Some(raw) => Some(
            raw.parse::<AccountId>()
                .map_err(|_| AppError::BadRequest("Invalid account ID".into()))?,
        ),
        None => None,
    };

    let payments = state.service.list_payments(account_id).await?;
    Ok(Json(payments))
}

// ─────────────────────────────────────────────────────────────────────────────
// Loans
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state), fields(client_id = %req.client_id, principal = req.principal))]
pub async fn request_loan<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(req): Json<LoanApplicationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let loan = state.service.request_loan(req).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

#[tracing::instrument(skip(state))]
pub async fn list_loans<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
) -> Result<impl IntoResponse, ApiError> {
    let loans = state.service.list_loans().await?;
    Ok(Json(loans))
}

// ─────────────────────────────────────────────────────────────────────────────
// Access tokens
// ─────────────────────────────────────────────────────────────────────────────

/// Bootstrap endpoint - creates the first access token.
///
/// This endpoint only works when there are NO existing tokens in the
/// system. It returns the raw token (only shown once) that should be
/// saved securely.
#[derive(Debug, serde::Deserialize, utoipa::ToSchema)]
pub struct BootstrapRequest {
    /// Name for the access token
    #[schema(example = "console-admin")]
    pub name: String,
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct BootstrapResponse {
    /// The generated access token (shown only once)
    #[schema(example = "tk_abc123xyz...")]
    pub token: String,
    /// Informational message
    pub message: String,
}

#[tracing::instrument(skip(state), fields(token_name = %req.name))]
pub async fn bootstrap<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(req): Json<BootstrapRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token_count = state
        .service
        .repo()
        .count_access_tokens()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if token_count > 0 {
        return Err(AppError::BadRequest(
            "Bootstrap not allowed: access tokens already exist. Use an existing token to create new ones.".into()
        ).into());
    }

    let (_token, raw) = state
        .service
        .repo()
        .create_access_token(&req.name)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(BootstrapResponse {
            token: raw,
            message: "First access token created. Save this token securely - it won't be shown again!"
                .into(),
        }),
    ))
}

/// Request to create a new access token.
#[derive(Debug, serde::Deserialize, utoipa::ToSchema)]
pub struct CreateTokenRequest {
    /// Name for the access token
    #[schema(example = "branch-office")]
    pub name: String,
}

/// Access token info (without the raw token).
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct TokenInfo {
    /// Access token ID
    #[schema(value_type = String, example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: teller_types::AccessTokenId,
    /// Name of the token
    pub name: String,
    /// Whether the token is active
    pub is_active: bool,
    /// When the token was created (ISO 8601)
    #[schema(value_type = String, example = "2024-01-01T00:00:00Z")]
    pub created_at: String,
    /// When the token was last used (ISO 8601)
    #[schema(value_type = Option<String>)]
    pub last_used_at: Option<String>,
}

/// Create a new access token (requires authentication).
#[tracing::instrument(skip(state), fields(token_name = %req.name))]
pub async fn create_token<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Json(req): Json<CreateTokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (_token, raw) = state
        .service
        .repo()
        .create_access_token(&req.name)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(BootstrapResponse {
            token: raw,
            message: "Access token created. Save this token securely - it won't be shown again!"
                .into(),
        }),
    ))
}

/// List all active access tokens (without exposing raw tokens).
#[tracing::instrument(skip(state))]
pub async fn list_tokens<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
) -> Result<impl IntoResponse, ApiError> {
    let tokens = state.service.list_access_tokens().await?;

    let response: Vec<TokenInfo> = tokens
        .into_iter()
        .map(|t| TokenInfo {
            id: t.id,
            name: t.name,
            is_active: t.is_active,
            created_at: t.created_at.to_rfc3339(),
            last_used_at: t.last_used_at.map(|dt| dt.to_rfc3339()),
        })
        .collect();

    Ok(Json(response))
}

/// Delete (deactivate) an access token.
#[tracing::instrument(skip(state), fields(token_id = %id))]
pub async fn delete_token<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let token_id: teller_types::AccessTokenId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid token ID".into()))?;

    let deleted = state
        .service
        .repo()
        .delete_access_token(token_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Err(AppError::NotFound("Access token not found".into()).into())
    }
}
