//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use teller_types::{BillerGateway, LedgerRepository};

use super::auth::auth_middleware;
use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::ConsoleService;
use crate::openapi::ApiDoc;

/// HTTP Server for the Teller Console API.
pub struct HttpServer<R: LedgerRepository, G: BillerGateway> {
    state: Arc<AppState<R, G>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<R: LedgerRepository, G: BillerGateway> HttpServer<R, G> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: ConsoleService<R, G>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(RateLimiterState::default()), // 100 req/min default
        }
    }

    /// Creates a new HTTP server with custom rate limiting.
    pub fn with_rate_limit(service: ConsoleService<R, G>, requests_per_minute: u32) -> Self {
        use std::time::Duration;
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(RateLimiterState::new(
                requests_per_minute,
                Duration::from_secs(60),
            )),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/bootstrap", post(handlers::bootstrap::<R, G>))
            .route("/api/tokens", post(handlers::create_token::<R, G>))
            .route("/api/tokens", get(handlers::list_tokens::<R, G>))
            .route("/api/tokens/{id}", delete(handlers::delete_token::<R, G>))
            .route("/api/clients", post(handlers::create_client::<R, G>))
            .route("/api/clients", get(handlers::list_clients::<R, G>))
            .route("/api/clients/{id}", get(handlers::get_client::<R, G>))
            .route("/api/clients/{id}", patch(handlers::update_client::<R, G>))
            .route(
                "/api/clients/{id}",
                delete(handlers::deactivate_client::<R, G>),
            )
            .route("/api/accounts", post(handlers::create_account::<R, G>))
            .route("/api/accounts", get(handlers::list_accounts::<R, G>))
            .route("/api/accounts/{id}", get(handlers::get_account::<R, G>))
            .route(
                "/api/accounts/{id}/status",
                patch(handlers::set_account_status::<R, G>),
            )
            .route("/api/operations/deposit", post(handlers::deposit::<R, G>))
            .route("/api/operations/withdraw", post(handlers::withdraw::<R, G>))
            .route(
                "/api/transfers/internal",
                post(handlers::transfer_internal::<R, G>),
            )
            .route(
                "/api/transfers/third-party",
                post(handlers::transfer_third_party::<R, G>),
            )
            .route(
                "/api/transfers/interbank",
                post(handlers::transfer_interbank::<R, G>),
            )
            .route("/api/transfers", get(handlers::list_transfers::<R, G>))
            .route("/api/payments", post(handlers::pay_service::<R, G>))
            .route("/api/payments", get(handlers::list_payments::<R, G>))
            .route("/api/loans", post(handlers::request_loan::<R, G>))
            .route("/api/loans", get(handlers::list_loans::<R, G>))
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                auth_middleware::<R, G>,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
