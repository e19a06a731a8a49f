//! Console Application Service
//!
//! Orchestrates domain operations through the repository and gateway
//! ports. Contains NO infrastructure logic - pure business orchestration.

use teller_types::{
    AccessToken, Account, AccountId, AccountStatus, AppError, BillerGateway, Client, ClientId,
    CreateAccountRequest, CreateClientRequest, DepositRequest, ExternalTransferRequest,
    InternalTransferRequest, LedgerRepository, Loan, LoanApplicationRequest, Money,
    PaymentRecord, PaymentRequest, SubmitPayment, TransferKind, TransferRecord,
    UpdateClientRequest, WithdrawRequest,
};

/// Application service for console operations.
///
/// Generic over `R: LedgerRepository` and `G: BillerGateway` - adapters
/// are injected at compile time. This enables:
/// - Swapping adapters without code changes
/// - Testing with the in-memory repo and a mock gateway
/// - Compile-time checks for port implementation
pub struct ConsoleService<R: LedgerRepository, G: BillerGateway> {
    repo: R,
    biller: G,
}

impl<R: LedgerRepository, G: BillerGateway> ConsoleService<R, G> {
    /// Creates a new console service with the given adapters.
    pub fn new(repo: R, biller: G) -> Self {
        Self { repo, biller }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Client Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers a new client.
    pub async fn create_client(&self, req: CreateClientRequest) -> Result<Client, AppError> {
        if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
            return Err(AppError::BadRequest("Client name cannot be empty".into()));
        }

        self.repo.create_client(req).await.map_err(Into::into)
    }

    /// Gets a client by ID.
    pub async fn get_client(&self, id: ClientId) -> Result<Client, AppError> {
        self.repo
            .get_client(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Client {}", id))))
    }

    /// Lists all clients.
    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.repo.list_clients().await.map_err(Into::into)
    }

    /// Applies a partial update to a client.
    pub async fn update_client(
        &self,
        id: ClientId,
        req: UpdateClientRequest,
    ) -> Result<Client, AppError> {
        self.repo.update_client(id, req).await.map_err(Into::into)
    }

    /// Marks a client Inactive.
    pub async fn deactivate_client(&self, id: ClientId) -> Result<Client, AppError> {
        self.repo.deactivate_client(id).await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Account Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Opens a new account.
    pub async fn create_account(&self, req: CreateAccountRequest) -> Result<Account, AppError> {
        if req.initial_balance < 0 {
            return Err(AppError::BadRequest(
                "Initial balance cannot be negative".into(),
            ));
        }

        self.repo.create_account(req).await.map_err(Into::into)
    }

    /// Gets an account by ID.
    pub async fn get_account(&self, id: AccountId) -> Result<Account, AppError> {
        self.repo
            .get_account(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Account {}", id))))
    }

    /// Lists all accounts.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        self.repo.list_accounts().await.map_err(Into::into)
    }

    /// Sets an account's status. Idempotent.
    pub async fn set_account_status(
        &self,
        id: AccountId,
        status: AccountStatus,
    ) -> Result<Account, AppError> {
        self.repo
            .set_account_status(id, status)
            .await
            .map_err(Into::into)
    }

    /// Deposits money into an account.
    pub async fn deposit(&self, req: DepositRequest) -> Result<Account, AppError> {
        if req.amount <= 0 {
            return Err(AppError::BadRequest("Amount must be positive".into()));
        }

        self.repo.deposit(req).await.map_err(Into::into)
    }

    /// Withdraws money from an account.
    pub async fn withdraw(&self, req: WithdrawRequest) -> Result<Account, AppError> {
        if req.amount <= 0 {
            return Err(AppError::BadRequest("Amount must be positive".into()));
        }

        self.repo.withdraw(req).await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transfer Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Transfers money between two local accounts.
    pub async fn transfer_internal(
        &self,
        req: InternalTransferRequest,
    ) -> Result<TransferRecord, AppError> {
        if req.amount <= 0 {
            return Err(AppError::BadRequest("Amount must be positive".into()));
        }
        if req.from_account_id == req.to_account_id {
            return Err(AppError::BadRequest(
                "Cannot transfer to the same account".into(),
            ));
        }

        self.repo.transfer_internal(req).await.map_err(Into::into)
    }

    /// Transfers money to another holder's account at this bank.
    pub async fn transfer_third_party(
        &self,
        req: ExternalTransferRequest,
    ) -> Result<TransferRecord, AppError> {
        self.transfer_external(req, TransferKind::ToThirdParty).await
    }

    /// Transfers money to an account at another bank.
    pub async fn transfer_interbank(
        &self,
        req: ExternalTransferRequest,
    ) -> Result<TransferRecord, AppError> {
        self.transfer_external(req, TransferKind::InterbankExternal)
            .await
    }

    async fn transfer_external(
        &self,
        req: ExternalTransferRequest,
        kind: TransferKind,
    ) -> Result<TransferRecord, AppError> {
        if req.amount <= 0 {
            return Err(AppError::BadRequest("Amount must be positive".into()));
        }
        if req.destination_account_number.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Destination account number cannot be empty".into(),
            ));
        }

        self.repo
            .transfer_external(req, kind)
            .await
            .map_err(Into::into)
    }

    /// Lists transfer records, newest first.
    pub async fn list_transfers(&self) -> Result<Vec<TransferRecord>, AppError> {
        self.repo.list_transfers().await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Pays a service bill from an account.
    ///
    /// The ledger debits the account and records a Pending payment in one
    /// atomic step; the external biller is then notified. A gateway
    /// failure (including timeout) settles the record as Failed, which
    /// reverts the debit - the record never stays Pending past this call.
    pub async fn pay_service(&self, req: PaymentRequest) -> Result<PaymentRecord, AppError> {
        if req.amount <= 0 {
            return Err(AppError::BadRequest("Amount must be positive".into()));
        }
        if req.supply_code.trim().is_empty() {
            return Err(AppError::BadRequest("Supply code cannot be empty".into()));
        }

        let amount = Money::new(req.amount, req.currency)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let submit = SubmitPayment {
            account_id: req.account_id,
            category: req.category,
            amount,
            reference: req.supply_code.clone(),
        };

        let pending = self.repo.record_payment(req).await?;

        match self.biller.submit_payment(&submit).await {
            Ok(receipt) => {
                tracing::info!(
                    payment_id = %pending.id,
                    confirmation = ?receipt.confirmation,
                    "payment accepted by biller"
                );
                self.repo
                    .settle_payment(pending.id, true)
                    .await
                    .map_err(Into::into)
            }
            Err(e) => {
                tracing::warn!(payment_id = %pending.id, error = %e, "biller rejected payment");
                self.repo.settle_payment(pending.id, false).await?;
                Err(AppError::ExternalService(e.to_string()))
            }
        }
    }

    /// Lists payment records, newest first, optionally for one account.
    pub async fn list_payments(
        &self,
        account_id: Option<AccountId>,
    ) -> Result<Vec<PaymentRecord>, AppError> {
        self.repo.list_payments(account_id).await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Loan Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Submits and evaluates a loan application.
    pub async fn request_loan(&self, req: LoanApplicationRequest) -> Result<Loan, AppError> {
        if req.principal <= 0 {
            return Err(AppError::BadRequest(
                "Loan principal must be greater than zero".into(),
            ));
        }
        let principal = Money::new(req.principal, req.currency)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let loan = Loan::evaluate_application(
            req.client_id,
            principal,
            req.term_months,
            req.annual_rate_pct,
        )
        .map_err(teller_types::RepoError::Domain)?;

        self.repo.create_loan(loan).await.map_err(Into::into)
    }

    /// Lists loan records, newest first.
    pub async fn list_loans(&self) -> Result<Vec<Loan>, AppError> {
        self.repo.list_loans().await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Access Tokens
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists active access tokens.
    pub async fn list_access_tokens(&self) -> Result<Vec<AccessToken>, AppError> {
        self.repo
            .list_access_tokens()
            .await
            .map_err(|e| AppError::Internal(e.to_string()))
    }
}
