//! Ledger repository port trait.
//!
//! This is the primary port in the hexagonal architecture. The in-memory
//! adapter implements this trait; the application layer only ever talks
//! to the trait.

use crate::domain::{
    AccessToken, AccessTokenId, Account, AccountId, AccountStatus, Client, ClientId, Loan, LoanId,
    PaymentId, PaymentRecord, TransferId, TransferRecord,
};
use crate::dto::{
    CreateAccountRequest, CreateClientRequest, DepositRequest, ExternalTransferRequest,
    InternalTransferRequest, PaymentRequest, UpdateClientRequest, WithdrawRequest,
};
use crate::error::RepoError;

/// The main repository port for ledger operations.
///
/// Balances have a single owner: every mutation passes through here, and
/// every operation is atomic with respect to concurrent callers - either
/// the full amount is applied or none of it. Multi-account operations
/// (internal transfers) apply both legs inside one critical section.
#[async_trait::async_trait]
pub trait LedgerRepository: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Client Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers a new client.
    async fn create_client(&self, req: CreateClientRequest) -> Result<Client, RepoError>;

    /// Gets a client by ID.
    async fn get_client(&self, id: ClientId) -> Result<Option<Client>, RepoError>;

    /// Lists all clients.
    async fn list_clients(&self) -> Result<Vec<Client>, RepoError>;

    /// Applies a partial update to a client.
    async fn update_client(
        &self,
        id: ClientId,
        req: UpdateClientRequest,
    ) -> Result<Client, RepoError>;

    /// Marks a client Inactive. Clients are never physically deleted.
    async fn deactivate_client(&self, id: ClientId) -> Result<Client, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Account Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Opens a new account with a fresh id and account number.
    async fn create_account(&self, req: CreateAccountRequest) -> Result<Account, RepoError>;

    /// Gets an account by ID.
    async fn get_account(&self, id: AccountId) -> Result<Option<Account>, RepoError>;

    /// Lists all accounts.
    async fn list_accounts(&self) -> Result<Vec<Account>, RepoError>;

    /// Sets an account's status. Idempotent.
    async fn set_account_status(
        &self,
        id: AccountId,
        status: AccountStatus,
    ) -> Result<Account, RepoError>;

    /// Credits money into an account and returns the updated account.
    async fn deposit(&self, req: DepositRequest) -> Result<Account, RepoError>;

    /// Debits money from an account and returns the updated account.
    async fn withdraw(&self, req: WithdrawRequest) -> Result<Account, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Transfer Operations (atomic)
    // ─────────────────────────────────────────────────────────────────────────────

    /// Moves money between two local accounts in one atomic step and
    /// appends the transfer record. A rejected attempt appends a Failed
    /// record and returns the error.
    async fn transfer_internal(
        &self,
        req: InternalTransferRequest,
    ) -> Result<TransferRecord, RepoError>;

    /// Debits the source account for an outbound transfer and appends
    /// the record. A rejected attempt appends a Failed record and
    /// returns the error.
    async fn transfer_external(
        &self,
        req: ExternalTransferRequest,
        kind: crate::domain::TransferKind,
    ) -> Result<TransferRecord, RepoError>;

    /// Gets a transfer record by ID.
    async fn get_transfer(&self, id: TransferId) -> Result<Option<TransferRecord>, RepoError>;

    /// Lists transfer records, newest first.
    async fn list_transfers(&self) -> Result<Vec<TransferRecord>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Debits the account and appends a Pending payment record in one
    /// atomic step. A rejected attempt appends a Failed record and
    /// returns the error.
    async fn record_payment(&self, req: PaymentRequest) -> Result<PaymentRecord, RepoError>;

    /// Settles a Pending payment. `success = false` reverts the debit
    /// (compensating credit) before marking the record Failed.
    async fn settle_payment(
        &self,
        id: PaymentId,
        success: bool,
    ) -> Result<PaymentRecord, RepoError>;

    /// Lists payment records, newest first, optionally for one account.
    async fn list_payments(
        &self,
        account_id: Option<AccountId>,
    ) -> Result<Vec<PaymentRecord>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Loan Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Stores an evaluated loan record.
    async fn create_loan(&self, loan: Loan) -> Result<Loan, RepoError>;

    /// Gets a loan by ID.
    async fn get_loan(&self, id: LoanId) -> Result<Option<Loan>, RepoError>;

    /// Lists loan records, newest first.
    async fn list_loans(&self) -> Result<Vec<Loan>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Access Tokens
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates an access token; returns the stored record and the raw
    /// token (shown only once).
    async fn create_access_token(&self, name: &str) -> Result<(AccessToken, String), RepoError>;

    /// Finds an active token by its hash.
    async fn verify_token_hash(&self, token_hash: &str)
        -> Result<Option<AccessToken>, RepoError>;

    /// Counts stored access tokens (active or not).
    async fn count_access_tokens(&self) -> Result<i64, RepoError>;

    /// Lists all active access tokens.
    async fn list_access_tokens(&self) -> Result<Vec<AccessToken>, RepoError>;

    /// Deactivates an access token. Returns false if the id is unknown.
    async fn delete_access_token(&self, id: AccessTokenId) -> Result<bool, RepoError>;
}
