//! In-memory ledger adapter.
//!
//! All ledger state lives behind one async mutex - a single-writer
//! serialization point. Every repository operation takes the lock once,
//! does all of its reads and writes inside that critical section and
//! releases it before returning, so concurrent callers can never observe
//! a partially applied operation. No await points while the lock is held.

use std::collections::HashMap;

use rand::distr::Alphanumeric;
use rand::Rng;
use subtle::ConstantTimeEq;
use tokio::sync::Mutex;

use teller_types::{
    AccessToken, AccessTokenId, Account, AccountId, AccountStatus, Client, ClientId, ClientStatus,
    CreateAccountRequest, CreateClientRequest, DepositRequest, DomainError,
    ExternalTransferRequest, InternalTransferRequest, LedgerRepository, Loan, LoanId, Money,
    OutcomeStatus, PaymentId, PaymentRecord, PaymentRequest, RepoError, TransferId, TransferKind,
    TransferRecord, UpdateClientRequest, WithdrawRequest,
};

#[derive(Default)]
pub(crate) struct LedgerState {
    pub(crate) clients: HashMap<ClientId, Client>,
    pub(crate) accounts: HashMap<AccountId, Account>,
    pub(crate) transfers: Vec<TransferRecord>,
    pub(crate) payments: Vec<PaymentRecord>,
    pub(crate) loans: Vec<Loan>,
    pub(crate) tokens: HashMap<AccessTokenId, AccessToken>,
}

/// In-memory implementation of the `LedgerRepository` port.
#[derive(Default)]
pub struct MemoryLedger {
    pub(crate) state: Mutex<LedgerState>,
}

impl MemoryLedger {
    /// Creates a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Display/routing account number: "100" + 10 random digits.
fn generate_account_number() -> String {
    let mut rng = rand::rng();
    format!("100{:010}", rng.random_range(0..10_000_000_000u64))
}

/// Raw bearer token, shown to the caller exactly once.
fn generate_raw_token() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(40)
        .map(char::from)
        .collect();
    format!("tk_{}", suffix)
}

fn positive_money(amount: i64, currency: teller_types::Currency) -> Result<Money, DomainError> {
    if amount <= 0 {
        return Err(DomainError::ValidationError(
            "Amount must be positive".into(),
        ));
    }
    Money::new(amount, currency)
}

#[async_trait::async_trait]
impl LedgerRepository for MemoryLedger {
    // ─────────────────────────────────────────────────────────────────────────────
    // Clients
    // ─────────────────────────────────────────────────────────────────────────────

    async fn create_client(&self, req: CreateClientRequest) -> Result<Client, RepoError> {
        let client = Client::new(
            req.first_name,
            req.last_name,
            req.national_id,
            req.email,
            req.phone,
            req.birth_date,
            req.address,
        )?;

        let mut state = self.state.lock().await;
        state.clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn get_client(&self, id: ClientId) -> Result<Option<Client>, RepoError> {
        let state = self.state.lock().await;
        Ok(state.clients.get(&id).cloned())
    }

    async fn list_clients(&self) -> Result<Vec<Client>, RepoError> {
        let state = self.state.lock().await;
        let mut clients: Vec<Client> = state.clients.values().cloned().collect();
        clients.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
        Ok(clients)
    }

    async fn update_client(
        &self,
        id: ClientId,
        req: UpdateClientRequest,
    ) -> Result<Client, RepoError> {
        let mut state = self.state.lock().await;
        let client = state
            .clients
            .get_mut(&id)
            .ok_or(DomainError::ClientNotFound(id))?;

        if let Some(first_name) = req.first_name {
            if first_name.trim().is_empty() {
                return Err(DomainError::ValidationError(
                    "Client name cannot be empty".into(),
                )
                .into());
            }
            client.first_name = first_name;
        }
        if let Some(last_name) = req.last_name {
            client.last_name = last_name;
        }
        if let Some(national_id) = req.national_id {
            client.national_id = national_id;
        }
        if let Some(email) = req.email {
            if !email.contains('@') {
                return Err(
                    DomainError::ValidationError("Client email is not valid".into()).into(),
                );
            }
            client.email = email;
        }
        if let Some(phone) = req.phone {
            client.phone = phone;
        }
        if let Some(birth_date) = req.birth_date {
            client.birth_date = Some(birth_date);
        }
        if let Some(address) = req.address {
            client.address = address;
        }

        Ok(client.clone())
    }

    async fn deactivate_client(&self, id: ClientId) -> Result<Client, RepoError> {
        let mut state = self.state.lock().await;
        let client = state
            .clients
            .get_mut(&id)
            .ok_or(DomainError::ClientNotFound(id))?;
        client.status = ClientStatus::Inactive;
        Ok(client.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Accounts
    // ─────────────────────────────────────────────────────────────────────────────

    async fn create_account(&self, req: CreateAccountRequest) -> Result<Account, RepoError> {
        let initial = Money::new(req.initial_balance, req.currency)?;

        let mut state = self.state.lock().await;
        let client = state
            .clients
            .get(&req.client_id)
            .ok_or(DomainError::ClientNotFound(req.client_id))?;
        if !client.is_active() {
            return Err(DomainError::ValidationError(
                "Cannot open an account for an inactive client".into(),
            )
            .into());
        }

        let account = Account::new(generate_account_number(), req.client_id, req.kind, initial)?;
        state.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn get_account(&self, id: AccountId) -> Result<Option<Account>, RepoError> {
        let state = self.state.lock().await;
        Ok(state.accounts.get(&id).cloned())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, RepoError> {
        let state = self.state.lock().await;
        let mut accounts: Vec<Account> = state.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(accounts)
    }

    async fn set_account_status(
        &self,
        id: AccountId,
        status: AccountStatus,
    ) -> Result<Account, RepoError> {
        let mut state = self.state.lock().await;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or(DomainError::AccountNotFound(id))?;
        account.status = status;
        Ok(account.clone())
    }

    async fn deposit(&self, req: DepositRequest) -> Result<Account, RepoError> {
        let money = positive_money(req.amount, req.currency)?;

        let mut state = self.state.lock().await;
        let account = state
            .accounts
            .get_mut(&req.account_id)
            .ok_or(DomainError::AccountNotFound(req.account_id))?;
        account.credit(money)?;
        Ok(account.clone())
    }

    async fn withdraw(&self, req: WithdrawRequest) -> Result<Account, RepoError> {
        let money = positive_money(req.amount, req.currency)?;

        let mut state = self.state.lock().await;
        let account = state
            .accounts
            .get_mut(&req.account_id)
            .ok_or(DomainError::AccountNotFound(req.account_id))?;
        account.debit(money)?;
        Ok(account.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transfers
    // ─────────────────────────────────────────────────────────────────────────────

    async fn transfer_internal(
        &self,
        req: InternalTransferRequest,
    ) -> Result<TransferRecord, RepoError> {
        // Malformed input fails before any record exists.
        let money = positive_money(req.amount, req.currency)?;
        if req.from_account_id == req.to_account_id {
            return Err(DomainError::ValidationError(
                "Cannot transfer to the same account".into(),
            )
            .into());
        }

        let mut state = self.state.lock().await;

        // Two-phase commit under one lock: validate everything and
        // compute both new balances, then assign. Either both legs land
        // or neither does.
        let verdict: Result<(Money, Money), DomainError> = (|| {
            let source = state
                .accounts
                .get(&req.from_account_id)
                .ok_or(DomainError::AccountNotFound(req.from_account_id))?;
            if !source.is_active() {
                return Err(DomainError::AccountBlocked(source.id));
            }
            if source.currency() != money.currency() {
                return Err(DomainError::CurrencyMismatch {
                    expected: source.currency(),
                    got: money.currency(),
                });
            }
            let dest = state
                .accounts
                .get(&req.to_account_id)
                .ok_or(DomainError::AccountNotFound(req.to_account_id))?;
            if !dest.is_active() {
                return Err(DomainError::AccountBlocked(dest.id));
            }
            if dest.currency() != source.currency() {
                return Err(DomainError::CrossCurrencyTransfer);
            }
            let new_source = source.balance.checked_sub(money)?;
            let new_dest = dest.balance.checked_add(money)?;
            Ok((new_source, new_dest))
        })();

        match verdict {
            Ok((new_source, new_dest)) => {
                if let Some(account) = state.accounts.get_mut(&req.from_account_id) {
                    account.balance = new_source;
                }
                if let Some(account) = state.accounts.get_mut(&req.to_account_id) {
                    account.balance = new_dest;
                }
                let record = TransferRecord::internal(
                    req.from_account_id,
                    req.to_account_id,
                    money,
                    req.memo,
                    OutcomeStatus::Succeeded,
                );
                state.transfers.push(record.clone());
                Ok(record)
            }
            Err(e) => {
                // Audit trail: attempts rejected by the ledger are still recorded.
                let record = TransferRecord::internal(
                    req.from_account_id,
                    req.to_account_id,
                    money,
                    req.memo,
                    OutcomeStatus::Failed,
                );
                state.transfers.push(record);
                Err(e.into())
            }
        }
    }

    async fn transfer_external(
        &self,
        req: ExternalTransferRequest,
        kind: TransferKind,
    ) -> Result<TransferRecord, RepoError> {
        let money = positive_money(req.amount, req.currency)?;
        if req.destination_account_number.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Destination account number cannot be empty".into(),
            )
            .into());
        }

        let mut state = self.state.lock().await;

        let verdict: Result<(), DomainError> = match state.accounts.get_mut(&req.from_account_id)
        {
            None => Err(DomainError::AccountNotFound(req.from_account_id)),
            Some(account) => account.debit(money),
        };

        let status = match verdict {
            Ok(()) => OutcomeStatus::Succeeded,
            Err(_) => OutcomeStatus::Failed,
        };
        let record = TransferRecord::external(
            kind,
            req.from_account_id,
            req.destination_account_number,
            req.bank_name,
            money,
            req.memo,
            status,
        );
        state.transfers.push(record.clone());

        verdict.map(|_| record).map_err(Into::into)
    }

    async fn get_transfer(&self, id: TransferId) -> Result<Option<TransferRecord>, RepoError> {
        let state = self.state.lock().await;
        Ok(state.transfers.iter().find(|t| t.id == id).cloned())
    }

    async fn list_transfers(&self) -> Result<Vec<TransferRecord>, RepoError> {
        let state = self.state.lock().await;
        Ok(state.transfers.iter().rev().cloned().collect())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payments
    // ─────────────────────────────────────────────────────────────────────────────

    async fn record_payment(&self, req: PaymentRequest) -> Result<PaymentRecord, RepoError> {
        let money = positive_money(req.amount, req.currency)?;
        if req.supply_code.trim().is_empty() {
            return Err(
                DomainError::ValidationError("Supply code cannot be empty".into()).into(),
            );
        }

        let mut state = self.state.lock().await;

        let verdict: Result<(), DomainError> = match state.accounts.get_mut(&req.account_id) {
            None => Err(DomainError::AccountNotFound(req.account_id)),
            Some(account) => account.debit(money),
        };

        match verdict {
            Ok(()) => {
                let record = PaymentRecord::new(
                    req.account_id,
                    req.category,
                    req.supply_code,
                    money,
                    req.memo,
                    OutcomeStatus::Pending,
                );
                state.payments.push(record.clone());
                Ok(record)
            }
            Err(e) => {
                let record = PaymentRecord::new(
                    req.account_id,
                    req.category,
                    req.supply_code,
                    money,
                    req.memo,
                    OutcomeStatus::Failed,
                );
                state.payments.push(record);
                Err(e.into())
            }
        }
    }

    async fn settle_payment(
        &self,
        id: PaymentId,
        success: bool,
    ) -> Result<PaymentRecord, RepoError> {
        let mut state = self.state.lock().await;

        let record = {
            let payment = state
                .payments
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(RepoError::NotFound)?;
            if payment.status != OutcomeStatus::Pending {
                return Err(RepoError::Conflict(format!(
                    "Payment {} is already settled",
                    id
                )));
            }
            payment.status = if success {
                OutcomeStatus::Succeeded
            } else {
                OutcomeStatus::Failed
            };
            payment.clone()
        };

        if !success {
            // Compensating credit: restore the debited funds even if the
            // account got blocked between debit and settlement.
            if let Some(account) = state.accounts.get_mut(&record.account_id) {
                account.revert_debit(record.amount)?;
                tracing::warn!(payment_id = %record.id, account_id = %record.account_id, "reverted payment debit");
            }
        }

        Ok(record)
    }

    async fn list_payments(
        &self,
        account_id: Option<AccountId>,
    ) -> Result<Vec<PaymentRecord>, RepoError> {
        let state = self.state.lock().await;
        Ok(state
            .payments
            .iter()
            .rev()
            .filter(|p| account_id.is_none_or(|id| p.account_id == id))
            .cloned()
            .collect())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Loans
    // ─────────────────────────────────────────────────────────────────────────────

    async fn create_loan(&self, loan: Loan) -> Result<Loan, RepoError> {
        let mut state = self.state.lock().await;
        if !state.clients.contains_key(&loan.client_id) {
            return Err(DomainError::ClientNotFound(loan.client_id).into());
        }
        state.loans.push(loan.clone());
        Ok(loan)
    }

    async fn get_loan(&self, id: LoanId) -> Result<Option<Loan>, RepoError> {
        let state = self.state.lock().await;
        Ok(state.loans.iter().find(|l| l.id == id).cloned())
    }

    async fn list_loans(&self) -> Result<Vec<Loan>, RepoError> {
        let state = self.state.lock().await;
        Ok(state.loans.iter().rev().cloned().collect())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Access Tokens
    // ─────────────────────────────────────────────────────────────────────────────

    async fn create_access_token(&self, name: &str) -> Result<(AccessToken, String), RepoError> {
        if name.trim().is_empty() {
            return Err(
                DomainError::ValidationError("Token name cannot be empty".into()).into(),
            );
        }

        let raw = generate_raw_token();
        let token = AccessToken::new(name.to_string(), crate::security::hash_token(&raw));

        let mut state = self.state.lock().await;
        state.tokens.insert(token.id, token.clone());
        Ok((token, raw))
    }

    async fn verify_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<AccessToken>, RepoError> {
        let mut state = self.state.lock().await;
        let found = state.tokens.values_mut().find(|t| {
            t.is_active && bool::from(t.token_hash.as_bytes().ct_eq(token_hash.as_bytes()))
        });
        Ok(found.map(|t| {
            t.last_used_at = Some(chrono::Utc::now());
            t.clone()
        }))
    }

    async fn count_access_tokens(&self) -> Result<i64, RepoError> {
        let state = self.state.lock().await;
        Ok(state.tokens.len() as i64)
    }

    async fn list_access_tokens(&self) -> Result<Vec<AccessToken>, RepoError> {
        let state = self.state.lock().await;
        let mut tokens: Vec<AccessToken> = state
            .tokens
            .values()
            .filter(|t| t.is_active)
            .cloned()
            .collect();
        tokens.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tokens)
    }

    async fn delete_access_token(&self, id: AccessTokenId) -> Result<bool, RepoError> {
        let mut state = self.state.lock().await;
        match state.tokens.get_mut(&id) {
            Some(token) => {
                token.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teller_types::{AccountKind, Currency};

    async fn client(ledger: &MemoryLedger) -> Client {
        ledger
            .create_client(CreateClientRequest {
                first_name: "Maria".into(),
                last_name: "Lopez Rodriguez".into(),
                national_id: "87654321".into(),
                email: "maria.lopez@example.com".into(),
                phone: "72654321".into(),
                birth_date: None,
                address: "Avenida Heroinas 456".into(),
            })
            .await
            .unwrap()
    }

    async fn account(
        ledger: &MemoryLedger,
        owner: ClientId,
        balance: i64,
        currency: Currency,
    ) -> Account {
        ledger
            .create_account(CreateAccountRequest {
                client_id: owner,
                kind: AccountKind::Savings,
                currency,
                initial_balance: balance,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_account_generates_number() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let acc = account(&ledger, owner.id, 0, Currency::BOB).await;

        assert!(acc.account_number.starts_with("100"));
        assert_eq!(acc.account_number.len(), 13);
        assert_eq!(acc.balance.amount(), 0);
    }

    #[tokio::test]
    async fn test_create_account_negative_initial_balance_fails() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let result = ledger
            .create_account(CreateAccountRequest {
                client_id: owner.id,
                kind: AccountKind::Checking,
                currency: Currency::BOB,
                initial_balance: -1,
            })
            .await;
        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::NegativeAmount))
        ));
    }

    #[tokio::test]
    async fn test_create_account_unknown_client_fails() {
        let ledger = MemoryLedger::new();
        let result = ledger
            .create_account(CreateAccountRequest {
                client_id: ClientId::new(),
                kind: AccountKind::Savings,
                currency: Currency::BOB,
                initial_balance: 0,
            })
            .await;
        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::ClientNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_deposit_and_withdraw() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let acc = account(&ledger, owner.id, 100_000, Currency::BOB).await;

        let after = ledger
            .deposit(DepositRequest {
                account_id: acc.id,
                amount: 50_000,
                currency: Currency::BOB,
            })
            .await
            .unwrap();
        assert_eq!(after.balance.amount(), 150_000);

        let after = ledger
            .withdraw(WithdrawRequest {
                account_id: acc.id,
                amount: 70_000,
                currency: Currency::BOB,
            })
            .await
            .unwrap();
        assert_eq!(after.balance.amount(), 80_000);
    }

    #[tokio::test]
    async fn test_overdraft_fails_and_balance_unchanged() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let acc = account(&ledger, owner.id, 10_000, Currency::USD).await;

        let result = ledger
            .withdraw(WithdrawRequest {
                account_id: acc.id,
                amount: 10_001,
                currency: Currency::USD,
            })
            .await;
        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::InsufficientFunds { .. }))
        ));

        let unchanged = ledger.get_account(acc.id).await.unwrap().unwrap();
        assert_eq!(unchanged.balance.amount(), 10_000);
    }

    #[tokio::test]
    async fn test_blocked_account_rejects_deposit_and_withdraw() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let acc = account(&ledger, owner.id, 1_245_000, Currency::BOB).await;
        ledger
            .set_account_status(acc.id, AccountStatus::Blocked)
            .await
            .unwrap();

        let deposit = ledger
            .deposit(DepositRequest {
                account_id: acc.id,
                amount: 100,
                currency: Currency::BOB,
            })
            .await;
        assert!(matches!(
            deposit,
            Err(RepoError::Domain(DomainError::AccountBlocked(_)))
        ));

        let withdraw = ledger
            .withdraw(WithdrawRequest {
                account_id: acc.id,
                amount: 100,
                currency: Currency::BOB,
            })
            .await;
        assert!(matches!(
            withdraw,
            Err(RepoError::Domain(DomainError::AccountBlocked(_)))
        ));

        let unchanged = ledger.get_account(acc.id).await.unwrap().unwrap();
        assert_eq!(unchanged.balance.amount(), 1_245_000);
    }

    #[tokio::test]
    async fn test_set_status_is_idempotent() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let acc = account(&ledger, owner.id, 0, Currency::BOB).await;

        for _ in 0..2 {
            let updated = ledger
                .set_account_status(acc.id, AccountStatus::Blocked)
                .await
                .unwrap();
            assert_eq!(updated.status, AccountStatus::Blocked);
        }
    }

    #[tokio::test]
    async fn test_internal_transfer_conserves_funds() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        // The console's canonical example: Bs 5,500.50 and Bs 2,300.00.
        let a = account(&ledger, owner.id, 550_050, Currency::BOB).await;
        let b = account(&ledger, owner.id, 230_000, Currency::BOB).await;

        let record = ledger
            .transfer_internal(InternalTransferRequest {
                from_account_id: a.id,
                to_account_id: b.id,
                amount: 50_000,
                currency: Currency::BOB,
                memo: Some("between my accounts".into()),
            })
            .await
            .unwrap();

        assert_eq!(record.kind, TransferKind::Internal);
        assert_eq!(record.status, OutcomeStatus::Succeeded);

        let a_after = ledger.get_account(a.id).await.unwrap().unwrap();
        let b_after = ledger.get_account(b.id).await.unwrap().unwrap();
        assert_eq!(a_after.balance.amount(), 500_050);
        assert_eq!(b_after.balance.amount(), 280_000);
        assert_eq!(
            a_after.balance.amount() + b_after.balance.amount(),
            550_050 + 230_000
        );
    }

    #[tokio::test]
    async fn test_internal_transfer_to_blocked_destination_touches_neither_balance() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let a = account(&ledger, owner.id, 100_000, Currency::BOB).await;
        let b = account(&ledger, owner.id, 50_000, Currency::BOB).await;
        ledger
            .set_account_status(b.id, AccountStatus::Blocked)
            .await
            .unwrap();

        let result = ledger
            .transfer_internal(InternalTransferRequest {
                from_account_id: a.id,
                to_account_id: b.id,
                amount: 10_000,
                currency: Currency::BOB,
                memo: None,
            })
            .await;
        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::AccountBlocked(_)))
        ));

        // The failed attempt left a record but moved no money.
        let a_after = ledger.get_account(a.id).await.unwrap().unwrap();
        let b_after = ledger.get_account(b.id).await.unwrap().unwrap();
        assert_eq!(a_after.balance.amount(), 100_000);
        assert_eq!(b_after.balance.amount(), 50_000);

        let transfers = ledger.list_transfers().await.unwrap();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].status, OutcomeStatus::Failed);
    }

    #[tokio::test]
    async fn test_internal_transfer_cross_currency_rejected() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let a = account(&ledger, owner.id, 100_000, Currency::BOB).await;
        let b = account(&ledger, owner.id, 50_000, Currency::USD).await;

        let result = ledger
            .transfer_internal(InternalTransferRequest {
                from_account_id: a.id,
                to_account_id: b.id,
                amount: 10_000,
                currency: Currency::BOB,
                memo: None,
            })
            .await;
        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::CrossCurrencyTransfer))
        ));
    }

    #[tokio::test]
    async fn test_same_account_transfer_rejected_without_record() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let a = account(&ledger, owner.id, 100_000, Currency::BOB).await;

        let result = ledger
            .transfer_internal(InternalTransferRequest {
                from_account_id: a.id,
                to_account_id: a.id,
                amount: 10_000,
                currency: Currency::BOB,
                memo: None,
            })
            .await;
        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::ValidationError(_)))
        ));
        assert!(ledger.list_transfers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_external_transfer_debits_source_only() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let a = account(&ledger, owner.id, 100_000, Currency::BOB).await;

        let record = ledger
            .transfer_external(
                ExternalTransferRequest {
                    from_account_id: a.id,
                    destination_account_number: "2009876543".into(),
                    bank_name: Some("Banco Union".into()),
                    amount: 30_000,
                    currency: Currency::BOB,
                    memo: Some("supplier invoice".into()),
                },
                TransferKind::InterbankExternal,
            )
            .await
            .unwrap();

        assert_eq!(record.kind, TransferKind::InterbankExternal);
        assert_eq!(record.status, OutcomeStatus::Succeeded);

        let a_after = ledger.get_account(a.id).await.unwrap().unwrap();
        assert_eq!(a_after.balance.amount(), 70_000);
    }

    #[tokio::test]
    async fn test_external_transfer_insufficient_funds_records_failed() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let a = account(&ledger, owner.id, 10_000, Currency::BOB).await;

        let result = ledger
            .transfer_external(
                ExternalTransferRequest {
                    from_account_id: a.id,
                    destination_account_number: "2009876543".into(),
                    bank_name: None,
                    amount: 20_000,
                    currency: Currency::BOB,
                    memo: None,
                },
                TransferKind::ToThirdParty,
            )
            .await;
        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::InsufficientFunds { .. }))
        ));

        let transfers = ledger.list_transfers().await.unwrap();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].status, OutcomeStatus::Failed);
        assert_eq!(
            ledger
                .get_account(a.id)
                .await
                .unwrap()
                .unwrap()
                .balance
                .amount(),
            10_000
        );
    }

    #[tokio::test]
    async fn test_payment_debits_then_settles() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let a = account(&ledger, owner.id, 100_000, Currency::BOB).await;

        let pending = ledger
            .record_payment(PaymentRequest {
                account_id: a.id,
                category: teller_types::ServiceCategory::Electricity,
                supply_code: "LUZ-123456".into(),
                amount: 25_000,
                currency: Currency::BOB,
                memo: Some("monthly bill".into()),
            })
            .await
            .unwrap();
        assert_eq!(pending.status, OutcomeStatus::Pending);
        assert_eq!(
            ledger
                .get_account(a.id)
                .await
                .unwrap()
                .unwrap()
                .balance
                .amount(),
            75_000
        );

        let settled = ledger.settle_payment(pending.id, true).await.unwrap();
        assert_eq!(settled.status, OutcomeStatus::Succeeded);
        assert_eq!(
            ledger
                .get_account(a.id)
                .await
                .unwrap()
                .unwrap()
                .balance
                .amount(),
            75_000
        );
    }

    #[tokio::test]
    async fn test_failed_settlement_reverts_debit() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let a = account(&ledger, owner.id, 100_000, Currency::BOB).await;

        let pending = ledger
            .record_payment(PaymentRequest {
                account_id: a.id,
                category: teller_types::ServiceCategory::Internet,
                supply_code: "NET-345678".into(),
                amount: 19_999,
                currency: Currency::BOB,
                memo: None,
            })
            .await
            .unwrap();

        let settled = ledger.settle_payment(pending.id, false).await.unwrap();
        assert_eq!(settled.status, OutcomeStatus::Failed);
        assert_eq!(
            ledger
                .get_account(a.id)
                .await
                .unwrap()
                .unwrap()
                .balance
                .amount(),
            100_000
        );
    }

    #[tokio::test]
    async fn test_settle_twice_conflicts() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let a = account(&ledger, owner.id, 100_000, Currency::BOB).await;

        let pending = ledger
            .record_payment(PaymentRequest {
                account_id: a.id,
                category: teller_types::ServiceCategory::Water,
                supply_code: "AGUA-789012".into(),
                amount: 15_000,
                currency: Currency::BOB,
                memo: None,
            })
            .await
            .unwrap();

        ledger.settle_payment(pending.id, true).await.unwrap();
        let second = ledger.settle_payment(pending.id, true).await;
        assert!(matches!(second, Err(RepoError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_list_payments_filters_by_account() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let a = account(&ledger, owner.id, 100_000, Currency::BOB).await;
        let b = account(&ledger, owner.id, 100_000, Currency::BOB).await;

        for (acc, code) in [(a.id, "LUZ-1"), (b.id, "AGUA-2")] {
            let rec = ledger
                .record_payment(PaymentRequest {
                    account_id: acc,
                    category: teller_types::ServiceCategory::Other,
                    supply_code: code.into(),
                    amount: 1_000,
                    currency: Currency::BOB,
                    memo: None,
                })
                .await
                .unwrap();
            ledger.settle_payment(rec.id, true).await.unwrap();
        }

        assert_eq!(ledger.list_payments(None).await.unwrap().len(), 2);
        let only_a = ledger.list_payments(Some(a.id)).await.unwrap();
        assert_eq!(only_a.len(), 1);
        assert_eq!(only_a[0].account_id, a.id);
    }

    #[tokio::test]
    async fn test_get_transfer_by_id() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;
        let a = account(&ledger, owner.id, 100_000, Currency::BOB).await;
        let b = account(&ledger, owner.id, 0, Currency::BOB).await;

        let record = ledger
            .transfer_internal(InternalTransferRequest {
                from_account_id: a.id,
                to_account_id: b.id,
                amount: 10_000,
                currency: Currency::BOB,
                memo: None,
            })
            .await
            .unwrap();

        let found = ledger.get_transfer(record.id).await.unwrap().unwrap();
        assert_eq!(found.id, record.id);
        assert!(
            ledger
                .get_transfer(TransferId::new())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_get_loan_by_id() {
        let ledger = MemoryLedger::new();
        let owner = client(&ledger).await;

        let loan = teller_types::Loan::evaluate_application(
            owner.id,
            Money::new(500_000, Currency::BOB).unwrap(),
            24,
            8.5,
        )
        .unwrap();
        let stored = ledger.create_loan(loan).await.unwrap();

        let found = ledger.get_loan(stored.id).await.unwrap().unwrap();
        assert_eq!(found.id, stored.id);
        assert!(ledger.get_loan(LoanId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_client_lifecycle() {
        let ledger = MemoryLedger::new();
        let created = client(&ledger).await;

        let updated = ledger
            .update_client(
                created.id,
                UpdateClientRequest {
                    phone: Some("70000000".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.phone, "70000000");
        assert_eq!(updated.first_name, "Maria");

        let deactivated = ledger.deactivate_client(created.id).await.unwrap();
        assert_eq!(deactivated.status, ClientStatus::Inactive);

        // Still listed: clients are never physically deleted.
        assert_eq!(ledger.list_clients().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_access_token_roundtrip() {
        let ledger = MemoryLedger::new();
        let (token, raw) = ledger.create_access_token("console").await.unwrap();
        assert!(raw.starts_with("tk_"));

        let hash = crate::security::hash_token(&raw);
        let found = ledger.verify_token_hash(&hash).await.unwrap().unwrap();
        assert_eq!(found.id, token.id);
        assert!(found.last_used_at.is_some());

        assert!(ledger.delete_access_token(token.id).await.unwrap());
        assert!(ledger.verify_token_hash(&hash).await.unwrap().is_none());
        // Deactivated, not removed.
        assert_eq!(ledger.count_access_tokens().await.unwrap(), 1);
    }
}
