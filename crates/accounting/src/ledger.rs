use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use rust_decimal::Decimal;

use tally_core::{AccountNumber, DomainError, DomainResult, InMemoryJournal, InMemoryStore, Journal, Store};

use crate::account::Account;
use crate::transaction::{Transaction, TransactionError, TransactionKind};

/// Account ledger: accounts plus the journal of applied transactions.
///
/// Every mutating operation runs as one check-then-apply under a per-ledger
/// lock, so a failed check never leaves a partial write behind.
#[derive(Debug)]
pub struct Ledger<A = InMemoryStore<Account>, J = InMemoryJournal<Transaction>> {
    accounts: A,
    transactions: J,
    write_lock: Mutex<()>,
}

impl Ledger {
    /// Ledger backed by the in-memory store and journal.
    pub fn in_memory() -> Self {
        Self::new(InMemoryStore::new(), InMemoryJournal::new())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<A, J> Ledger<A, J>
where
    A: Store<Account>,
    J: Journal<Transaction>,
{
    pub fn new(accounts: A, transactions: J) -> Self {
        Self {
            accounts,
            transactions,
            write_lock: Mutex::new(()),
        }
    }

    /// Open an account with the given balance.
    ///
    /// Always succeeds. Account numbers are not checked for uniqueness: a
    /// duplicate is stored, and lookups keep resolving to the first account
    /// opened under that number. Use [`Ledger::open_account`] to refuse
    /// duplicates.
    pub fn create_account(
        &self,
        number: impl Into<AccountNumber>,
        holder: impl Into<String>,
        initial_balance: Decimal,
    ) -> Account {
        let _guard = self.lock();
        self.insert_account(Account::new(number.into(), holder, initial_balance))
    }

    /// Open an account, refusing a number that is already in use.
    pub fn open_account(
        &self,
        number: impl Into<AccountNumber>,
        holder: impl Into<String>,
        initial_balance: Decimal,
    ) -> DomainResult<Account> {
        let number = number.into();
        let _guard = self.lock();

        if self.accounts.contains(&number) {
            return Err(DomainError::conflict(format!("account {number} already exists")));
        }

        Ok(self.insert_account(Account::new(number, holder, initial_balance)))
    }

    /// First account opened under `number`, if any.
    pub fn get_account(&self, number: &str) -> Option<Account> {
        self.accounts.find(&AccountNumber::new(number))
    }

    /// Apply a deposit or withdrawal; `true` when it was applied.
    ///
    /// Returns `false` when the account does not exist, the amount is missing
    /// or not positive, the kind is not exactly `DEPOSIT`/`WITHDRAWAL`, or a
    /// withdrawal exceeds the balance. See
    /// [`Ledger::try_process_transaction`] for the reason.
    pub fn process_transaction(&self, number: &str, amount: Option<Decimal>, kind: &str) -> bool {
        self.try_process_transaction(number, amount, kind).is_ok()
    }

    /// Apply a deposit or withdrawal, reporting why it was rejected.
    ///
    /// Checks run in a fixed order: account, amount, kind, funds. On success
    /// the balance is updated and the returned transaction has been appended
    /// to the journal; on failure neither changes.
    pub fn try_process_transaction(
        &self,
        number: &str,
        amount: Option<Decimal>,
        kind: &str,
    ) -> Result<Transaction, TransactionError> {
        let _guard = self.lock();

        match self.apply_transaction(AccountNumber::new(number), amount, kind) {
            Ok(transaction) => {
                tracing::info!(
                    account = %transaction.account_number,
                    kind = %transaction.kind,
                    amount = %transaction.amount,
                    "transaction applied"
                );
                Ok(transaction)
            }
            Err(reason) => {
                tracing::debug!(account = number, %reason, "transaction rejected");
                Err(reason)
            }
        }
    }

    /// Snapshot of all accounts in the order they were opened.
    pub fn get_all_accounts(&self) -> Vec<Account> {
        self.accounts.list()
    }

    /// Snapshot of the transaction journal in the order entries were recorded.
    pub fn get_all_transactions(&self) -> Vec<Transaction> {
        self.transactions.entries()
    }

    /// Journal entries recorded against one account number.
    pub fn transactions_for(&self, number: &str) -> Vec<Transaction> {
        self.transactions
            .entries()
            .into_iter()
            .filter(|t| t.account_number.as_str() == number)
            .collect()
    }

    fn apply_transaction(
        &self,
        number: AccountNumber,
        amount: Option<Decimal>,
        kind: &str,
    ) -> Result<Transaction, TransactionError> {
        let Some(mut account) = self.accounts.find(&number) else {
            return Err(TransactionError::AccountNotFound(number));
        };

        let amount = amount.ok_or(TransactionError::MissingAmount)?;
        if amount <= Decimal::ZERO {
            return Err(TransactionError::NonPositiveAmount(amount));
        }

        let kind: TransactionKind = kind.parse()?;
        let balance = account.apply(kind, amount)?;

        account.set_balance(balance);
        if !self.accounts.replace(account) {
            return Err(TransactionError::AccountNotFound(number));
        }

        let transaction = Transaction {
            account_number: number,
            amount,
            kind,
            recorded_at: Utc::now(),
        };
        if !self.transactions.append(transaction.clone()) {
            tracing::warn!(account = %transaction.account_number, "transaction applied but not journaled");
        }

        Ok(transaction)
    }

    fn insert_account(&self, account: Account) -> Account {
        if !self.accounts.add(account.clone()) {
            tracing::warn!(account = %account.number(), "account store refused write, account not stored");
            return account;
        }
        tracing::info!(
            account = %account.number(),
            balance = %account.balance(),
            "account created"
        );
        account
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a poisoned lock carries no bad state.
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
