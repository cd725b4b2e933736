use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_core::{AccountNumber, Entity};

use crate::transaction::{TransactionError, TransactionKind};

/// Bank account: number, holder, current balance.
///
/// The balance is only required to stay non-negative when a withdrawal is
/// applied; an account may be opened with any balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    number: AccountNumber,
    holder: String,
    balance: Decimal,
}

impl Account {
    pub fn new(number: AccountNumber, holder: impl Into<String>, balance: Decimal) -> Self {
        Self {
            number,
            holder: holder.into(),
            balance,
        }
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Balance this account would have after applying `kind` for `amount`.
    ///
    /// Does not mutate. No overdraft: a withdrawal larger than the balance is
    /// rejected. A deposit that would push the balance past `Decimal::MAX` is
    /// rejected with [`TransactionError::BalanceOverflow`].
    ///
    /// The amount check is repeated here because `apply` is public and also
    /// called on its own; the ledger runs it earlier so that amount errors are
    /// reported before kind errors.
    pub fn apply(&self, kind: TransactionKind, amount: Decimal) -> Result<Decimal, TransactionError> {
        if amount <= Decimal::ZERO {
            return Err(TransactionError::NonPositiveAmount(amount));
        }

        let overflow = || TransactionError::BalanceOverflow {
            balance: self.balance,
            amount,
        };

        match kind {
            TransactionKind::Deposit => self.balance.checked_add(amount).ok_or_else(overflow),
            TransactionKind::Withdrawal => {
                if self.balance < amount {
                    return Err(TransactionError::InsufficientFunds {
                        balance: self.balance,
                        requested: amount,
                    });
                }
                self.balance.checked_sub(amount).ok_or_else(overflow)
            }
        }
    }

    pub(crate) fn set_balance(&mut self, balance: Decimal) {
        self.balance = balance;
    }
}

impl Entity for Account {
    type Id = AccountNumber;

    fn id(&self) -> &Self::Id {
        &self.number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_account(balance: Decimal) -> Account {
        Account::new(AccountNumber::new("12345"), "John Doe", balance)
    }

    #[test]
    fn deposit_adds_amount() {
        let account = test_account(dec!(1000.00));
        assert_eq!(
            account.apply(TransactionKind::Deposit, dec!(500.00)),
            Ok(dec!(1500.00))
        );
    }

    #[test]
    fn withdrawal_of_entire_balance_is_allowed() {
        let account = test_account(dec!(250.00));
        assert_eq!(
            account.apply(TransactionKind::Withdrawal, dec!(250.00)),
            Ok(dec!(0))
        );
    }

    #[test]
    fn withdrawal_beyond_balance_is_rejected() {
        let account = test_account(dec!(100.00));
        let err = account
            .apply(TransactionKind::Withdrawal, dec!(500.00))
            .unwrap_err();
        assert_eq!(
            err,
            TransactionError::InsufficientFunds {
                balance: dec!(100.00),
                requested: dec!(500.00),
            }
        );
    }

    #[test]
    fn apply_does_not_mutate_account() {
        let account = test_account(dec!(100.00));
        let _ = account.apply(TransactionKind::Deposit, dec!(1.00));
        let _ = account.apply(TransactionKind::Withdrawal, dec!(1.00));
        assert_eq!(account.balance(), dec!(100.00));
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let account = test_account(dec!(100.00));
        assert_eq!(
            account.apply(TransactionKind::Deposit, dec!(0)),
            Err(TransactionError::NonPositiveAmount(dec!(0)))
        );
        assert!(account.apply(TransactionKind::Withdrawal, dec!(-1)).is_err());
    }

    #[test]
    fn deposit_past_decimal_max_is_rejected() {
        let account = test_account(Decimal::MAX);
        assert_eq!(
            account.apply(TransactionKind::Deposit, dec!(1)),
            Err(TransactionError::BalanceOverflow {
                balance: Decimal::MAX,
                amount: dec!(1),
            })
        );
        assert_eq!(account.balance(), Decimal::MAX);

        assert_eq!(
            account.apply(TransactionKind::Withdrawal, Decimal::MAX),
            Ok(dec!(0))
        );
    }
}
