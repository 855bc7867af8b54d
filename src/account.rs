use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{AccountId, AccountKind, AccountStatus};

/// a balance-bearing account in the teller book
///
/// Covers client deposit accounts as well as teller tills and the branch
/// vault; the till/vault variants keep the blocked/minimum/overdraft fields
/// at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub number: String,
    pub kind: AccountKind,
    pub status: AccountStatus,
    pub balance: Money,
    pub blocked: Money,
    pub minimum_balance: Money,
    pub overdraft_allowance: Money,
}

impl Account {
    /// open a client deposit account
    pub fn client_deposit(number: impl Into<String>) -> Self {
        Self::new(number, AccountKind::ClientDeposit)
    }

    /// open a teller till
    pub fn teller_till(number: impl Into<String>) -> Self {
        Self::new(number, AccountKind::TellerTill)
    }

    /// open the branch vault
    pub fn vault(number: impl Into<String>) -> Self {
        Self::new(number, AccountKind::Vault)
    }

    fn new(number: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.into(),
            kind,
            status: AccountStatus::Active,
            balance: Money::ZERO,
            blocked: Money::ZERO,
            minimum_balance: Money::ZERO,
            overdraft_allowance: Money::ZERO,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// funds a withdrawal-class operation may draw on
    pub fn available_balance(&self) -> Money {
        self.balance - self.blocked - self.minimum_balance + self.overdraft_allowance
    }
}
