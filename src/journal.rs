use std::collections::HashMap;

use hourglass_rs::SafeTimeProvider;
use tracing::warn;

use crate::account::Account;
use crate::config::ChartOfAccounts;
use crate::decimal::Money;
use crate::errors::{Result, ServicingError};
use crate::events::{Event, EventStore};
use crate::loan::Loan;
use crate::posting::{
    caisse_funding_entry, caisse_return_entry, deposit_entry, disbursement_entry, transfer_entry,
    withdrawal_entry, DisbursementFees, Entry,
};
use crate::types::{AccountId, EntryId, OperationKind};

/// outcome of a teller operation
///
/// `entry_id` is `None` when the balance mutation went through but the
/// accounting entry could not be built; the operation itself still counts
/// as successful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationReceipt {
    pub operation: OperationKind,
    pub amount: Money,
    pub account_id: AccountId,
    pub counterparty: Option<AccountId>,
    pub entry_id: Option<EntryId>,
    pub new_balance: Money,
}

/// the teller book: accounts, posted entries and the events they emit
///
/// Every operation validates before it mutates, so a rejected operation
/// leaves no partial state. Concurrent access is the caller's concern;
/// in production the surrounding storage transaction serializes
/// balance-mutating requests.
pub struct Journal {
    chart: ChartOfAccounts,
    accounts: HashMap<AccountId, Account>,
    entries: Vec<Entry>,
    pub events: EventStore,
    sequence: u64,
}

impl Journal {
    pub fn new(chart: ChartOfAccounts) -> Self {
        Self {
            chart,
            accounts: HashMap::new(),
            entries: Vec::new(),
            events: EventStore::new(),
            sequence: 0,
        }
    }

    /// register an account with the book
    pub fn open_account(&mut self, account: Account) -> AccountId {
        let id = account.id;
        self.accounts.insert(id, account);
        id
    }

    pub fn account(&self, id: AccountId) -> Result<&Account> {
        self.accounts
            .get(&id)
            .ok_or(ServicingError::UnknownAccount { account: id })
    }

    /// all entries posted so far, in posting order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// cash received over the counter
    pub fn deposit(
        &mut self,
        account_id: AccountId,
        amount: Money,
        time: &SafeTimeProvider,
    ) -> Result<OperationReceipt> {
        self.check_amount(amount)?;
        self.check_active(account_id)?;

        let account = self.account_mut(account_id)?;
        account.balance += amount;
        let new_balance = account.balance;

        let reference = self.next_reference("DEP");
        let entry = deposit_entry(&self.chart, amount, time.now().date_naive(), reference);
        let entry_id = self.post_or_warn(entry, OperationKind::Deposit, amount, time);

        self.events.emit(Event::DepositReceived {
            account_id,
            amount,
            new_balance,
            timestamp: time.now(),
        });

        Ok(OperationReceipt {
            operation: OperationKind::Deposit,
            amount,
            account_id,
            counterparty: None,
            entry_id,
            new_balance,
        })
    }

    /// cash paid out over the counter
    pub fn withdraw(
        &mut self,
        account_id: AccountId,
        amount: Money,
        time: &SafeTimeProvider,
    ) -> Result<OperationReceipt> {
        self.check_amount(amount)?;
        self.check_active(account_id)?;
        self.check_available(account_id, amount)?;

        let account = self.account_mut(account_id)?;
        account.balance -= amount;
        let new_balance = account.balance;

        let reference = self.next_reference("WDL");
        let entry = withdrawal_entry(&self.chart, amount, time.now().date_naive(), reference);
        let entry_id = self.post_or_warn(entry, OperationKind::Withdrawal, amount, time);

        self.events.emit(Event::WithdrawalMade {
            account_id,
            amount,
            new_balance,
            timestamp: time.now(),
        });

        Ok(OperationReceipt {
            operation: OperationKind::Withdrawal,
            amount,
            account_id,
            counterparty: None,
            entry_id,
            new_balance,
        })
    }

    /// book-to-book movement between two client accounts
    pub fn transfer(
        &mut self,
        source: AccountId,
        destination: AccountId,
        amount: Money,
        time: &SafeTimeProvider,
    ) -> Result<OperationReceipt> {
        if source == destination {
            return Err(ServicingError::SameAccountTransfer);
        }
        self.check_amount(amount)?;
        self.check_active(source)?;
        self.check_active(destination)?;
        self.check_available(source, amount)?;

        let new_balance = {
            let src = self.account_mut(source)?;
            src.balance -= amount;
            src.balance
        };
        {
            let dst = self.account_mut(destination)?;
            dst.balance += amount;
        }

        let reference = self.next_reference("TRF");
        let entry = transfer_entry(&self.chart, amount, time.now().date_naive(), reference);
        let entry_id = self.post_or_warn(entry, OperationKind::Transfer, amount, time);

        self.events.emit(Event::TransferExecuted {
            source,
            destination,
            amount,
            timestamp: time.now(),
        });

        Ok(OperationReceipt {
            operation: OperationKind::Transfer,
            amount,
            account_id: source,
            counterparty: Some(destination),
            entry_id,
            new_balance,
        })
    }

    /// release approved loan funds into the borrower's account
    ///
    /// Credits the principal net of fees, marks the loan disbursed (which
    /// generates and persists its schedule) and posts the disbursement
    /// entry.
    pub fn disburse(
        &mut self,
        loan: &mut Loan,
        account_id: AccountId,
        fees: DisbursementFees,
        time: &SafeTimeProvider,
    ) -> Result<OperationReceipt> {
        let principal = loan.principal;
        let net = principal - fees.total();
        self.check_amount(net)?;
        self.check_active(account_id)?;

        let date = time.now().date_naive();
        loan.mark_disbursed(account_id, date, time)?;

        let account = self.account_mut(account_id)?;
        account.balance += net;
        let new_balance = account.balance;

        let reference = self.next_reference("DSB");
        let entry = disbursement_entry(&self.chart, principal, &fees, date, reference);
        let entry_id = self.post_or_warn(entry, OperationKind::Disbursement, principal, time);

        Ok(OperationReceipt {
            operation: OperationKind::Disbursement,
            amount: principal,
            account_id,
            counterparty: None,
            entry_id,
            new_balance,
        })
    }

    /// fund a teller till from the main vault
    pub fn fund_caisse(
        &mut self,
        vault: AccountId,
        till: AccountId,
        amount: Money,
        time: &SafeTimeProvider,
    ) -> Result<OperationReceipt> {
        self.check_amount(amount)?;
        self.check_active(vault)?;
        self.check_active(till)?;
        self.check_available(vault, amount)?;

        {
            let vault_account = self.account_mut(vault)?;
            vault_account.balance -= amount;
        }
        let new_balance = {
            let till_account = self.account_mut(till)?;
            till_account.balance += amount;
            till_account.balance
        };

        let reference = self.next_reference("CSF");
        let entry = caisse_funding_entry(&self.chart, amount, time.now().date_naive(), reference);
        let entry_id = self.post_or_warn(entry, OperationKind::CaisseFunding, amount, time);

        self.events.emit(Event::CaisseFunded {
            till,
            amount,
            timestamp: time.now(),
        });

        Ok(OperationReceipt {
            operation: OperationKind::CaisseFunding,
            amount,
            account_id: till,
            counterparty: Some(vault),
            entry_id,
            new_balance,
        })
    }

    /// return till cash to the main vault at day close
    pub fn return_caisse(
        &mut self,
        till: AccountId,
        vault: AccountId,
        amount: Money,
        time: &SafeTimeProvider,
    ) -> Result<OperationReceipt> {
        self.check_amount(amount)?;
        self.check_active(till)?;
        self.check_active(vault)?;
        self.check_available(till, amount)?;

        {
            let till_account = self.account_mut(till)?;
            till_account.balance -= amount;
        }
        let new_balance = {
            let vault_account = self.account_mut(vault)?;
            vault_account.balance += amount;
            vault_account.balance
        };

        let reference = self.next_reference("CSR");
        let entry = caisse_return_entry(&self.chart, amount, time.now().date_naive(), reference);
        let entry_id = self.post_or_warn(entry, OperationKind::CaisseReturn, amount, time);

        self.events.emit(Event::CaisseReturned {
            till,
            amount,
            timestamp: time.now(),
        });

        Ok(OperationReceipt {
            operation: OperationKind::CaisseReturn,
            amount,
            account_id: till,
            counterparty: Some(vault),
            entry_id,
            new_balance,
        })
    }

    /// keep the entry if it built, swallow the failure if it did not
    ///
    /// The balance mutation has already been applied at this point; a
    /// failed accounting leg is logged and reported through the receipt's
    /// missing entry id, but the primary operation stands.
    fn post_or_warn(
        &mut self,
        entry: Result<Entry>,
        operation: OperationKind,
        amount: Money,
        time: &SafeTimeProvider,
    ) -> Option<EntryId> {
        match entry {
            Ok(entry) => {
                let id = entry.id;
                self.events.emit(Event::EntryPosted {
                    entry_id: id,
                    operation,
                    amount,
                    timestamp: time.now(),
                });
                self.entries.push(entry);
                Some(id)
            }
            Err(err) => {
                warn!(?operation, %amount, error = %err, "accounting entry not posted");
                self.events.emit(Event::EntryPostingFailed {
                    operation,
                    amount,
                    reason: err.to_string(),
                    timestamp: time.now(),
                });
                None
            }
        }
    }

    fn next_reference(&mut self, prefix: &str) -> String {
        self.sequence += 1;
        format!("{}-{:06}", prefix, self.sequence)
    }

    fn check_amount(&self, amount: Money) -> Result<()> {
        if !amount.is_positive() {
            return Err(ServicingError::InvalidAmount { amount });
        }
        Ok(())
    }

    fn check_active(&self, id: AccountId) -> Result<()> {
        let account = self.account(id)?;
        if !account.is_active() {
            return Err(ServicingError::AccountInactive { account: id });
        }
        Ok(())
    }

    fn check_available(&self, id: AccountId, amount: Money) -> Result<()> {
        let account = self.account(id)?;
        let available = account.available_balance();
        if available < amount {
            return Err(ServicingError::InsufficientFunds {
                available,
                requested: amount,
            });
        }
        Ok(())
    }

    fn account_mut(&mut self, id: AccountId) -> Result<&mut Account> {
        self.accounts
            .get_mut(&id)
            .ok_or(ServicingError::UnknownAccount { account: id })
    }
}
