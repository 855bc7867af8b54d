use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{AccountId, EntryId, LoanId, LoanStatus, OperationKind};

/// all events emitted by loan servicing and teller operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // loan lifecycle events
    LoanRequested {
        loan_id: LoanId,
        principal: Money,
        term_months: u32,
        timestamp: DateTime<Utc>,
    },
    LoanReviewStarted {
        loan_id: LoanId,
        timestamp: DateTime<Utc>,
    },
    LoanApproved {
        loan_id: LoanId,
        timestamp: DateTime<Utc>,
    },
    LoanRejected {
        loan_id: LoanId,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    LoanCancelled {
        loan_id: LoanId,
        timestamp: DateTime<Utc>,
    },
    LoanDisbursed {
        loan_id: LoanId,
        amount: Money,
        account_id: AccountId,
        disbursement_date: NaiveDate,
        installments: u32,
    },
    LoanSettled {
        loan_id: LoanId,
        timestamp: DateTime<Utc>,
    },
    StatusChanged {
        loan_id: LoanId,
        old_status: LoanStatus,
        new_status: LoanStatus,
        timestamp: DateTime<Utc>,
    },

    // repayment events
    PaymentRecorded {
        loan_id: LoanId,
        principal: Money,
        interest: Money,
        penalty: Money,
        payment_date: NaiveDate,
    },
    DelinquencyDetected {
        loan_id: LoanId,
        days_overdue: u32,
        overdue_total: Money,
        timestamp: DateTime<Utc>,
    },
    DelinquencyCleared {
        loan_id: LoanId,
        timestamp: DateTime<Utc>,
    },

    // teller operations
    DepositReceived {
        account_id: AccountId,
        amount: Money,
        new_balance: Money,
        timestamp: DateTime<Utc>,
    },
    WithdrawalMade {
        account_id: AccountId,
        amount: Money,
        new_balance: Money,
        timestamp: DateTime<Utc>,
    },
    TransferExecuted {
        source: AccountId,
        destination: AccountId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    CaisseFunded {
        till: AccountId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    CaisseReturned {
        till: AccountId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },

    // accounting events
    EntryPosted {
        entry_id: EntryId,
        operation: OperationKind,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    EntryPostingFailed {
        operation: OperationKind,
        amount: Money,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
