use thiserror::Error;
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::LoanStatus;

#[derive(Error, Debug)]
pub enum ServicingError {
    #[error("insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        available: Money,
        requested: Money,
    },

    #[error("invalid operation amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("account not active: {account}")]
    AccountInactive {
        account: Uuid,
    },

    #[error("unknown account: {account}")]
    UnknownAccount {
        account: Uuid,
    },

    #[error("transfer source and destination are the same account")]
    SameAccountTransfer,

    #[error("invalid loan status: current {current:?}, expected {expected}")]
    InvalidStatus {
        current: LoanStatus,
        expected: String,
    },

    #[error("ledger entry does not balance: debits {debits}, credits {credits}")]
    UnbalancedEntry {
        debits: Money,
        credits: Money,
    },

    #[error("chart of accounts is missing the {role} code")]
    IncompleteChart {
        role: String,
    },

    #[error("entry needs at least one debit and one credit leg")]
    EmptyEntry,

    #[error("loan has no financial parameters to schedule")]
    ScheduleNotApplicable,
}

pub type Result<T> = std::result::Result<T, ServicingError>;
