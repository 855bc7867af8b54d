use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{AccountRole, ChartOfAccounts};
use crate::decimal::Money;
use crate::errors::Result;
use crate::types::OperationKind;

use super::Entry;

/// charges netted off a disbursement before funds reach the borrower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DisbursementFees {
    pub origination_fee: Money,
    pub insurance: Money,
}

impl DisbursementFees {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn total(&self) -> Money {
        self.origination_fee + self.insurance
    }
}

/// cash received over the counter into a client account
pub fn deposit_entry(
    chart: &ChartOfAccounts,
    amount: Money,
    date: NaiveDate,
    reference: impl Into<String>,
) -> Result<Entry> {
    Entry::builder(OperationKind::Deposit, date, reference, &chart.currency)
        .debit(chart.code(AccountRole::TellerCash)?, amount)
        .credit(chart.code(AccountRole::ClientDeposits)?, amount)
        .build()
}

/// cash paid out over the counter from a client account
pub fn withdrawal_entry(
    chart: &ChartOfAccounts,
    amount: Money,
    date: NaiveDate,
    reference: impl Into<String>,
) -> Result<Entry> {
    Entry::builder(OperationKind::Withdrawal, date, reference, &chart.currency)
        .debit(chart.code(AccountRole::ClientDeposits)?, amount)
        .credit(chart.code(AccountRole::TellerCash)?, amount)
        .build()
}

/// book-to-book movement between two client accounts
pub fn transfer_entry(
    chart: &ChartOfAccounts,
    amount: Money,
    date: NaiveDate,
    reference: impl Into<String>,
) -> Result<Entry> {
    Entry::builder(OperationKind::Transfer, date, reference, &chart.currency)
        .debit(chart.code(AccountRole::ClientDeposits)?, amount)
        .credit(chart.code(AccountRole::ClientDeposits)?, amount)
        .build()
}

/// release of approved loan funds, net of fees, to the borrower's account
pub fn disbursement_entry(
    chart: &ChartOfAccounts,
    principal: Money,
    fees: &DisbursementFees,
    date: NaiveDate,
    reference: impl Into<String>,
) -> Result<Entry> {
    let net = principal - fees.total();
    let mut builder = Entry::builder(OperationKind::Disbursement, date, reference, &chart.currency)
        .debit(chart.code(AccountRole::LoanPortfolio)?, principal)
        .credit(chart.code(AccountRole::ClientDeposits)?, net);

    if fees.total().is_positive() {
        builder = builder.credit(chart.code(AccountRole::FeeIncome)?, fees.total());
    }

    builder.build()
}

/// till funded from the main vault at day start
pub fn caisse_funding_entry(
    chart: &ChartOfAccounts,
    amount: Money,
    date: NaiveDate,
    reference: impl Into<String>,
) -> Result<Entry> {
    Entry::builder(OperationKind::CaisseFunding, date, reference, &chart.currency)
        .debit(chart.code(AccountRole::TellerCash)?, amount)
        .credit(chart.code(AccountRole::Vault)?, amount)
        .build()
}

/// till cash returned to the main vault at day close
pub fn caisse_return_entry(
    chart: &ChartOfAccounts,
    amount: Money,
    date: NaiveDate,
    reference: impl Into<String>,
) -> Result<Entry> {
    Entry::builder(OperationKind::CaisseReturn, date, reference, &chart.currency)
        .debit(chart.code(AccountRole::Vault)?, amount)
        .credit(chart.code(AccountRole::TellerCash)?, amount)
        .build()
}
