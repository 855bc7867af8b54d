use serde::{Deserialize, Serialize};

use crate::errors::{Result, ServicingError};

/// roles an entry leg can be tagged to in the chart of accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountRole {
    TellerCash,
    Vault,
    ClientDeposits,
    LoanPortfolio,
    InterestIncome,
    FeeIncome,
}

impl AccountRole {
    pub fn name(&self) -> &'static str {
        match self {
            AccountRole::TellerCash => "teller cash",
            AccountRole::Vault => "vault",
            AccountRole::ClientDeposits => "client deposits",
            AccountRole::LoanPortfolio => "loan portfolio",
            AccountRole::InterestIncome => "interest income",
            AccountRole::FeeIncome => "fee income",
        }
    }
}

/// chart-of-accounts codes the posting helper tags legs with
///
/// Codes are plain strings so institutions can map their own plan; a blank
/// code for a role that an operation needs surfaces as `IncompleteChart`
/// when the entry is built, before anything is posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOfAccounts {
    pub teller_cash: String,
    pub vault: String,
    pub client_deposits: String,
    pub loan_portfolio: String,
    pub interest_income: String,
    pub fee_income: String,
    pub currency: String,
}

impl ChartOfAccounts {
    /// standard cooperative chart
    pub fn standard() -> Self {
        Self {
            teller_cash: "57100".to_string(),
            vault: "57000".to_string(),
            client_deposits: "37200".to_string(),
            loan_portfolio: "20400".to_string(),
            interest_income: "70200".to_string(),
            fee_income: "70800".to_string(),
            currency: "XOF".to_string(),
        }
    }

    /// resolve a role to its configured code
    pub fn code(&self, role: AccountRole) -> Result<&str> {
        let code = match role {
            AccountRole::TellerCash => &self.teller_cash,
            AccountRole::Vault => &self.vault,
            AccountRole::ClientDeposits => &self.client_deposits,
            AccountRole::LoanPortfolio => &self.loan_portfolio,
            AccountRole::InterestIncome => &self.interest_income,
            AccountRole::FeeIncome => &self.fee_income,
        };

        if code.is_empty() {
            return Err(ServicingError::IncompleteChart {
                role: role.name().to_string(),
            });
        }

        Ok(code)
    }
}
