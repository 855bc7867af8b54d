use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for an account (client deposit, teller till or vault)
pub type AccountId = Uuid;

/// unique identifier for a ledger entry group
pub type EntryId = Uuid;

/// loan lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// application captured, nothing reviewed yet
    Requested,
    /// under review by a credit officer
    UnderReview,
    /// approved, funds not yet released
    Approved,
    /// funds released, schedule running, payments on time
    Active,
    /// at least one installment past due and unpaid
    Delinquent,
    /// fully repaid
    Settled,
    /// application declined
    Rejected,
    /// withdrawn before disbursement
    Cancelled,
}

/// schedule line status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentStatus {
    Pending,
    Paid,
    Cancelled,
}

/// account kind in the teller book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountKind {
    /// client savings / current account (deposit liability)
    ClientDeposit,
    /// a teller's physical cash till
    TellerTill,
    /// the branch main vault
    Vault,
}

/// account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Inactive,
    Frozen,
}

/// banking operation kinds that produce ledger entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    Deposit,
    Withdrawal,
    Transfer,
    Disbursement,
    CaisseFunding,
    CaisseReturn,
}

/// delinquency risk bucket, derived from days overdue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// classify days overdue; applied identically wherever a risk label is shown
    pub fn from_days_overdue(days: u32) -> Self {
        if days > 90 {
            RiskLevel::Critical
        } else if days > 60 {
            RiskLevel::High
        } else if days > 30 {
            RiskLevel::Medium
        } else if days > 0 {
            RiskLevel::Low
        } else {
            RiskLevel::None
        }
    }
}

/// an actual recorded repayment against a loan
///
/// The set of non-reversed payment records is the ground truth for "amount
/// paid", independent of whether installment rows exist for the loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub date: NaiveDate,
    pub principal: Money,
    pub interest: Money,
    pub penalty: Money,
    pub reversed: bool,
}

impl PaymentRecord {
    pub fn new(date: NaiveDate, principal: Money, interest: Money) -> Self {
        Self {
            date,
            principal,
            interest,
            penalty: Money::ZERO,
            reversed: false,
        }
    }

    pub fn total(&self) -> Money {
        self.principal + self.interest + self.penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_buckets() {
        assert_eq!(RiskLevel::from_days_overdue(0), RiskLevel::None);
        assert_eq!(RiskLevel::from_days_overdue(1), RiskLevel::Low);
        assert_eq!(RiskLevel::from_days_overdue(30), RiskLevel::Low);
        assert_eq!(RiskLevel::from_days_overdue(31), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_days_overdue(60), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_days_overdue(61), RiskLevel::High);
        assert_eq!(RiskLevel::from_days_overdue(90), RiskLevel::High);
        assert_eq!(RiskLevel::from_days_overdue(91), RiskLevel::Critical);
    }

    #[test]
    fn test_payment_record_total() {
        let p = PaymentRecord::new(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            Money::from_major(100_000),
            Money::from_major(18_000),
        );
        assert_eq!(p.total(), Money::from_major(118_000));
        assert!(!p.reversed);
    }
}
