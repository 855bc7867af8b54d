pub mod operations;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{Result, ServicingError};
use crate::types::{EntryId, OperationKind};

pub use operations::{
    caisse_funding_entry, caisse_return_entry, deposit_entry, disbursement_entry, transfer_entry,
    withdrawal_entry, DisbursementFees,
};

/// debit or credit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Debit,
    Credit,
}

/// one debit or credit line within a balanced entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    pub side: Side,
    pub account_code: String,
    pub amount: Money,
    pub currency: String,
}

impl Leg {
    /// positive for debit, negative for credit
    pub fn signed_amount(&self) -> Decimal {
        match self.side {
            Side::Debit => self.amount.as_decimal(),
            Side::Credit => -self.amount.as_decimal(),
        }
    }
}

/// a balanced group of ledger legs
///
/// The debit/credit balance is enforced when the entry is built; an `Entry`
/// value that exists is balanced, there is nothing to re-check afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub operation: OperationKind,
    pub reference: String,
    pub legs: Vec<Leg>,
}

impl Entry {
    pub fn builder(
        operation: OperationKind,
        date: NaiveDate,
        reference: impl Into<String>,
        currency: impl Into<String>,
    ) -> EntryBuilder {
        EntryBuilder {
            operation,
            date,
            reference: reference.into(),
            currency: currency.into(),
            legs: Vec::new(),
        }
    }

    pub fn total_debits(&self) -> Money {
        self.side_total(Side::Debit)
    }

    pub fn total_credits(&self) -> Money {
        self.side_total(Side::Credit)
    }

    /// the entry's magnitude: the common debit/credit total
    pub fn amount(&self) -> Money {
        self.total_debits()
    }

    fn side_total(&self, side: Side) -> Money {
        self.legs
            .iter()
            .filter(|l| l.side == side)
            .map(|l| l.amount)
            .fold(Money::ZERO, |acc, x| acc + x)
    }
}

/// builds an entry leg by leg and validates balance at `build`
#[derive(Debug, Clone)]
pub struct EntryBuilder {
    operation: OperationKind,
    date: NaiveDate,
    reference: String,
    currency: String,
    legs: Vec<Leg>,
}

impl EntryBuilder {
    pub fn debit(self, account_code: impl Into<String>, amount: Money) -> Self {
        self.leg(Side::Debit, account_code, amount)
    }

    pub fn credit(self, account_code: impl Into<String>, amount: Money) -> Self {
        self.leg(Side::Credit, account_code, amount)
    }

    fn leg(mut self, side: Side, account_code: impl Into<String>, amount: Money) -> Self {
        self.legs.push(Leg {
            side,
            account_code: account_code.into(),
            amount,
            currency: self.currency.clone(),
        });
        self
    }

    /// validate and seal the entry
    pub fn build(self) -> Result<Entry> {
        if let Some(bad) = self.legs.iter().find(|l| !l.amount.is_positive()) {
            return Err(ServicingError::InvalidAmount { amount: bad.amount });
        }

        let has_debit = self.legs.iter().any(|l| l.side == Side::Debit);
        let has_credit = self.legs.iter().any(|l| l.side == Side::Credit);
        if !has_debit || !has_credit {
            return Err(ServicingError::EmptyEntry);
        }

        let debits = self
            .legs
            .iter()
            .filter(|l| l.side == Side::Debit)
            .map(|l| l.amount)
            .fold(Money::ZERO, |acc, x| acc + x);
        let credits = self
            .legs
            .iter()
            .filter(|l| l.side == Side::Credit)
            .map(|l| l.amount)
            .fold(Money::ZERO, |acc, x| acc + x);

        if debits != credits {
            return Err(ServicingError::UnbalancedEntry { debits, credits });
        }

        Ok(Entry {
            id: Uuid::new_v4(),
            date: self.date,
            operation: self.operation,
            reference: self.reference,
            legs: self.legs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_balanced_entry_builds() {
        let entry = Entry::builder(OperationKind::Deposit, date(2024, 5, 2), "DEP-1", "XOF")
            .debit("57100", Money::from_major(50_000))
            .credit("37200", Money::from_major(50_000))
            .build()
            .unwrap();

        assert_eq!(entry.total_debits(), Money::from_major(50_000));
        assert_eq!(entry.total_credits(), Money::from_major(50_000));
        assert_eq!(entry.amount(), Money::from_major(50_000));
        assert_eq!(entry.legs.len(), 2);
    }

    #[test]
    fn test_unbalanced_entry_rejected() {
        let err = Entry::builder(OperationKind::Deposit, date(2024, 5, 2), "DEP-2", "XOF")
            .debit("57100", Money::from_major(50_000))
            .credit("37200", Money::from_major(45_000))
            .build()
            .unwrap_err();

        assert!(matches!(err, ServicingError::UnbalancedEntry { .. }));
    }

    #[test]
    fn test_one_sided_entry_rejected() {
        let err = Entry::builder(OperationKind::Deposit, date(2024, 5, 2), "DEP-3", "XOF")
            .debit("57100", Money::from_major(50_000))
            .build()
            .unwrap_err();

        assert!(matches!(err, ServicingError::EmptyEntry));
    }

    #[test]
    fn test_non_positive_leg_rejected() {
        let err = Entry::builder(OperationKind::Withdrawal, date(2024, 5, 2), "WDL-1", "XOF")
            .debit("37200", Money::ZERO)
            .credit("57100", Money::ZERO)
            .build()
            .unwrap_err();

        assert!(matches!(err, ServicingError::InvalidAmount { .. }));
    }

    #[test]
    fn test_multi_leg_balance() {
        // disbursement shape: one debit funded by two credits
        let entry = Entry::builder(OperationKind::Disbursement, date(2024, 5, 2), "DSB-1", "XOF")
            .debit("20400", Money::from_major(1_200_000))
            .credit("37200", Money::from_major(1_164_000))
            .credit("70800", Money::from_major(36_000))
            .build()
            .unwrap();

        assert_eq!(entry.total_debits(), entry.total_credits());
        assert_eq!(entry.legs.iter().map(|l| l.signed_amount()).sum::<Decimal>(), Decimal::ZERO);
    }
}
