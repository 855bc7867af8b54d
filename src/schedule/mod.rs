pub mod arrears;
pub mod portfolio;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::InstallmentStatus;

pub use arrears::{analyze_loan_status, ArrearsSummary};
pub use portfolio::{AgeBucket, PortfolioSummary};

/// one scheduled repayment line
///
/// The remaining/due split lets a persisted line absorb real payments: the
/// due amounts never change after generation, the remaining amounts are
/// decremented as payments are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub number: u32,
    pub due_date: NaiveDate,
    pub principal_due: Money,
    pub interest_due: Money,
    pub principal_remaining: Money,
    pub interest_remaining: Money,
    pub amount_paid: Money,
    pub paid_date: Option<NaiveDate>,
    pub status: InstallmentStatus,
}

impl Installment {
    /// principal + interest due on this line
    pub fn total_due(&self) -> Money {
        self.principal_due + self.interest_due
    }

    pub fn outstanding(&self) -> Money {
        self.principal_remaining + self.interest_remaining
    }

    pub fn is_settled(&self) -> bool {
        self.principal_remaining.is_zero() && self.interest_remaining.is_zero()
    }
}

/// generate a constant-principal, declining-interest repayment schedule
///
/// Returns an empty vector when the loan has no usable financial parameters
/// (non-positive principal or zero term); callers display that as "no
/// schedule" rather than an error. The function is pure: recomputing with
/// the same inputs always yields the same sequence, which is what lets the
/// arrears analyzer reconcile loans that never persisted their schedule.
///
/// Each line's amounts are rounded to the whole currency unit for storage,
/// but the running balance is decremented by the unrounded principal share
/// so rounding error never compounds across periods. The final installment
/// gets no balancing remainder adjustment; total drift stays within one
/// unit per period.
pub fn generate_schedule(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    start_date: NaiveDate,
) -> Vec<Installment> {
    if !principal.is_positive() || term_months == 0 {
        return Vec::new();
    }

    let monthly_rate = annual_rate.monthly_rate().as_decimal();
    let principal_share = principal.as_decimal() / rust_decimal::Decimal::from(term_months);

    let mut lines = Vec::with_capacity(term_months as usize);
    let mut balance = principal.as_decimal();

    for i in 1..=term_months {
        let interest = Money::from_decimal(balance * monthly_rate).round_unit();
        let principal_portion = Money::from_decimal(principal_share).round_unit();

        lines.push(Installment {
            number: i,
            due_date: add_months(start_date, i),
            principal_due: principal_portion,
            interest_due: interest,
            principal_remaining: principal_portion,
            interest_remaining: interest,
            amount_paid: Money::ZERO,
            paid_date: None,
            status: InstallmentStatus::Pending,
        });

        balance -= principal_share;
    }

    lines
}

/// calendar month increment preserving day-of-month, clamped at month end
fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_schedule_line_count_and_dates() {
        let schedule = generate_schedule(
            Money::from_major(1_200_000),
            Rate::from_percentage(18),
            12,
            date(2024, 1, 15),
        );

        assert_eq!(schedule.len(), 12);
        for (i, line) in schedule.iter().enumerate() {
            assert_eq!(line.number, (i + 1) as u32);
        }
        assert_eq!(schedule[0].due_date, date(2024, 2, 15));
        assert_eq!(schedule[11].due_date, date(2025, 1, 15));
    }

    #[test]
    fn test_declining_interest_worked_example() {
        // 1,200,000 at 18% over 12 months: equal principal of 100,000,
        // first interest 1,200,000 * 0.015 = 18,000, last 100,000 * 0.015 = 1,500
        let schedule = generate_schedule(
            Money::from_major(1_200_000),
            Rate::from_percentage(18),
            12,
            date(2024, 1, 15),
        );

        let first = &schedule[0];
        assert_eq!(first.principal_due, Money::from_major(100_000));
        assert_eq!(first.interest_due, Money::from_major(18_000));

        let last = &schedule[11];
        assert_eq!(last.principal_due, Money::from_major(100_000));
        assert_eq!(last.interest_due, Money::from_major(1_500));

        for i in 1..schedule.len() {
            assert!(schedule[i].interest_due < schedule[i - 1].interest_due);
        }
    }

    #[test]
    fn test_remaining_initialized_fully_outstanding() {
        let schedule = generate_schedule(
            Money::from_major(600_000),
            Rate::from_percentage(12),
            6,
            date(2024, 3, 1),
        );

        for line in &schedule {
            assert_eq!(line.principal_remaining, line.principal_due);
            assert_eq!(line.interest_remaining, line.interest_due);
            assert_eq!(line.amount_paid, Money::ZERO);
            assert_eq!(line.status, InstallmentStatus::Pending);
            assert!(line.paid_date.is_none());
        }
    }

    #[test]
    fn test_rounding_drift_bounded_by_term() {
        // 1,000,000 over 7 months does not divide evenly
        let term = 7u32;
        let principal = Money::from_major(1_000_000);
        let schedule = generate_schedule(principal, Rate::from_percentage(15), term, date(2024, 1, 10));

        let total_principal = schedule
            .iter()
            .map(|l| l.principal_due)
            .fold(Money::ZERO, |acc, x| acc + x);

        let drift = (total_principal - principal).abs();
        assert!(drift <= Money::from_major(term as i64), "drift {} too large", drift);
    }

    #[test]
    fn test_no_last_line_remainder_adjustment() {
        // 100 over 3 months: each line rounds to 33, total 99, drift 1 kept as is
        let schedule = generate_schedule(Money::from_major(100), Rate::ZERO, 3, date(2024, 1, 1));

        assert!(schedule.iter().all(|l| l.principal_due == Money::from_major(33)));
        let total: Money = schedule
            .iter()
            .map(|l| l.principal_due)
            .fold(Money::ZERO, |acc, x| acc + x);
        assert_eq!(total, Money::from_major(99));
    }

    #[test]
    fn test_running_balance_uses_unrounded_share() {
        // 1,000,000 / 300 = 3,333.33...; decrementing by the rounded 3,333
        // would leave a 100-unit drift by the last period and push its
        // interest to 69. The exact share leaves 3,333.33 -> 66.67 -> 67.
        let schedule = generate_schedule(
            Money::from_major(1_000_000),
            Rate::from_percentage(24),
            300,
            date(2024, 1, 1),
        );

        assert_eq!(schedule[299].interest_due, Money::from_major(67));
    }

    #[test]
    fn test_month_end_day_clamped() {
        let schedule = generate_schedule(
            Money::from_major(300_000),
            Rate::from_percentage(12),
            3,
            date(2024, 1, 31),
        );

        assert_eq!(schedule[0].due_date, date(2024, 2, 29));
        assert_eq!(schedule[1].due_date, date(2024, 3, 31));
        assert_eq!(schedule[2].due_date, date(2024, 4, 30));
    }

    #[test]
    fn test_empty_schedule_for_missing_parameters() {
        assert!(generate_schedule(Money::ZERO, Rate::from_percentage(10), 12, date(2024, 1, 1)).is_empty());
        assert!(generate_schedule(
            Money::from_decimal(dec!(-500)),
            Rate::from_percentage(10),
            12,
            date(2024, 1, 1)
        )
        .is_empty());
        assert!(generate_schedule(Money::from_major(1_000), Rate::from_percentage(10), 0, date(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_generation_is_idempotent() {
        let a = generate_schedule(
            Money::from_major(750_000),
            Rate::from_percentage_decimal(dec!(16.5)),
            18,
            date(2023, 11, 5),
        );
        let b = generate_schedule(
            Money::from_major(750_000),
            Rate::from_percentage_decimal(dec!(16.5)),
            18,
            date(2023, 11, 5),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_rate_schedule_has_no_interest() {
        let schedule = generate_schedule(Money::from_major(120_000), Rate::ZERO, 12, date(2024, 1, 1));
        assert!(schedule.iter().all(|l| l.interest_due.is_zero()));
        assert!(schedule.iter().all(|l| l.principal_due == Money::from_major(10_000)));
    }
}
