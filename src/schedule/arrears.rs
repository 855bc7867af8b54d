use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::PaymentRecord;

use super::generate_schedule;

/// reconciliation of the theoretical schedule against recorded payments
///
/// A zeroed summary (the `Default`) means the loan is not yet active:
/// missing disbursement date or no financial parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ArrearsSummary {
    pub is_overdue: bool,
    pub days_overdue: u32,
    pub expected_payments: u32,
    pub actual_payments: u32,
    pub expected_capital: Money,
    pub paid_capital: Money,
    pub overdue_capital: Money,
    pub overdue_interest: Money,
    pub overdue_total: Money,
    pub next_due_date: Option<NaiveDate>,
    pub next_due_amount: Money,
}

/// reconcile a loan's theoretical schedule against its recorded payments
///
/// The schedule is always recomputed from the loan parameters, never read
/// from storage, so the reconciliation works for loans that predate
/// persisted installment rows. Reversed payments are excluded from the
/// paid totals.
///
/// Days overdue are pinned to the oldest installment whose principal is not
/// fully covered by payments, not to the most recently missed one.
pub fn analyze_loan_status(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    disbursement_date: Option<NaiveDate>,
    payments: &[PaymentRecord],
    today: NaiveDate,
) -> ArrearsSummary {
    let start = match disbursement_date {
        Some(d) if principal.is_positive() && term_months > 0 => d,
        _ => return ArrearsSummary::default(),
    };

    let schedule = generate_schedule(principal, annual_rate, term_months, start);

    let (past_due, future): (Vec<_>, Vec<_>) =
        schedule.into_iter().partition(|line| line.due_date <= today);

    let active: Vec<&PaymentRecord> = payments.iter().filter(|p| !p.reversed).collect();
    let paid_capital = active
        .iter()
        .map(|p| p.principal)
        .fold(Money::ZERO, |acc, x| acc + x);
    let paid_interest = active
        .iter()
        .map(|p| p.interest)
        .fold(Money::ZERO, |acc, x| acc + x);

    let expected_capital = past_due
        .iter()
        .map(|l| l.principal_due)
        .fold(Money::ZERO, |acc, x| acc + x);
    let expected_interest = past_due
        .iter()
        .map(|l| l.interest_due)
        .fold(Money::ZERO, |acc, x| acc + x);

    let overdue_capital = (expected_capital - paid_capital).max(Money::ZERO);
    let overdue_interest = (expected_interest - paid_interest).max(Money::ZERO);
    let overdue_total = overdue_capital + overdue_interest;

    // walk past-due lines oldest first, consuming paid capital; the first
    // line not fully covered pins the age of the arrears
    let mut days_overdue = 0u32;
    let mut remaining_paid = paid_capital;
    for line in &past_due {
        if remaining_paid < line.principal_due {
            days_overdue = (today - line.due_date).num_days().max(0) as u32;
            break;
        }
        remaining_paid -= line.principal_due;
    }

    let next = future.first();

    ArrearsSummary {
        is_overdue: overdue_total.is_positive(),
        days_overdue,
        expected_payments: past_due.len() as u32,
        actual_payments: active.len() as u32,
        expected_capital,
        paid_capital,
        overdue_capital,
        overdue_interest,
        overdue_total,
        next_due_date: next.map(|l| l.due_date),
        next_due_amount: next.map(|l| l.total_due()).unwrap_or(Money::ZERO),
    }
}
