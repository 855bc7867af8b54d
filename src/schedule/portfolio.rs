use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

use super::ArrearsSummary;

/// one delinquency age bucket of the portfolio report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AgeBucket {
    pub loans: u32,
    pub overdue_capital: Money,
    pub overdue_total: Money,
}

impl AgeBucket {
    fn add(&mut self, summary: &ArrearsSummary) {
        self.loans += 1;
        self.overdue_capital += summary.overdue_capital;
        self.overdue_total += summary.overdue_total;
    }
}

/// dashboard aggregation over active loans
///
/// No algorithm of its own: the per-loan reconciliation is repeated and its
/// results accumulated into the standard 1-30 / 31-60 / 61-90 / 90+ day
/// aging buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PortfolioSummary {
    pub loans_analyzed: u32,
    pub overdue_loans: u32,
    pub outstanding_capital: Money,
    pub overdue_capital: Money,
    pub days_1_30: AgeBucket,
    pub days_31_60: AgeBucket,
    pub days_61_90: AgeBucket,
    pub days_over_90: AgeBucket,
}

impl PortfolioSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// fold one loan's arrears summary into the aggregate
    pub fn add_loan(&mut self, summary: &ArrearsSummary, outstanding_capital: Money) {
        self.loans_analyzed += 1;
        self.outstanding_capital += outstanding_capital;

        if !summary.is_overdue {
            return;
        }

        self.overdue_loans += 1;
        self.overdue_capital += summary.overdue_capital;

        match summary.days_overdue {
            1..=30 => self.days_1_30.add(summary),
            31..=60 => self.days_31_60.add(summary),
            61..=90 => self.days_61_90.add(summary),
            d if d > 90 => self.days_over_90.add(summary),
            _ => {}
        }
    }

    /// portfolio at risk: overdue capital over outstanding capital
    pub fn portfolio_at_risk(&self) -> Rate {
        if self.outstanding_capital.is_zero() {
            return Rate::ZERO;
        }
        Rate::from_decimal(self.overdue_capital.as_decimal() / self.outstanding_capital.as_decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::analyze_loan_status;
    use crate::types::PaymentRecord;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn overdue_summary(days: u32, capital: i64) -> ArrearsSummary {
        ArrearsSummary {
            is_overdue: true,
            days_overdue: days,
            overdue_capital: Money::from_major(capital),
            overdue_total: Money::from_major(capital),
            ..ArrearsSummary::default()
        }
    }

    #[test]
    fn test_bucket_boundaries() {
        let mut portfolio = PortfolioSummary::new();
        for (days, capital) in [(1, 10), (30, 20), (31, 30), (60, 40), (61, 50), (90, 60), (91, 70)]
        {
            portfolio.add_loan(&overdue_summary(days, capital), Money::from_major(1_000));
        }

        assert_eq!(portfolio.loans_analyzed, 7);
        assert_eq!(portfolio.overdue_loans, 7);
        assert_eq!(portfolio.days_1_30.loans, 2);
        assert_eq!(portfolio.days_1_30.overdue_capital, Money::from_major(30));
        assert_eq!(portfolio.days_31_60.loans, 2);
        assert_eq!(portfolio.days_31_60.overdue_capital, Money::from_major(70));
        assert_eq!(portfolio.days_61_90.loans, 2);
        assert_eq!(portfolio.days_61_90.overdue_capital, Money::from_major(110));
        assert_eq!(portfolio.days_over_90.loans, 1);
        assert_eq!(portfolio.days_over_90.overdue_capital, Money::from_major(70));
    }

    #[test]
    fn test_performing_loans_only_count_outstanding() {
        let mut portfolio = PortfolioSummary::new();
        portfolio.add_loan(&ArrearsSummary::default(), Money::from_major(400_000));
        portfolio.add_loan(&ArrearsSummary::default(), Money::from_major(600_000));

        assert_eq!(portfolio.loans_analyzed, 2);
        assert_eq!(portfolio.overdue_loans, 0);
        assert_eq!(portfolio.outstanding_capital, Money::from_major(1_000_000));
        assert_eq!(portfolio.portfolio_at_risk(), Rate::ZERO);
    }

    #[test]
    fn test_par_ratio() {
        let mut portfolio = PortfolioSummary::new();
        portfolio.add_loan(&overdue_summary(45, 200_000), Money::from_major(800_000));
        portfolio.add_loan(&ArrearsSummary::default(), Money::from_major(200_000));

        assert_eq!(portfolio.portfolio_at_risk(), Rate::from_decimal(dec!(0.2)));
    }

    #[test]
    fn test_par_empty_portfolio_is_zero() {
        assert_eq!(PortfolioSummary::new().portfolio_at_risk(), Rate::ZERO);
    }

    #[test]
    fn test_aggregation_from_real_reconciliation() {
        // one loan five months behind, one loan current
        let behind = analyze_loan_status(
            Money::from_major(1_200_000),
            Rate::from_percentage(18),
            12,
            Some(date(2024, 1, 15)),
            &[],
            date(2024, 6, 20),
        );
        let current = analyze_loan_status(
            Money::from_major(600_000),
            Rate::from_percentage(12),
            6,
            Some(date(2024, 6, 1)),
            &[PaymentRecord::new(
                date(2024, 6, 5),
                Money::from_major(100_000),
                Money::from_major(6_000),
            )],
            date(2024, 6, 20),
        );

        let mut portfolio = PortfolioSummary::new();
        portfolio.add_loan(&behind, Money::from_major(1_200_000));
        portfolio.add_loan(&current, Money::from_major(500_000));

        assert_eq!(portfolio.overdue_loans, 1);
        assert_eq!(portfolio.days_over_90.loans, 1);
        assert_eq!(portfolio.overdue_capital, Money::from_major(500_000));
        assert_eq!(
            portfolio.portfolio_at_risk(),
            Rate::from_decimal(dec!(500000) / dec!(1700000))
        );
    }
}
