use std::borrow::Cow;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ServicingError};
use crate::events::{Event, EventStore};
use crate::schedule::{analyze_loan_status, generate_schedule, ArrearsSummary, Installment};
use crate::types::{AccountId, InstallmentStatus, LoanId, LoanStatus, PaymentRecord, RiskLevel};

/// a loan through its whole life: request, review, approval, disbursement,
/// repayment, delinquency and settlement
///
/// Loans are never deleted; every exit from the lifecycle is a soft status.
/// The installment rows are persisted at disbursement; loans migrated from
/// older books may carry none, in which case [`Loan::effective_schedule`]
/// recomputes the theoretical schedule on demand.
pub struct Loan {
    pub id: LoanId,
    pub client_id: Uuid,
    pub branch: String,
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub disbursement_date: Option<NaiveDate>,
    pub status: LoanStatus,
    pub installments: Vec<Installment>,
    pub payments: Vec<PaymentRecord>,
    pub events: EventStore,
}

impl Loan {
    /// capture a new loan application
    pub fn request(
        client_id: Uuid,
        branch: impl Into<String>,
        principal: Money,
        annual_rate: Rate,
        term_months: u32,
        time: &SafeTimeProvider,
    ) -> Self {
        let id = Uuid::new_v4();
        let mut events = EventStore::new();
        events.emit(Event::LoanRequested {
            loan_id: id,
            principal,
            term_months,
            timestamp: time.now(),
        });

        Self {
            id,
            client_id,
            branch: branch.into(),
            principal,
            annual_rate,
            term_months,
            disbursement_date: None,
            status: LoanStatus::Requested,
            installments: Vec::new(),
            payments: Vec::new(),
            events,
        }
    }

    /// hand the application to a credit officer
    pub fn start_review(&mut self, time: &SafeTimeProvider) -> Result<()> {
        self.expect_status(LoanStatus::Requested, "Requested")?;
        self.transition(LoanStatus::UnderReview, time);
        self.events.emit(Event::LoanReviewStarted {
            loan_id: self.id,
            timestamp: time.now(),
        });
        Ok(())
    }

    /// approve the reviewed application
    pub fn approve(&mut self, time: &SafeTimeProvider) -> Result<()> {
        self.expect_status(LoanStatus::UnderReview, "UnderReview")?;
        self.transition(LoanStatus::Approved, time);
        self.events.emit(Event::LoanApproved {
            loan_id: self.id,
            timestamp: time.now(),
        });
        Ok(())
    }

    /// decline the application
    pub fn reject(&mut self, reason: impl Into<String>, time: &SafeTimeProvider) -> Result<()> {
        match self.status {
            LoanStatus::Requested | LoanStatus::UnderReview => {}
            _ => {
                return Err(ServicingError::InvalidStatus {
                    current: self.status,
                    expected: "Requested or UnderReview".to_string(),
                })
            }
        }
        self.transition(LoanStatus::Rejected, time);
        self.events.emit(Event::LoanRejected {
            loan_id: self.id,
            reason: reason.into(),
            timestamp: time.now(),
        });
        Ok(())
    }

    /// withdraw the application before funds are released
    pub fn cancel(&mut self, time: &SafeTimeProvider) -> Result<()> {
        match self.status {
            LoanStatus::Requested | LoanStatus::UnderReview | LoanStatus::Approved => {}
            _ => {
                return Err(ServicingError::InvalidStatus {
                    current: self.status,
                    expected: "Requested, UnderReview or Approved".to_string(),
                })
            }
        }
        self.transition(LoanStatus::Cancelled, time);
        self.events.emit(Event::LoanCancelled {
            loan_id: self.id,
            timestamp: time.now(),
        });
        Ok(())
    }

    /// release the funds: set the disbursement date, persist the schedule
    /// and activate the loan
    ///
    /// Invoked by the journal as part of the disbursement operation; the
    /// account is where the funds were credited.
    pub fn mark_disbursed(
        &mut self,
        account_id: AccountId,
        date: NaiveDate,
        time: &SafeTimeProvider,
    ) -> Result<()> {
        self.expect_status(LoanStatus::Approved, "Approved")?;

        self.disbursement_date = Some(date);
        self.installments = generate_schedule(self.principal, self.annual_rate, self.term_months, date);
        self.transition(LoanStatus::Active, time);

        self.events.emit(Event::LoanDisbursed {
            loan_id: self.id,
            amount: self.principal,
            account_id,
            disbursement_date: date,
            installments: self.installments.len() as u32,
        });
        Ok(())
    }

    /// the schedule to display or reconcile against: persisted rows when
    /// they exist, the theoretical schedule otherwise
    pub fn effective_schedule(&self) -> Cow<'_, [Installment]> {
        if !self.installments.is_empty() {
            return Cow::Borrowed(&self.installments);
        }
        match self.disbursement_date {
            Some(start) => Cow::Owned(generate_schedule(
                self.principal,
                self.annual_rate,
                self.term_months,
                start,
            )),
            None => Cow::Owned(Vec::new()),
        }
    }

    /// record an actual repayment
    ///
    /// The record itself is the ground truth and is always kept; when a
    /// persisted schedule exists the principal and interest portions are
    /// additionally applied to the oldest open installments. Reversed
    /// records are stored but never applied.
    pub fn record_payment(&mut self, record: PaymentRecord, time: &SafeTimeProvider) -> Result<()> {
        match self.status {
            LoanStatus::Active | LoanStatus::Delinquent => {}
            _ => {
                return Err(ServicingError::InvalidStatus {
                    current: self.status,
                    expected: "Active or Delinquent".to_string(),
                })
            }
        }

        self.events.emit(Event::PaymentRecorded {
            loan_id: self.id,
            principal: record.principal,
            interest: record.interest,
            penalty: record.penalty,
            payment_date: record.date,
        });

        if !record.reversed {
            self.apply_to_installments(&record);
        }
        self.payments.push(record);

        if self.paid_capital() >= self.principal {
            self.transition(LoanStatus::Settled, time);
            self.events.emit(Event::LoanSettled {
                loan_id: self.id,
                timestamp: time.now(),
            });
        }
        Ok(())
    }

    /// reconcile the theoretical schedule against recorded payments
    pub fn arrears(&self, today: NaiveDate) -> ArrearsSummary {
        analyze_loan_status(
            self.principal,
            self.annual_rate,
            self.term_months,
            self.disbursement_date,
            &self.payments,
            today,
        )
    }

    /// same reconciliation with "today" taken from the time provider
    pub fn arrears_at(&self, time: &SafeTimeProvider) -> ArrearsSummary {
        self.arrears(time.now().date_naive())
    }

    /// risk bucket for display alongside the loan
    pub fn risk_level(&self, today: NaiveDate) -> RiskLevel {
        RiskLevel::from_days_overdue(self.arrears(today).days_overdue)
    }

    /// flip Active <-> Delinquent from the current arrears picture
    pub fn refresh_status(&mut self, time: &SafeTimeProvider) {
        if !matches!(self.status, LoanStatus::Active | LoanStatus::Delinquent) {
            return;
        }

        let summary = self.arrears_at(time);
        if summary.is_overdue && self.status == LoanStatus::Active {
            self.transition(LoanStatus::Delinquent, time);
            self.events.emit(Event::DelinquencyDetected {
                loan_id: self.id,
                days_overdue: summary.days_overdue,
                overdue_total: summary.overdue_total,
                timestamp: time.now(),
            });
        } else if !summary.is_overdue && self.status == LoanStatus::Delinquent {
            self.transition(LoanStatus::Active, time);
            self.events.emit(Event::DelinquencyCleared {
                loan_id: self.id,
                timestamp: time.now(),
            });
        }
    }

    /// principal not yet repaid
    pub fn outstanding_principal(&self) -> Money {
        (self.principal - self.paid_capital()).max(Money::ZERO)
    }

    fn paid_capital(&self) -> Money {
        self.payments
            .iter()
            .filter(|p| !p.reversed)
            .map(|p| p.principal)
            .fold(Money::ZERO, |acc, x| acc + x)
    }

    fn apply_to_installments(&mut self, record: &PaymentRecord) {
        let mut principal_left = record.principal;
        let mut interest_left = record.interest;

        for line in self
            .installments
            .iter_mut()
            .filter(|l| l.status != InstallmentStatus::Cancelled)
        {
            if principal_left.is_zero() && interest_left.is_zero() {
                break;
            }

            let to_principal = principal_left.min(line.principal_remaining);
            line.principal_remaining -= to_principal;
            principal_left -= to_principal;

            let to_interest = interest_left.min(line.interest_remaining);
            line.interest_remaining -= to_interest;
            interest_left -= to_interest;

            let applied = to_principal + to_interest;
            if applied.is_positive() {
                line.amount_paid += applied;
            }

            if line.is_settled() && line.status == InstallmentStatus::Pending {
                line.status = InstallmentStatus::Paid;
                line.paid_date = Some(record.date);
            }
        }
    }

    fn expect_status(&self, expected: LoanStatus, name: &str) -> Result<()> {
        if self.status != expected {
            return Err(ServicingError::InvalidStatus {
                current: self.status,
                expected: name.to_string(),
            });
        }
        Ok(())
    }

    fn transition(&mut self, new_status: LoanStatus, time: &SafeTimeProvider) {
        self.events.emit(Event::StatusChanged {
            loan_id: self.id,
            old_status: self.status,
            new_status,
            timestamp: time.now(),
        });
        self.status = new_status;
    }
}
