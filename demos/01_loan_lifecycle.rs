/// loan lifecycle - request through delinquency and catch-up, under test time
use chrono::{NaiveDate, TimeZone, Utc};
use microfin_rs::{
    Loan, Money, PaymentRecord, Rate, RiskLevel, SafeTimeProvider, TimeSource, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
    ));

    let mut loan = Loan::request(
        Uuid::new_v4(),
        "AGENCE-01",
        Money::from_major(1_200_000),
        Rate::from_percentage(18),
        12,
        &time,
    );
    loan.start_review(&time)?;
    loan.approve(&time)?;
    loan.mark_disbursed(Uuid::new_v4(), time.now().date_naive(), &time)?;
    println!("disbursed, {} installments persisted", loan.installments.len());

    // one repayment in March, then silence
    let march = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    loan.record_payment(
        PaymentRecord::new(march, Money::from_major(100_000), Money::from_major(18_000)),
        &time,
    )?;

    // jump to late June and look at the arrears picture
    let advance = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 6, 20, 9, 0, 0).unwrap(),
    ));
    loan.refresh_status(&advance);

    let summary = loan.arrears_at(&advance);
    println!("status            : {:?}", loan.status);
    println!("days overdue      : {}", summary.days_overdue);
    println!("overdue capital   : {}", summary.overdue_capital);
    println!("overdue interest  : {}", summary.overdue_interest);
    println!(
        "risk level        : {:?}",
        RiskLevel::from_days_overdue(summary.days_overdue)
    );
    if let Some(next) = summary.next_due_date {
        println!("next due          : {} ({})", next, summary.next_due_amount);
    }

    Ok(())
}
