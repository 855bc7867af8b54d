/// quick start - schedule a loan and read its arrears picture
use chrono::NaiveDate;
use microfin_rs::{analyze_loan_status, generate_schedule, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a 1,200,000 loan at 18% over 12 months, disbursed mid January
    let principal = Money::from_major(1_200_000);
    let rate = Rate::from_percentage(18);
    let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

    let schedule = generate_schedule(principal, rate, 12, start);
    for line in &schedule {
        println!(
            "#{:<2} due {}  principal {:>9}  interest {:>7}",
            line.number, line.due_date, line.principal_due, line.interest_due
        );
    }

    // five months later, nothing repaid yet
    let today = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
    let summary = analyze_loan_status(principal, rate, 12, Some(start), &[], today);

    println!();
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
