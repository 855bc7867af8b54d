/// teller day - caisse funding, counter operations and day close
use chrono::{TimeZone, Utc};
use microfin_rs::{
    Account, ChartOfAccounts, DisbursementFees, Journal, Loan, Money, Rate, SafeTimeProvider,
    TimeSource, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap(),
    ));

    let mut journal = Journal::new(ChartOfAccounts::standard());

    // the vault opens the day with cash on hand
    let mut vault_account = Account::vault("VAULT-01");
    vault_account.balance = Money::from_major(2_000_000);
    let vault = journal.open_account(vault_account);

    let till = journal.open_account(Account::teller_till("TILL-01"));
    let client_a = journal.open_account(Account::client_deposit("CL-0001"));
    let client_b = journal.open_account(Account::client_deposit("CL-0002"));

    // fund the till, serve the counter
    journal.fund_caisse(vault, till, Money::from_major(500_000), &time)?;
    journal.deposit(client_a, Money::from_major(50_000), &time)?;
    journal.deposit(client_b, Money::from_major(120_000), &time)?;
    journal.withdraw(client_b, Money::from_major(20_000), &time)?;
    journal.transfer(client_b, client_a, Money::from_major(30_000), &time)?;

    // an approved loan is disbursed into a client account, fees netted
    let mut loan = Loan::request(
        Uuid::new_v4(),
        "AGENCE-01",
        Money::from_major(600_000),
        Rate::from_percentage(15),
        6,
        &time,
    );
    loan.start_review(&time)?;
    loan.approve(&time)?;
    let fees = DisbursementFees {
        origination_fee: Money::from_major(12_000),
        insurance: Money::from_major(3_000),
    };
    journal.disburse(&mut loan, client_a, fees, &time)?;

    // day close: return the till to the vault
    journal.return_caisse(till, vault, Money::from_major(500_000), &time)?;

    println!("entries posted: {}", journal.entries().len());
    for entry in journal.entries() {
        println!(
            "  {:?} {}  debits {} / credits {}",
            entry.operation,
            entry.reference,
            entry.total_debits(),
            entry.total_credits()
        );
    }
    println!("client A balance: {}", journal.account(client_a)?.balance);
    println!("client B balance: {}", journal.account(client_b)?.balance);
    println!("vault balance   : {}", journal.account(vault)?.balance);

    Ok(())
}
