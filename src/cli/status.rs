use crate::db::Database;
use crate::error::Result;
use crate::fmt::{format_bytes, money};
use crate::ledger;
use crate::purchases;
use crate::settings::Settings;

pub fn run(db: &Database, settings: &Settings) -> Result<()> {
    println!("Data dir:   {}", settings.data_dir);
    println!("Database:   {}", db.path().display());
    match settings.budget_threshold {
        Some(threshold) => println!("Threshold:  {}", money(threshold)),
        None => println!("Threshold:  (not set)"),
    }

    if !db.path().exists() {
        println!();
        println!("Database not found. Run `tally init` to set up.");
        return Ok(());
    }

    let size = std::fs::metadata(db.path())?.len();
    println!("DB size:    {}", format_bytes(size));

    let income = ledger::get_income(db)?;
    let expenses = ledger::get_expenses(db)?;
    let open_purchases = purchases::get_purchases(db)?
        .iter()
        .filter(|p| !p.purchased)
        .count();

    println!();
    println!("Income entries:    {}", income.len());
    println!("Expense entries:   {}", expenses.len());
    println!("Open purchases:    {open_purchases}");
    println!();
    println!("Total income:      {}", money(ledger::total_income(db)?));
    println!("Total expenses:    {}", money(ledger::total_expenses(db)?));
    println!("Balance:           {}", money(ledger::balance(db)?));

    Ok(())
}
