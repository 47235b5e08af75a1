use comfy_table::{Cell, Table};

use crate::db::Database;
use crate::error::Result;
use crate::fmt::money;
use crate::ledger;

pub fn add(db: &Database, source: &str, amount: f64, recurring_day: Option<&str>) -> Result<()> {
    let id = ledger::add_income(db, source, amount, recurring_day)?;
    match recurring_day {
        Some(day) => println!(
            "Added income #{id}: {source} {} (repeats on day {day})",
            money(amount)
        ),
        None => println!("Added income #{id}: {source} {}", money(amount)),
    }
    Ok(())
}

pub fn list(db: &Database) -> Result<()> {
    let rows = ledger::get_income(db)?;
    let mut table = Table::new();
    table.set_header(vec!["ID", "Source", "Amount", "Date", "Repeats"]);
    for income in &rows {
        table.add_row(vec![
            Cell::new(income.id),
            Cell::new(&income.source),
            Cell::new(money(income.amount)),
            Cell::new(&income.date),
            Cell::new(match income.recurring_date.as_deref() {
                Some(day) if income.is_recurring => format!("day {day}"),
                _ => String::new(),
            }),
        ]);
    }
    println!("Income\n{table}");
    println!("Total: {}", money(ledger::total_income(db)?));
    Ok(())
}

pub fn delete(db: &Database, id: i64) -> Result<()> {
    ledger::delete_income(db, id)?;
    println!("Deleted income #{id}");
    Ok(())
}

pub fn clear(db: &Database) -> Result<()> {
    ledger::clear_income(db)?;
    println!("Cleared all income");
    Ok(())
}
