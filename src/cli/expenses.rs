use comfy_table::{Cell, Table};

use crate::db::Database;
use crate::error::Result;
use crate::fmt::money;
use crate::ledger;
use crate::notify::Notifier;
use crate::settings::Settings;

pub fn add(
    db: &Database,
    settings: &Settings,
    notifier: &dyn Notifier,
    item: &str,
    amount: f64,
    recurring_day: Option<&str>,
) -> Result<()> {
    let id = ledger::add_expense(
        db,
        item,
        amount,
        recurring_day,
        settings.budget_threshold,
        notifier,
    )?;
    match recurring_day {
        Some(day) => println!(
            "Added expense #{id}: {item} {} (repeats on day {day})",
            money(amount)
        ),
        None => println!("Added expense #{id}: {item} {}", money(amount)),
    }
    Ok(())
}

pub fn list(db: &Database) -> Result<()> {
    let rows = ledger::get_expenses(db)?;
    let mut table = Table::new();
    table.set_header(vec!["ID", "Item", "Amount", "Date", "Repeats"]);
    for expense in &rows {
        table.add_row(vec![
            Cell::new(expense.id),
            Cell::new(&expense.item),
            Cell::new(money(expense.amount)),
            Cell::new(&expense.date),
            Cell::new(match expense.recurring_date.as_deref() {
                Some(day) if expense.is_recurring => format!("day {day}"),
                _ => String::new(),
            }),
        ]);
    }
    println!("Expenses\n{table}");
    println!("Total: {}", money(ledger::total_expenses(db)?));
    Ok(())
}

pub fn delete(db: &Database, id: i64) -> Result<()> {
    ledger::delete_expense(db, id)?;
    println!("Deleted expense #{id}");
    Ok(())
}

pub fn clear(db: &Database) -> Result<()> {
    ledger::clear_expenses(db)?;
    println!("Cleared all expenses");
    Ok(())
}
