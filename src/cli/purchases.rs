use chrono::Local;
use comfy_table::{Cell, Color, Table};

use crate::db::Database;
use crate::error::Result;
use crate::fmt::money;
use crate::notify::Notifier;
use crate::purchases;

pub fn add(
    db: &Database,
    notifier: &dyn Notifier,
    item: &str,
    amount: f64,
    due: Option<&str>,
) -> Result<()> {
    let id = purchases::add_purchase(db, item, amount, due)?;
    println!("Added planned purchase #{id}: {item} {}", money(amount));
    if let Some(due) = due {
        notifier.purchase_due(item, due);
    }
    Ok(())
}

pub fn list(db: &Database) -> Result<()> {
    let today = Local::now().format("%Y-%m-%d").to_string();
    let rows = purchases::get_purchases(db)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Item", "Amount", "Bought", "Due"]);
    for purchase in &rows {
        let due_cell = match purchase.due_date.as_deref() {
            Some(due) if !purchase.purchased && *due < *today => {
                Cell::new(due).fg(Color::Red)
            }
            Some(due) => Cell::new(due),
            None => Cell::new(""),
        };
        table.add_row(vec![
            Cell::new(purchase.id),
            Cell::new(&purchase.item),
            Cell::new(money(purchase.amount)),
            Cell::new(if purchase.purchased { "yes" } else { "" }),
            due_cell,
        ]);
    }
    println!("Planned purchases\n{table}");
    Ok(())
}

pub fn bought(db: &Database, id: i64, amount: Option<f64>, item: Option<String>) -> Result<()> {
    let purchase = purchases::get_purchase(db, id)?;
    let amount = amount.unwrap_or(purchase.amount);
    let item = item.unwrap_or(purchase.item);

    purchases::mark_as_bought(db, id, amount, &item)?;
    println!("Marked #{id} bought and recorded expense: {item} {}", money(amount));
    Ok(())
}

pub fn delete(db: &Database, id: i64) -> Result<()> {
    purchases::delete_purchase(db, id)?;
    println!("Deleted purchase #{id}");
    Ok(())
}

pub fn clear(db: &Database) -> Result<()> {
    purchases::clear_purchases(db)?;
    println!("Cleared all planned purchases");
    Ok(())
}
