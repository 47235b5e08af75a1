use chrono::Local;
use rusqlite::params;

use crate::db::Database;
use crate::error::{Result, TallyError};
use crate::models::{Expense, Income};
use crate::notify::Notifier;
use crate::validate;

/// Insert an income entry dated today. A `recurring_day` turns the row into a
/// monthly template the materialization scan re-instantiates.
pub fn add_income(
    db: &Database,
    source: &str,
    amount: f64,
    recurring_day: Option<&str>,
) -> Result<i64> {
    validate::name(source, "Source")?;
    validate::amount(amount)?;
    if let Some(day) = recurring_day {
        validate::day_of_month(day)?;
    }

    db.with_conn(|conn| {
        let date = Local::now().format("%Y-%m-%d").to_string();
        conn.execute(
            "INSERT INTO income (source, amount, date, is_recurring, recurring_date) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![source.trim(), amount, date, recurring_day.is_some(), recurring_day],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Insert an expense entry dated today. When the running expense total
/// reaches `threshold`, the notifier receives a budget alert.
pub fn add_expense(
    db: &Database,
    item: &str,
    amount: f64,
    recurring_day: Option<&str>,
    threshold: Option<f64>,
    notifier: &dyn Notifier,
) -> Result<i64> {
    validate::name(item, "Item name")?;
    validate::amount(amount)?;
    if let Some(day) = recurring_day {
        validate::day_of_month(day)?;
    }

    let id = db.with_conn(|conn| {
        let date = Local::now().format("%Y-%m-%d").to_string();
        conn.execute(
            "INSERT INTO expenses (item, amount, date, is_recurring, recurring_date) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![item.trim(), amount, date, recurring_day.is_some(), recurring_day],
        )?;
        Ok(conn.last_insert_rowid())
    })?;

    if let Some(threshold) = threshold {
        let total = total_expenses(db)?;
        if total >= threshold {
            notifier.budget_alert(total, threshold);
        }
    }

    Ok(id)
}

pub fn get_income(db: &Database) -> Result<Vec<Income>> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, source, amount, date, is_recurring, recurring_date, last_materialized \
             FROM income ORDER BY date DESC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Income {
                    id: row.get(0)?,
                    source: row.get(1)?,
                    amount: row.get(2)?,
                    date: row.get(3)?,
                    is_recurring: row.get(4)?,
                    recurring_date: row.get(5)?,
                    last_materialized: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

pub fn get_expenses(db: &Database) -> Result<Vec<Expense>> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, item, amount, date, is_recurring, recurring_date, last_materialized, \
             purchase_id FROM expenses ORDER BY date DESC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Expense {
                    id: row.get(0)?,
                    item: row.get(1)?,
                    amount: row.get(2)?,
                    date: row.get(3)?,
                    is_recurring: row.get(4)?,
                    recurring_date: row.get(5)?,
                    last_materialized: row.get(6)?,
                    purchase_id: row.get(7)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

pub fn delete_income(db: &Database, id: i64) -> Result<()> {
    db.with_conn(|conn| {
        let changed = conn.execute("DELETE FROM income WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(TallyError::NotFound(format!("income #{id}")));
        }
        Ok(())
    })
}

pub fn delete_expense(db: &Database, id: i64) -> Result<()> {
    db.with_conn(|conn| {
        let changed = conn.execute("DELETE FROM expenses WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(TallyError::NotFound(format!("expense #{id}")));
        }
        Ok(())
    })
}

pub fn clear_income(db: &Database) -> Result<()> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM income", [])?;
        Ok(())
    })
}

pub fn clear_expenses(db: &Database) -> Result<()> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM expenses", [])?;
        Ok(())
    })
}

pub fn total_income(db: &Database) -> Result<f64> {
    db.with_conn(|conn| {
        Ok(conn.query_row("SELECT IFNULL(SUM(amount), 0) FROM income", [], |row| {
            row.get(0)
        })?)
    })
}

pub fn total_expenses(db: &Database) -> Result<f64> {
    db.with_conn(|conn| {
        Ok(conn.query_row("SELECT IFNULL(SUM(amount), 0) FROM expenses", [], |row| {
            row.get(0)
        })?)
    })
}

pub fn balance(db: &Database) -> Result<f64> {
    Ok(total_income(db)? - total_expenses(db)?)
}
