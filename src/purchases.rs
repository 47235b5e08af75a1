use chrono::Local;
use rusqlite::{params, OptionalExtension};

use crate::db::Database;
use crate::error::{Result, TallyError};
use crate::models::PlannedPurchase;
use crate::validate;

pub fn add_purchase(
    db: &Database,
    item: &str,
    amount: f64,
    due_date: Option<&str>,
) -> Result<i64> {
    validate::name(item, "Item name")?;
    validate::amount(amount)?;
    if let Some(due) = due_date {
        validate::full_date(due)?;
    }

    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO planned_purchases (item, amount, purchased, due_date) \
             VALUES (?1, ?2, 0, ?3)",
            params![item.trim(), amount, due_date],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Unpurchased first, newest first within each group.
pub fn get_purchases(db: &Database) -> Result<Vec<PlannedPurchase>> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, item, amount, purchased, due_date FROM planned_purchases \
             ORDER BY purchased ASC, id DESC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(PlannedPurchase {
                    id: row.get(0)?,
                    item: row.get(1)?,
                    amount: row.get(2)?,
                    purchased: row.get(3)?,
                    due_date: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

pub fn get_purchase(db: &Database, id: i64) -> Result<PlannedPurchase> {
    db.with_conn(|conn| {
        conn.query_row(
            "SELECT id, item, amount, purchased, due_date FROM planned_purchases \
             WHERE id = ?1",
            [id],
            |row| {
                Ok(PlannedPurchase {
                    id: row.get(0)?,
                    item: row.get(1)?,
                    amount: row.get(2)?,
                    purchased: row.get(3)?,
                    due_date: row.get(4)?,
                })
            },
        )
        .optional()?
        .ok_or_else(|| TallyError::NotFound(format!("purchase #{id}")))
    })
}

/// Flip a planned purchase to bought and record the matching expense, as one
/// atomic step. Either the flag flips and the expense row lands, or neither
/// happens.
pub fn mark_as_bought(db: &Database, id: i64, amount: f64, item: &str) -> Result<()> {
    validate::name(item, "Item name")?;
    validate::amount(amount)?;

    db.with_conn(|conn| {
        let purchased: bool = conn
            .query_row(
                "SELECT purchased FROM planned_purchases WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| TallyError::NotFound(format!("purchase #{id}")))?;
        if purchased {
            return Err(TallyError::AlreadyBought(id));
        }

        let tx = conn.transaction()?;
        tx.execute(
            "UPDATE planned_purchases SET purchased = 1 WHERE id = ?1",
            [id],
        )?;
        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM expenses WHERE item = ?1 OR purchase_id = ?2",
                params![item, id],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            // Dropping the transaction rolls the flag update back.
            return Err(TallyError::DuplicateExpense(item.to_string()));
        }
        let date = Local::now().format("%Y-%m-%d").to_string();
        tx.execute(
            "INSERT INTO expenses (item, amount, date, is_recurring, purchase_id) \
             VALUES (?1, ?2, ?3, 0, ?4)",
            params![item, amount, date, id],
        )?;
        tx.commit()?;
        Ok(())
    })
}

pub fn delete_purchase(db: &Database, id: i64) -> Result<()> {
    db.with_conn(|conn| {
        let changed = conn.execute("DELETE FROM planned_purchases WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(TallyError::NotFound(format!("purchase #{id}")));
        }
        Ok(())
    })
}

pub fn clear_purchases(db: &Database) -> Result<()> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM planned_purchases", [])?;
        Ok(())
    })
}
