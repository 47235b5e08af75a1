use chrono::{Datelike, Local, NaiveDate};
use rusqlite::params;

use crate::db::Database;
use crate::error::Result;

/// Outcome of one materialization scan. The income and expense passes run
/// independently so a failure in one class never blocks the other.
pub struct ScanOutcome {
    pub income: Result<usize>,
    pub expenses: Result<usize>,
}

pub fn run(db: &Database) -> ScanOutcome {
    materialize_on(db, Local::now().date_naive())
}

/// Insert a concrete ledger row for every recurring template due today. A
/// template is due when its recurring day-of-month equals today's and it has
/// not materialized yet this period, so re-running within the same day is a
/// no-op. Each inserted row is itself a template for the months after it.
pub fn materialize_on(db: &Database, today: NaiveDate) -> ScanOutcome {
    ScanOutcome {
        income: materialize_class(db, today, "income", "source"),
        expenses: materialize_class(db, today, "expenses", "item"),
    }
}

fn materialize_class(
    db: &Database,
    today: NaiveDate,
    table: &str,
    label_column: &str,
) -> Result<usize> {
    let day = today.day();
    let period = today.format("%Y-%m").to_string();
    let date = today.format("%Y-%m-%d").to_string();

    db.with_conn(|conn| {
        // One transaction per class: a template is never stamped without its
        // clone landing, and vice versa.
        let tx = conn.transaction()?;

        let templates: Vec<(i64, String, f64, Option<String>)> = {
            let mut stmt = tx.prepare(&format!(
                "SELECT id, {label_column}, amount, recurring_date FROM {table} \
                 WHERE is_recurring = 1 \
                 AND (last_materialized IS NULL OR last_materialized <> ?1)"
            ))?;
            stmt.query_map([&period], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?
        };

        let mut inserted = 0usize;
        for (id, label, amount, recurring_date) in templates {
            // Templates whose recurring day does not parse are left alone.
            let due_day = recurring_date
                .as_deref()
                .and_then(|d| d.trim().parse::<u32>().ok());
            if due_day != Some(day) {
                continue;
            }

            tx.execute(
                &format!(
                    "INSERT INTO {table} ({label_column}, amount, date, is_recurring, \
                     recurring_date, last_materialized) VALUES (?1, ?2, ?3, 1, ?4, ?5)"
                ),
                params![label, amount, date, recurring_date, period],
            )?;
            tx.execute(
                &format!("UPDATE {table} SET last_materialized = ?1 WHERE id = ?2"),
                params![period, id],
            )?;
            inserted += 1;
        }

        tx.commit()?;
        Ok(inserted)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn test_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("test.db"));
        db.initialize().unwrap();
        (dir, db)
    }

    fn add_income_template(db: &Database, source: &str, amount: f64, day: &str) {
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO income (source, amount, date, is_recurring, recurring_date) \
                 VALUES (?1, ?2, '2025-05-15', 1, ?3)",
                params![source, amount, day],
            )?;
            Ok(())
        })
        .unwrap();
    }

    fn income_count(db: &Database) -> i64 {
        db.with_conn(|conn| {
            Ok(conn.query_row("SELECT count(*) FROM income", [], |r| r.get(0))?)
        })
        .unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_due_template_materializes_once() {
        let (_dir, db) = test_db();
        add_income_template(&db, "Salary", 1000.0, "15");

        let outcome = materialize_on(&db, date("2025-06-15"));
        assert_eq!(outcome.income.unwrap(), 1);
        assert_eq!(income_count(&db), 2);

        let (row_date, recurring, row_day, period): (String, bool, String, String) = db
            .with_conn(|conn| {
                Ok(conn.query_row(
                    "SELECT date, is_recurring, recurring_date, last_materialized \
                     FROM income ORDER BY id DESC LIMIT 1",
                    [],
                    |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
                )?)
            })
            .unwrap();
        assert_eq!(row_date, "2025-06-15");
        assert!(recurring);
        assert_eq!(row_day, "15");
        assert_eq!(period, "2025-06");
    }

    #[test]
    fn test_same_day_rerun_is_a_noop() {
        let (_dir, db) = test_db();
        add_income_template(&db, "Salary", 1000.0, "15");

        assert_eq!(materialize_on(&db, date("2025-06-15")).income.unwrap(), 1);
        assert_eq!(materialize_on(&db, date("2025-06-15")).income.unwrap(), 0);
        assert_eq!(income_count(&db), 2);
    }

    #[test]
    fn test_non_matching_day_does_nothing() {
        let (_dir, db) = test_db();
        add_income_template(&db, "Salary", 1000.0, "15");
        assert_eq!(materialize_on(&db, date("2025-06-14")).income.unwrap(), 0);
        assert_eq!(income_count(&db), 1);
    }

    #[test]
    fn test_day_31_skips_short_months() {
        let (_dir, db) = test_db();
        add_income_template(&db, "Rent refund", 50.0, "31");
        assert_eq!(materialize_on(&db, date("2025-02-28")).income.unwrap(), 0);
        assert_eq!(materialize_on(&db, date("2025-03-31")).income.unwrap(), 1);
    }

    #[test]
    fn test_materialized_rows_join_the_template_pool() {
        let (_dir, db) = test_db();
        add_income_template(&db, "Salary", 1000.0, "15");

        // June: the original template produces one clone.
        assert_eq!(materialize_on(&db, date("2025-06-15")).income.unwrap(), 1);
        // July: both the original and the June clone are due.
        assert_eq!(materialize_on(&db, date("2025-07-15")).income.unwrap(), 2);
        assert_eq!(income_count(&db), 4);
    }

    #[test]
    fn test_malformed_template_skipped_not_fatal() {
        let (_dir, db) = test_db();
        add_income_template(&db, "Broken", 10.0, "someday");
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO income (source, amount, date, is_recurring, recurring_date) \
                 VALUES ('No day', 10, '2025-05-15', 1, NULL)",
                [],
            )?;
            Ok(())
        })
        .unwrap();
        add_income_template(&db, "Salary", 1000.0, "15");

        let outcome = materialize_on(&db, date("2025-06-15"));
        assert_eq!(outcome.income.unwrap(), 1);
        assert_eq!(income_count(&db), 4);
    }

    #[test]
    fn test_expense_templates_materialize_too() {
        let (_dir, db) = test_db();
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO expenses (item, amount, date, is_recurring, recurring_date) \
                 VALUES ('Netflix', 15.99, '2025-05-01', 1, '1')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let outcome = materialize_on(&db, date("2025-06-01"));
        assert_eq!(outcome.expenses.unwrap(), 1);
        let count: i64 = db
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT count(*) FROM expenses", [], |r| r.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_class_failures_are_independent() {
        let (_dir, db) = test_db();
        add_income_template(&db, "Salary", 1000.0, "15");
        db.with_conn(|conn| {
            conn.execute_batch("DROP TABLE expenses")?;
            Ok(())
        })
        .unwrap();

        let outcome = materialize_on(&db, date("2025-06-15"));
        assert_eq!(outcome.income.unwrap(), 1);
        assert!(outcome.expenses.is_err());
    }

    #[test]
    fn test_non_recurring_rows_are_ignored() {
        let (_dir, db) = test_db();
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO income (source, amount, date, is_recurring, recurring_date) \
                 VALUES ('One-off', 25, '2025-06-15', 0, NULL)",
                [],
            )?;
            Ok(())
        })
        .unwrap();
        assert_eq!(materialize_on(&db, date("2025-06-15")).income.unwrap(), 0);
        assert_eq!(income_count(&db), 1);
    }
}
