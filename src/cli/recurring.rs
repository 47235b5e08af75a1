use crate::db::Database;
use crate::error::Result;
use crate::recurring;

/// Run the daily materialization scan. A failure in one entity class is
/// reported but does not block the other; the command only fails when both
/// scans do.
pub fn run(db: &Database) -> Result<()> {
    let outcome = recurring::run(db);

    let mut first_error = None;
    match outcome.income {
        Ok(n) => println!("Income: {n} recurring entries materialized"),
        Err(e) => {
            eprintln!("Income scan failed: {e}");
            first_error = Some(e);
        }
    }
    match outcome.expenses {
        Ok(n) => println!("Expenses: {n} recurring entries materialized"),
        Err(e) => {
            eprintln!("Expense scan failed: {e}");
            if first_error.is_some() {
                return Err(e);
            }
        }
    }

    Ok(())
}
