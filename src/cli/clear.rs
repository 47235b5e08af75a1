use std::io::Write;

use crate::db::Database;
use crate::error::Result;

pub fn all(db: &Database) -> Result<()> {
    db.clear_all()?;
    println!("Cleared all data");
    Ok(())
}

/// Deletes the database file itself. Confirmation lives here; the store
/// executes unconditionally.
pub fn reset(db: &Database, yes: bool) -> Result<()> {
    if !yes {
        print!("Delete the database file and all data? This cannot be undone. [y/N] ");
        std::io::stdout().flush()?;
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !matches!(input.trim(), "y" | "Y" | "yes") {
            println!("Aborted");
            return Ok(());
        }
    }

    db.reset()?;
    println!("Database deleted. It will be recreated on the next command.");
    Ok(())
}
