pub mod backup;
pub mod clear;
pub mod expenses;
pub mod income;
pub mod init;
pub mod purchases;
pub mod recurring;
pub mod status;
pub mod threshold;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tally", about = "Personal budget and planned-purchase tracker.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up tally: choose a data directory and initialize the database.
    Init {
        /// Path for tally data (default: ~/Documents/tally)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Record and list income.
    Income {
        #[command(subcommand)]
        command: IncomeCommands,
    },
    /// Record and list expenses.
    Expense {
        #[command(subcommand)]
        command: ExpenseCommands,
    },
    /// Track planned purchases and mark them bought.
    Purchase {
        #[command(subcommand)]
        command: PurchaseCommands,
    },
    /// Materialize recurring income and expenses.
    Recurring {
        #[command(subcommand)]
        command: RecurringCommands,
    },
    /// Show totals, balance, and database statistics.
    Status,
    /// Manage the budget alert threshold.
    Threshold {
        #[command(subcommand)]
        command: ThresholdCommands,
    },
    /// Delete every row from every table.
    ClearAll,
    /// Delete the database file entirely; everything starts over.
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Back up the database.
    Backup {
        /// Output path (default: <data_dir>/backups/tally-YYYYMMDD-HHMMSS.db)
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Add an income entry dated today.
    Add {
        /// Where the money came from, e.g. 'Salary'
        source: String,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Repeat monthly on this day (1-31).
        #[arg(long = "recurring-day")]
        recurring_day: Option<String>,
    },
    /// List income entries, newest first.
    List,
    /// Delete an income entry by ID.
    Delete { id: i64 },
    /// Delete all income entries.
    Clear,
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add an expense entry dated today.
    Add {
        /// What the money went to, e.g. 'Groceries'
        item: String,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Repeat monthly on this day (1-31).
        #[arg(long = "recurring-day")]
        recurring_day: Option<String>,
    },
    /// List expense entries, newest first.
    List,
    /// Delete an expense entry by ID.
    Delete { id: i64 },
    /// Delete all expense entries.
    Clear,
}

#[derive(Subcommand)]
pub enum PurchaseCommands {
    /// Add a planned purchase.
    Add {
        item: String,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Due date: YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// List planned purchases, unpurchased first.
    List,
    /// Mark a purchase bought and record the matching expense.
    Bought {
        id: i64,
        /// Amount actually paid (default: the planned amount).
        #[arg(long, allow_negative_numbers = true)]
        amount: Option<f64>,
        /// Expense item name (default: the planned item).
        #[arg(long)]
        item: Option<String>,
    },
    /// Delete a planned purchase by ID.
    Delete { id: i64 },
    /// Delete all planned purchases.
    Clear,
}

#[derive(Subcommand)]
pub enum RecurringCommands {
    /// Scan recurring templates and insert any entries due today.
    Run,
}

#[derive(Subcommand)]
pub enum ThresholdCommands {
    /// Set the expense total that triggers a budget alert.
    Set {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },
    /// Show the current threshold.
    Show,
    /// Remove the threshold.
    Unset,
}
