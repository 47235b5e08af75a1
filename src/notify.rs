use colored::Colorize;

use crate::fmt::money;

/// Delivery seam for user-facing alerts. The console implementation prints;
/// tests substitute a recording double.
pub trait Notifier {
    fn budget_alert(&self, total_expenses: f64, threshold: f64);
    fn purchase_due(&self, item: &str, due_date: &str);
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn budget_alert(&self, total_expenses: f64, threshold: f64) {
        eprintln!(
            "{} expenses have reached {} (threshold {})",
            "Budget alert:".yellow().bold(),
            money(total_expenses),
            money(threshold),
        );
    }

    fn purchase_due(&self, item: &str, due_date: &str) {
        println!("{} '{item}' has a due date of {due_date}", "Reminder:".cyan());
    }
}
