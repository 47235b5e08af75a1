mod cli;
mod db;
mod error;
mod fmt;
mod ledger;
mod models;
mod notify;
mod purchases;
mod recurring;
mod settings;
mod validate;

use clap::Parser;
use colored::Colorize;

use cli::{
    Cli, Commands, ExpenseCommands, IncomeCommands, PurchaseCommands, RecurringCommands,
    ThresholdCommands,
};
use db::Database;
use notify::ConsoleNotifier;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        if e.is_recoverable() {
            eprintln!("{} {e}", "Error:".yellow());
        } else {
            eprintln!("{} {e}", "Error:".red());
            eprintln!("The database could not be reached. Try again; if the file is damaged, run `tally reset`.");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> error::Result<()> {
    let settings = settings::load_settings();
    let db = Database::new(settings::db_path(&settings));
    let notifier = ConsoleNotifier;

    match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Income { command } => match command {
            IncomeCommands::Add {
                source,
                amount,
                recurring_day,
            } => cli::income::add(&db, &source, amount, recurring_day.as_deref()),
            IncomeCommands::List => cli::income::list(&db),
            IncomeCommands::Delete { id } => cli::income::delete(&db, id),
            IncomeCommands::Clear => cli::income::clear(&db),
        },
        Commands::Expense { command } => match command {
            ExpenseCommands::Add {
                item,
                amount,
                recurring_day,
            } => cli::expenses::add(
                &db,
                &settings,
                &notifier,
                &item,
                amount,
                recurring_day.as_deref(),
            ),
            ExpenseCommands::List => cli::expenses::list(&db),
            ExpenseCommands::Delete { id } => cli::expenses::delete(&db, id),
            ExpenseCommands::Clear => cli::expenses::clear(&db),
        },
        Commands::Purchase { command } => match command {
            PurchaseCommands::Add { item, amount, due } => {
                cli::purchases::add(&db, &notifier, &item, amount, due.as_deref())
            }
            PurchaseCommands::List => cli::purchases::list(&db),
            PurchaseCommands::Bought { id, amount, item } => {
                cli::purchases::bought(&db, id, amount, item)
            }
            PurchaseCommands::Delete { id } => cli::purchases::delete(&db, id),
            PurchaseCommands::Clear => cli::purchases::clear(&db),
        },
        Commands::Recurring { command } => match command {
            RecurringCommands::Run => cli::recurring::run(&db),
        },
        Commands::Status => cli::status::run(&db, &settings),
        Commands::Threshold { command } => match command {
            ThresholdCommands::Set { amount } => cli::threshold::set(amount),
            ThresholdCommands::Show => cli::threshold::show(),
            ThresholdCommands::Unset => cli::threshold::unset(),
        },
        Commands::ClearAll => cli::clear::all(&db),
        Commands::Reset { yes } => cli::clear::reset(&db, yes),
        Commands::Backup { output } => cli::backup::run(&db, &settings, output),
    }
}
