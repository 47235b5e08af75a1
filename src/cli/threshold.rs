use crate::error::{Result, TallyError};
use crate::fmt::money;
use crate::settings::{load_settings, save_settings};
use crate::validate;

pub fn set(amount: f64) -> Result<()> {
    validate::amount(amount)?;
    if amount <= 0.0 {
        return Err(TallyError::Validation(
            "Threshold must be greater than zero".to_string(),
        ));
    }

    let mut settings = load_settings();
    settings.budget_threshold = Some(amount);
    save_settings(&settings)?;
    println!("Budget threshold set to {}", money(amount));
    Ok(())
}

pub fn show() -> Result<()> {
    match load_settings().budget_threshold {
        Some(threshold) => println!("Budget threshold: {}", money(threshold)),
        None => println!("No budget threshold set"),
    }
    Ok(())
}

pub fn unset() -> Result<()> {
    let mut settings = load_settings();
    settings.budget_threshold = None;
    save_settings(&settings)?;
    println!("Budget threshold removed");
    Ok(())
}
