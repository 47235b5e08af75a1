use regex::Regex;

use crate::error::{Result, TallyError};

/// Largest amount accepted for any monetary field: 2^53 - 1, the biggest
/// integer a double represents exactly.
pub const MAX_AMOUNT: f64 = 9_007_199_254_740_991.0;

pub fn amount(value: f64) -> Result<()> {
    if value.is_nan() {
        return Err(TallyError::Validation("Amount must be a valid number".to_string()));
    }
    if value < 0.0 {
        return Err(TallyError::Validation("Amount cannot be negative".to_string()));
    }
    if !value.is_finite() || value > MAX_AMOUNT {
        return Err(TallyError::Validation("Amount is too large".to_string()));
    }
    Ok(())
}

pub fn name(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TallyError::Validation(format!("{field} cannot be empty")));
    }
    if value.chars().count() > 100 {
        return Err(TallyError::Validation(format!(
            "{field} is too long (max 100 characters)"
        )));
    }
    Ok(())
}

/// A full YYYY-MM-DD date: real calendar day, year 2000-2100, not in the
/// future.
pub fn full_date(value: &str) -> Result<()> {
    let shaped = Regex::new(r"^\d{4}-\d{2}-\d{2}$")
        .map(|re| re.is_match(value))
        .unwrap_or(false);
    if !shaped {
        return Err(TallyError::Validation(
            "Date must be in YYYY-MM-DD format".to_string(),
        ));
    }

    let year: i32 = value[..4].parse().unwrap_or(0);
    if !(2000..=2100).contains(&year) {
        return Err(TallyError::Validation(
            "Year must be between 2000 and 2100".to_string(),
        ));
    }

    let date = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        TallyError::Validation("Date is not a valid calendar day".to_string())
    })?;
    if date > chrono::Local::now().date_naive() {
        return Err(TallyError::Validation("Date cannot be in the future".to_string()));
    }

    Ok(())
}

/// A recurring day-of-month: 1-31, optionally zero-padded. Day 31 is allowed
/// even though some months never reach it; those months simply produce no
/// occurrence.
pub fn day_of_month(value: &str) -> Result<()> {
    let matched = Regex::new(r"^(0?[1-9]|[12][0-9]|3[01])$")
        .map(|re| re.is_match(value))
        .unwrap_or(false);
    if matched {
        Ok(())
    } else {
        Err(TallyError::Validation(
            "Recurring day must be a day of the month (1-31)".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_accepts_zero_and_positive() {
        assert!(amount(0.0).is_ok());
        assert!(amount(1234.56).is_ok());
        assert!(amount(MAX_AMOUNT).is_ok());
    }

    #[test]
    fn test_amount_rejects_negative_nan_infinite() {
        assert!(amount(-0.01).is_err());
        assert!(amount(f64::NAN).is_err());
        assert!(amount(f64::INFINITY).is_err());
        assert!(amount(MAX_AMOUNT * 2.0).is_err());
    }

    #[test]
    fn test_name_rejects_blank_and_overlong() {
        assert!(name("Salary", "Source").is_ok());
        assert!(name("", "Source").is_err());
        assert!(name("   ", "Source").is_err());
        assert!(name(&"x".repeat(100), "Source").is_ok());
        assert!(name(&"x".repeat(101), "Source").is_err());
    }

    #[test]
    fn test_name_error_identifies_field() {
        let err = name("", "Item name").unwrap_err();
        assert!(err.to_string().contains("Item name"));
    }

    #[test]
    fn test_full_date_shape() {
        assert!(full_date("2024-06-15").is_ok());
        assert!(full_date("15-06-2024").is_err());
        assert!(full_date("2024/06/15").is_err());
        assert!(full_date("2024-6-15").is_err());
    }

    #[test]
    fn test_full_date_year_bounds() {
        assert!(full_date("1999-12-31").is_err());
        assert!(full_date("2000-01-01").is_ok());
    }

    #[test]
    fn test_full_date_rejects_impossible_days() {
        assert!(full_date("2023-02-29").is_err());
        assert!(full_date("2024-02-29").is_ok());
        assert!(full_date("2024-04-31").is_err());
        assert!(full_date("2024-13-01").is_err());
    }

    #[test]
    fn test_full_date_rejects_future() {
        let tomorrow = chrono::Local::now().date_naive() + chrono::Days::new(1);
        assert!(full_date(&tomorrow.format("%Y-%m-%d").to_string()).is_err());
        let today = chrono::Local::now().date_naive();
        assert!(full_date(&today.format("%Y-%m-%d").to_string()).is_ok());
    }

    #[test]
    fn test_day_of_month() {
        assert!(day_of_month("1").is_ok());
        assert!(day_of_month("01").is_ok());
        assert!(day_of_month("15").is_ok());
        assert!(day_of_month("31").is_ok());
        assert!(day_of_month("0").is_err());
        assert!(day_of_month("32").is_err());
        assert!(day_of_month("").is_err());
        assert!(day_of_month("abc").is_err());
        assert!(day_of_month("1.5").is_err());
    }
}
