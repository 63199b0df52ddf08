use super::{Clock, Fingerprint, FixedClock};
use crate::models::{Transaction, TransactionInput, TransactionType};

use std::str::FromStr;

use anyhow::Result;
use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;

fn input(account_id: &str, amount: &str, transaction_type: TransactionType, description: Option<&str>) -> Result<TransactionInput> {
    Ok(TransactionInput::new(account_id, Decimal::from_str(amount)?, transaction_type, description))
}

#[test]
fn test_fingerprint_is_deterministic_for_equal_content() -> Result<()> {
    let first = input("acc-1", "100.50", TransactionType::Deposit, Some("Salary"))?;
    let second = input("acc-1", "100.50", TransactionType::Deposit, Some("Salary"))?;

    assert_eq!(first.fingerprint(), second.fingerprint());

    Ok(())
}

#[test]
fn test_fingerprint_ignores_identity_and_timestamp() -> Result<()> {
    let content = input("acc-1", "10", TransactionType::Transfer, None)?;
    let first = Transaction::new("id-1".to_string(), content.clone(), Utc::now());
    let second = Transaction::new("id-2".to_string(), content.clone(), DateTime::<Utc>::UNIX_EPOCH);

    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first.fingerprint(), content.fingerprint());

    Ok(())
}

#[test]
fn test_fingerprint_treats_equal_amounts_with_different_scale_as_equal() -> Result<()> {
    let first = input("acc-1", "10.0", TransactionType::Deposit, None)?;
    let second = input("acc-1", "10.00", TransactionType::Deposit, None)?;

    assert_eq!(first.fingerprint(), second.fingerprint());

    Ok(())
}

#[test]
fn test_fingerprint_distinguishes_every_content_field() -> Result<()> {
    let base = input("acc-1", "10", TransactionType::Deposit, Some("Rent"))?;

    let variants = vec![
        input("acc-2", "10", TransactionType::Deposit, Some("Rent"))?,
        input("acc-1", "-10", TransactionType::Deposit, Some("Rent"))?,
        input("acc-1", "10", TransactionType::Withdrawal, Some("Rent"))?,
        input("acc-1", "10", TransactionType::Deposit, Some("Food"))?,
        input("acc-1", "10", TransactionType::Deposit, None)?,
    ];

    for variant in variants {
        assert_ne!(base.fingerprint(), variant.fingerprint(), "{variant:?}");
    }

    Ok(())
}

#[test]
fn test_fingerprint_separates_absent_and_empty_description() -> Result<()> {
    let absent = input("acc-1", "1", TransactionType::Deposit, None)?;
    let empty = input("acc-1", "1", TransactionType::Deposit, Some(""))?;

    assert_ne!(absent.fingerprint(), empty.fingerprint());

    Ok(())
}

#[test]
fn test_fingerprint_is_not_fooled_by_shifted_field_boundaries() -> Result<()> {
    let first = input("acc-1", "23", TransactionType::Deposit, None)?;
    let second = input("acc-12", "3", TransactionType::Deposit, None)?;

    assert_ne!(first.fingerprint(), second.fingerprint());

    Ok(())
}

#[test]
fn test_fingerprint_displays_as_hex_digest() -> Result<()> {
    let fingerprint = Fingerprint::compute("acc-1", Decimal::ONE, TransactionType::Deposit, None);
    let text = fingerprint.to_string();

    assert_eq!(text.len(), 64);
    assert!(text.chars().all(|c| c.is_ascii_hexdigit()));

    Ok(())
}

#[test]
fn test_fixed_clock_reports_its_time_of_day() -> Result<()> {
    let time = NaiveTime::from_hms_opt(7, 30, 0).ok_or_else(|| anyhow::anyhow!("invalid time"))?;
    let clock = FixedClock::at(time);

    assert_eq!(clock.local_time(), time);
    assert_eq!(clock.now().time(), time);

    Ok(())
}

#[test]
fn test_fixed_clock_keeps_local_time_and_utc_instant_apart() -> Result<()> {
    let instant = DateTime::parse_from_rfc3339("2024-01-01T08:00:00+02:00")?;
    let clock = FixedClock::new(instant);

    assert_eq!(clock.local_time(), NaiveTime::from_hms_opt(8, 0, 0).ok_or_else(|| anyhow::anyhow!("invalid time"))?);
    assert_eq!(clock.now().to_rfc3339(), "2024-01-01T06:00:00+00:00");

    Ok(())
}
