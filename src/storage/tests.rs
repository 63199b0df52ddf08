use super::{Storage, StorageError, TransactionStorage};
use crate::models::{Transaction, TransactionInput, TransactionType};

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, Result};
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;

fn content(account_id: &str, amount: &str, description: Option<&str>) -> Result<TransactionInput> {
    Ok(TransactionInput::new(account_id, Decimal::from_str(amount)?, TransactionType::Deposit, description))
}

fn transaction(id: &str, input: TransactionInput, offset_seconds: i64) -> Result<Transaction> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().ok_or_else(|| anyhow!("invalid timestamp"))?;
    Ok(Transaction::new(id.to_string(), input, base + Duration::seconds(offset_seconds)))
}

#[test]
fn test_storage_basic_save_and_find_operations() -> Result<()> {
    let storage = TransactionStorage::new();

    assert!(storage.find_by_id("missing").is_none());

    let saved = storage.save(transaction("tx-1", content("acc-1", "100.0", Some("Salary"))?, 0)?)?;
    let retrieved = storage.find_by_id("tx-1").ok_or_else(|| anyhow!("Transaction not found in storage"))?;

    assert_eq!(retrieved, saved);
    assert_eq!(storage.count(), 1);

    Ok(())
}

#[test]
fn test_exists_follows_save_and_delete() -> Result<()> {
    let storage = TransactionStorage::new();
    let input = content("acc-1", "25", None)?;

    assert!(!storage.exists(&input));

    storage.save(transaction("tx-1", input.clone(), 0)?)?;
    assert!(storage.exists(&input));

    let removed = storage.delete("tx-1").ok_or_else(|| anyhow!("Transaction was not removed"))?;
    assert_eq!(removed.id, "tx-1");
    assert!(!storage.exists(&input));
    assert_eq!(storage.count(), 0);

    Ok(())
}

#[test]
fn test_save_is_idempotent_for_identical_records() -> Result<()> {
    let storage = TransactionStorage::new();
    let record = transaction("tx-1", content("acc-1", "10", Some("Coffee"))?, 0)?;

    storage.save(record.clone())?;
    storage.save(record.clone())?;

    assert_eq!(storage.count(), 1);
    assert_eq!(storage.find_by_id("tx-1"), Some(record));

    Ok(())
}

#[test]
fn test_save_rejects_content_owned_by_another_id() -> Result<()> {
    let storage = TransactionStorage::new();
    let input = content("acc-1", "10", Some("Coffee"))?;

    storage.save(transaction("tx-1", input.clone(), 0)?)?;
    let result = storage.save(transaction("tx-2", input, 1)?);

    assert!(matches!(result, Err(StorageError::Conflict { ref existing_id, .. }) if existing_id == "tx-1"));
    assert!(storage.find_by_id("tx-2").is_none());
    assert_eq!(storage.count(), 1);

    Ok(())
}

#[test]
fn test_content_change_moves_the_fingerprint() -> Result<()> {
    let storage = TransactionStorage::new();
    let before = content("acc-1", "10", Some("Old"))?;
    let after = content("acc-1", "10", Some("New"))?;

    let original = storage.save(transaction("tx-1", before.clone(), 0)?)?;
    storage.replace(original.with_content(after.clone()))?;

    assert!(!storage.exists(&before));
    assert!(storage.exists(&after));

    // the released content can be claimed by another record
    storage.save(transaction("tx-2", before.clone(), 1)?)?;
    assert!(storage.exists(&before));
    assert_eq!(storage.count(), 2);

    Ok(())
}

#[test]
fn test_replace_requires_an_existing_record() -> Result<()> {
    let storage = TransactionStorage::new();
    let result = storage.replace(transaction("tx-1", content("acc-1", "1", None)?, 0)?);

    assert!(matches!(result, Err(StorageError::Missing { ref id }) if id == "tx-1"));
    assert_eq!(storage.count(), 0);

    Ok(())
}

#[test]
fn test_delete_of_missing_id_is_a_no_op() -> Result<()> {
    let storage = TransactionStorage::new();
    storage.save(transaction("tx-1", content("acc-1", "1", None)?, 0)?)?;

    assert!(storage.delete("tx-404").is_none());
    assert_eq!(storage.count(), 1);

    assert!(storage.delete("tx-1").is_some());
    assert!(storage.delete("tx-1").is_none());

    Ok(())
}

#[test]
fn test_find_all_pages_are_disjoint_and_ordered() -> Result<()> {
    let storage = TransactionStorage::new();

    for index in 0..5 {
        let id = format!("tx-{index}");
        storage.save(transaction(&id, content("acc-1", &index.to_string(), None)?, 4 - index)?)?;
    }

    let first = storage.find_all(0, 2);
    let second = storage.find_all(1, 2);
    let third = storage.find_all(2, 2);
    let beyond = storage.find_all(3, 2);

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(third.len(), 1);
    assert!(beyond.is_empty());

    let ids: Vec<String> = first.iter().chain(&second).chain(&third).map(|record| record.id.clone()).collect();
    assert_eq!(ids, vec!["tx-4", "tx-3", "tx-2", "tx-1", "tx-0"]);

    assert_eq!(storage.find_all(0, 2), first);

    Ok(())
}

#[test]
fn test_find_all_breaks_timestamp_ties_by_id() -> Result<()> {
    let storage = TransactionStorage::new();

    storage.save(transaction("b", content("acc-1", "1", None)?, 0)?)?;
    storage.save(transaction("a", content("acc-1", "2", None)?, 0)?)?;

    let ids: Vec<String> = storage.find_all(0, 10).into_iter().map(|record| record.id).collect();
    assert_eq!(ids, vec!["a", "b"]);

    Ok(())
}

#[test]
fn test_find_all_with_huge_page_index_is_empty() -> Result<()> {
    let storage = TransactionStorage::new();
    storage.save(transaction("tx-1", content("acc-1", "1", None)?, 0)?)?;

    assert!(storage.find_all(usize::MAX, 10).is_empty());

    Ok(())
}

#[test]
fn test_concurrent_identical_saves_admit_exactly_one() -> Result<()> {
    let storage = Arc::new(TransactionStorage::new());
    let input = content("acc-1", "500", Some("Race"))?;

    let handles: Vec<_> = (0..32)
        .map(|index| {
            let storage = storage.clone();
            let record = transaction(&format!("tx-{index}"), input.clone(), index);

            thread::spawn(move || record.map(|record| storage.save(record).is_ok()))
        })
        .collect();

    let mut successes = 0;

    for handle in handles {
        if handle.join().map_err(|_| anyhow!("writer thread panicked"))?? {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(storage.count(), 1);
    assert!(storage.exists(&input));

    Ok(())
}

#[test]
fn test_concurrent_saves_and_deletes_keep_index_in_sync() -> Result<()> {
    let storage = Arc::new(TransactionStorage::new());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let storage = storage.clone();

            thread::spawn(move || -> Result<()> {
                for round in 0..200 {
                    let id = format!("tx-{worker}-{round}");
                    let input = content(&format!("acc-{worker}"), &round.to_string(), None)?;

                    storage.save(transaction(&id, input.clone(), round)?)?;

                    if round % 2 == 0 {
                        storage.delete(&id);
                        if storage.exists(&input) {
                            return Err(anyhow!("fingerprint survived delete of {id}"));
                        }
                    }
                }

                Ok(())
            })
        })
        .collect();

    for handle in handles {
        handle.join().map_err(|_| anyhow!("worker thread panicked"))??;
    }

    assert_eq!(storage.count(), 8 * 100);

    let all = storage.find_all(0, usize::MAX);
    let unique: HashSet<_> = all.iter().map(|record| record.fingerprint()).collect();

    assert_eq!(unique.len(), all.len());
    assert_eq!(storage.fingerprint_count(), all.len());

    for record in &all {
        let input = TransactionInput::new(record.account_id.clone(), record.amount, record.transaction_type, record.description.as_deref());
        assert!(storage.exists(&input));
    }

    Ok(())
}

#[test]
fn test_concurrent_updates_of_one_record_leave_a_single_fingerprint() -> Result<()> {
    let storage = Arc::new(TransactionStorage::new());
    let original = storage.save(transaction("tx-1", content("acc-1", "0", None)?, 0)?)?;

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let storage = storage.clone();
            let original = original.clone();

            thread::spawn(move || -> Result<()> {
                for round in 0..100 {
                    let input = content("acc-1", &((worker * 1000) + round + 1).to_string(), None)?;
                    storage.replace(original.with_content(input))?;
                }

                Ok(())
            })
        })
        .collect();

    for handle in handles {
        handle.join().map_err(|_| anyhow!("updater thread panicked"))??;
    }

    let current = storage.find_by_id("tx-1").ok_or_else(|| anyhow!("Transaction vanished"))?;
    let current_input = TransactionInput::new(current.account_id.clone(), current.amount, current.transaction_type, None);

    assert!(storage.exists(&current_input));
    assert!(!storage.exists(&content("acc-1", "0", None)?));
    assert_eq!(storage.count(), 1);
    assert_eq!(storage.fingerprint_count(), 1);

    Ok(())
}
