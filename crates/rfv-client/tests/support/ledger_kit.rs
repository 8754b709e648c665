#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use rfv_client::rfv::types::Transaction;
use tempfile::{Builder, TempDir};

pub const LEDGER_HEADER: &str = "customer_id,purchase_date,purchase_code,amount";

pub fn temp_dir_in_tmp(prefix: &str) -> std::io::Result<TempDir> {
    Builder::new().prefix(prefix).tempdir_in("/tmp")
}

pub fn write_fixture(dir: &Path, name: &str, body: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, body)?;
    Ok(path)
}

pub fn scenario_csv() -> String {
    format!(
        "{LEDGER_HEADER}\nC1,2024-01-01,P1,100.00\nC1,2024-01-10,P2,50.00\nC2,2024-01-10,P3,200.00\n"
    )
}

pub fn transaction(customer_id: &str, purchase_date: NaiveDate, amount: f64) -> Transaction {
    Transaction {
        customer_id: customer_id.to_string(),
        purchase_date,
        purchase_code: format!("{customer_id}-{purchase_date}"),
        amount,
    }
}

/// Deterministic pseudo-random ledger: `customers` ids, each with a varying
/// number of purchases spread over roughly one year.
pub fn synthetic_ledger(seed: u64, customers: usize) -> Vec<Transaction> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN);
    let mut state = seed.max(1);
    let mut next = move |bound: u64| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state % bound
    };

    let mut rows = Vec::new();
    for index in 0..customers {
        let id = format!("CUST{index:04}");
        let purchases = 1 + next(6);
        for _ in 0..purchases {
            let date = start
                .checked_add_days(Days::new(next(365)))
                .unwrap_or(start);
            let cents = next(50_000) as f64;
            rows.push(transaction(&id, date, cents / 100.0));
        }
    }
    rows
}
