use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use time::{Date, Duration, Time};

use crate::model::{IssuedReceipt, ReceiptType};
use crate::receipt::{hex_encode, hour_value, SALT_SIZE};

/// Verification code for `receipt` under `salt`: `sha256(decimal(salt) ‖ receipt)`.
pub fn verification_code(salt: u32, receipt: &str) -> String {
    let mut sha = Sha256::new();
    sha.update(salt.to_string().as_bytes());
    sha.update(receipt.as_bytes());
    hex_encode(&sha.finalize())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub code: String,
    pub value: String,
}

/// On-disk form of a [`VerificationTable`].
#[derive(Debug, Serialize, Deserialize)]
struct TableFile {
    receipt_type: ReceiptType,
    entries: Vec<TableEntry>,
}

/// Two-way mapping between verification codes and issued values.
///
/// Hour values are canonical `YYYY-MM-DDTHH:MM:SSZ` strings, so ordering by
/// value is chronological.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationTable {
    receipt_type: ReceiptType,
    value_to_code: BTreeMap<String, String>,
    code_to_value: BTreeMap<String, String>,
}

impl VerificationTable {
    pub fn new(receipt_type: ReceiptType) -> Self {
        Self {
            receipt_type,
            value_to_code: BTreeMap::new(),
            code_to_value: BTreeMap::new(),
        }
    }

    pub fn receipt_type(&self) -> ReceiptType {
        self.receipt_type
    }

    pub fn len(&self) -> usize {
        self.code_to_value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_to_value.is_empty()
    }

    /// Map `code` to `value`, dropping any earlier pairing of either one.
    pub fn add_pair(&mut self, code: &str, value: &str) {
        if let Some(old_code) = self.value_to_code.insert(value.to_string(), code.to_string()) {
            if old_code != code {
                self.code_to_value.remove(&old_code);
            }
        }
        if let Some(old_value) = self.code_to_value.insert(code.to_string(), value.to_string()) {
            if old_value != value {
                self.value_to_code.remove(&old_value);
            }
        }
    }

    pub fn remove_pair(&mut self, code: &str, value: &str) {
        self.value_to_code.remove(value);
        self.code_to_value.remove(code);
    }

    pub fn code_for(&self, value: &str) -> Option<&str> {
        self.value_to_code.get(value).map(String::as_str)
    }

    pub fn value_for(&self, code: &str) -> Option<&str> {
        self.code_to_value.get(code).map(String::as_str)
    }

    /// All `(value, code)` pairs, sorted by value.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.value_to_code
            .iter()
            .map(|(v, c)| (v.as_str(), c.as_str()))
            .collect()
    }

    /// `(value, code)` pairs with `start <= value <= end`, sorted by value.
    pub fn pairs_between(&self, start: &str, end: &str) -> Vec<(&str, &str)> {
        if start > end {
            return Vec::new();
        }
        self.value_to_code
            .range(start.to_string()..=end.to_string())
            .map(|(v, c)| (v.as_str(), c.as_str()))
            .collect()
    }

    /// A table holding only the pairs with `start <= value <= end`.
    pub fn sub_table(&self, start: &str, end: &str) -> Self {
        let mut table = Self::new(self.receipt_type);
        for (value, code) in self.pairs_between(start, end) {
            table.add_pair(code, value);
        }
        table
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = TableFile {
            receipt_type: self.receipt_type,
            entries: self
                .pairs()
                .into_iter()
                .map(|(value, code)| TableEntry {
                    code: code.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        };
        write_json_atomic(path, &file)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read verification table: {}", path.display()))?;
        let file: TableFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse verification table: {}", path.display()))?;
        let mut table = Self::new(file.receipt_type);
        for entry in &file.entries {
            table.add_pair(&entry.code, &entry.value);
        }
        Ok(table)
    }
}

/// Write `value` as pretty JSON with atomic write (write tmp, then rename).
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("tmp");
    let data = serde_json::to_string_pretty(value)?;
    fs::write(&tmp_path, data + "\n")
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Build a table with one salted code per issued receipt.
pub fn generate_verification_table<R: Rng + ?Sized>(
    rng: &mut R,
    receipt_type: ReceiptType,
    receipts: &[IssuedReceipt],
) -> VerificationTable {
    let mut table = VerificationTable::new(receipt_type);
    for issued in receipts {
        let salt = rng.gen_range(0..SALT_SIZE);
        table.add_pair(&verification_code(salt, &issued.receipt), &issued.value);
    }
    log::debug!(
        "generated {} verification table with {} entries",
        receipt_type,
        table.len()
    );
    table
}

/// Find the value `receipt` was issued for by trying every salt.
pub fn verify_receipt<'a>(receipt: &str, table: &'a VerificationTable) -> Option<&'a str> {
    let receipt = receipt.trim();
    (0..SALT_SIZE).find_map(|salt| table.value_for(&verification_code(salt, receipt)))
}

/// Split an hour table into one sub-table per UTC day.
pub fn daily_subtables(
    table: &VerificationTable,
    first_day: Date,
    num_days: u32,
) -> Result<Vec<(Date, VerificationTable)>> {
    (0..i64::from(num_days))
        .filter_map(|k| first_day.checked_add(Duration::days(k)))
        .map(|day| -> Result<(Date, VerificationTable)> {
            let start = day.with_time(Time::MIDNIGHT).assume_utc();
            let end = day.with_time(Time::MIDNIGHT + Duration::hours(23)).assume_utc();
            let sub = table.sub_table(&hour_value(start)?, &hour_value(end)?);
            Ok((day, sub))
        })
        .collect()
}
