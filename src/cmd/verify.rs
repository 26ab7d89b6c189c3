use std::path::PathBuf;

use anyhow::Result;

use crate::cli::Format;
use crate::config::Config;
use crate::model::VerifyResult;
use crate::output::print_verify;
use crate::verification::{verify_receipt, VerificationTable};

/// Look up `receipt` and print the result. Returns whether it was valid.
pub fn cmd_verify(
    config: &Config,
    format: &Format,
    receipt: &str,
    table_path: Option<PathBuf>,
) -> Result<bool> {
    let path = match table_path {
        Some(p) => p,
        None => config.tables_dir()?.join("verification.json"),
    };
    let table = VerificationTable::load(&path)?;
    log::debug!(
        "verifying against {} ({} entries)",
        path.display(),
        table.len()
    );

    let value = verify_receipt(receipt, &table).map(str::to_string);
    let valid = value.is_some();
    let result = VerifyResult {
        receipt: receipt.trim().to_string(),
        valid,
        receipt_type: table.receipt_type(),
        value,
    };

    print_verify(&result, format)?;
    Ok(valid)
}
