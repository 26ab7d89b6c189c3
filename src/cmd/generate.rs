use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::cli::Format;
use crate::config::Config;
use crate::date_utils::parse_timestamp;
use crate::model::{GenerateResult, IssuedReceipt, ReceiptType};
use crate::output::print_generate;
use crate::receipt::{generate_hour_receipts, generate_zipcode_receipts, top_of_hour};
use crate::verification::{daily_subtables, generate_verification_table, write_json_atomic};

pub struct GenerateOptions {
    pub kind: ReceiptType,
    pub days: u32,
    pub start: Option<String>,
    pub zipcodes: Vec<String>,
    pub out: Option<PathBuf>,
    pub seed: Option<u64>,
}

fn resolve_start(start: Option<&str>) -> Result<OffsetDateTime> {
    match start {
        Some(text) => match parse_timestamp(text, UtcOffset::UTC) {
            Some(dt) => Ok(dt),
            None => bail!("invalid --start timestamp: {:?}", text),
        },
        None => Ok(OffsetDateTime::now_utc()),
    }
}

pub fn cmd_generate(config: &Config, format: &Format, opts: GenerateOptions) -> Result<()> {
    let out_dir = match opts.out {
        Some(dir) => dir,
        None => config.tables_dir()?,
    };
    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut files = Vec::new();
    let mut first_hour = None;
    let receipts: Vec<IssuedReceipt> = match opts.kind {
        ReceiptType::Hour => {
            if opts.days == 0 {
                bail!("--days must be at least 1");
            }
            let start = top_of_hour(resolve_start(opts.start.as_deref())?);
            first_hour = Some(start);
            generate_hour_receipts(&mut rng, start, opts.days)?
        }
        ReceiptType::Zipcode => {
            if opts.zipcodes.is_empty() {
                bail!("zipcode receipts need at least one --zipcode");
            }
            generate_zipcode_receipts(&mut rng, &opts.zipcodes)
        }
    };
    let table = generate_verification_table(&mut rng, opts.kind, &receipts);

    let receipts_path = out_dir.join("receipts.json");
    write_json_atomic(&receipts_path, &receipts)?;
    files.push(receipts_path.display().to_string());

    let table_path = out_dir.join("verification.json");
    table.save(&table_path)?;
    files.push(table_path.display().to_string());

    if let Some(first) = first_hour {
        let last = first
            .checked_add(Duration::hours(i64::from(opts.days) * 24 - 1))
            .context("receipt range runs past the last supported date")?;
        let span = (last.date() - first.date()).whole_days() + 1;
        let daily_dir = out_dir.join("daily");
        for (day, sub) in daily_subtables(&table, first.date(), span as u32)? {
            let path = daily_dir.join(format!("verification-{}.json", day));
            sub.save(&path)?;
            files.push(path.display().to_string());
        }
    }

    log::info!("wrote {} files to {}", files.len(), out_dir.display());
    let result = GenerateResult {
        receipt_type: opts.kind,
        receipts: receipts.len(),
        files,
    };
    print_generate(&result, format)
}
