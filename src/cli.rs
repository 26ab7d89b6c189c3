use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::model::ReceiptType;

#[derive(Parser)]
#[command(
    name = "receipt-view",
    version,
    about = "Render, issue and verify survey completion receipts"
)]
pub struct Cli {
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: Format,

    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Inputs and display overrides shared by `view` and `page`.
#[derive(clap::Args, Clone)]
pub struct ViewArgs {
    /// Receipt payload encoded into the QR code
    #[arg(long)]
    pub receipt: String,

    /// Receipt timestamp (RFC 3339, RFC 2822, or YYYY-MM-DD[ HH:MM[:SS]])
    #[arg(long)]
    pub keydate: String,

    /// Treat this time as "now" instead of the system clock
    #[arg(long)]
    pub now: Option<String>,

    /// Start in 24-hour mode
    #[arg(long)]
    pub hour24: bool,

    /// Offset to display times in ("local", "UTC", "+HH:MM")
    #[arg(long)]
    pub utc_offset: Option<String>,

    /// Leave out the About block
    #[arg(long)]
    pub no_footer: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show a receipt in the terminal
    View {
        #[command(flatten)]
        args: ViewArgs,

        /// Toggle between 12- and 24-hour display this many times
        #[arg(long, default_value = "0")]
        toggle: usize,
    },

    /// Write a self-contained HTML receipt page
    Page {
        #[command(flatten)]
        args: ViewArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Issue receipts and write their verification tables
    Generate {
        #[arg(long, value_enum, default_value = "hour")]
        kind: KindArg,

        /// Number of days of hourly receipts
        #[arg(long, default_value = "1")]
        days: u32,

        /// First hour to issue receipts for (default: now)
        #[arg(long)]
        start: Option<String>,

        /// Zipcode to issue a receipt for (repeatable)
        #[arg(long)]
        zipcode: Vec<String>,

        /// Output directory (default: tables.dir from config)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Seed the random generator for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Look up the hour or zipcode a receipt was issued for
    Verify {
        receipt: String,

        /// Verification table (default: <tables.dir>/verification.json)
        #[arg(long)]
        table: Option<PathBuf>,
    },

    /// Print the JSON schema of .receipt-view.toml
    Schema,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Hour,
    Zipcode,
}

impl KindArg {
    pub fn to_receipt_type(self) -> ReceiptType {
        match self {
            KindArg::Hour => ReceiptType::Hour,
            KindArg::Zipcode => ReceiptType::Zipcode,
        }
    }
}
