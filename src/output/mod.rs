pub mod html;

use anyhow::Result;
use colored::*;

use crate::cli::Format;
use crate::model::*;

/// Colored status indicator for an age bucket.
pub fn colorize_bucket(bucket: &AgeBucket) -> ColoredString {
    let square = format!("\u{25A0} {}", bucket.label());
    match bucket.rgb() {
        Some((r, g, b)) => square.truecolor(r, g, b).bold(),
        None => square.dimmed(),
    }
}

pub fn format_view_text(result: &ViewResult, qr: &str) -> String {
    let mut out = String::new();
    out.push_str(qr);
    if !qr.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&format!("{}\n", result.receipt.bold()));
    out.push_str(&format!(
        "{:9}{}\n",
        "Status:",
        colorize_bucket(&result.state.age_bucket)
    ));
    out.push_str(&format!("{:9}{}\n", "Receipt:", result.state.receipt_time));
    out.push_str(&format!("{:9}{}\n", "Now:", result.state.now_time));
    out
}

pub fn print_view(result: &ViewResult, qr: &str, format: &Format) -> Result<()> {
    match format {
        Format::Text => print!("{}", format_view_text(result, qr)),
        Format::Json => println!("{}", serde_json::to_string_pretty(result)?),
    }
    Ok(())
}

pub fn print_verify(result: &VerifyResult, format: &Format) -> Result<()> {
    match format {
        Format::Text => match result.value {
            Some(ref value) => println!("{}", value),
            None => println!("{}", "Receipt not valid".red()),
        },
        Format::Json => println!("{}", serde_json::to_string_pretty(result)?),
    }
    Ok(())
}

pub fn print_generate(result: &GenerateResult, format: &Format) -> Result<()> {
    match format {
        Format::Text => {
            for file in &result.files {
                println!("  {}", file);
            }
            println!(
                "\n{} {} receipts, {} files written",
                result.receipts.to_string().bold(),
                result.receipt_type,
                result.files.len()
            );
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(result)?),
    }
    Ok(())
}
