use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::ViewArgs;
use crate::config::Config;
use crate::host::MemoryHost;
use crate::output::html::render_page;
use crate::qr::SvgQrRenderer;
use crate::view::ReceiptView;

use super::{resolve_clock, resolve_view_options};

pub fn cmd_page(config: &Config, args: &ViewArgs, output: Option<&Path>) -> Result<()> {
    let options = resolve_view_options(config, args)?;
    let clock = resolve_clock(args, &options)?;

    let mut host = MemoryHost::receipt_page(&args.receipt, &args.keydate);
    let view = ReceiptView::initialize(&mut host, &mut SvgQrRenderer, clock.as_ref(), options)?;
    let html = render_page(&host, view.state(), &view.alternate_state())?;

    match output {
        Some(path) => {
            std::fs::write(path, html)
                .with_context(|| format!("Failed to write page: {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}
