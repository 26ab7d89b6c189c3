use anyhow::Result;

use crate::cli::{Format, ViewArgs};
use crate::config::Config;
use crate::host::{self, MemoryHost};
use crate::model::ViewResult;
use crate::output::print_view;
use crate::qr::TerminalQrRenderer;
use crate::view::ReceiptView;

use super::{resolve_clock, resolve_view_options};

pub fn cmd_view(config: &Config, format: &Format, args: &ViewArgs, toggles: usize) -> Result<()> {
    let options = resolve_view_options(config, args)?;
    let clock = resolve_clock(args, &options)?;

    let mut host = MemoryHost::receipt_page(&args.receipt, &args.keydate);
    let mut view = ReceiptView::initialize(&mut host, &mut TerminalQrRenderer, clock.as_ref(), options)?;
    for _ in 0..toggles {
        view.toggle_time_style(&mut host, clock.as_ref())?;
    }

    let status_class = host
        .element(host::SQUARE)
        .and_then(|el| el.class.clone())
        .unwrap_or_default();
    let qr = host
        .element(host::QRCODE)
        .map(|el| el.children.concat())
        .unwrap_or_default();

    let result = ViewResult {
        receipt: view.receipt().to_string(),
        status_class,
        state: view.state().clone(),
    };
    print_view(&result, &qr, format)
}
