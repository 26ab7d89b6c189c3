use anyhow::{anyhow, Result};
use qrcode::render::{svg, unicode};
use qrcode::QrCode;

/// Drawing size of a QR image in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrSize {
    pub width: u32,
    pub height: u32,
}

impl QrSize {
    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

impl Default for QrSize {
    fn default() -> Self {
        Self::square(300)
    }
}

/// Turns a payload into something a host region can display.
///
/// The payload must be encoded exactly as given.
pub trait QrRenderer {
    fn make_code(&mut self, payload: &str, size: QrSize) -> Result<String>;
}

fn encode(payload: &str) -> Result<QrCode> {
    QrCode::new(payload.as_bytes()).map_err(|e| anyhow!("cannot encode receipt as QR code: {}", e))
}

/// Drop the XML prolog and pin the root element to `size`. The viewBox is
/// left alone so the modules scale to fit.
fn fit_svg(svg: &str, size: QrSize) -> String {
    let body = svg.find("<svg").map_or(svg, |i| &svg[i..]);
    let Some(view_box) = body.find(" viewBox=") else {
        return body.to_string();
    };
    let (head, rest) = body.split_at(view_box);
    let head = head.find(" width=").map_or(head, |i| &head[..i]);
    format!(
        r#"{} width="{}" height="{}"{}"#,
        head, size.width, size.height, rest
    )
}

/// Renders an inline SVG of exactly the requested dimensions.
#[derive(Debug, Default)]
pub struct SvgQrRenderer;

impl QrRenderer for SvgQrRenderer {
    fn make_code(&mut self, payload: &str, size: QrSize) -> Result<String> {
        let code = encode(payload)?;
        let svg = code
            .render::<svg::Color>()
            .min_dimensions(size.width, size.height)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();
        Ok(fit_svg(&svg, size))
    }
}

/// Renders with Unicode half blocks for terminal output. Size is ignored.
#[derive(Debug, Default)]
pub struct TerminalQrRenderer;

impl QrRenderer for TerminalQrRenderer {
    fn make_code(&mut self, payload: &str, _size: QrSize) -> Result<String> {
        let code = encode(payload)?;
        Ok(code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .build())
    }
}
