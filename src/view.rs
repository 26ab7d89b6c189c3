//! The receipt view: QR code, age indicator, and the two displayed times.

use anyhow::Result;
use schemars::JsonSchema;
use serde::Deserialize;
use time::{OffsetDateTime, UtcOffset};

use crate::age::bucket_for;
use crate::date_utils::{format_display, parse_timestamp};
use crate::footer;
use crate::host::{self, Host};
use crate::model::DisplayState;
use crate::qr::{QrRenderer, QrSize};

/// Source of "now".
pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Which "now" a toggle re-formats.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NowPolicy {
    /// Keep the time captured when the view was initialized.
    #[default]
    Captured,
    /// Read the clock again on every toggle.
    Refresh,
}

#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub hour12: bool,
    pub offset: UtcOffset,
    pub qr_size: QrSize,
    pub show_footer: bool,
    pub now_policy: NowPolicy,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            hour12: true,
            offset: UtcOffset::UTC,
            qr_size: QrSize::default(),
            show_footer: true,
            now_policy: NowPolicy::Captured,
        }
    }
}

/// Derive everything the view displays from its inputs.
pub fn compute_display_state(
    receipt_time: Option<OffsetDateTime>,
    now: OffsetDateTime,
    hour12: bool,
    offset: UtcOffset,
) -> DisplayState {
    DisplayState {
        age_bucket: bucket_for(receipt_time, now),
        receipt_time: format_display(receipt_time, offset, hour12),
        now_time: format_display(Some(now), offset, hour12),
        hour12,
    }
}

fn write_times<H: Host + ?Sized>(host: &mut H, state: &DisplayState) -> Result<()> {
    host.write_text(host::KEYDATE, &state.receipt_time)?;
    host.write_text(host::NOW, &state.now_time)?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ReceiptView {
    receipt: String,
    receipt_time: Option<OffsetDateTime>,
    now: OffsetDateTime,
    options: ViewOptions,
    state: DisplayState,
}

impl ReceiptView {
    /// Read the receipt and its timestamp from `host` and render the view
    /// into it. Stops at the first host error.
    pub fn initialize<H, Q, C>(
        host: &mut H,
        qr: &mut Q,
        clock: &C,
        options: ViewOptions,
    ) -> Result<Self>
    where
        H: Host + ?Sized,
        Q: QrRenderer + ?Sized,
        C: Clock + ?Sized,
    {
        let now = clock.now();
        let receipt = host.read_text(host::RECEIPT)?;
        let keydate = host.read_text(host::KEYDATE)?;
        let receipt_time = parse_timestamp(&keydate, options.offset);
        if receipt_time.is_none() {
            log::warn!("cannot parse receipt timestamp {:?}", keydate.trim());
        }

        let image = qr.make_code(&receipt, options.qr_size)?;
        host.append_node(host::QRCODE, &image)?;

        let state = compute_display_state(receipt_time, now, options.hour12, options.offset);
        host.set_class(host::SQUARE, state.age_bucket.css_class())?;

        if options.show_footer {
            host.append_node(host::JSFOOTER, &footer::about_block())?;
        }

        write_times(host, &state)?;
        log::debug!(
            "receipt view initialized: bucket={} hour12={}",
            state.age_bucket,
            state.hour12
        );

        Ok(Self {
            receipt,
            receipt_time,
            now,
            options,
            state,
        })
    }

    /// Flip 12/24-hour display and rewrite both times.
    ///
    /// The age indicator keeps the bucket computed at initialization.
    pub fn toggle_time_style<H, C>(&mut self, host: &mut H, clock: &C) -> Result<()>
    where
        H: Host + ?Sized,
        C: Clock + ?Sized,
    {
        if self.options.now_policy == NowPolicy::Refresh {
            self.now = clock.now();
        }
        let mut state = compute_display_state(
            self.receipt_time,
            self.now,
            !self.state.hour12,
            self.options.offset,
        );
        state.age_bucket = self.state.age_bucket;
        write_times(host, &state)?;
        log::debug!("time style toggled: hour12={}", state.hour12);
        self.state = state;
        Ok(())
    }

    /// What a toggle would display, without touching any host.
    pub fn alternate_state(&self) -> DisplayState {
        let mut state = compute_display_state(
            self.receipt_time,
            self.now,
            !self.state.hour12,
            self.options.offset,
        );
        state.age_bucket = self.state.age_bucket;
        state
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn receipt(&self) -> &str {
        &self.receipt
    }

    pub fn receipt_time(&self) -> Option<OffsetDateTime> {
        self.receipt_time
    }

    pub fn now(&self) -> OffsetDateTime {
        self.now
    }
}
