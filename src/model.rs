use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display category derived from how old a receipt was when the view loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeBucket {
    /// Receipt timestamp lies after "now".
    Future,
    /// Receipt timestamp could not be parsed. Shown like `Older`.
    Unknown,
    Today,
    ThisWeek,
    Older,
}

impl AgeBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBucket::Future => "future",
            AgeBucket::Unknown => "unknown",
            AgeBucket::Today => "today",
            AgeBucket::ThisWeek => "this-week",
            AgeBucket::Older => "older",
        }
    }

    /// Class applied to the status indicator element.
    pub fn css_class(&self) -> &'static str {
        match self {
            AgeBucket::Future => "grey-square",
            AgeBucket::Today => "blue-square",
            AgeBucket::ThisWeek => "yellow-square",
            AgeBucket::Unknown | AgeBucket::Older => "red-square",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::Future | AgeBucket::Unknown => "Unknown",
            AgeBucket::Today => "Today",
            AgeBucket::ThisWeek => "This Week",
            AgeBucket::Older => "Older",
        }
    }

    /// Legend color as `(r, g, b)`; `None` for the grey indicator.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            AgeBucket::Future => None,
            AgeBucket::Today => Some((0x88, 0xCC, 0xEE)),
            AgeBucket::ThisWeek => Some((0xDD, 0xCC, 0x77)),
            AgeBucket::Unknown | AgeBucket::Older => Some((0xCC, 0x66, 0x77)),
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything the view writes back to its host, apart from the QR image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub age_bucket: AgeBucket,
    pub receipt_time: String,
    pub now_time: String,
    pub hour12: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptType {
    Hour,
    Zipcode,
}

impl ReceiptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptType::Hour => "hour",
            ReceiptType::Zipcode => "zipcode",
        }
    }

    /// Single-byte domain separator fed to the hash before anything else.
    pub fn prefix(&self) -> &'static [u8] {
        match self {
            ReceiptType::Hour => b"0",
            ReceiptType::Zipcode => b"1",
        }
    }
}

impl FromStr for ReceiptType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hour" => Ok(ReceiptType::Hour),
            "zipcode" => Ok(ReceiptType::Zipcode),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ReceiptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A receipt paired with the value it was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedReceipt {
    pub value: String,
    pub receipt: String,
}

#[derive(Debug, Serialize)]
pub struct ViewResult {
    pub receipt: String,
    pub status_class: String,
    pub state: DisplayState,
}

#[derive(Debug, Serialize)]
pub struct VerifyResult {
    pub receipt: String,
    pub valid: bool,
    pub receipt_type: ReceiptType,
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResult {
    pub receipt_type: ReceiptType,
    pub receipts: usize,
    pub files: Vec<String>,
}
