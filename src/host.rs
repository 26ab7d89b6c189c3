//! The capabilities a receipt view needs from the page it renders into.

use anyhow::{anyhow, Result};
use std::collections::BTreeMap;

/// Element holding the opaque receipt string.
pub const RECEIPT: &str = "receipt";
/// Element holding the receipt timestamp; overwritten with its display form.
pub const KEYDATE: &str = "keydate";
/// Status indicator whose class reflects the receipt age.
pub const SQUARE: &str = "square";
/// Region the QR image is drawn into.
pub const QRCODE: &str = "qrcode";
/// Element showing the time the view was loaded.
pub const NOW: &str = "now";
/// Region receiving the About block.
pub const JSFOOTER: &str = "jsfooter";

/// Every element a receipt page is expected to expose.
pub const PAGE_ELEMENTS: &[&str] = &[RECEIPT, KEYDATE, SQUARE, QRCODE, NOW, JSFOOTER];

/// Minimal document surface. Every method fails when `id` does not exist.
pub trait Host {
    fn read_text(&self, id: &str) -> Result<String>;
    fn write_text(&mut self, id: &str, text: &str) -> Result<()>;
    fn set_class(&mut self, id: &str, class: &str) -> Result<()>;
    fn append_node(&mut self, id: &str, markup: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub text: String,
    pub class: Option<String>,
    pub children: Vec<String>,
}

/// In-memory document keyed by element id.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    elements: BTreeMap<String, Element>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host exposing all receipt page elements, seeded with the receipt
    /// payload and the raw timestamp text.
    pub fn receipt_page(receipt: &str, keydate: &str) -> Self {
        let mut host = Self::new();
        for id in PAGE_ELEMENTS {
            host.insert(id);
        }
        host.set_text_unchecked(RECEIPT, receipt);
        host.set_text_unchecked(KEYDATE, keydate);
        host
    }

    /// Add an empty element, replacing any existing one with the same id.
    pub fn insert(&mut self, id: &str) {
        self.elements.insert(id.to_string(), Element::default());
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    fn set_text_unchecked(&mut self, id: &str, text: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.text = text.to_string();
        }
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Element> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| anyhow!("element #{} not found", id))
    }
}

impl Host for MemoryHost {
    fn read_text(&self, id: &str) -> Result<String> {
        self.elements
            .get(id)
            .map(|el| el.text.clone())
            .ok_or_else(|| anyhow!("element #{} not found", id))
    }

    fn write_text(&mut self, id: &str, text: &str) -> Result<()> {
        self.get_mut(id)?.text = text.to_string();
        Ok(())
    }

    fn set_class(&mut self, id: &str, class: &str) -> Result<()> {
        self.get_mut(id)?.class = Some(class.to_string());
        Ok(())
    }

    fn append_node(&mut self, id: &str, markup: &str) -> Result<()> {
        self.get_mut(id)?.children.push(markup.to_string());
        Ok(())
    }
}
