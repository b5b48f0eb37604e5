//! Field patterns for purchase-order extraction.
//!
//! Each extracted field is backed by exactly one compiled pattern. Header
//! patterns are unanchored and run against the whole document; line-item
//! patterns run against a single item slice, and the line number and EAN
//! patterns are anchored to the start of that slice.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    // Header references
    pub static ref ORDER_REF: Regex = Regex::new(r"BGM\+220\+(\d+)").unwrap();
    pub static ref DOCUMENT_ID: Regex = Regex::new(r"UNH\+(.+?)\+").unwrap();

    // Header dates (DTM qualifier:YYYYMMDD)
    pub static ref TRANSACTION_DATE: Regex = Regex::new(r"DTM\+4:(\d+)").unwrap();
    pub static ref DOCUMENT_DATE: Regex = Regex::new(r"DTM\+137:(\d+)").unwrap();
    pub static ref DELIVERY_DATE: Regex = Regex::new(r"DTM\+2:(\d+)").unwrap();
    pub static ref LAST_DELIVERY_DATE: Regex = Regex::new(r"DTM\+63:(\d+)").unwrap();

    // Parties. The identifier may carry trailing components (`::9`), which
    // are skipped; the address remainder stops at the segment terminator.
    pub static ref CUSTOMER_EAN: Regex = Regex::new(r"NAD\+BY\+(\d+)").unwrap();
    pub static ref CUSTOMER: Regex = Regex::new(r"NAD\+BY\+(\d+)[^+']*\+([^']+)'").unwrap();
    pub static ref SHIPPING: Regex = Regex::new(r"NAD\+DP\+(\d+)[^+']*\+([^']+)'").unwrap();
    pub static ref CONTACTS: Regex = Regex::new(r"NAD\+(BY|DP|SU|IV)\+([^']*)").unwrap();

    pub static ref ORDER_CURRENCY: Regex = Regex::new(r"CUX\+2:([A-Z]*)").unwrap();
    pub static ref COMMENTS: Regex = Regex::new(r"FTX\+(AAI|DEL|ZZZ|INV)\++([^']*)'").unwrap();
    pub static ref TOTAL: Regex = Regex::new(r"MOA\+86:(\d+[.\d]*)").unwrap();

    // From the first LIN segment up to the UNS+S segment; may span line
    // breaks. Both ends sit on segment boundaries so tag-like text inside a
    // value (`BERLIN+`) is never taken for a segment.
    pub static ref LINE_ITEMS_BLOCK: Regex =
        Regex::new(r"(?s)(?:^|')\s*(LIN\+.*?')\s*UNS\+S").unwrap();
    // Start of each LIN segment inside the block
    pub static ref LINE_ITEM_START: Regex = Regex::new(r"(?:^|')\s*LIN\+").unwrap();

    // Line item fields
    pub static ref LINE_NUMBER: Regex = Regex::new(r"^(\d+)\+").unwrap();
    pub static ref LINE_EAN: Regex = Regex::new(r"^\d+\++(\d*)").unwrap();
    pub static ref SKU: Regex = Regex::new(r"PIA\+[^+']+\+([^:']+):").unwrap();
    pub static ref DESCRIPTION: Regex = Regex::new(r"IMD\+F\+DSC\+:+(.+?)'").unwrap();
    pub static ref QTY: Regex = Regex::new(r"QTY\+21:(\d+)").unwrap();
    pub static ref PRICE: Regex = Regex::new(r"PRI\+AAA:(\d+[.\d]*)").unwrap();
    pub static ref LINE_TOTAL: Regex = Regex::new(r"MOA\+203:(\d+[.\d]*)").unwrap();
    pub static ref TAX: Regex = Regex::new(r"(?s)ALC\+C\+(\d*).+?MOA\+23:(\d+[.\d]*)").unwrap();
    pub static ref LINE_COMMENTS: Regex = Regex::new(r"FTX\+(AAI|ZZZ)\++(.+?)'").unwrap();
}

/// First capture group of the first match, if any.
pub fn first_value(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// The first two capture groups of every match, in document order.
pub fn all_pairs(pattern: &Regex, text: &str) -> Vec<(String, String)> {
    pattern
        .captures_iter(text)
        .map(|caps| (group(&caps, 1), group(&caps, 2)))
        .collect()
}

/// Text of capture group `index`, empty when the group did not participate.
pub fn group(caps: &Captures<'_>, index: usize) -> String {
    caps.get(index)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
