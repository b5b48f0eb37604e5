//! # edi-orders
//!
//! EDIFACT purchase-order (ORDERS) parser.
//!
//! This crate extracts a structured [`Order`] record from the raw text of an
//! EDIFACT purchase order: header references and dates, the buyer and
//! delivery parties, free-text comments, the order total and the line items.
//! Extraction works by pattern lookup over the segment text rather than by a
//! full interchange grammar, so missing segments degrade to absent fields.

pub mod address;
pub mod document;
pub mod line_item;
pub mod patterns;
pub mod source;
pub mod syntax;

pub use address::{parse_address, Address, Party};
pub use document::{parse_order, Comment, Contact, Order, OrderParser};
pub use line_item::{LineItem, LineItemParser, Tax};
pub use source::{decode_lossy, load_document};
pub use syntax::Segment;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when extracting an order
#[derive(Error, Debug)]
pub enum Error {
    /// No `LIN` block terminated by `UNS+S` was found
    #[error("Line items not found: no LIN block terminated by UNS+S")]
    LineItemsNotFound,

    /// A `DTM` payload is not a valid `YYYYMMDD` calendar date
    #[error("Invalid date '{value}': {reason}")]
    DateFormat { value: String, reason: String },

    /// A party fragment has fewer than the seven address fields
    #[error("Invalid address '{fragment}': expected at least 7 fields, found {found}")]
    AddressFormat { fragment: String, found: usize },

    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Build a date format error for the given payload.
    pub fn date_format(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DateFormat {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Build an address format error for the given fragment.
    pub fn address_format(fragment: impl Into<String>, found: usize) -> Self {
        Self::AddressFormat {
            fragment: fragment.into(),
            found,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
