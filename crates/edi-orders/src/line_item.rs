//! Line item extraction
//!
//! A line item is the text following one `LIN+` marker up to the next one
//! (or up to the summary section for the last item). Every field is looked up
//! independently inside that slice and degrades to `None` when its segment
//! is missing.

use crate::document::Comment;
use crate::patterns::{self, first_value, group};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Tax rate and amount from an `ALC+C` / `MOA+23` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tax {
    pub rate: String,
    pub amount: String,
}

/// One ordered product entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub line_number: Option<String>,
    /// Empty string when the `LIN` segment has no item number, `None` when unmatched
    pub ean: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub qty: Option<String>,
    pub price: Option<String>,
    pub total: Option<String>,
    pub tax: Option<Tax>,
    pub comments: Option<Vec<Comment>>,
}

/// Field extractor over the text slice of a single line item
#[derive(Debug, Clone, Copy)]
pub struct LineItemParser<'a> {
    content: &'a str,
}

impl<'a> LineItemParser<'a> {
    /// Create an extractor for the slice following a `LIN+` marker
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    /// The slice this extractor works on
    pub fn content(&self) -> &'a str {
        self.content
    }

    pub fn line_number(&self) -> Option<String> {
        first_value(&patterns::LINE_NUMBER, self.content)
    }

    pub fn ean(&self) -> Option<String> {
        first_value(&patterns::LINE_EAN, self.content)
    }

    pub fn sku(&self) -> Option<String> {
        first_value(&patterns::SKU, self.content)
    }

    pub fn description(&self) -> Option<String> {
        first_value(&patterns::DESCRIPTION, self.content)
    }

    pub fn qty(&self) -> Option<String> {
        first_value(&patterns::QTY, self.content)
    }

    pub fn price(&self) -> Option<String> {
        first_value(&patterns::PRICE, self.content)
    }

    pub fn total(&self) -> Option<String> {
        first_value(&patterns::LINE_TOTAL, self.content)
    }

    /// Rate and amount are only returned together; an `ALC` without a
    /// following `MOA+23` yields `None`.
    pub fn tax(&self) -> Option<Tax> {
        patterns::TAX.captures(self.content).map(|caps| Tax {
            rate: group(&caps, 1),
            amount: group(&caps, 2),
        })
    }

    pub fn comments(&self) -> Option<Vec<Comment>> {
        let comments: Vec<Comment> = patterns::all_pairs(&patterns::LINE_COMMENTS, self.content)
            .into_iter()
            .map(Comment::from)
            .collect();
        if comments.is_empty() {
            None
        } else {
            Some(comments)
        }
    }

    /// Evaluate every field into a [`LineItem`]
    pub fn parse(&self) -> LineItem {
        let item = LineItem {
            line_number: self.line_number(),
            ean: self.ean(),
            sku: self.sku(),
            description: self.description(),
            qty: self.qty(),
            price: self.price(),
            total: self.total(),
            tax: self.tax(),
            comments: self.comments(),
        };
        trace!(line_number = ?item.line_number, "Parsed line item");
        item
    }
}
