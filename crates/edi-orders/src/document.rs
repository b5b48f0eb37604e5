//! Purchase-order document extraction
//!
//! [`OrderParser`] exposes every header field of an ORDERS message as an
//! independent lookup over the immutable document text. No lookup depends on
//! another one, so fields can be read in any order, any number of times.
//! [`OrderParser::parse`] evaluates all of them into an [`Order`].

use crate::address::{parse_address, Party};
use crate::line_item::{LineItem, LineItemParser};
use crate::patterns::{self, all_pairs, first_value, group};
use crate::syntax::{split_segments, Segment};
use crate::{Error, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Format of `DTM` date payloads
const DATE_FORMAT: &str = "%Y%m%d";

/// Free-text comment from an `FTX` segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Text subject qualifier (`AAI`, `DEL`, `ZZZ`, `INV`)
    #[serde(rename = "type")]
    pub qualifier: String,
    pub text: String,
}

impl From<(String, String)> for Comment {
    fn from((qualifier, text): (String, String)) -> Self {
        Self { qualifier, text }
    }
}

/// Raw content of a `NAD` segment together with its party qualifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Party qualifier (`BY`, `DP`, `SU`, `IV`)
    pub role: String,
    pub content: String,
}

impl From<(String, String)> for Contact {
    fn from((role, content): (String, String)) -> Self {
        Self { role, content }
    }
}

/// Structured purchase order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_ref: Option<String>,
    pub transaction_date: Option<NaiveDate>,
    pub document_id: Option<String>,
    pub document_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub last_delivery_date: Option<NaiveDate>,
    pub customer_ean: Option<String>,
    pub customer: Option<Party>,
    pub shipping: Option<Party>,
    pub contacts_and_addresses: Vec<Contact>,
    pub order_currency: Option<String>,
    pub comments: Vec<Comment>,
    pub total: Option<String>,
    pub line_items: Vec<LineItem>,
}

impl Order {
    /// The order as a field-name to value mapping
    pub fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Field extractor over the full text of one ORDERS document
#[derive(Debug, Clone)]
pub struct OrderParser<'a> {
    content: &'a str,
    segments: Vec<Segment<'a>>,
}

impl<'a> OrderParser<'a> {
    /// Create an extractor over document text
    pub fn new(content: &'a str) -> Self {
        let segments = split_segments(content);
        debug!(segments = segments.len(), "Loaded order document");
        Self { content, segments }
    }

    /// The raw document text
    pub fn content(&self) -> &'a str {
        self.content
    }

    /// All segments in document order
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Segments carrying the given tag, in document order
    pub fn segments_with_tag<'s>(&'s self, tag: &'s str) -> impl Iterator<Item = Segment<'a>> + 's {
        self.segments.iter().copied().filter(move |segment| segment.is(tag))
    }

    /// Purchase order number (`BGM+220`)
    pub fn order_ref(&self) -> Option<String> {
        first_value(&patterns::ORDER_REF, self.content)
    }

    /// Message reference number (`UNH`)
    pub fn document_id(&self) -> Option<String> {
        first_value(&patterns::DOCUMENT_ID, self.content)
    }

    /// `DTM+4`
    pub fn transaction_date(&self) -> Result<Option<NaiveDate>> {
        self.date(&patterns::TRANSACTION_DATE)
    }

    /// `DTM+137`
    pub fn document_date(&self) -> Result<Option<NaiveDate>> {
        self.date(&patterns::DOCUMENT_DATE)
    }

    /// `DTM+2`
    pub fn delivery_date(&self) -> Result<Option<NaiveDate>> {
        self.date(&patterns::DELIVERY_DATE)
    }

    /// `DTM+63`
    pub fn last_delivery_date(&self) -> Result<Option<NaiveDate>> {
        self.date(&patterns::LAST_DELIVERY_DATE)
    }

    /// Buyer location number (`NAD+BY`)
    pub fn customer_ean(&self) -> Option<String> {
        first_value(&patterns::CUSTOMER_EAN, self.content)
    }

    /// Buyer party with its decomposed address
    pub fn customer(&self) -> Result<Option<Party>> {
        self.party(&patterns::CUSTOMER)
    }

    /// Delivery party with its decomposed address
    pub fn shipping(&self) -> Result<Option<Party>> {
        self.party(&patterns::SHIPPING)
    }

    /// Every `NAD` segment for the buyer, delivery, supplier and invoicee parties
    pub fn contacts_and_addresses(&self) -> Vec<Contact> {
        all_pairs(&patterns::CONTACTS, self.content)
            .into_iter()
            .map(Contact::from)
            .collect()
    }

    /// Currency code (`CUX+2`)
    pub fn order_currency(&self) -> Option<String> {
        first_value(&patterns::ORDER_CURRENCY, self.content)
    }

    /// Free-text comments anywhere in the document
    pub fn comments(&self) -> Vec<Comment> {
        all_pairs(&patterns::COMMENTS, self.content)
            .into_iter()
            .map(Comment::from)
            .collect()
    }

    /// Order total (`MOA+86`)
    pub fn total(&self) -> Option<String> {
        first_value(&patterns::TOTAL, self.content)
    }

    /// Text slices of the individual line items, in document order.
    ///
    /// Fails with [`Error::LineItemsNotFound`] when there is no `LIN` block
    /// closed by the `UNS+S` summary marker.
    pub fn line_item_slices(&self) -> Result<Vec<&'a str>> {
        let Some(block) = patterns::LINE_ITEMS_BLOCK
            .captures(self.content)
            .and_then(|caps| caps.get(1))
        else {
            warn!("No line item block found");
            return Err(Error::LineItemsNotFound);
        };

        // Each slice runs from just after its `LIN+` to the terminator of the
        // segment preceding the next LIN segment.
        let block = block.as_str();
        let starts: Vec<_> = patterns::LINE_ITEM_START.find_iter(block).collect();
        let slices: Vec<&'a str> = starts
            .iter()
            .enumerate()
            .map(|(index, start)| {
                let end = starts
                    .get(index + 1)
                    .map_or(block.len(), |next| next.start() + 1);
                &block[start.end()..end]
            })
            .collect();
        debug!(items = slices.len(), "Located line item block");
        Ok(slices)
    }

    /// Decode every line item
    pub fn line_items(&self) -> Result<Vec<LineItem>> {
        Ok(self
            .line_item_slices()?
            .into_iter()
            .map(|slice| LineItemParser::new(slice).parse())
            .collect())
    }

    /// Evaluate every field into an [`Order`]
    pub fn parse(&self) -> Result<Order> {
        let order = Order {
            order_ref: self.order_ref(),
            transaction_date: self.transaction_date()?,
            document_id: self.document_id(),
            document_date: self.document_date()?,
            delivery_date: self.delivery_date()?,
            last_delivery_date: self.last_delivery_date()?,
            customer_ean: self.customer_ean(),
            customer: self.customer()?,
            shipping: self.shipping()?,
            contacts_and_addresses: self.contacts_and_addresses(),
            order_currency: self.order_currency(),
            comments: self.comments(),
            total: self.total(),
            line_items: self.line_items()?,
        };
        debug!(
            order_ref = ?order.order_ref,
            line_items = order.line_items.len(),
            "Parsed order"
        );
        Ok(order)
    }

    fn date(&self, pattern: &Regex) -> Result<Option<NaiveDate>> {
        first_value(pattern, self.content)
            .map(|value| parse_date(&value))
            .transpose()
    }

    fn party(&self, pattern: &Regex) -> Result<Option<Party>> {
        let Some(caps) = pattern.captures(self.content) else {
            return Ok(None);
        };
        let ean = group(&caps, 1);
        trace!(%ean, "Decomposing party address");
        let address = parse_address(&group(&caps, 2))?;
        Ok(Some(Party { ean, address }))
    }
}

/// Parse a complete ORDERS document
pub fn parse_order(content: &str) -> Result<Order> {
    OrderParser::new(content).parse()
}

/// Parse an 8-digit `YYYYMMDD` payload into a calendar date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::date_format(value, "expected 8 digits (YYYYMMDD)"));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|error| Error::date_format(value, error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER: &str = "UNH+ME000001+ORDERS:D:96A:UN:EAN008'\
BGM+220+0012345+9'\
DTM+137:20230105:102'\
DTM+4:20230104:102'\
DTM+2:20230120:102'\
DTM+63:20230125:102'\
FTX+AAI+++Handle with care'\
NAD+BY+5412345000013::9+ACME CORP+123 MAIN ST++SPRINGFIELD+IL+62701+US'\
NAD+DP+5412345000020::9+ACME DEPOT+9 DOCK RD+UNIT 4+JOLIET+IL+60431+US'\
NAD+SU+5400000000017::9'\
CUX+2:EUR:9'\
LIN+1++5412345678908:EN'\
QTY+21:12'\
PRI+AAA:19.95'\
LIN+2++5412345678915:EN'\
QTY+21:3'\
UNS+S'\
MOA+86:299.25'\
UNT+18+ME000001'";

    #[test]
    fn test_header_references() {
        let parser = OrderParser::new(ORDER);
        assert_eq!(parser.order_ref().as_deref(), Some("0012345"));
        assert_eq!(parser.document_id().as_deref(), Some("ME000001"));
        assert_eq!(parser.customer_ean().as_deref(), Some("5412345000013"));
        assert_eq!(parser.order_currency().as_deref(), Some("EUR"));
        assert_eq!(parser.total().as_deref(), Some("299.25"));
    }

    #[test]
    fn test_header_dates() {
        let parser = OrderParser::new(ORDER);
        assert_eq!(parser.document_date().unwrap(), NaiveDate::from_ymd_opt(2023, 1, 5));
        assert_eq!(parser.transaction_date().unwrap(), NaiveDate::from_ymd_opt(2023, 1, 4));
        assert_eq!(parser.delivery_date().unwrap(), NaiveDate::from_ymd_opt(2023, 1, 20));
        assert_eq!(parser.last_delivery_date().unwrap(), NaiveDate::from_ymd_opt(2023, 1, 25));
    }

    #[test]
    fn test_missing_date_is_absent() {
        let parser = OrderParser::new("BGM+220+1'DTM+137:20230105:102'");
        assert_eq!(parser.transaction_date().unwrap(), None);
    }

    #[test]
    fn test_invalid_calendar_date() {
        let parser = OrderParser::new("DTM+4:20230231:102'");
        let err = parser.transaction_date().unwrap_err();
        assert!(matches!(err, Error::DateFormat { ref value, .. } if value == "20230231"));
    }

    #[test]
    fn test_parse_date_rejects_wrong_length() {
        assert!(matches!(parse_date("202301"), Err(Error::DateFormat { .. })));
        assert!(matches!(parse_date("202301011200"), Err(Error::DateFormat { .. })));
        assert!(matches!(parse_date("20231301"), Err(Error::DateFormat { .. })));
        assert_eq!(parse_date("20240229").unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_parties() {
        let parser = OrderParser::new(ORDER);
        let customer = parser.customer().unwrap().unwrap();
        assert_eq!(customer.ean, "5412345000013");
        assert_eq!(customer.address.address_name, "ACME CORP");
        assert_eq!(customer.address.country, "US");

        let shipping = parser.shipping().unwrap().unwrap();
        assert_eq!(shipping.ean, "5412345000020");
        assert_eq!(shipping.address.address_line2, "UNIT 4");
        assert_eq!(shipping.address.city, "JOLIET");
    }

    #[test]
    fn test_party_absent() {
        let parser = OrderParser::new("NAD+SU+5400000000017::9'");
        assert_eq!(parser.customer().unwrap(), None);
        assert_eq!(parser.shipping().unwrap(), None);
    }

    #[test]
    fn test_party_with_short_address_fails() {
        let parser = OrderParser::new("NAD+DP+5412345000020::9+DEPOT+1 RD'");
        assert!(matches!(parser.shipping(), Err(Error::AddressFormat { found: 2, .. })));
    }

    #[test]
    fn test_contacts_in_order() {
        let contacts = OrderParser::new(ORDER).contacts_and_addresses();
        let roles: Vec<_> = contacts.iter().map(|c| c.role.as_str()).collect();
        assert_eq!(roles, ["BY", "DP", "SU"]);
        assert_eq!(contacts[2].content, "5400000000017::9");
    }

    #[test]
    fn test_comments() {
        let comments = OrderParser::new(ORDER).comments();
        assert_eq!(
            comments,
            vec![Comment {
                qualifier: "AAI".to_string(),
                text: "Handle with care".to_string()
            }]
        );
    }

    #[test]
    fn test_line_item_slices() {
        let slices = OrderParser::new(ORDER).line_item_slices().unwrap();
        assert_eq!(slices.len(), 2);
        assert!(slices[0].starts_with("1++5412345678908"));
        assert!(slices[1].starts_with("2++5412345678915"));
    }

    #[test]
    fn test_line_item_block_ignores_lin_inside_values() {
        let parser = OrderParser::new(
            "NAD+BY+4000000000001::9+KAUFHAUS+HAUPTSTR 1++BERLIN+BE+10115+DE'\
LIN+1++4000000000018:EN'QTY+21:2'\
LIN+2++4000000000025:EN'QTY+21:5'\
UNS+S'",
        );
        let slices = parser.line_item_slices().unwrap();
        assert_eq!(slices, ["1++4000000000018:EN'QTY+21:2'", "2++4000000000025:EN'QTY+21:5'"]);
    }

    #[test]
    fn test_comment_serializes_type_field() {
        let comment = Comment {
            qualifier: "AAI".to_string(),
            text: "Fragile".to_string(),
        };
        let value = serde_json::to_value(&comment).unwrap();
        assert_eq!(value, serde_json::json!({"type": "AAI", "text": "Fragile"}));
    }

    #[test]
    fn test_missing_summary_marker() {
        let parser = OrderParser::new("BGM+220+1'LIN+1++1:EN'QTY+21:1'UNT+4+1'");
        assert!(matches!(parser.line_items(), Err(Error::LineItemsNotFound)));
    }

    #[test]
    fn test_missing_line_items() {
        let parser = OrderParser::new("BGM+220+1'UNS+S'MOA+86:0'");
        assert!(matches!(parser.parse(), Err(Error::LineItemsNotFound)));
    }

    #[test]
    fn test_segments_with_tag() {
        let parser = OrderParser::new(ORDER);
        assert_eq!(parser.segments().len(), 19);
        assert_eq!(parser.segments_with_tag("LIN").count(), 2);
        assert_eq!(parser.segments_with_tag("DTM").count(), 4);
    }

    #[test]
    fn test_parse_full_order() {
        let order = parse_order(ORDER).unwrap();
        assert_eq!(order.order_ref.as_deref(), Some("0012345"));
        assert_eq!(order.contacts_and_addresses.len(), 3);
        assert_eq!(order.line_items.len(), 2);
        assert_eq!(order.line_items[0].qty.as_deref(), Some("12"));
        assert_eq!(order.line_items[1].line_number.as_deref(), Some("2"));
    }

    #[test]
    fn test_to_json_value_field_names() {
        let value = parse_order(ORDER).unwrap().to_json_value().unwrap();
        assert_eq!(value["order_ref"], "0012345");
        assert_eq!(value["document_date"], "2023-01-05");
        assert_eq!(value["customer"]["address"]["city"], "SPRINGFIELD");
        assert_eq!(value["line_items"][0]["ean"], "5412345678908");
        assert!(value["line_items"][0]["tax"].is_null());
    }
}
