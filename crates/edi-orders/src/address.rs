//! Party and address decomposition

use crate::syntax::ELEMENT_SEPARATOR;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Number of positional fields an address fragment must provide
pub const ADDRESS_FIELD_COUNT: usize = 7;

/// Postal address taken from the positional fields of a `NAD` segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub address_name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub region: String,
    pub pincode: String,
    pub country: String,
}

/// A party (buyer, delivery point) identified by its EAN location number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub ean: String,
    pub address: Address,
}

/// Split a party address fragment into its named components.
///
/// The first seven `+`-separated fields are trimmed and mapped positionally;
/// any further fields are ignored.
pub fn parse_address(fragment: &str) -> Result<Address> {
    let fields: Vec<&str> = fragment.split(ELEMENT_SEPARATOR).map(str::trim).collect();
    if fields.len() < ADDRESS_FIELD_COUNT {
        return Err(Error::address_format(fragment, fields.len()));
    }

    Ok(Address {
        address_name: fields[0].to_string(),
        address_line1: fields[1].to_string(),
        address_line2: fields[2].to_string(),
        city: fields[3].to_string(),
        region: fields[4].to_string(),
        pincode: fields[5].to_string(),
        country: fields[6].to_string(),
    })
}
