//! Attribute translation between the client group shape and the directory's.
//!
//! Client attributes are single strings; directory attributes are string lists.
//! Going to the directory every value becomes a one-element list and the long
//! name is stored under [`LONG_NAME_ATTRIBUTE`]. The reverse direction is not
//! reconstructed: responses expose the directory's list-valued map as is.

use crate::domain::entities::{Group, ProviderGroup, LONG_NAME_ATTRIBUTE};
use std::collections::{BTreeMap, HashMap};

/// Wraps each value in a singleton list and sets the long name attribute,
/// replacing any client-supplied value under the same key.
pub fn to_provider_attributes(
    attributes: &BTreeMap<String, String>,
    long_name: &str,
) -> HashMap<String, Vec<String>> {
    let mut translated: HashMap<String, Vec<String>> = attributes
        .iter()
        .map(|(key, value)| (key.clone(), vec![value.clone()]))
        .collect();

    translated.insert(LONG_NAME_ATTRIBUTE.to_string(), vec![long_name.to_string()]);
    translated
}

/// Directory attributes are surfaced unchanged.
pub fn from_provider_attributes(
    attributes: Option<HashMap<String, Vec<String>>>,
) -> Option<HashMap<String, Vec<String>>> {
    attributes
}

/// Builds the directory representation for a create or update call
pub fn to_provider_group(group: &Group, id: Option<String>) -> ProviderGroup {
    ProviderGroup {
        id,
        name: Some(group.short_name.clone()),
        attributes: Some(to_provider_attributes(&group.attributes, &group.long_name)),
        ..Default::default()
    }
}
