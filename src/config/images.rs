//! # Image List Parsing
//!
//! Parses the `IMAGES` value: `alias=reference` entries joined by `;`.
//!
//! - The whole value and each entry are trimmed of surrounding whitespace
//! - A single trailing `;` is allowed (the final empty entry is dropped)
//! - An entry must contain exactly one `=`; anything else is rejected
//! - A repeated alias overwrites the earlier one

use crate::constants::{IMAGE_ALIAS_SEPARATOR, IMAGE_ENTRY_SEPARATOR};
use std::collections::BTreeMap;

/// Result of parsing an image list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedImages {
    /// Accepted alias -> reference pairs
    pub images: BTreeMap<String, String>,
    /// Entries rejected as malformed, in input order
    pub rejected: Vec<String>,
}

/// Parse a raw `IMAGES` value
pub fn parse_images(raw: &str) -> ParsedImages {
    let mut entries: Vec<&str> = raw
        .trim()
        .split(IMAGE_ENTRY_SEPARATOR)
        .map(str::trim)
        .collect();

    // Only the last entry is dropped when empty; empty entries in the middle are malformed
    if entries.last().is_some_and(|last| last.is_empty()) {
        entries.pop();
    }

    let mut parsed = ParsedImages::default();
    for entry in entries {
        match split_entry(entry) {
            Some((alias, reference)) => {
                parsed
                    .images
                    .insert(alias.to_string(), reference.to_string());
            }
            None => parsed.rejected.push(entry.to_string()),
        }
    }
    parsed
}

/// Split `alias=reference`; `None` unless there is exactly one separator
fn split_entry(entry: &str) -> Option<(&str, &str)> {
    let (alias, reference) = entry.split_once(IMAGE_ALIAS_SEPARATOR)?;
    if reference.contains(IMAGE_ALIAS_SEPARATOR) {
        return None;
    }
    Some((alias, reference))
}
