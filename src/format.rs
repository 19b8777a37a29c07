//! Address formatting helpers
//!
//! Post town title casing, organisation name removal and output selector
//! parsing. All functions here are pure.

use crate::address::AddressRecord;

/// Words which stay lowercase when they stand alone in a post town
const EXCLUSION_WORDS: &[&str] = &["of", "le", "upon", "on", "the"];

/// Words inside a hyphenated post town which stay lowercase
const JOINER_WORDS: &[&str] = &["in", "de", "under", "upon", "y", "on", "over", "the", "by"];

const BONESS: &str = "bo'ness";

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// True when an ampersand sits between two word characters, e.g. `A&B`
fn contains_ampersand(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    chars.windows(3).any(|w| is_word_char(w[0]) && w[1] == '&' && is_word_char(w[2]))
}

fn capitalize_word(word: &str) -> String {
    let word = word.to_lowercase();
    if EXCLUSION_WORDS.contains(&word.as_str()) {
        return word;
    }
    if contains_ampersand(&word) {
        return word.to_uppercase();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => word,
    }
}

fn check_joins(word: String) -> String {
    if !word.contains('-') {
        return word;
    }
    word.split('-')
        .map(|piece| {
            if JOINER_WORDS.contains(&piece) {
                piece.to_lowercase()
            } else {
                capitalize_word(piece)
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn check_exceptions(word: String) -> String {
    if word.to_lowercase().contains(BONESS) {
        return "Bo'Ness".to_string();
    }
    word
}

/// Convert an upper case post town to title case
///
/// `"APPLEBY-IN-WESTMORLAND"` becomes `"Appleby-in-Westmorland"` and
/// `"WALTON ON THE NAZE"` becomes `"Walton on the Naze"`.
pub fn titleize_post_town(post_town: &str) -> String {
    post_town
        .split(' ')
        .map(capitalize_word)
        .map(check_joins)
        .map(check_exceptions)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove the organisation name from the address lines
///
/// When line 1 is just the organisation name, the remaining lines shift up
/// and line 3 is emptied. Returns a new record; the input is left alone.
pub fn remove_organisation(address: &AddressRecord) -> AddressRecord {
    let mut result = address.clone();
    let organisation = address.organisation_name();
    if organisation.is_empty() || address.line_1() != organisation {
        return result;
    }
    result.set("line_1", address.line_2());
    result.set("line_2", address.line_3());
    result.set("line_3", "");
    result
}

/// Split a comma separated selector list, e.g. `"#postcode,#postcode2"`
pub fn split_selectors(selectors: &str) -> Vec<String> {
    selectors.split(',').map(str::to_string).collect()
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod format_tests;
