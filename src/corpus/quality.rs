//! Quality gate and normalizer.
//!
//! The gate runs on every candidate before it can enter a pool:
//! 1. whitespace is collapsed,
//! 2. empty or punctuation-only text is rejected,
//! 3. a lowercase word repeated three or more times in a row is rejected,
//! 4. the malformed-phrase table is checked,
//! 5. verb agreement is fixed for known plural menu items.
//!
//! `normalize` is steps 1 and 5 only and is idempotent.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};

use super::banks;
use super::features::{alternation, compile};

/// Named malformed-phrase rules. Any match rejects the candidate.
const MALFORMED: &[(&str, &str)] = &[
    ("was-tasted", r"(?i)\bwas tasted\b"),
    ("doubled-connector", r"(?i),\s*and\b[^.!?]*,\s*and\b"),
    ("doubled-comma", r",\s*,"),
    ("doubled-period", r"\.\s*\."),
    ("lowercase-start", r"[.!?]\s+[a-z]"),
    ("even-even", r"(?i)\beven even\b"),
    ("hot-hot", r"(?i)\bhot, hot\b"),
    ("space-before-punctuation", r"\s[,.!?;:]"),
];

const REPEAT_LIMIT: usize = 3;

static MALFORMED_SET: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new(MALFORMED.iter().map(|(_, pattern)| *pattern))
        .unwrap_or_else(|e| panic!("invalid malformed-phrase table: {e}"))
});

static AGREEMENT: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    let plural = alternation(banks::PLURAL_ITEMS);
    vec![
        (
            compile(&format!(
                r"(?i)\b({plural})(;|,|,? because|,? and|,? but) it was\b"
            )),
            "${1}${2} they were",
        ),
        (compile(&format!(r"(?i)\b({plural}) was\b")), "${1} were"),
    ]
});

/// Why the gate turned a candidate away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    RepeatedWord,
    Malformed(&'static str),
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace collapse plus plural agreement. `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let mut out = collapse_whitespace(text);
    for (pattern, replacement) in AGREEMENT.iter() {
        if pattern.is_match(&out) {
            out = pattern.replace_all(&out, *replacement).into_owned();
        }
    }
    out
}

/// Runs the full gate. Returns the normalized sentence when it passes.
pub fn gate(text: &str) -> Result<String, Rejection> {
    let collapsed = collapse_whitespace(text);
    if !collapsed.chars().any(char::is_alphanumeric) {
        return Err(Rejection::Empty);
    }
    if has_repeated_word(&collapsed) {
        return Err(Rejection::RepeatedWord);
    }
    if let Some(index) = MALFORMED_SET.matches(&collapsed).iter().next() {
        return Err(Rejection::Malformed(MALFORMED[index].0));
    }
    Ok(normalize(&collapsed))
}

pub fn passes(text: &str) -> bool {
    gate(text).is_ok()
}

fn has_repeated_word(text: &str) -> bool {
    let words: Vec<&str> = text
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| ".,!?;:".contains(c)))
        .collect();
    let mut run = 1;
    for pair in words.windows(2) {
        let lowercase = pair[1].chars().any(char::is_alphabetic) && !pair[1].chars().any(char::is_uppercase);
        if pair[0] == pair[1] && lowercase {
            run += 1;
            if run >= REPEAT_LIMIT {
                return true;
            }
        } else {
            run = 1;
        }
    }
    false
}
