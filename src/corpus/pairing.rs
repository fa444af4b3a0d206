//! Pairing combiner: joins a sentence from one topic list with a sampled
//! sentence from another.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

use super::banks;
use super::expander::{lowercase_first, Source};
use super::features::{alternation, compile, menu_items};

/// Topic pairs offered to the pool builder, in order.
pub const PAIRINGS: &[(Source, Source)] = &[
    (Source::Service, Source::Food),
    (Source::Staff, Source::Food),
    (Source::Cleanliness, Source::Food),
    (Source::Service, Source::Accuracy),
    (Source::Staff, Source::Accuracy),
    (Source::Atmosphere, Source::Food),
    (Source::Value, Source::Food),
    (Source::Pickup, Source::Food),
    (Source::Service, Source::Staff),
    (Source::Cleanliness, Source::Atmosphere),
    (Source::Service, Source::Value),
    (Source::Pickup, Source::Accuracy),
    (Source::Short, Source::Food),
    (Source::Short, Source::Staff),
    (Source::Short, Source::Service),
    (Source::Cleanliness, Source::Staff),
    (Source::Atmosphere, Source::Staff),
    (Source::Value, Source::Accuracy),
    (Source::Pickup, Source::Staff),
    (Source::Short, Source::Accuracy),
    (Source::Short, Source::Value),
    (Source::Food, Source::Staff),
    (Source::Food, Source::Cleanliness),
    (Source::Accuracy, Source::Food),
];

/// Samples taken from the second list per first-list entry.
const SAMPLES: usize = 6;
const MIN_STRIDE: usize = 3;
const INDEX_STEP: usize = 7;

static SERVICE_WORDS: Lazy<Regex> = Lazy::new(|| {
    compile(r"\b(?:service|line|drive-thru|pickup|wait|curbside|fast|quick|quickly|turnaround|visit|stop|rush)\b")
});

static FOOD_WORDS: Lazy<Regex> = Lazy::new(|| {
    let mut words = menu_items();
    words.extend_from_slice(&["food", "meal", "sides", "combo", "sauces"]);
    compile(&format!(r"\b(?:{})\b", alternation(&words)))
});

static PICKUP_ONLY: Lazy<Regex> =
    Lazy::new(|| compile(r"\b(?:pickup|curbside|drive-thru|mobile|on the way home|window)\b"));

static DINE_IN_ONLY: Lazy<Regex> = Lazy::new(|| {
    compile(r"\b(?:dining room|dining area|dine-in|lobby|tables|chairs|restrooms|music|lighting|sat down)\b")
});

static NAMED_START: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"^(?:{})\b", alternation(banks::NAMED_PEOPLE))));

/// What the combiner needs to know about one source sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Traits {
    pub service_only: bool,
    pub pickup_only: bool,
    pub dine_in_only: bool,
}

impl Traits {
    pub fn of(text: &str) -> Self {
        let lower = text.to_lowercase();
        Self {
            service_only: SERVICE_WORDS.is_match(&lower) && !FOOD_WORDS.is_match(&lower),
            pickup_only: PICKUP_ONLY.is_match(&lower),
            dine_in_only: DINE_IN_ONLY.is_match(&lower),
        }
    }
}

/// Two service-only sentences never pair, nor does a pickup-only sentence
/// with a dine-in-only one.
pub fn compatible(a: Traits, b: Traits) -> bool {
    if a.service_only && b.service_only {
        return false;
    }
    !((a.pickup_only && b.dine_in_only) || (a.dine_in_only && b.pickup_only))
}

/// Joins two sentences. With probability `comma_probability` the result is
/// `"<first without terminal>, and <second lowered>"`, unless the second
/// sentence opens with "I " or a name.
pub fn join<R: Rng + ?Sized>(first: &str, second: &str, rng: &mut R, comma_probability: f64) -> String {
    let keeps_case = second.starts_with("I ") || NAMED_START.is_match(&second.to_lowercase());
    if rng.gen_bool(comma_probability.clamp(0.0, 1.0)) && !keeps_case {
        let head = first.trim_end_matches(['.', '!', '?']);
        format!("{head}, and {}", lowercase_first(second))
    } else {
        format!("{first} {second}")
    }
}

/// Indices into a second list of length `len` sampled for first-list entry `i`.
pub fn sample_indices(i: usize, len: usize) -> impl Iterator<Item = usize> {
    let stride = MIN_STRIDE.max(len / SAMPLES);
    (0..len)
        .step_by(stride)
        .map(move |j| (i.wrapping_mul(INDEX_STEP).wrapping_add(j)) % len)
}

/// Pairs `first` with `second`, producing at most `limit` joined sentences.
pub fn combine<R: Rng + ?Sized>(
    first: &[String],
    second: &[String],
    rng: &mut R,
    comma_probability: f64,
    limit: usize,
) -> Vec<String> {
    let mut out = Vec::new();
    if second.is_empty() || limit == 0 {
        return out;
    }
    let second_traits: Vec<Traits> = second.iter().map(|s| Traits::of(s)).collect();
    for (i, a) in first.iter().enumerate() {
        let a_traits = Traits::of(a);
        for j in sample_indices(i, second.len()) {
            if !compatible(a_traits, second_traits[j]) {
                continue;
            }
            out.push(join(a, &second[j], rng, comma_probability));
            if out.len() >= limit {
                return out;
            }
        }
    }
    out
}
