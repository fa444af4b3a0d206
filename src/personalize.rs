//! Light, optional variation applied to a picked sentence before it is used.
//!
//! Each transform runs at most once, behind its own probability, and is
//! skipped when the sentence already carries its effect.

use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::PersonalizeConfig;
use crate::corpus::banks;
use crate::corpus::expander::{ends_with_terminal, lowercase_first};
use crate::corpus::Tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    DineIn,
    Pickup,
    DriveThru,
    #[default]
    Unknown,
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim().to_lowercase().replace('_', "-").as_str() {
            "dine-in" | "dinein" => Ok(OrderType::DineIn),
            "pickup" | "carryout" => Ok(OrderType::Pickup),
            "drive-thru" | "drivethru" => Ok(OrderType::DriveThru),
            "unknown" => Ok(OrderType::Unknown),
            other => Err(format!("unknown order type: {other}")),
        }
    }
}

impl OrderType {
    fn clauses(self) -> &'static [&'static str] {
        match self {
            OrderType::DineIn => banks::DINE_IN_CLAUSES,
            OrderType::Pickup => banks::PICKUP_CLAUSES,
            OrderType::DriveThru => banks::DRIVE_THRU_CLAUSES,
            OrderType::Unknown => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizeContext {
    pub tone: Tone,
    pub order_type: OrderType,
}

impl PersonalizeContext {
    pub fn new(tone: Tone, order_type: OrderType) -> Self {
        Self { tone, order_type }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transform {
    SituationalClause,
    TimeClause,
    Interjection,
    CasualCasing,
    Typo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Personalized {
    pub text: String,
    pub applied: Vec<Transform>,
}

#[derive(Debug, Clone, Default)]
pub struct Personalizer {
    config: PersonalizeConfig,
}

impl Personalizer {
    pub fn new(config: PersonalizeConfig) -> Self {
        Self { config }
    }

    pub fn personalize(&self, sentence: &str, context: &PersonalizeContext) -> String {
        self.personalize_with(sentence, context, &mut rand::thread_rng()).text
    }

    pub fn personalize_with<R: Rng + ?Sized>(
        &self,
        sentence: &str,
        context: &PersonalizeContext,
        rng: &mut R,
    ) -> Personalized {
        let mut text = sentence.trim().to_string();
        let mut applied = Vec::new();

        if roll(rng, self.config.situational_probability) {
            if let Some(next) = situational_clause(&text, context.order_type, rng) {
                text = next;
                applied.push(Transform::SituationalClause);
            }
        }
        if roll(rng, self.config.time_probability) {
            if let Some(next) = time_clause(&text, context.tone, rng) {
                text = next;
                applied.push(Transform::TimeClause);
            }
        }
        if roll(rng, self.config.interjection_probability) {
            if let Some(next) = interjection(&text, rng) {
                text = next;
                applied.push(Transform::Interjection);
            }
        }
        if roll(rng, self.config.casual_casing_probability) {
            if let Some(next) = casual_casing(&text) {
                text = next;
                applied.push(Transform::CasualCasing);
            }
        }
        if roll(rng, self.config.typo_probability) {
            if let Some(next) = typo(&text, rng) {
                text = next;
                applied.push(Transform::Typo);
            }
        }

        Personalized { text, applied }
    }
}

fn roll<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    probability > 0.0 && rng.gen_bool(probability.min(1.0))
}

fn contains_any(text: &str, phrases: &[&str]) -> bool {
    let lower = text.to_lowercase();
    phrases.iter().any(|p| lower.contains(&p.to_lowercase()))
}

fn append(text: &str, clause: &str) -> String {
    if ends_with_terminal(text) {
        format!("{text} {clause}")
    } else {
        format!("{text}. {clause}")
    }
}

fn situational_clause<R: Rng + ?Sized>(text: &str, order_type: OrderType, rng: &mut R) -> Option<String> {
    let all: Vec<&str> = [banks::DINE_IN_CLAUSES, banks::PICKUP_CLAUSES, banks::DRIVE_THRU_CLAUSES].concat();
    if contains_any(text, &all) {
        return None;
    }
    let clause = order_type.clauses().choose(rng)?;
    Some(append(text, clause))
}

fn time_clause<R: Rng + ?Sized>(text: &str, tone: Tone, rng: &mut R) -> Option<String> {
    let mut present: Vec<&str> = [
        banks::MORNING_CLAUSES,
        banks::AFTERNOON_CLAUSES,
        banks::EVENING_CLAUSES,
        banks::NIGHT_CLAUSES,
        banks::MORNING_TIMES,
        banks::AFTERNOON_TIMES,
        banks::EVENING_TIMES,
        banks::NIGHT_TIMES,
    ]
    .concat();
    present.extend_from_slice(&["morning", "lunch", "dinner", "late-night", "tonight"]);
    if contains_any(text, &present) {
        return None;
    }
    let clause = banks::time_clauses(tone).choose(rng)?;
    Some(append(text, clause))
}

fn interjection<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Option<String> {
    if contains_any(text, banks::INTERJECTIONS) {
        return None;
    }
    let word = banks::INTERJECTIONS.choose(rng)?;
    Some(append(text, word))
}

/// Drops the terminal punctuation and lowers the first letter.
fn casual_casing(text: &str) -> Option<String> {
    let starts_upper = text.chars().next().is_some_and(char::is_uppercase);
    // A leading "I " stays capitalized
    if !ends_with_terminal(text) || !starts_upper || text.starts_with("I ") {
        return None;
    }
    Some(lowercase_first(text.trim_end_matches(['.', '!', '?'])))
}

/// De-apostrophizes a contraction if one is present, otherwise swaps two
/// adjacent interior letters of one longer word.
fn typo<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Option<String> {
    let present: Vec<&str> = banks::CONTRACTIONS.iter().copied().filter(|c| text.contains(c)).collect();
    if let Some(contraction) = present.choose(rng) {
        return Some(text.replacen(contraction, &contraction.replace('\'', ""), 1));
    }

    let words: Vec<&str> = text.split(' ').collect();
    let eligible: Vec<usize> = words
        .iter()
        .enumerate()
        .filter(|(_, w)| w.len() >= 4 && w.chars().all(|c| c.is_ascii_lowercase()))
        .map(|(i, _)| i)
        .collect();
    let &index = eligible.choose(rng)?;
    let mut letters: Vec<char> = words[index].chars().collect();
    let swaps: Vec<usize> = (1..letters.len() - 2).filter(|&i| letters[i] != letters[i + 1]).collect();
    let &at = swaps.choose(rng)?;
    letters.swap(at, at + 1);

    let swapped: String = letters.into_iter().collect();
    let mut out: Vec<&str> = words.clone();
    out[index] = &swapped;
    Some(out.join(" "))
}
