use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::banks;
use super::constraints;

pub const SHORT_MAX: usize = 80;
pub const MEDIUM_MAX: usize = 120;
pub const LONG_MAX: usize = 160;

/// Length bucket used to keep output lengths mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthBand {
    Short,
    Medium,
    Long,
}

impl LengthBand {
    pub const ALL: [LengthBand; 3] = [LengthBand::Short, LengthBand::Medium, LengthBand::Long];

    /// Band for a character count, `None` when the sentence is over `max_len`.
    pub fn of(len: usize, max_len: usize) -> Option<Self> {
        if len > max_len {
            None
        } else if len <= SHORT_MAX {
            Some(LengthBand::Short)
        } else if len <= MEDIUM_MAX {
            Some(LengthBand::Medium)
        } else {
            Some(LengthBand::Long)
        }
    }

    pub fn index(self) -> usize {
        match self {
            LengthBand::Short => 0,
            LengthBand::Medium => 1,
            LengthBand::Long => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LengthBand::Short => "short",
            LengthBand::Medium => "medium",
            LengthBand::Long => "long",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Food,
    Service,
    Staff,
    Cleanliness,
    Accuracy,
    Atmosphere,
    Value,
    Brand,
    Other,
}

impl Topic {
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Food => "food",
            Topic::Service => "service",
            Topic::Staff => "staff",
            Topic::Cleanliness => "cleanliness",
            Topic::Accuracy => "accuracy",
            Topic::Atmosphere => "atmosphere",
            Topic::Value => "value",
            Topic::Brand => "brand",
            Topic::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenerClass {
    Verb,
    Noun,
    Other,
}

impl OpenerClass {
    pub fn as_str(self) -> &'static str {
        match self {
            OpenerClass::Verb => "verb",
            OpenerClass::Noun => "noun",
            OpenerClass::Other => "other",
        }
    }
}

/// How a table row recognizes a sentence.
#[derive(Debug)]
pub enum Matcher {
    /// Lowercase substring presence.
    Substring(&'static str),
    /// Regex over the whole lowercased sentence.
    Text(Regex),
    /// Anchored regex tried against every lowercased clause.
    Clause(Regex),
    /// Anchored regex tried against the first clause only.
    Leading(Regex),
}

impl Matcher {
    pub fn matches(&self, lower: &str, clauses: &[String]) -> bool {
        match self {
            Matcher::Substring(needle) => lower.contains(needle),
            Matcher::Text(re) => re.is_match(lower),
            Matcher::Clause(re) => clauses.iter().any(|c| re.is_match(c)),
            Matcher::Leading(re) => clauses.first().is_some_and(|c| re.is_match(c)),
        }
    }
}

/// One row of an ordered classification table.
#[derive(Debug)]
pub struct Rule<K> {
    pub key: K,
    pub matcher: Matcher,
}

/// Alternation of literal phrases, longest first so the regex prefers them.
pub fn alternation<S: AsRef<str>>(phrases: &[S]) -> String {
    let mut sorted: Vec<String> = phrases.iter().map(|p| p.as_ref().to_lowercase()).collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    sorted.dedup();
    sorted.iter().map(|p| regex::escape(p)).collect::<Vec<_>>().join("|")
}

pub fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern}: {e}"))
}

fn keywords(words: &[&str]) -> Matcher {
    Matcher::Text(compile(&format!(r"\b(?:{})\b", alternation(words))))
}

pub fn menu_items() -> Vec<&'static str> {
    let mut items: Vec<&'static str> = banks::HOT_ITEMS.to_vec();
    items.extend_from_slice(banks::DRINK_ITEMS);
    items.extend_from_slice(&["gravy", "sandwich", "chicken", "batter", "sauce"]);
    items
}

static TOPICS: Lazy<Vec<Rule<Topic>>> = Lazy::new(|| {
    let mut food: Vec<&str> = menu_items();
    food.extend_from_slice(&["food", "meal", "sides", "combo", "sauces", "breakfast"]);
    vec![
        Rule { key: Topic::Food, matcher: keywords(&food) },
        Rule {
            key: Topic::Service,
            matcher: keywords(&[
                "service", "line", "drive-thru", "pickup", "wait", "curbside", "fast", "quick",
                "quickly", "turnaround", "visit", "stop", "rush", "in and out",
            ]),
        },
        Rule {
            key: Topic::Staff,
            matcher: keywords(&[
                "staff", "crew", "team", "cashier", "manager", "attendant", "faces", "maria",
                "james", "keisha", "luis", "tasha", "andre",
            ]),
        },
        Rule {
            key: Topic::Cleanliness,
            matcher: keywords(&[
                "clean", "tidy", "spotless", "wiped", "floor", "floors", "restrooms", "trash",
                "sticky", "tables", "windows", "chairs",
            ]),
        },
        Rule {
            key: Topic::Accuracy,
            matcher: keywords(&[
                "order", "receipt", "request", "bag", "bagged", "accurate", "correct",
                "correctly", "missing", "utensils", "change",
            ]),
        },
        Rule {
            key: Topic::Atmosphere,
            matcher: keywords(&[
                "vibe", "vibes", "atmosphere", "music", "lighting", "lobby", "dining room",
                "dining area", "space", "cozy", "store", "place",
            ]),
        },
        Rule {
            key: Topic::Value,
            matcher: keywords(&["value", "price", "portion", "portions", "deal", "cost", "worth"]),
        },
        Rule {
            key: Topic::Brand,
            matcher: keywords(&["location", "brand", "recommend", "go-to", "come back"]),
        },
    ]
});

static FAMILIES: Lazy<Vec<Rule<&'static str>>> = Lazy::new(|| {
    let leading = |p: &str| Matcher::Leading(compile(p));
    vec![
        Rule { key: "the-x-was", matcher: leading(r"^the [a-z -]+ (?:was|were) ") },
        Rule { key: "the-x-looked", matcher: leading(r"^the [a-z -]+ (?:looked|felt|came out) ") },
        Rule { key: "the-x-did", matcher: leading(r"^the ") },
        Rule { key: "loved", matcher: leading(r"^loved ") },
        Rule { key: "noticed", matcher: leading(r"^noticed ") },
        Rule { key: "appreciated", matcher: leading(r"^(?:really )?appreciated ") },
        Rule { key: "really", matcher: leading(r"^really ") },
        Rule { key: "shoutout", matcher: leading(r"^(?:quick )?shoutout") },
        Rule { key: "thanks", matcher: leading(r"^(?:quick |big )?thanks") },
        Rule { key: "glad", matcher: leading(r"^glad ") },
        Rule { key: "my", matcher: leading(r"^my ") },
        Rule { key: "they", matcher: leading(r"^they ") },
        Rule { key: "time-lead", matcher: leading(r"^[a-z ]+, the ") },
        Rule { key: "visit-story", matcher: leading(r"^(?:came in|stopped by|ordered|got|tried|did not|have to) ") },
        Rule { key: "connector", matcher: leading(r"^(?:also|plus|honestly|overall|still)\b") },
        Rule { key: "pickup", matcher: leading(r"^(?:pickup|mobile pickup|curbside pickup) ") },
    ]
});

static SYNONYMS: Lazy<Vec<Rule<&'static str>>> = Lazy::new(|| {
    vec![
        Rule { key: "speed", matcher: keywords(&["quick", "quickly", "fast", "speedy", "swift"]) },
        Rule { key: "warmth", matcher: keywords(&["friendly", "welcoming", "kind", "polite"]) },
        Rule { key: "tidiness", matcher: keywords(&["clean", "tidy", "spotless", "neat"]) },
        Rule { key: "freshness", matcher: keywords(&["hot", "fresh", "warm", "crispy"]) },
        Rule { key: "ease", matcher: keywords(&["smooth", "smoothly", "easy", "effortless", "simple"]) },
    ]
});

static ITEM_PATTERN: Lazy<Regex> = Lazy::new(|| compile(&format!(r"\b(?:{})\b", alternation(&menu_items()))));

static CLAUSE_BREAK: Lazy<Regex> = Lazy::new(|| compile(r"[.!?]\s+|,\s+and\s+"));

const VERB_OPENERS: &[&str] = &[
    "loved", "noticed", "appreciated", "enjoyed", "grabbed", "felt", "made", "left", "came",
    "stopped", "ordered", "got", "tried", "would", "have", "took", "had",
];

const NOUN_OPENERS: &[&str] = &[
    "the", "my", "this", "pickup", "order", "portions", "portion", "price", "sauces",
    "everything", "nothing", "staff", "mobile", "curbside", "breakfast", "coffee-hour", "lunch",
    "dinner", "drive-thru", "food", "morning", "midday", "late", "service", "sides",
];

const CONNECTOR_OPENERS: &[&str] = &["also", "plus", "honestly", "overall", "still"];

/// Sentence split into lowercase clauses without terminal punctuation.
/// Comma joins (`, and`) start a new clause.
pub fn clauses(text: &str) -> Vec<String> {
    CLAUSE_BREAK
        .split(text)
        .map(|c| c.trim().trim_end_matches(['.', '!', '?']).to_lowercase())
        .filter(|c| !c.is_empty())
        .collect()
}

pub fn opener(text: &str) -> String {
    text.split_whitespace()
        .next()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric() && c != '-' && c != '\'')
                .to_lowercase()
        })
        .unwrap_or_default()
}

pub fn opener_class(opener: &str) -> OpenerClass {
    if VERB_OPENERS.contains(&opener) {
        OpenerClass::Verb
    } else if NOUN_OPENERS.contains(&opener)
        || banks::NAMED_PEOPLE.iter().any(|n| n.eq_ignore_ascii_case(opener))
        || menu_items().iter().any(|item| item.split(' ').next() == Some(opener))
    {
        OpenerClass::Noun
    } else {
        OpenerClass::Other
    }
}

pub fn classify_topic(lower: &str, clauses: &[String]) -> Topic {
    TOPICS
        .iter()
        .find(|rule| rule.matcher.matches(lower, clauses))
        .map(|rule| rule.key)
        .unwrap_or(Topic::Other)
}

pub fn template_family(lower: &str, clauses: &[String]) -> &'static str {
    FAMILIES
        .iter()
        .find(|rule| rule.matcher.matches(lower, clauses))
        .map(|rule| rule.key)
        .unwrap_or("other")
}

pub fn synonym_key(lower: &str, clauses: &[String]) -> Option<&'static str> {
    SYNONYMS
        .iter()
        .find(|rule| rule.matcher.matches(lower, clauses))
        .map(|rule| rule.key)
}

/// Menu items named in the sentence. An item contained in a longer matched
/// item ("chicken" inside "spicy chicken sandwich") is dropped.
pub fn menu_items_in(lower: &str) -> Vec<String> {
    let mut found: Vec<String> = ITEM_PATTERN.find_iter(lower).map(|m| m.as_str().to_string()).collect();
    found.sort();
    found.dedup();
    let all = found.clone();
    found.retain(|item| !all.iter().any(|other| other != item && other.contains(item.as_str())));
    found
}

/// Derived, recomputable properties of a candidate sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub length: usize,
    pub band: Option<LengthBand>,
    pub topic: Topic,
    pub items: Vec<String>,
    pub opener: String,
    pub opener_class: OpenerClass,
    pub family: &'static str,
    pub connector: bool,
    pub synonym_key: Option<&'static str>,
    pub stems: Vec<&'static str>,
    pub patterns: Vec<&'static str>,
}

impl Features {
    pub fn of(text: &str) -> Self {
        Self::with_max_len(text, LONG_MAX)
    }

    pub fn with_max_len(text: &str, max_len: usize) -> Self {
        let lower = text.to_lowercase();
        let clauses = clauses(text);
        let length = text.chars().count();
        let opener = opener(text);
        Self {
            length,
            band: LengthBand::of(length, max_len),
            topic: classify_topic(&lower, &clauses),
            items: menu_items_in(&lower),
            opener_class: opener_class(&opener),
            connector: CONNECTOR_OPENERS.contains(&opener.as_str()),
            family: template_family(&lower, &clauses),
            synonym_key: synonym_key(&lower, &clauses),
            stems: constraints::matched_stems(&lower),
            patterns: constraints::matched_patterns(&clauses),
            opener,
        }
    }
}
