//! Template expansion: every combination of slot values substituted into every
//! sentence shape of a topic.
//!
//! Shapes use `{slot}` placeholders. A placeholder whose first letter is upper
//! case (`{Time}`) inserts the value with its first letter capitalized.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::banks;
use super::tone::Tone;

const SERVICE_SHAPES: &[&str] = &[
    "The {target} {pace}.",
    "Loved how the {target} {pace}.",
    "Noticed the {target} {pace}.",
    "Really liked that the {target} {pace}.",
    "Appreciated how the {target} {pace}.",
    "Quick shoutout: the {target} {pace}.",
    "The {target} {pace} {time}.",
    "Even {time}, the {target} {pace}.",
    "{Time}, the {target} {pace}.",
    "{starter} {target}.",
    "{starter} {target} today.",
    "The {target} {pace} {time}, so the whole visit felt easy.",
    "Came in {time} and the {target} {pace} the entire time.",
    "Stopped by {time} and was impressed that the {target} {pace}.",
    "Honestly did not expect it, but the {target} {pace} {time}.",
    "Compared to other places nearby, the {target} {pace}.",
];

const PLURAL_STAFF_SHAPES: &[&str] = &[
    "The {staff} were {trait}.",
    "Really appreciated how the {staff} were {trait}.",
    "The {staff} felt {trait} today.",
    "Shoutout to the {staff} for being {trait}.",
    "Super {trait} {staff}.",
    "The {staff} {action}.",
    "It was nice that the {staff} {action}.",
    "Quick thanks to the {staff} who {action}.",
    "The {staff} {action} and stayed {trait} the whole time.",
    "Even with a crowd, the {staff} {action} and stayed {trait}.",
    "Every time I come in, the {staff} {action}.",
    "You can tell the {staff} take pride in the work because they {action}.",
];

const SINGULAR_STAFF_SHAPES: &[&str] = &[
    "The {staff} was {trait}.",
    "Shoutout to the {staff} for being {trait}.",
    "Really appreciated the {staff} being {trait}.",
    "The {staff} {action}.",
    "Big thanks to the {staff} who {action}.",
    "The {staff} {action} and was {trait} the whole time.",
    "Every time I come in, the {staff} {action}.",
    "You can tell the {staff} takes pride in the job and {action}.",
];

const FOOD_SHAPES: &[&str] = &[
    "The {item} was {quality}.",
    "Loved the {item}; it was {quality}.",
    "My {item} was {quality}.",
    "The {item} came out {quality}.",
    "Really enjoyed the {item} because it was {quality}.",
    "{Item} was {quality}.",
    "Ordered the {item}, which came out {quality} and tasted made to order.",
    "The {item} was {quality}, which is exactly what I was hoping for.",
    "Got the {item} and it was {quality} all the way through.",
    "Did not expect much from the {item}, but it was {quality}.",
    "Have to mention the {item}, it was {quality} and worth the trip.",
];

const FOOD_SHORT_SHAPES: &[&str] = &["{Item} was {short}.", "Hot, {short} {item}."];

const DRINK_EXTRA_SHAPES: &[&str] = &["{Item} was {quality} today."];

const SINGULAR_AREA_SHAPES: &[&str] = &[
    "The {area} was {state}.",
    "Noticed the {area} was {state}.",
    "The {area} looked {state}.",
    "Glad the {area} was {state}.",
    "Clean {area}.",
    "Really clean {area}.",
    "Even with people coming in and out, the {area} was {state}.",
    "Took a second to notice the {area} was {state}, which says a lot.",
    "It is easy to overlook, but the {area} was {state} on this visit.",
    "Small thing, but the {area} was {state} and it made a difference.",
];

const PLURAL_AREA_SHAPES: &[&str] = &[
    "The {area} were {state}.",
    "Noticed the {area} were {state}.",
    "The {area} looked {state}.",
    "Glad the {area} were {state}.",
    "Clean {area}.",
    "Really clean {area}.",
    "Even with people coming in and out, the {area} were {state}.",
    "Took a second to notice the {area} were {state}, which says a lot.",
    "It is easy to overlook, but the {area} were {state} on this visit.",
    "Small thing, but the {area} were {state} and it made a difference.",
];

const NAMED_SHAPES: &[&str] = &[
    "Shoutout to {name} {spot}.",
    "{name} {spot} was super helpful.",
    "Big thanks to {name} {spot} for the great service.",
];

/// Ordered, duplicate-free collection of sentences.
#[derive(Debug, Default, Clone)]
pub struct SentenceSet {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl SentenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sentence unless it is already present or lacks terminal punctuation.
    pub fn add(&mut self, sentence: String) -> bool {
        if !ends_with_terminal(&sentence) || self.seen.contains(&sentence) {
            return false;
        }
        self.seen.insert(sentence.clone());
        self.order.push(sentence);
        true
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, sentences: I) {
        for sentence in sentences {
            self.add(sentence);
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

pub fn ends_with_terminal(sentence: &str) -> bool {
    matches!(sentence.chars().last(), Some('.') | Some('!') | Some('?'))
}

pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lowercase_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Expands every shape against the slot lists. A shape that names a slot
/// missing from `slots`, or whose slot list is empty, produces nothing.
pub fn expand(shapes: &[&str], slots: &[(&str, &[&str])]) -> Vec<String> {
    let mut out = SentenceSet::new();
    for shape in shapes {
        expand_shape(shape, slots, &mut out);
    }
    out.into_vec()
}

fn expand_shape(shape: &str, slots: &[(&str, &[&str])], out: &mut SentenceSet) {
    let names = slot_names(shape);
    let mut lists: Vec<&[&str]> = Vec::with_capacity(names.len());
    for name in &names {
        match slots.iter().find(|(slot, _)| *slot == name.as_str()) {
            Some((_, values)) if !values.is_empty() => lists.push(*values),
            _ => return,
        }
    }

    // Odometer over the slot lists, last slot varying fastest
    let mut indices = vec![0usize; lists.len()];
    loop {
        let values: Vec<&str> = indices.iter().zip(&lists).map(|(&i, list)| list[i]).collect();
        out.add(fill(shape, &names, &values));

        let mut position = indices.len();
        loop {
            if position == 0 {
                return;
            }
            position -= 1;
            indices[position] += 1;
            if indices[position] < lists[position].len() {
                break;
            }
            indices[position] = 0;
        }
    }
}

/// Distinct lowercase slot names in order of first appearance.
fn slot_names(shape: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = shape;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let name = rest[start + 1..start + len].to_lowercase();
        if !names.contains(&name) {
            names.push(name);
        }
        rest = &rest[start + len + 1..];
    }
    names
}

fn fill(shape: &str, names: &[String], values: &[&str]) -> String {
    let mut sentence = String::with_capacity(shape.len() + 32);
    let mut rest = shape;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        sentence.push_str(&rest[..start]);
        let raw = &rest[start + 1..start + len];
        let name = raw.to_lowercase();
        if let Some(index) = names.iter().position(|n| *n == name) {
            if raw.starts_with(|c: char| c.is_uppercase()) {
                sentence.push_str(&capitalize_first(values[index]));
            } else {
                sentence.push_str(values[index]);
            }
        }
        rest = &rest[start + len + 1..];
    }
    sentence.push_str(rest);
    sentence
}

pub fn service(tone: Tone) -> Vec<String> {
    let times = banks::service_times(tone);
    expand(
        SERVICE_SHAPES,
        &[
            ("target", banks::SERVICE_TARGETS),
            ("pace", banks::SERVICE_PACES),
            ("time", times.as_slice()),
            ("starter", banks::QUICK_HIT_STARTERS),
        ],
    )
}

pub fn staff() -> Vec<String> {
    let mut set = SentenceSet::new();
    set.extend(expand(
        PLURAL_STAFF_SHAPES,
        &[
            ("staff", banks::PLURAL_STAFF),
            ("trait", banks::STAFF_TRAITS),
            ("action", banks::STAFF_ACTIONS),
        ],
    ));
    set.extend(expand(
        SINGULAR_STAFF_SHAPES,
        &[
            ("staff", banks::SINGULAR_STAFF),
            ("trait", banks::STAFF_TRAITS),
            ("action", banks::STAFF_ACTIONS),
        ],
    ));
    set.into_vec()
}

pub fn food() -> Vec<String> {
    let mut set = SentenceSet::new();
    set.extend(expand(
        FOOD_SHAPES,
        &[("item", banks::HOT_ITEMS), ("quality", banks::HOT_QUALITIES)],
    ));
    set.extend(expand(
        FOOD_SHORT_SHAPES,
        &[("item", banks::HOT_ITEMS), ("short", banks::SHORT_QUALITIES)],
    ));
    set.extend(expand(
        FOOD_SHAPES,
        &[("item", banks::DRINK_ITEMS), ("quality", banks::DRINK_QUALITIES)],
    ));
    set.extend(expand(
        DRINK_EXTRA_SHAPES,
        &[("item", banks::DRINK_ITEMS), ("quality", banks::DRINK_QUALITIES)],
    ));
    set.extend(banks::FOOD_EXTRAS.iter().map(|s| s.to_string()));
    set.into_vec()
}

pub fn cleanliness() -> Vec<String> {
    let mut set = SentenceSet::new();
    set.extend(expand(
        SINGULAR_AREA_SHAPES,
        &[("area", banks::SINGULAR_AREAS), ("state", banks::SINGULAR_STATES)],
    ));
    set.extend(expand(
        PLURAL_AREA_SHAPES,
        &[("area", banks::PLURAL_AREAS), ("state", banks::PLURAL_STATES)],
    ));
    set.extend(banks::CLEANLINESS_EXTRAS.iter().map(|s| s.to_string()));
    set.into_vec()
}

pub fn named() -> Vec<String> {
    expand(
        NAMED_SHAPES,
        &[("name", banks::NAMED_PEOPLE), ("spot", banks::NAMED_SPOTS)],
    )
}

fn fixed(lines: &[&str]) -> Vec<String> {
    let mut set = SentenceSet::new();
    set.extend(lines.iter().map(|s| s.to_string()));
    set.into_vec()
}

/// Names one of the expanded source lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Service,
    Staff,
    Food,
    Cleanliness,
    Accuracy,
    Atmosphere,
    Value,
    Pickup,
    Short,
    Flourish,
    Brand,
    Named,
}

/// Source lists the pool builder admits singles from and pairs together.
#[derive(Debug, Clone)]
pub struct Expansions {
    pub service: Vec<String>,
    pub staff: Vec<String>,
    pub food: Vec<String>,
    pub cleanliness: Vec<String>,
    pub accuracy: Vec<String>,
    pub atmosphere: Vec<String>,
    pub value: Vec<String>,
    pub pickup: Vec<String>,
    pub short: Vec<String>,
    pub flourish: Vec<String>,
    pub brand: Vec<String>,
    pub named: Vec<String>,
}

impl Expansions {
    pub fn for_tone(tone: Tone) -> Self {
        let short: Vec<&str> = banks::short_lines(tone);
        Self {
            service: service(tone),
            staff: staff(),
            food: food(),
            cleanliness: cleanliness(),
            accuracy: fixed(banks::ACCURACY_LINES),
            atmosphere: fixed(banks::ATMOSPHERE_LINES),
            value: fixed(banks::VALUE_LINES),
            pickup: fixed(banks::PICKUP_LINES),
            short: fixed(&short),
            flourish: fixed(banks::FLOURISH_LINES),
            brand: fixed(banks::BRAND_LINES),
            named: named(),
        }
    }

    pub fn get(&self, source: Source) -> &[String] {
        match source {
            Source::Service => &self.service,
            Source::Staff => &self.staff,
            Source::Food => &self.food,
            Source::Cleanliness => &self.cleanliness,
            Source::Accuracy => &self.accuracy,
            Source::Atmosphere => &self.atmosphere,
            Source::Value => &self.value,
            Source::Pickup => &self.pickup,
            Source::Short => &self.short,
            Source::Flourish => &self.flourish,
            Source::Brand => &self.brand,
            Source::Named => &self.named,
        }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for list in [
            &mut self.service,
            &mut self.staff,
            &mut self.food,
            &mut self.cleanliness,
            &mut self.accuracy,
            &mut self.atmosphere,
            &mut self.value,
            &mut self.pickup,
            &mut self.short,
            &mut self.flourish,
            &mut self.brand,
            &mut self.named,
        ] {
            list.shuffle(rng);
        }
    }
}
