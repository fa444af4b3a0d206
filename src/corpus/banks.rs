//! Fixed vocabularies the expander draws from.
//!
//! Banks are plain data. Adding a phrase here is enough for it to flow through
//! expansion, gating and selection; nothing else needs to change.

use super::tone::Tone;

// Service

pub const SERVICE_TARGETS: &[&str] = &[
    "drive-thru line",
    "counter line",
    "counter service",
    "dine-in service",
    "pickup service",
    "window line",
    "front counter service",
];

pub const SERVICE_PACES: &[&str] = &[
    "moved quickly",
    "kept a steady pace",
    "stayed smooth",
    "ran efficiently",
    "kept things moving",
    "was quick without feeling rushed",
    "was fast and organized",
    "kept the flow steady",
];

pub const QUICK_HIT_STARTERS: &[&str] = &[
    "Fast",
    "Smooth",
    "Quick",
    "Easy",
    "Super quick",
    "Really smooth",
];

/// Time phrases every register may use.
pub const SHARED_TIMES: &[&str] = &["today", "even with a line", "during the rush"];

pub const MORNING_TIMES: &[&str] = &[
    "this morning",
    "during the breakfast rush",
    "before work",
];

pub const AFTERNOON_TIMES: &[&str] = &[
    "during lunch",
    "this afternoon",
    "on my lunch break",
];

pub const EVENING_TIMES: &[&str] = &[
    "at dinner time",
    "this evening",
    "after work",
];

pub const NIGHT_TIMES: &[&str] = &[
    "late tonight",
    "on a late run",
    "near closing",
];

// Staff

pub const PLURAL_STAFF: &[&str] = &[
    "staff",
    "crew",
    "team",
    "window staff",
    "front counter team",
    "dining room staff",
];

pub const SINGULAR_STAFF: &[&str] = &[
    "cashier",
    "manager",
    "window attendant",
    "counter attendant",
];

pub const STAFF_TRAITS: &[&str] = &[
    "friendly",
    "polite",
    "patient",
    "helpful",
    "welcoming",
    "upbeat",
    "calm under pressure",
    "focused",
    "kind",
    "professional",
];

pub const STAFF_ACTIONS: &[&str] = &[
    "greeted me with a smile",
    "answered my questions",
    "kept things organized",
    "handled the rush well",
    "made the visit easy",
    "kept the line moving",
    "checked that everything was correct",
    "made sure I had what I needed",
];

// Food

pub const HOT_ITEMS: &[&str] = &[
    "spicy chicken sandwich",
    "classic chicken sandwich",
    "chicken sandwich combo",
    "nuggets",
    "tenders",
    "biscuits",
    "fries",
    "cajun fries",
    "red beans and rice",
    "coleslaw",
    "mashed potatoes",
    "mac and cheese",
    "chicken pieces",
];

pub const DRINK_ITEMS: &[&str] = &["sweet tea", "lemonade"];

/// Items whose noun phrase takes a plural verb.
pub const PLURAL_ITEMS: &[&str] = &[
    "cajun fries",
    "fries",
    "nuggets",
    "tenders",
    "biscuits",
    "mashed potatoes",
    "chicken pieces",
];

pub const HOT_QUALITIES: &[&str] = &[
    "hot and fresh",
    "crispy and not greasy",
    "seasoned just right",
    "warm and satisfying",
    "cooked perfectly",
    "tasty and filling",
    "fresh out of the fryer",
    "full of flavor",
    "served at a great temperature",
    "not overcooked",
    "nice and juicy",
];

pub const SHORT_QUALITIES: &[&str] = &[
    "hot and fresh",
    "crispy",
    "juicy",
    "flavorful",
    "perfectly cooked",
];

pub const DRINK_QUALITIES: &[&str] = &[
    "cold and refreshing",
    "fresh tasting",
    "not too sweet",
    "just the right sweetness",
    "nice and cold",
    "a nice pick-me-up",
];

pub const FOOD_EXTRAS: &[&str] = &[
    "The batter was crispy without being greasy.",
    "The chicken was juicy and flavorful.",
    "The sandwich held together and was not messy.",
    "The fries were seasoned just right.",
    "The biscuits were flaky and warm.",
    "The sweet tea tasted fresh and not flat.",
    "The lemonade was cold and refreshing.",
    "The coleslaw was crisp and fresh.",
    "The red beans and rice tasted hearty.",
    "The gravy was smooth and warm.",
    "The sides hit the spot.",
    "The meal tasted made to order.",
    "The food smelled great on the way home.",
    "The spicy sandwich had a solid kick.",
    "The nuggets were crisp and tender.",
    "The tenders were cooked perfectly.",
    "The combo was a satisfying meal.",
    "The chicken was hot and fresh.",
    "The sandwich had great flavor.",
];

// Cleanliness

pub const SINGULAR_AREAS: &[&str] = &[
    "dining room",
    "lobby",
    "pickup shelf",
    "condiment station",
    "front door",
    "counter area",
];

pub const SINGULAR_STATES: &[&str] = &[
    "clean and tidy",
    "well kept",
    "neat and organized",
    "comfortable and clean",
    "fresh and bright",
];

pub const PLURAL_AREAS: &[&str] = &[
    "tables",
    "floors",
    "trash bins",
    "chairs",
    "windows",
    "restrooms",
];

pub const PLURAL_STATES: &[&str] = &[
    "clean",
    "wiped down",
    "spotless",
    "well kept",
    "not sticky",
    "stocked and clean",
];

pub const CLEANLINESS_EXTRAS: &[&str] = &[
    "The floor was dry and not slippery.",
    "The dining room felt clean and comfortable.",
    "The lobby smelled clean.",
    "The tables were still clean even with a few people.",
    "The pickup shelf area was neat and uncluttered.",
    "The front door and windows looked clean.",
    "The store looked tidy and welcoming.",
];

// Fixed statement banks

pub const ACCURACY_LINES: &[&str] = &[
    "My order was correct.",
    "Everything was exactly as requested.",
    "They got my order right the first time.",
    "The order matched the receipt.",
    "They repeated my order to confirm it.",
    "They followed my no-pickles request.",
    "They honored my extra sauce request.",
    "Sauces were included in the bag.",
    "The order was packed neatly.",
    "The utensils were included.",
    "The food was packaged carefully.",
    "They split the order into two bags for easy carry.",
    "The kids meal was separated from the spicy items.",
    "The app order matched exactly.",
    "My payment was quick and easy.",
    "They counted my change correctly.",
    "The order number was called clearly.",
    "The pickup shelf had my name spelled right.",
    "Everything was bagged correctly.",
    "Nothing was missing.",
    "The special request was handled perfectly.",
    "They double-checked the order before handing it over.",
    "The receipt was accurate.",
    "The order came out right the first time.",
    "They separated hot items from cold ones.",
    "The order was ready on time.",
    "My order was checked and accurate.",
    "The order was called out clearly.",
    "Order accuracy was on point.",
    "No issues with my order.",
    "Everything in the bag matched what I asked for.",
    "They got everything right on my order.",
    "The order was accurate and complete.",
    "Order details were handled perfectly.",
    "Everything was packed just how I asked.",
];

pub const ATMOSPHERE_LINES: &[&str] = &[
    "The lobby felt calm and welcoming.",
    "The dining room felt cozy and clean.",
    "The store had a welcoming vibe.",
    "The music was low and pleasant.",
    "The lighting was bright and comfortable.",
    "The vibe was relaxed today.",
    "It felt easy from start to finish.",
    "The space felt organized even while busy.",
    "The dining room felt comfortable.",
    "The store felt safe and well kept.",
    "The atmosphere was friendly.",
    "The lobby stayed quiet and comfortable.",
    "The dining room felt fresh and tidy.",
    "The store felt clean and inviting.",
    "The vibe was calm and steady.",
    "The dining area was pleasant.",
    "The lobby felt relaxed and open.",
    "The dining room felt bright and airy.",
    "The store looked sharp and organized.",
    "The atmosphere was easygoing.",
    "The place felt relaxed and comfortable.",
    "The dining area felt calm and tidy.",
    "Everything felt low-stress.",
    "The space felt open and easy to navigate.",
    "The overall vibe felt friendly.",
];

pub const VALUE_LINES: &[&str] = &[
    "Portion sizes felt fair for the price.",
    "Good value for the meal.",
    "The combo was a good value.",
    "The meal was filling for the cost.",
    "Portions were generous.",
    "Worth the price today.",
    "Great value for a filling meal.",
    "The portions felt just right.",
    "Solid value and good portions.",
    "The meal felt like a good deal.",
    "Fair price for what I got.",
    "Good portions and a fair price.",
    "The value was on point.",
    "The combo felt like a deal.",
    "Portions were satisfying.",
    "Price felt fair for what I got.",
    "Felt like a good deal for the portion size.",
    "Great portions for the cost.",
    "Solid value today.",
    "Great deal for the price.",
    "Worth it for the portions.",
];

pub const PICKUP_LINES: &[&str] = &[
    "Pickup was ready on time.",
    "The pickup area was easy to use.",
    "Mobile pickup was smooth and quick.",
    "The pickup shelf was organized.",
    "The order was waiting when I arrived.",
    "Curbside pickup was easy.",
    "Pickup was fast and hassle-free.",
    "The pickup spot was clearly marked.",
    "Easy in-and-out pickup today.",
    "The pickup shelf was easy to find.",
    "The pickup process was simple.",
    "Pickup felt organized and quick.",
    "Order was ready right when I got there.",
    "The pickup flow was smooth.",
    "Pickup was quick and convenient.",
    "The pickup handoff was easy.",
    "Grabbed my order fast and went.",
    "Pickup felt effortless today.",
    "Pickup was smooth from start to finish.",
    "Easy pickup today.",
    "Quick pickup, no hassle.",
    "Pickup went smoothly.",
];

// Short one-liners, one bank per register

pub const SHORT_MORNING: &[&str] = &[
    "Great start to the morning.",
    "Breakfast stop went smoothly.",
    "Quick morning stop.",
    "Easy stop before work.",
    "Friendly faces this early.",
    "Coffee-hour service was fast.",
    "Morning crew was on it.",
    "Smooth early visit.",
    "Fresh food first thing.",
    "No morning wait at all.",
    "Made my morning easier.",
    "Early visit, no stress.",
    "Cheerful morning service.",
    "Quick in before work.",
    "Nice way to start the day.",
];

pub const SHORT_MIDDAY: &[&str] = &[
    "Super fast service.",
    "Smooth visit overall.",
    "Quick and easy stop.",
    "No issues at all.",
    "Fast, friendly service.",
    "Great experience today.",
    "Short wait time.",
    "Easy in and out.",
    "Nice, quick visit.",
    "Solid service today.",
    "Lunch break well spent.",
    "Quick turnaround.",
    "Fast and organized.",
    "Good value today.",
    "Midday rush handled well.",
];

pub const SHORT_EVENING: &[&str] = &[
    "Dinner run went smoothly.",
    "Great end to the day.",
    "Easy dinner pickup.",
    "Friendly vibe inside.",
    "Staff was on it.",
    "Order was spot on.",
    "Food came out hot.",
    "Great food tonight.",
    "Everything was fresh.",
    "Clean and welcoming.",
    "No stress, no fuss.",
    "Happy with the visit.",
    "Good vibes all around.",
    "Late crew kept it moving.",
    "Drive-thru was quick.",
];

// Occasional lines, admitted in small numbers

pub const FLOURISH_LINES: &[&str] = &[
    "Also, the sauce selection was generous.",
    "Also, the napkins and straws were already in the bag.",
    "Plus, the wait was shorter than expected.",
    "Plus, the food was still warm when I got home.",
    "Honestly one of the easiest visits I have had in a while.",
    "Honestly, everything just clicked this time.",
    "Overall, a really pleasant stop.",
    "Overall, the visit exceeded what I expected.",
    "Still thinking about how good that sandwich was.",
    "Never had to ask twice for anything.",
    "Would happily come back again soon.",
    "Left in a better mood than I arrived.",
];

pub const BRAND_LINES: &[&str] = &[
    "This location represents the brand well.",
    "This location is one of the better ones nearby.",
    "This location keeps getting better.",
    "Consistent with what I expect from the brand.",
    "This location never disappoints.",
    "Would recommend this location to friends.",
    "This is my go-to location now.",
    "Glad this location is close by.",
];

pub const NAMED_PEOPLE: &[&str] = &["Maria", "James", "Keisha", "Luis", "Tasha", "Andre"];

pub const NAMED_SPOTS: &[&str] = &[
    "at the register",
    "at the window",
    "at the counter",
    "on the headset",
];

// Personalizer banks

pub const DINE_IN_CLAUSES: &[&str] = &[
    "Ate inside and it was comfortable.",
    "Sat down for a bit and enjoyed it.",
];

pub const PICKUP_CLAUSES: &[&str] = &[
    "Grabbed it on the way home.",
    "Picked it up without any wait.",
];

pub const DRIVE_THRU_CLAUSES: &[&str] = &[
    "Came through the drive-thru.",
    "Drive-thru speaker was clear.",
];

pub const MORNING_CLAUSES: &[&str] = &[
    "Great way to start the morning.",
    "Made the morning easier.",
];

pub const AFTERNOON_CLAUSES: &[&str] = &[
    "Perfect for a lunch break.",
    "Good afternoon pick-me-up.",
];

pub const EVENING_CLAUSES: &[&str] = &[
    "Nice way to wrap up the evening.",
    "Made dinner easy.",
];

pub const NIGHT_CLAUSES: &[&str] = &[
    "Appreciated it this late at night.",
    "Good late-night stop.",
];

pub const INTERJECTIONS: &[&str] = &["Thanks!", "10/10.", "Keep it up!", "Appreciate it!"];

/// Contractions the typo pass may strip the apostrophe from.
pub const CONTRACTIONS: &[&str] = &["didn't", "wasn't", "couldn't", "I'd", "it's", "I've"];

/// Time-of-day phrases for the register, followed by the shared ones.
pub fn service_times(tone: Tone) -> Vec<&'static str> {
    let specific: &[&str] = match tone {
        Tone::Morning => MORNING_TIMES,
        Tone::Afternoon => AFTERNOON_TIMES,
        Tone::Evening => EVENING_TIMES,
        Tone::Night => NIGHT_TIMES,
        Tone::Any => &[],
    };
    let mut times: Vec<&'static str> = specific.to_vec();
    if tone == Tone::Any {
        // Interleave one phrase from each register
        for i in 0..MORNING_TIMES.len() {
            for bank in [MORNING_TIMES, AFTERNOON_TIMES, EVENING_TIMES, NIGHT_TIMES] {
                if let Some(time) = bank.get(i) {
                    times.push(*time);
                }
            }
        }
    }
    times.extend_from_slice(SHARED_TIMES);
    times
}

/// Short one-liners for the register. The mixed register interleaves all three
/// banks so no single register dominates the catch-all corpus.
pub fn short_lines(tone: Tone) -> Vec<&'static str> {
    match tone {
        Tone::Morning => SHORT_MORNING.to_vec(),
        Tone::Afternoon => SHORT_MIDDAY.to_vec(),
        Tone::Evening | Tone::Night => SHORT_EVENING.to_vec(),
        Tone::Any => {
            let longest = SHORT_MORNING.len().max(SHORT_MIDDAY.len()).max(SHORT_EVENING.len());
            let mut lines = Vec::with_capacity(SHORT_MORNING.len() + SHORT_MIDDAY.len() + SHORT_EVENING.len());
            for i in 0..longest {
                for bank in [SHORT_MORNING, SHORT_MIDDAY, SHORT_EVENING] {
                    if let Some(line) = bank.get(i) {
                        lines.push(*line);
                    }
                }
            }
            lines
        }
    }
}

/// Clause appended by the personalizer for a time-of-day register.
pub fn time_clauses(tone: Tone) -> &'static [&'static str] {
    match tone {
        Tone::Morning => MORNING_CLAUSES,
        Tone::Afternoon => AFTERNOON_CLAUSES,
        Tone::Evening => EVENING_CLAUSES,
        Tone::Night => NIGHT_CLAUSES,
        Tone::Any => &[],
    }
}
