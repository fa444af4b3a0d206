//! Cooldown filters over the persisted history streams.

use crate::config::PickerConfig;
use crate::corpus::Features;
use crate::history::{tail, History};
use crate::telemetry::RelaxationLevel;

const THE: &str = "the";

/// One exclusion rule. A candidate survives a level only if no filter of
/// that level blocks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Topic,
    Item,
    Opener,
    OpenerClass,
    LengthBandStreak,
    ConnectorStreak,
    Synonym,
    TemplateFamily,
    TheOpenerLimit,
}

impl Filter {
    pub const ALL: [Filter; 9] = [
        Filter::Topic,
        Filter::Item,
        Filter::Opener,
        Filter::OpenerClass,
        Filter::LengthBandStreak,
        Filter::ConnectorStreak,
        Filter::Synonym,
        Filter::TemplateFamily,
        Filter::TheOpenerLimit,
    ];

    pub fn blocks(self, candidate: &Features, history: &History, config: &PickerConfig) -> bool {
        match self {
            Filter::Topic => {
                tail(&history.recent_topics, config.topic_cooldown).any(|t| *t == candidate.topic)
            }
            Filter::Item => tail(&history.recent_items, config.item_cooldown)
                .flatten()
                .any(|item| candidate.items.contains(item)),
            Filter::Opener => {
                tail(&history.recent_openers, config.opening_cooldown).any(|o| *o == candidate.opener)
            }
            Filter::OpenerClass => tail(&history.recent_opener_types, config.opening_type_cooldown)
                .any(|c| *c == candidate.opener_class),
            Filter::LengthBandStreak => {
                let Some(band) = candidate.band else {
                    return false;
                };
                let streak = config.length_band_streak.min(config.length_band_window);
                if streak == 0 {
                    return false;
                }
                let window: Vec<_> = tail(&history.recent_length_bands, config.length_band_window).collect();
                window.len() >= streak && window[window.len() - streak..].iter().all(|b| **b == band)
            }
            Filter::ConnectorStreak => {
                candidate.connector && history.recent_connectors.back().copied().unwrap_or(false)
            }
            Filter::Synonym => match (candidate.synonym_key, history.last_synonym_key.as_deref()) {
                (Some(key), Some(last)) => key == last,
                _ => false,
            },
            Filter::TemplateFamily => {
                candidate.family != "other"
                    && tail(&history.recent_template_families, config.template_family_window)
                        .any(|f| f == candidate.family)
            }
            Filter::TheOpenerLimit => {
                if config.the_opener_window == 0 || candidate.opener != THE {
                    return false;
                }
                let recent_the = tail(&history.recent_openers, config.the_opener_window)
                    .filter(|o| o.as_str() == THE)
                    .count();
                recent_the >= config.the_opener_limit
            }
        }
    }
}

/// Filters applied at a relaxation level.
pub fn filters_for(level: RelaxationLevel) -> &'static [Filter] {
    match level {
        RelaxationLevel::AllFilters => &Filter::ALL,
        RelaxationLevel::TopicAndItem => &[Filter::Topic, Filter::Item],
        RelaxationLevel::TopicOnly => &[Filter::Topic],
        RelaxationLevel::NoCooldowns | RelaxationLevel::UsedReset | RelaxationLevel::WholeCorpus => &[],
    }
}

pub fn admitted(level: RelaxationLevel, candidate: &Features, history: &History, config: &PickerConfig) -> bool {
    filters_for(level)
        .iter()
        .all(|filter| !filter.blocks(candidate, history, config))
}
