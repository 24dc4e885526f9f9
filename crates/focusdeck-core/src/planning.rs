//! Daily planning prompts, their answers, and mood check-ins.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::date::DateKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub text: String,
}

impl Prompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: format!("custom-{}", Uuid::new_v4()),
            text: text.into(),
        }
    }

    fn seeded(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Energized,
    Steady,
    Foggy,
    Anxious,
    Low,
}

string_enum!(Mood, "mood", {
    "energized" => Mood::Energized,
    "steady" => Mood::Steady,
    "foggy" => Mood::Foggy,
    "anxious" => Mood::Anxious,
    "low" => Mood::Low,
});

/// Answers keyed by date, then prompt id.
pub type PromptResponses = BTreeMap<DateKey, BTreeMap<String, String>>;

/// One mood per date.
pub type MoodCheckins = BTreeMap<DateKey, Mood>;

pub fn default_prompts() -> Vec<Prompt> {
    vec![
        Prompt::seeded("priorities", "What are my top 3 priorities for today?"),
        Prompt::seeded("success", "What would make today feel successful?"),
        Prompt::seeded("must-do", "What's the one thing I absolutely need to accomplish?"),
        Prompt::seeded("distractions", "What potential distractions should I be aware of?"),
        Prompt::seeded("check-in", "How am I feeling right now, and what do I need?"),
    ]
}

/// Dates with answers plus `today`, newest first.
pub fn available_dates(responses: &PromptResponses, today: DateKey) -> Vec<DateKey> {
    let mut dates: Vec<DateKey> = responses.keys().copied().collect();
    if !responses.contains_key(&today) {
        dates.push(today);
    }
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> DateKey {
        DateKey::from_ymd(2024, 1, d).unwrap()
    }

    #[test]
    fn default_prompt_ids_are_unique() {
        let prompts = default_prompts();
        let mut ids: Vec<_> = prompts.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), prompts.len());
    }

    #[test]
    fn available_dates_include_today_newest_first() {
        let mut responses = PromptResponses::new();
        responses.entry(day(3)).or_default().insert("success".into(), "ship".into());
        responses.entry(day(10)).or_default().insert("success".into(), "rest".into());

        assert_eq!(available_dates(&responses, day(15)), vec![day(15), day(10), day(3)]);
        assert_eq!(available_dates(&responses, day(10)), vec![day(10), day(3)]);
    }

    #[test]
    fn mood_round_trips_through_text() {
        assert_eq!("foggy".parse::<Mood>().unwrap(), Mood::Foggy);
        assert_eq!(serde_json::to_string(&Mood::Energized).unwrap(), "\"energized\"");
        assert!("meh".parse::<Mood>().is_err());
    }
}
