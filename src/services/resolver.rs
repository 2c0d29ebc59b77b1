use serde_json::{Map, Value};

use crate::models::{AwardMode, Era, Format, Genre, Language, Personality, Preferences};

/// Loosely typed quiz answers as posted by the client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerBag(Map<String, Value>);

impl AnswerBag {
    pub fn new(answers: Map<String, Value>) -> Self {
        Self(answers)
    }

    /// Normalized string value for `key`; non-strings count as absent
    fn field(&self, key: &str) -> Option<String> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(|raw| raw.trim().to_ascii_lowercase())
            .filter(|raw| !raw.is_empty())
    }

    fn parse<T: Default>(&self, key: &str, parse: impl Fn(&str) -> Option<T>) -> T {
        self.field(key)
            .and_then(|raw| parse(&raw))
            .unwrap_or_default()
    }
}

/// Resolves raw answers into concrete preferences
///
/// Never fails: absent, non-string and unrecognized values take their defaults.
pub fn resolve_preferences(answers: &AnswerBag) -> Preferences {
    Preferences {
        genre: answers.parse("genre", Genre::parse),
        language: answers.parse("language", Language::parse),
        format: answers.parse("type", Format::parse),
        award_mode: answers.parse("award", AwardMode::parse),
        era: answers.parse("decade", Era::parse),
        personality: answers.parse("mbti", Personality::parse),
    }
}
