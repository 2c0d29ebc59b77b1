use serde::{Deserialize, Serialize};

use super::Personality;

/// TMDB genre id for animation, used to tell animated films from live action
pub const ANIMATION_GENRE_ID: u32 = 16;

/// Genres offered by the quiz
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[default]
    Action,
    Adventure,
    Animation,
    Comedy,
    Crime,
    Drama,
    Family,
    Fantasy,
    Horror,
    Mystery,
    Romance,
    Scifi,
    Thriller,
}

impl Genre {
    /// TMDB genre id
    pub fn tmdb_id(self) -> u32 {
        match self {
            Genre::Action => 28,
            Genre::Adventure => 12,
            Genre::Animation => ANIMATION_GENRE_ID,
            Genre::Comedy => 35,
            Genre::Crime => 80,
            Genre::Drama => 18,
            Genre::Family => 10751,
            Genre::Fantasy => 14,
            Genre::Horror => 27,
            Genre::Mystery => 9648,
            Genre::Romance => 10749,
            Genre::Scifi => 878,
            Genre::Thriller => 53,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let genre = match raw {
            "action" => Genre::Action,
            "adventure" => Genre::Adventure,
            "animation" => Genre::Animation,
            "comedy" => Genre::Comedy,
            "crime" => Genre::Crime,
            "drama" => Genre::Drama,
            "family" => Genre::Family,
            "fantasy" => Genre::Fantasy,
            "horror" => Genre::Horror,
            "mystery" => Genre::Mystery,
            "romance" => Genre::Romance,
            "scifi" | "sci-fi" => Genre::Scifi,
            "thriller" => Genre::Thriller,
            _ => return None,
        };
        Some(genre)
    }
}

/// Catalog languages; "any" resolves to Japanese
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ja,
    En,
    Ko,
    Zh,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Ja => "ja",
            Language::En => "en",
            Language::Ko => "ko",
            Language::Zh => "zh",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ja" | "any" => Some(Language::Ja),
            "en" => Some(Language::En),
            "ko" => Some(Language::Ko),
            "zh" => Some(Language::Zh),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum Format {
    #[default]
    Any,
    Animation,
    LiveAction,
}

impl Format {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "any" => Some(Format::Any),
            "animation" | "anime" => Some(Format::Animation),
            "live" | "liveaction" | "live-action" | "live_action" => Some(Format::LiveAction),
            _ => None,
        }
    }
}

/// How award and popularity signals shape the candidate pool
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum AwardMode {
    #[default]
    Any,
    /// Boost with the top-rated list
    TopRated,
    /// Boost with the popular list
    MostPopular,
    /// Hidden gems: least popular first
    LeastPopular,
}

impl AwardMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "any" => Some(AwardMode::Any),
            "award" | "toprated" | "mostawarded" => Some(AwardMode::TopRated),
            "popular" | "mostpopular" => Some(AwardMode::MostPopular),
            "hidden" | "leastpopular" => Some(AwardMode::LeastPopular),
            _ => None,
        }
    }

    /// Whether a boosted list is prepended to the pool
    pub fn is_boost(self) -> bool {
        matches!(self, AwardMode::TopRated | AwardMode::MostPopular)
    }
}

/// Release-date bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Era {
    #[default]
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "1990s")]
    Nineties,
    #[serde(rename = "2000s")]
    TwoThousands,
    #[serde(rename = "2010s")]
    TwentyTens,
    #[serde(rename = "2020s")]
    TwentyTwenties,
}

impl Era {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "any" => Some(Era::Any),
            "1990s" => Some(Era::Nineties),
            "2000s" => Some(Era::TwoThousands),
            "2010s" => Some(Era::TwentyTens),
            "2020s" => Some(Era::TwentyTwenties),
            _ => None,
        }
    }

    /// Whether a release year belongs to this bucket.
    ///
    /// The oldest bucket takes everything before 2000 and the newest everything
    /// from 2020 on, so no release year falls outside every bucket.
    pub fn contains(self, year: i32) -> bool {
        match self {
            Era::Any => true,
            Era::Nineties => year < 2000,
            Era::TwoThousands => (2000..2010).contains(&year),
            Era::TwentyTens => (2010..2020).contains(&year),
            Era::TwentyTwenties => year >= 2020,
        }
    }
}

/// Canonical quiz answers. Every field is always concrete.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub genre: Genre,
    pub language: Language,
    pub format: Format,
    pub award_mode: AwardMode,
    pub era: Era,
    pub personality: Personality,
}
