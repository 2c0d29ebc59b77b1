use serde::{Deserialize, Serialize};

use super::Genre;

/// MBTI personality type collected by the quiz
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Personality {
    Intj,
    Intp,
    Entj,
    Entp,
    Infj,
    Infp,
    Enfj,
    Enfp,
    Istj,
    Isfj,
    Estj,
    Esfj,
    Istp,
    Isfp,
    Estp,
    Esfp,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl Personality {
    /// Parses a four-letter code, case-insensitively
    pub fn parse(raw: &str) -> Option<Self> {
        let personality = match raw.to_ascii_uppercase().as_str() {
            "INTJ" => Personality::Intj,
            "INTP" => Personality::Intp,
            "ENTJ" => Personality::Entj,
            "ENTP" => Personality::Entp,
            "INFJ" => Personality::Infj,
            "INFP" => Personality::Infp,
            "ENFJ" => Personality::Enfj,
            "ENFP" => Personality::Enfp,
            "ISTJ" => Personality::Istj,
            "ISFJ" => Personality::Isfj,
            "ESTJ" => Personality::Estj,
            "ESFJ" => Personality::Esfj,
            "ISTP" => Personality::Istp,
            "ISFP" => Personality::Isfp,
            "ESTP" => Personality::Estp,
            "ESFP" => Personality::Esfp,
            "UNKNOWN" => Personality::Unknown,
            _ => return None,
        };
        Some(personality)
    }

    pub fn policy(self) -> &'static PersonalityPolicy {
        policy_for(self)
    }
}

/// Ordering applied to the pool before the random pick
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    ByRating,
    ByPopularity,
    /// 0.5 x rating + 0.01 x popularity
    Blended,
}

/// Rating threshold, ordering and genre hints for one personality type
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalityPolicy {
    pub min_rating: f64,
    pub sort_key: SortKey,
    /// Genres that may replace the requested one
    pub alternate_genres: &'static [Genre],
}

const fn policy(
    min_rating: f64,
    sort_key: SortKey,
    alternate_genres: &'static [Genre],
) -> PersonalityPolicy {
    PersonalityPolicy {
        min_rating,
        sort_key,
        alternate_genres,
    }
}

static INTJ: PersonalityPolicy = policy(7.0, SortKey::ByRating, &[Genre::Scifi, Genre::Mystery]);
static INTP: PersonalityPolicy = policy(6.5, SortKey::ByRating, &[Genre::Scifi, Genre::Mystery]);
static ENTJ: PersonalityPolicy = policy(6.5, SortKey::Blended, &[Genre::Drama, Genre::Crime]);
static ENTP: PersonalityPolicy =
    policy(6.0, SortKey::ByPopularity, &[Genre::Comedy, Genre::Scifi]);
static INFJ: PersonalityPolicy = policy(7.0, SortKey::ByRating, &[Genre::Drama, Genre::Fantasy]);
static INFP: PersonalityPolicy = policy(6.5, SortKey::Blended, &[Genre::Fantasy, Genre::Romance]);
static ENFJ: PersonalityPolicy = policy(6.5, SortKey::Blended, &[Genre::Drama, Genre::Romance]);
static ENFP: PersonalityPolicy =
    policy(6.0, SortKey::ByPopularity, &[Genre::Adventure, Genre::Comedy]);
static ISTJ: PersonalityPolicy = policy(7.0, SortKey::ByRating, &[Genre::Crime, Genre::Drama]);
static ISFJ: PersonalityPolicy = policy(6.0, SortKey::Blended, &[Genre::Family, Genre::Drama]);
static ESTJ: PersonalityPolicy = policy(6.5, SortKey::ByRating, &[Genre::Action, Genre::Crime]);
static ESFJ: PersonalityPolicy =
    policy(6.0, SortKey::ByPopularity, &[Genre::Family, Genre::Romance]);
static ISTP: PersonalityPolicy = policy(6.0, SortKey::Blended, &[Genre::Action, Genre::Thriller]);
static ISFP: PersonalityPolicy = policy(6.5, SortKey::Blended, &[Genre::Romance, Genre::Fantasy]);
static ESTP: PersonalityPolicy =
    policy(5.5, SortKey::ByPopularity, &[Genre::Action, Genre::Adventure]);
static ESFP: PersonalityPolicy =
    policy(5.5, SortKey::ByPopularity, &[Genre::Comedy, Genre::Adventure]);
static UNKNOWN: PersonalityPolicy = policy(0.0, SortKey::ByPopularity, &[]);

/// Static personality lookup table
pub fn policy_for(personality: Personality) -> &'static PersonalityPolicy {
    match personality {
        Personality::Intj => &INTJ,
        Personality::Intp => &INTP,
        Personality::Entj => &ENTJ,
        Personality::Entp => &ENTP,
        Personality::Infj => &INFJ,
        Personality::Infp => &INFP,
        Personality::Enfj => &ENFJ,
        Personality::Enfp => &ENFP,
        Personality::Istj => &ISTJ,
        Personality::Isfj => &ISFJ,
        Personality::Estj => &ESTJ,
        Personality::Esfj => &ESFJ,
        Personality::Istp => &ISTP,
        Personality::Isfp => &ISFP,
        Personality::Estp => &ESTP,
        Personality::Esfp => &ESFP,
        Personality::Unknown => &UNKNOWN,
    }
}
