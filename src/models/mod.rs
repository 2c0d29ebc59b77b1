use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod personality;
pub mod preferences;

pub use personality::{policy_for, Personality, PersonalityPolicy, SortKey};
pub use preferences::{
    AwardMode, Era, Format, Genre, Language, Preferences, ANIMATION_GENRE_ID,
};

const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/500x750?text=No+Poster";
const NO_DESCRIPTION: &str = "No description available.";
const UNKNOWN: &str = "unknown";
const DEFAULT_RUNTIME_MINUTES: u32 = 120;

/// A catalog movie considered for recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub id: u64,
    pub title: String,
    pub original_title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Average vote, 0-10
    pub vote_average: Option<f64>,
    pub popularity: f64,
    pub genre_ids: Vec<u32>,
}

impl Candidate {
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|date| date.year())
    }

    /// Rating with a missing vote treated as zero
    pub fn rating(&self) -> f64 {
        self.vote_average.unwrap_or(0.0)
    }

    pub fn is_animation(&self) -> bool {
        self.genre_ids.contains(&ANIMATION_GENRE_ID)
    }

    pub fn has_genre(&self, genre: Genre) -> bool {
        self.genre_ids.contains(&genre.tmdb_id())
    }
}

/// Extended record fetched for the chosen movie
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
}

/// Soft constraint dropped while building the pool, in the order it happened
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RelaxationNotice {
    Era,
    Personality,
    PersonalityGenre,
    Award,
    Emergency,
    Recovered,
}

impl Display for RelaxationNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            RelaxationNotice::Era => "era",
            RelaxationNotice::Personality => "personality",
            RelaxationNotice::PersonalityGenre => "personality-genre",
            RelaxationNotice::Award => "award",
            RelaxationNotice::Emergency => "emergency",
            RelaxationNotice::Recovered => "recovered",
        };
        write!(f, "{}", tag)
    }
}

/// Release year, or a marker when the catalog has no date
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ReleaseYear {
    Known(i32),
    Unknown(&'static str),
}

/// Flat recommendation returned to the client
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub title: String,
    pub poster: String,
    pub desc: String,
    pub year: ReleaseYear,
    pub rating: String,
    pub runtime: u32,
    pub genres: String,
    pub tmdb_id: u64,
    pub fallback_log: Vec<RelaxationNotice>,
    pub remaining_count: u32,
}

impl MovieResponse {
    /// Builds the client payload; missing details fall back to placeholders
    pub fn build(
        movie: &Candidate,
        details: Option<&MovieDetails>,
        image_base_url: &str,
        fallback_log: Vec<RelaxationNotice>,
        remaining_count: u32,
    ) -> Self {
        let title = if movie.title.is_empty() {
            movie.original_title.clone()
        } else {
            movie.title.clone()
        };

        let poster = match movie.poster_path.as_deref() {
            Some(path) if !path.is_empty() => format!("{}{}", image_base_url, path),
            _ => POSTER_PLACEHOLDER.to_string(),
        };

        let desc = match movie.overview.as_deref() {
            Some(overview) if !overview.is_empty() => overview.to_string(),
            _ => NO_DESCRIPTION.to_string(),
        };

        let year = movie
            .release_year()
            .map(ReleaseYear::Known)
            .unwrap_or(ReleaseYear::Unknown(UNKNOWN));

        // TMDB reports 0 for titles without votes
        let rating = match movie.vote_average {
            Some(vote) if vote > 0.0 => format!("{:.1}", vote),
            _ => "N/A".to_string(),
        };

        let runtime = details
            .and_then(|d| d.runtime)
            .filter(|minutes| *minutes > 0)
            .unwrap_or(DEFAULT_RUNTIME_MINUTES);

        let genres = match details {
            Some(d) if !d.genres.is_empty() => d.genres.join(" / "),
            _ => UNKNOWN.to_string(),
        };

        Self {
            title,
            poster,
            desc,
            year,
            rating,
            runtime,
            genres,
            tmdb_id: movie.id,
            fallback_log,
            remaining_count,
        }
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Paged list response shared by discover, popular and top_rated
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

/// Raw movie entry from a TMDB list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl From<TmdbMovie> for Candidate {
    fn from(movie: TmdbMovie) -> Self {
        // TMDB sends "" for unknown release dates
        let release_date = movie
            .release_date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());

        let original_title = movie.original_title.unwrap_or_default();
        let title = movie
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| original_title.clone());

        Candidate {
            id: movie.id,
            title,
            original_title,
            overview: movie.overview,
            poster_path: movie.poster_path,
            release_date,
            vote_average: movie.vote_average,
            popularity: movie.popularity.unwrap_or(0.0).max(0.0),
            genre_ids: movie.genre_ids,
        }
    }
}

/// TMDB GET /movie/{id} response
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}

impl From<TmdbMovieDetails> for MovieDetails {
    fn from(details: TmdbMovieDetails) -> Self {
        MovieDetails {
            runtime: details.runtime,
            genres: details.genres.into_iter().map(|g| g.name).collect(),
        }
    }
}
