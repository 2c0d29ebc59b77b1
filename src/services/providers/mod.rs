/// Movie catalog provider abstraction
///
/// The recommendation pipeline only needs four read-only lookups from a catalog:
/// genre discovery, the popular list, the top-rated list and per-movie details.
/// Providers surface failures as errors; `CandidateSource` decides how they
/// degrade.
use crate::{
    error::AppResult,
    models::{Candidate, MovieDetails},
};

pub mod tmdb;

/// Trait for movie catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Movies in a genre, most popular first, adult content excluded
    async fn discover_by_genre(
        &self,
        genre_id: u32,
        language: &str,
        page: u32,
    ) -> AppResult<Vec<Candidate>>;

    /// Currently popular movies
    async fn popular(&self, language: &str, page: u32) -> AppResult<Vec<Candidate>>;

    /// Highest rated movies
    async fn top_rated(&self, language: &str, page: u32) -> AppResult<Vec<Candidate>>;

    /// Runtime and genre names for one movie
    async fn movie_details(&self, movie_id: u64, language: &str) -> AppResult<MovieDetails>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
