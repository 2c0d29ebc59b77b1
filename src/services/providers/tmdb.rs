/// TMDB (The Movie Database) v3 provider
///
/// API Flow:
/// 1. Candidates: /discover/movie, /movie/popular or /movie/top_rated → paged results
/// 2. Details: /movie/{id} → runtime and genre names for the chosen movie
use crate::{
    error::{AppError, AppResult},
    models::{Candidate, MovieDetails, TmdbMovieDetails, TmdbPage},
    services::providers::CatalogProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::instrument;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issues a GET against `path` with the API key attached
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {} for {}: {}",
                status, path, body
            )));
        }

        Ok(response.json().await?)
    }

    async fn get_page(&self, path: &str, query: &[(&str, String)]) -> AppResult<Vec<Candidate>> {
        let page: TmdbPage = self.get_json(path, query).await?;
        let candidates: Vec<Candidate> = page.results.into_iter().map(Candidate::from).collect();

        tracing::debug!(
            path = %path,
            results = candidates.len(),
            provider = "tmdb",
            "Catalog page fetched"
        );

        Ok(candidates)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    #[instrument(skip(self))]
    async fn discover_by_genre(
        &self,
        genre_id: u32,
        language: &str,
        page: u32,
    ) -> AppResult<Vec<Candidate>> {
        self.get_page(
            "/discover/movie",
            &[
                ("language", language.to_string()),
                ("with_genres", genre_id.to_string()),
                ("page", page.to_string()),
                ("include_adult", "false".to_string()),
                ("sort_by", "popularity.desc".to_string()),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn popular(&self, language: &str, page: u32) -> AppResult<Vec<Candidate>> {
        self.get_page(
            "/movie/popular",
            &[
                ("language", language.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn top_rated(&self, language: &str, page: u32) -> AppResult<Vec<Candidate>> {
        self.get_page(
            "/movie/top_rated",
            &[
                ("language", language.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn movie_details(&self, movie_id: u64, language: &str) -> AppResult<MovieDetails> {
        let details: TmdbMovieDetails = self
            .get_json(
                &format!("/movie/{}", movie_id),
                &[("language", language.to_string())],
            )
            .await?;

        Ok(details.into())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
