use std::{future::Future, sync::Arc, time::Duration};

use crate::{
    error::AppResult,
    models::{Candidate, Genre, Language, MovieDetails},
    services::providers::CatalogProvider,
};

/// Failure-tolerant front for a catalog provider
///
/// Every lookup is bounded by `timeout`. Transport errors, non-success statuses
/// and timeouts are logged and come back as an empty list or `None`, so the
/// selection pipeline only ever sees "nothing found".
#[derive(Clone)]
pub struct CandidateSource {
    provider: Arc<dyn CatalogProvider>,
    timeout: Duration,
}

impl CandidateSource {
    pub fn new(provider: Arc<dyn CatalogProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub async fn by_genre(&self, genre: Genre, language: Language, page: u32) -> Vec<Candidate> {
        self.guarded(
            "discover_by_genre",
            self.provider
                .discover_by_genre(genre.tmdb_id(), language.code(), page),
        )
        .await
        .unwrap_or_default()
    }

    pub async fn popular(&self, language: Language, page: u32) -> Vec<Candidate> {
        self.guarded("popular", self.provider.popular(language.code(), page))
            .await
            .unwrap_or_default()
    }

    pub async fn top_rated(&self, language: Language, page: u32) -> Vec<Candidate> {
        self.guarded("top_rated", self.provider.top_rated(language.code(), page))
            .await
            .unwrap_or_default()
    }

    pub async fn details(&self, movie_id: u64, language: Language) -> Option<MovieDetails> {
        self.guarded(
            "movie_details",
            self.provider.movie_details(movie_id, language.code()),
        )
        .await
    }

    async fn guarded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = AppResult<T>>,
    ) -> Option<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    operation,
                    error = %e,
                    "Catalog request failed"
                );
                None
            }
            Err(_) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Catalog request timed out"
                );
                None
            }
        }
    }
}
