use crate::{
    error::AppResult,
    models::{AwardMode, Candidate, Era, Genre, Preferences, RelaxationNotice},
    services::{
        catalog::CandidateSource,
        filters,
        random::RandomSource,
        selector::{self, Ranking},
    },
};

/// Smallest pool a soft filter may leave behind
pub const MIN_VIABLE: usize = 3;
/// Catalog pages are drawn from 1..=MAX_PAGE
pub const MAX_PAGE: usize = 3;
const EMERGENCY_PAGE: u32 = 1;

/// Outcome of one recommendation run
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResult {
    pub candidate: Option<Candidate>,
    /// Dropped constraints, oldest first
    pub notices: Vec<RelaxationNotice>,
    /// Ranked pool the candidate was drawn from
    pub ranked: Vec<Candidate>,
}

/// Append-only record of relaxations; each notice appears at most once
#[derive(Debug, Default)]
struct NoticeLog(Vec<RelaxationNotice>);

impl NoticeLog {
    fn record(&mut self, notice: RelaxationNotice) {
        if !self.0.contains(&notice) {
            tracing::debug!(notice = %notice, "Constraint relaxed");
            self.0.push(notice);
        }
    }
}

/// Keeps `filtered` when it is still viable, otherwise keeps `pool` and records `notice`
fn keep_or_relax(
    pool: Vec<Candidate>,
    filtered: Vec<Candidate>,
    notice: RelaxationNotice,
    notices: &mut NoticeLog,
) -> Vec<Candidate> {
    if filtered.len() >= MIN_VIABLE {
        filtered
    } else {
        notices.record(notice);
        pool
    }
}

/// Concatenates `boosted` ahead of `base`, keeping the first copy of each id
fn prepend_boosted(boosted: Vec<Candidate>, base: Vec<Candidate>) -> Vec<Candidate> {
    let mut merged: Vec<Candidate> = Vec::with_capacity(boosted.len() + base.len());
    for candidate in boosted.into_iter().chain(base) {
        if !merged.iter().any(|c| c.id == candidate.id) {
            merged.push(candidate);
        }
    }
    merged
}

/// Picks one movie for a set of quiz preferences
///
/// Hard constraints (genre, language, format) shape the pool; soft ones (era,
/// personality rating, award boost) are dropped in that order whenever they
/// would leave fewer than `MIN_VIABLE` candidates. An empty pool, or a fault
/// while building it, falls through to the popular list.
#[derive(Clone)]
pub struct RecommendationEngine {
    source: CandidateSource,
}

impl RecommendationEngine {
    pub fn new(source: CandidateSource) -> Self {
        Self { source }
    }

    pub async fn recommend(
        &self,
        prefs: &Preferences,
        rng: &mut dyn RandomSource,
    ) -> SelectionResult {
        let mut notices = NoticeLog::default();
        let page = rng.index(MAX_PAGE) as u32 + 1;
        let ranking = Ranking::for_request(prefs.award_mode, prefs.personality.policy().sort_key);

        let built = self.build_pool(prefs, page, rng, &mut notices).await;
        match built {
            Ok(pool) if !pool.is_empty() => {
                let ranked = selector::rank(pool, ranking);
                let candidate = selector::pick(&ranked, rng);

                tracing::info!(
                    genre = ?prefs.genre,
                    page,
                    pool = ranked.len(),
                    relaxed = notices.0.len(),
                    movie_id = candidate.as_ref().map(|c| c.id),
                    "Recommendation selected"
                );

                return SelectionResult {
                    candidate,
                    notices: notices.0,
                    ranked,
                };
            }
            Ok(_) => {
                tracing::info!(genre = ?prefs.genre, "Pool empty after relaxation");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Candidate pipeline failed, using fallback");
                notices.record(RelaxationNotice::Recovered);
            }
        }

        self.emergency_fallback(prefs, ranking, rng, notices).await
    }

    /// Personality-suggested genre, taken on an even coin flip
    fn substitute_genre(&self, prefs: &Preferences, rng: &mut dyn RandomSource) -> Option<Genre> {
        let alternates = prefs.personality.policy().alternate_genres;
        if alternates.is_empty() || !rng.coin_flip() {
            return None;
        }

        let alternate = alternates[rng.index(alternates.len())];
        (alternate != prefs.genre).then_some(alternate)
    }

    async fn build_pool(
        &self,
        prefs: &Preferences,
        page: u32,
        rng: &mut dyn RandomSource,
        notices: &mut NoticeLog,
    ) -> AppResult<Vec<Candidate>> {
        let min_rating = prefs.personality.policy().min_rating;
        let mut substitute = self.substitute_genre(prefs, rng);

        loop {
            let genre = substitute.unwrap_or(prefs.genre);
            let base = self.source.by_genre(genre, prefs.language, page).await;
            let mut pool = filters::by_format(&base, prefs.format);

            if prefs.award_mode.is_boost() {
                let boosted = match prefs.award_mode {
                    AwardMode::TopRated => self.source.top_rated(prefs.language, page).await,
                    _ => self.source.popular(prefs.language, page).await,
                };
                let boosted = filters::by_genre(&filters::by_format(&boosted, prefs.format), genre);
                pool = prepend_boosted(boosted, pool);
            }

            if prefs.era != Era::Any {
                let filtered = filters::by_era(&pool, prefs.era);
                pool = keep_or_relax(pool, filtered, RelaxationNotice::Era, notices);
            }

            if min_rating > 0.0 {
                let filtered = filters::by_min_rating(&pool, min_rating)?;
                pool = keep_or_relax(pool, filtered, RelaxationNotice::Personality, notices);
            }

            if pool.len() < MIN_VIABLE {
                if let Some(dropped) = substitute.take() {
                    tracing::debug!(
                        substitute = ?dropped,
                        requested = ?prefs.genre,
                        pool = pool.len(),
                        "Retrying with requested genre"
                    );
                    notices.record(RelaxationNotice::PersonalityGenre);
                    continue;
                }
            }

            if prefs.award_mode.is_boost() && pool.len() < MIN_VIABLE {
                notices.record(RelaxationNotice::Award);
            }

            return Ok(pool);
        }
    }

    /// Last resort: popular list, format filter, then genre filter when it leaves
    /// anything, then the first unfiltered entry
    async fn emergency_fallback(
        &self,
        prefs: &Preferences,
        ranking: Ranking,
        rng: &mut dyn RandomSource,
        mut notices: NoticeLog,
    ) -> SelectionResult {
        notices.record(RelaxationNotice::Emergency);

        let popular = self.source.popular(prefs.language, EMERGENCY_PAGE).await;
        let formatted = filters::by_format(&popular, prefs.format);

        let (candidate, ranked) = if formatted.is_empty() {
            let first = popular.into_iter().next();
            let ranked: Vec<Candidate> = first.iter().cloned().collect();
            (first, ranked)
        } else {
            let in_genre = filters::by_genre(&formatted, prefs.genre);
            let pool = if in_genre.is_empty() { formatted } else { in_genre };
            let ranked = selector::rank(pool, ranking);
            (selector::pick(&ranked, rng), ranked)
        };

        match &candidate {
            Some(movie) => tracing::info!(movie_id = movie.id, "Fallback recommendation selected"),
            None => tracing::warn!(genre = ?prefs.genre, "No candidate found"),
        }

        SelectionResult {
            candidate,
            notices: notices.0,
            ranked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Format, MovieDetails, Personality},
        services::{
            providers::{CatalogProvider, MockCatalogProvider},
            random::SequenceRandom,
        },
    };
    use chrono::NaiveDate;
    use std::{collections::HashMap, sync::Arc, time::Duration};

    const HORROR: u32 = 27;
    const COMEDY: u32 = 35;
    const SCIFI: u32 = 878;
    const ANIMATION: u32 = 16;

    #[derive(Default)]
    struct FakeCatalog {
        by_genre: HashMap<u32, Vec<Candidate>>,
        popular: Vec<Candidate>,
        top_rated: Vec<Candidate>,
    }

    #[async_trait::async_trait]
    impl CatalogProvider for FakeCatalog {
        async fn discover_by_genre(&self, genre_id: u32, _: &str, _: u32) -> AppResult<Vec<Candidate>> {
            Ok(self.by_genre.get(&genre_id).cloned().unwrap_or_default())
        }

        async fn popular(&self, _: &str, _: u32) -> AppResult<Vec<Candidate>> {
            Ok(self.popular.clone())
        }

        async fn top_rated(&self, _: &str, _: u32) -> AppResult<Vec<Candidate>> {
            Ok(self.top_rated.clone())
        }

        async fn movie_details(&self, _: u64, _: &str) -> AppResult<MovieDetails> {
            Ok(MovieDetails::default())
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    fn movie(id: u64, genre_ids: Vec<u32>, year: i32, rating: f64, popularity: f64) -> Candidate {
        Candidate {
            id,
            title: format!("Movie {}", id),
            original_title: format!("Movie {}", id),
            overview: Some("Overview".to_string()),
            poster_path: None,
            release_date: NaiveDate::from_ymd_opt(year, 1, 15),
            vote_average: Some(rating),
            popularity,
            genre_ids,
        }
    }

    fn engine(catalog: impl CatalogProvider + 'static) -> RecommendationEngine {
        RecommendationEngine::new(CandidateSource::new(
            Arc::new(catalog),
            Duration::from_secs(1),
        ))
    }

    fn prefs(genre: Genre) -> Preferences {
        Preferences {
            genre,
            ..Preferences::default()
        }
    }

    fn ids(pool: &[Candidate]) -> Vec<u64> {
        let mut ids: Vec<u64> = pool.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids
    }

    /// Never substitutes a genre and always takes the top-ranked candidate
    fn first_choice() -> SequenceRandom {
        SequenceRandom::new(vec![0])
    }

    /// Page 1, substitutes the first alternate genre, then takes the top candidate
    fn substituting() -> SequenceRandom {
        SequenceRandom::new(vec![0, 1, 0])
    }

    #[tokio::test]
    async fn test_personality_threshold_narrows_pool() {
        let horror: Vec<Candidate> = (1..=10)
            .map(|id| {
                let rating = if id <= 4 { 7.0 + id as f64 * 0.2 } else { 5.5 };
                movie(id, vec![HORROR], 2015, rating, 100.0 - id as f64)
            })
            .collect();
        let catalog = FakeCatalog {
            by_genre: HashMap::from([(HORROR, horror)]),
            ..Default::default()
        };
        let prefs = Preferences {
            personality: Personality::Intj,
            ..prefs(Genre::Horror)
        };

        let result = engine(catalog).recommend(&prefs, &mut first_choice()).await;

        assert_eq!(ids(&result.ranked), vec![1, 2, 3, 4]);
        assert!(result.notices.is_empty());
        // INTJ ranks by rating, so the 7.8 title leads
        assert_eq!(result.candidate.unwrap().id, 4);
    }

    #[tokio::test]
    async fn test_era_relaxed_when_no_title_matches() {
        let comedies: Vec<Candidate> = (1..=15)
            .map(|id| movie(id, vec![COMEDY], 2000 + id as i32, 6.0, id as f64))
            .collect();
        let catalog = FakeCatalog {
            by_genre: HashMap::from([(COMEDY, comedies)]),
            ..Default::default()
        };
        let prefs = Preferences {
            era: Era::Nineties,
            ..prefs(Genre::Comedy)
        };

        let result = engine(catalog).recommend(&prefs, &mut first_choice()).await;

        assert_eq!(result.notices, vec![RelaxationNotice::Era]);
        assert_eq!(result.ranked.len(), 15);
        assert!(result.candidate.is_some());
    }

    #[tokio::test]
    async fn test_era_relaxed_when_filter_leaves_too_few() {
        let catalog = FakeCatalog {
            by_genre: HashMap::from([(
                HORROR,
                vec![
                    movie(1, vec![HORROR], 1995, 6.0, 10.0),
                    movie(2, vec![HORROR], 2012, 6.0, 20.0),
                    movie(3, vec![HORROR], 2018, 6.0, 30.0),
                    movie(4, vec![HORROR], 2021, 6.0, 40.0),
                ],
            )]),
            ..Default::default()
        };
        let prefs = Preferences {
            era: Era::Nineties,
            ..prefs(Genre::Horror)
        };

        let result = engine(catalog).recommend(&prefs, &mut first_choice()).await;

        assert_eq!(result.notices, vec![RelaxationNotice::Era]);
        assert_eq!(ids(&result.ranked), vec![1, 2, 3, 4]);
        assert_eq!(result.candidate.unwrap().id, 4);
    }

    #[tokio::test]
    async fn test_era_noted_on_small_pool_even_when_all_match() {
        let catalog = FakeCatalog {
            by_genre: HashMap::from([(
                HORROR,
                vec![
                    movie(1, vec![HORROR], 1995, 6.0, 10.0),
                    movie(2, vec![HORROR], 1995, 6.0, 20.0),
                ],
            )]),
            ..Default::default()
        };
        let prefs = Preferences {
            era: Era::Nineties,
            ..prefs(Genre::Horror)
        };

        let result = engine(catalog).recommend(&prefs, &mut first_choice()).await;

        assert_eq!(result.notices, vec![RelaxationNotice::Era]);
        assert_eq!(ids(&result.ranked), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_era_noted_before_emergency_on_empty_pool() {
        let prefs = Preferences {
            era: Era::Nineties,
            ..prefs(Genre::Horror)
        };

        let result = engine(FakeCatalog::default())
            .recommend(&prefs, &mut first_choice())
            .await;

        assert!(result.candidate.is_none());
        assert_eq!(
            result.notices,
            vec![RelaxationNotice::Era, RelaxationNotice::Emergency]
        );
    }

    #[tokio::test]
    async fn test_era_kept_when_viable() {
        let catalog = FakeCatalog {
            by_genre: HashMap::from([(
                HORROR,
                vec![
                    movie(1, vec![HORROR], 2011, 6.0, 10.0),
                    movie(2, vec![HORROR], 2012, 6.0, 20.0),
                    movie(3, vec![HORROR], 2013, 6.0, 30.0),
                    movie(4, vec![HORROR], 2021, 6.0, 40.0),
                ],
            )]),
            ..Default::default()
        };
        let prefs = Preferences {
            era: Era::TwentyTens,
            ..prefs(Genre::Horror)
        };

        let result = engine(catalog).recommend(&prefs, &mut first_choice()).await;

        assert!(result.notices.is_empty());
        assert_eq!(ids(&result.ranked), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_personality_relaxed_after_era() {
        let catalog = FakeCatalog {
            by_genre: HashMap::from([(
                HORROR,
                vec![
                    movie(1, vec![HORROR], 1990, 8.0, 10.0),
                    movie(2, vec![HORROR], 2012, 6.0, 20.0),
                    movie(3, vec![HORROR], 2014, 6.0, 30.0),
                    movie(4, vec![HORROR], 2016, 5.0, 40.0),
                ],
            )]),
            ..Default::default()
        };
        let prefs = Preferences {
            era: Era::Nineties,
            personality: Personality::Intj,
            ..prefs(Genre::Horror)
        };

        let result = engine(catalog).recommend(&prefs, &mut first_choice()).await;

        assert_eq!(
            result.notices,
            vec![RelaxationNotice::Era, RelaxationNotice::Personality]
        );
        assert_eq!(result.ranked.len(), 4);
    }

    #[tokio::test]
    async fn test_personality_genre_dropped_when_substitute_is_sparse() {
        let catalog = FakeCatalog {
            by_genre: HashMap::from([
                (SCIFI, vec![movie(90, vec![SCIFI], 2010, 8.5, 50.0)]),
                (
                    HORROR,
                    (1..=5)
                        .map(|id| movie(id, vec![HORROR], 2010, 8.0, id as f64))
                        .collect(),
                ),
            ]),
            ..Default::default()
        };
        let prefs = Preferences {
            personality: Personality::Intj,
            ..prefs(Genre::Horror)
        };

        let result = engine(catalog).recommend(&prefs, &mut substituting()).await;

        assert_eq!(
            result.notices,
            vec![RelaxationNotice::Personality, RelaxationNotice::PersonalityGenre]
        );
        assert_eq!(ids(&result.ranked), vec![1, 2, 3, 4, 5]);
        assert!(result.candidate.unwrap().has_genre(Genre::Horror));
    }

    #[tokio::test]
    async fn test_personality_genre_kept_when_substitute_is_viable() {
        let catalog = FakeCatalog {
            by_genre: HashMap::from([(
                SCIFI,
                (1..=4)
                    .map(|id| movie(id, vec![SCIFI], 2010, 8.0, id as f64))
                    .collect(),
            )]),
            ..Default::default()
        };
        let prefs = Preferences {
            personality: Personality::Intj,
            ..prefs(Genre::Horror)
        };

        let result = engine(catalog).recommend(&prefs, &mut substituting()).await;

        assert!(result.notices.is_empty());
        assert!(result.candidate.unwrap().has_genre(Genre::Scifi));
    }

    #[tokio::test]
    async fn test_boosted_list_prepended_in_genre_and_deduplicated() {
        let catalog = FakeCatalog {
            by_genre: HashMap::from([(
                HORROR,
                vec![
                    movie(100, vec![HORROR], 2010, 7.0, 5.0),
                    movie(1, vec![HORROR], 2010, 7.0, 4.0),
                    movie(2, vec![HORROR], 2010, 7.0, 3.0),
                ],
            )]),
            popular: vec![
                movie(100, vec![HORROR], 2010, 7.0, 5.0),
                movie(200, vec![COMEDY], 2010, 7.0, 900.0),
                movie(300, vec![HORROR, 53], 2010, 7.0, 800.0),
            ],
            ..Default::default()
        };
        let prefs = Preferences {
            award_mode: AwardMode::MostPopular,
            ..prefs(Genre::Horror)
        };

        let result = engine(catalog).recommend(&prefs, &mut first_choice()).await;

        assert!(result.notices.is_empty());
        assert_eq!(ids(&result.ranked), vec![1, 2, 100, 300]);
        assert_eq!(result.candidate.unwrap().id, 300);
    }

    #[tokio::test]
    async fn test_award_noted_when_pool_stays_small() {
        let catalog = FakeCatalog {
            by_genre: HashMap::from([(
                HORROR,
                vec![
                    movie(1, vec![HORROR], 2010, 7.0, 4.0),
                    movie(2, vec![HORROR], 2010, 7.0, 3.0),
                ],
            )]),
            top_rated: vec![movie(500, vec![18], 1994, 8.7, 90.0)],
            ..Default::default()
        };
        let prefs = Preferences {
            award_mode: AwardMode::TopRated,
            ..prefs(Genre::Horror)
        };

        let result = engine(catalog).recommend(&prefs, &mut first_choice()).await;

        assert_eq!(result.notices, vec![RelaxationNotice::Award]);
        assert_eq!(ids(&result.ranked), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_format_never_violated() {
        let catalog = FakeCatalog {
            by_genre: HashMap::from([(
                HORROR,
                vec![
                    movie(1, vec![HORROR, ANIMATION], 2010, 7.0, 900.0),
                    movie(2, vec![HORROR], 2010, 7.0, 3.0),
                    movie(3, vec![HORROR], 2011, 7.0, 2.0),
                    movie(4, vec![HORROR], 2012, 7.0, 1.0),
                ],
            )]),
            ..Default::default()
        };

        let live = Preferences {
            format: Format::LiveAction,
            ..prefs(Genre::Horror)
        };
        let result = engine(catalog).recommend(&live, &mut first_choice()).await;

        assert!(result.ranked.iter().all(|c| !c.is_animation()));
        assert_eq!(result.candidate.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_hidden_gems_ranked_by_ascending_popularity() {
        let catalog = FakeCatalog {
            by_genre: HashMap::from([(
                HORROR,
                vec![
                    movie(1, vec![HORROR], 2010, 9.0, 300.0),
                    movie(2, vec![HORROR], 2010, 7.0, 3.0),
                    movie(3, vec![HORROR], 2011, 8.0, 40.0),
                    movie(4, vec![HORROR], 2012, 6.0, 0.5),
                ],
            )]),
            ..Default::default()
        };
        let prefs = Preferences {
            award_mode: AwardMode::LeastPopular,
            personality: Personality::Intj,
            ..prefs(Genre::Horror)
        };

        let result = engine(catalog).recommend(&prefs, &mut first_choice()).await;

        assert!(result
            .ranked
            .windows(2)
            .all(|pair| pair[0].popularity <= pair[1].popularity));
    }

    #[tokio::test]
    async fn test_emergency_prefers_format_then_genre() {
        let catalog = FakeCatalog {
            popular: vec![
                movie(1, vec![COMEDY], 2020, 7.0, 500.0),
                movie(2, vec![HORROR, ANIMATION], 2020, 7.0, 400.0),
                movie(3, vec![HORROR], 2020, 7.0, 300.0),
            ],
            ..Default::default()
        };
        let prefs = Preferences {
            format: Format::LiveAction,
            ..prefs(Genre::Horror)
        };

        let result = engine(catalog).recommend(&prefs, &mut first_choice()).await;

        assert_eq!(result.notices, vec![RelaxationNotice::Emergency]);
        assert_eq!(result.candidate.unwrap().id, 3);
    }

    #[tokio::test]
    async fn test_emergency_drops_genre_when_nothing_matches() {
        let catalog = FakeCatalog {
            popular: vec![
                movie(1, vec![COMEDY], 2020, 7.0, 100.0),
                movie(2, vec![18], 2020, 7.0, 400.0),
            ],
            ..Default::default()
        };

        let result = engine(catalog)
            .recommend(&prefs(Genre::Horror), &mut first_choice())
            .await;

        assert_eq!(result.candidate.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_emergency_takes_first_unfiltered_when_format_empties() {
        let catalog = FakeCatalog {
            popular: vec![
                movie(7, vec![ANIMATION], 2020, 7.0, 100.0),
                movie(8, vec![ANIMATION, HORROR], 2020, 7.0, 400.0),
            ],
            ..Default::default()
        };
        let prefs = Preferences {
            format: Format::LiveAction,
            ..prefs(Genre::Horror)
        };

        let result = engine(catalog).recommend(&prefs, &mut first_choice()).await;

        assert_eq!(result.notices, vec![RelaxationNotice::Emergency]);
        assert_eq!(result.candidate.unwrap().id, 7);
    }

    #[tokio::test]
    async fn test_malformed_rating_recovers_through_fallback() {
        let catalog = FakeCatalog {
            by_genre: HashMap::from([(
                HORROR,
                vec![
                    movie(1, vec![HORROR], 2010, 42.0, 10.0),
                    movie(2, vec![HORROR], 2010, 7.5, 20.0),
                    movie(3, vec![HORROR], 2010, 7.5, 30.0),
                ],
            )]),
            popular: vec![movie(9, vec![HORROR], 2020, 7.0, 100.0)],
            ..Default::default()
        };
        let prefs = Preferences {
            personality: Personality::Intj,
            ..prefs(Genre::Horror)
        };

        let result = engine(catalog).recommend(&prefs, &mut first_choice()).await;

        assert_eq!(
            result.notices,
            vec![RelaxationNotice::Recovered, RelaxationNotice::Emergency]
        );
        assert_eq!(result.candidate.unwrap().id, 9);
    }

    #[tokio::test]
    async fn test_all_fetches_empty_yields_no_candidate() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_discover_by_genre()
            .withf(|genre_id, _, page| *genre_id == HORROR && *page == 1)
            .times(1)
            .returning(|_, _, _| Ok(Vec::new()));
        provider
            .expect_popular()
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let result = engine(provider)
            .recommend(&prefs(Genre::Horror), &mut first_choice())
            .await;

        assert!(result.candidate.is_none());
        assert!(result.ranked.is_empty());
        assert_eq!(result.notices, vec![RelaxationNotice::Emergency]);
    }

    #[tokio::test]
    async fn test_failing_catalog_terminates_after_single_restart() {
        let mut provider = MockCatalogProvider::new();
        let mut seq = mockall::Sequence::new();
        provider
            .expect_discover_by_genre()
            .withf(|genre_id, _, _| *genre_id == SCIFI)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Err(crate::error::AppError::ExternalApi("down".to_string())));
        provider
            .expect_discover_by_genre()
            .withf(|genre_id, _, _| *genre_id == HORROR)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Err(crate::error::AppError::ExternalApi("down".to_string())));
        provider
            .expect_top_rated()
            .times(2)
            .returning(|_, _| Err(crate::error::AppError::ExternalApi("down".to_string())));
        provider
            .expect_popular()
            .times(1)
            .returning(|_, _| Err(crate::error::AppError::ExternalApi("down".to_string())));
        provider.expect_name().return_const("mock");

        let prefs = Preferences {
            personality: Personality::Intj,
            award_mode: AwardMode::TopRated,
            ..prefs(Genre::Horror)
        };

        let result = engine(provider).recommend(&prefs, &mut substituting()).await;

        assert!(result.candidate.is_none());
        assert_eq!(
            result.notices,
            vec![
                RelaxationNotice::Personality,
                RelaxationNotice::PersonalityGenre,
                RelaxationNotice::Award,
                RelaxationNotice::Emergency
            ]
        );
    }

    #[test]
    fn test_prepend_boosted_keeps_first_occurrence() {
        let boosted = vec![movie(3, vec![], 2010, 7.0, 1.0), movie(1, vec![], 2010, 7.0, 1.0)];
        let base = vec![movie(1, vec![], 2010, 7.0, 1.0), movie(2, vec![], 2010, 7.0, 1.0)];

        let merged: Vec<u64> = prepend_boosted(boosted, base).iter().map(|c| c.id).collect();
        assert_eq!(merged, vec![3, 1, 2]);
    }
}
