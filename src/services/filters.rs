//! Constraint filters over a candidate pool.
//!
//! Each filter is stateless and leaves its input untouched so the relaxation
//! engine can throw the result away and keep the previous pool.

use crate::{
    error::{AppError, AppResult},
    models::{Candidate, Era, Format, Genre},
};

/// Hard format constraint. Candidates without genre data count as live action.
pub fn by_format(pool: &[Candidate], format: Format) -> Vec<Candidate> {
    pool.iter()
        .filter(|candidate| match format {
            Format::Any => true,
            Format::Animation => candidate.is_animation(),
            Format::LiveAction => !candidate.is_animation(),
        })
        .cloned()
        .collect()
}

/// Release year inside the era bucket. Undated candidates never match a specific era.
pub fn by_era(pool: &[Candidate], era: Era) -> Vec<Candidate> {
    if era == Era::Any {
        return pool.to_vec();
    }

    pool.iter()
        .filter(|candidate| {
            candidate
                .release_year()
                .is_some_and(|year| era.contains(year))
        })
        .cloned()
        .collect()
}

/// Rating at or above `min_rating`, a missing rating counting as zero.
///
/// Fails on a rating that is not a finite 0-10 value.
pub fn by_min_rating(pool: &[Candidate], min_rating: f64) -> AppResult<Vec<Candidate>> {
    let mut kept = Vec::with_capacity(pool.len());

    for candidate in pool {
        let rating = candidate.rating();
        if !rating.is_finite() || !(0.0..=10.0).contains(&rating) {
            return Err(AppError::Internal(format!(
                "Candidate {} has malformed rating {}",
                candidate.id, rating
            )));
        }
        if rating >= min_rating {
            kept.push(candidate.clone());
        }
    }

    Ok(kept)
}

/// Candidates tagged with `genre`
pub fn by_genre(pool: &[Candidate], genre: Genre) -> Vec<Candidate> {
    pool.iter()
        .filter(|candidate| candidate.has_genre(genre))
        .cloned()
        .collect()
}
