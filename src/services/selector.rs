use std::cmp::Ordering;

use crate::{
    models::{AwardMode, Candidate, SortKey},
    services::random::RandomSource,
};

/// How many ranked candidates survive into the shortlist
pub const SHORTLIST_SIZE: usize = 20;
/// How many of the shortlist's leaders the random pick chooses from
pub const PICK_WINDOW: usize = 10;

const BLEND_RATING_WEIGHT: f64 = 0.5;
const BLEND_POPULARITY_WEIGHT: f64 = 0.01;

/// Final ordering of the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    /// Hidden gems: least popular first
    PopularityAscending,
    Descending(SortKey),
}

impl Ranking {
    /// Hidden-gems mode wins over the personality's own sort key
    pub fn for_request(award_mode: AwardMode, personality_key: SortKey) -> Self {
        if award_mode == AwardMode::LeastPopular {
            Ranking::PopularityAscending
        } else {
            Ranking::Descending(personality_key)
        }
    }
}

fn blended_score(candidate: &Candidate) -> f64 {
    BLEND_RATING_WEIGHT * candidate.rating() + BLEND_POPULARITY_WEIGHT * candidate.popularity
}

/// Stable sort, so ties keep catalog order
pub fn rank(mut pool: Vec<Candidate>, ranking: Ranking) -> Vec<Candidate> {
    let compare: fn(&Candidate, &Candidate) -> Ordering = match ranking {
        Ranking::PopularityAscending => |a, b| a.popularity.total_cmp(&b.popularity),
        Ranking::Descending(SortKey::ByPopularity) => {
            |a, b| b.popularity.total_cmp(&a.popularity)
        }
        Ranking::Descending(SortKey::ByRating) => |a, b| b.rating().total_cmp(&a.rating()),
        Ranking::Descending(SortKey::Blended) => {
            |a, b| blended_score(b).total_cmp(&blended_score(a))
        }
    };

    pool.sort_by(compare);
    pool
}

/// Keeps the top of a ranked pool and picks uniformly among its leaders
pub fn pick(ranked: &[Candidate], rng: &mut dyn RandomSource) -> Option<Candidate> {
    let shortlist = &ranked[..ranked.len().min(SHORTLIST_SIZE)];
    let window = shortlist.len().min(PICK_WINDOW);
    if window == 0 {
        return None;
    }

    shortlist.get(rng.index(window)).cloned()
}
