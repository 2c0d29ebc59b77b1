pub mod catalog;
pub mod filters;
pub mod providers;
pub mod random;
pub mod rate_limit;
pub mod recommendation;
pub mod resolver;
pub mod selector;

pub use catalog::CandidateSource;
pub use random::{RandomSource, SequenceRandom, ThreadRandom};
pub use rate_limit::{QuotaStatus, RateLimiter};
pub use recommendation::{RecommendationEngine, SelectionResult};
pub use resolver::{resolve_preferences, AnswerBag};
