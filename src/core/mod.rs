// Core algorithm exports
pub mod finder;
pub mod matcher;
pub mod matching;
pub mod scoring;

pub use finder::{EntityKind, MatchError, MatchFinder, DEFAULT_LIMIT};
pub use matcher::Matcher;
pub use matching::{count_expertise_matches, count_specialization_matches, specialization_serves, terms_overlap};
pub use scoring::{calculate_match_score, score_breakdown, ScoreBreakdown};
