//! Mentor Match - matchmaking engine for the startup incubator platform
//!
//! Ranks mentors for a startup (and startups for a mentor) by a weighted
//! compatibility score built from industry, expertise, specialization,
//! availability, rating and capacity signals.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_match_score, MatchError, MatchFinder, Matcher};
pub use models::{Mentor, ScoredMatch, ScoringWeights, Startup};
pub use services::{Directory, DirectoryError, InMemoryDirectory};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let score = calculate_match_score(
            &Startup::default(),
            &Mentor::default(),
            &ScoringWeights::default(),
        );
        assert_eq!(score, 0);
    }
}
