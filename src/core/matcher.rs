use crate::models::{Mentor, ScoredMatch, ScoringWeights, Startup};
use crate::core::scoring::{calculate_match_score, score_breakdown};

/// Scores a candidate pool against an anchor entity and keeps the best
///
/// # Pipeline Stages
/// 1. Score every candidate against the anchor
/// 2. Stable sort by score (descending)
/// 3. Truncate to the requested limit
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank mentors for a startup
    ///
    /// # Arguments
    /// * `startup` - The anchor startup
    /// * `mentors` - Candidate pool, in directory fetch order
    /// * `limit` - Maximum number of matches to return
    pub fn rank_mentors(
        &self,
        startup: &Startup,
        mentors: Vec<Mentor>,
        limit: usize,
    ) -> Vec<ScoredMatch<Mentor>> {
        rank(mentors, limit, |mentor| {
            let breakdown = score_breakdown(startup, mentor, &self.weights);
            tracing::trace!("Breakdown {} -> {}: {:?}", startup.id, mentor.id, breakdown);
            breakdown.score()
        })
    }

    /// Rank startups for a mentor
    pub fn rank_startups(
        &self,
        mentor: &Mentor,
        startups: Vec<Startup>,
        limit: usize,
    ) -> Vec<ScoredMatch<Startup>> {
        rank(startups, limit, |startup| {
            calculate_match_score(startup, mentor, &self.weights)
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Score, sort and truncate a pool
///
/// `sort_by` is stable, so candidates with equal scores keep their pool order.
fn rank<T, F>(candidates: Vec<T>, limit: usize, score: F) -> Vec<ScoredMatch<T>>
where
    F: Fn(&T) -> u8,
{
    let mut scored: Vec<ScoredMatch<T>> = candidates
        .into_iter()
        .map(|candidate| {
            let score = score(&candidate);
            ScoredMatch { candidate, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, AvailabilityStatus, Industry, Need, Specialization};

    fn create_mentor(id: &str, industries: Vec<Industry>, status: Option<AvailabilityStatus>) -> Mentor {
        Mentor {
            id: id.to_string(),
            industries,
            availability: status.map(|s| Availability {
                status: Some(s),
                hours_per_week: Some(5.0),
            }),
            mentees: Some(vec![]),
            is_active: true,
            ..Default::default()
        }
    }

    fn create_startup() -> Startup {
        Startup {
            id: "startup".to_string(),
            name: "Greenfield".to_string(),
            industry: Some(Industry::CleanTech),
            tags: vec!["solar".to_string()],
            looking_for: vec![Need::Funding],
            is_active: true,
            ..Default::default()
        }
    }

    fn ids<T>(matches: &[ScoredMatch<T>], id: impl Fn(&T) -> &str) -> Vec<String> {
        matches.iter().map(|m| id(&m.candidate).to_string()).collect()
    }

    #[test]
    fn test_rank_mentors_sorted_by_score() {
        let matcher = Matcher::with_default_weights();
        let startup = create_startup();

        let mentors = vec![
            create_mentor("busy", vec![], Some(AvailabilityStatus::Busy)),
            create_mentor("industry", vec![Industry::CleanTech], Some(AvailabilityStatus::Available)),
            create_mentor("available", vec![], Some(AvailabilityStatus::Available)),
        ];

        let result = matcher.rank_mentors(&startup, mentors, 10);

        assert_eq!(ids(&result, |m| &m.id), vec!["industry", "available", "busy"]);
        assert_eq!(result[0].score, 45);
        assert_eq!(result[1].score, 15);
        assert_eq!(result[2].score, 8);
    }

    #[test]
    fn test_ties_keep_pool_order() {
        let matcher = Matcher::with_default_weights();
        let startup = create_startup();

        let mentors: Vec<Mentor> = (0..6)
            .map(|i| create_mentor(&format!("m{}", i), vec![], Some(AvailabilityStatus::Available)))
            .collect();

        let first = matcher.rank_mentors(&startup, mentors.clone(), 10);
        let second = matcher.rank_mentors(&startup, mentors, 10);

        let expected: Vec<String> = (0..6).map(|i| format!("m{}", i)).collect();
        assert_eq!(ids(&first, |m| &m.id), expected);
        assert_eq!(first, second);
    }

    #[test]
    fn test_respects_limit() {
        let matcher = Matcher::with_default_weights();
        let startup = create_startup();

        let mentors: Vec<Mentor> = (0..20)
            .map(|i| create_mentor(&i.to_string(), vec![], None))
            .collect();

        assert_eq!(matcher.rank_mentors(&startup, mentors.clone(), 5).len(), 5);
        assert_eq!(matcher.rank_mentors(&startup, mentors, 0).len(), 0);
    }

    #[test]
    fn test_small_pool_returns_everything() {
        let matcher = Matcher::with_default_weights();
        let startup = create_startup();

        let mentors: Vec<Mentor> = (0..3)
            .map(|i| create_mentor(&i.to_string(), vec![], None))
            .collect();

        assert_eq!(matcher.rank_mentors(&startup, mentors, 10).len(), 3);
        assert!(matcher.rank_mentors(&startup, vec![], 10).is_empty());
    }

    #[test]
    fn test_rank_startups_reads_startup_side() {
        let matcher = Matcher::with_default_weights();
        let mentor = Mentor {
            specializations: vec![Specialization::Fundraising],
            ..create_mentor("mentor", vec![Industry::Healthcare], None)
        };

        let startups = vec![
            Startup {
                id: "unrelated".to_string(),
                industry: Some(Industry::Education),
                looking_for: vec![Need::Talent],
                ..create_startup()
            },
            Startup {
                id: "fit".to_string(),
                industry: Some(Industry::Healthcare),
                looking_for: vec![Need::Funding],
                ..create_startup()
            },
        ];

        let result = matcher.rank_startups(&mentor, startups, 10);

        assert_eq!(ids(&result, |s| &s.id), vec!["fit", "unrelated"]);
        // industry 30 + need 20 + capacity 5
        assert_eq!(result[0].score, 55);
        assert_eq!(result[1].score, 5);
    }
}
