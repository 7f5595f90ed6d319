use crate::models::{AvailabilityStatus, Mentor, ScoringWeights, Startup};
use crate::core::matching::{count_expertise_matches, count_specialization_matches};

const RATING_SCALE: f64 = 5.0;
const MAX_SCORE: f64 = 100.0;

/// Points contributed by each signal for one startup/mentor pair
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub industry: f64,
    pub expertise: f64,
    pub specialization: f64,
    pub availability: f64,
    pub rating: f64,
    pub capacity: f64,
}

impl ScoreBreakdown {
    /// Raw sum of all signals, before clamping and rounding
    pub fn total(&self) -> f64 {
        self.industry
            + self.expertise
            + self.specialization
            + self.availability
            + self.rating
            + self.capacity
    }

    /// Final compatibility score in [0, 100]
    pub fn score(&self) -> u8 {
        // Non-negative after the clamp, so f64::round is round-half-up here
        self.total().clamp(0.0, MAX_SCORE).round() as u8
    }
}

/// Calculate the per-signal breakdown for a startup/mentor pair
///
/// Scoring formula (default weights):
/// score = (
///     industry        30    # startup industry in mentor industries
///   + expertise    <= 25    # expertise terms overlapping tags / tag count
///   + specialization <= 20  # specializations serving needs / need count
///   + availability  10|3|0  # available | busy | otherwise
///   + rating       <= 10    # average / 5 * 10
///   + capacity       5      # known mentees, fewer than 3 active
/// )
pub fn score_breakdown(
    startup: &Startup,
    mentor: &Mentor,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    ScoreBreakdown {
        industry: industry_score(startup, mentor, weights),
        expertise: expertise_score(startup, mentor, weights),
        specialization: specialization_score(startup, mentor, weights),
        availability: availability_score(mentor.availability_status(), weights),
        rating: rating_score(mentor.rating_average(), weights),
        capacity: capacity_score(mentor.active_mentees(), weights),
    }
}

/// Calculate the compatibility score (0-100) between a startup and a mentor
pub fn calculate_match_score(startup: &Startup, mentor: &Mentor, weights: &ScoringWeights) -> u8 {
    score_breakdown(startup, mentor, weights).score()
}

#[inline]
fn industry_score(startup: &Startup, mentor: &Mentor, weights: &ScoringWeights) -> f64 {
    match startup.industry {
        Some(industry) if mentor.industries.contains(&industry) => weights.industry,
        _ => 0.0,
    }
}

/// Share of startup tags covered by mentor expertise, capped at full weight
///
/// The ratio is taken before weighting so half-point totals stay exact.
#[inline]
fn expertise_score(startup: &Startup, mentor: &Mentor, weights: &ScoringWeights) -> f64 {
    let matched = count_expertise_matches(&mentor.expertise, &startup.tags) as f64;
    let tags = startup.tags.len().max(1) as f64;

    (matched / tags * weights.expertise).min(weights.expertise)
}

/// Share of startup needs served by mentor specializations, capped at full weight
#[inline]
fn specialization_score(startup: &Startup, mentor: &Mentor, weights: &ScoringWeights) -> f64 {
    let matched = count_specialization_matches(&mentor.specializations, &startup.looking_for) as f64;
    let needs = startup.looking_for.len().max(1) as f64;

    (matched / needs * weights.specialization).min(weights.specialization)
}

#[inline]
fn availability_score(status: Option<AvailabilityStatus>, weights: &ScoringWeights) -> f64 {
    match status {
        Some(AvailabilityStatus::Available) => weights.available,
        Some(AvailabilityStatus::Busy) => weights.busy,
        Some(AvailabilityStatus::Unavailable) | None => 0.0,
    }
}

/// Linear in the average rating; out-of-range averages are clamped to the scale
#[inline]
fn rating_score(average: Option<f64>, weights: &ScoringWeights) -> f64 {
    match average {
        Some(avg) if avg.is_finite() => avg.clamp(0.0, RATING_SCALE) / RATING_SCALE * weights.rating,
        _ => 0.0,
    }
}

/// Only awarded when the mentor's mentorships are known
#[inline]
fn capacity_score(active_mentees: Option<usize>, weights: &ScoringWeights) -> f64 {
    match active_mentees {
        Some(active) if active < weights.capacity_threshold => weights.capacity,
        _ => 0.0,
    }
}
