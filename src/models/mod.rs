// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ApprovalStatus, Availability, AvailabilityStatus, Industry, Mentee, MenteeStatus, Mentor,
    Need, Ratings, ScoredMatch, ScoringWeights, Specialization, Startup, UnknownLabel,
};
pub use requests::MatchQuery;
pub use responses::{ErrorResponse, HealthResponse, MatchesResponse};
