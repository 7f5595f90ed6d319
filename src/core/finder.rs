use crate::core::matcher::Matcher;
use crate::models::{Mentor, ScoredMatch, Startup};
use crate::services::{Directory, DirectoryError};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Number of matches returned when the caller does not ask for a limit
pub const DEFAULT_LIMIT: usize = 10;

/// Which side of the marketplace an anchor id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Startup,
    Mentor,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Startup => f.write_str("Startup"),
            EntityKind::Mentor => f.write_str("Mentor"),
        }
    }
}

/// Errors returned by the match finder
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error(transparent)]
    Upstream(#[from] DirectoryError),
}

/// Ranks the opposite side of the marketplace for an anchor startup or mentor
///
/// Every call reads fresh snapshots from the directory; nothing is cached and
/// nothing is written back.
#[derive(Clone)]
pub struct MatchFinder {
    directory: Arc<dyn Directory>,
    matcher: Matcher,
}

impl MatchFinder {
    pub fn new(directory: Arc<dyn Directory>, matcher: Matcher) -> Self {
        Self { directory, matcher }
    }

    pub fn directory(&self) -> &Arc<dyn Directory> {
        &self.directory
    }

    /// Best mentor matches for a startup
    pub async fn find_mentor_matches(
        &self,
        startup_id: &str,
        limit: usize,
    ) -> Result<Vec<ScoredMatch<Mentor>>, MatchError> {
        let startup = self
            .directory
            .startup_by_id(startup_id)
            .await?
            .ok_or_else(|| MatchError::NotFound {
                kind: EntityKind::Startup,
                id: startup_id.to_string(),
            })?;

        let mentors = self.directory.approved_active_mentors().await?;
        let pool_size = mentors.len();

        let matches = self.matcher.rank_mentors(&startup, mentors, limit);

        tracing::debug!(
            "Ranked {} mentors for startup {}, kept {}",
            pool_size,
            startup_id,
            matches.len()
        );

        Ok(matches)
    }

    /// Best startup matches for a mentor
    pub async fn find_startup_matches(
        &self,
        mentor_id: &str,
        limit: usize,
    ) -> Result<Vec<ScoredMatch<Startup>>, MatchError> {
        let mentor = self
            .directory
            .mentor_by_id(mentor_id)
            .await?
            .ok_or_else(|| MatchError::NotFound {
                kind: EntityKind::Mentor,
                id: mentor_id.to_string(),
            })?;

        let startups = self.directory.approved_active_startups().await?;
        let pool_size = startups.len();

        let matches = self.matcher.rank_startups(&mentor, startups, limit);

        tracing::debug!(
            "Ranked {} startups for mentor {}, kept {}",
            pool_size,
            mentor_id,
            matches.len()
        );

        Ok(matches)
    }
}
