use crate::models::{Mentor, Startup};
use crate::services::{AppwriteError, PostgresError};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a directory backend
///
/// These are propagated to callers unchanged; the directory owns any retry
/// policy.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("PostgreSQL directory error: {0}")]
    Postgres(#[from] PostgresError),

    #[error("Appwrite directory error: {0}")]
    Appwrite(#[from] AppwriteError),

    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

/// Read-only source of startup and mentor snapshots
///
/// Lookups by id return `Ok(None)` for unknown ids. Pool listings return only
/// approved, active records, in a stable order.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn startup_by_id(&self, id: &str) -> Result<Option<Startup>, DirectoryError>;

    async fn mentor_by_id(&self, id: &str) -> Result<Option<Mentor>, DirectoryError>;

    async fn approved_active_mentors(&self) -> Result<Vec<Mentor>, DirectoryError>;

    async fn approved_active_startups(&self) -> Result<Vec<Startup>, DirectoryError>;

    /// Whether the backing store currently answers requests
    async fn health_check(&self) -> Result<bool, DirectoryError>;
}

/// Directory over snapshots held in memory
///
/// Records keep insertion order. Used by tests and benchmarks.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    startups: Vec<Startup>,
    mentors: Vec<Mentor>,
    failure: Option<String>,
}

impl InMemoryDirectory {
    pub fn new(startups: Vec<Startup>, mentors: Vec<Mentor>) -> Self {
        Self {
            startups,
            mentors,
            failure: None,
        }
    }

    /// Make every call fail as if the store were unreachable
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    fn check(&self) -> Result<(), DirectoryError> {
        match &self.failure {
            Some(reason) => Err(DirectoryError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn startup_by_id(&self, id: &str) -> Result<Option<Startup>, DirectoryError> {
        self.check()?;
        Ok(self.startups.iter().find(|s| s.id == id).cloned())
    }

    async fn mentor_by_id(&self, id: &str) -> Result<Option<Mentor>, DirectoryError> {
        self.check()?;
        Ok(self.mentors.iter().find(|m| m.id == id).cloned())
    }

    async fn approved_active_mentors(&self) -> Result<Vec<Mentor>, DirectoryError> {
        self.check()?;
        Ok(self.mentors.iter().filter(|m| m.is_listed()).cloned().collect())
    }

    async fn approved_active_startups(&self) -> Result<Vec<Startup>, DirectoryError> {
        self.check()?;
        Ok(self.startups.iter().filter(|s| s.is_listed()).cloned().collect())
    }

    async fn health_check(&self) -> Result<bool, DirectoryError> {
        Ok(self.failure.is_none())
    }
}
