use crate::models::{
    ApprovalStatus, Availability, Mentee, Mentor, Ratings, Startup, UnknownLabel,
};
use crate::services::directory::{Directory, DirectoryError};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] UnknownLabel),
}

const STARTUP_COLUMNS: &str =
    "id, name, tagline, industry, tags, looking_for, status, is_active";

const MENTOR_COLUMNS: &str = "id, name, title, industries, expertise, specializations, \
    availability_status, hours_per_week, rating_average, rating_count, mentees, status, is_active";

/// PostgreSQL-backed directory
///
/// Reads the `startups` and `mentors` tables owned by the platform. The
/// service never writes to them.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL directory");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    pub async fn get_startup(&self, id: &str) -> Result<Option<Startup>, PostgresError> {
        let query = format!("SELECT {} FROM startups WHERE id = $1", STARTUP_COLUMNS);

        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;

        row.as_ref().map(startup_from_row).transpose()
    }

    pub async fn get_mentor(&self, id: &str) -> Result<Option<Mentor>, PostgresError> {
        let query = format!("SELECT {} FROM mentors WHERE id = $1", MENTOR_COLUMNS);

        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;

        row.as_ref().map(mentor_from_row).transpose()
    }

    /// Approved, active startups ordered by creation time
    ///
    /// Rows carrying unknown labels are skipped.
    pub async fn list_approved_startups(&self) -> Result<Vec<Startup>, PostgresError> {
        let query = format!(
            "SELECT {} FROM startups WHERE status = $1 AND is_active ORDER BY created_at, id",
            STARTUP_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(ApprovalStatus::Approved.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(decode_rows(&rows, startup_from_row, "startup"))
    }

    /// Approved, active mentors ordered by creation time
    pub async fn list_approved_mentors(&self) -> Result<Vec<Mentor>, PostgresError> {
        let query = format!(
            "SELECT {} FROM mentors WHERE status = $1 AND is_active ORDER BY created_at, id",
            MENTOR_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(ApprovalStatus::Approved.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(decode_rows(&rows, mentor_from_row, "mentor"))
    }

    /// Health check for the database connection
    pub async fn ping(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[async_trait]
impl Directory for PostgresClient {
    async fn startup_by_id(&self, id: &str) -> Result<Option<Startup>, DirectoryError> {
        Ok(self.get_startup(id).await?)
    }

    async fn mentor_by_id(&self, id: &str) -> Result<Option<Mentor>, DirectoryError> {
        Ok(self.get_mentor(id).await?)
    }

    async fn approved_active_mentors(&self) -> Result<Vec<Mentor>, DirectoryError> {
        Ok(self.list_approved_mentors().await?)
    }

    async fn approved_active_startups(&self) -> Result<Vec<Startup>, DirectoryError> {
        Ok(self.list_approved_startups().await?)
    }

    async fn health_check(&self) -> Result<bool, DirectoryError> {
        Ok(self.ping().await?)
    }
}

fn decode_rows<T>(
    rows: &[PgRow],
    decode: fn(&PgRow) -> Result<T, PostgresError>,
    kind: &str,
) -> Vec<T> {
    rows.iter()
        .filter_map(|row| match decode(row) {
            Ok(record) => Some(record),
            Err(e) => {
                let id: Option<String> = row.try_get("id").ok();
                tracing::warn!("Skipping {} {:?}: {}", kind, id, e);
                None
            }
        })
        .collect()
}

fn parse_label<T: FromStr<Err = UnknownLabel>>(value: Option<String>) -> Result<Option<T>, UnknownLabel> {
    value.as_deref().map(str::parse::<T>).transpose()
}

fn parse_labels<T: FromStr<Err = UnknownLabel>>(values: Option<Vec<String>>) -> Result<Vec<T>, UnknownLabel> {
    values
        .unwrap_or_default()
        .iter()
        .map(|value| value.parse())
        .collect()
}

fn startup_from_row(row: &PgRow) -> Result<Startup, PostgresError> {
    Ok(Startup {
        id: row.try_get("id")?,
        name: row.try_get::<Option<String>, _>("name")?.unwrap_or_default(),
        tagline: row.try_get("tagline")?,
        industry: parse_label(row.try_get("industry")?)?,
        tags: row.try_get::<Option<Vec<String>>, _>("tags")?.unwrap_or_default(),
        looking_for: parse_labels(row.try_get("looking_for")?)?,
        status: parse_label(row.try_get("status")?)?,
        is_active: row.try_get("is_active")?,
    })
}

fn mentor_from_row(row: &PgRow) -> Result<Mentor, PostgresError> {
    let availability_status = parse_label(row.try_get("availability_status")?)?;
    let hours_per_week: Option<f64> = row.try_get("hours_per_week")?;
    let availability = (availability_status.is_some() || hours_per_week.is_some()).then(|| {
        Availability {
            status: availability_status,
            hours_per_week,
        }
    });

    let rating_average: Option<f64> = row.try_get("rating_average")?;
    let rating_count: Option<i32> = row.try_get("rating_count")?;
    let ratings = (rating_average.is_some() || rating_count.is_some()).then(|| Ratings {
        average: rating_average,
        count: rating_count.and_then(|c| u32::try_from(c).ok()),
    });

    let mentees: Option<Json<Vec<Mentee>>> = row.try_get("mentees")?;

    Ok(Mentor {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        title: row.try_get("title")?,
        industries: parse_labels(row.try_get("industries")?)?,
        expertise: row.try_get::<Option<Vec<String>>, _>("expertise")?.unwrap_or_default(),
        specializations: parse_labels(row.try_get("specializations")?)?,
        availability,
        ratings,
        mentees: mentees.map(|m| m.0),
        status: parse_label(row.try_get("status")?)?,
        is_active: row.try_get("is_active")?,
    })
}
