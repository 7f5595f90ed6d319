use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string accepted by the match endpoints
///
/// `limit` is optional; the configured default applies when it is absent.
/// The upper bound is checked against `matching.max_limit` by the handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MatchQuery {
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

impl MatchQuery {
    /// Resolve the effective limit, rejecting values above `max_limit`
    pub fn resolve_limit(&self, default_limit: u16, max_limit: u16) -> Result<usize, String> {
        let limit = self.limit.unwrap_or(default_limit);
        if limit > max_limit {
            return Err(format!("limit must be between 1 and {}", max_limit));
        }
        Ok(limit as usize)
    }
}
