//! Shared query parameter types for API handlers.

use escrutinio_core::types::DbId;
use serde::Deserialize;

/// Optional district scope (`?distrito_id=`) for the dashboards.
#[derive(Debug, Default, Deserialize)]
pub struct DistritoScope {
    pub distrito_id: Option<DbId>,
}

/// Free-text filter (`?q=`). Absent and empty mean "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct TextFilter {
    #[serde(default)]
    pub q: String,
}
