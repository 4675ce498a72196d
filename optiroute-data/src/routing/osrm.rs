//! OSRM Table API response types.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#table-service>

use serde::Deserialize;

/// OSRM Table API response.
#[derive(Debug, Deserialize)]
pub(crate) struct TableResponse {
    /// `"Ok"` on success, otherwise an OSRM error code such as
    /// `"InvalidQuery"` or `"NoTable"`.
    pub code: String,

    /// Error message when `code` is not `"Ok"`.
    #[serde(default)]
    pub message: Option<String>,

    /// `durations[i][j]` is the time in seconds from the i-th source to the
    /// j-th destination; `None` when no route exists.
    #[serde(default)]
    pub durations: Option<Vec<Vec<Option<f64>>>>,
}

impl TableResponse {
    pub(crate) fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}
