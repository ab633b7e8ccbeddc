//! Observable grid events
//!
//! Events are explicit and typed; each has a stable name.

use std::fmt;

/// Observable events during grid processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    // Schema
    /// Schema built from an entity mapping
    SchemaBuilt,
    /// Schema loaded from a file
    SchemaLoaded,

    // Criteria
    /// Criteria assembled from a request
    CriteriaBuilt,
    /// Order/search entry skipped because the field is unknown
    UnknownFieldIgnored,
    /// Search value rejected
    SearchRejected,

    // Result assembly
    /// Page of rows produced
    DataFetched,
    /// Total count computed
    TotalComputed,
}

impl GridEvent {
    /// Returns the event name
    pub fn as_str(&self) -> &'static str {
        match self {
            GridEvent::SchemaBuilt => "SCHEMA_BUILT",
            GridEvent::SchemaLoaded => "SCHEMA_LOADED",
            GridEvent::CriteriaBuilt => "CRITERIA_BUILT",
            GridEvent::UnknownFieldIgnored => "UNKNOWN_FIELD_IGNORED",
            GridEvent::SearchRejected => "SEARCH_REJECTED",
            GridEvent::DataFetched => "DATA_FETCHED",
            GridEvent::TotalComputed => "TOTAL_COMPUTED",
        }
    }

    /// Returns true if the event signals a degraded or rejected request
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            GridEvent::UnknownFieldIgnored | GridEvent::SearchRejected
        )
    }

    /// Returns true for high-frequency per-request events
    pub fn is_verbose(&self) -> bool {
        matches!(
            self,
            GridEvent::CriteriaBuilt | GridEvent::DataFetched | GridEvent::TotalComputed
        )
    }
}

impl fmt::Display for GridEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
