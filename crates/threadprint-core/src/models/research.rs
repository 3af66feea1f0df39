//! Research entities returned by the web-search stage.

use serde::{Deserialize, Serialize};

/// A short supporting excerpt with its source, used to ground the
/// sustainability estimate. Providers that rank results return these in
/// relevance-descending order; no further ordering is guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchSnippet {
    pub source_url: String,
    pub excerpt: String,
}
