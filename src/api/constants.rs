//! Endpoint construction for the object-model store's REST surface.

use uuid::Uuid;

/// Object-model API version.
pub const API_VERSION: &str = "v1";

/// Base path of the object-model API.
pub const API_BASE_PATH: &str = "/api/object-model";

/// Full API path with version.
pub fn api_path() -> String {
    format!("{}/{}", API_BASE_PATH, API_VERSION)
}

/// Entity-kind path segments, as the store exposes them.
pub mod kinds {
    pub const SECTION_DEFINITIONS: &str = "sectiondefinitions";
    pub const BEHAVIOR_DEFINITIONS: &str = "behaviordefinitions";
    pub const DEFINITIONS: &str = "definitions";
}

/// Standard headers for store requests.
pub mod headers {
    /// Content type for JSON requests.
    pub const CONTENT_TYPE_JSON: &str = "application/json";
}

/// Collection endpoint for one entity kind inside a module.
pub fn kind_endpoint(base_url: &str, module: &str, kind: &str) -> String {
    format!(
        "{}{}/modules/{}/{}",
        base_url.trim_end_matches('/'),
        api_path(),
        module,
        kind
    )
}

/// Endpoint addressing one entity record by its store identifier.
pub fn record_endpoint(base_url: &str, module: &str, kind: &str, id: &Uuid) -> String {
    format!("{}/{}", kind_endpoint(base_url, module, kind), id)
}
