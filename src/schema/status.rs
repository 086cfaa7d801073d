//! Lifecycle statuses and the directed transitions between them.

use serde::{Deserialize, Serialize};

/// One lifecycle status of a behavior definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// Machine key, also used in transition and link identifiers.
    pub id: String,
    /// Display name shown to operators.
    pub label: String,
}

impl Status {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Directed edge in the status graph.
///
/// The identifier is derived as `{from}_to_{to}`, which doubles as the
/// transition's unique key in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTransition {
    pub id: String,
    pub from_status_id: String,
    pub to_status_id: String,
}

impl StatusTransition {
    pub fn new(from_status_id: impl Into<String>, to_status_id: impl Into<String>) -> Self {
        let from_status_id = from_status_id.into();
        let to_status_id = to_status_id.into();
        Self {
            id: format!("{from_status_id}_to_{to_status_id}"),
            from_status_id,
            to_status_id,
        }
    }
}
