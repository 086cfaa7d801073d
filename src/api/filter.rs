//! Query filters for the object-model store.
//!
//! Every lookup the provisioning run performs is an exact match on an
//! entity's unique name, so the filter surface is a single equality
//! operator.

/// Exact-match filter on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq(String, String),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Eq(field.into(), value.into())
    }

    /// Filter on the entity's unique name, the natural key every kind uses.
    pub fn name(value: impl Into<String>) -> Self {
        Self::eq("name", value)
    }

    /// Field the filter applies to.
    pub fn field(&self) -> &str {
        match self {
            Self::Eq(field, _) => field,
        }
    }

    /// Value the field must equal.
    pub fn value(&self) -> &str {
        match self {
            Self::Eq(_, value) => value,
        }
    }

    /// Render as a query-string expression, single quotes doubled.
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Eq(field, value) => format!("{} eq '{}'", field, value.replace('\'', "''")),
        }
    }
}
