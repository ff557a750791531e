//! Serializable form of a route table entry.

use serde::{Deserialize, Serialize};

/// One `[[routes]]` entry as written in configuration.
///
/// Exactly one of `redirect` / `panel` is set, except for the catch-all
/// (`path = "*"`) entry, which sets neither and renders the not-found page.
///
/// ```toml
/// [[routes]]
/// path = "security"
/// redirect = "groups"
///
/// [[routes]]
/// path = "security/groups"
/// panel = "groups"
///
/// [[routes]]
/// path = "*"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDecl {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel: Option<String>,
}
