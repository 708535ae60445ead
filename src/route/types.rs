//! Route domain types.

use serde::Serialize;

/// One reverse-proxy route as managed through the admin API.
///
/// The remote server holds the authoritative copy; values held locally are
/// snapshots taken at the time of the last read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ReverseRoute {
    /// Object identifier (`@id`) in the remote config tree.
    pub id: i64,

    /// Hostname matched by the outer route matcher.
    pub match_host: String,

    /// Path pattern matched by the inner subroute (e.g. "/*").
    pub match_path: String,

    /// Backend address in `host:port` form.
    pub upstream_dial: String,
}

impl ReverseRoute {
    pub fn new(
        id: i64,
        match_host: impl Into<String>,
        match_path: impl Into<String>,
        upstream_dial: impl Into<String>,
    ) -> Self {
        Self {
            id,
            match_host: match_host.into(),
            match_path: match_path.into(),
            upstream_dial: upstream_dial.into(),
        }
    }
}

/// Partial update applied to an existing route by `AdminClient::edit_route`.
///
/// `None` fields keep the value currently stored on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePatch {
    pub match_host: Option<String>,
    pub match_path: Option<String>,
    pub upstream_dial: Option<String>,
}

impl RoutePatch {
    /// Overwrite the fields present in this patch. The ID is never touched.
    pub fn apply(self, route: &mut ReverseRoute) {
        if let Some(host) = self.match_host {
            route.match_host = host;
        }
        if let Some(path) = self.match_path {
            route.match_path = path;
        }
        if let Some(dial) = self.upstream_dial {
            route.upstream_dial = dial;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.match_host.is_none() && self.match_path.is_none() && self.upstream_dial.is_none()
    }
}
