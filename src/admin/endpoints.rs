//! Admin API paths.
//!
//! All paths are relative to `http://{host}:{port}` and start with '/'.

/// Replace the entire live configuration.
pub const LOAD: &str = "/load";

/// Gracefully stop the remote server process.
pub const STOP: &str = "/stop";

/// Prefix under which the config tree is addressable by path.
pub const CONFIG_PREFIX: &str = "/config";

/// Config-tree path of the route list for the named HTTP server.
pub fn routes_path(server_name: &str) -> String {
    format!("/apps/http/servers/{}/routes", server_name)
}

/// Endpoint that appends one route to the end of the route list.
pub fn routes_append(server_name: &str) -> String {
    format!("{}{}/", CONFIG_PREFIX, routes_path(server_name))
}

/// Endpoint exposing the subtree at `path` ("" for the whole config).
pub fn config_at(path: &str) -> String {
    if path.is_empty() || path.starts_with('/') {
        format!("{}{}", CONFIG_PREFIX, path)
    } else {
        format!("{}/{}", CONFIG_PREFIX, path)
    }
}

/// Endpoint addressing one object by its `@id`.
pub fn object_by_id(id: i64) -> String {
    format!("/id/{}", id)
}
