//! HTTP client for the Caddy admin API.
//!
//! # Responsibilities
//! - Load, read and stop the remote configuration as a whole
//! - List, fetch, create, update and delete reverse-proxy routes
//! - Surface transport failures and non-200 answers distinctly
//!
//! # Design Decisions
//! - Exactly one request per operation, each awaited to completion
//! - Every request carries a per-call timeout and an `X-Request-Id`
//! - Route order is the remote server's match order and is never altered

use std::time::Instant;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use url::Url;
use uuid::Uuid;

use crate::admin::endpoints;
use crate::admin::error::{AdminError, AdminResult};
use crate::config::AdminClientConfig;
use crate::route::{self, ReverseRoute, RoutePatch};

/// ID handed out by `next_available_id` when the route list is empty.
pub const FIRST_ROUTE_ID: i64 = 1;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// ID following the largest one in `routes`, or `FIRST_ROUTE_ID` if empty.
///
/// Fails with `AdminError::IdExhausted` when the largest ID is `i64::MAX`.
pub fn next_id_after(routes: &[ReverseRoute]) -> AdminResult<i64> {
    match routes.iter().map(|r| r.id).max() {
        None => Ok(FIRST_ROUTE_ID),
        Some(max) => max.checked_add(1).ok_or(AdminError::IdExhausted(max)),
    }
}

/// Client for one remote admin API.
///
/// Cheap to clone; clones share the underlying connection pool. No
/// client-side locking is done, so concurrent `next_available_id` +
/// `create_route` sequences from independent callers can pick the same ID.
#[derive(Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    config: AdminClientConfig,
    base_url: Url,
}

impl AdminClient {
    /// Create a new client.
    ///
    /// No request is made; an unreachable server only shows up on the first
    /// operation.
    pub fn new(config: AdminClientConfig) -> AdminResult<Self> {
        let raw = config.base_url();
        let base_url = Url::parse(&raw).map_err(|source| AdminError::InvalidUrl {
            url: raw.clone(),
            source,
        })?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .no_proxy()
            .build()
            .map_err(AdminError::Transport)?;

        tracing::debug!(
            base_url = %base_url,
            server_name = %config.server_name,
            timeout_secs = config.request_timeout_secs,
            "Admin client initialized"
        );

        Ok(Self {
            http,
            config,
            base_url,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &AdminClientConfig {
        &self.config
    }

    /// Replace the server's entire live configuration with `config_json`.
    pub async fn load_full_config(&self, config_json: &str) -> AdminResult<()> {
        self.send(Method::POST, endpoints::LOAD, Some(config_json.to_string()))
            .await?;
        tracing::info!("Full configuration loaded");
        Ok(())
    }

    /// Raw JSON text of the config subtree at `path`.
    ///
    /// A path the server does not know typically comes back as `null`
    /// rather than an error; callers must handle empty results.
    pub async fn fetch_config_at(&self, path: &str) -> AdminResult<String> {
        self.send(Method::GET, &endpoints::config_at(path), None).await
    }

    /// All managed routes, in the order the server matches them.
    pub async fn list_routes(&self) -> AdminResult<Vec<ReverseRoute>> {
        let text = self
            .fetch_config_at(&endpoints::routes_path(&self.config.server_name))
            .await?;
        Ok(route::decode_list(&text))
    }

    /// One more than the largest route ID on the server, or
    /// `FIRST_ROUTE_ID` when no routes exist.
    pub async fn next_available_id(&self) -> AdminResult<i64> {
        let routes = self.list_routes().await?;
        next_id_after(&routes)
    }

    /// Fetch a single route by ID.
    ///
    /// An unknown ID is reported by the server as a non-200 answer, which
    /// surfaces as `AdminError::Remote`.
    pub async fn get_route(&self, id: i64) -> AdminResult<ReverseRoute> {
        let text = self
            .send(Method::GET, &endpoints::object_by_id(id), None)
            .await?;
        Ok(route::decode_str(&text))
    }

    /// Append `route` to the end of the server's route list.
    ///
    /// The caller picks the ID, typically via `next_available_id`.
    pub async fn create_route(&self, route: &ReverseRoute) -> AdminResult<()> {
        let body = route::encode_string(route)?;
        self.send(
            Method::POST,
            &endpoints::routes_append(&self.config.server_name),
            Some(body),
        )
        .await?;
        tracing::info!(
            id = route.id,
            host = %route.match_host,
            path = %route.match_path,
            upstream = %route.upstream_dial,
            "Route created"
        );
        Ok(())
    }

    /// Replace the definition of the route with `route.id` in place.
    pub async fn update_route(&self, route: &ReverseRoute) -> AdminResult<()> {
        let body = route::encode_string(route)?;
        self.send(Method::PATCH, &endpoints::object_by_id(route.id), Some(body))
            .await?;
        tracing::info!(
            id = route.id,
            host = %route.match_host,
            path = %route.match_path,
            upstream = %route.upstream_dial,
            "Route updated"
        );
        Ok(())
    }

    /// Remove the route with `id`.
    pub async fn delete_route(&self, id: i64) -> AdminResult<()> {
        self.send(Method::DELETE, &endpoints::object_by_id(id), None)
            .await?;
        tracing::info!(id, "Route deleted");
        Ok(())
    }

    /// Stop the remote server process. Irreversible from here.
    pub async fn stop(&self) -> AdminResult<()> {
        self.send(Method::POST, endpoints::STOP, None).await?;
        tracing::warn!(base_url = %self.base_url, "Remote server stopped");
        Ok(())
    }

    /// Allocate the next ID and append a new route with it.
    ///
    /// Two remote calls; not atomic with respect to other writers.
    pub async fn create_route_with_next_id(
        &self,
        match_host: &str,
        match_path: &str,
        upstream_dial: &str,
    ) -> AdminResult<ReverseRoute> {
        let id = self.next_available_id().await?;
        let route = ReverseRoute::new(id, match_host, match_path, upstream_dial);
        self.create_route(&route).await?;
        Ok(route)
    }

    /// Read the route with `id`, apply `patch`, and write it back.
    pub async fn edit_route(&self, id: i64, patch: RoutePatch) -> AdminResult<ReverseRoute> {
        let mut route = self.get_route(id).await?;
        // Keep the addressed ID even if the stored object lost its `@id`.
        route.id = id;
        patch.apply(&mut route);
        self.update_route(&route).await?;
        Ok(route)
    }

    /// Absolute URL for an admin path.
    ///
    /// Each segment is percent-encoded and taken literally, so `#`, `?` and
    /// `%` inside a segment never turn into fragments, queries or escapes.
    /// `.` and `..` segments are rejected rather than resolved.
    fn endpoint_url(&self, path: &str) -> AdminResult<Url> {
        let segments: Vec<&str> = path.strip_prefix('/').unwrap_or(path).split('/').collect();
        if segments.iter().any(|s| matches!(*s, "." | "..")) {
            return Err(AdminError::InvalidPath(path.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AdminError::InvalidPath(path.to_string()))?
            .clear()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, method: Method, path: &str, body: Option<String>) -> AdminResult<String> {
        let url = self.endpoint_url(path)?;
        let request_id = Uuid::new_v4();
        let started = Instant::now();

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(
                method = %method,
                path,
                request_id = %request_id,
                error = %e,
                "Admin API unreachable"
            );
            AdminError::Transport(e)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(AdminError::Transport)?;

        tracing::debug!(
            method = %method,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            request_id = %request_id,
            "Admin API call"
        );

        if status != StatusCode::OK {
            tracing::warn!(
                method = %method,
                path,
                status = status.as_u16(),
                body = %text,
                "Admin API rejected request"
            );
            return Err(AdminError::Remote {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.base_url.as_str())
            .field("server_name", &self.config.server_name)
            .field("timeout_secs", &self.config.request_timeout_secs)
            .finish()
    }
}
