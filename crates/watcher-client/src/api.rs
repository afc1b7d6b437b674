//! Watcher API abstraction for testability.
//!
//! The [`WatcherApi`] trait abstracts the Watcher v1 REST API, allowing
//! production code to use [`HttpWatcherClient`] while tests use
//! `MockWatcherClient`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  Scenario body   │
//! └────────┬─────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │ WatcherApi  │ (trait)
//!   └─────────────┘
//!        │     │
//!        ▼     ▼
//!   ┌──────┐ ┌──────┐
//!   │ HTTP │ │ Mock │
//!   └───┬──┘ └──────┘
//!       │
//!       ▼
//!   Watcher service (/v1)
//! ```
//!
//! # Resource ID Validation
//!
//! All methods that accept resource IDs validate them before issuing a
//! request: 1-64 characters, ASCII alphanumeric plus `-`/`_`. Empty IDs
//! and IDs with path or control characters are rejected up front.

use std::future::Future;
use std::time::Instant;

use metrics::{counter, histogram};
use serde::Deserialize;
use tracing::debug;

use watchbench_core::metrics as metric_names;
use watchbench_core::types::{
    Audit, AuditTemplate, CreateTemplateRequest, Goal, Strategy, TemplateQuery,
};

use crate::config::WatcherClientConfig;
use crate::error::WatcherError;

/// Validates a resource ID before it is interpolated into a request path.
///
/// Watcher identifiers are UUIDs or short slug-style IDs. This check keeps
/// arbitrary path segments and control characters out of request URLs.
pub(crate) fn validate_resource_id(id: &str) -> Result<(), WatcherError> {
    if id.is_empty() || id.len() > 64 {
        return Err(WatcherError::InvalidId(format!(
            "length {} (must be 1-64)",
            id.len()
        )));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(WatcherError::InvalidId(
            "contains characters outside [A-Za-z0-9-_]".to_owned(),
        ));
    }
    Ok(())
}

/// Trait abstracting Watcher API operations.
///
/// All service calls go through this trait, enabling testability via mocking.
///
/// # Implementations
///
/// - [`HttpWatcherClient`]: Production implementation over the Watcher v1
///   REST API using `reqwest`
/// - `MockWatcherClient`: In-memory implementation with scripted behavior
///   (behind the `mock` feature and in tests)
///
/// # Error Handling
///
/// - **404 responses**: `WatcherError::NotFound`
/// - **400/409 on create**: `WatcherError::CreationRejected`
/// - **Transport errors**: `WatcherError::Connection`
pub trait WatcherApi: Send + Sync + 'static {
    /// Checks service reachability.
    ///
    /// Used by pre-run validation; never called from scenario bodies.
    fn ping(&self) -> impl Future<Output = Result<(), WatcherError>> + Send;

    /// Lists the optimization goals known to the service.
    fn list_goals(&self) -> impl Future<Output = Result<Vec<Goal>, WatcherError>> + Send;

    /// Lists the strategies known to the service.
    fn list_strategies(&self)
    -> impl Future<Output = Result<Vec<Strategy>, WatcherError>> + Send;

    /// Creates an audit template.
    ///
    /// `request.goal` and `request.strategy` must already be resolved to
    /// service UUIDs (see `ResourceResolver`).
    fn create_audit_template(
        &self,
        request: &CreateTemplateRequest,
    ) -> impl Future<Output = Result<AuditTemplate, WatcherError>> + Send;

    /// Deletes an audit template by UUID.
    ///
    /// Deleting an absent template is an error, not a no-op.
    fn delete_audit_template(
        &self,
        uuid: &str,
    ) -> impl Future<Output = Result<(), WatcherError>> + Send;

    /// Lists audit templates matching `query`.
    ///
    /// `limit == Some(0)` follows the service's `next` links until the
    /// listing is exhausted; `None` defers to the service-side default cap.
    fn list_audit_templates(
        &self,
        query: &TemplateQuery,
    ) -> impl Future<Output = Result<Vec<AuditTemplate>, WatcherError>> + Send;

    /// Creates a ONESHOT audit referencing an existing template.
    ///
    /// Returns the audit as created; callers that need a terminal state use
    /// `AuditWaiter` on top of this.
    fn create_audit(
        &self,
        template_uuid: &str,
    ) -> impl Future<Output = Result<Audit, WatcherError>> + Send;

    /// Fetches the current state of an audit.
    fn get_audit(&self, uuid: &str) -> impl Future<Output = Result<Audit, WatcherError>> + Send;

    /// Deletes an audit by UUID.
    fn delete_audit(&self, uuid: &str) -> impl Future<Output = Result<(), WatcherError>> + Send;
}

/// Upper bound on `next`-link pages consumed by a single full listing.
///
/// A service that keeps emitting fresh `next` links past this point is
/// treated as broken rather than followed indefinitely.
const MAX_TEMPLATE_PAGES: usize = 1000;

// ─── Wire envelopes ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TemplateListResponse {
    #[serde(default)]
    audit_templates: Vec<AuditTemplate>,
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoalListResponse {
    #[serde(default)]
    goals: Vec<Goal>,
}

#[derive(Debug, Deserialize)]
struct StrategyListResponse {
    #[serde(default)]
    strategies: Vec<Strategy>,
}

// ─── HTTP implementation ─────────────────────────────────────────────

/// Production Watcher client over the v1 REST API.
///
/// Authentication is a pre-issued token sent as `X-Auth-Token`; Keystone
/// flows are out of scope. Every request carries the configured timeout.
pub struct HttpWatcherClient {
    config: WatcherClientConfig,
    client: reqwest::Client,
    base: String,
}

impl HttpWatcherClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `WatcherError::Connection` when the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: WatcherClientConfig) -> Result<Self, WatcherError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| WatcherError::Connection(format!("failed to build http client: {e}")))?;
        let base = config.endpoint.trim_end_matches('/').to_owned();
        Ok(Self {
            config,
            client,
            base,
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &WatcherClientConfig {
        &self.config
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, url);
        if !self.config.auth_token.is_empty() {
            builder = builder.header("X-Auth-Token", &self.config.auth_token);
        }
        builder
    }

    async fn send(
        &self,
        operation: &'static str,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, WatcherError> {
        let started = Instant::now();
        let result = builder.send().await;
        match result {
            Ok(response) => {
                record_request(operation, started, true);
                Ok(response)
            }
            Err(e) => {
                record_request(operation, started, false);
                Err(WatcherError::Connection(e.to_string()))
            }
        }
    }

    /// Maps an error response body to a `WatcherError`.
    async fn error_from_response(
        operation: &'static str,
        resource: &'static str,
        id: Option<&str>,
        response: reqwest::Response,
    ) -> WatcherError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        match status {
            404 => WatcherError::NotFound {
                resource: resource.to_owned(),
                id: id.unwrap_or("<unknown>").to_owned(),
            },
            400 | 409 => WatcherError::CreationRejected {
                resource: resource.to_owned(),
                reason: message,
            },
            _ => WatcherError::Api {
                operation: operation.to_owned(),
                status,
                message,
            },
        }
    }

    async fn fetch_template_page(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<TemplateListResponse, WatcherError> {
        let builder = self.request(reqwest::Method::GET, url).query(params);
        let response = self.send("list_audit_templates", builder).await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(
                "list_audit_templates",
                "audit_template",
                None,
                response,
            )
            .await);
        }
        response
            .json::<TemplateListResponse>()
            .await
            .map_err(|e| WatcherError::InvalidResponse(e.to_string()))
    }
}

impl WatcherApi for HttpWatcherClient {
    async fn ping(&self) -> Result<(), WatcherError> {
        let url = format!("{}/", self.base);
        let builder = self.request(reqwest::Method::GET, &url);
        let response = self.send("ping", builder).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response("ping", "service", None, response).await)
        }
    }

    async fn list_goals(&self) -> Result<Vec<Goal>, WatcherError> {
        let url = format!("{}/v1/goals", self.base);
        let builder = self.request(reqwest::Method::GET, &url);
        let response = self.send("list_goals", builder).await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response("list_goals", "goal", None, response).await);
        }
        let body: GoalListResponse = response
            .json()
            .await
            .map_err(|e| WatcherError::InvalidResponse(e.to_string()))?;
        Ok(body.goals)
    }

    async fn list_strategies(&self) -> Result<Vec<Strategy>, WatcherError> {
        let url = format!("{}/v1/strategies", self.base);
        let builder = self.request(reqwest::Method::GET, &url);
        let response = self.send("list_strategies", builder).await?;
        if !response.status().is_success() {
            return Err(
                Self::error_from_response("list_strategies", "strategy", None, response).await,
            );
        }
        let body: StrategyListResponse = response
            .json()
            .await
            .map_err(|e| WatcherError::InvalidResponse(e.to_string()))?;
        Ok(body.strategies)
    }

    async fn create_audit_template(
        &self,
        request: &CreateTemplateRequest,
    ) -> Result<AuditTemplate, WatcherError> {
        let url = format!("{}/v1/audit_templates", self.base);
        let builder = self.request(reqwest::Method::POST, &url).json(request);
        let response = self.send("create_audit_template", builder).await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(
                "create_audit_template",
                "audit_template",
                None,
                response,
            )
            .await);
        }
        let template: AuditTemplate = response
            .json()
            .await
            .map_err(|e| WatcherError::InvalidResponse(e.to_string()))?;
        debug!(uuid = %template.uuid, name = %template.name, "created audit template");
        Ok(template)
    }

    async fn delete_audit_template(&self, uuid: &str) -> Result<(), WatcherError> {
        validate_resource_id(uuid)?;
        let url = format!("{}/v1/audit_templates/{}", self.base, uuid);
        let builder = self.request(reqwest::Method::DELETE, &url);
        let response = self.send("delete_audit_template", builder).await?;
        if response.status().is_success() {
            debug!(uuid = uuid, "deleted audit template");
            Ok(())
        } else {
            Err(Self::error_from_response(
                "delete_audit_template",
                "audit_template",
                Some(uuid),
                response,
            )
            .await)
        }
    }

    async fn list_audit_templates(
        &self,
        query: &TemplateQuery,
    ) -> Result<Vec<AuditTemplate>, WatcherError> {
        let path = if query.detail {
            "/v1/audit_templates/detail"
        } else {
            "/v1/audit_templates"
        };
        let url = format!("{}{}", self.base, path);

        let mut params: Vec<(&'static str, String)> = Vec::new();
        if let Some(name) = &query.name {
            params.push(("name", name.clone()));
        }
        if let Some(goal) = &query.goal {
            params.push(("goal", goal.clone()));
        }
        if let Some(strategy) = &query.strategy {
            params.push(("strategy", strategy.clone()));
        }
        if let Some(sort_key) = &query.sort_key {
            params.push(("sort_key", sort_key.clone()));
        }
        if let Some(sort_dir) = query.sort_dir {
            params.push(("sort_dir", sort_dir.as_str().to_owned()));
        }
        match query.limit {
            // limit == 0: 전체 목록, limit 파라미터 없이 next 링크를 따라감
            Some(0) | None => {}
            Some(n) => params.push(("limit", n.to_string())),
        }

        let mut page = self.fetch_template_page(&url, &params).await?;
        let mut templates = page.audit_templates;

        if query.wants_all() {
            // 서비스 측 기본 페이지 크기와 무관하게 next 링크 소진까지 수집
            let mut visited = std::collections::HashSet::new();
            let mut pages = 1usize;
            while let Some(next) = page.next.take() {
                if !visited.insert(next.clone()) {
                    return Err(WatcherError::InvalidResponse(format!(
                        "template listing pagination cycles back to {next}"
                    )));
                }
                pages += 1;
                if pages > MAX_TEMPLATE_PAGES {
                    return Err(WatcherError::InvalidResponse(format!(
                        "template listing pagination did not terminate within \
                         {MAX_TEMPLATE_PAGES} pages"
                    )));
                }
                page = self.fetch_template_page(&next, &[]).await?;
                templates.append(&mut page.audit_templates);
            }
        } else if let Some(limit) = query.limit {
            templates.truncate(limit as usize);
        }

        Ok(templates)
    }

    async fn create_audit(&self, template_uuid: &str) -> Result<Audit, WatcherError> {
        validate_resource_id(template_uuid)?;
        let url = format!("{}/v1/audits", self.base);
        let body = serde_json::json!({
            "audit_template_uuid": template_uuid,
            "audit_type": "ONESHOT",
        });
        let builder = self.request(reqwest::Method::POST, &url).json(&body);
        let response = self.send("create_audit", builder).await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(
                "create_audit",
                "audit",
                Some(template_uuid),
                response,
            )
            .await);
        }
        let audit: Audit = response
            .json()
            .await
            .map_err(|e| WatcherError::InvalidResponse(e.to_string()))?;
        debug!(uuid = %audit.uuid, template = template_uuid, "created audit");
        Ok(audit)
    }

    async fn get_audit(&self, uuid: &str) -> Result<Audit, WatcherError> {
        validate_resource_id(uuid)?;
        let url = format!("{}/v1/audits/{}", self.base, uuid);
        let builder = self.request(reqwest::Method::GET, &url);
        let response = self.send("get_audit", builder).await?;
        if !response.status().is_success() {
            return Err(
                Self::error_from_response("get_audit", "audit", Some(uuid), response).await,
            );
        }
        response
            .json()
            .await
            .map_err(|e| WatcherError::InvalidResponse(e.to_string()))
    }

    async fn delete_audit(&self, uuid: &str) -> Result<(), WatcherError> {
        validate_resource_id(uuid)?;
        let url = format!("{}/v1/audits/{}", self.base, uuid);
        let builder = self.request(reqwest::Method::DELETE, &url);
        let response = self.send("delete_audit", builder).await?;
        if response.status().is_success() {
            debug!(uuid = uuid, "deleted audit");
            Ok(())
        } else {
            Err(Self::error_from_response("delete_audit", "audit", Some(uuid), response).await)
        }
    }
}

fn record_request(operation: &'static str, started: Instant, ok: bool) {
    let result = if ok { "success" } else { "failure" };
    counter!(
        metric_names::CLIENT_REQUESTS_TOTAL,
        metric_names::LABEL_OPERATION => operation,
        metric_names::LABEL_RESULT => result,
    )
    .increment(1);
    histogram!(
        metric_names::CLIENT_REQUEST_DURATION_SECONDS,
        metric_names::LABEL_OPERATION => operation,
    )
    .record(started.elapsed().as_secs_f64());
}
