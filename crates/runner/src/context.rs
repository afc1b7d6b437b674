//! 감사 템플릿 컨텍스트 — 실행 전 준비, 실행 후 정리
//!
//! `[context]` 설정에 따라 감사 템플릿을 미리 만들어 두고, 실행이
//! 끝나면 (실패한 실행 포함) 모두 삭제합니다. 삭제는 best-effort이며
//! 실패해도 에러로 전파하지 않습니다.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use watchbench_core::config::ContextConfig;
use watchbench_core::types::CreateTemplateRequest;
use watchbench_watcher_client::api::WatcherApi;
use watchbench_watcher_client::error::WatcherError;
use watchbench_watcher_client::resolver::ResourceResolver;

/// 사전 생성된 감사 템플릿의 수명을 관리합니다.
///
/// [`setup`](Self::setup)으로 생성하고, 사용이 끝나면 반드시
/// [`teardown`](Self::teardown)을 호출해야 합니다. 템플릿 UUID의
/// 순서는 생성 순서를 따릅니다.
pub struct AuditTemplateContext<C: WatcherApi> {
    client: Arc<C>,
    created: Vec<String>,
}

impl<C: WatcherApi> std::fmt::Debug for AuditTemplateContext<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditTemplateContext")
            .field("created", &self.created)
            .finish()
    }
}

impl<C: WatcherApi> AuditTemplateContext<C> {
    /// 설정에 따라 감사 템플릿을 생성합니다.
    ///
    /// goal/strategy 이름은 생성 전에 UUID로 해석하며, 존재하지 않거나
    /// 조합이 맞지 않으면 아무것도 만들지 않고 에러를 반환합니다.
    /// 중간 생성이 실패하면 이미 만든 템플릿을 정리한 뒤 에러를
    /// 반환합니다.
    pub async fn setup(client: Arc<C>, config: &ContextConfig) -> Result<Self, WatcherError> {
        let resolver = ResourceResolver::new(Arc::clone(&client));
        let (goal, strategy) = resolver.resolve(&config.goal, &config.strategy).await?;

        let mut created = Vec::with_capacity(config.audit_template_count);
        for _ in 0..config.audit_template_count {
            let request = CreateTemplateRequest {
                name: format!("watchbench-ctx-{}", Uuid::new_v4()),
                goal: goal.uuid.clone(),
                strategy: strategy.uuid.clone(),
                description: Some("pre-created by watchbench context".to_owned()),
            };
            match client.create_audit_template(&request).await {
                Ok(template) => {
                    debug!(uuid = %template.uuid, "context template created");
                    created.push(template.uuid);
                }
                Err(e) => {
                    warn!(error = %e, "context setup failed, cleaning up partial templates");
                    Self {
                        client: Arc::clone(&client),
                        created,
                    }
                    .teardown()
                    .await;
                    return Err(e);
                }
            }
        }

        info!(count = created.len(), "audit template context ready");
        Ok(Self { client, created })
    }

    /// 생성된 템플릿 UUID 목록 (생성 순서)
    pub fn template_uuids(&self) -> &[String] {
        &self.created
    }

    /// 생성했던 템플릿을 모두 삭제합니다.
    ///
    /// 개별 삭제 실패는 경고만 남깁니다. 시나리오가 템플릿에 연결된
    /// 감사를 남겨 두었다면 서비스가 삭제를 거부할 수 있습니다.
    pub async fn teardown(self) {
        for uuid in &self.created {
            match self.client.delete_audit_template(uuid).await {
                Ok(()) => debug!(uuid = %uuid, "context template deleted"),
                Err(e) => warn!(uuid = %uuid, error = %e, "failed to delete context template"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchbench_watcher_client::mock::MockWatcherClient;

    fn context_config(count: usize) -> ContextConfig {
        ContextConfig {
            audit_template_count: count,
            goal: "workload_balancing".to_owned(),
            strategy: "workload_stabilization".to_owned(),
        }
    }

    #[tokio::test]
    async fn setup_creates_requested_count_in_order() {
        let client = Arc::new(
            MockWatcherClient::new().with_catalog("workload_balancing", "workload_stabilization"),
        );

        let ctx = AuditTemplateContext::setup(Arc::clone(&client), &context_config(3))
            .await
            .unwrap();

        assert_eq!(ctx.template_uuids().len(), 3);
        assert_eq!(client.template_count(), 3);
    }

    #[tokio::test]
    async fn teardown_deletes_everything_it_created() {
        let client = Arc::new(
            MockWatcherClient::new().with_catalog("workload_balancing", "workload_stabilization"),
        );
        let ctx = AuditTemplateContext::setup(Arc::clone(&client), &context_config(2))
            .await
            .unwrap();

        ctx.teardown().await;
        assert_eq!(client.template_count(), 0);
    }

    #[tokio::test]
    async fn unknown_goal_creates_nothing() {
        let client = Arc::new(
            MockWatcherClient::new().with_catalog("workload_balancing", "workload_stabilization"),
        );
        let mut config = context_config(2);
        config.goal = "no_such_goal".to_owned();

        let err = AuditTemplateContext::setup(Arc::clone(&client), &config)
            .await
            .unwrap_err();
        assert!(matches!(err, WatcherError::UnknownGoal { .. }));
        assert_eq!(client.call_count("create_audit_template"), 0);
    }

    #[tokio::test]
    async fn rejected_creation_rolls_back_partial_templates() {
        // 거부 플래그가 켜진 클라이언트는 첫 생성부터 실패한다
        let client = Arc::new(
            MockWatcherClient::new()
                .with_catalog("workload_balancing", "workload_stabilization")
                .with_reject_create_template("quota exceeded"),
        );

        let err = AuditTemplateContext::setup(Arc::clone(&client), &context_config(2))
            .await
            .unwrap_err();
        assert!(matches!(err, WatcherError::CreationRejected { .. }));
        assert_eq!(client.template_count(), 0);
    }

    #[tokio::test]
    async fn zero_count_is_a_noop() {
        let client = Arc::new(
            MockWatcherClient::new().with_catalog("workload_balancing", "workload_stabilization"),
        );
        let ctx = AuditTemplateContext::setup(Arc::clone(&client), &context_config(0))
            .await
            .unwrap();
        assert!(ctx.template_uuids().is_empty());
        assert_eq!(client.call_count("create_audit_template"), 0);
    }
}
