//! 감사 생성/삭제 시나리오
//!
//! 사전 생성된 감사 템플릿 컨텍스트를 요구하는 유일한 시나리오입니다.
//! 감사가 SUCCEEDED 또는 FAILED 상태에 도달할 때까지 기다린 뒤
//! 삭제합니다 — FAILED여도 정리는 항상 수행됩니다.

use std::sync::Arc;

use tracing::debug;

use watchbench_core::context::{CONTEXT_AUDIT_TEMPLATES, RunContext};
use watchbench_core::error::ScenarioError;
use watchbench_core::scenario::{SERVICE_WATCHER, Scenario, ScenarioInfo};
use watchbench_core::types::AuditState;
use watchbench_watcher_client::api::WatcherApi;
use watchbench_watcher_client::audit::AuditWaiter;

/// 감사를 생성하고 종료 상태를 기다린 뒤 삭제하는 시나리오
///
/// 컨텍스트의 첫 번째 템플릿 UUID를 사용합니다. 템플릿 자체는 건드리지
/// 않으므로, 성공 시 해당 템플릿의 감사 수는 실행 전 값으로 돌아갑니다.
pub struct CreateAuditAndDelete<C: WatcherApi> {
    info: ScenarioInfo,
    client: Arc<C>,
    waiter: AuditWaiter<C>,
}

impl<C: WatcherApi> CreateAuditAndDelete<C> {
    /// 시나리오 이름
    pub const NAME: &'static str = "Watcher.create_audit_and_delete";

    /// 시나리오를 생성합니다.
    pub fn new(client: Arc<C>, waiter: AuditWaiter<C>) -> Self {
        let info = ScenarioInfo::new(
            Self::NAME,
            "Create audit, wait until terminal state and delete it.",
        )
        .requires_service(SERVICE_WATCHER)
        .requires_context(CONTEXT_AUDIT_TEMPLATES);
        Self {
            info,
            client,
            waiter,
        }
    }
}

impl<C: WatcherApi> Scenario for CreateAuditAndDelete<C> {
    fn info(&self) -> &ScenarioInfo {
        &self.info
    }

    async fn run(&self, ctx: &RunContext) -> Result<(), ScenarioError> {
        let template_uuid = ctx.first_audit_template(&self.info.name)?;

        // 생성 실패 시 정리 없이 전파, FAILED 종료 상태는 정리 후 보고
        let audit = self
            .waiter
            .create_and_wait(template_uuid, ctx.cancel_token())
            .await?;
        debug!(uuid = %audit.uuid, state = %audit.state, "audit reached terminal state, deleting");
        self.client.delete_audit(&audit.uuid).await?;

        if audit.state == AuditState::Failed {
            return Err(ScenarioError::AuditFailed { uuid: audit.uuid });
        }
        Ok(())
    }
}
