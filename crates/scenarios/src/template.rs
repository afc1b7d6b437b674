//! 감사 템플릿 시나리오 — 생성/삭제 및 목록 조회
//!
//! 두 시나리오 모두 사전 컨텍스트를 요구하지 않습니다.
//! `Watcher.create_audit_template_and_delete`는 성공 시 외부 상태
//! 순변화가 0인 왕복(round-trip) 시나리오입니다.

use std::sync::{Arc, Once};

use tracing::{debug, warn};

use watchbench_core::context::RunContext;
use watchbench_core::error::ScenarioError;
use watchbench_core::scenario::{SERVICE_WATCHER, Scenario, ScenarioInfo};
use watchbench_core::types::{CreateTemplateRequest, TemplateQuery};
use watchbench_watcher_client::api::WatcherApi;
use watchbench_watcher_client::resolver::ResourceResolver;

/// `extra` 파라미터 제거 경고는 실행당 한 번만 출력
static EXTRA_DEPRECATION: Once = Once::new();

/// `Watcher.create_audit_template_and_delete` 실행 파라미터
#[derive(Debug, Clone)]
pub struct CreateTemplateParams {
    /// 템플릿이 기반하는 목표 이름
    pub goal: String,
    /// 리소스 최적화 알고리즘을 제공하는 전략 이름
    pub strategy: String,
    /// 제거된 파라미터 — 하위 호환을 위해 받기만 하고 무시합니다
    pub extra: Option<serde_json::Value>,
}

impl CreateTemplateParams {
    /// 목표/전략 이름으로 파라미터를 생성합니다.
    pub fn new(goal: impl Into<String>, strategy: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            strategy: strategy.into(),
            extra: None,
        }
    }
}

/// 감사 템플릿을 생성하고 즉시 삭제하는 시나리오
///
/// 동시성 없음, 요청 한 쌍. 성공 시 서비스에 남는 외부 상태 변화는
/// 없습니다.
pub struct CreateAuditTemplateAndDelete<C: WatcherApi> {
    info: ScenarioInfo,
    client: Arc<C>,
    resolver: ResourceResolver<C>,
    params: CreateTemplateParams,
}

impl<C: WatcherApi> CreateAuditTemplateAndDelete<C> {
    /// 시나리오 이름
    pub const NAME: &'static str = "Watcher.create_audit_template_and_delete";

    /// 시나리오를 생성합니다.
    ///
    /// 제거된 `extra` 파라미터가 전달되면 한 번만 경고를 남기고
    /// 무시합니다 (호환 기간 유지용 shim).
    pub fn new(client: Arc<C>, params: CreateTemplateParams) -> Self {
        if params.extra.is_some() {
            EXTRA_DEPRECATION.call_once(|| {
                warn!(
                    scenario = Self::NAME,
                    "'extra' has been removed since it isn't used; the argument is ignored"
                );
            });
        }
        let info = ScenarioInfo::new(
            Self::NAME,
            "Create audit template and delete it.",
        )
        .requires_service(SERVICE_WATCHER)
        .admin();
        Self {
            info,
            resolver: ResourceResolver::new(Arc::clone(&client)),
            client,
            params,
        }
    }
}

impl<C: WatcherApi> Scenario for CreateAuditTemplateAndDelete<C> {
    fn info(&self) -> &ScenarioInfo {
        &self.info
    }

    async fn run(&self, _ctx: &RunContext) -> Result<(), ScenarioError> {
        let (goal, strategy) = self
            .resolver
            .resolve(&self.params.goal, &self.params.strategy)
            .await?;

        let request = CreateTemplateRequest {
            // 반복 간 이름 충돌을 피하기 위한 임의 접미어
            name: format!("watchbench-{}", uuid::Uuid::new_v4()),
            goal: goal.uuid,
            strategy: strategy.uuid,
            description: None,
        };
        let template = self.client.create_audit_template(&request).await?;
        debug!(uuid = %template.uuid, "audit template created, deleting");
        self.client.delete_audit_template(&template.uuid).await?;
        Ok(())
    }
}

/// 기존 감사 템플릿 목록을 조회하는 시나리오
///
/// 순수 읽기 연산이며 부작용이 없습니다. 모든 파라미터는 독립적으로
/// 생략 가능합니다. 템플릿 자체는 보통 감사 템플릿 컨텍스트가 미리
/// 만들어 둡니다.
pub struct ListAuditTemplates<C: WatcherApi> {
    info: ScenarioInfo,
    client: Arc<C>,
    query: TemplateQuery,
}

impl<C: WatcherApi> ListAuditTemplates<C> {
    /// 시나리오 이름
    pub const NAME: &'static str = "Watcher.list_audit_templates";

    /// 시나리오를 생성합니다.
    pub fn new(client: Arc<C>, query: TemplateQuery) -> Self {
        let info = ScenarioInfo::new(Self::NAME, "List existing audit templates.")
            .requires_service(SERVICE_WATCHER);
        Self {
            info,
            client,
            query,
        }
    }
}

impl<C: WatcherApi> Scenario for ListAuditTemplates<C> {
    fn info(&self) -> &ScenarioInfo {
        &self.info
    }

    async fn run(&self, _ctx: &RunContext) -> Result<(), ScenarioError> {
        let templates = self.client.list_audit_templates(&self.query).await?;
        debug!(count = templates.len(), "listed audit templates");
        Ok(())
    }
}
