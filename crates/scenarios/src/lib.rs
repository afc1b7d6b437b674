//! Watchbench 시나리오 본문 크레이트
//!
//! OpenStack Watcher 리소스 최적화 서비스를 대상으로 하는 벤치마크
//! 시나리오 세 개를 제공합니다.
//!
//! # Module Structure
//!
//! - [`template`]: 감사 템플릿 생성/삭제, 목록 조회 시나리오
//! - [`audit`]: 감사 생성/대기/삭제 시나리오
//!
//! 시나리오는 명시적 [`register_all`] 호출로 레지스트리에 등록됩니다.

use std::sync::Arc;

use watchbench_core::config::WatchbenchConfig;
use watchbench_core::error::RegistryError;
use watchbench_core::scenario::ScenarioRegistry;
use watchbench_core::types::TemplateQuery;
use watchbench_watcher_client::api::WatcherApi;
use watchbench_watcher_client::audit::AuditWaiter;
use watchbench_watcher_client::config::WatcherClientConfig;

pub mod audit;
pub mod template;

pub use audit::CreateAuditAndDelete;
pub use template::{CreateAuditTemplateAndDelete, CreateTemplateParams, ListAuditTemplates};

/// 제공되는 모든 시나리오를 레지스트리에 등록합니다.
///
/// 목표/전략 이름과 타이밍은 설정에서 가져옵니다. 같은 레지스트리에
/// 두 번 호출하면 중복 등록 에러가 발생합니다.
pub fn register_all<C: WatcherApi + 'static>(
    registry: &mut ScenarioRegistry,
    client: Arc<C>,
    config: &WatchbenchConfig,
) -> Result<(), RegistryError> {
    let params = CreateTemplateParams::new(&config.context.goal, &config.context.strategy);
    registry.register(Box::new(CreateAuditTemplateAndDelete::new(
        Arc::clone(&client),
        params,
    )))?;

    registry.register(Box::new(ListAuditTemplates::new(
        Arc::clone(&client),
        TemplateQuery::new(),
    )))?;

    let waiter = AuditWaiter::new(Arc::clone(&client), &WatcherClientConfig::from_core(config));
    registry.register(Box::new(CreateAuditAndDelete::new(client, waiter)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchbench_watcher_client::mock::MockWatcherClient;

    #[test]
    fn register_all_registers_three_scenarios() {
        let mut registry = ScenarioRegistry::new();
        let client = Arc::new(MockWatcherClient::new());
        register_all(&mut registry, client, &WatchbenchConfig::default()).unwrap();

        let names: Vec<_> = registry.infos().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Watcher.create_audit_template_and_delete",
                "Watcher.list_audit_templates",
                "Watcher.create_audit_and_delete",
            ]
        );
    }

    #[test]
    fn double_registration_is_rejected() {
        let mut registry = ScenarioRegistry::new();
        let client = Arc::new(MockWatcherClient::new());
        let config = WatchbenchConfig::default();
        register_all(&mut registry, Arc::clone(&client), &config).unwrap();

        let err = register_all(&mut registry, client, &config).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyRegistered { .. }));
    }
}
