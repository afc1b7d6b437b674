//! 실행 전 검증 — 시나리오 본문 호출 전에 전제조건을 확인
//!
//! 검증 실패는 해당 실행 전체를 중단시키며, 시나리오 본문의 외부
//! 리소스 호출(생성/삭제)은 한 번도 일어나지 않습니다. 서비스 가용성
//! 확인을 위한 ping만 예외입니다.

use tracing::debug;

use watchbench_core::config::WatchbenchConfig;
use watchbench_core::context::RunContext;
use watchbench_core::error::ValidationError;
use watchbench_core::scenario::{SERVICE_WATCHER, ScenarioInfo};
use watchbench_watcher_client::api::WatcherApi;

/// 시나리오 전제조건을 검증합니다.
///
/// 검증 순서는 선언 순서를 따릅니다:
///
/// 1. 필요한 서비스 각각에 대해 가용성 확인 (watcher는 ping)
/// 2. 관리자 권한 요구 vs 설정의 `service.admin`
/// 3. 필요한 컨텍스트가 [`RunContext`]에 준비되어 있는지
pub async fn validate_preconditions<C: WatcherApi>(
    info: &ScenarioInfo,
    config: &WatchbenchConfig,
    ctx: &RunContext,
    client: &C,
) -> Result<(), ValidationError> {
    for service in &info.required_services {
        if service == SERVICE_WATCHER {
            client
                .ping()
                .await
                .map_err(|e| ValidationError::ServiceUnavailable {
                    service: service.clone(),
                    reason: e.to_string(),
                })?;
        } else {
            // watcher 외의 서비스는 확인할 방법이 없으므로 거부
            return Err(ValidationError::ServiceUnavailable {
                service: service.clone(),
                reason: "no availability check for this service".to_owned(),
            });
        }
    }

    if info.admin_required && !config.service.admin {
        return Err(ValidationError::AdminRequired {
            scenario: info.name.clone(),
        });
    }

    for context in &info.required_contexts {
        if !ctx.provides(context) {
            return Err(ValidationError::MissingContext {
                scenario: info.name.clone(),
                context: context.clone(),
            });
        }
    }

    debug!(scenario = %info.name, "preconditions satisfied");
    Ok(())
}
