//! 클라이언트 설정

use std::time::Duration;

use watchbench_core::config::WatchbenchConfig;

/// Watcher 클라이언트 설정
///
/// core 설정의 `[service]`/`[audit]` 섹션에서 파생됩니다.
#[derive(Debug, Clone)]
pub struct WatcherClientConfig {
    /// Watcher API 엔드포인트 (예: `http://watcher:9322`)
    pub endpoint: String,
    /// `X-Auth-Token` 헤더로 전달할 인증 토큰 (빈 문자열이면 생략)
    pub auth_token: String,
    /// 개별 요청 제한 시간
    pub request_timeout: Duration,
    /// 감사 상태 폴링 주기
    pub poll_interval: Duration,
    /// 감사 종료 상태 도달 제한 시간
    pub audit_timeout: Duration,
}

impl WatcherClientConfig {
    /// core 설정에서 클라이언트 설정을 구성합니다.
    pub fn from_core(config: &WatchbenchConfig) -> Self {
        Self {
            endpoint: config.service.endpoint.clone(),
            auth_token: config.service.auth_token.clone(),
            request_timeout: Duration::from_secs(config.service.request_timeout_secs),
            poll_interval: config.audit.poll_interval(),
            audit_timeout: config.audit.timeout(),
        }
    }
}

impl Default for WatcherClientConfig {
    fn default() -> Self {
        Self::from_core(&WatchbenchConfig::default())
    }
}
