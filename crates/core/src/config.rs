//! 설정 관리 — watchbench.toml 파싱 및 런타임 설정
//!
//! [`WatchbenchConfig`]는 모든 구성 요소의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`WATCHBENCH_SERVICE_ENDPOINT=http://...` 형식)
//! 3. 설정 파일 (`watchbench.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), watchbench_core::error::WatchbenchError> {
//! use watchbench_core::config::WatchbenchConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = WatchbenchConfig::load("watchbench.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = WatchbenchConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, WatchbenchError};

/// Watchbench 통합 설정
///
/// `watchbench.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 구성 요소는 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchbenchConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 대상 서비스 설정
    #[serde(default)]
    pub service: ServiceConfig,
    /// 감사 폴링 설정
    #[serde(default)]
    pub audit: AuditConfig,
    /// 실행기 설정
    #[serde(default)]
    pub runner: RunnerConfig,
    /// 공유 컨텍스트 설정
    #[serde(default)]
    pub context: ContextConfig,
}

impl WatchbenchConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, WatchbenchError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, WatchbenchError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                WatchbenchError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                WatchbenchError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, WatchbenchError> {
        toml::from_str(toml_str).map_err(|e| {
            WatchbenchError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `WATCHBENCH_{SECTION}_{FIELD}`
    /// 예: `WATCHBENCH_SERVICE_ENDPOINT=http://watcher:9322`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "WATCHBENCH_GENERAL_LOG_LEVEL");
        override_string(
            &mut self.general.log_format,
            "WATCHBENCH_GENERAL_LOG_FORMAT",
        );

        // Service
        override_string(&mut self.service.endpoint, "WATCHBENCH_SERVICE_ENDPOINT");
        override_string(
            &mut self.service.auth_token,
            "WATCHBENCH_SERVICE_AUTH_TOKEN",
        );
        override_bool(&mut self.service.admin, "WATCHBENCH_SERVICE_ADMIN");
        override_u64(
            &mut self.service.request_timeout_secs,
            "WATCHBENCH_SERVICE_REQUEST_TIMEOUT_SECS",
        );

        // Audit
        override_u64(
            &mut self.audit.poll_interval_secs,
            "WATCHBENCH_AUDIT_POLL_INTERVAL_SECS",
        );
        override_u64(&mut self.audit.timeout_secs, "WATCHBENCH_AUDIT_TIMEOUT_SECS");

        // Runner
        override_usize(&mut self.runner.concurrency, "WATCHBENCH_RUNNER_CONCURRENCY");
        override_usize(&mut self.runner.iterations, "WATCHBENCH_RUNNER_ITERATIONS");

        // Context
        override_usize(
            &mut self.context.audit_template_count,
            "WATCHBENCH_CONTEXT_AUDIT_TEMPLATE_COUNT",
        );
        override_string(&mut self.context.goal, "WATCHBENCH_CONTEXT_GOAL");
        override_string(&mut self.context.strategy, "WATCHBENCH_CONTEXT_STRATEGY");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), WatchbenchError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        // endpoint 검증
        if self.service.endpoint.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "service.endpoint".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }
        if !self.service.endpoint.starts_with("http://")
            && !self.service.endpoint.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                field: "service.endpoint".to_owned(),
                reason: "must start with http:// or https://".to_owned(),
            }
            .into());
        }

        if self.service.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "service.request_timeout_secs".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        // 폴링 주기/제한 시간 검증
        if self.audit.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "audit.poll_interval_secs".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }
        if self.audit.timeout_secs < self.audit.poll_interval_secs {
            return Err(ConfigError::InvalidValue {
                field: "audit.timeout_secs".to_owned(),
                reason: "must be >= audit.poll_interval_secs".to_owned(),
            }
            .into());
        }

        // 실행기 검증
        if self.runner.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "runner.concurrency".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }
        if self.runner.iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "runner.iterations".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        // 컨텍스트 검증: 템플릿을 만들려면 goal/strategy가 필요
        if self.context.audit_template_count > 0
            && (self.context.goal.is_empty() || self.context.strategy.is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "context.goal".to_owned(),
                reason: "goal and strategy are required when audit_template_count > 0"
                    .to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_log_format() -> String {
    "pretty".to_owned()
}

/// 대상 Watcher 서비스 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Watcher API 엔드포인트 (예: `http://watcher:9322`)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// 사전 발급된 인증 토큰 (`X-Auth-Token` 헤더로 전달)
    #[serde(default)]
    pub auth_token: String,
    /// 관리자 권한 토큰 여부
    #[serde(default)]
    pub admin: bool,
    /// 요청 제한 시간 (초)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            auth_token: String::new(),
            admin: false,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:9322".to_owned()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// 감사 폴링 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// 상태 폴링 주기 (초)
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// 종료 상태 도달 제한 시간 (초)
    #[serde(default = "default_audit_timeout_secs")]
    pub timeout_secs: u64,
}

impl AuditConfig {
    /// 폴링 주기를 [`Duration`]으로 반환합니다.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// 제한 시간을 [`Duration`]으로 반환합니다.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            timeout_secs: default_audit_timeout_secs(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    2
}

fn default_audit_timeout_secs() -> u64 {
    300
}

/// 실행기 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// 동시 워커 수
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// 전체 반복 횟수 (워커들에 분배됨)
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            iterations: default_iterations(),
        }
    }
}

fn default_concurrency() -> usize {
    1
}

fn default_iterations() -> usize {
    1
}

/// 공유 컨텍스트 설정
///
/// `Watcher.create_audit_and_delete`처럼 사전 생성된 감사 템플릿을
/// 요구하는 시나리오를 위해 실행 전에 만들어 둘 템플릿을 기술합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// 사전 생성할 감사 템플릿 수
    #[serde(default = "default_audit_template_count")]
    pub audit_template_count: usize,
    /// 템플릿에 사용할 목표 이름
    #[serde(default = "default_goal")]
    pub goal: String,
    /// 템플릿에 사용할 전략 이름
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            audit_template_count: default_audit_template_count(),
            goal: default_goal(),
            strategy: default_strategy(),
        }
    }
}

fn default_audit_template_count() -> usize {
    1
}

fn default_goal() -> String {
    "dummy".to_owned()
}

fn default_strategy() -> String {
    "dummy".to_owned()
}

// ─── 환경변수 오버라이드 헬퍼 ───────────────────────────────────────

fn override_string(target: &mut String, var: &str) {
    if let Ok(value) = std::env::var(var) {
        *target = value;
    }
}

fn override_bool(target: &mut bool, var: &str) {
    if let Ok(value) = std::env::var(var) {
        match value.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(var = var, value = %value, "invalid bool env override, ignoring"),
        }
    }
}

fn override_u64(target: &mut u64, var: &str) {
    if let Ok(value) = std::env::var(var) {
        match value.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(var = var, value = %value, "invalid u64 env override, ignoring"),
        }
    }
}

fn override_usize(target: &mut usize, var: &str) {
    if let Ok(value) = std::env::var(var) {
        match value.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(var = var, value = %value, "invalid usize env override, ignoring"),
        }
    }
}
