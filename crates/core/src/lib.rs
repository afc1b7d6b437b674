//! Watchbench 공통 크레이트 — 설정, 에러, 도메인 타입, 시나리오 레지스트리
//!
//! # Module Structure
//!
//! - [`error`]: 도메인 에러 타입 (`WatchbenchError`, `ValidationError`, ...)
//! - [`config`]: 통합 설정 (`WatchbenchConfig`, 환경변수 오버라이드)
//! - [`types`]: 도메인 타입 (`AuditTemplate`, `Audit`, `Goal`, `Strategy`)
//! - [`scenario`]: 시나리오 trait과 레지스트리 (`Scenario`, `ScenarioRegistry`)
//! - [`context`]: 실행 컨텍스트 (`RunContext`)
//! - [`metrics`]: 메트릭 이름 상수

pub mod config;
pub mod context;
pub mod error;
pub mod metrics;
pub mod scenario;
pub mod types;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{
    ConfigError, RegistryError, ScenarioError, ValidationError, WatchbenchError,
};

// 설정
pub use config::WatchbenchConfig;

// 실행 컨텍스트
pub use context::{CONTEXT_AUDIT_TEMPLATES, RunContext};

// 시나리오
pub use scenario::{
    BoxFuture, DynScenario, SERVICE_WATCHER, Scenario, ScenarioInfo, ScenarioRegistry,
};

// 도메인 타입
pub use types::{
    Audit, AuditState, AuditTemplate, CreateTemplateRequest, Goal, SortDir, Strategy,
    TemplateQuery,
};
