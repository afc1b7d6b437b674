//! 에러 타입 — 도메인별 에러 정의

/// Watchbench 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum WatchbenchError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 실행 전 검증 에러
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// 시나리오 실행 에러
    #[error("scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// 레지스트리 에러
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 실행 전 검증 에러
///
/// 시나리오 본문이 실행되기 전에 감지되며, 외부 API 호출 없이
/// 호출 자체를 중단시킵니다. 재시도 대상이 아닙니다.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// 대상 서비스에 연결할 수 없음
    #[error("required service '{service}' unavailable: {reason}")]
    ServiceUnavailable { service: String, reason: String },

    /// 관리자 권한 필요
    #[error("scenario '{scenario}' requires admin credentials")]
    AdminRequired { scenario: String },

    /// 필수 컨텍스트 누락
    #[error("scenario '{scenario}' requires context '{context}'")]
    MissingContext { scenario: String, context: String },

    /// 등록되지 않은 시나리오
    #[error("unknown scenario: {name}")]
    UnknownScenario { name: String },

    /// 유효하지 않은 실행 파라미터
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// 시나리오 실행 에러
///
/// 시나리오 본문 내부에서 발생한 에러입니다. 하네스는 해당 반복을
/// 실패로 기록할 뿐 자동 재시도하지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// 실행 전 검증 실패
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 클라이언트 API 호출 실패
    #[error("watcher api call '{operation}' failed: {reason}")]
    Client { operation: String, reason: String },

    /// 리소스 생성 거부
    #[error("service rejected {resource} creation: {reason}")]
    CreationRejected { resource: String, reason: String },

    /// 존재하지 않는 리소스
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// 감사(audit)가 FAILED 종료 상태에 도달
    ///
    /// 정리(cleanup)는 이미 수행된 뒤 보고용으로 전파됩니다.
    #[error("audit {uuid} finished in FAILED state")]
    AuditFailed { uuid: String },

    /// 제한 시간 내에 종료 상태에 도달하지 못함
    #[error("timed out after {secs}s waiting for {what}")]
    Timeout { what: String, secs: u64 },

    /// 실행 중단 (run-level abort)
    #[error("scenario cancelled")]
    Cancelled,
}

/// 시나리오 레지스트리 에러
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// 동일한 이름의 시나리오가 이미 등록됨
    #[error("scenario already registered: {name}")]
    AlreadyRegistered { name: String },

    /// 등록되지 않은 시나리오
    #[error("scenario not registered: {name}")]
    NotFound { name: String },
}
