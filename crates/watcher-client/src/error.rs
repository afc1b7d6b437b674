//! 에러 타입 — Watcher API 호출 에러

use watchbench_core::error::ScenarioError;

/// Watcher 클라이언트 에러
#[derive(Debug, thiserror::Error)]
pub enum WatcherError {
    /// 서비스 연결 실패 (전송 계층)
    #[error("watcher connection failed: {0}")]
    Connection(String),

    /// 서비스가 에러 상태 코드를 반환
    #[error("watcher api '{operation}' returned {status}: {message}")]
    Api {
        operation: String,
        status: u16,
        message: String,
    },

    /// 리소스 생성 거부 (400/409)
    #[error("service rejected {resource} creation: {reason}")]
    CreationRejected { resource: String, reason: String },

    /// 존재하지 않는 식별자에 대한 조회/삭제 (404)
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// 응답 본문을 해석할 수 없음
    #[error("invalid watcher response: {0}")]
    InvalidResponse(String),

    /// 유효하지 않은 리소스 식별자 (요청 전 검증)
    #[error("invalid resource id: {0}")]
    InvalidId(String),

    /// 알 수 없는 목표 이름
    #[error("unknown goal: {name}")]
    UnknownGoal { name: String },

    /// 알 수 없는 전략 이름
    #[error("unknown strategy: {name}")]
    UnknownStrategy { name: String },

    /// 전략이 요청한 목표에 속하지 않음
    #[error("strategy '{strategy}' does not belong to goal '{goal}'")]
    StrategyGoalMismatch { strategy: String, goal: String },

    /// 제한 시간 내에 종료 상태에 도달하지 못함
    #[error("timed out after {secs}s waiting for {what}")]
    Timeout { what: String, secs: u64 },

    /// run-level 취소로 대기가 중단됨
    #[error("watcher operation cancelled")]
    Cancelled,
}

/// 클라이언트 에러를 시나리오 에러로 변환합니다.
///
/// 타임아웃/취소/404/생성 거부는 고유 변형을 유지하고,
/// 나머지는 클라이언트 호출 실패로 분류됩니다.
impl From<WatcherError> for ScenarioError {
    fn from(err: WatcherError) -> Self {
        match err {
            WatcherError::NotFound { resource, id } => ScenarioError::NotFound { resource, id },
            WatcherError::CreationRejected { resource, reason } => {
                ScenarioError::CreationRejected { resource, reason }
            }
            WatcherError::Timeout { what, secs } => ScenarioError::Timeout { what, secs },
            WatcherError::Cancelled => ScenarioError::Cancelled,
            WatcherError::Api {
                operation,
                status,
                message,
            } => ScenarioError::Client {
                operation,
                reason: format!("status {status}: {message}"),
            },
            other => ScenarioError::Client {
                operation: "watcher".to_owned(),
                reason: other.to_string(),
            },
        }
    }
}
