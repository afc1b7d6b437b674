//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름을 중앙에서 정의합니다.
//! 각 구성 요소는 이 상수를 사용하여 `metrics::counter!()`,
//! `metrics::histogram!()` 매크로를 호출합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `watchbench_`
//! - 구성 요소: `scenario_`, `client_`, `audit_`
//! - 접미어: `_total` (counter), `_seconds` (histogram/latency)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(watchbench_core::metrics::SCENARIO_RUNS_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 시나리오 이름 레이블 키
pub const LABEL_SCENARIO: &str = "scenario";

/// 결과 레이블 키 (success, failure)
pub const LABEL_RESULT: &str = "result";

/// 클라이언트 연산 레이블 키 (create_audit_template, list_audit_templates 등)
pub const LABEL_OPERATION: &str = "operation";

/// 감사 종료 상태 레이블 키 (SUCCEEDED, FAILED)
pub const LABEL_STATE: &str = "state";

// ─── 시나리오 메트릭 ────────────────────────────────────────────────

/// 시나리오: 실행된 전체 반복 수 (counter, label: scenario, result)
pub const SCENARIO_RUNS_TOTAL: &str = "watchbench_scenario_runs_total";

/// 시나리오: 반복 소요 시간 (histogram, 초, label: scenario)
pub const SCENARIO_DURATION_SECONDS: &str = "watchbench_scenario_duration_seconds";

// ─── 클라이언트 메트릭 ──────────────────────────────────────────────

/// 클라이언트: API 요청 수 (counter, label: operation, result)
pub const CLIENT_REQUESTS_TOTAL: &str = "watchbench_client_requests_total";

/// 클라이언트: API 요청 소요 시간 (histogram, 초, label: operation)
pub const CLIENT_REQUEST_DURATION_SECONDS: &str = "watchbench_client_request_duration_seconds";

// ─── 감사 폴링 메트릭 ──────────────────────────────────────────────

/// 감사: 상태 폴링 횟수 (counter)
pub const AUDIT_POLLS_TOTAL: &str = "watchbench_audit_polls_total";

/// 감사: 종료 상태 도달까지 대기 시간 (histogram, 초, label: state)
pub const AUDIT_WAIT_DURATION_SECONDS: &str = "watchbench_audit_wait_duration_seconds";
