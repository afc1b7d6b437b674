//! 도메인 타입 — 시스템 전역에서 사용되는 공통 타입
//!
//! Watcher 서비스의 리소스(감사 템플릿, 감사, 목표, 전략)를
//! 나타내는 데이터 구조를 정의합니다. 모든 타입은 서비스의
//! JSON 와이어 형식과 serde로 직렬화 호환됩니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 감사 템플릿
///
/// 목표(goal)와 전략(strategy)을 묶은 재사용 가능한 최적화 설정입니다.
/// 생성 이후 불변이며, UUID로 명시적으로 삭제됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTemplate {
    /// 템플릿 UUID
    pub uuid: String,
    /// 템플릿 이름
    pub name: String,
    /// 목표 이름 (예: `"workload_balancing"`)
    #[serde(default)]
    pub goal: String,
    /// 전략 이름 (예: `"workload_stabilization"`)
    #[serde(default)]
    pub strategy: String,
    /// 설명 (detail 조회 시에만 채워질 수 있음)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl fmt::Display for AuditTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, goal={}, strategy={})",
            self.name, self.uuid, self.goal, self.strategy,
        )
    }
}

/// 감사 (audit)
///
/// 감사 템플릿 하나에 대한 실행 인스턴스입니다.
/// 생성 시 반드시 존재하는 템플릿을 참조해야 하며,
/// 템플릿보다 먼저 삭제되어야 합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    /// 감사 UUID
    pub uuid: String,
    /// 참조하는 감사 템플릿 UUID
    pub audit_template_uuid: String,
    /// 현재 상태
    pub state: AuditState,
    /// 감사 유형 (`"ONESHOT"` 고정)
    #[serde(default = "default_audit_type")]
    pub audit_type: String,
}

fn default_audit_type() -> String {
    "ONESHOT".to_owned()
}

impl fmt::Display for Audit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "audit {} [{}]", self.uuid, self.state)
    }
}

/// 감사 상태
///
/// 상태 전환: `Pending -> Ongoing -> {Succeeded, Failed}`.
/// `Cancelled`는 외부에서만 도달 가능하며, 폴링 루프는
/// `Succeeded`/`Failed`만 종료 상태로 취급합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditState {
    /// 대기 중
    #[serde(rename = "PENDING")]
    Pending,
    /// 진행 중
    #[serde(rename = "ONGOING")]
    Ongoing,
    /// 성공 종료
    #[serde(rename = "SUCCEEDED")]
    Succeeded,
    /// 실패 종료
    #[serde(rename = "FAILED")]
    Failed,
    /// 외부 취소
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

impl AuditState {
    /// 폴링 루프 기준의 종료 상태 여부를 반환합니다.
    ///
    /// `Cancelled`는 외부 전이이므로 종료 상태로 취급하지 않습니다.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// 와이어 표기 문자열을 반환합니다.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Ongoing => "ONGOING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for AuditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 최적화 목표
///
/// 사람이 읽는 이름(`name`)을 서비스 측 UUID로 해석한 결과입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// 목표 UUID
    pub uuid: String,
    /// 목표 이름 (예: `"workload_balancing"`)
    pub name: String,
    /// 표시용 이름
    #[serde(default)]
    pub display_name: String,
}

/// 최적화 전략
///
/// 특정 목표를 달성하기 위한 알고리즘입니다.
/// 항상 하나의 목표에 소속됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    /// 전략 UUID
    pub uuid: String,
    /// 전략 이름
    pub name: String,
    /// 표시용 이름
    #[serde(default)]
    pub display_name: String,
    /// 소속 목표 UUID
    #[serde(default)]
    pub goal_uuid: String,
}

/// 정렬 방향
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDir {
    /// 오름차순 (기본값)
    #[default]
    #[serde(rename = "asc")]
    Asc,
    /// 내림차순
    #[serde(rename = "desc")]
    Desc,
}

impl SortDir {
    /// 쿼리 파라미터 표기를 반환합니다.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 감사 템플릿 목록 조회 쿼리
///
/// 모든 필드는 독립적으로 생략 가능합니다.
///
/// # limit 의미
/// - `Some(0)`: 서비스 페이지 크기와 무관하게 전체 목록을 가져옵니다.
/// - `Some(n)` (n > 0): 최대 n건만 반환합니다.
/// - `None`: 서비스 측 기본 상한(`api.max_limit`)을 따릅니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateQuery {
    /// 이름 필터
    pub name: Option<String>,
    /// 목표 이름 필터
    pub goal: Option<String>,
    /// 전략 이름 필터
    pub strategy: Option<String>,
    /// 최대 반환 건수
    pub limit: Option<u32>,
    /// 정렬 기준 필드
    pub sort_key: Option<String>,
    /// 정렬 방향
    pub sort_dir: Option<SortDir>,
    /// 상세 필드 포함 여부
    #[serde(default)]
    pub detail: bool,
}

impl TemplateQuery {
    /// 빈 쿼리(필터 없음)를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 전체 목록 조회 여부 (`limit == Some(0)`)를 반환합니다.
    pub fn wants_all(&self) -> bool {
        self.limit == Some(0)
    }
}

/// 감사 템플릿 생성 요청
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    /// 템플릿 이름
    pub name: String,
    /// 해석된 목표 UUID
    pub goal: String,
    /// 해석된 전략 UUID
    pub strategy: String,
    /// 설명
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
