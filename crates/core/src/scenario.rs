//! 시나리오 시스템 — 등록, 메타데이터, 동적 관리
//!
//! [`Scenario`] trait은 벤치마크 시나리오 하나의 실행 단위를 정의하고,
//! [`ScenarioInfo`]는 실행 전 검증에 필요한 전제조건 메타데이터를
//! 명시적으로 선언합니다 (암묵적 어노테이션 스캔 없음).
//!
//! [`ScenarioRegistry`]는 이름 → 시나리오 매핑을 관리합니다.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::context::RunContext;
use crate::error::{RegistryError, ScenarioError};

/// Boxed future 타입 별칭
///
/// RPITIT trait을 dyn-compatible trait으로 감싸는 데 사용합니다.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// 최적화 서비스의 표준 서비스 이름
pub const SERVICE_WATCHER: &str = "watcher";

// ─── ScenarioInfo ────────────────────────────────────────────────────

/// 시나리오 메타데이터
///
/// 시나리오 등록 시 이름, 설명, 전제조건을 제공합니다.
/// 실행기는 시나리오 본문을 호출하기 전에 이 정보만으로 검증을 수행합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInfo {
    /// 시나리오 고유 이름 (예: `"Watcher.create_audit_and_delete"`)
    pub name: String,
    /// 시나리오 설명
    pub description: String,
    /// 대상 플랫폼에서 활성화되어 있어야 하는 서비스 목록
    pub required_services: Vec<String>,
    /// 실행 전에 준비되어야 하는 컨텍스트 이름 목록
    pub required_contexts: Vec<String>,
    /// 관리자 권한 필요 여부
    pub admin_required: bool,
}

impl ScenarioInfo {
    /// 전제조건 없는 메타데이터를 생성합니다.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required_services: Vec::new(),
            required_contexts: Vec::new(),
            admin_required: false,
        }
    }

    /// 필요한 서비스를 추가합니다.
    pub fn requires_service(mut self, service: impl Into<String>) -> Self {
        self.required_services.push(service.into());
        self
    }

    /// 필요한 컨텍스트를 추가합니다.
    pub fn requires_context(mut self, context: impl Into<String>) -> Self {
        self.required_contexts.push(context.into());
        self
    }

    /// 관리자 권한을 요구하도록 표시합니다.
    pub fn admin(mut self) -> Self {
        self.admin_required = true;
        self
    }
}

impl fmt::Display for ScenarioInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.name, self.description)
    }
}

// ─── Scenario Trait ──────────────────────────────────────────────────

/// 벤치마크 시나리오 trait
///
/// 하나의 호출(invocation)은 단일 논리 스레드에서 순차·블로킹으로
/// 실행됩니다. 유일한 중단 지점은 감사 폴링 루프이며,
/// [`RunContext`]의 취소 토큰으로 조기 종료할 수 있습니다.
///
/// # 구현 예시
/// ```ignore
/// struct NoopScenario {
///     info: ScenarioInfo,
/// }
///
/// impl Scenario for NoopScenario {
///     fn info(&self) -> &ScenarioInfo { &self.info }
///
///     async fn run(&self, _ctx: &RunContext) -> Result<(), ScenarioError> {
///         Ok(())
///     }
/// }
/// ```
pub trait Scenario: Send + Sync {
    /// 시나리오 메타데이터를 반환합니다.
    fn info(&self) -> &ScenarioInfo;

    /// 시나리오 본문을 1회 실행합니다.
    ///
    /// 에러는 실패한 호출로 기록될 뿐, 시나리오 내부에서 재시도하지
    /// 않습니다.
    fn run(&self, ctx: &RunContext) -> impl Future<Output = Result<(), ScenarioError>> + Send;
}

// ─── DynScenario Trait ───────────────────────────────────────────────

/// dyn-compatible 시나리오 trait
///
/// `Scenario` trait은 RPITIT를 사용하므로 `dyn Scenario`가 불가합니다.
/// `DynScenario`는 `BoxFuture`를 반환하여 `Vec<Box<dyn DynScenario>>`로
/// 시나리오를 동적 관리할 수 있게 합니다.
pub trait DynScenario: Send + Sync {
    /// 시나리오 메타데이터를 반환합니다.
    fn info(&self) -> &ScenarioInfo;

    /// 시나리오 본문을 1회 실행합니다.
    fn run<'a>(&'a self, ctx: &'a RunContext) -> BoxFuture<'a, Result<(), ScenarioError>>;
}

/// Scenario를 구현한 타입은 자동으로 DynScenario도 구현됩니다.
impl<T: Scenario> DynScenario for T {
    fn info(&self) -> &ScenarioInfo {
        Scenario::info(self)
    }

    fn run<'a>(&'a self, ctx: &'a RunContext) -> BoxFuture<'a, Result<(), ScenarioError>> {
        Box::pin(Scenario::run(self, ctx))
    }
}

impl fmt::Debug for dyn DynScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynScenario")
            .field("info", self.info())
            .finish()
    }
}

// ─── ScenarioRegistry ────────────────────────────────────────────────

/// 시나리오 레지스트리
///
/// 시나리오 이름 → 실행 단위 매핑을 관리합니다.
/// 등록 순서가 보존되며, 명시적 `register` 호출로만 채워집니다.
///
/// # 사용 예시
/// ```ignore
/// let mut registry = ScenarioRegistry::new();
/// registry.register(Box::new(list_templates))?;
/// registry.register(Box::new(create_and_delete))?;
///
/// let scenario = registry.get("Watcher.list_audit_templates").unwrap();
/// scenario.run(&ctx).await?;
/// ```
pub struct ScenarioRegistry {
    scenarios: Vec<Box<dyn DynScenario>>,
}

impl ScenarioRegistry {
    /// 빈 레지스트리를 생성합니다.
    pub fn new() -> Self {
        Self {
            scenarios: Vec::new(),
        }
    }

    /// 시나리오를 등록합니다.
    ///
    /// 동일한 이름의 시나리오가 이미 등록되어 있으면 에러를 반환합니다.
    pub fn register(&mut self, scenario: Box<dyn DynScenario>) -> Result<(), RegistryError> {
        let name = scenario.info().name.clone();
        if self.scenarios.iter().any(|s| s.info().name == name) {
            return Err(RegistryError::AlreadyRegistered { name });
        }
        self.scenarios.push(scenario);
        Ok(())
    }

    /// 시나리오를 해제하고 소유권을 반환합니다.
    pub fn unregister(&mut self, name: &str) -> Result<Box<dyn DynScenario>, RegistryError> {
        let pos = self.scenarios.iter().position(|s| s.info().name == name);
        match pos {
            Some(idx) => Ok(self.scenarios.remove(idx)),
            None => Err(RegistryError::NotFound {
                name: name.to_owned(),
            }),
        }
    }

    /// 이름으로 시나리오를 조회합니다.
    pub fn get(&self, name: &str) -> Option<&dyn DynScenario> {
        self.scenarios
            .iter()
            .find(|s| s.info().name == name)
            .map(|s| s.as_ref())
    }

    /// 등록 순서대로 모든 시나리오 메타데이터를 반환합니다.
    pub fn infos(&self) -> impl Iterator<Item = &ScenarioInfo> {
        self.scenarios.iter().map(|s| s.info())
    }

    /// 등록된 시나리오 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// 레지스트리가 비어 있는지 여부를 반환합니다.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl Default for ScenarioRegistry {
    fn default() -> Self {
        Self::new()
    }
}
