//! 실행 컨텍스트 — 시나리오에 제공되는 공유 데이터
//!
//! [`RunContext`]는 하네스가 구성해 시나리오에 넘기는 읽기 전용
//! 데이터입니다. 한 번 구성된 뒤에는 변경되지 않으며, 하나의 벤치마크
//! 실행 내 모든 동시 호출이 `Arc`로 공유합니다.

use tokio_util::sync::CancellationToken;

use crate::error::ValidationError;

/// `audit_templates` 컨텍스트의 표준 이름
pub const CONTEXT_AUDIT_TEMPLATES: &str = "audit_templates";

/// 시나리오 실행 컨텍스트
///
/// 사전 생성된 감사 템플릿 UUID 목록(순서 보존)과 run-level 취소
/// 토큰을 담습니다. 취소 토큰은 Ctrl-C 또는 전체 실행 제한 시간에
/// 의해 트립되며, 진행 중인 감사 폴링 루프를 조기 종료시킵니다.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    /// 사전 생성된 감사 템플릿 UUID (순서 보존)
    audit_templates: Vec<String>,
    /// run-level 취소 토큰
    cancel: CancellationToken,
}

impl RunContext {
    /// 빈 컨텍스트를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 감사 템플릿 UUID 목록으로 컨텍스트를 생성합니다.
    pub fn with_audit_templates(audit_templates: Vec<String>) -> Self {
        Self {
            audit_templates,
            cancel: CancellationToken::new(),
        }
    }

    /// 취소 토큰을 교체합니다.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// 감사 템플릿 UUID 목록을 반환합니다.
    pub fn audit_templates(&self) -> &[String] {
        &self.audit_templates
    }

    /// 첫 번째 감사 템플릿 UUID를 반환합니다.
    ///
    /// 컨텍스트가 비어 있으면 [`ValidationError::MissingContext`]를
    /// 반환합니다. 검증 단계를 통과한 시나리오에서는 발생하지 않습니다.
    pub fn first_audit_template(&self, scenario: &str) -> Result<&str, ValidationError> {
        self.audit_templates
            .first()
            .map(String::as_str)
            .ok_or_else(|| ValidationError::MissingContext {
                scenario: scenario.to_owned(),
                context: CONTEXT_AUDIT_TEMPLATES.to_owned(),
            })
    }

    /// 컨텍스트가 해당 이름의 데이터를 제공하는지 확인합니다.
    pub fn provides(&self, context: &str) -> bool {
        context == CONTEXT_AUDIT_TEMPLATES && !self.audit_templates.is_empty()
    }

    /// run-level 취소 토큰을 반환합니다.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_audit_template_returns_first_in_order() {
        let ctx = RunContext::with_audit_templates(vec!["tpl-1".to_owned(), "tpl-2".to_owned()]);
        assert_eq!(ctx.first_audit_template("s").unwrap(), "tpl-1");
    }

    #[test]
    fn first_audit_template_missing_is_validation_error() {
        let ctx = RunContext::new();
        let err = ctx.first_audit_template("Watcher.create_audit_and_delete");
        assert!(matches!(
            err,
            Err(ValidationError::MissingContext { .. })
        ));
    }

    #[test]
    fn provides_audit_templates_only_when_populated() {
        let empty = RunContext::new();
        assert!(!empty.provides(CONTEXT_AUDIT_TEMPLATES));

        let populated = RunContext::with_audit_templates(vec!["tpl-1".to_owned()]);
        assert!(populated.provides(CONTEXT_AUDIT_TEMPLATES));
        assert!(!populated.provides("other"));
    }

    #[test]
    fn cloned_context_shares_cancel_token() {
        let ctx = RunContext::new();
        let clone = ctx.clone();
        ctx.cancel_token().cancel();
        assert!(clone.cancel_token().is_cancelled());
    }
}
