//! Watchbench 실행기 크레이트
//!
//! 시나리오 실행의 전체 수명을 담당합니다: 전제조건 검증, 공유
//! 컨텍스트 준비/정리, 동시 반복 실행, 결과 집계.
//!
//! # Module Structure
//!
//! - [`validation`]: 실행 전 전제조건 검증
//! - [`context`]: 감사 템플릿 컨텍스트 수명 관리
//! - [`runner`]: 동시 반복 실행기
//! - [`report`]: 반복 결과 집계와 리포트

pub mod context;
pub mod report;
pub mod runner;
pub mod validation;

pub use context::AuditTemplateContext;
pub use report::{DurationStats, IterationResult, RunReport};
pub use runner::ScenarioRunner;
pub use validation::validate_preconditions;
