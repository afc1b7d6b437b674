//! Watchbench Watcher 클라이언트 — REST API 래퍼와 감사 대기 루프
//!
//! # Module Structure
//!
//! - [`error`]: 도메인 에러 타입 (`WatcherError`)
//! - [`config`]: 클라이언트 설정 (`WatcherClientConfig`)
//! - [`api`]: Watcher API 추상화 (`WatcherApi` trait, `HttpWatcherClient`)
//! - [`resolver`]: 목표/전략 이름 해석 (`ResourceResolver`)
//! - [`audit`]: 감사 생성-대기 루프 (`AuditWaiter`)
//! - [`mock`]: 테스트용 인메모리 구현 (`MockWatcherClient`, `mock` feature)
//!
//! # Architecture
//!
//! ```text
//! Scenario body
//!     |
//!     ├─ ResourceResolver.resolve()   (이름 -> UUID)
//!     ├─ WatcherApi.create_*/list_*/delete_*
//!     └─ AuditWaiter.create_and_wait  (폴링, 취소 가능)
//!                |
//!                ▼
//!        Watcher service (/v1)
//! ```

pub mod api;
pub mod audit;
pub mod config;
pub mod error;
pub mod resolver;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// --- Public API Re-exports ---

// API 추상화
pub use api::{HttpWatcherClient, WatcherApi};

// 감사 대기
pub use audit::AuditWaiter;

// 설정
pub use config::WatcherClientConfig;

// 에러
pub use error::WatcherError;

// 이름 해석
pub use resolver::ResourceResolver;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockWatcherClient;
