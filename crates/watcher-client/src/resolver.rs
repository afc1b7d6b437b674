//! 이름 해석 — 목표/전략 이름을 서비스 UUID로 변환
//!
//! [`ResourceResolver`]는 `/v1/goals`와 `/v1/strategies` 스냅샷을
//! 캐시해 두고, 사람이 읽는 이름을 서비스 측 레코드로 해석합니다.
//! 시나리오 본문 시작 시점에 호출되며, 해석 실패는 외부 호출 없이
//! 해당 호출을 실패시킵니다.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use watchbench_core::types::{Goal, Strategy};

use crate::api::WatcherApi;
use crate::error::WatcherError;

#[derive(Debug, Clone)]
struct Catalog {
    goals: Vec<Goal>,
    strategies: Vec<Strategy>,
}

/// 목표/전략 이름 해석기
///
/// 카탈로그는 최초 해석 시 한 번만 조회하고 이후 재사용합니다.
/// 벤치마크 실행 중 카탈로그가 바뀌는 경우는 [`refresh`](Self::refresh)로
/// 무효화할 수 있습니다.
pub struct ResourceResolver<C: WatcherApi> {
    client: Arc<C>,
    catalog: Mutex<Option<Catalog>>,
}

impl<C: WatcherApi> ResourceResolver<C> {
    /// 새 해석기를 생성합니다.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            catalog: Mutex::new(None),
        }
    }

    /// 목표/전략 이름 쌍을 서비스 레코드로 해석합니다.
    ///
    /// 전략이 해당 목표에 속하는지도 함께 검증합니다
    /// (`goal_uuid`가 비어 있는 레코드는 소속 검증을 건너뜁니다).
    pub async fn resolve(
        &self,
        goal_name: &str,
        strategy_name: &str,
    ) -> Result<(Goal, Strategy), WatcherError> {
        let mut cached = self.catalog.lock().await;
        let catalog = match cached.take() {
            Some(catalog) => catalog,
            None => {
                debug!("loading goal/strategy catalog");
                let goals = self.client.list_goals().await?;
                let strategies = self.client.list_strategies().await?;
                Catalog { goals, strategies }
            }
        };

        let goal = catalog
            .goals
            .iter()
            .find(|g| g.name == goal_name)
            .cloned();
        let strategy = catalog
            .strategies
            .iter()
            .find(|s| s.name == strategy_name)
            .cloned();
        *cached = Some(catalog);

        let goal = goal.ok_or_else(|| WatcherError::UnknownGoal {
            name: goal_name.to_owned(),
        })?;
        let strategy = strategy.ok_or_else(|| WatcherError::UnknownStrategy {
            name: strategy_name.to_owned(),
        })?;

        if !strategy.goal_uuid.is_empty() && strategy.goal_uuid != goal.uuid {
            return Err(WatcherError::StrategyGoalMismatch {
                strategy: strategy_name.to_owned(),
                goal: goal_name.to_owned(),
            });
        }

        Ok((goal, strategy))
    }

    /// 캐시된 카탈로그를 무효화합니다.
    pub async fn refresh(&self) {
        *self.catalog.lock().await = None;
    }
}
