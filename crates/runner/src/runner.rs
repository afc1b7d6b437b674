//! 시나리오 실행기 — 검증 후 동시 반복 실행
//!
//! [`ScenarioRunner`]는 레지스트리에서 시나리오를 찾아 전제조건을
//! 검증한 뒤, 설정된 동시성만큼 워커를 띄워 반복을 나눠 실행합니다.
//! 반복 분배는 공유 카운터에서 가져가는 방식이므로 워커별 편차가
//! 없습니다.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{info, warn};

use watchbench_core::config::WatchbenchConfig;
use watchbench_core::context::RunContext;
use watchbench_core::error::{ValidationError, WatchbenchError};
use watchbench_core::metrics as metric_names;
use watchbench_core::scenario::ScenarioRegistry;
use watchbench_watcher_client::api::WatcherApi;

use crate::report::{IterationResult, RunReport};
use crate::validation::validate_preconditions;

/// 시나리오 실행기
///
/// 레지스트리와 설정을 소유합니다. 하나의 실행기로 여러 시나리오를
/// 순차 실행할 수 있습니다.
pub struct ScenarioRunner {
    registry: Arc<ScenarioRegistry>,
    config: WatchbenchConfig,
}

impl ScenarioRunner {
    /// 실행기를 생성합니다.
    pub fn new(registry: ScenarioRegistry, config: WatchbenchConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config,
        }
    }

    /// 레지스트리에 대한 참조를 반환합니다.
    pub fn registry(&self) -> &ScenarioRegistry {
        &self.registry
    }

    /// 시나리오를 이름으로 찾아 실행하고 리포트를 반환합니다.
    ///
    /// 검증 실패는 에러로 반환되며 반복은 시작되지 않습니다. 반복
    /// 중의 시나리오 에러는 리포트에 실패로 집계될 뿐 실행을 중단하지
    /// 않습니다. 취소 토큰이 트립되면 새 반복을 더 시작하지 않습니다.
    pub async fn run<C: WatcherApi + 'static>(
        &self,
        name: &str,
        client: Arc<C>,
        ctx: RunContext,
    ) -> Result<RunReport, WatchbenchError> {
        let scenario = self
            .registry
            .get(name)
            .ok_or_else(|| ValidationError::UnknownScenario {
                name: name.to_owned(),
            })?;

        validate_preconditions(scenario.info(), &self.config, &ctx, client.as_ref()).await?;

        let iterations = self.config.runner.iterations;
        let concurrency = self.config.runner.concurrency.max(1);
        info!(
            scenario = name,
            iterations, concurrency, "starting benchmark run"
        );

        let wall = Instant::now();
        let next_iteration = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::with_capacity(concurrency);

        for _ in 0..concurrency {
            let registry = Arc::clone(&self.registry);
            let name = name.to_owned();
            let ctx = ctx.clone();
            let next_iteration = Arc::clone(&next_iteration);

            handles.push(tokio::spawn(async move {
                let Some(scenario) = registry.get(&name) else {
                    return Vec::new();
                };
                let mut results = Vec::new();

                while next_iteration.fetch_add(1, Ordering::SeqCst) < iterations {
                    if ctx.cancel_token().is_cancelled() {
                        break;
                    }

                    let started = Instant::now();
                    let result = scenario.run(&ctx).await;
                    let duration = started.elapsed();

                    let outcome = if result.is_ok() { "success" } else { "error" };
                    counter!(
                        metric_names::SCENARIO_RUNS_TOTAL,
                        metric_names::LABEL_SCENARIO => name.clone(),
                        metric_names::LABEL_RESULT => outcome,
                    )
                    .increment(1);
                    histogram!(
                        metric_names::SCENARIO_DURATION_SECONDS,
                        metric_names::LABEL_SCENARIO => name.clone(),
                    )
                    .record(duration.as_secs_f64());

                    if let Err(e) = &result {
                        warn!(scenario = %name, error = %e, "iteration failed");
                    }
                    results.push(IterationResult::from_run(&result, duration));
                }
                results
            }));
        }

        let mut results = Vec::with_capacity(iterations);
        for handle in handles {
            match handle.await {
                Ok(worker_results) => results.extend(worker_results),
                Err(e) => warn!(error = %e, "worker task aborted"),
            }
        }

        let report = RunReport::from_results(name, &results, wall.elapsed());
        info!(
            scenario = name,
            iterations = report.iterations,
            succeeded = report.succeeded,
            failed = report.failed,
            "benchmark run finished"
        );
        Ok(report)
    }
}
