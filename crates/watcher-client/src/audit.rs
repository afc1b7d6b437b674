//! 감사 대기 루프 — 생성 후 종료 상태까지 폴링
//!
//! [`AuditWaiter`]는 감사를 생성한 뒤 상태를 주기적으로 폴링하여
//! 종료 상태(SUCCEEDED/FAILED)에 도달할 때까지 기다립니다.
//! 대기는 run-level 취소 토큰으로 중단 가능하며, 중단 시 진행 중인
//! 감사는 best-effort로 삭제됩니다.

use std::sync::Arc;
use std::time::Duration;

use metrics::{counter, histogram};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use watchbench_core::metrics as metric_names;
use watchbench_core::types::Audit;

use crate::api::WatcherApi;
use crate::config::WatcherClientConfig;
use crate::error::WatcherError;

/// 감사 생성-대기 루프
///
/// # 반환 보장
///
/// 에러 없이 반환된 감사의 상태는 항상 SUCCEEDED 또는 FAILED입니다.
/// PENDING/ONGOING 상태로 반환되는 경우는 없습니다. FAILED를 에러로
/// 취급할지는 호출자(시나리오)의 몫입니다 — 정리를 먼저 수행해야
/// 하기 때문입니다.
pub struct AuditWaiter<C: WatcherApi> {
    client: Arc<C>,
    poll_interval: Duration,
    timeout: Duration,
}

enum WaitOutcome {
    Terminal(Audit),
    TimedOut(String),
    Cancelled(String),
    Failed(WatcherError),
}

impl<C: WatcherApi> AuditWaiter<C> {
    /// 설정에서 대기 루프를 생성합니다.
    pub fn new(client: Arc<C>, config: &WatcherClientConfig) -> Self {
        Self {
            client,
            poll_interval: config.poll_interval,
            timeout: config.audit_timeout,
        }
    }

    /// 주기/제한 시간을 직접 지정해 생성합니다.
    pub fn with_timing(client: Arc<C>, poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            client,
            poll_interval,
            timeout,
        }
    }

    /// 감사를 생성하고 종료 상태까지 기다립니다.
    ///
    /// 생성 자체가 실패하면 정리 없이 즉시 반환합니다 (삭제할 감사가
    /// 없음). 생성 후 취소되면 감사를 best-effort로 삭제하고
    /// [`WatcherError::Cancelled`]를 반환합니다.
    pub async fn create_and_wait(
        &self,
        template_uuid: &str,
        cancel: &CancellationToken,
    ) -> Result<Audit, WatcherError> {
        let mut audit = self.client.create_audit(template_uuid).await?;
        debug!(
            uuid = %audit.uuid,
            template = template_uuid,
            "audit created, awaiting terminal state"
        );

        match self.wait_terminal(&mut audit, cancel).await {
            WaitOutcome::Terminal(audit) => Ok(audit),
            WaitOutcome::TimedOut(uuid) => Err(WatcherError::Timeout {
                what: format!("audit {uuid}"),
                secs: self.timeout.as_secs(),
            }),
            WaitOutcome::Cancelled(uuid) => {
                // 중단된 실행이 감사를 누수하지 않도록 시도만 해 둔다
                if let Err(e) = self.client.delete_audit(&uuid).await {
                    warn!(uuid = %uuid, error = %e, "failed to delete audit after cancellation");
                }
                Err(WatcherError::Cancelled)
            }
            WaitOutcome::Failed(e) => Err(e),
        }
    }

    async fn wait_terminal(&self, audit: &mut Audit, cancel: &CancellationToken) -> WaitOutcome {
        let started = tokio::time::Instant::now();
        let deadline = started + self.timeout;

        loop {
            if audit.state.is_terminal() {
                histogram!(
                    metric_names::AUDIT_WAIT_DURATION_SECONDS,
                    metric_names::LABEL_STATE => audit.state.as_str(),
                )
                .record(started.elapsed().as_secs_f64());
                return WaitOutcome::Terminal(audit.clone());
            }

            if tokio::time::Instant::now() >= deadline {
                return WaitOutcome::TimedOut(audit.uuid.clone());
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    return WaitOutcome::Cancelled(audit.uuid.clone());
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }

            counter!(metric_names::AUDIT_POLLS_TOTAL).increment(1);
            match self.client.get_audit(&audit.uuid).await {
                Ok(updated) => *audit = updated,
                Err(e) => return WaitOutcome::Failed(e),
            }
        }
    }
}
