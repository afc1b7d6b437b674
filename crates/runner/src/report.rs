//! 실행 리포트 — 반복 결과 집계
//!
//! 반복별 결과를 모아 성공/실패 수, 에러 분류, 지속 시간 통계를
//! 계산합니다. 리포트는 Serialize를 구현하므로 JSON 출력에 바로 쓸 수
//! 있습니다.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use watchbench_core::error::ScenarioError;

/// 반복 1회의 결과
#[derive(Debug)]
pub struct IterationResult {
    /// 성공 여부
    pub ok: bool,
    /// 실패 시 에러 분류 키
    pub error_kind: Option<String>,
    /// 본문 실행 시간
    pub duration: Duration,
}

impl IterationResult {
    /// 시나리오 실행 결과에서 반복 결과를 만듭니다.
    pub fn from_run(result: &Result<(), ScenarioError>, duration: Duration) -> Self {
        match result {
            Ok(()) => Self {
                ok: true,
                error_kind: None,
                duration,
            },
            Err(e) => Self {
                ok: false,
                error_kind: Some(error_kind(e).to_owned()),
                duration,
            },
        }
    }
}

/// 에러 분류 키
///
/// 리포트의 `errors` 맵과 메트릭 레이블에 사용합니다.
pub fn error_kind(err: &ScenarioError) -> &'static str {
    match err {
        ScenarioError::Validation(_) => "validation",
        ScenarioError::Client { .. } => "client",
        ScenarioError::CreationRejected { .. } => "creation_rejected",
        ScenarioError::NotFound { .. } => "not_found",
        ScenarioError::AuditFailed { .. } => "audit_failed",
        ScenarioError::Timeout { .. } => "timeout",
        ScenarioError::Cancelled => "cancelled",
    }
}

/// 지속 시간 통계 (초)
#[derive(Debug, Clone, Default, Serialize)]
pub struct DurationStats {
    pub min_secs: f64,
    pub mean_secs: f64,
    pub max_secs: f64,
    pub p95_secs: f64,
}

impl DurationStats {
    fn from_durations(durations: &[Duration]) -> Self {
        if durations.is_empty() {
            return Self::default();
        }

        let mut secs: Vec<f64> = durations.iter().map(Duration::as_secs_f64).collect();
        secs.sort_by(f64::total_cmp);

        let sum: f64 = secs.iter().sum();
        // 최근접 순위(nearest-rank) 방식의 p95
        let rank = ((secs.len() as f64) * 0.95).ceil() as usize;
        let p95_idx = rank.max(1) - 1;

        Self {
            min_secs: secs[0],
            mean_secs: sum / secs.len() as f64,
            max_secs: secs[secs.len() - 1],
            p95_secs: secs[p95_idx],
        }
    }
}

/// 벤치마크 실행 리포트
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// 실행한 시나리오 이름
    pub scenario: String,
    /// 완료된 반복 수 (취소로 시작되지 않은 반복은 제외)
    pub iterations: usize,
    /// 성공한 반복 수
    pub succeeded: usize,
    /// 실패한 반복 수
    pub failed: usize,
    /// 에러 분류별 실패 수
    pub errors: BTreeMap<String, usize>,
    /// 반복 지속 시간 통계
    pub durations: DurationStats,
    /// 전체 실행 경과 시간 (초)
    pub wall_time_secs: f64,
}

impl RunReport {
    /// 반복 결과 목록에서 리포트를 집계합니다.
    pub fn from_results(
        scenario: impl Into<String>,
        results: &[IterationResult],
        wall_time: Duration,
    ) -> Self {
        let succeeded = results.iter().filter(|r| r.ok).count();
        let mut errors: BTreeMap<String, usize> = BTreeMap::new();
        for result in results {
            if let Some(kind) = &result.error_kind {
                *errors.entry(kind.clone()).or_insert(0) += 1;
            }
        }
        let durations: Vec<Duration> = results.iter().map(|r| r.duration).collect();

        Self {
            scenario: scenario.into(),
            iterations: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            errors,
            durations: DurationStats::from_durations(&durations),
            wall_time_secs: wall_time.as_secs_f64(),
        }
    }

    /// 모든 반복이 성공했는지 여부
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(secs: u64) -> IterationResult {
        IterationResult::from_run(&Ok(()), Duration::from_secs(secs))
    }

    fn failed(err: ScenarioError, secs: u64) -> IterationResult {
        IterationResult::from_run(&Err(err), Duration::from_secs(secs))
    }

    #[test]
    fn report_counts_successes_and_failures() {
        let results = vec![
            ok(1),
            ok(2),
            failed(
                ScenarioError::AuditFailed {
                    uuid: "a1".to_owned(),
                },
                3,
            ),
            failed(
                ScenarioError::Timeout {
                    what: "audit a2".to_owned(),
                    secs: 300,
                },
                4,
            ),
            failed(
                ScenarioError::AuditFailed {
                    uuid: "a3".to_owned(),
                },
                5,
            ),
        ];

        let report = RunReport::from_results("s", &results, Duration::from_secs(10));
        assert_eq!(report.iterations, 5);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 3);
        assert_eq!(report.errors.get("audit_failed"), Some(&2));
        assert_eq!(report.errors.get("timeout"), Some(&1));
        assert!(!report.all_succeeded());
    }

    #[test]
    fn duration_stats_cover_min_mean_max() {
        let results: Vec<_> = (1..=10).map(ok).collect();
        let report = RunReport::from_results("s", &results, Duration::from_secs(10));

        assert_eq!(report.durations.min_secs, 1.0);
        assert_eq!(report.durations.max_secs, 10.0);
        assert_eq!(report.durations.mean_secs, 5.5);
        // 10개 표본의 nearest-rank p95는 10번째 값
        assert_eq!(report.durations.p95_secs, 10.0);
    }

    #[test]
    fn empty_results_produce_zeroed_report() {
        let report = RunReport::from_results("s", &[], Duration::ZERO);
        assert_eq!(report.iterations, 0);
        assert!(report.all_succeeded());
        assert_eq!(report.durations.min_secs, 0.0);
    }

    #[test]
    fn report_serializes_to_json() {
        let report = RunReport::from_results("s", &[ok(1)], Duration::from_secs(1));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["scenario"], "s");
        assert_eq!(json["succeeded"], 1);
        assert!(json["errors"].as_object().unwrap().is_empty());
    }

    #[test]
    fn error_kind_distinguishes_variants() {
        assert_eq!(error_kind(&ScenarioError::Cancelled), "cancelled");
        assert_eq!(
            error_kind(&ScenarioError::Client {
                operation: "x".to_owned(),
                reason: "y".to_owned(),
            }),
            "client"
        );
    }
}
