//! `watchbench run` command handler

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use watchbench_core::config::WatchbenchConfig;
use watchbench_core::context::{CONTEXT_AUDIT_TEMPLATES, RunContext};
use watchbench_core::scenario::ScenarioRegistry;
use watchbench_runner::{AuditTemplateContext, RunReport, ScenarioRunner};
use watchbench_scenarios::register_all;
use watchbench_watcher_client::api::HttpWatcherClient;
use watchbench_watcher_client::config::WatcherClientConfig;

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `run` command.
///
/// Loads configuration, applies command-line overrides, prepares the
/// audit template context if the scenario requires it, runs the
/// benchmark, and always tears the context down afterwards. Ctrl-C
/// trips the run-level cancellation token instead of killing the
/// process, so in-flight audits get a cleanup attempt.
pub async fn execute(
    args: RunArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut config = WatchbenchConfig::load(config_path).await?;
    if let Some(iterations) = args.iterations {
        config.runner.iterations = iterations;
    }
    if let Some(concurrency) = args.concurrency {
        config.runner.concurrency = concurrency;
    }
    if let Some(goal) = args.goal {
        config.context.goal = goal;
    }
    if let Some(strategy) = args.strategy {
        config.context.strategy = strategy;
    }
    config.validate()?;

    let client = Arc::new(HttpWatcherClient::new(WatcherClientConfig::from_core(
        &config,
    ))?);

    let mut registry = ScenarioRegistry::new();
    register_all(&mut registry, Arc::clone(&client), &config)?;
    let needs_templates = registry.get(&args.scenario).is_some_and(|s| {
        s.info()
            .required_contexts
            .iter()
            .any(|c| c == CONTEXT_AUDIT_TEMPLATES)
    });
    let runner = ScenarioRunner::new(registry, config.clone());

    let cancel = CancellationToken::new();
    spawn_ctrl_c_handler(cancel.clone());

    let template_context = if needs_templates {
        Some(AuditTemplateContext::setup(Arc::clone(&client), &config.context).await?)
    } else {
        None
    };

    let ctx = match &template_context {
        Some(context) => RunContext::with_audit_templates(context.template_uuids().to_vec()),
        None => RunContext::new(),
    }
    .with_cancel(cancel);

    let result = runner.run(&args.scenario, Arc::clone(&client), ctx).await;

    // 실행이 어떻게 끝났든 컨텍스트는 정리한다
    if let Some(context) = template_context {
        context.teardown().await;
    }

    let report = result?;
    let failed = report.failed;
    let total = report.iterations;
    writer.render(&RunReportPayload { report })?;

    if failed > 0 {
        return Err(CliError::IterationsFailed { failed, total });
    }
    Ok(())
}

/// Trip the cancellation token on the first Ctrl-C.
fn spawn_ctrl_c_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("interrupt received, cancelling benchmark run");
                cancel.cancel();
            }
            Err(e) => warn!(error = %e, "failed to install Ctrl-C handler"),
        }
    });
}

/// Benchmark run report payload.
#[derive(Serialize)]
pub struct RunReportPayload {
    #[serde(flatten)]
    pub report: RunReport,
}

impl Render for RunReportPayload {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let report = &self.report;
        writeln!(w, "Benchmark: {}", report.scenario.bold())?;
        writeln!(w, "  Iterations: {}", report.iterations)?;
        if report.failed == 0 {
            writeln!(w, "  Succeeded:  {}", report.succeeded.to_string().green())?;
        } else {
            writeln!(w, "  Succeeded:  {}", report.succeeded)?;
            writeln!(w, "  Failed:     {}", report.failed.to_string().red().bold())?;
            for (kind, count) in &report.errors {
                writeln!(w, "    {}: {}", kind, count)?;
            }
        }
        writeln!(
            w,
            "  Duration:   min {:.3}s / mean {:.3}s / p95 {:.3}s / max {:.3}s",
            report.durations.min_secs,
            report.durations.mean_secs,
            report.durations.p95_secs,
            report.durations.max_secs
        )?;
        writeln!(w, "  Wall time:  {:.3}s", report.wall_time_secs)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use watchbench_runner::IterationResult;

    fn sample_report(failed: bool) -> RunReport {
        let results = if failed {
            vec![
                IterationResult::from_run(&Ok(()), Duration::from_secs(1)),
                IterationResult::from_run(
                    &Err(watchbench_core::error::ScenarioError::AuditFailed {
                        uuid: "a1".to_owned(),
                    }),
                    Duration::from_secs(2),
                ),
            ]
        } else {
            vec![IterationResult::from_run(&Ok(()), Duration::from_secs(1))]
        };
        RunReport::from_results("Watcher.create_audit_and_delete", &results, Duration::from_secs(3))
    }

    #[test]
    fn test_report_render_text_success() {
        let payload = RunReportPayload {
            report: sample_report(false),
        };

        let mut buffer = Vec::new();
        payload
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Watcher.create_audit_and_delete"));
        assert!(output.contains("Iterations: 1"));
        assert!(!output.contains("Failed:"));
    }

    #[test]
    fn test_report_render_text_with_failures() {
        let payload = RunReportPayload {
            report: sample_report(true),
        };

        let mut buffer = Vec::new();
        payload
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Failed:"));
        assert!(output.contains("audit_failed: 1"));
    }

    #[test]
    fn test_report_json_flattens_fields() {
        let payload = RunReportPayload {
            report: sample_report(false),
        };

        let json = serde_json::to_value(&payload).expect("JSON serialization should succeed");
        assert_eq!(json["scenario"], "Watcher.create_audit_and_delete");
        assert_eq!(json["succeeded"], 1);
    }
}
