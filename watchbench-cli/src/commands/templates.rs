//! `watchbench templates` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use watchbench_core::config::WatchbenchConfig;
use watchbench_core::types::{AuditTemplate, TemplateQuery};
use watchbench_watcher_client::api::{HttpWatcherClient, WatcherApi};
use watchbench_watcher_client::config::WatcherClientConfig;

use crate::cli::TemplatesArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `templates` command.
pub async fn execute(
    args: TemplatesArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = WatchbenchConfig::load(config_path).await?;
    let client = HttpWatcherClient::new(WatcherClientConfig::from_core(&config))?;

    let query = TemplateQuery {
        name: args.name,
        goal: args.goal,
        strategy: args.strategy,
        limit: args.limit,
        sort_key: args.sort_key,
        sort_dir: args.sort_dir.map(Into::into),
        detail: args.detail,
    };
    info!(endpoint = %config.service.endpoint, "querying audit templates");

    let templates = client.list_audit_templates(&query).await?;
    let report = TemplateListReport {
        count: templates.len(),
        detail: args.detail,
        templates,
    };
    writer.render(&report)?;
    Ok(())
}

/// Audit template listing payload.
#[derive(Serialize)]
pub struct TemplateListReport {
    /// Number of templates returned.
    pub count: usize,
    /// Whether detail columns are rendered in text mode.
    #[serde(skip)]
    pub detail: bool,
    /// Templates in service order.
    pub templates: Vec<AuditTemplate>,
}

impl Render for TemplateListReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Audit Templates ({}):", self.count)?;
        writeln!(
            w,
            "{:<38} {:<30} {:<24} {:<24}",
            "UUID", "Name", "Goal", "Strategy"
        )?;
        writeln!(w, "{}", "-".repeat(118))?;
        for template in &self.templates {
            writeln!(
                w,
                "{:<38} {:<30} {:<24} {:<24}",
                template.uuid, template.name, template.goal, template.strategy
            )?;
            if self.detail
                && let Some(description) = &template.description
            {
                writeln!(w, "    {}", description)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report(detail: bool) -> TemplateListReport {
        TemplateListReport {
            count: 1,
            detail,
            templates: vec![AuditTemplate {
                uuid: "tpl-1".to_owned(),
                name: "bench-template".to_owned(),
                goal: "workload_balancing".to_owned(),
                strategy: "workload_stabilization".to_owned(),
                description: Some("created for benchmarking".to_owned()),
            }],
        }
    }

    #[test]
    fn test_render_text_shows_table() {
        let mut buffer = Vec::new();
        sample_report(false)
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Audit Templates (1)"));
        assert!(output.contains("bench-template"));
        assert!(
            !output.contains("created for benchmarking"),
            "description hidden without detail"
        );
    }

    #[test]
    fn test_render_text_detail_shows_description() {
        let mut buffer = Vec::new();
        sample_report(true)
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("created for benchmarking"));
    }

    #[test]
    fn test_json_serialization() {
        let json =
            serde_json::to_value(sample_report(true)).expect("JSON serialization should succeed");
        assert_eq!(json["count"], 1);
        assert_eq!(json["templates"][0]["name"], "bench-template");
    }
}
