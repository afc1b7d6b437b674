//! `watchbench list` command handler

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use watchbench_core::config::WatchbenchConfig;
use watchbench_core::scenario::{ScenarioInfo, ScenarioRegistry};
use watchbench_scenarios::register_all;
use watchbench_watcher_client::api::HttpWatcherClient;
use watchbench_watcher_client::config::WatcherClientConfig;

use crate::cli::ListArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `list` command.
///
/// Registration does not contact the service, so this works offline.
/// Falls back to default configuration when the config file is absent.
pub async fn execute(
    args: ListArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = match WatchbenchConfig::load(config_path).await {
        Ok(config) => config,
        Err(_) => WatchbenchConfig::default(),
    };

    let client = Arc::new(HttpWatcherClient::new(WatcherClientConfig::from_core(
        &config,
    ))?);
    let mut registry = ScenarioRegistry::new();
    register_all(&mut registry, client, &config)?;

    let report = ScenarioListReport {
        scenarios: registry.infos().cloned().collect(),
        verbose: args.verbose,
    };
    writer.render(&report)?;
    Ok(())
}

/// Scenario listing payload.
#[derive(Serialize)]
pub struct ScenarioListReport {
    /// Registered scenarios in registration order.
    pub scenarios: Vec<ScenarioInfo>,
    /// Whether preconditions are rendered in text mode.
    #[serde(skip)]
    pub verbose: bool,
}

impl Render for ScenarioListReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Registered scenarios ({}):", self.scenarios.len())?;
        for info in &self.scenarios {
            writeln!(w, "  {}", info.name.bold())?;
            writeln!(w, "    {}", info.description)?;
            if self.verbose {
                if !info.required_services.is_empty() {
                    writeln!(w, "    services: {}", info.required_services.join(", "))?;
                }
                if !info.required_contexts.is_empty() {
                    writeln!(w, "    contexts: {}", info.required_contexts.join(", "))?;
                }
                if info.admin_required {
                    writeln!(w, "    {}", "admin required".yellow())?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report(verbose: bool) -> ScenarioListReport {
        ScenarioListReport {
            scenarios: vec![
                ScenarioInfo::new("Watcher.list_audit_templates", "List existing templates.")
                    .requires_service("watcher"),
                ScenarioInfo::new("Watcher.create_audit_and_delete", "Create and delete audit.")
                    .requires_service("watcher")
                    .requires_context("audit_templates"),
            ],
            verbose,
        }
    }

    #[test]
    fn test_render_text_lists_names() {
        let mut buffer = Vec::new();
        sample_report(false)
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Registered scenarios (2)"));
        assert!(output.contains("Watcher.list_audit_templates"));
        assert!(
            !output.contains("contexts:"),
            "preconditions hidden without verbose"
        );
    }

    #[test]
    fn test_render_text_verbose_shows_preconditions() {
        let mut buffer = Vec::new();
        sample_report(true)
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("services: watcher"));
        assert!(output.contains("contexts: audit_templates"));
    }

    #[test]
    fn test_json_serialization_includes_metadata() {
        let json =
            serde_json::to_value(sample_report(false)).expect("JSON serialization should succeed");
        let scenarios = json["scenarios"].as_array().expect("should be array");
        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[1]["admin_required"], false);
        assert_eq!(scenarios[1]["required_contexts"][0], "audit_templates");
    }
}
